//! REST API helpers for the device-manual backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): the two transport primitives are stubs that fail with
//! [`ApiError::Transport`], since every endpoint is only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Every helper returns `Result<_, ApiError>`. Envelope decoding lives in
//! `wire::envelope`, so this module only moves bytes and picks the decoder
//! matching each endpoint's reply shape.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use wire::ApiError;
use wire::endpoints;
use wire::envelope::{decode_ack, decode_data, decode_flat, decode_plain, decode_token};
use wire::models::{
    AdminLoginRequest, AgentStatus, BrandsAndTypes, ChatDevicesPage, ConversationDetail,
    ConversationList, CredentialsRequest, EmailRequest, EmbedImageAltRequest, EmbedParagraphRequest,
    EmbeddingStatuses, NewDevice, NoteDeleteRequest, NoteList, NoteListRequest, OtpRequest,
    PdfInitialState, PdfPageState, PdfStatesPage, PdfUploadTicket, RagAnswer, RagQueryRequest,
    ResetPasswordRequest, SignedUrl, StoreConversationRequest, StoredConversation, TakeNoteRequest,
    TokenData,
};

use crate::config;

/// Client abort for OCR extraction.
pub const EXTRACT_TIMEOUT_MS: u32 = 60 * 60 * 1000;

fn url(path: &str) -> String {
    endpoints::join(config::api_base_url(), path)
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn transport(err: impl std::fmt::Display) -> ApiError {
    ApiError::Transport(err.to_string())
}

fn missing_token() -> ApiError {
    ApiError::Status { status: 401, message: "not signed in".to_owned() }
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
fn with_token(builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
    match crate::util::storage::auth_token() {
        Some(token) => builder.header("Authorization", &bearer(&token)),
        None => builder,
    }
}

#[cfg(feature = "hydrate")]
async fn exchange(request: gloo_net::http::Request) -> Result<(u16, String), ApiError> {
    let response = request.send().await.map_err(transport)?;
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    if !wire::envelope::is_success_status(status) {
        log::warn!("{} -> {status}", response.url());
    }
    Ok((status, body))
}

/// `GET path`, returning status and raw body.
async fn get_raw(path: &str) -> Result<(u16, String), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = with_token(gloo_net::http::Request::get(&url(path)))
            .build()
            .map_err(transport)?;
        exchange(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url(path);
        Err(ApiError::Transport("not available on server".to_owned()))
    }
}

/// `POST path` with a JSON body, returning status and raw body.
async fn post_raw<B: Serialize>(path: &str, body: &B) -> Result<(u16, String), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = with_token(gloo_net::http::Request::post(&url(path)))
            .json(body)
            .map_err(transport)?;
        exchange(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url(path), body);
        Err(ApiError::Transport("not available on server".to_owned()))
    }
}

async fn get_data<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let (status, body) = get_raw(path).await?;
    decode_data(status, &body)
}

async fn post_data<B: Serialize, T: serde::de::DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let (status, raw) = post_raw(path, body).await?;
    decode_data(status, &raw)
}

async fn post_plain<B: Serialize>(path: &str, body: &B) -> Result<Option<String>, ApiError> {
    let (status, raw) = post_raw(path, body).await?;
    decode_plain(status, &raw).map(|reply| reply.message)
}

// =============================================================================
// AUTH
// =============================================================================

/// `POST /auth/admin_login`; returns the bearer token.
///
/// # Errors
///
/// Transport, rejection, or decode failures.
pub async fn admin_login(username: &str, password: &str) -> Result<String, ApiError> {
    let body = AdminLoginRequest { username: username.to_owned(), password: password.to_owned() };
    post_data::<_, TokenData>(endpoints::ADMIN_LOGIN, &body).await.map(|data| data.token)
}

/// `POST /auth/login`; returns the bearer token.
///
/// # Errors
///
/// Non-2xx replies carry the server's message; a 2xx reply without a token
/// is a decode error.
pub async fn client_login(email: &str, password: &str) -> Result<String, ApiError> {
    let body = CredentialsRequest { email: email.to_owned(), password: password.to_owned() };
    let (status, raw) = post_raw(endpoints::CLIENT_LOGIN, &body).await?;
    decode_token(status, &raw)
}

/// `POST /auth/client_authorize`. `Ok(false)` when there is no token or the
/// backend refuses it.
///
/// # Errors
///
/// Only transport failures are errors.
pub async fn client_authorize() -> Result<bool, ApiError> {
    if crate::util::storage::auth_token().is_none() {
        return Ok(false);
    }
    let (status, _) = post_raw(endpoints::CLIENT_AUTHORIZE, &serde_json::json!({})).await?;
    Ok(wire::envelope::is_success_status(status))
}

/// # Errors
///
/// Non-2xx replies carry the server's message.
pub async fn register(email: &str, password: &str) -> Result<Option<String>, ApiError> {
    let body = CredentialsRequest { email: email.to_owned(), password: password.to_owned() };
    post_plain(endpoints::UNVERIFIED_REGISTER, &body).await
}

/// # Errors
///
/// Non-2xx replies carry the server's message.
pub async fn verify_registration(email: &str, otp_code: &str) -> Result<Option<String>, ApiError> {
    let body = OtpRequest { email: email.to_owned(), otp_code: otp_code.to_owned() };
    post_plain(endpoints::VERIFY_REGISTRATION, &body).await
}

/// # Errors
///
/// Non-2xx replies carry the server's message.
pub async fn resend_registration_otp(email: &str) -> Result<Option<String>, ApiError> {
    post_plain(endpoints::RESEND_OTP_REGISTRATION, &EmailRequest { email: email.to_owned() }).await
}

/// # Errors
///
/// Non-2xx replies carry the server's message.
pub async fn can_reset_password(email: &str) -> Result<Option<String>, ApiError> {
    post_plain(endpoints::CAN_RESET_PASSWORD, &EmailRequest { email: email.to_owned() }).await
}

/// # Errors
///
/// Non-2xx replies carry the server's message.
pub async fn resend_reset_otp(email: &str) -> Result<Option<String>, ApiError> {
    post_plain(endpoints::RESEND_OTP_RESET_PASSWORD, &EmailRequest { email: email.to_owned() }).await
}

/// # Errors
///
/// Non-2xx replies carry the server's message.
pub async fn verify_otp(email: &str, otp_code: &str) -> Result<Option<String>, ApiError> {
    let body = OtpRequest { email: email.to_owned(), otp_code: otp_code.to_owned() };
    post_plain(endpoints::VERIFY_OTP, &body).await
}

/// # Errors
///
/// Non-2xx replies carry the server's message.
pub async fn reset_password(email: &str, otp_code: &str, password: &str) -> Result<Option<String>, ApiError> {
    let body = ResetPasswordRequest {
        email: email.to_owned(),
        otp_code: otp_code.to_owned(),
        password: password.to_owned(),
    };
    post_plain(endpoints::RESET_PASSWORD, &body).await
}

// =============================================================================
// CONVERSATIONS
// =============================================================================

/// # Errors
///
/// Fails without a token, and on transport/envelope errors.
pub async fn list_conversations() -> Result<ConversationList, ApiError> {
    if crate::util::storage::auth_token().is_none() {
        return Err(missing_token());
    }
    get_data(endpoints::CONVERSATION_LIST).await
}

/// # Errors
///
/// Fails without a token, and on transport/envelope errors.
pub async fn conversation_detail(id: &str) -> Result<ConversationDetail, ApiError> {
    if crate::util::storage::auth_token().is_none() {
        return Err(missing_token());
    }
    get_data(&endpoints::conversation(id)).await
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn store_conversation(device_id: Option<i64>, query: &str) -> Result<StoredConversation, ApiError> {
    let body = StoreConversationRequest { device_id, query: query.to_owned() };
    post_data(endpoints::CONVERSATION_STORING, &body).await
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn rag_query(request: &RagQueryRequest) -> Result<RagAnswer, ApiError> {
    post_data(endpoints::RAG_QUERY, request).await
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn take_note(pair_id: i64, title: &str) -> Result<(), ApiError> {
    let body = TakeNoteRequest { pair_id, title: title.to_owned() };
    let (status, raw) = post_raw(endpoints::NOTE_TAKE, &body).await?;
    decode_ack(status, &raw).map(|_| ())
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn list_notes(conversation_id: &str) -> Result<NoteList, ApiError> {
    let body = NoteListRequest { conversation_id: conversation_id.to_owned() };
    post_data(endpoints::NOTE_LIST, &body).await
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn delete_note(id: i64) -> Result<(), ApiError> {
    let (status, raw) = post_raw(endpoints::NOTE_DELETE, &NoteDeleteRequest { id }).await?;
    decode_ack(status, &raw).map(|_| ())
}

// =============================================================================
// DEVICES + PDF PIPELINE
// =============================================================================

/// Signed read URL for an extracted image.
///
/// # Errors
///
/// Transport or envelope errors.
pub async fn image_signed_url(img_id: i64) -> Result<String, ApiError> {
    get_data::<SignedUrl>(&endpoints::img_signed_url(img_id)).await.map(|d| d.signed_url)
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn agent_is_extracting() -> Result<bool, ApiError> {
    let (status, raw) = get_raw(endpoints::AGENT_STATUS).await?;
    decode_flat::<AgentStatus>(status, &raw).map(|s| s.agent_is_extracting)
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn brands_and_types() -> Result<BrandsAndTypes, ApiError> {
    get_data(endpoints::BRANDS_AND_TYPES).await
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn devices_for_chat(search: &endpoints::DeviceSearch) -> Result<ChatDevicesPage, ApiError> {
    get_data(&search.to_path()).await
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn new_device(label: &str, brand_id: i64, device_type_id: i64) -> Result<i64, ApiError> {
    get_data::<NewDevice>(&endpoints::new_device(label, brand_id, device_type_id))
        .await
        .map(|d| d.device_id)
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn pdf_upload_ticket(device_id: i64, pdf_name: &str) -> Result<PdfUploadTicket, ApiError> {
    get_data(&endpoints::pdf_upload(device_id, pdf_name)).await
}

/// `PUT` the raw PDF to its signed storage URL.
///
/// # Errors
///
/// Transport failures and non-2xx storage replies.
#[cfg(feature = "hydrate")]
pub async fn put_pdf(signed_url: &str, file: web_sys::File) -> Result<(), ApiError> {
    let request = gloo_net::http::Request::put(signed_url)
        .header("Content-Type", "application/pdf")
        .body(file)
        .map_err(transport)?;
    let response = request.send().await.map_err(transport)?;
    if response.ok() {
        Ok(())
    } else {
        Err(ApiError::Status { status: response.status(), message: "upload to storage failed".to_owned() })
    }
}

/// Trigger OCR extraction, aborting after [`EXTRACT_TIMEOUT_MS`].
///
/// # Errors
///
/// Transport failures (including the abort) and envelope errors.
pub async fn extract_pdf(pdf_id: i64) -> Result<Option<String>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let controller = web_sys::AbortController::new().map_err(|e| transport(format!("{e:?}")))?;
        let signal = controller.signal();
        let timeout = gloo_timers::callback::Timeout::new(EXTRACT_TIMEOUT_MS, move || controller.abort());
        let request = with_token(gloo_net::http::Request::get(&url(&endpoints::extract_pdf(pdf_id))))
            .abort_signal(Some(&signal))
            .build()
            .map_err(transport)?;
        let result = exchange(request).await;
        timeout.cancel();
        let (status, raw) = result?;
        decode_ack(status, &raw)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let (status, raw) = get_raw(&endpoints::extract_pdf(pdf_id)).await?;
        decode_ack(status, &raw)
    }
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn pdf_initial_state(pdf_id: i64) -> Result<PdfInitialState, ApiError> {
    get_data(&endpoints::pdf_initial_state(pdf_id)).await
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn pdf_state(pdf_id: i64, page_number: u32) -> Result<PdfPageState, ApiError> {
    get_data(&endpoints::pdf_state(pdf_id, page_number)).await
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn embed_image_alt(pdf_image_id: i64, img_alt: &str) -> Result<Option<String>, ApiError> {
    let body = EmbedImageAltRequest { pdf_image_id, img_alt: img_alt.to_owned() };
    let (status, raw) = post_raw(endpoints::SAVE_AND_EMBED_IMG_ALT, &body).await?;
    decode_ack(status, &raw)
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn embed_paragraph(pdf_paragraph_id: i64, context: &str) -> Result<Option<String>, ApiError> {
    let body = EmbedParagraphRequest { pdf_paragraph_id, context: context.to_owned() };
    let (status, raw) = post_raw(endpoints::SAVE_AND_EMBED_PARAGRAPH, &body).await?;
    decode_ack(status, &raw)
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn embedding_statuses(pdf_id: i64) -> Result<EmbeddingStatuses, ApiError> {
    get_data(&endpoints::embedding_status(pdf_id)).await
}

/// # Errors
///
/// Transport or envelope errors.
pub async fn pdf_states(query: &endpoints::PdfListQuery) -> Result<PdfStatesPage, ApiError> {
    get_data(&query.to_path()).await
}
