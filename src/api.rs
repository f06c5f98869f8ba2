//! Native HTTP client for the device-manual backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors the portal's `net::api` over `reqwest`: same endpoints (from
//! `wire::endpoints`), same request bodies and reply decoders (from
//! `wire::models` / `wire::envelope`). Each call logs at `debug`; non-2xx
//! replies and transport failures log at `warn`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wire::ApiError;
use wire::endpoints::{self, PdfListQuery};
use wire::envelope::{decode_ack, decode_data, decode_flat, decode_token, is_success_status};
use wire::models::{
    AdminLoginRequest, AgentStatus, ConversationDetail, ConversationList, CredentialsRequest,
    EmbeddingStatuses, PdfStatesPage, PdfUploadTicket, RagAnswer, RagQueryRequest,
    StoreConversationRequest, StoredConversation, TokenData,
};

use crate::config::{ApiConfig, EXTRACT_TIMEOUT};
use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

impl ApiClient {
    pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self, CliError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request)
            .connect_timeout(config.timeouts.connect)
            .build()?;
        Ok(Self { http, base_url: config.base_url.clone(), token })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, endpoints::join(&self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, method: &Method, path: &str, builder: RequestBuilder) -> Result<(u16, String), ApiError> {
        tracing::debug!(%method, path, "api request");
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "api request failed");
            transport(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        if !is_success_status(status) {
            tracing::warn!(%method, path, status, "api request returned error status");
        }
        Ok((status, body))
    }

    async fn get_raw(&self, path: &str) -> Result<(u16, String), ApiError> {
        self.send(&Method::GET, path, self.request(Method::GET, path)).await
    }

    async fn post_raw<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(u16, String), ApiError> {
        self.send(&Method::POST, path, self.request(Method::POST, path).json(body)).await
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (status, body) = self.get_raw(path).await?;
        decode_data(status, &body)
    }

    async fn post_data<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let (status, raw) = self.post_raw(path, body).await?;
        decode_data(status, &raw)
    }

    fn require_token(&self) -> Result<(), ApiError> {
        if self.token.is_some() {
            Ok(())
        } else {
            Err(ApiError::Status { status: 401, message: "not signed in".to_owned() })
        }
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    pub async fn admin_login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let body = AdminLoginRequest { username: username.to_owned(), password: password.to_owned() };
        self.post_data::<_, TokenData>(endpoints::ADMIN_LOGIN, &body).await.map(|data| data.token)
    }

    pub async fn client_login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let body = CredentialsRequest { email: email.to_owned(), password: password.to_owned() };
        let (status, raw) = self.post_raw(endpoints::CLIENT_LOGIN, &body).await?;
        decode_token(status, &raw)
    }

    // =========================================================================
    // CONVERSATIONS
    // =========================================================================

    pub async fn list_conversations(&self) -> Result<ConversationList, ApiError> {
        self.require_token()?;
        self.get_data(endpoints::CONVERSATION_LIST).await
    }

    pub async fn conversation_detail(&self, id: &str) -> Result<ConversationDetail, ApiError> {
        self.require_token()?;
        self.get_data(&endpoints::conversation(id)).await
    }

    pub async fn store_conversation(&self, device_id: Option<i64>, query: &str) -> Result<StoredConversation, ApiError> {
        let body = StoreConversationRequest { device_id, query: query.to_owned() };
        self.post_data(endpoints::CONVERSATION_STORING, &body).await
    }

    pub async fn rag_query(&self, request: &RagQueryRequest) -> Result<RagAnswer, ApiError> {
        self.post_data(endpoints::RAG_QUERY, request).await
    }

    // =========================================================================
    // PDF PIPELINE
    // =========================================================================

    pub async fn agent_is_extracting(&self) -> Result<bool, ApiError> {
        let (status, raw) = self.get_raw(endpoints::AGENT_STATUS).await?;
        decode_flat::<AgentStatus>(status, &raw).map(|s| s.agent_is_extracting)
    }

    /// Trigger OCR. Runs under [`EXTRACT_TIMEOUT`] instead of the default request timeout.
    pub async fn extract_pdf(&self, pdf_id: i64) -> Result<Option<String>, ApiError> {
        let path = endpoints::extract_pdf(pdf_id);
        let builder = self.request(Method::GET, &path).timeout(EXTRACT_TIMEOUT);
        let (status, raw) = self.send(&Method::GET, &path, builder).await?;
        decode_ack(status, &raw)
    }

    pub async fn pdf_upload_ticket(&self, device_id: i64, pdf_name: &str) -> Result<PdfUploadTicket, ApiError> {
        self.get_data(&endpoints::pdf_upload(device_id, pdf_name)).await
    }

    /// `PUT` raw PDF bytes to a signed storage URL. No bearer token: the URL is the credential.
    pub async fn put_pdf(&self, signed_url: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
        tracing::debug!(size = bytes.len(), "uploading pdf to signed url");
        let response = self
            .http
            .put(signed_url)
            .header(reqwest::header::CONTENT_TYPE, "application/pdf")
            .body(bytes)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            tracing::warn!(status = status.as_u16(), "storage upload rejected");
            Err(ApiError::Status { status: status.as_u16(), message: "upload to storage failed".to_owned() })
        }
    }

    pub async fn pdf_states(&self, query: &PdfListQuery) -> Result<PdfStatesPage, ApiError> {
        self.get_data(&query.to_path()).await
    }

    pub async fn embedding_statuses(&self, pdf_id: i64) -> Result<EmbeddingStatuses, ApiError> {
        self.get_data(&endpoints::embedding_status(pdf_id)).await
    }
}
