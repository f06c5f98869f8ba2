//! Request/response DTOs and the chat data model.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON exactly (including its mixed
//! `camelCase`/`snake_case`). Go serializes empty slices as `null`, so list
//! fields are `Option<Vec<_>>` with accessor helpers that flatten to `&[]`.

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// CHAT MODEL
// =============================================================================

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// One chat message as displayed in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    /// ISO-8601 timestamp.
    pub timestamp: String,
    /// Image identifiers attached to an AI answer, in display order.
    #[serde(default)]
    pub images_ids: Vec<i64>,
}

impl Message {
    #[must_use]
    pub fn user(id: impl Into<String>, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            sender: Sender::User,
            timestamp: timestamp.into(),
            images_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn ai(
        id: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<String>,
        images_ids: Vec<i64>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            sender: Sender::Ai,
            timestamp: timestamp.into(),
            images_ids,
        }
    }

    #[must_use]
    pub fn is_ai(&self) -> bool {
        self.sender == Sender::Ai
    }
}

/// A conversation entry in the sidebar list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub device_name: String,
    /// ISO-8601 time of the last update.
    pub timestamp: String,
}

/// Item of `GET /conversation/list`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: String,
    #[serde(default)]
    pub conversation_title: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub conversation_updated_time: Option<String>,
}

impl ConversationSummary {
    #[must_use]
    pub fn into_conversation(self) -> Conversation {
        Conversation {
            id: self.conversation_id,
            title: non_blank_or(self.conversation_title, "Untitled"),
            device_name: self.device_name.unwrap_or_default(),
            timestamp: self.conversation_updated_time.unwrap_or_default(),
        }
    }
}

/// Payload of `GET /conversation/list`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ConversationList {
    #[serde(default)]
    pub conversations: Option<Vec<ConversationSummary>>,
}

/// Payload of `GET /conversation/:id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ConversationDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(default)]
    pub pairs: Option<Vec<ConversationPair>>,
}

impl ConversationDetail {
    #[must_use]
    pub fn pairs(&self) -> &[ConversationPair] {
        self.pairs.as_deref().unwrap_or_default()
    }

    /// Flatten stored request/response pairs into display messages.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.pairs().iter().flat_map(ConversationPair::to_messages).collect()
    }
}

/// One stored question/answer exchange.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ConversationPair {
    pub id: i64,
    pub request: String,
    pub response: String,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub images: Option<Vec<i64>>,
}

impl ConversationPair {
    /// The user question (`req-<id>`) followed by the AI answer (`res-<id>`).
    #[must_use]
    pub fn to_messages(&self) -> [Message; 2] {
        [
            Message::user(format!("req-{}", self.id), &self.request, &self.created_time),
            Message::ai(
                format!("res-{}", self.id),
                &self.response,
                &self.created_time,
                self.images.clone().unwrap_or_default(),
            ),
        ]
    }
}

/// Body of `POST /conversation/storing`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StoreConversationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<i64>,
    pub query: String,
}

/// Payload of `POST /conversation/storing`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StoredConversation {
    pub conversation_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub conversation_updated_time: Option<String>,
}

impl StoredConversation {
    #[must_use]
    pub fn to_conversation(&self) -> Conversation {
        Conversation {
            id: self.conversation_id.clone(),
            title: non_blank_or(self.title.clone(), "Untitled"),
            device_name: self.device_name.clone().unwrap_or_default(),
            timestamp: self.conversation_updated_time.clone().unwrap_or_default(),
        }
    }
}

/// Body of `POST /conversation/rag_query`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RagQueryRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<i64>,
}

/// Payload of `POST /conversation/rag_query`.
///
/// `pair_id` is `-1` when the exchange was not stored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RagAnswer {
    pub pair_id: i64,
    pub response: String,
    #[serde(default)]
    pub images_ids: Option<Vec<i64>>,
}

impl RagAnswer {
    #[must_use]
    pub fn into_message(self, timestamp: impl Into<String>) -> Message {
        Message::ai(
            self.pair_id.to_string(),
            self.response,
            timestamp,
            self.images_ids.unwrap_or_default(),
        )
    }
}

// =============================================================================
// NOTES
// =============================================================================

/// Body of `POST /conversation/note/take`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TakeNoteRequest {
    #[serde(rename = "requestresponsepairid")]
    pub pair_id: i64,
    pub title: String,
}

/// Body of `POST /conversation/note/list`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NoteListRequest {
    pub conversation_id: String,
}

/// Body of `POST /conversation/note/delete`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NoteDeleteRequest {
    pub id: i64,
}

/// Item of `POST /conversation/note/list`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "note_id")]
    pub id: i64,
    pub title: String,
    #[serde(rename = "response_context", default)]
    pub content: String,
}

/// Payload of `POST /conversation/note/list`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NoteList {
    #[serde(default)]
    pub notes: Option<Vec<Note>>,
}

// =============================================================================
// DEVICES
// =============================================================================

/// A device brand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub label: String,
}

/// A device category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: i64,
    pub label: String,
}

/// Payload of `GET /pdf_process/get_brands_and_device_types`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct BrandsAndTypes {
    #[serde(default)]
    pub brands: Option<Vec<Brand>>,
    #[serde(default, rename = "deviceTypes", alias = "devices")]
    pub device_types: Option<Vec<DeviceType>>,
}

/// Payload of `GET /pdf_process/new_device`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct NewDevice {
    pub device_id: i64,
}

/// Item of `GET /pdf_process/devices_for_chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatDevice {
    pub device_id: i64,
    pub device_name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Payload of `GET /pdf_process/devices_for_chat`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ChatDevicesPage {
    #[serde(default)]
    pub devices: Option<Vec<ChatDevice>>,
    #[serde(default, rename = "PrevPageExisted")]
    pub has_prev: bool,
    #[serde(default, rename = "NextPageExisted")]
    pub has_next: bool,
}

// =============================================================================
// PDF PIPELINE
// =============================================================================

/// Payload of `GET /pdf_process/pdf_upload`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PdfUploadTicket {
    pub pdf_id: i64,
    pub signed_url: String,
}

/// Payload of `GET /pdf_process/get_img_signed_url`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SignedUrl {
    pub signed_url: String,
}

/// Reply of `GET /pdf_process/agent_is_extracting_status` (flat, no `data`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct AgentStatus {
    #[serde(default)]
    pub agent_is_extracting: bool,
}

/// The full-page text block of one PDF page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParagraph {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub modified: bool,
}

/// An image extracted from a PDF page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfImage {
    pub id: i64,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub modified: bool,
}

/// Payload of `GET /pdf_process/get_pdf_state`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PdfPageState {
    #[serde(default)]
    pub images: Option<Vec<PdfImage>>,
    #[serde(default)]
    pub page_paragraph: Option<PageParagraph>,
}

impl PdfPageState {
    #[must_use]
    pub fn images(&self) -> &[PdfImage] {
        self.images.as_deref().unwrap_or_default()
    }
}

/// Payload of `GET /pdf_process/get_pdf_initial_state`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PdfInitialState {
    #[serde(default)]
    pub pdf_gcs_signed_read_url: Option<String>,
    #[serde(default)]
    pub pdf_ocr_flag: bool,
    #[serde(default)]
    pub pdf_name: Option<String>,
    #[serde(default)]
    pub pdf_number_of_pages: u32,
    #[serde(flatten)]
    pub first_page: PdfPageState,
}

/// Body of `POST /pdf_process/save_and_embed_img_alt`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmbedImageAltRequest {
    pub pdf_image_id: i64,
    pub img_alt: String,
}

/// Body of `POST /pdf_process/save_and_embed_paragraph`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmbedParagraphRequest {
    pub pdf_paragraph_id: i64,
    pub context: String,
}

/// Embedding completion of one page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEmbeddingStatus {
    pub page_number: u32,
    pub done: bool,
}

/// Payload of `GET /pdf_process/pdf_pages_embedding_status`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EmbeddingStatuses {
    #[serde(default)]
    pub embedded_statuses: Option<Vec<PageEmbeddingStatus>>,
}

impl EmbeddingStatuses {
    #[must_use]
    pub fn pages(&self) -> &[PageEmbeddingStatus] {
        self.embedded_statuses.as_deref().unwrap_or_default()
    }

    /// True when at least one page is listed and every page is embedded.
    #[must_use]
    pub fn all_done(&self) -> bool {
        let pages = self.pages();
        !pages.is_empty() && pages.iter().all(|p| p.done)
    }
}

/// Pipeline stage derived from the backend's integer scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PdfStage {
    /// Uploaded, OCR not yet run (scoring 1).
    NeedsOcr,
    /// OCR done, not every page embedded (scoring 2).
    NotFullyEmbedded,
    /// Every page embedded (scoring 3).
    Complete,
}

impl PdfStage {
    pub const TOTAL_STEPS: u8 = 3;

    /// Map a backend scoring value; unknown values fall back to [`PdfStage::NeedsOcr`].
    #[must_use]
    pub fn from_scoring(scoring: i64) -> Self {
        match scoring {
            2 => Self::NotFullyEmbedded,
            3 => Self::Complete,
            _ => Self::NeedsOcr,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NeedsOcr => "Needs OCR",
            Self::NotFullyEmbedded => "Not fully embedded",
            Self::Complete => "Complete",
        }
    }
}

/// Progress percentage for a raw scoring value, rounded to the nearest integer.
#[must_use]
pub fn scoring_percent(scoring: i64) -> u8 {
    let clamped = scoring.clamp(0, i64::from(PdfStage::TOTAL_STEPS));
    let percent = (clamped * 100 + i64::from(PdfStage::TOTAL_STEPS) / 2) / i64::from(PdfStage::TOTAL_STEPS);
    u8::try_from(percent).unwrap_or(100)
}

/// Status filter of the tracking list, mapped to a scoring range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    InProgress,
    Complete,
}

impl StatusFilter {
    /// Inclusive `(min_scoring, max_scoring)` range.
    #[must_use]
    pub fn scoring_range(self) -> (u8, u8) {
        match self {
            Self::All => (1, 3),
            Self::InProgress => (1, 2),
            Self::Complete => (3, 3),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::InProgress => "in-progress",
            Self::Complete => "complete",
        }
    }

    /// Parse the filter's form value; unknown values mean [`StatusFilter::All`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "in-progress" => Self::InProgress,
            "complete" => Self::Complete,
            _ => Self::All,
        }
    }
}

/// Item of `GET /pdf_process/list_pdfs_states`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PdfStateRow {
    pub pdf_id: i64,
    #[serde(default)]
    pub device_id: i64,
    #[serde(default, rename = "pdf_lastModified")]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub pdf_label: Option<String>,
    #[serde(default)]
    pub pdf_scoring: Option<i64>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl PdfStateRow {
    #[must_use]
    pub fn stage(&self) -> PdfStage {
        PdfStage::from_scoring(self.pdf_scoring.unwrap_or(0))
    }

    /// Display name, falling back to a device-derived file name.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.pdf_label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_owned(),
            _ => format!("Device_{}.pdf", self.device_id),
        }
    }
}

/// Payload of `GET /pdf_process/list_pdfs_states`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PdfStatesPage {
    #[serde(default)]
    pub pdfs: Option<Vec<PdfStateRow>>,
    #[serde(default, rename = "prevPage")]
    pub has_prev: bool,
    #[serde(default, rename = "nextPage")]
    pub has_next: bool,
}

impl PdfStatesPage {
    #[must_use]
    pub fn rows(&self) -> &[PdfStateRow] {
        self.pdfs.as_deref().unwrap_or_default()
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Body of `POST /auth/admin_login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/login` and `POST /auth/unverified_register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Body of the email-only auth endpoints (`can_reset_password`, OTP resends).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Body of `POST /auth/verify_registration` and `POST /auth/verify_otp`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OtpRequest {
    pub email: String,
    pub otp_code: String,
}

/// Body of `POST /auth/reset_password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp_code: String,
    pub password: String,
}

/// `data` of a successful admin login.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenData {
    pub token: String,
}

fn non_blank_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_owned(),
    }
}
