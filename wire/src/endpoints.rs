//! Endpoint paths and query-string construction.
//!
//! Paths are relative to the configured API base URL. Query values are
//! percent-encoded; the `*` wildcard used by filter dropdowns maps to an
//! empty value, which the backend reads as "no filter".

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

use std::fmt::Display;

use crate::models::StatusFilter;

pub const ADMIN_LOGIN: &str = "/auth/admin_login";
pub const CLIENT_LOGIN: &str = "/auth/login";
pub const CLIENT_AUTHORIZE: &str = "/auth/client_authorize";
pub const UNVERIFIED_REGISTER: &str = "/auth/unverified_register";
pub const VERIFY_REGISTRATION: &str = "/auth/verify_registration";
pub const RESEND_OTP_REGISTRATION: &str = "/auth/resend_otp_registration";
pub const CAN_RESET_PASSWORD: &str = "/auth/can_reset_password";
pub const VERIFY_OTP: &str = "/auth/verify_otp";
pub const RESET_PASSWORD: &str = "/auth/reset_password";
pub const RESEND_OTP_RESET_PASSWORD: &str = "/auth/resend_otp_reset_password";

pub const CONVERSATION_LIST: &str = "/conversation/list";
pub const CONVERSATION_STORING: &str = "/conversation/storing";
pub const RAG_QUERY: &str = "/conversation/rag_query";
pub const NOTE_TAKE: &str = "/conversation/note/take";
pub const NOTE_LIST: &str = "/conversation/note/list";
pub const NOTE_DELETE: &str = "/conversation/note/delete";

pub const AGENT_STATUS: &str = "/pdf_process/agent_is_extracting_status";
pub const BRANDS_AND_TYPES: &str = "/pdf_process/get_brands_and_device_types";
pub const SAVE_AND_EMBED_IMG_ALT: &str = "/pdf_process/save_and_embed_img_alt";
pub const SAVE_AND_EMBED_PARAGRAPH: &str = "/pdf_process/save_and_embed_paragraph";

/// Builder for `key=value&...` query strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn param(mut self, key: &'static str, value: impl Display) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Add a filter value, mapping the `*` wildcard to an empty value.
    #[must_use]
    pub fn filter(self, key: &'static str, value: &str) -> Self {
        self.param(key, filter_value(value))
    }

    #[must_use]
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `path?query`, or just `path` when no parameters were added.
    #[must_use]
    pub fn to_path(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{}", self.encode())
        }
    }
}

/// Join a base URL and an endpoint path with exactly one slash between them.
#[must_use]
pub fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// `*` means "all" in filter dropdowns; the backend expects an empty value.
#[must_use]
pub fn filter_value(value: &str) -> &str {
    if value.trim() == "*" { "" } else { value.trim() }
}

/// Percent-encode one path segment.
#[must_use]
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[must_use]
pub fn conversation(id: &str) -> String {
    format!("/conversation/{}", segment(id))
}

#[must_use]
pub fn img_signed_url(img_id: i64) -> String {
    Query::new().param("img_id", img_id).to_path("/pdf_process/get_img_signed_url")
}

#[must_use]
pub fn new_device(label: &str, brand_id: i64, device_type_id: i64) -> String {
    Query::new()
        .param("label", label)
        .param("brand_id", brand_id)
        .param("device_type_id", device_type_id)
        .to_path("/pdf_process/new_device")
}

#[must_use]
pub fn pdf_upload(device_id: i64, pdf_name: &str) -> String {
    Query::new()
        .param("device_id", device_id)
        .param("pdf_name", pdf_name)
        .to_path("/pdf_process/pdf_upload")
}

#[must_use]
pub fn extract_pdf(pdf_id: i64) -> String {
    Query::new().param("pdf_id", pdf_id).to_path("/pdf_process/extract_pdf")
}

#[must_use]
pub fn pdf_initial_state(pdf_id: i64) -> String {
    Query::new().param("pdf_id", pdf_id).to_path("/pdf_process/get_pdf_initial_state")
}

#[must_use]
pub fn pdf_state(pdf_id: i64, page_number: u32) -> String {
    Query::new()
        .param("pdf_id", pdf_id)
        .param("page_number", page_number)
        .to_path("/pdf_process/get_pdf_state")
}

#[must_use]
pub fn embedding_status(pdf_id: i64) -> String {
    Query::new().param("pdf_id", pdf_id).to_path("/pdf_process/pdf_pages_embedding_status")
}

/// Filters of the tracking list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfListQuery {
    /// 1-based page.
    pub page: u32,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub status: StatusFilter,
}

impl Default for PdfListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            name: String::new(),
            brand: "*".to_owned(),
            category: "*".to_owned(),
            status: StatusFilter::All,
        }
    }
}

impl PdfListQuery {
    #[must_use]
    pub fn to_path(&self) -> String {
        let (min, max) = self.status.scoring_range();
        Query::new()
            .param("offset", self.page.max(1))
            .param("nameQuery", self.name.trim())
            .filter("brand", &self.brand)
            .filter("category", &self.category)
            .param("sort", "scoring")
            .param("min_scoring", min)
            .param("max_scoring", max)
            .to_path("/pdf_process/list_pdfs_states")
    }
}

/// Filters of the chat device picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSearch {
    /// 1-based page.
    pub page: u32,
    pub name: String,
    pub brand: String,
    pub category: String,
}

impl Default for DeviceSearch {
    fn default() -> Self {
        Self {
            page: 1,
            name: String::new(),
            brand: "*".to_owned(),
            category: "*".to_owned(),
        }
    }
}

impl DeviceSearch {
    #[must_use]
    pub fn to_path(&self) -> String {
        Query::new()
            .param("offset", self.page.max(1))
            .param("name", self.name.trim())
            .filter("brand", &self.brand)
            .filter("category", &self.category)
            .to_path("/pdf_process/devices_for_chat")
    }
}
