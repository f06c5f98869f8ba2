//! Browser `localStorage` / `sessionStorage` access and the key registry.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages hand work to each other through storage: the import wizard leaves
//! `pdf_id` for the annotation workspace, the device picker leaves
//! `selectedDeviceId` for the chat page, the forgot-password steps pass the
//! email and OTP forward. Every key is declared in [`keys`] so that contract
//! is visible in one place.
//!
//! Server-side renders have no storage; reads return `None` and writes no-op.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use wire::ApiError;

pub mod keys {
    /// Local: bearer token for the backend.
    pub const TOKEN: &str = "dmc_api_gateway_token";
    /// Local: email awaiting registration OTP.
    pub const PENDING_EMAIL: &str = "pendingEmail";
    /// Session: PDF being processed by the import/annotation flow.
    pub const PDF_ID: &str = "pdf_id";
    /// Session: device created in import step 1.
    pub const DEVICE_ID: &str = "device_id";
    /// Session: device picked for a new chat.
    pub const SELECTED_DEVICE_ID: &str = "selectedDeviceId";
    /// Session: forgot-password email.
    pub const RESET_EMAIL: &str = "resetEmail";
    /// Session: forgot-password verified OTP.
    pub const OTP_CODE: &str = "otpCode";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    Local,
    Session,
}

#[cfg(feature = "hydrate")]
fn storage(area: Area) -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    let storage = match area {
        Area::Local => window.local_storage(),
        Area::Session => window.session_storage(),
    };
    storage.ok().flatten()
}

pub fn get(area: Area, key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        storage(area)?.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (area, key);
        None
    }
}

pub fn set(area: Area, key: &str, value: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage(area) {
            if storage.set_item(key, value).is_err() {
                log::warn!("storage write failed for {key}");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (area, key, value);
    }
}

pub fn remove(area: Area, key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage(area) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (area, key);
    }
}

/// Session value parsed as an id; blank or non-numeric values read as absent.
pub fn session_id(key: &str) -> Option<i64> {
    parse_id(get(Area::Session, key).as_deref())
}

/// A session value a page cannot work without.
///
/// # Errors
///
/// Returns [`ApiError::MissingSession`] when the key is absent or blank.
pub fn require_session(key: &'static str) -> Result<String, ApiError> {
    get(Area::Session, key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ApiError::MissingSession { key })
}

/// Like [`require_session`], parsed as an id.
///
/// # Errors
///
/// Returns [`ApiError::MissingSession`] when the key is absent or not numeric.
pub fn require_session_id(key: &'static str) -> Result<i64, ApiError> {
    session_id(key).ok_or(ApiError::MissingSession { key })
}

pub fn auth_token() -> Option<String> {
    get(Area::Local, keys::TOKEN).filter(|t| !t.is_empty())
}

pub fn parse_id(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim).and_then(|v| v.parse().ok())
}
