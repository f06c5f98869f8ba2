//! Build-time configuration for the portal.
//!
//! The backend base URL is compiled into the WASM bundle from
//! `DMC_API_BASE_URL`; browsers have no process environment to read at runtime.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";

pub fn api_base_url() -> &'static str {
    base_url_or_default(option_env!("DMC_API_BASE_URL"))
}

fn base_url_or_default(raw: Option<&'static str>) -> &'static str {
    match raw.map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => DEFAULT_API_BASE_URL,
    }
}
