use super::*;

#[test]
fn blank_or_missing_base_url_uses_default() {
    assert_eq!(base_url_or_default(None), DEFAULT_API_BASE_URL);
    assert_eq!(base_url_or_default(Some("  ")), DEFAULT_API_BASE_URL);
}

#[test]
fn configured_base_url_is_trimmed() {
    assert_eq!(base_url_or_default(Some(" https://api.example.com ")), "https://api.example.com");
}

#[test]
fn api_base_url_is_never_empty() {
    assert!(!api_base_url().is_empty());
}
