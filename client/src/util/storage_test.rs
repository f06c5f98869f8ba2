use super::*;

#[test]
fn parse_id_accepts_trimmed_numbers() {
    assert_eq!(parse_id(Some(" 42 ")), Some(42));
    assert_eq!(parse_id(Some("abc")), None);
    assert_eq!(parse_id(Some("")), None);
    assert_eq!(parse_id(None), None);
}

#[test]
fn keys_match_backend_contract() {
    assert_eq!(keys::TOKEN, "dmc_api_gateway_token");
    assert_eq!(keys::SELECTED_DEVICE_ID, "selectedDeviceId");
    assert_eq!(keys::PDF_ID, "pdf_id");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_render_has_no_storage() {
    set(Area::Session, keys::PDF_ID, "5");
    assert_eq!(get(Area::Session, keys::PDF_ID), None);
    assert_eq!(auth_token(), None);
    remove(Area::Local, keys::TOKEN);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn missing_session_value_is_reported_with_key() {
    let err = require_session_id(keys::PDF_ID).expect_err("missing");
    assert_eq!(err, ApiError::MissingSession { key: "pdf_id" });
    assert!(require_session(keys::RESET_EMAIL).is_err());
}
