use super::*;

#[derive(Debug, PartialEq, Deserialize)]
struct SignedUrl {
    signed_url: String,
}

// =============================================================
// decode_data
// =============================================================

#[test]
fn decode_data_returns_payload_on_success() {
    let body = r#"{"success":true,"data":{"signed_url":"https://x/y"}}"#;
    let data: SignedUrl = decode_data(200, body).expect("payload");
    assert_eq!(data.signed_url, "https://x/y");
}

#[test]
fn decode_data_accepts_status_flag_alias() {
    let body = r#"{"status":true,"data":{"signed_url":"u"}}"#;
    let data: SignedUrl = decode_data(200, body).expect("payload");
    assert_eq!(data.signed_url, "u");
}

#[test]
fn decode_data_reports_rejection_message() {
    let body = r#"{"success":false,"message":"No device found"}"#;
    let err = decode_data::<SignedUrl>(404, body).expect_err("rejected");
    assert_eq!(err, ApiError::Rejected("No device found".to_owned()));
}

#[test]
fn decode_data_rejection_without_message_uses_fallback() {
    let err = decode_data::<SignedUrl>(200, r#"{"success":false}"#).expect_err("rejected");
    assert_eq!(err, ApiError::Rejected("request was rejected".to_owned()));
}

#[test]
fn decode_data_rejection_ignores_mismatched_data() {
    let body = r#"{"success":false,"message":"bad","data":[1,2,3]}"#;
    let err = decode_data::<SignedUrl>(500, body).expect_err("rejected");
    assert!(matches!(err, ApiError::Rejected(m) if m == "bad"));
}

#[test]
fn decode_data_missing_data_is_decode_error() {
    let err = decode_data::<SignedUrl>(200, r#"{"success":true}"#).expect_err("no data");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn decode_data_null_data_is_decode_error() {
    let err = decode_data::<SignedUrl>(200, r#"{"success":true,"data":null}"#).expect_err("null data");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn decode_data_non_json_error_status_keeps_body() {
    let err = decode_data::<SignedUrl>(502, "  Bad Gateway \n").expect_err("status");
    assert_eq!(err, ApiError::Status { status: 502, message: "Bad Gateway".to_owned() });
}

#[test]
fn decode_data_non_json_success_status_is_decode_error() {
    let err = decode_data::<SignedUrl>(200, "<html>").expect_err("decode");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn decode_data_wrong_payload_shape_is_decode_error() {
    let body = r#"{"success":true,"data":{"url":"x"}}"#;
    let err = decode_data::<SignedUrl>(200, body).expect_err("shape");
    assert!(matches!(err, ApiError::Decode(_)));
}

// =============================================================
// decode_ack / decode_flat
// =============================================================

#[test]
fn decode_ack_returns_message() {
    let body = r#"{"success":true,"message":"Paragraph embedded"}"#;
    assert_eq!(decode_ack(200, body).expect("ack"), Some("Paragraph embedded".to_owned()));
}

#[test]
fn decode_ack_success_true_with_error_status_is_status_error() {
    let body = r#"{"success":true,"message":"odd"}"#;
    let err = decode_ack(500, body).expect_err("status");
    assert_eq!(err, ApiError::Status { status: 500, message: "odd".to_owned() });
}

#[derive(Debug, Deserialize)]
struct AgentFlag {
    agent_is_extracting: bool,
}

#[test]
fn decode_flat_reads_top_level_fields() {
    let body = r#"{"success":true,"agent_is_extracting":true,"message":"busy"}"#;
    let flag: AgentFlag = decode_flat(200, body).expect("flag");
    assert!(flag.agent_is_extracting);
}

#[test]
fn decode_flat_rejects_unsuccessful_reply() {
    let body = r#"{"success":false,"message":"nope"}"#;
    assert!(matches!(decode_flat::<AgentFlag>(200, body), Err(ApiError::Rejected(_))));
}

// =============================================================
// decode_plain
// =============================================================

#[test]
fn decode_plain_returns_token_on_success() {
    let reply = decode_plain(200, r#"{"token":"abc"}"#).expect("reply");
    assert_eq!(reply.token.as_deref(), Some("abc"));
}

#[test]
fn decode_plain_prefers_message_over_error_on_failure() {
    let err = decode_plain(401, r#"{"message":"Wrong password","error":"x"}"#).expect_err("status");
    assert_eq!(err, ApiError::Status { status: 401, message: "Wrong password".to_owned() });
}

#[test]
fn decode_plain_uses_error_field_when_message_missing() {
    let err = decode_plain(500, r#"{"error":"Could not generate token"}"#).expect_err("status");
    assert!(matches!(err, ApiError::Status { message, .. } if message == "Could not generate token"));
}

#[test]
fn decode_plain_unparsable_failure_uses_status_text() {
    let err = decode_plain(503, "down").expect_err("status");
    assert!(matches!(err, ApiError::Status { status: 503, message } if message.contains("503")));
}

#[test]
fn decode_token_reads_plain_reply() {
    assert_eq!(decode_token(200, r#"{"token":"t1"}"#).expect("token"), "t1");
}

#[test]
fn decode_token_without_token_is_decode_error() {
    assert!(matches!(decode_token(200, r#"{"token":""}"#), Err(ApiError::Decode(_))));
}

#[test]
fn decode_token_failure_surfaces_server_message() {
    let err = decode_token(401, r#"{"error":"Invalid credentials"}"#).expect_err("status");
    assert_eq!(err.to_string(), "server returned 401: Invalid credentials");
}

// =============================================================
// ApiError helpers
// =============================================================

#[test]
fn missing_session_is_flagged() {
    assert!(ApiError::MissingSession { key: "pdf_id" }.is_missing_session());
    assert!(!ApiError::validation("x").is_missing_session());
}

#[test]
fn error_display_is_user_readable() {
    let err = ApiError::MissingSession { key: "pdf_id" };
    assert_eq!(err.to_string(), "missing session value `pdf_id`");
}
