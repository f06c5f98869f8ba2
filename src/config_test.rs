use super::*;

fn args() -> ApiArgs {
    ApiArgs {
        base_url: DEFAULT_API_BASE_URL.to_owned(),
        token: None,
        session_file: Some(PathBuf::from("/tmp/dmc-session.json")),
        request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
    }
}

#[test]
fn base_url_trailing_slash_is_removed() {
    assert_eq!(normalize_base_url("https://api.example.test/ "), "https://api.example.test");
}

#[test]
fn blank_base_url_falls_back_to_default() {
    assert_eq!(normalize_base_url("   "), DEFAULT_API_BASE_URL);
}

#[test]
fn session_file_defaults_under_home() {
    let path = default_session_file(Some(Path::new("/home/ops")));
    assert_eq!(path, PathBuf::from("/home/ops/.dmc/session.json"));
}

#[test]
fn session_file_without_home_is_relative() {
    assert_eq!(default_session_file(None), PathBuf::from("./.dmc/session.json"));
}

#[test]
fn from_args_maps_timeouts_and_drops_blank_token() {
    let cfg = ApiConfig::from_args(ApiArgs { token: Some("  ".to_owned()), request_timeout_secs: 42, ..args() });
    assert_eq!(cfg.token, None);
    assert_eq!(cfg.timeouts, Timeouts { request: Duration::from_secs(42), connect: Duration::from_secs(10) });
    assert_eq!(cfg.session_file, PathBuf::from("/tmp/dmc-session.json"));
}

#[test]
fn port_defaults_and_parses() {
    assert_eq!(port_from(None).unwrap(), DEFAULT_PORT);
    assert_eq!(port_from(Some(" ")).unwrap(), DEFAULT_PORT);
    assert_eq!(port_from(Some("8081")).unwrap(), 8081);
}

#[test]
fn invalid_port_is_rejected() {
    assert!(port_from(Some("http")).is_err());
}

#[test]
fn extract_timeout_is_one_hour() {
    assert_eq!(EXTRACT_TIMEOUT.as_secs(), 3600);
}
