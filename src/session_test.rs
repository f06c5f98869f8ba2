use super::*;

fn scratch(name: &str) -> SessionStore {
    let dir = std::env::temp_dir().join(format!("dmc-session-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    SessionStore::new(dir.join("nested").join("session.json"))
}

#[test]
fn missing_file_is_empty_session() {
    let store = scratch("missing");
    assert_eq!(store.load().unwrap(), Session::default());
}

#[test]
fn save_creates_directories_and_round_trips() {
    let store = scratch("save");
    let session = Session { token: Some("tok".to_owned()), portal: Some("admin".to_owned()) };
    store.save(&session).unwrap();
    assert_eq!(store.load().unwrap(), session);
}

#[test]
fn clear_reports_whether_anything_was_removed() {
    let store = scratch("clear");
    assert!(!store.clear().unwrap());
    store.save(&Session { token: Some("tok".to_owned()), portal: None }).unwrap();
    assert!(store.clear().unwrap());
    assert_eq!(store.load().unwrap().token, None);
}

#[test]
fn explicit_token_wins_over_stored() {
    let store = scratch("explicit");
    store.save(&Session { token: Some("stored".to_owned()), portal: None }).unwrap();
    assert_eq!(store.resolve_token(Some("flag")).unwrap().as_deref(), Some("flag"));
    assert_eq!(store.resolve_token(None).unwrap().as_deref(), Some("stored"));
}

#[test]
fn corrupt_file_is_format_error() {
    let store = scratch("corrupt");
    store.save(&Session::default()).unwrap();
    std::fs::write(store.path(), "{not json").unwrap();
    assert!(matches!(store.load(), Err(CliError::SessionFormat(_))));
}
