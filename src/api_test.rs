use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use serde_json::{Value, json};
use wire::models::StatusFilter;

use super::*;
use crate::config::Timeouts;

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str, token: Option<&str>) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_owned(),
        token: None,
        session_file: PathBuf::from("unused"),
        timeouts: Timeouts { request: Duration::from_secs(5), connect: Duration::from_secs(5) },
    };
    ApiClient::new(&config, token.map(str::to_owned)).unwrap()
}

// =============================================================
// Auth
// =============================================================

#[tokio::test]
async fn admin_login_posts_credentials_and_reads_token() {
    let router = Router::new().route(
        "/auth/admin_login",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body, json!({ "username": "ops", "password": "pw" }));
            Json(json!({ "success": true, "data": { "token": "admin-token" } }))
        }),
    );
    let base = spawn(router).await;
    assert_eq!(client(&base, None).admin_login("ops", "pw").await.unwrap(), "admin-token");
}

#[tokio::test]
async fn client_login_failure_carries_server_message() {
    let router = Router::new().route(
        "/auth/login",
        post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Wrong password" }))) }),
    );
    let base = spawn(router).await;
    let err = client(&base, None).client_login("a@b.test", "pw").await.unwrap_err();
    assert_eq!(err, ApiError::Status { status: 401, message: "Wrong password".to_owned() });
}

// =============================================================
// Conversations
// =============================================================

#[tokio::test]
async fn conversation_list_sends_bearer_token() {
    let router = Router::new().route(
        "/conversation/list",
        get(|headers: HeaderMap| async move {
            let auth = headers.get("authorization").and_then(|v| v.to_str().ok()).unwrap_or_default().to_owned();
            assert_eq!(auth, "Bearer tok");
            Json(json!({
                "status": true,
                "data": { "conversations": [{ "conversation_id": "c1", "conversation_title": "Oven" }] }
            }))
        }),
    );
    let base = spawn(router).await;
    let list = client(&base, Some("tok")).list_conversations().await.unwrap();
    let items = list.conversations.unwrap_or_default();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].conversation_id, "c1");
}

#[tokio::test]
async fn conversation_list_without_token_is_not_sent() {
    let hits = Arc::new(Mutex::new(0_u32));
    let counter = Arc::clone(&hits);
    let router = Router::new().route(
        "/conversation/list",
        get(move || {
            let counter = Arc::clone(&counter);
            async move {
                *counter.lock().unwrap() += 1;
                Json(json!({ "status": true, "data": {} }))
            }
        }),
    );
    let base = spawn(router).await;
    let err = client(&base, None).list_conversations().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    assert_eq!(*hits.lock().unwrap(), 0);
}

#[tokio::test]
async fn rejected_envelope_surfaces_message() {
    let router = Router::new().route(
        "/conversation/rag_query",
        post(|| async { Json(json!({ "success": false, "message": "Device not indexed" })) }),
    );
    let base = spawn(router).await;
    let request = RagQueryRequest { query: "hi".to_owned(), conversation_id: None, device_id: Some(3) };
    let err = client(&base, None).rag_query(&request).await.unwrap_err();
    assert_eq!(err, ApiError::Rejected("Device not indexed".to_owned()));
}

// =============================================================
// PDF pipeline
// =============================================================

#[tokio::test]
async fn agent_status_reads_flat_reply() {
    let router = Router::new().route(
        "/pdf_process/agent_is_extracting_status",
        get(|| async { Json(json!({ "success": true, "agent_is_extracting": true })) }),
    );
    let base = spawn(router).await;
    assert!(client(&base, None).agent_is_extracting().await.unwrap());
}

#[tokio::test]
async fn pdf_list_sends_filters_as_query() {
    let router = Router::new().route(
        "/pdf_process/list_pdfs_states",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            assert_eq!(params.get("offset").map(String::as_str), Some("2"));
            assert_eq!(params.get("min_scoring").map(String::as_str), Some("3"));
            assert_eq!(params.get("brand").map(String::as_str), Some(""));
            Json(json!({
                "status": true,
                "data": { "pdfs": [{ "pdf_id": 9, "device_id": 1, "pdf_scoring": 3 }], "prevPage": true, "nextPage": false }
            }))
        }),
    );
    let base = spawn(router).await;
    let query = PdfListQuery { page: 2, status: StatusFilter::Complete, ..PdfListQuery::default() };
    let page = client(&base, None).pdf_states(&query).await.unwrap();
    assert_eq!(page.rows().len(), 1);
    assert!(page.has_prev);
    assert!(!page.has_next);
}

#[tokio::test]
async fn put_pdf_sends_raw_bytes_as_pdf() {
    let received = Arc::new(Mutex::new(None::<(String, Vec<u8>)>));
    let sink = Arc::clone(&received);
    let router = Router::new().route(
        "/bucket/manual.pdf",
        put(move |headers: HeaderMap, body: Bytes| {
            let sink = Arc::clone(&sink);
            async move {
                let content_type =
                    headers.get("content-type").and_then(|v| v.to_str().ok()).unwrap_or_default().to_owned();
                *sink.lock().unwrap() = Some((content_type, body.to_vec()));
                StatusCode::OK
            }
        }),
    );
    let base = spawn(router).await;
    client(&base, Some("tok")).put_pdf(&format!("{base}/bucket/manual.pdf"), b"%PDF-1.7".to_vec()).await.unwrap();
    let (content_type, bytes) = received.lock().unwrap().clone().unwrap();
    assert_eq!(content_type, "application/pdf");
    assert_eq!(bytes, b"%PDF-1.7");
}

#[tokio::test]
async fn storage_rejection_is_status_error() {
    let router = Router::new().route("/bucket/manual.pdf", put(|| async { StatusCode::FORBIDDEN }));
    let base = spawn(router).await;
    let err = client(&base, None).put_pdf(&format!("{base}/bucket/manual.pdf"), Vec::new()).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 403, .. }));
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = client(&format!("http://{addr}"), None).agent_is_extracting().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
