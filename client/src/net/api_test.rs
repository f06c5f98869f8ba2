use super::*;

#[test]
fn url_joins_base_and_path() {
    let joined = url("/auth/login");
    assert!(joined.starts_with(config::api_base_url().trim_end_matches('/')));
    assert!(joined.ends_with("/auth/login"));
    assert!(!joined.contains("//auth"));
}

#[test]
fn bearer_header_value_formats_token() {
    assert_eq!(bearer("abc.def"), "Bearer abc.def");
}

#[test]
fn transport_error_keeps_message() {
    assert_eq!(transport("connection refused"), ApiError::Transport("connection refused".to_owned()));
}

#[test]
fn extract_timeout_is_one_hour() {
    assert_eq!(EXTRACT_TIMEOUT_MS, 3_600_000);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_side_calls_fail_without_network() {
    let result = block_on(agent_is_extracting());
    assert!(matches!(result, Err(ApiError::Transport(_))));
}

#[cfg(not(feature = "hydrate"))]
fn block_on<F: std::future::Future>(future: F) -> F::Output {
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    let mut future = pin!(future);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }
    }
}
