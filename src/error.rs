//! Error type of the `dmc` binary.

use wire::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("not signed in; run `dmc login` or pass --token")]
    MissingToken,
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("http client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("session file {path}: {source}")]
    Session {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("session file is not valid JSON: {0}")]
    SessionFormat(#[from] serde_json::Error),
    #[error("reading {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("leptos configuration: {0}")]
    LeptosConfig(String),
    #[error("server failed: {0}")]
    Serve(std::io::Error),
    #[error("agent still extracting after {0:?}")]
    PollTimedOut(std::time::Duration),
}
