//! Runtime configuration for the `dmc` binary.
//!
//! SYSTEM CONTEXT
//! ==============
//! Values come from flags, then environment (a `.env` file is loaded first),
//! then defaults. Everything that talks to the backend goes through
//! [`ApiConfig`]; `serve` only needs a port.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PORT: u16 = 3000;
/// OCR extraction can run for a long time; the client gives up after an hour.
pub const EXTRACT_TIMEOUT: Duration = Duration::from_secs(60 * 60);

const SESSION_DIR: &str = ".dmc";
const SESSION_FILE: &str = "session.json";

/// Backend connection flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Base URL of the REST backend.
    #[arg(long, global = true, env = "DMC_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub base_url: String,

    /// Bearer token; overrides the stored session.
    #[arg(long, global = true, env = "DMC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Where `dmc login` stores the token.
    #[arg(long, global = true, env = "DMC_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    #[arg(long, global = true, env = "DMC_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    #[arg(long, global = true, env = "DMC_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request: Duration,
    pub connect: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub session_file: PathBuf,
    pub timeouts: Timeouts,
}

impl ApiConfig {
    pub fn from_args(args: ApiArgs) -> Self {
        let session_file = args
            .session_file
            .unwrap_or_else(|| default_session_file(std::env::var_os("HOME").as_deref().map(Path::new)));
        Self {
            base_url: normalize_base_url(&args.base_url),
            token: args.token.filter(|t| !t.trim().is_empty()),
            session_file,
            timeouts: Timeouts {
                request: Duration::from_secs(args.request_timeout_secs),
                connect: Duration::from_secs(args.connect_timeout_secs),
            },
        }
    }
}

/// Trimmed base URL without a trailing slash; blank input means the default.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() { DEFAULT_API_BASE_URL.to_owned() } else { trimmed.to_owned() }
}

/// `$HOME/.dmc/session.json`, or `./.dmc/session.json` without a home directory.
pub fn default_session_file(home: Option<&Path>) -> PathBuf {
    home.unwrap_or_else(|| Path::new(".")).join(SESSION_DIR).join(SESSION_FILE)
}

/// Listen port for `serve`, from `PORT`.
pub fn port_from(raw: Option<&str>) -> Result<u16, crate::error::CliError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(DEFAULT_PORT),
        Some(v) => v
            .parse()
            .map_err(|_| crate::error::CliError::InvalidArgument(format!("PORT must be a port number, got `{v}`"))),
    }
}
