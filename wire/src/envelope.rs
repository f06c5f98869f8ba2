//! Response envelope decoding and the client-side error taxonomy.
//!
//! DESIGN
//! ======
//! Most endpoints answer `{success, message?, data?}`; a few list endpoints
//! name the flag `status` instead. Bodies are parsed as loose JSON first so a
//! `success: false` reply is reported as a rejection even when its `data`
//! would not match the expected payload type.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Every way a backend call can fail, as seen by a front end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, abort, timeout).
    #[error("request failed: {0}")]
    Transport(String),
    /// Non-2xx HTTP status without an application-level envelope.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The envelope reported `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// The body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
    /// A required local form field is missing or invalid.
    #[error("{0}")]
    Validation(String),
    /// An expected session-storage value is absent.
    #[error("missing session value `{key}`")]
    MissingSession { key: &'static str },
}

impl ApiError {
    /// Whether recovering from this error means sending the user back a step.
    #[must_use]
    pub fn is_missing_session(&self) -> bool {
        matches!(self, Self::MissingSession { .. })
    }

    /// Convenience constructor for validation failures.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// The standard `{success, message, data}` reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, alias = "status")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, treating `success: false` or an absent `data` as errors.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the envelope is unsuccessful and
    /// [`ApiError::Decode`] when a successful envelope carries no data.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(rejection_message(self.message)));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("response carried no data".to_owned()))
    }
}

/// Whether an HTTP status code is in the 2xx range.
#[must_use]
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decode an enveloped reply and return its `data` payload.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] for `success: false`, [`ApiError::Status`]
/// for non-2xx replies without a usable envelope, and [`ApiError::Decode`]
/// when the payload does not match `T`.
pub fn decode_data<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let raw = checked_envelope(status, body)?;
    let data = raw
        .data
        .filter(|value| !value.is_null())
        .ok_or_else(|| ApiError::Decode("response carried no data".to_owned()))?;
    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode an enveloped reply where only the success flag matters.
///
/// # Errors
///
/// Same failure modes as [`decode_data`], minus the payload decode.
pub fn decode_ack(status: u16, body: &str) -> Result<Option<String>, ApiError> {
    checked_envelope(status, body).map(|raw| raw.message)
}

/// Decode a reply whose fields sit next to the success flag rather than
/// under `data` (e.g. `{success, agent_is_extracting}`).
///
/// # Errors
///
/// Same failure modes as [`decode_data`].
pub fn decode_flat<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    checked_envelope(status, body)?;
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Reply shape of the auth endpoints that do not use the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlainReply {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Decode a non-enveloped reply where the HTTP status decides success.
///
/// # Errors
///
/// Returns [`ApiError::Status`] carrying the server's `message`/`error` text
/// for non-2xx replies, and [`ApiError::Decode`] for unparsable 2xx bodies.
pub fn decode_plain(status: u16, body: &str) -> Result<PlainReply, ApiError> {
    let parsed = serde_json::from_str::<PlainReply>(body);
    if !is_success_status(status) {
        let message = parsed
            .map(|reply| reply.message.or(reply.error))
            .unwrap_or_default()
            .unwrap_or_else(|| format!("request failed with status {status}"));
        return Err(ApiError::Status { status, message });
    }
    parsed.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Bearer token from a non-enveloped login reply.
///
/// # Errors
///
/// Same failure modes as [`decode_plain`]; a 2xx reply with a missing or
/// empty token is [`ApiError::Decode`].
pub fn decode_token(status: u16, body: &str) -> Result<String, ApiError> {
    decode_plain(status, body)?
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Decode("login reply carried no token".to_owned()))
}

fn checked_envelope(status: u16, body: &str) -> Result<Envelope<Value>, ApiError> {
    match serde_json::from_str::<Envelope<Value>>(body) {
        Ok(envelope) if !envelope.success => {
            Err(ApiError::Rejected(rejection_message(envelope.message)))
        }
        Ok(envelope) if !is_success_status(status) => Err(ApiError::Status {
            status,
            message: envelope.message.unwrap_or_default(),
        }),
        Ok(envelope) => Ok(envelope),
        Err(_) if !is_success_status(status) => Err(ApiError::Status {
            status,
            message: body.trim().to_owned(),
        }),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

fn rejection_message(message: Option<String>) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "request was rejected".to_owned())
}
