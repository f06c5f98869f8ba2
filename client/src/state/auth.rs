//! Auth-session state and local form validation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bearer token lives in `localStorage` (see `util::storage::keys::TOKEN`);
//! this state mirrors it for rendering and records the outcome of the client
//! portal's `client_authorize` check.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use wire::ApiError;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const OTP_LEN: usize = 6;

/// Result of the client portal guard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Access {
    #[default]
    Checking,
    Granted,
    Denied,
}

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub access: Access,
}

impl AuthState {
    pub fn from_token(token: Option<String>) -> Self {
        Self { token, access: Access::Checking }
    }

    pub fn signed_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// # Errors
///
/// Validation error naming the first problem.
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ApiError::validation("Enter a valid email address."));
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(ApiError::validation("Enter a valid email address."));
    }
    Ok(())
}

/// # Errors
///
/// Validation error when the password is too short or the confirmation differs.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters."
        )));
    }
    if password != confirm {
        return Err(ApiError::validation("Passwords do not match."));
    }
    Ok(())
}

/// # Errors
///
/// Validation error unless the code is exactly six digits.
pub fn validate_otp(code: &str) -> Result<(), ApiError> {
    let code = code.trim();
    if code.len() == OTP_LEN && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ApiError::validation("Please enter all 6 digits."))
    }
}

/// Keep only digits, capped at the OTP length.
pub fn sanitize_otp_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(OTP_LEN).collect()
}
