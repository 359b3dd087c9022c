//! Error types for the auth service

use thiserror::Error;

/// Outcome classification for register and login.
///
/// Every failure of the two flows maps to exactly one of these. The display
/// strings are the messages returned to clients.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No identifier among email/username/mobile was supplied
    #[error("Invalid Request")]
    MissingCredential,

    /// A record already matches the selector on one of its identifiers
    #[error("User already exists")]
    DuplicateUser,

    /// Unknown user or wrong password; the two are never distinguished
    #[error("Check your login credentials.")]
    InvalidCredentials,

    #[error("An unknown error occurred while registering, please try again later")]
    CreationFailed,
}

impl AuthError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "MISSING_CREDENTIAL",
            AuthError::DuplicateUser => "DUPLICATE_USER",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::CreationFailed => "CREATION_FAILED",
        }
    }

    /// True for failures caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AuthError::CreationFailed)
    }
}

/// Input validation failure naming the offending field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_creation_failure_is_server_side() {
        assert!(AuthError::MissingCredential.is_client_error());
        assert!(AuthError::DuplicateUser.is_client_error());
        assert!(AuthError::InvalidCredentials.is_client_error());
        assert!(!AuthError::CreationFailed.is_client_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(AuthError::MissingCredential.to_string(), "Invalid Request");
        assert_eq!(AuthError::DuplicateUser.to_string(), "User already exists");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Check your login credentials."
        );
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::new("email", "Invalid email format");
        assert_eq!(err.to_string(), "email: Invalid email format");
    }
}
