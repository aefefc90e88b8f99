//! # Auth Errors
//!
//! Error types for the session and authorization module.

use thiserror::Error;

use crate::client::ApiError;
use crate::validation::ValidationErrors;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Why a session token could not be turned into an identity.
///
/// Never shown to the user; any variant means "not authenticated".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    /// Not a three-part JWT, or the parts are not valid base64/JSON
    #[error("Malformed token")]
    Malformed,

    /// `exp` claim is in the past
    #[error("Token expired")]
    Expired,

    /// Claims parsed but do not describe an identity (e.g. unknown role)
    #[error("Invalid token claims: {0}")]
    InvalidClaims(String),
}

/// Session and authentication errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Client-side Errors
    // ==================

    /// Form rejected before submission
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Server issued a token this client cannot read
    #[error("Server returned an unusable token: {0}")]
    InvalidSessionToken(DecodeFailure),

    // ==================
    // Request Errors
    // ==================

    /// Backend rejected the request or could not be reached
    #[error("{message}")]
    Request {
        message: String,
        status: Option<u16>,
    },

    // ==================
    // Storage Errors
    // ==================

    /// Durable session storage could not be read or written
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Session storage exists but its contents cannot be parsed
    #[error("Unreadable session storage: {0}")]
    CorruptSession(String),
}

impl AuthError {
    /// Build a request error, preferring the server's message over `fallback`
    pub fn from_api(err: &ApiError, fallback: &str) -> Self {
        AuthError::Request {
            message: err.message_or(fallback),
            status: err.status(),
        }
    }

    /// Stable code string used by the CLI error envelope
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "LEADHUB_VALIDATION_ERROR",
            AuthError::InvalidSessionToken(_) => "LEADHUB_INVALID_TOKEN",
            AuthError::Request { .. } => "LEADHUB_REQUEST_FAILED",
            AuthError::Storage(_) | AuthError::CorruptSession(_) => "LEADHUB_STORAGE_ERROR",
        }
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        AuthError::Validation(errors)
    }
}
