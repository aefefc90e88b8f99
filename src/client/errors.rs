//! # API Errors
//!
//! Failures talking to the backend.

use thiserror::Error;

/// Result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Backend call errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Request never produced a response (DNS, connect, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("HTTP {status}{}", message_suffix(.message))]
    Status {
        status: u16,
        /// `message` field of the error body, when the server sent one
        message: Option<String>,
    },

    /// Success response whose body did not match the expected shape
    #[error("Unexpected response body: {0}")]
    InvalidBody(String),

    /// Base URL or path could not be joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(": {}", m),
        _ => String::new(),
    }
}

impl ApiError {
    /// Server-supplied message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// The server's message, or `fallback` when it sent none
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::InvalidBody(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}
