//! CLI-specific error types
//!
//! Every failure reaching the CLI is reported as a code plus a message.

use std::fmt;
use std::io;

use crate::auth::{AuthError, Route};
use crate::client::ApiError;
use crate::config::ConfigError;
use crate::leads::LeadError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or environment error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// The guard sent the command elsewhere
    Redirected,
    /// Unknown route path
    UnknownRoute,
    /// User declined a confirmation prompt
    Cancelled,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "LEADHUB_CLI_CONFIG_ERROR",
            Self::IoError => "LEADHUB_CLI_IO_ERROR",
            Self::Redirected => "LEADHUB_CLI_REDIRECTED",
            Self::UnknownRoute => "LEADHUB_CLI_UNKNOWN_ROUTE",
            Self::Cancelled => "LEADHUB_CLI_CANCELLED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: &'static str,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
        }
    }

    fn from_code(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// The guard redirected the command to `route`
    pub fn redirected(route: Route) -> Self {
        let message = match route {
            Route::Login => "Not logged in. Run 'leadhub login' first.".to_string(),
            other => format!("Not permitted here; redirected to {}", other),
        };
        Self::new(CliErrorCode::Redirected, message)
    }

    pub fn unknown_route(path: &str) -> Self {
        Self::new(CliErrorCode::UnknownRoute, format!("Unknown route: {}", path))
    }

    pub fn cancelled() -> Self {
        Self::new(CliErrorCode::Cancelled, "Cancelled")
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<AuthError> for CliError {
    fn from(e: AuthError) -> Self {
        Self::from_code(e.code(), e.to_string())
    }
}

impl From<LeadError> for CliError {
    fn from(e: LeadError) -> Self {
        Self::from_code(e.code(), e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrors;

    #[test]
    fn test_domain_codes_preserved() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "Enter a valid email");
        let err = CliError::from(AuthError::Validation(errors));
        assert_eq!(err.code_str(), "LEADHUB_VALIDATION_ERROR");
        assert_eq!(err.message(), "email: Enter a valid email");

        let err = CliError::from(LeadError::AuthenticationRequired);
        assert_eq!(err.code_str(), "LEADHUB_AUTH_REQUIRED");
    }

    #[test]
    fn test_redirect_messages() {
        let err = CliError::redirected(Route::Login);
        assert_eq!(err.code_str(), "LEADHUB_CLI_REDIRECTED");
        assert!(err.message().contains("leadhub login"));

        let err = CliError::redirected(Route::Dashboard);
        assert_eq!(err.message(), "Not permitted here; redirected to /dashboard");
    }
}
