//! Error types and result alias

use super::codes::ErrorCode;
use http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type for the service:
/// - standardized codes via [`ErrorCode`]
/// - human-readable messages
/// - optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a ticket-not-found error for an invalid or out-of-range number
    pub fn ticket_not_found(number: impl Into<String>) -> Self {
        let n = number.into();
        Self::with_message(ErrorCode::TicketNotFound, format!("Ticket {} not found", n))
            .with_detail("number", n)
    }

    /// Create a ticket-not-available error
    pub fn ticket_not_available(number: impl Into<String>) -> Self {
        let n = number.into();
        Self::with_message(
            ErrorCode::TicketNotAvailable,
            format!("Ticket {} is not available", n),
        )
        .with_detail("number", n)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a remote sheet store error
    pub fn sheet(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::SheetError, msg)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NetworkError, msg)
    }

    /// Create a not authenticated error
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create an invalid token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Create a token expired error
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::with_message(ErrorCode::InvalidFormat, err.to_string())
    }
}

/// Result type alias using [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message_from_code() {
        let err = AppError::new(ErrorCode::TicketNotAvailable);
        assert_eq!(err.message, "Ticket is not available");
        assert_eq!(err.code, ErrorCode::TicketNotAvailable);
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::validation("missing fields")
            .with_detail("field", "nombre")
            .with_detail("reason", "empty");
        let details = err.details.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details["field"], "nombre");
    }

    #[test]
    fn test_ticket_not_found_carries_number() {
        let err = AppError::ticket_not_found("123");
        assert_eq!(err.code, ErrorCode::TicketNotFound);
        assert_eq!(err.details.unwrap()["number"], "123");
    }
}
