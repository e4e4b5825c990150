//! API Response types
//!
//! Standardized API response structure for the whole service

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard API response code for success
pub const API_CODE_SUCCESS: &str = "E0000";

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "code": "E0000",
///     "message": "Success",
///     "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (E0000 = success, others = error codes)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            code: API_CODE_SUCCESS.to_string(),
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            code: API_CODE_SUCCESS.to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create an error response from an [`AppError`]
    pub fn from_error(err: &AppError) -> Self {
        Self {
            code: err.code.as_str(),
            message: err.message.clone(),
            data: None,
        }
    }

    /// Whether this response carries a success code
    pub fn is_success(&self) -> bool {
        self.code == API_CODE_SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_ok_envelope() {
        let resp = ApiResponse::ok(42);
        assert!(resp.is_success());
        assert_eq!(resp.data, Some(42));
    }

    #[test]
    fn test_error_envelope() {
        let err = AppError::new(ErrorCode::TicketNotAvailable);
        let resp = ApiResponse::<()>::from_error(&err);
        assert!(!resp.is_success());
        assert_eq!(resp.code, "E4002");
        assert!(resp.data.is_none());
    }
}
