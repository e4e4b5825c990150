//! HTTP status code mapping and axum response conversion

use super::codes::ErrorCode;
use super::types::AppError;
use crate::response::ApiResponse;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::TicketNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::TicketNotAvailable => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::AdminNotConfigured => StatusCode::FORBIDDEN,

            // 503 Service Unavailable (transient, client can retry)
            Self::NetworkError | Self::SheetError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();

        if status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        }

        let body = ApiResponse::<()>::from_error(&self);
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ErrorCode::TicketNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::TicketNotAvailable.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::SheetError.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
