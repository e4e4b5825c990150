//! Unified error codes for the sorteo service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Ticket errors
//! - 5xxx: Payment/pricing errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (admin password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Admin login is not configured
    AdminNotConfigured = 1006,

    // ==================== 4xxx: Ticket ====================
    /// Ticket number not found (out of range or malformed)
    TicketNotFound = 4001,
    /// Ticket is not available for the requested transition
    TicketNotAvailable = 4002,
    /// No tickets were selected
    NoTicketsSelected = 4003,
    /// Nothing to export
    NothingToExport = 4005,

    // ==================== 5xxx: Payment/Pricing ====================
    /// Payment capture payload is incomplete
    PaymentIncomplete = 5001,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Remote sheet store error
    SheetError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Network error (transient)
    NetworkError = 9004,
    /// Remote sync is not configured
    SyncNotConfigured = 9005,
}

impl ErrorCode {
    /// Get the default English message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid credentials",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Token is invalid",
            Self::AdminNotConfigured => "Admin login is not configured",

            Self::TicketNotFound => "Ticket number not found",
            Self::TicketNotAvailable => "Ticket is not available",
            Self::NoTicketsSelected => "No tickets selected",
            Self::NothingToExport => "No sold tickets to export",

            Self::PaymentIncomplete => "Payment capture payload is incomplete",

            Self::InternalError => "Internal server error",
            Self::SheetError => "Remote sheet store error",
            Self::ConfigError => "Configuration error",
            Self::NetworkError => "Network error",
            Self::SyncNotConfigured => "Remote sync is not configured",
        }
    }

    /// Numeric code as a display string, e.g. `E4002`
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1006 => Self::AdminNotConfigured,

            4001 => Self::TicketNotFound,
            4002 => Self::TicketNotAvailable,
            4003 => Self::NoTicketsSelected,
            4005 => Self::NothingToExport,

            5001 => Self::PaymentIncomplete,

            9001 => Self::InternalError,
            9002 => Self::SheetError,
            9003 => Self::ConfigError,
            9004 => Self::NetworkError,
            9005 => Self::SyncNotConfigured,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::TicketNotAvailable,
            ErrorCode::InvalidCredentials,
            ErrorCode::SheetError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw).unwrap(), code);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(777), Err(InvalidErrorCode(777)));
    }

    #[test]
    fn test_unassigned_values_rejected() {
        // Values no condition maps to must not deserialize
        for raw in [8u16, 1005, 4004, 5002] {
            assert!(ErrorCode::try_from(raw).is_err(), "value {raw}");
        }
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::TicketNotFound.to_string(), "E4001");
        assert_eq!(ErrorCode::Success.to_string(), "E0000");
    }
}
