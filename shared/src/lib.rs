//! Shared types for the sorteo raffle service
//!
//! Common types used by the server (and any future client): domain models,
//! error types and the standard API response envelope.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::{BuyerInfo, InventoryStats, Ticket, TicketNumber, TicketStatus};
pub use response::ApiResponse;

/// Fixed size of the raffle: numbers 001 through 099.
pub const TICKET_COUNT: usize = 99;
