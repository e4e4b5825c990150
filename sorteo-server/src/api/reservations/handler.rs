use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::core::ServerState;
use crate::utils::validation::parse_numbers;
use shared::ApiResponse;
use shared::models::TicketNumber;

#[derive(Debug, Deserialize)]
pub struct ReservationRequest {
    pub numbers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    /// The subset that was actually reserved
    pub reserved: Vec<TicketNumber>,
    /// When the reservation falls back to available
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ReleaseResponse {
    pub released: Vec<TicketNumber>,
}

/// Reserve a batch of numbers for the configured window
///
/// Numbers that are no longer available are skipped; the response tells
/// the client which ones it actually holds. A batch where nothing could
/// be reserved is a conflict.
pub async fn reserve(
    State(state): State<ServerState>,
    Json(req): Json<ReservationRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let numbers = parse_numbers(&req.numbers)?;

    let duration = state.config.reservation_duration();
    let reserved = state.inventory.reserve(&numbers, duration).await;
    if reserved.is_empty() {
        return Err(AppError::with_message(
            shared::ErrorCode::TicketNotAvailable,
            "None of the requested numbers are available",
        ));
    }

    let expires_at = Utc::now()
        + chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero());
    Ok(Json(ApiResponse::ok(ReservationResponse {
        reserved,
        expires_at,
    })))
}

/// Release a batch of reserved numbers early
///
/// Only tickets still in the reserved state are touched.
pub async fn release(
    State(state): State<ServerState>,
    Json(req): Json<ReservationRequest>,
) -> Result<Json<ApiResponse<ReleaseResponse>>, AppError> {
    let numbers = parse_numbers(&req.numbers)?;
    let released = state.inventory.release_reserved(&numbers).await;
    Ok(Json(ApiResponse::ok(ReleaseResponse { released })))
}
