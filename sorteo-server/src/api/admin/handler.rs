//! Admin Handlers
//!
//! These operate on the same inventory paths the public API uses; the
//! only admin-exclusive transition is the forced release, which can pull
//! a sold ticket back to available.

use axum::response::IntoResponse;
use axum::{
    Json,
    extract::{Path, State},
};
use http::header;
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::core::ServerState;
use crate::services::export::sold_tickets_csv;
use crate::utils::validation::{parse_numbers, validate_buyer};
use shared::ApiResponse;
use shared::models::{BuyerInfo, Ticket, TicketNumber};

/// The confirmation phrase a reset request must carry
const RESET_CONFIRMATION: &str = "RESET";

#[derive(Debug, Deserialize)]
pub struct RecordSaleRequest {
    pub numbers: Vec<String>,
    pub nombre: String,
    pub telefono: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordSaleResponse {
    pub sold: Vec<TicketNumber>,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub confirm: String,
}

#[derive(Debug, Serialize)]
pub struct ClearReservationsResponse {
    pub cleared: usize,
}

/// Record a sale settled outside the site (cash, transfer)
pub async fn record_sale(
    State(state): State<ServerState>,
    Json(req): Json<RecordSaleRequest>,
) -> Result<Json<ApiResponse<RecordSaleResponse>>, AppError> {
    validate_buyer(&req.nombre, &req.telefono)?;
    let numbers = parse_numbers(&req.numbers)?;

    let mut buyer = BuyerInfo::new(&req.nombre, &req.telefono);
    if let Some(email) = &req.email {
        buyer = buyer.with_email(email);
    }

    let sold = state.inventory.sell(&numbers, &buyer).await;
    if sold.is_empty() {
        return Err(AppError::with_message(
            shared::ErrorCode::TicketNotAvailable,
            "All requested numbers are already sold",
        ));
    }

    tracing::info!(count = sold.len(), "Admin recorded sale");
    Ok(Json(ApiResponse::ok(RecordSaleResponse { sold })))
}

/// Force a number back to available, whatever its state
pub async fn release(
    State(state): State<ServerState>,
    Path(number): Path<String>,
) -> Result<Json<ApiResponse<Ticket>>, AppError> {
    let parsed =
        TicketNumber::parse(&number).ok_or_else(|| AppError::ticket_not_found(number))?;
    let ticket = state.inventory.release(parsed).await;
    Ok(Json(ApiResponse::ok(ticket)))
}

/// Drop every active reservation
pub async fn clear_reservations(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<ClearReservationsResponse>>, AppError> {
    let cleared = state.inventory.clear_reservations().await;
    tracing::info!(cleared, "Admin cleared reservations");
    Ok(Json(ApiResponse::ok(ClearReservationsResponse { cleared })))
}

/// Reset the whole inventory to 99 available tickets
///
/// Destructive, so the request body must spell out the confirmation
/// phrase. The remote sheet is NOT touched; a refresh afterwards will
/// bring the sold rows back unless the sheet itself is cleared.
pub async fn reset(
    State(state): State<ServerState>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if req.confirm != RESET_CONFIRMATION {
        return Err(AppError::invalid_request(format!(
            "Reset requires confirm: \"{}\"",
            RESET_CONFIRMATION
        )));
    }
    state.inventory.reset().await;
    tracing::warn!("Admin reset the inventory");
    Ok(Json(ApiResponse::ok(())))
}

/// Force a remote re-fetch, bypassing the read cache
pub async fn refresh(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.inventory.refresh().await?;
    Ok(Json(ApiResponse::ok(())))
}

/// Sold tickets as a CSV attachment
pub async fn export_csv(
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, AppError> {
    let sold = state.inventory.sold_tickets().await;
    if sold.is_empty() {
        return Err(AppError::new(shared::ErrorCode::NothingToExport));
    }

    let csv = sold_tickets_csv(&sold);
    let disposition = format!(
        "attachment; filename=\"sorteo-{}.csv\"",
        chrono::Utc::now().format("%Y-%m-%d")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// Sold tickets with buyer details
pub async fn sold(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<Ticket>>>, AppError> {
    Ok(Json(ApiResponse::ok(state.inventory.sold_tickets().await)))
}
