use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::AppError;
use crate::core::ServerState;
use shared::ApiResponse;
use shared::models::{InventoryStats, Ticket, TicketNumber, TicketStatus};

/// Public projection of a ticket: the grid only needs statuses.
/// Buyer details stay behind the admin endpoints.
#[derive(Debug, Serialize)]
pub struct TicketView {
    pub number: TicketNumber,
    pub status: TicketStatus,
}

impl From<Ticket> for TicketView {
    fn from(ticket: Ticket) -> Self {
        Self {
            number: ticket.number,
            status: ticket.status,
        }
    }
}

/// All 99 tickets, ordered by number
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<TicketView>>>, AppError> {
    // Opportunistic freshness: reads ride the cache, expired cache refetches
    if let Err(e) = state.inventory.sync_if_stale().await {
        tracing::warn!(error = %e, "Stale read served, sync failed");
    }
    let tickets = state
        .inventory
        .get_all()
        .await
        .into_iter()
        .map(TicketView::from)
        .collect();
    Ok(Json(ApiResponse::ok(tickets)))
}

/// One ticket by its padded number
pub async fn get_one(
    State(state): State<ServerState>,
    Path(number): Path<String>,
) -> Result<Json<ApiResponse<TicketView>>, AppError> {
    let parsed =
        TicketNumber::parse(&number).ok_or_else(|| AppError::ticket_not_found(number.clone()))?;
    let ticket = state
        .inventory
        .get(parsed)
        .await
        .ok_or_else(|| AppError::ticket_not_found(number))?;
    Ok(Json(ApiResponse::ok(TicketView::from(ticket))))
}

/// Sale statistics over the fixed total
pub async fn stats(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<InventoryStats>>, AppError> {
    if let Err(e) = state.inventory.sync_if_stale().await {
        tracing::warn!(error = %e, "Stale stats served, sync failed");
    }
    Ok(Json(ApiResponse::ok(state.inventory.stats().await)))
}
