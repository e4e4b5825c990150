use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::AppError;
use crate::core::ServerState;
use shared::ApiResponse;
use shared::models::PricingQuote;

#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    /// Number of tickets to quote for
    #[serde(default)]
    pub count: Option<usize>,
    /// Arbitrary base amount in córdobas, alternative to `count`
    #[serde(default)]
    pub base: Option<f64>,
}

/// Quote the PayPal charge for a ticket count or a raw base amount
///
/// The fee is passed on to the buyer: the quote grosses up the base
/// price so the seller nets the full ticket value.
pub async fn quote(
    State(state): State<ServerState>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<ApiResponse<PricingQuote>>, AppError> {
    let quote = match (params.count, params.base) {
        (Some(count), _) => {
            if count == 0 || count > shared::TICKET_COUNT {
                return Err(AppError::invalid_request(format!(
                    "count must be between 1 and {}",
                    shared::TICKET_COUNT
                )));
            }
            state.pricing.quote_for_count(count)
        }
        (None, Some(base)) => {
            if !base.is_finite() || base <= 0.0 {
                return Err(AppError::invalid_request("base must be a positive amount"));
            }
            state.pricing.quote(base)
        }
        (None, None) => {
            return Err(AppError::invalid_request("count or base is required"));
        }
    };
    Ok(Json(ApiResponse::ok(quote)))
}
