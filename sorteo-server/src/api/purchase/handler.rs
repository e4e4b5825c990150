//! Purchase Handlers
//!
//! Both purchase paths end the same way: the numbers flip to sold and the
//! response carries a prefilled WhatsApp link for the buyer to confirm.
//! The PayPal path only differs in that payment already happened, so the
//! capture identifiers are recorded with the sale.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::core::ServerState;
use crate::utils::validation::{parse_numbers, validate_buyer};
use shared::ApiResponse;
use shared::models::{BuyerInfo, PricingQuote, TicketNumber};

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub numbers: Vec<String>,
    pub nombre: String,
    pub telefono: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub sold: Vec<TicketNumber>,
    /// Total owed in córdobas at the base ticket price
    pub total_cordobas: f64,
    /// Prefilled confirmation link
    pub whatsapp_url: String,
}

/// Mirrors the fields PayPal's capture result exposes for the payer.
/// Surname and phone are optional there; a missing phone is recorded
/// as "No proporcionado" so the sale row is never blank.
#[derive(Debug, Deserialize)]
pub struct PayPalPurchaseRequest {
    pub numbers: Vec<String>,
    pub nombre: String,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub paypal_order_id: String,
    pub paypal_payer_id: String,
}

#[derive(Debug, Serialize)]
pub struct PayPalPurchaseResponse {
    pub sold: Vec<TicketNumber>,
    /// The fee-inclusive quote the payment should have matched
    pub quote: PricingQuote,
    pub whatsapp_url: String,
}

/// Manual purchase: mark numbers sold, payment settled over WhatsApp
pub async fn purchase(
    State(state): State<ServerState>,
    Json(req): Json<PurchaseRequest>,
) -> Result<Json<ApiResponse<PurchaseResponse>>, AppError> {
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

    let total_cordobas = sold.len() as f64 * state.pricing.unit_price();
    let whatsapp_url = state.whatsapp.manual_purchase(&sold, &buyer, total_cordobas);

    Ok(Json(ApiResponse::ok(PurchaseResponse {
        sold,
        total_cordobas,
        whatsapp_url,
    })))
}

/// PayPal purchase: record a completed capture
///
/// The client sends the order and payer ids PayPal returned. An empty id
/// means the capture never completed and the sale is rejected.
pub async fn purchase_paypal(
    State(state): State<ServerState>,
    Json(req): Json<PayPalPurchaseRequest>,
) -> Result<Json<ApiResponse<PayPalPurchaseResponse>>, AppError> {
    let nombre = match req.apellido.as_deref().map(str::trim) {
        Some(apellido) if !apellido.is_empty() => format!("{} {}", req.nombre.trim(), apellido),
        _ => req.nombre.trim().to_string(),
    };
    let telefono = req
        .telefono
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "No proporcionado".to_string());
    validate_buyer(&nombre, &telefono)?;
    if req.paypal_order_id.trim().is_empty() || req.paypal_payer_id.trim().is_empty() {
        return Err(AppError::new(shared::ErrorCode::PaymentIncomplete));
    }
    let numbers = parse_numbers(&req.numbers)?;

    let mut buyer = BuyerInfo::new(&nombre, &telefono);
    if let Some(email) = &req.email {
        buyer = buyer.with_email(email);
    }
    buyer.paypal_order_id = Some(req.paypal_order_id);
    buyer.paypal_payer_id = Some(req.paypal_payer_id);

    let sold = state.inventory.sell(&numbers, &buyer).await;
    if sold.is_empty() {
        return Err(AppError::with_message(
            shared::ErrorCode::TicketNotAvailable,
            "All requested numbers are already sold",
        ));
    }

    let quote = state.pricing.quote_for_count(sold.len());
    let whatsapp_url = state.whatsapp.paypal_purchase(&sold, &buyer, &quote);

    Ok(Json(ApiResponse::ok(PayPalPurchaseResponse {
        sold,
        quote,
        whatsapp_url,
    })))
}
