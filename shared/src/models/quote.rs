//! Pricing quote returned by the fee calculator

use serde::{Deserialize, Serialize};

/// Fee components used to build a quote, echoed back for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    /// Percentage fee in USD (converted base × fee rate)
    pub percentage_fee: f64,
    /// Fixed per-transaction fee in USD
    pub fixed_fee: f64,
    /// Córdobas per USD used for the conversion
    pub exchange_rate: f64,
}

/// A computed price quote
///
/// Derived on demand, never stored. `total_cordobas` is the ceiling of the
/// unrounded USD total converted back: the buyer never pays a fractional
/// córdoba and the service never absorbs rounding loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingQuote {
    /// Base amount in córdobas (ticket count × unit price)
    pub base_price: f64,
    /// Base amount converted to USD, 2 decimals
    pub base_price_usd: f64,
    /// Total processor fees in USD (percentage + fixed), 2 decimals
    pub paypal_fees: f64,
    /// Total to charge in USD, 2 decimals
    pub total_usd: f64,
    /// Total in córdobas, whole units (ceiling)
    pub total_cordobas: u64,
    pub breakdown: PricingBreakdown,
}
