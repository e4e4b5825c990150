//! Fee Calculator
//!
//! Computes the processor markup for a córdoba base amount.
//! Uses rust_decimal for precise calculations, exposes f64.
//!
//! The exchange rate and fee rates are configuration constants, not fetched
//! live, so totals are an approximation of real processor billing.

use rust_decimal::prelude::*;
use shared::models::{PricingBreakdown, PricingQuote};

/// Rounding for displayed monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for display, rounded to 2 decimal places
#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Fee model constants
#[derive(Debug, Clone, Copy)]
pub struct PricingConfig {
    /// Price of one ticket in córdobas
    pub unit_price_cordobas: f64,
    /// Percentage fee rate (e.g. 0.045 = 4.5%)
    pub fee_rate: f64,
    /// Fixed per-transaction fee in USD
    pub fixed_fee_usd: f64,
    /// Córdobas per USD
    pub exchange_rate: f64,
}

/// Quote calculator over a fixed fee model
///
/// Pure: same input always yields the same quote.
#[derive(Debug, Clone, Copy)]
pub struct PricingService {
    config: PricingConfig,
}

impl PricingService {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn unit_price(&self) -> f64 {
        self.config.unit_price_cordobas
    }

    /// Quote for `count` tickets at the configured unit price
    pub fn quote_for_count(&self, count: usize) -> PricingQuote {
        self.quote(count as f64 * self.config.unit_price_cordobas)
    }

    /// Quote for an arbitrary base amount in córdobas
    ///
    /// 1. convert to USD at the fixed exchange rate
    /// 2. percentage fee = converted × fee rate
    /// 3. add the fixed per-transaction fee
    /// 4. córdoba total = ceiling of the unrounded USD total converted back
    ///
    /// The ceiling means the buyer never pays a fractional córdoba and the
    /// service never absorbs rounding loss.
    pub fn quote(&self, base_cordobas: f64) -> PricingQuote {
        let base = to_decimal(base_cordobas);
        let rate = to_decimal(self.config.exchange_rate);
        let fee_rate = to_decimal(self.config.fee_rate);
        let fixed_fee = to_decimal(self.config.fixed_fee_usd);

        let base_usd = base / rate;
        let percentage_fee = base_usd * fee_rate;
        let total_usd = base_usd + percentage_fee + fixed_fee;

        // Ceiling on the unrounded total, not the 2-decimal display value
        let total_cordobas = (total_usd * rate).ceil().to_u64().unwrap_or_default();

        PricingQuote {
            base_price: base_cordobas,
            base_price_usd: to_f64(base_usd),
            paypal_fees: to_f64(percentage_fee + fixed_fee),
            total_usd: to_f64(total_usd),
            total_cordobas,
            breakdown: PricingBreakdown {
                percentage_fee: to_f64(percentage_fee),
                fixed_fee: self.config.fixed_fee_usd,
                exchange_rate: self.config.exchange_rate,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PricingService {
        PricingService::new(PricingConfig {
            unit_price_cordobas: 70.0,
            fee_rate: 0.045,
            fixed_fee_usd: 0.30,
            exchange_rate: 36.5,
        })
    }

    #[test]
    fn test_single_ticket_quote() {
        // 70 C$ / 36.5 = 1.9178 USD
        // fee = 1.9178 * 0.045 = 0.0863
        // total = 1.9178 + 0.0863 + 0.30 = 2.3041 USD
        // cordobas = ceil(2.3041 * 36.5) = ceil(84.1) = 85
        let q = service().quote(70.0);

        assert_eq!(q.base_price, 70.0);
        assert_eq!(q.base_price_usd, 1.92);
        assert_eq!(q.breakdown.percentage_fee, 0.09);
        assert_eq!(q.paypal_fees, 0.39);
        assert_eq!(q.total_usd, 2.30);
        assert_eq!(q.total_cordobas, 85);
    }

    #[test]
    fn test_quote_for_count_scales_base() {
        let q = service().quote_for_count(3);
        assert_eq!(q.base_price, 210.0);
        // 210 / 36.5 = 5.7534; *1.045 = 6.0123; +0.30 = 6.3123
        assert_eq!(q.total_usd, 6.31);
        // ceil(6.31232876... * 36.5) = ceil(230.4) = 231
        assert_eq!(q.total_cordobas, 231);
    }

    #[test]
    fn test_ceiling_never_undercharges() {
        let svc = service();
        for count in 1..=20 {
            let q = svc.quote_for_count(count);
            let unrounded_usd = q.base_price / 36.5 * 1.045 + 0.30;
            assert!(
                q.total_cordobas as f64 >= unrounded_usd * 36.5 - 1e-9,
                "count {count} undercharges"
            );
        }
    }

    #[test]
    fn test_fixed_fee_dominates_zero_base() {
        // Degenerate but well-defined: only the fixed fee remains
        let q = service().quote(0.0);
        assert_eq!(q.base_price_usd, 0.0);
        assert_eq!(q.total_usd, 0.30);
        assert_eq!(q.total_cordobas, 11); // ceil(0.30 * 36.5) = ceil(10.95)
    }

    #[test]
    fn test_breakdown_echoes_constants() {
        let q = service().quote(70.0);
        assert_eq!(q.breakdown.fixed_fee, 0.30);
        assert_eq!(q.breakdown.exchange_rate, 36.5);
    }
}
