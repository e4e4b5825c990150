//! Pricing
//!
//! Converts a base price in córdobas into the total a buyer pays through
//! the payment processor, fees included.

mod calculator;

pub use calculator::{PricingConfig, PricingService};
