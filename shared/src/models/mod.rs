//! Domain models for the sorteo raffle

mod buyer;
mod quote;
mod remote_config;
mod stats;
mod ticket;

pub use buyer::BuyerInfo;
pub use quote::{PricingBreakdown, PricingQuote};
pub use remote_config::RemoteConfig;
pub use stats::InventoryStats;
pub use ticket::{Ticket, TicketNumber, TicketStatus};
