//! Supporting services: remote config bootstrap, CSV export, WhatsApp links.

pub mod config_provider;
pub mod export;
pub mod whatsapp;

pub use config_provider::fetch_remote_config;
pub use export::sold_tickets_csv;
pub use whatsapp::WhatsAppLink;
