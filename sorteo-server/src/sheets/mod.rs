//! Remote tabular store (Google Sheets)
//!
//! The sheet is the authoritative record of sales. The server reads the
//! full `A:F` range to rebuild its local inventory and appends one row per
//! sold ticket. Everything else about the sheet (schema setup, manual
//! reconciliation) is out of band.

mod client;
mod rows;

pub use client::SheetsClient;
pub use rows::{SheetRow, parse_rows, sold_row};
