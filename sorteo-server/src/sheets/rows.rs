//! Sheet row parsing and formatting
//!
//! A data row is `[number, status, buyer, phone, email, timestamp]` with
//! trailing cells optional. The format is loose: the original sheet was
//! edited by hand as often as by code.

use chrono::{DateTime, Utc};
use shared::models::{BuyerInfo, TicketNumber, TicketStatus};

/// One parsed sale row from the remote sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub number: TicketNumber,
    pub status: TicketStatus,
    pub buyer: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

fn cell(row: &[String], idx: usize) -> Option<String> {
    row.get(idx)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse raw value rows into sale rows
///
/// Row 0 is assumed to be the header and skipped. Rows shorter than two
/// cells are skipped. Numbers that don't parse as `TicketNumber` are
/// ignored; unknown statuses fall back to available.
pub fn parse_rows(values: &[Vec<String>]) -> Vec<SheetRow> {
    values
        .iter()
        .skip(1)
        .filter(|row| row.len() >= 2)
        .filter_map(|row| {
            let number = TicketNumber::parse(row[0].trim())?;
            let status = TicketStatus::parse_lossy(row[1].trim());
            let timestamp = cell(row, 5).and_then(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok()
            });
            Some(SheetRow {
                number,
                status,
                buyer: cell(row, 2),
                phone: cell(row, 3),
                email: cell(row, 4),
                timestamp,
            })
        })
        .collect()
}

/// Format the append row for a completed sale
pub fn sold_row(number: TicketNumber, buyer: &BuyerInfo, sold_at: DateTime<Utc>) -> Vec<String> {
    vec![
        number.to_string(),
        "sold".to_string(),
        buyer.nombre.clone(),
        buyer.telefono.clone(),
        buyer.email_or_empty().to_string(),
        sold_at.to_rfc3339(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_header_is_skipped() {
        let values = raw(&[
            &["Número", "Estado", "Comprador", "Teléfono", "Email", "Fecha"],
            &["005", "sold", "Ana", "88880000", "", "2025-03-01T12:00:00+00:00"],
        ]);
        let rows = parse_rows(&values);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number.to_string(), "005");
        assert_eq!(rows[0].status, TicketStatus::Sold);
        assert_eq!(rows[0].buyer.as_deref(), Some("Ana"));
        assert!(rows[0].email.is_none());
        assert!(rows[0].timestamp.is_some());
    }

    #[test]
    fn test_short_rows_skipped() {
        let values = raw(&[&["header"], &["007"], &[], &["008", "sold"]]);
        let rows = parse_rows(&values);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number.to_string(), "008");
    }

    #[test]
    fn test_unknown_numbers_ignored() {
        let values = raw(&[
            &["header", ""],
            &["123", "sold"],
            &["abc", "sold"],
            &["000", "sold"],
            &["042", "sold"],
        ]);
        let rows = parse_rows(&values);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number.to_string(), "042");
    }

    #[test]
    fn test_unknown_status_falls_back_to_available() {
        let values = raw(&[&["header", ""], &["010", "pending"]]);
        let rows = parse_rows(&values);
        assert_eq!(rows[0].status, TicketStatus::Available);
    }

    #[test]
    fn test_bad_timestamp_dropped() {
        let values = raw(&[
            &["header", "", "", "", "", ""],
            &["010", "sold", "Ana", "88880000", "a@b.com", "yesterday"],
        ]);
        let rows = parse_rows(&values);
        assert!(rows[0].timestamp.is_none());
        assert_eq!(rows[0].email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_sold_row_format() {
        let n = TicketNumber::parse("005").unwrap();
        let buyer = BuyerInfo::new("Ana", "88880000").with_email("ana@email.com");
        let ts = DateTime::parse_from_rfc3339("2025-03-01T12:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        let row = sold_row(n, &buyer, ts);
        assert_eq!(row[0], "005");
        assert_eq!(row[1], "sold");
        assert_eq!(row[2], "Ana");
        assert_eq!(row[4], "ana@email.com");
        assert!(row[5].starts_with("2025-03-01T12:00:00"));
    }
}
