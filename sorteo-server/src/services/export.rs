//! CSV export of sold tickets.

use shared::models::Ticket;

const HEADERS: &str = "Número,Comprador,Teléfono,Email,Fecha";

/// Render the sold-ticket list as a CSV document.
///
/// Fields containing commas, quotes or newlines are quoted with doubled
/// inner quotes. Timestamps are RFC 3339 so the export round-trips
/// through spreadsheet tools without locale guessing.
pub fn sold_tickets_csv(tickets: &[Ticket]) -> String {
    let mut out = String::from(HEADERS);
    out.push('\n');

    for ticket in tickets {
        let buyer = ticket.buyer.as_ref();
        let nombre = buyer.map(|b| b.nombre.as_str()).unwrap_or("");
        let telefono = buyer.map(|b| b.telefono.as_str()).unwrap_or("");
        let email = buyer.and_then(|b| b.email.as_deref()).unwrap_or("");
        let fecha = ticket
            .sold_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();

        let row = [
            ticket.number.to_string(),
            nombre.to_string(),
            telefono.to_string(),
            email.to_string(),
            fecha,
        ];
        let escaped: Vec<String> = row.iter().map(|f| escape_field(f)).collect();
        out.push_str(&escaped.join(","));
        out.push('\n');
    }

    out
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::{BuyerInfo, TicketNumber};

    fn sold(number: &str, nombre: &str, telefono: &str, email: &str) -> Ticket {
        let buyer = BuyerInfo::new(nombre, telefono).with_email(email);
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        Ticket::sold(TicketNumber::parse(number).unwrap(), buyer, Some(at))
    }

    #[test]
    fn test_headers_row() {
        let csv = sold_tickets_csv(&[]);
        assert_eq!(csv, "Número,Comprador,Teléfono,Email,Fecha\n");
    }

    #[test]
    fn test_rows_are_padded_and_ordered_as_given() {
        let csv = sold_tickets_csv(&[
            sold("007", "Ana", "88880000", "ana@email.com"),
            sold("042", "Luis", "77770000", ""),
        ]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "007,Ana,88880000,ana@email.com,2025-03-01T12:00:00+00:00"
        );
        assert!(lines[2].starts_with("042,Luis,77770000,,"));
    }

    #[test]
    fn test_comma_and_quote_escaping() {
        let csv = sold_tickets_csv(&[sold("001", "Pérez, Ana \"Anita\"", "88880000", "")]);
        assert!(csv.contains("\"Pérez, Ana \"\"Anita\"\"\""));
    }
}
