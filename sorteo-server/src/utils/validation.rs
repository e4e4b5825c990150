//! Request payload validation helpers.

use shared::error::ErrorCode;
use shared::models::TicketNumber;
use shared::{AppError, AppResult};

/// Parse a list of ticket-number strings, rejecting empty input and any
/// malformed entry. Duplicates are collapsed, order preserved.
pub fn parse_numbers(raw: &[String]) -> AppResult<Vec<TicketNumber>> {
    if raw.is_empty() {
        return Err(AppError::new(ErrorCode::NoTicketsSelected));
    }

    let mut numbers = Vec::with_capacity(raw.len());
    for entry in raw {
        let number = TicketNumber::parse(entry).ok_or_else(|| {
            AppError::validation(format!("Invalid ticket number: {}", entry))
                .with_detail("number", entry.as_str())
        })?;
        if !numbers.contains(&number) {
            numbers.push(number);
        }
    }
    Ok(numbers)
}

/// Require the buyer fields a sale cannot go through without
pub fn validate_buyer(nombre: &str, telefono: &str) -> AppResult<()> {
    if nombre.trim().is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField).with_detail("field", "nombre"));
    }
    if telefono.trim().is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField).with_detail("field", "telefono"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_numbers_ok() {
        let parsed = parse_numbers(&strings(&["001", "042", "099"])).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[1].value(), 42);
    }

    #[test]
    fn test_parse_numbers_dedupes_preserving_order() {
        let parsed = parse_numbers(&strings(&["005", "003", "005"])).unwrap();
        let values: Vec<u8> = parsed.iter().map(|n| n.value()).collect();
        assert_eq!(values, vec![5, 3]);
    }

    #[test]
    fn test_parse_numbers_rejects_empty_and_malformed() {
        assert_eq!(
            parse_numbers(&[]).unwrap_err().code,
            ErrorCode::NoTicketsSelected
        );
        for bad in ["0", "100", "1", "01", "abc", "0x5", ""] {
            let err = parse_numbers(&strings(&[bad])).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationFailed, "input {:?}", bad);
        }
    }

    #[test]
    fn test_validate_buyer() {
        assert!(validate_buyer("Ana", "88880000").is_ok());
        assert_eq!(
            validate_buyer("", "88880000").unwrap_err().code,
            ErrorCode::RequiredField
        );
        assert_eq!(
            validate_buyer("Ana", "   ").unwrap_err().code,
            ErrorCode::RequiredField
        );
    }
}
