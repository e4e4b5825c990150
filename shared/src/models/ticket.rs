//! Ticket model
//!
//! A raffle ticket is identified by a zero-padded 3-digit number in
//! 001..=099. The inventory always holds exactly one entry per number;
//! entries are mutated in place, never added or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::buyer::BuyerInfo;

/// Validated raffle ticket number (001..=099)
///
/// Stored as the raw value, displayed and serialized as the zero-padded
/// 3-digit string the sheet and the UI use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TicketNumber(u8);

impl TicketNumber {
    /// Lowest valid raw value
    pub const MIN: u8 = 1;
    /// Highest valid raw value
    pub const MAX: u8 = 99;

    /// Parse from the wire format: exactly three digits, value 1..=99
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: u8 = s.parse().ok()?;
        Self::from_value(value)
    }

    /// Build from a raw value, rejecting out-of-range input
    pub fn from_value(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Raw numeric value (1..=99)
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Iterate every valid ticket number in order (001..=099)
    pub fn all() -> impl Iterator<Item = TicketNumber> {
        (Self::MIN..=Self::MAX).map(TicketNumber)
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl FromStr for TicketNumber {
    type Err = InvalidTicketNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidTicketNumber(s.to_string()))
    }
}

/// Error for a malformed or out-of-range ticket number
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ticket number: {0}")]
pub struct InvalidTicketNumber(pub String);

impl Serialize for TicketNumber {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TicketNumber {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sale state of a single ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    #[default]
    Available,
    Reserved,
    Sold,
}

impl TicketStatus {
    /// Parse the status cell of a sheet row. Unknown or empty strings fall
    /// back to `Available`, matching the remote store's loose format.
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "sold" => Self::Sold,
            "reserved" => Self::Reserved,
            _ => Self::Available,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Sold => "sold",
        }
    }
}

/// One raffle ticket
///
/// Invariants:
/// - `buyer` and `sold_at` are populated iff `status == Sold`
/// - `reserved_until` is populated iff `status == Reserved`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub number: TicketNumber,
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<BuyerInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_until: Option<DateTime<Utc>>,
}

impl Ticket {
    /// A fresh, available ticket with all fields cleared
    pub fn fresh(number: TicketNumber) -> Self {
        Self {
            number,
            status: TicketStatus::Available,
            buyer: None,
            sold_at: None,
            reserved_until: None,
        }
    }

    /// A sold ticket rebuilt from remote data
    pub fn sold(number: TicketNumber, buyer: BuyerInfo, sold_at: Option<DateTime<Utc>>) -> Self {
        Self {
            number,
            status: TicketStatus::Sold,
            buyer: Some(buyer),
            sold_at,
            reserved_until: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == TicketStatus::Available
    }

    pub fn is_reserved(&self) -> bool {
        self.status == TicketStatus::Reserved
    }

    pub fn is_sold(&self) -> bool {
        self.status == TicketStatus::Sold
    }

    /// Check the status/field coupling invariant
    pub fn invariant_holds(&self) -> bool {
        match self.status {
            TicketStatus::Sold => self.buyer.is_some() && self.reserved_until.is_none(),
            TicketStatus::Reserved => {
                self.buyer.is_none() && self.sold_at.is_none() && self.reserved_until.is_some()
            }
            TicketStatus::Available => {
                self.buyer.is_none() && self.sold_at.is_none() && self.reserved_until.is_none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert_eq!(TicketNumber::parse("001").unwrap().value(), 1);
        assert_eq!(TicketNumber::parse("099").unwrap().value(), 99);
        assert_eq!(TicketNumber::parse("042").unwrap().to_string(), "042");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for s in ["000", "100", "1", "01", "0001", "abc", "0a1", " 05", ""] {
            assert!(TicketNumber::parse(s).is_none(), "accepted {:?}", s);
        }
    }

    #[test]
    fn test_all_yields_99_ordered() {
        let all: Vec<_> = TicketNumber::all().collect();
        assert_eq!(all.len(), 99);
        assert_eq!(all.first().unwrap().to_string(), "001");
        assert_eq!(all.last().unwrap().to_string(), "099");
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_serde_as_padded_string() {
        let n = TicketNumber::parse("005").unwrap();
        assert_eq!(serde_json::to_string(&n).unwrap(), "\"005\"");
        let back: TicketNumber = serde_json::from_str("\"005\"").unwrap();
        assert_eq!(back, n);
        assert!(serde_json::from_str::<TicketNumber>("\"5\"").is_err());
    }

    #[test]
    fn test_status_parse_lossy() {
        assert_eq!(TicketStatus::parse_lossy("sold"), TicketStatus::Sold);
        assert_eq!(TicketStatus::parse_lossy("reserved"), TicketStatus::Reserved);
        assert_eq!(TicketStatus::parse_lossy("available"), TicketStatus::Available);
        assert_eq!(TicketStatus::parse_lossy("weird"), TicketStatus::Available);
        assert_eq!(TicketStatus::parse_lossy(""), TicketStatus::Available);
    }

    #[test]
    fn test_fresh_ticket_invariant() {
        let t = Ticket::fresh(TicketNumber::parse("007").unwrap());
        assert!(t.is_available());
        assert!(t.invariant_holds());
    }
}
