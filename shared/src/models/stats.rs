//! Inventory statistics

use serde::{Deserialize, Serialize};

/// Counts over the fixed 99-ticket inventory
///
/// `available + reserved + sold == total == 99` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total: usize,
    pub available: usize,
    pub reserved: usize,
    pub sold: usize,
    /// Sold percentage over the fixed total, rounded to the nearest integer
    pub percentage: u8,
}

impl InventoryStats {
    pub fn new(available: usize, reserved: usize, sold: usize) -> Self {
        let total = available + reserved + sold;
        let percentage = if total == 0 {
            0
        } else {
            ((sold as f64 / total as f64) * 100.0).round() as u8
        };
        Self {
            total,
            available,
            reserved,
            sold,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_total() {
        let s = InventoryStats::new(60, 9, 30);
        assert_eq!(s.total, 99);
        assert_eq!(s.available + s.reserved + s.sold, s.total);
        assert_eq!(s.percentage, 30);
    }

    #[test]
    fn test_percentage_rounds() {
        // 50 of 99 = 50.5% -> 51
        let s = InventoryStats::new(49, 0, 50);
        assert_eq!(s.percentage, 51);
        // fresh inventory
        let s = InventoryStats::new(99, 0, 0);
        assert_eq!(s.percentage, 0);
    }
}
