//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted
//! to `f64` for storage/serialization.

use rust_decimal::prelude::*;

use crate::utils::{AppError, AppResult};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price per item
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round an f64 amount to 2 decimal places via Decimal
#[inline]
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// unit_price × quantity, Decimal-computed
pub fn line_total(unit_price: f64, quantity: i32) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Validate a unit price read from the catalog before using it
pub fn validate_unit_price(value: f64, context: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::Internal(format!(
            "{context}: price must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(AppError::Internal(format!(
            "{context}: price must be non-negative, got {value}"
        )));
    }
    if value > MAX_PRICE {
        return Err(AppError::Internal(format!(
            "{context}: price exceeds maximum allowed ({MAX_PRICE}), got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total_precision() {
        // 0.1 * 3 would be 0.30000000000000004 in plain f64
        assert_eq!(line_total(0.1, 3), 0.3);
        assert_eq!(line_total(9.99, 3), 29.97);
        assert_eq!(line_total(0.0, 5), 0.0);
    }

    #[test]
    fn test_round_money_half_up() {
        // .125 / .375 are exactly representable, so the midpoint rule is observable
        assert_eq!(round_money(1.125), 1.13);
        assert_eq!(round_money(1.375), 1.38);
        assert_eq!(round_money(1.004), 1.0);
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(12.5, "test").is_ok());
        assert!(validate_unit_price(0.0, "test").is_ok());
        assert!(validate_unit_price(-1.0, "test").is_err());
        assert!(validate_unit_price(f64::NAN, "test").is_err());
        assert!(validate_unit_price(f64::INFINITY, "test").is_err());
        assert!(validate_unit_price(MAX_PRICE * 2.0, "test").is_err());
    }
}
