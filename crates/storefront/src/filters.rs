//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a decimal amount as a price string, e.g. `$35.00`.
///
/// This is the only kind of place amounts are rounded to two decimals;
/// cart math accumulates in full precision. Midpoints round away from
/// zero (12.345 displays as $12.35), not banker's rounding.
#[must_use]
pub fn format_price(amount: &Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

/// Template filter wrapping [`format_price`].
///
/// Usage in templates: `{{ product.price|money }}`
#[askama::filter_fn]
pub fn money(amount: &Decimal, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_price(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price(&Decimal::new(3500, 2)), "$35.00");
        assert_eq!(format_price(&Decimal::new(10600, 2)), "$106.00");
        assert_eq!(format_price(&Decimal::from(20)), "$20.00");
    }

    #[test]
    fn test_format_price_rounds_midpoints_away_from_zero() {
        // 12.345 displays as 12.35 but stays 12.345 in the cart
        assert_eq!(format_price(&Decimal::new(12345, 3)), "$12.35");
        assert_eq!(format_price(&Decimal::new(12344, 3)), "$12.34");
        assert_eq!(format_price(&Decimal::new(12355, 3)), "$12.36");
    }
}
