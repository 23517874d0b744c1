//! Zero-guarded decimal arithmetic.
//!
//! Every ratio in the pricing path goes through [`safe_div`], which defines
//! `x / 0 = 0` instead of panicking.

use bigdecimal::BigDecimal;
use num_traits::Zero;
use std::str::FromStr;

use crate::error::PricingError;

/// Divide two decimals, returning zero when the denominator is zero.
#[inline]
pub fn safe_div(numerator: &BigDecimal, denominator: &BigDecimal) -> BigDecimal {
    if denominator.is_zero() {
        BigDecimal::zero()
    } else {
        numerator / denominator
    }
}

/// Parse a non-negative decimal from its string form.
///
/// `field` names the value in the returned error.
pub fn parse_decimal(field: &'static str, value: &str) -> Result<BigDecimal, PricingError> {
    let parsed = BigDecimal::from_str(value.trim()).map_err(|_| PricingError::InvalidDecimal {
        field,
        value: value.to_string(),
    })?;

    if parsed < BigDecimal::zero() {
        return Err(PricingError::InvalidDecimal {
            field,
            value: value.to_string(),
        });
    }

    Ok(parsed)
}
