//! Fixed-point WAD (1e18) arithmetic operations
//!
//! Values are stored as u128 with WAD scaling. Products are formed in a
//! 256-bit intermediate so `a * b / c` only fails when the quotient itself
//! does not fit in u128. Every division truncates toward zero.

use alloy_primitives::U256;
use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::errors::LendingError;
use crate::constants::WAD;

/// Multiply then divide, rounding DOWN
/// Order: (a * b) / c
///
/// # Arguments
/// * `a` - First multiplicand
/// * `b` - Second multiplicand
/// * `c` - Divisor (must be non-zero)
pub fn mul_div_down(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(LendingError::DivisionByZero.into());
    }

    if a == 0 || b == 0 {
        return Ok(0);
    }

    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(LendingError::MathOverflow)?;
    let quotient = product / U256::from(c);

    u128::try_from(quotient).map_err(|_| LendingError::MathOverflow.into())
}

/// WAD multiplication (a * b / WAD), rounded down
#[inline]
pub fn wad_mul_down(a: u128, b: u128) -> Result<u128> {
    mul_div_down(a, b, WAD)
}

/// WAD division (a * WAD / b), rounded down
#[inline]
pub fn wad_div_down(a: u128, b: u128) -> Result<u128> {
    mul_div_down(a, WAD, b)
}

/// WAD value as a decimal, or None when it exceeds Decimal's 96-bit mantissa
pub fn wad_to_decimal(value: u128) -> Option<Decimal> {
    let mantissa = i128::try_from(value).ok()?;
    Decimal::try_from_i128_with_scale(mantissa, 18)
        .ok()
        .map(|d| d.normalize())
}

/// Human-readable WAD for program logs
pub fn display_wad(value: u128) -> String {
    match wad_to_decimal(value) {
        Some(d) => d.to_string(),
        None => format!("{}e-18", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mul_div_down() {
        // 100 * 200 / 300 = 66.666... → 66
        assert_eq!(mul_div_down(100, 200, 300).unwrap(), 66);

        // Edge cases
        assert_eq!(mul_div_down(0, 100, 50).unwrap(), 0);
        assert_eq!(mul_div_down(100, 0, 50).unwrap(), 0);
        assert!(mul_div_down(100, 200, 0).is_err());
    }

    #[test]
    fn test_wide_intermediate() {
        // 1e30 * 1e20 overflows u128 but the quotient fits
        let price = 10u128.pow(30);
        let amount = 10u128.pow(20);
        assert_eq!(wad_mul_down(price, amount).unwrap(), 10u128.pow(32));

        // Quotient itself out of range
        assert!(wad_mul_down(u128::MAX, 2 * WAD).is_err());
    }

    #[test]
    fn test_wad_mul() {
        let half_wad = WAD / 2;

        // 0.5 * 1.0 = 0.5
        assert_eq!(wad_mul_down(half_wad, WAD).unwrap(), half_wad);

        // 0.5 * 0.5 = 0.25
        assert_eq!(wad_mul_down(half_wad, half_wad).unwrap(), WAD / 4);
    }

    #[test]
    fn test_wad_div_truncates() {
        // 1 / 3 = 0.333...333 (18 digits, last digit floored)
        assert_eq!(wad_div_down(WAD, 3 * WAD).unwrap(), 333_333_333_333_333_333);
        assert!(wad_div_down(WAD, 0).is_err());
    }

    #[test]
    fn test_decimal_conversion() {
        assert_eq!(
            wad_to_decimal(291_600_000_000_000_000),
            Some(Decimal::from_str("0.2916").unwrap())
        );
        assert_eq!(wad_to_decimal(25 * WAD), Some(Decimal::from(25)));
        assert_eq!(wad_to_decimal(u128::MAX), None);

        assert_eq!(display_wad(364_500_000_000_000_000), "0.3645");
        assert_eq!(display_wad(u128::MAX), format!("{}e-18", u128::MAX));
        assert_eq!(display_wad(WAD * 6 / 5), "1.2");
    }
}
