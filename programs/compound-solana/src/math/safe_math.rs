//! Checked integer helpers mapped onto protocol errors
//!
//! Every ledger mutation goes through these so an out-of-range value aborts
//! the instruction instead of wrapping. Token transfer amounts must be
//! narrowed with `safe_u128_to_u64()`.

use anchor_lang::prelude::*;
use crate::errors::LendingError;
use crate::constants::MAX_U64;

/// Safely convert u128 to u64, erroring on overflow
///
/// Use this for ALL token transfer amounts
#[inline]
pub fn safe_u128_to_u64(value: u128) -> Result<u64> {
    if value > MAX_U64 {
        return Err(LendingError::AmountOverflow.into());
    }
    Ok(value as u64)
}

/// Checked addition with custom error
#[inline]
pub fn checked_add(a: u128, b: u128) -> Result<u128> {
    a.checked_add(b).ok_or_else(|| LendingError::MathOverflow.into())
}

/// Checked subtraction with custom error
#[inline]
pub fn checked_sub(a: u128, b: u128) -> Result<u128> {
    a.checked_sub(b).ok_or_else(|| LendingError::MathUnderflow.into())
}
