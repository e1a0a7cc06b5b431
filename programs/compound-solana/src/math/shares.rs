//! Exchange-rate based share accounting
//!
//! A market's shares are claims on `total_cash + total_borrows`. With no
//! shares outstanding the market's initial exchange rate applies.
//!
//! ## Rounding Rules (Always favor protocol)
//!
//! | Operation | Convert          | Rounding | Reason                   |
//! |-----------|------------------|----------|--------------------------|
//! | Supply    | amount → shares  | DOWN     | User gets fewer shares   |
//! | Withdraw  | shares → amount  | DOWN     | User gets fewer tokens   |
//! | Seize     | value → shares   | DOWN     | Liquidator gets fewer    |

use anchor_lang::prelude::*;
use super::safe_math::checked_add;
use super::wad::{wad_mul_down, wad_div_down};

/// Current exchange rate (underlying per share, WAD-scaled)
///
/// Formula: (totalCash + totalBorrows) * WAD / totalShares
pub fn exchange_rate(
    total_cash: u128,
    total_borrows: u128,
    total_shares: u128,
    initial_exchange_rate: u128,
) -> Result<u128> {
    if total_shares == 0 {
        return Ok(initial_exchange_rate);
    }
    wad_div_down(checked_add(total_cash, total_borrows)?, total_shares)
}

/// Convert underlying to shares for SUPPLY operations
///
/// Rounding: DOWN
///
/// Formula: shares = amount * WAD / exchangeRate
#[inline]
pub fn to_shares_down(amount: u128, exchange_rate: u128) -> Result<u128> {
    wad_div_down(amount, exchange_rate)
}

/// Convert shares to underlying for WITHDRAW operations
///
/// Rounding: DOWN
///
/// Formula: amount = shares * exchangeRate / WAD
#[inline]
pub fn to_assets_down(shares: u128, exchange_rate: u128) -> Result<u128> {
    wad_mul_down(shares, exchange_rate)
}
