//! Liquidation math
//!
//! seize = floor(repay * floor(floor(incentive * price_debt) * WAD
//!                             / floor(price_collateral * er_collateral)) / WAD)

use anchor_lang::prelude::*;
use crate::errors::LendingError;
use crate::math::{checked_sub, wad_mul_down, wad_div_down};
use crate::state::SeizeSplit;

/// Largest repayment allowed in a single liquidation
pub fn max_repay(borrow_principal: u128, close_factor: u128) -> Result<u128> {
    wad_mul_down(close_factor, borrow_principal)
}

/// Collateral shares seized for repaying `repay_amount` of debt
pub fn calculate_seize_shares(
    repay_amount: u128,
    price_borrowed: u128,
    price_collateral: u128,
    exchange_rate_collateral: u128,
    liquidation_incentive: u128,
) -> Result<u128> {
    require!(
        price_borrowed > 0 && price_collateral > 0,
        LendingError::PriceNotAvailable
    );

    let numerator = wad_mul_down(liquidation_incentive, price_borrowed)?;
    let denominator = wad_mul_down(price_collateral, exchange_rate_collateral)?;
    let ratio = wad_div_down(numerator, denominator)?;

    wad_mul_down(ratio, repay_amount)
}

/// Split seized shares into the protocol cut and the liquidator's remainder
pub fn split_seize_shares(seize_shares: u128, protocol_seize_share: u128) -> Result<SeizeSplit> {
    let protocol_shares = wad_mul_down(seize_shares, protocol_seize_share)?;
    Ok(SeizeSplit {
        liquidator_shares: checked_sub(seize_shares, protocol_shares)?,
        protocol_shares,
    })
}
