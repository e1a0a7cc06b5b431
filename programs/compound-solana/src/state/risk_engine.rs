//! Risk engine state account
//!
//! Single global account holding the admin, the price oracle reference
//! and the protocol-wide liquidation parameters.

use anchor_lang::prelude::*;
use crate::constants::{
    PROGRAM_SEED_PREFIX, MAX_CLOSE_FACTOR, MIN_LIQUIDATION_INCENTIVE,
    PROTOCOL_SEIZE_SHARE_CEILING,
};
use crate::errors::LendingError;

/// Protocol-wide risk configuration
///
/// PDA Seeds: [PROGRAM_SEED_PREFIX, b"risk_engine"]
#[account]
pub struct RiskEngine {
    /// PDA bump seed
    pub bump: u8,

    /// Admin (lists markets, sets risk parameters, claims reserves)
    pub admin: Pubkey,

    /// Pending admin for 2-step admin transfer
    pub pending_admin: Pubkey,

    /// PriceOracle account consulted for every valuation
    /// Pubkey::default() until configured
    pub oracle: Pubkey,

    /// Max fraction of one debt position repayable per liquidation (WAD)
    pub close_factor: u128,

    /// Collateral bonus multiplier granted to liquidators (WAD, >= 1.0)
    pub liquidation_incentive: u128,

    /// Fraction of seized shares retained as protocol reserves (WAD)
    pub protocol_seize_share: u128,

    /// Markets created so far; the next market's index
    pub market_count: u64,

    /// Reserved for future upgrades
    pub reserved: [u8; 128],
}

impl RiskEngine {
    pub const SEED: &'static [u8] = b"risk_engine";

    pub fn space() -> usize {
        8 +     // discriminator
        1 +     // bump
        32 +    // admin
        32 +    // pending_admin
        32 +    // oracle
        16 +    // close_factor
        16 +    // liquidation_incentive
        16 +    // protocol_seize_share
        8 +     // market_count
        128     // reserved
    }

    /// Whether a price oracle has been configured
    pub fn has_oracle(&self) -> bool {
        self.oracle != Pubkey::default()
    }

    /// Close factor must lie in (0, 1]
    pub fn set_close_factor(&mut self, close_factor: u128) -> Result<()> {
        require!(
            close_factor > 0 && close_factor <= MAX_CLOSE_FACTOR,
            LendingError::InvalidParameter
        );
        self.close_factor = close_factor;
        Ok(())
    }

    /// Liquidation incentive must be at least 1.0
    pub fn set_liquidation_incentive(&mut self, incentive: u128) -> Result<()> {
        require!(
            incentive >= MIN_LIQUIDATION_INCENTIVE,
            LendingError::InvalidParameter
        );
        self.liquidation_incentive = incentive;
        Ok(())
    }

    /// Protocol seize share must lie in [0, 1)
    pub fn set_protocol_seize_share(&mut self, share: u128) -> Result<()> {
        require!(
            share < PROTOCOL_SEIZE_SHARE_CEILING,
            LendingError::InvalidParameter
        );
        self.protocol_seize_share = share;
        Ok(())
    }
}

/// Derive risk engine PDA
pub fn derive_risk_engine(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, RiskEngine::SEED],
        program_id,
    )
}
