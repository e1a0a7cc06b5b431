//! Position state account
//!
//! One account per user per market, tracking their share balance
//! and borrow principal.

use anchor_lang::prelude::*;
use crate::constants::PROGRAM_SEED_PREFIX;

/// User position in a specific market
///
/// PDA Seeds: [PROGRAM_SEED_PREFIX, b"position", market, owner]
#[account]
pub struct Position {
    /// PDA bump seed
    pub bump: u8,

    /// Market account this position belongs to
    pub market: Pubkey,

    /// Position owner
    pub owner: Pubkey,

    /// Supply shares (claim on the market's cash plus borrows)
    pub supply_shares: u128,

    /// Outstanding borrow principal in underlying units
    pub borrow_principal: u128,

    /// Reserved for future use
    pub reserved: [u8; 64],
}

impl Position {
    pub const SEED: &'static [u8] = b"position";

    pub fn space() -> usize {
        8 +     // discriminator
        1 +     // bump
        32 +    // market
        32 +    // owner
        16 +    // supply_shares
        16 +    // borrow_principal
        64      // reserved
    }

    /// Check if position has any activity
    pub fn is_empty(&self) -> bool {
        self.supply_shares == 0 && self.borrow_principal == 0
    }

    /// Check if position has any debt
    pub fn has_debt(&self) -> bool {
        self.borrow_principal > 0
    }
}

/// Derive position PDA
pub fn derive_position(
    program_id: &Pubkey,
    market: &Pubkey,
    owner: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            PROGRAM_SEED_PREFIX,
            Position::SEED,
            market.as_ref(),
            owner.as_ref(),
        ],
        program_id,
    )
}
