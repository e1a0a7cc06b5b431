//! Account membership state
//!
//! One account per user listing the markets whose supply counts as
//! collateral and the markets the user currently borrows from.

use anchor_lang::prelude::*;
use crate::constants::{PROGRAM_SEED_PREFIX, MAX_ACCOUNT_MARKETS};
use crate::errors::LendingError;

/// Markets a user participates in
///
/// PDA Seeds: [PROGRAM_SEED_PREFIX, b"account_markets", owner]
#[account]
pub struct AccountMarkets {
    /// PDA bump seed
    pub bump: u8,

    /// Account owner
    pub owner: Pubkey,

    /// Number of entered markets (active count in the array)
    pub collateral_count: u8,

    /// Markets entered as collateral
    /// Fixed-size array for predictable account size
    pub collateral_markets: [Pubkey; MAX_ACCOUNT_MARKETS],

    /// Number of markets with nonzero borrow principal
    pub borrow_count: u8,

    /// Markets with outstanding borrow principal
    pub borrow_markets: [Pubkey; MAX_ACCOUNT_MARKETS],

    /// Reserved for future use
    pub reserved: [u8; 64],
}

impl AccountMarkets {
    pub const SEED: &'static [u8] = b"account_markets";

    pub fn space() -> usize {
        8 +                             // discriminator
        1 +                             // bump
        32 +                            // owner
        1 +                             // collateral_count
        (32 * MAX_ACCOUNT_MARKETS) +    // collateral_markets
        1 +                             // borrow_count
        (32 * MAX_ACCOUNT_MARKETS) +    // borrow_markets
        64                              // reserved
    }

    pub fn entered(&self) -> &[Pubkey] {
        &self.collateral_markets[..self.collateral_count as usize]
    }

    pub fn borrowed(&self) -> &[Pubkey] {
        &self.borrow_markets[..self.borrow_count as usize]
    }

    /// Check if a market counts as collateral
    pub fn is_entered(&self, market: &Pubkey) -> bool {
        self.entered().contains(market)
    }

    /// Check if the account borrows from a market
    pub fn is_borrowing(&self, market: &Pubkey) -> bool {
        self.borrowed().contains(market)
    }

    /// Check if a market takes part in the liquidity computation
    pub fn is_member(&self, market: &Pubkey) -> bool {
        self.is_entered(market) || self.is_borrowing(market)
    }

    /// Union of entered and borrowed markets, without duplicates
    pub fn liquidity_markets(&self) -> Vec<Pubkey> {
        let mut markets = self.entered().to_vec();
        for market in self.borrowed() {
            if !markets.contains(market) {
                markets.push(*market);
            }
        }
        markets
    }

    /// Enter a market as collateral, returning false if already entered
    pub fn enter_market(&mut self, market: Pubkey) -> Result<bool> {
        if self.is_entered(&market) {
            return Ok(false);
        }
        require!(
            (self.collateral_count as usize) < MAX_ACCOUNT_MARKETS,
            LendingError::MaxMarketsEntered
        );

        self.collateral_markets[self.collateral_count as usize] = market;
        self.collateral_count += 1;
        Ok(true)
    }

    /// Leave a market, returning false if it was not entered
    pub fn exit_market(&mut self, market: &Pubkey) -> bool {
        let count = self.collateral_count as usize;
        remove_from(&mut self.collateral_markets, count, market)
            .map(|_| self.collateral_count -= 1)
            .is_some()
    }

    /// Record a borrow from `market`; no-op if already recorded
    pub fn add_borrow_market(&mut self, market: Pubkey) -> Result<()> {
        if self.is_borrowing(&market) {
            return Ok(());
        }
        require!(
            (self.borrow_count as usize) < MAX_ACCOUNT_MARKETS,
            LendingError::MaxMarketsEntered
        );

        self.borrow_markets[self.borrow_count as usize] = market;
        self.borrow_count += 1;
        Ok(())
    }

    /// Forget a borrow market once its principal is repaid
    pub fn remove_borrow_market(&mut self, market: &Pubkey) {
        let count = self.borrow_count as usize;
        if remove_from(&mut self.borrow_markets, count, market).is_some() {
            self.borrow_count -= 1;
        }
    }
}

/// Swap-remove `market` from the first `count` slots
fn remove_from(slots: &mut [Pubkey], count: usize, market: &Pubkey) -> Option<usize> {
    let index = slots[..count].iter().position(|m| m == market)?;
    slots[index] = slots[count - 1];
    slots[count - 1] = Pubkey::default();
    Some(index)
}

/// Derive account markets PDA
pub fn derive_account_markets(program_id: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, AccountMarkets::SEED, owner.as_ref()],
        program_id,
    )
}
