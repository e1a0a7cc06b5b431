//! Market state account
//!
//! One account per listed underlying mint. The market owns a token vault
//! and keeps the share ledger (suppliers) and the principal ledger
//! (borrowers) for that asset.
//!
//! The `apply_*` methods hold the pure ledger transitions. Instruction
//! handlers run them before any token transfer, so every rejection happens
//! with the accounts untouched.

use anchor_lang::prelude::*;
use crate::constants::{PROGRAM_SEED_PREFIX, COLLATERAL_FACTOR_CEILING};
use crate::errors::LendingError;
use crate::math::{checked_add, checked_sub, exchange_rate, to_shares_down, to_assets_down};
use crate::risk::split_seize_shares;
use super::Position;

/// Pooled lending market state
///
/// PDA Seeds: [PROGRAM_SEED_PREFIX, b"market", underlying_mint]
#[account]
pub struct Market {
    /// PDA bump seed
    pub bump: u8,

    // === Immutable Parameters (set at creation) ===

    /// Underlying token mint
    pub underlying_mint: Pubkey,

    /// Underlying token decimals (cached for transfer_checked)
    pub underlying_decimals: u8,

    /// Bump for the vault PDA
    pub vault_bump: u8,

    /// Exchange rate applied while no shares are outstanding (WAD)
    pub initial_exchange_rate: u128,

    // === Risk Parameters ===

    /// Set by support_market, never cleared
    pub is_listed: bool,

    /// Fraction of supplied value counted as borrowing power (WAD, < 1.0)
    pub collateral_factor: u128,

    // === Mutable State ===

    /// Total supply shares outstanding (including reserve_shares)
    pub total_shares: u128,

    /// Underlying held by the vault on behalf of the ledger
    pub total_cash: u128,

    /// Sum of all borrow principals
    pub total_borrows: u128,

    /// Shares owned by the protocol, accumulated from liquidation seizures
    /// Claimed via claim_reserves instruction
    pub reserve_shares: u128,

    /// Reserved for future use
    pub reserved: [u8; 128],
}

/// Outcome of a seizure, split between liquidator and protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeizeSplit {
    pub liquidator_shares: u128,
    pub protocol_shares: u128,
}

impl Market {
    pub const SEED: &'static [u8] = b"market";
    pub const VAULT_SEED: &'static [u8] = b"vault";

    pub fn space() -> usize {
        8 +     // discriminator
        1 +     // bump
        32 +    // underlying_mint
        1 +     // underlying_decimals
        1 +     // vault_bump
        16 +    // initial_exchange_rate
        1 +     // is_listed
        16 +    // collateral_factor
        16 +    // total_shares
        16 +    // total_cash
        16 +    // total_borrows
        16 +    // reserve_shares
        128     // reserved
    }

    /// Underlying per share (WAD)
    pub fn exchange_rate(&self) -> Result<u128> {
        exchange_rate(
            self.total_cash,
            self.total_borrows,
            self.total_shares,
            self.initial_exchange_rate,
        )
    }

    /// List the market. Listing an already listed market is a no-op.
    pub fn support(&mut self) {
        self.is_listed = true;
    }

    /// Collateral factor must lie in [0, 1)
    pub fn set_collateral_factor(&mut self, collateral_factor: u128) -> Result<()> {
        require!(
            collateral_factor < COLLATERAL_FACTOR_CEILING,
            LendingError::InvalidParameter
        );
        self.collateral_factor = collateral_factor;
        Ok(())
    }

    /// Credit `amount` of underlying to `position`, returning minted shares
    pub fn apply_supply(&mut self, position: &mut Position, amount: u128) -> Result<u128> {
        require!(self.is_listed, LendingError::MarketNotListed);
        require!(amount > 0, LendingError::ZeroAmount);

        // Round DOWN - supplier gets fewer shares
        let shares = to_shares_down(amount, self.exchange_rate()?)?;
        require!(shares > 0, LendingError::ZeroAmount);

        let total_cash = checked_add(self.total_cash, amount)?;
        let total_shares = checked_add(self.total_shares, shares)?;
        let position_shares = checked_add(position.supply_shares, shares)?;

        self.total_cash = total_cash;
        self.total_shares = total_shares;
        position.supply_shares = position_shares;
        Ok(shares)
    }

    /// Underlying paid out for burning `shares` at the current rate
    pub fn redeem_amount(&self, position: &Position, shares: u128) -> Result<u128> {
        require!(shares > 0, LendingError::ZeroAmount);
        require!(
            position.supply_shares >= shares,
            LendingError::InsufficientBalance
        );

        // Round DOWN - redeemer gets fewer tokens
        let amount = to_assets_down(shares, self.exchange_rate()?)?;
        require!(amount <= self.total_cash, LendingError::InsufficientLiquidity);
        Ok(amount)
    }

    /// Burn `shares` from `position`, returning the underlying to pay out
    pub fn apply_withdraw(&mut self, position: &mut Position, shares: u128) -> Result<u128> {
        let amount = self.redeem_amount(position, shares)?;

        let total_cash = checked_sub(self.total_cash, amount)?;
        let total_shares = checked_sub(self.total_shares, shares)?;
        let position_shares = checked_sub(position.supply_shares, shares)?;

        self.total_cash = total_cash;
        self.total_shares = total_shares;
        position.supply_shares = position_shares;
        Ok(amount)
    }

    /// Check that `amount` can be lent out of this market
    pub fn validate_borrow(&self, amount: u128) -> Result<()> {
        require!(self.is_listed, LendingError::MarketNotListed);
        require!(amount > 0, LendingError::ZeroAmount);
        require!(amount <= self.total_cash, LendingError::InsufficientLiquidity);
        Ok(())
    }

    /// Lend `amount` to `position`
    ///
    /// Solvency is the caller's concern; this only moves the ledger.
    pub fn apply_borrow(&mut self, position: &mut Position, amount: u128) -> Result<()> {
        self.validate_borrow(amount)?;

        let total_cash = checked_sub(self.total_cash, amount)?;
        let total_borrows = checked_add(self.total_borrows, amount)?;
        let principal = checked_add(position.borrow_principal, amount)?;

        self.total_cash = total_cash;
        self.total_borrows = total_borrows;
        position.borrow_principal = principal;
        Ok(())
    }

    /// Amount actually repaid for a requested `amount`
    ///
    /// Requests above the outstanding principal (including `REPAY_ALL`)
    /// are clamped to it.
    pub fn repay_amount(&self, position: &Position, amount: u128) -> Result<u128> {
        require!(amount > 0, LendingError::ZeroAmount);
        require!(position.has_debt(), LendingError::NoOutstandingBorrow);
        Ok(amount.min(position.borrow_principal))
    }

    /// Reduce `position`'s principal, returning the amount to collect
    pub fn apply_repay(&mut self, position: &mut Position, amount: u128) -> Result<u128> {
        let repaid = self.repay_amount(position, amount)?;

        let principal = checked_sub(position.borrow_principal, repaid)?;
        let total_borrows = checked_sub(self.total_borrows, repaid)?;
        let total_cash = checked_add(self.total_cash, repaid)?;

        position.borrow_principal = principal;
        self.total_borrows = total_borrows;
        self.total_cash = total_cash;
        Ok(repaid)
    }

    /// Move `seize_shares` from the borrower, splitting them between the
    /// liquidator and the protocol reserves
    ///
    /// `total_shares` is unchanged: the protocol cut stays outstanding as
    /// `reserve_shares`.
    pub fn apply_seize(
        &mut self,
        borrower: &mut Position,
        liquidator: &mut Position,
        seize_shares: u128,
        protocol_seize_share: u128,
    ) -> Result<SeizeSplit> {
        require!(
            borrower.supply_shares >= seize_shares,
            LendingError::InsufficientCollateralToSeize
        );

        let split = split_seize_shares(seize_shares, protocol_seize_share)?;

        let borrower_shares = checked_sub(borrower.supply_shares, seize_shares)?;
        let liquidator_shares = checked_add(liquidator.supply_shares, split.liquidator_shares)?;
        let reserve_shares = checked_add(self.reserve_shares, split.protocol_shares)?;

        borrower.supply_shares = borrower_shares;
        liquidator.supply_shares = liquidator_shares;
        self.reserve_shares = reserve_shares;
        Ok(split)
    }

    /// Hand every reserve share to `recipient`, returning the amount moved
    pub fn apply_claim_reserves(&mut self, recipient: &mut Position) -> Result<u128> {
        let shares = self.reserve_shares;
        recipient.supply_shares = checked_add(recipient.supply_shares, shares)?;
        self.reserve_shares = 0;
        Ok(shares)
    }
}

/// Derive market PDA
pub fn derive_market(program_id: &Pubkey, underlying_mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, Market::SEED, underlying_mint.as_ref()],
        program_id,
    )
}

/// Derive vault PDA
pub fn derive_vault(program_id: &Pubkey, market: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, Market::VAULT_SEED, market.as_ref()],
        program_id,
    )
}
