//! Compound-style Pooled Lending Protocol on Solana
//!
//! Users supply an asset to a shared pool for exchange-rate shares, borrow
//! other assets against entered collateral, and third parties liquidate
//! accounts in shortfall for a bonus.
//!
//! ## Features
//! - One market per underlying mint with exchange-rate share accounting
//! - Cross-market account liquidity (collateral factor × exchange rate × price)
//! - Close-factor bounded liquidation with incentive and protocol seize share
//! - Admin-fed price oracle account
//! - Token-2022 support through the token interface
//! - CEI pattern for re-entrancy protection
//! - Two-step admin transfer

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod math;
pub mod state;
pub mod risk;
pub mod instructions;

use instructions::*;

declare_id!("ChPDYwjTsKu9sPe8ufPLToHqyF5r1sy8TtaGQDjFy7G2");

#[program]
pub mod compound_solana {
    use super::*;

    // =========================================================================
    // Admin Instructions
    // =========================================================================

    pub fn initialize(ctx: Context<Initialize>, admin: Pubkey) -> Result<()> {
        instructions::admin::initialize(ctx, admin)
    }

    pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::transfer_admin(ctx, new_admin)
    }

    pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
        instructions::admin::accept_admin(ctx)
    }

    pub fn set_price_oracle(ctx: Context<SetPriceOracle>) -> Result<()> {
        instructions::admin::set_price_oracle(ctx)
    }

    pub fn support_market(ctx: Context<SupportMarket>) -> Result<()> {
        instructions::admin::support_market(ctx)
    }

    pub fn set_collateral_factor(
        ctx: Context<SetCollateralFactor>,
        collateral_factor: u128,
    ) -> Result<()> {
        instructions::admin::set_collateral_factor(ctx, collateral_factor)
    }

    pub fn set_close_factor(ctx: Context<SetRiskParameter>, close_factor: u128) -> Result<()> {
        instructions::admin::set_close_factor(ctx, close_factor)
    }

    pub fn set_liquidation_incentive(
        ctx: Context<SetRiskParameter>,
        incentive: u128,
    ) -> Result<()> {
        instructions::admin::set_liquidation_incentive(ctx, incentive)
    }

    pub fn set_protocol_seize_share(ctx: Context<SetRiskParameter>, share: u128) -> Result<()> {
        instructions::admin::set_protocol_seize_share(ctx, share)
    }

    // =========================================================================
    // Oracle Instructions
    // =========================================================================

    pub fn initialize_price_oracle(ctx: Context<InitializePriceOracle>) -> Result<()> {
        instructions::oracle::initialize_price_oracle(ctx)
    }

    pub fn set_underlying_price(
        ctx: Context<SetUnderlyingPrice>,
        market: Pubkey,
        price: u128,
    ) -> Result<()> {
        instructions::oracle::set_underlying_price(ctx, market, price)
    }

    // =========================================================================
    // Market Instructions
    // =========================================================================

    pub fn create_market(ctx: Context<CreateMarket>, initial_exchange_rate: u128) -> Result<()> {
        instructions::market::create_market(ctx, initial_exchange_rate)
    }

    // =========================================================================
    // Position Instructions
    // =========================================================================

    pub fn create_account_markets(ctx: Context<CreateAccountMarkets>) -> Result<()> {
        instructions::position::create_account_markets(ctx)
    }

    pub fn create_position(ctx: Context<CreatePosition>) -> Result<()> {
        instructions::position::create_position(ctx)
    }

    pub fn close_position(ctx: Context<ClosePosition>) -> Result<()> {
        instructions::position::close_position(ctx)
    }

    // =========================================================================
    // Membership Instructions
    // =========================================================================

    pub fn enter_markets(ctx: Context<EnterMarkets>) -> Result<()> {
        instructions::membership::enter_markets(ctx)
    }

    pub fn exit_markets(ctx: Context<ExitMarkets>, markets: Vec<Pubkey>) -> Result<()> {
        instructions::membership::exit_markets(ctx, markets)
    }

    // =========================================================================
    // Supply Instructions
    // =========================================================================

    pub fn supply(ctx: Context<Supply>, amount: u128) -> Result<()> {
        instructions::supply::supply(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, shares: u128) -> Result<()> {
        instructions::supply::withdraw(ctx, shares)
    }

    // =========================================================================
    // Borrow Instructions
    // =========================================================================

    pub fn borrow(ctx: Context<Borrow>, amount: u128) -> Result<()> {
        instructions::borrow::borrow(ctx, amount)
    }

    pub fn repay_borrow(ctx: Context<RepayBorrow>, amount: u128) -> Result<()> {
        instructions::borrow::repay_borrow(ctx, amount)
    }

    // =========================================================================
    // Liquidation Instructions
    // =========================================================================

    pub fn liquidate_borrow(ctx: Context<Liquidate>, repay_amount: u128) -> Result<()> {
        instructions::liquidate::liquidate_borrow(ctx, repay_amount)
    }

    // =========================================================================
    // Utility Instructions
    // =========================================================================

    pub fn claim_reserves(ctx: Context<ClaimReserves>) -> Result<()> {
        instructions::utils::claim_reserves(ctx)
    }

    pub fn account_liquidity(ctx: Context<AccountLiquidityView>) -> Result<()> {
        instructions::utils::account_liquidity(ctx)
    }
}
