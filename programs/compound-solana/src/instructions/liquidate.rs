//! Liquidation instruction
//!
//! The liquidator repays part of an underwater borrow in the debt market and
//! receives the borrower's supply shares in the collateral market. The
//! protocol keeps `protocol_seize_share` of the seized shares as reserves.
//!
//! Remaining accounts: `(Market, Position)` pairs for the borrower's other
//! markets.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface, transfer_checked, TransferChecked};
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::LendingError;
use crate::events::LiquidateBorrow;
use crate::math::safe_u128_to_u64;
use crate::risk::{account_liquidity, calculate_seize_shares, load_snapshots, max_repay, KnownMarket};
use crate::state::{RiskEngine, Market, Position, AccountMarkets, PriceOracle};

#[derive(Accounts)]
pub struct Liquidate<'info> {
    #[account(mut)]
    pub liquidator: Signer<'info>,

    /// CHECK: Borrower being liquidated
    #[account(constraint = borrower.key() != liquidator.key() @ LendingError::SelfLiquidation)]
    pub borrower: UncheckedAccount<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, RiskEngine::SEED],
        bump = risk_engine.bump,
    )]
    pub risk_engine: Box<Account<'info, RiskEngine>>,

    #[account(address = risk_engine.oracle @ LendingError::InvalidOracle)]
    pub price_oracle: Box<Account<'info, PriceOracle>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, AccountMarkets::SEED, borrower.key().as_ref()],
        bump = borrower_account_markets.bump,
    )]
    pub borrower_account_markets: Box<Account<'info, AccountMarkets>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, debt_market.underlying_mint.as_ref()],
        bump = debt_market.bump,
    )]
    pub debt_market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, debt_market.key().as_ref(), borrower.key().as_ref()],
        bump = borrower_debt_position.bump,
    )]
    pub borrower_debt_position: Box<Account<'info, Position>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, collateral_market.underlying_mint.as_ref()],
        bump = collateral_market.bump,
        constraint = collateral_market.key() != debt_market.key() @ LendingError::SameMarketLiquidation,
    )]
    pub collateral_market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, collateral_market.key().as_ref(), borrower.key().as_ref()],
        bump = borrower_collateral_position.bump,
    )]
    pub borrower_collateral_position: Box<Account<'info, Position>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, collateral_market.key().as_ref(), liquidator.key().as_ref()],
        bump = liquidator_collateral_position.bump,
    )]
    pub liquidator_collateral_position: Box<Account<'info, Position>>,

    #[account(
        mut,
        constraint = liquidator_token_account.mint == debt_market.underlying_mint @ LendingError::InvalidTokenAccount,
    )]
    pub liquidator_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::VAULT_SEED, debt_market.key().as_ref()],
        bump = debt_market.vault_bump,
    )]
    pub debt_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(address = debt_market.underlying_mint)]
    pub debt_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn liquidate_borrow(ctx: Context<Liquidate>, repay_amount: u128) -> Result<()> {
    let borrower = ctx.accounts.borrower.key();
    let debt_key = ctx.accounts.debt_market.key();
    let collateral_key = ctx.accounts.collateral_market.key();

    // ===== CHECKS =====
    require!(repay_amount > 0, LendingError::ZeroAmount);
    require!(
        ctx.accounts.debt_market.is_listed && ctx.accounts.collateral_market.is_listed,
        LendingError::MarketNotListed
    );

    let snapshots = load_snapshots(
        ctx.remaining_accounts,
        &borrower,
        &ctx.accounts.borrower_account_markets,
        &ctx.accounts.price_oracle,
        &[
            KnownMarket::new(debt_key, &ctx.accounts.debt_market, &ctx.accounts.borrower_debt_position),
            KnownMarket::new(
                collateral_key,
                &ctx.accounts.collateral_market,
                &ctx.accounts.borrower_collateral_position,
            ),
        ],
    )?;
    let liquidity = account_liquidity(&snapshots)?;
    require!(liquidity.has_shortfall(), LendingError::NotEligible);

    let engine = &ctx.accounts.risk_engine;
    let max_close = max_repay(
        ctx.accounts.borrower_debt_position.borrow_principal,
        engine.close_factor,
    )?;
    require!(repay_amount <= max_close, LendingError::RepayTooMuch);

    let oracle = &ctx.accounts.price_oracle;
    let price_debt = oracle.price_of(&debt_key).ok_or(LendingError::PriceNotAvailable)?;
    let price_collateral = oracle
        .price_of(&collateral_key)
        .ok_or(LendingError::PriceNotAvailable)?;
    let seize_shares = calculate_seize_shares(
        repay_amount,
        price_debt,
        price_collateral,
        ctx.accounts.collateral_market.exchange_rate()?,
        engine.liquidation_incentive,
    )?;
    require!(
        ctx.accounts.borrower_collateral_position.supply_shares >= seize_shares,
        LendingError::InsufficientCollateralToSeize
    );

    let repay_u64 = safe_u128_to_u64(repay_amount)?;
    require!(
        ctx.accounts.liquidator_token_account.amount >= repay_u64,
        LendingError::InsufficientBalance
    );
    let protocol_seize_share = engine.protocol_seize_share;

    // ===== EFFECTS =====
    let debt_market = &mut ctx.accounts.debt_market;
    let debt_position = &mut ctx.accounts.borrower_debt_position;
    debt_market.apply_repay(debt_position, repay_amount)?;
    if !debt_position.has_debt() {
        ctx.accounts.borrower_account_markets.remove_borrow_market(&debt_key);
    }

    let split = ctx.accounts.collateral_market.apply_seize(
        &mut ctx.accounts.borrower_collateral_position,
        &mut ctx.accounts.liquidator_collateral_position,
        seize_shares,
        protocol_seize_share,
    )?;

    // ===== INTERACTIONS =====
    transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.liquidator_token_account.to_account_info(),
                to: ctx.accounts.debt_vault.to_account_info(),
                authority: ctx.accounts.liquidator.to_account_info(),
                mint: ctx.accounts.debt_mint.to_account_info(),
            },
        ),
        repay_u64,
        ctx.accounts.debt_market.underlying_decimals,
    )?;

    msg!(
        "liquidated {}: repaid {}, seized {} shares ({} to liquidator)",
        borrower,
        repay_amount,
        seize_shares,
        split.liquidator_shares
    );
    emit!(LiquidateBorrow {
        liquidator: ctx.accounts.liquidator.key(),
        borrower,
        debt_market: debt_key,
        collateral_market: collateral_key,
        repay_amount,
        seize_shares,
        liquidator_shares: split.liquidator_shares,
        protocol_shares: split.protocol_shares,
    });

    Ok(())
}
