//! Borrow and repay instructions
//!
//! CEI Pattern: Checks → Effects → Interactions

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface, transfer_checked, TransferChecked};
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::LendingError;
use crate::events;
use crate::math::safe_u128_to_u64;
use crate::risk::{hypothetical_liquidity, load_snapshots, HypotheticalEffect, KnownMarket};
use crate::state::{RiskEngine, Market, Position, AccountMarkets, PriceOracle};

// ============================================================================
// Borrow
// ============================================================================

#[derive(Accounts)]
pub struct Borrow<'info> {
    pub borrower: Signer<'info>,

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
        bump = account_markets.bump,
    )]
    pub account_markets: Box<Account<'info, AccountMarkets>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.underlying_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, market.key().as_ref(), borrower.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, Position>>,

    #[account(
        mut,
        constraint = receiver_token_account.mint == market.underlying_mint @ LendingError::InvalidTokenAccount,
    )]
    pub receiver_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::VAULT_SEED, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(address = market.underlying_mint)]
    pub underlying_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn borrow(ctx: Context<Borrow>, amount: u128) -> Result<()> {
    let market_key = ctx.accounts.market.key();
    let borrower = ctx.accounts.borrower.key();

    // ===== CHECKS =====
    ctx.accounts.market.validate_borrow(amount)?;
    require!(
        ctx.accounts.price_oracle.price_of(&market_key).is_some(),
        LendingError::PriceNotAvailable
    );

    let snapshots = load_snapshots(
        ctx.remaining_accounts,
        &borrower,
        &ctx.accounts.account_markets,
        &ctx.accounts.price_oracle,
        &[KnownMarket::new(market_key, &ctx.accounts.market, &ctx.accounts.position)],
    )?;
    let effect = HypotheticalEffect::borrow(market_key, amount);
    require!(
        !hypothetical_liquidity(&snapshots, Some(&effect))?.has_shortfall(),
        LendingError::InsufficientCollateral
    );

    // ===== EFFECTS =====
    let market = &mut ctx.accounts.market;
    let position = &mut ctx.accounts.position;
    market.apply_borrow(position, amount)?;
    ctx.accounts.account_markets.add_borrow_market(market_key)?;

    // ===== INTERACTIONS =====
    let amount_u64 = safe_u128_to_u64(amount)?;
    let underlying_mint = ctx.accounts.market.underlying_mint;
    let bump = ctx.accounts.market.bump;
    let seeds = &[
        PROGRAM_SEED_PREFIX,
        Market::SEED,
        underlying_mint.as_ref(),
        &[bump],
    ];

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.receiver_token_account.to_account_info(),
                authority: ctx.accounts.market.to_account_info(),
                mint: ctx.accounts.underlying_mint.to_account_info(),
            },
            &[seeds],
        ),
        amount_u64,
        ctx.accounts.market.underlying_decimals,
    )?;

    emit!(events::Borrow {
        market: market_key,
        borrower,
        receiver: ctx.accounts.receiver_token_account.key(),
        amount,
        account_borrows: ctx.accounts.position.borrow_principal,
        total_borrows: ctx.accounts.market.total_borrows,
    });

    Ok(())
}

// ============================================================================
// Repay Borrow
// ============================================================================

#[derive(Accounts)]
pub struct RepayBorrow<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Borrower whose debt is repaid
    pub borrower: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, AccountMarkets::SEED, borrower.key().as_ref()],
        bump = account_markets.bump,
    )]
    pub account_markets: Box<Account<'info, AccountMarkets>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.underlying_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, market.key().as_ref(), borrower.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, Position>>,

    #[account(
        mut,
        constraint = payer_token_account.mint == market.underlying_mint @ LendingError::InvalidTokenAccount,
    )]
    pub payer_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::VAULT_SEED, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(address = market.underlying_mint)]
    pub underlying_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Repay up to `amount`; `REPAY_ALL` settles the whole principal
pub fn repay_borrow(ctx: Context<RepayBorrow>, amount: u128) -> Result<()> {
    let market_key = ctx.accounts.market.key();

    // ===== CHECKS =====
    let repaid = ctx.accounts.market.repay_amount(&ctx.accounts.position, amount)?;
    let repaid_u64 = safe_u128_to_u64(repaid)?;
    require!(
        ctx.accounts.payer_token_account.amount >= repaid_u64,
        LendingError::InsufficientBalance
    );

    // ===== EFFECTS =====
    let market = &mut ctx.accounts.market;
    let position = &mut ctx.accounts.position;
    market.apply_repay(position, repaid)?;
    if !position.has_debt() {
        ctx.accounts.account_markets.remove_borrow_market(&market_key);
    }

    // ===== INTERACTIONS =====
    transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.payer_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.payer.to_account_info(),
                mint: ctx.accounts.underlying_mint.to_account_info(),
            },
        ),
        repaid_u64,
        ctx.accounts.market.underlying_decimals,
    )?;

    emit!(events::RepayBorrow {
        market: market_key,
        payer: ctx.accounts.payer.key(),
        borrower: ctx.accounts.borrower.key(),
        amount: repaid,
        account_borrows: ctx.accounts.position.borrow_principal,
        total_borrows: ctx.accounts.market.total_borrows,
    });

    Ok(())
}
