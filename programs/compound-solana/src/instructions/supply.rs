//! Supply and withdraw instructions
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
// Supply
// ============================================================================

#[derive(Accounts)]
pub struct Supply<'info> {
    #[account(mut)]
    pub supplier: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.underlying_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, market.key().as_ref(), supplier.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Account<'info, Position>,

    #[account(
        mut,
        constraint = supplier_token_account.mint == market.underlying_mint @ LendingError::InvalidTokenAccount,
    )]
    pub supplier_token_account: InterfaceAccount<'info, TokenAccount>,

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

pub fn supply(ctx: Context<Supply>, amount: u128) -> Result<()> {
    // ===== CHECKS =====
    let amount_u64 = safe_u128_to_u64(amount)?;
    require!(
        ctx.accounts.supplier_token_account.amount >= amount_u64,
        LendingError::InsufficientBalance
    );

    // ===== EFFECTS =====
    let market = &mut ctx.accounts.market;
    let position = &mut ctx.accounts.position;
    let shares = market.apply_supply(position, amount)?;

    // ===== INTERACTIONS =====
    transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.supplier_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.supplier.to_account_info(),
                mint: ctx.accounts.underlying_mint.to_account_info(),
            },
        ),
        amount_u64,
        ctx.accounts.market.underlying_decimals,
    )?;

    emit!(events::Supply {
        market: ctx.accounts.market.key(),
        supplier: ctx.accounts.supplier.key(),
        amount,
        shares,
    });

    Ok(())
}

// ============================================================================
// Withdraw
// ============================================================================

#[derive(Accounts)]
pub struct Withdraw<'info> {
    pub redeemer: Signer<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, RiskEngine::SEED],
        bump = risk_engine.bump,
    )]
    pub risk_engine: Box<Account<'info, RiskEngine>>,

    /// Required when the market is entered as collateral
    pub price_oracle: Option<Box<Account<'info, PriceOracle>>>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, AccountMarkets::SEED, redeemer.key().as_ref()],
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
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, market.key().as_ref(), redeemer.key().as_ref()],
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

pub fn withdraw(ctx: Context<Withdraw>, shares: u128) -> Result<()> {
    let market_key = ctx.accounts.market.key();
    let redeemer = ctx.accounts.redeemer.key();

    // ===== CHECKS =====
    let amount = ctx.accounts.market.redeem_amount(&ctx.accounts.position, shares)?;

    // Shares outside the collateral set can leave freely
    if ctx.accounts.account_markets.is_entered(&market_key) {
        let oracle = ctx
            .accounts
            .price_oracle
            .as_ref()
            .ok_or(LendingError::PriceNotAvailable)?;
        require_keys_eq!(oracle.key(), ctx.accounts.risk_engine.oracle, LendingError::InvalidOracle);

        let snapshots = load_snapshots(
            ctx.remaining_accounts,
            &redeemer,
            &ctx.accounts.account_markets,
            oracle,
            &[KnownMarket::new(market_key, &ctx.accounts.market, &ctx.accounts.position)],
        )?;
        let effect = HypotheticalEffect::redeem(market_key, shares);
        require!(
            !hypothetical_liquidity(&snapshots, Some(&effect))?.has_shortfall(),
            LendingError::InsufficientCollateral
        );
    }

    // ===== EFFECTS =====
    let market = &mut ctx.accounts.market;
    let position = &mut ctx.accounts.position;
    market.apply_withdraw(position, shares)?;

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

    emit!(events::Withdraw {
        market: market_key,
        redeemer,
        receiver: ctx.accounts.receiver_token_account.key(),
        amount,
        shares,
    });

    Ok(())
}
