//! Position management instructions (account markets, create, close)

use anchor_lang::prelude::*;
use crate::constants::{PROGRAM_SEED_PREFIX, MAX_ACCOUNT_MARKETS};
use crate::errors::LendingError;
use crate::events::{PositionCreated, PositionClosed};
use crate::state::{AccountMarkets, Market, Position};

// ============================================================================
// Create Account Markets
// ============================================================================

#[derive(Accounts)]
pub struct CreateAccountMarkets<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Membership owner - can be any account
    pub owner: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        space = AccountMarkets::space(),
        seeds = [PROGRAM_SEED_PREFIX, AccountMarkets::SEED, owner.key().as_ref()],
        bump,
    )]
    pub account_markets: Account<'info, AccountMarkets>,

    pub system_program: Program<'info, System>,
}

pub fn create_account_markets(ctx: Context<CreateAccountMarkets>) -> Result<()> {
    let account = &mut ctx.accounts.account_markets;
    account.bump = ctx.bumps.account_markets;
    account.owner = ctx.accounts.owner.key();
    account.collateral_count = 0;
    account.collateral_markets = [Pubkey::default(); MAX_ACCOUNT_MARKETS];
    account.borrow_count = 0;
    account.borrow_markets = [Pubkey::default(); MAX_ACCOUNT_MARKETS];
    Ok(())
}

// ============================================================================
// Create Position
// ============================================================================

#[derive(Accounts)]
pub struct CreatePosition<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Position owner - can be any account
    pub owner: UncheckedAccount<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.underlying_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    #[account(
        init,
        payer = payer,
        space = Position::space(),
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, market.key().as_ref(), owner.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, Position>,

    pub system_program: Program<'info, System>,
}

pub fn create_position(ctx: Context<CreatePosition>) -> Result<()> {
    let position = &mut ctx.accounts.position;
    position.bump = ctx.bumps.position;
    position.market = ctx.accounts.market.key();
    position.owner = ctx.accounts.owner.key();
    position.supply_shares = 0;
    position.borrow_principal = 0;

    emit!(PositionCreated {
        market: position.market,
        owner: position.owner,
    });
    Ok(())
}

// ============================================================================
// Close Position
// ============================================================================

#[derive(Accounts)]
pub struct ClosePosition<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: Rent receiver - can be any account
    #[account(mut)]
    pub rent_receiver: UncheckedAccount<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, AccountMarkets::SEED, owner.key().as_ref()],
        bump = account_markets.bump,
    )]
    pub account_markets: Account<'info, AccountMarkets>,

    #[account(
        mut,
        close = rent_receiver,
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, position.market.as_ref(), owner.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == owner.key() @ LendingError::Unauthorized,
        constraint = position.is_empty() @ LendingError::PositionNotEmpty,
        constraint = !account_markets.is_member(&position.market) @ LendingError::PositionInUse,
    )]
    pub position: Account<'info, Position>,
}

pub fn close_position(ctx: Context<ClosePosition>) -> Result<()> {
    emit!(PositionClosed {
        market: ctx.accounts.position.market,
        owner: ctx.accounts.owner.key(),
    });
    Ok(())
}
