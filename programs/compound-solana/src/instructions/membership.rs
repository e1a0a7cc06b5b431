//! Collateral membership instructions (enter, exit)
//!
//! Remaining accounts carry `(Market, Position)` pairs:
//! - enter_markets: one pair per market to enter
//! - exit_markets: one pair per market the account currently participates in

use anchor_lang::prelude::*;
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::LendingError;
use crate::events::{MarketEntered, MarketExited};
use crate::risk::{account_liquidity, load_program_account, load_snapshots};
use crate::state::{AccountMarkets, Market, Position, PriceOracle, RiskEngine};

// ============================================================================
// Enter Markets
// ============================================================================

#[derive(Accounts)]
pub struct EnterMarkets<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, AccountMarkets::SEED, owner.key().as_ref()],
        bump = account_markets.bump,
    )]
    pub account_markets: Account<'info, AccountMarkets>,
}

pub fn enter_markets(ctx: Context<EnterMarkets>) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let pairs = ctx.remaining_accounts;
    require!(
        !pairs.is_empty() && pairs.len() % 2 == 0,
        LendingError::MissingMarketAccount
    );

    // ===== CHECKS =====
    let mut markets = Vec::with_capacity(pairs.len() / 2);
    for pair in pairs.chunks(2) {
        let key = *pair[0].key;
        let market: Market = load_program_account(&pair[0])?;
        let position: Position = load_program_account(&pair[1])?;

        require!(market.is_listed, LendingError::MarketNotListed);
        require!(
            position.market == key && position.owner == owner,
            LendingError::PositionMismatch
        );
        markets.push(key);
    }

    // ===== EFFECTS =====
    let account = &mut ctx.accounts.account_markets;
    for market in markets {
        if account.enter_market(market)? {
            emit!(MarketEntered { market, account: owner });
        }
    }

    Ok(())
}

// ============================================================================
// Exit Markets
// ============================================================================

#[derive(Accounts)]
pub struct ExitMarkets<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, RiskEngine::SEED],
        bump = risk_engine.bump,
    )]
    pub risk_engine: Box<Account<'info, RiskEngine>>,

    #[account(address = risk_engine.oracle @ LendingError::InvalidOracle)]
    pub price_oracle: Box<Account<'info, PriceOracle>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, AccountMarkets::SEED, owner.key().as_ref()],
        bump = account_markets.bump,
    )]
    pub account_markets: Account<'info, AccountMarkets>,
}

pub fn exit_markets(ctx: Context<ExitMarkets>, markets: Vec<Pubkey>) -> Result<()> {
    let owner = ctx.accounts.owner.key();

    // ===== CHECKS =====
    let leaving: Vec<Pubkey> = markets
        .into_iter()
        .filter(|m| ctx.accounts.account_markets.is_entered(m))
        .collect();
    if leaving.is_empty() {
        return Ok(());
    }

    let mut snapshots = load_snapshots(
        ctx.remaining_accounts,
        &owner,
        &ctx.accounts.account_markets,
        &ctx.accounts.price_oracle,
        &[],
    )?;
    for snapshot in snapshots.iter_mut() {
        if leaving.contains(&snapshot.market) {
            snapshot.is_collateral = false;
        }
    }
    require!(
        !account_liquidity(&snapshots)?.has_shortfall(),
        LendingError::InsufficientCollateral
    );

    // ===== EFFECTS =====
    let account = &mut ctx.accounts.account_markets;
    for market in leaving {
        if account.exit_market(&market) {
            emit!(MarketExited { market, account: owner });
        }
    }

    Ok(())
}
