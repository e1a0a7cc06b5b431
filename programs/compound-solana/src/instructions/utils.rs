//! Utility instructions
//!
//! - Claim protocol reserves
//! - Account liquidity query

use anchor_lang::prelude::*;
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::LendingError;
use crate::events::{AccountLiquidityComputed, ReservesClaimed};
use crate::risk::{account_liquidity as compute_liquidity, load_snapshots};
use crate::state::{RiskEngine, Market, Position, AccountMarkets, PriceOracle};

// ============================================================================
// Claim Reserves
// ============================================================================

#[derive(Accounts)]
pub struct ClaimReserves<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, RiskEngine::SEED],
        bump = risk_engine.bump,
        constraint = risk_engine.admin == admin.key() @ LendingError::Unauthorized,
    )]
    pub risk_engine: Account<'info, RiskEngine>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.underlying_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, market.key().as_ref(), admin.key().as_ref()],
        bump = admin_position.bump,
    )]
    pub admin_position: Account<'info, Position>,
}

/// Move accumulated seize reserves into the admin's position
pub fn claim_reserves(ctx: Context<ClaimReserves>) -> Result<()> {
    if ctx.accounts.market.reserve_shares == 0 {
        return Ok(());
    }

    let market = &mut ctx.accounts.market;
    let shares = market.apply_claim_reserves(&mut ctx.accounts.admin_position)?;

    emit!(ReservesClaimed {
        market: market.key(),
        recipient: ctx.accounts.admin.key(),
        shares,
    });

    Ok(())
}

// ============================================================================
// Account Liquidity
// ============================================================================

#[derive(Accounts)]
pub struct AccountLiquidityView<'info> {
    /// CHECK: Account whose liquidity is computed
    pub account: UncheckedAccount<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, RiskEngine::SEED],
        bump = risk_engine.bump,
    )]
    pub risk_engine: Account<'info, RiskEngine>,

    #[account(address = risk_engine.oracle @ LendingError::InvalidOracle)]
    pub price_oracle: Box<Account<'info, PriceOracle>>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, AccountMarkets::SEED, account.key().as_ref()],
        bump = account_markets.bump,
    )]
    pub account_markets: Box<Account<'info, AccountMarkets>>,
}

/// Emit `(liquidity, shortfall)` for an account
///
/// Remaining accounts: one `(Market, Position)` pair per participating market.
pub fn account_liquidity(ctx: Context<AccountLiquidityView>) -> Result<()> {
    let account = ctx.accounts.account.key();
    let snapshots = load_snapshots(
        ctx.remaining_accounts,
        &account,
        &ctx.accounts.account_markets,
        &ctx.accounts.price_oracle,
        &[],
    )?;
    let result = compute_liquidity(&snapshots)?;

    emit!(AccountLiquidityComputed {
        account,
        liquidity: result.liquidity,
        shortfall: result.shortfall,
    });

    Ok(())
}
