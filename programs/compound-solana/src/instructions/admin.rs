//! Admin instructions for risk engine management
//!
//! - Initialize risk engine
//! - Two-step admin transfer
//! - Price oracle selection
//! - Market listing and collateral factors
//! - Close factor, liquidation incentive, protocol seize share

use anchor_lang::prelude::*;
use crate::constants::{
    PROGRAM_SEED_PREFIX, DEFAULT_CLOSE_FACTOR, DEFAULT_LIQUIDATION_INCENTIVE,
    DEFAULT_PROTOCOL_SEIZE_SHARE,
};
use crate::errors::LendingError;
use crate::events::*;
use crate::math::display_wad;
use crate::state::{RiskEngine, Market, PriceOracle};

// ============================================================================
// Initialize
// ============================================================================

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = RiskEngine::space(),
        seeds = [PROGRAM_SEED_PREFIX, RiskEngine::SEED],
        bump,
    )]
    pub risk_engine: Account<'info, RiskEngine>,

    pub system_program: Program<'info, System>,
}

pub fn initialize(ctx: Context<Initialize>, admin: Pubkey) -> Result<()> {
    let engine = &mut ctx.accounts.risk_engine;
    engine.bump = ctx.bumps.risk_engine;
    engine.admin = admin;
    engine.pending_admin = Pubkey::default();
    engine.oracle = Pubkey::default();
    engine.close_factor = DEFAULT_CLOSE_FACTOR;
    engine.liquidation_incentive = DEFAULT_LIQUIDATION_INCENTIVE;
    engine.protocol_seize_share = DEFAULT_PROTOCOL_SEIZE_SHARE;
    engine.market_count = 0;

    emit!(RiskEngineInitialized {
        admin,
        close_factor: engine.close_factor,
        liquidation_incentive: engine.liquidation_incentive,
        protocol_seize_share: engine.protocol_seize_share,
    });
    Ok(())
}

// ============================================================================
// Admin Transfer (Two-Step)
// ============================================================================

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, RiskEngine::SEED],
        bump = risk_engine.bump,
        constraint = risk_engine.admin == admin.key() @ LendingError::Unauthorized,
    )]
    pub risk_engine: Account<'info, RiskEngine>,
}

pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
    ctx.accounts.risk_engine.pending_admin = new_admin;

    emit!(AdminTransferStarted {
        current_admin: ctx.accounts.admin.key(),
        pending_admin: new_admin,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AcceptAdmin<'info> {
    pub pending_admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, RiskEngine::SEED],
        bump = risk_engine.bump,
        constraint = risk_engine.pending_admin == pending_admin.key() @ LendingError::Unauthorized,
    )]
    pub risk_engine: Account<'info, RiskEngine>,
}

pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
    let engine = &mut ctx.accounts.risk_engine;
    let previous_admin = engine.admin;

    engine.admin = engine.pending_admin;
    engine.pending_admin = Pubkey::default();

    emit!(AdminTransferred {
        previous_admin,
        new_admin: engine.admin,
    });
    Ok(())
}

// ============================================================================
// Price Oracle
// ============================================================================

#[derive(Accounts)]
pub struct SetPriceOracle<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, RiskEngine::SEED],
        bump = risk_engine.bump,
        constraint = risk_engine.admin == admin.key() @ LendingError::Unauthorized,
    )]
    pub risk_engine: Account<'info, RiskEngine>,

    pub price_oracle: Account<'info, PriceOracle>,
}

pub fn set_price_oracle(ctx: Context<SetPriceOracle>) -> Result<()> {
    let old_oracle = ctx.accounts.risk_engine.oracle;
    let new_oracle = ctx.accounts.price_oracle.key();
    ctx.accounts.risk_engine.oracle = new_oracle;

    emit!(NewPriceOracle { old_oracle, new_oracle });
    Ok(())
}

// ============================================================================
// Market Listing
// ============================================================================

#[derive(Accounts)]
pub struct SupportMarket<'info> {
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
}

pub fn support_market(ctx: Context<SupportMarket>) -> Result<()> {
    let market = &mut ctx.accounts.market;
    if market.is_listed {
        return Ok(());
    }
    market.support();

    emit!(MarketListed { market: market.key() });
    Ok(())
}

// ============================================================================
// Collateral Factor
// ============================================================================

#[derive(Accounts)]
pub struct SetCollateralFactor<'info> {
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
        constraint = market.is_listed @ LendingError::MarketNotListed,
    )]
    pub market: Account<'info, Market>,

    /// Required when the new factor is nonzero
    pub price_oracle: Option<Account<'info, PriceOracle>>,
}

pub fn set_collateral_factor(ctx: Context<SetCollateralFactor>, collateral_factor: u128) -> Result<()> {
    let market_key = ctx.accounts.market.key();

    if collateral_factor > 0 {
        require!(ctx.accounts.risk_engine.has_oracle(), LendingError::InvalidOracle);
        let oracle = ctx
            .accounts
            .price_oracle
            .as_ref()
            .ok_or(LendingError::PriceNotAvailable)?;
        require_keys_eq!(oracle.key(), ctx.accounts.risk_engine.oracle, LendingError::InvalidOracle);
        require!(
            oracle.price_of(&market_key).is_some(),
            LendingError::PriceNotAvailable
        );
    }

    let market = &mut ctx.accounts.market;
    let old_collateral_factor = market.collateral_factor;
    market.set_collateral_factor(collateral_factor)?;

    msg!(
        "collateral factor {}: {} -> {}",
        market_key,
        display_wad(old_collateral_factor),
        display_wad(collateral_factor)
    );
    emit!(NewCollateralFactor {
        market: market_key,
        old_collateral_factor,
        new_collateral_factor: collateral_factor,
    });
    Ok(())
}

// ============================================================================
// Liquidation Parameters
// ============================================================================

#[derive(Accounts)]
pub struct SetRiskParameter<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, RiskEngine::SEED],
        bump = risk_engine.bump,
        constraint = risk_engine.admin == admin.key() @ LendingError::Unauthorized,
    )]
    pub risk_engine: Account<'info, RiskEngine>,
}

pub fn set_close_factor(ctx: Context<SetRiskParameter>, close_factor: u128) -> Result<()> {
    let engine = &mut ctx.accounts.risk_engine;
    let old_close_factor = engine.close_factor;
    engine.set_close_factor(close_factor)?;

    msg!(
        "close factor: {} -> {}",
        display_wad(old_close_factor),
        display_wad(close_factor)
    );
    emit!(NewCloseFactor {
        old_close_factor,
        new_close_factor: close_factor,
    });
    Ok(())
}

pub fn set_liquidation_incentive(ctx: Context<SetRiskParameter>, incentive: u128) -> Result<()> {
    let engine = &mut ctx.accounts.risk_engine;
    let old_incentive = engine.liquidation_incentive;
    engine.set_liquidation_incentive(incentive)?;

    msg!(
        "liquidation incentive: {} -> {}",
        display_wad(old_incentive),
        display_wad(incentive)
    );
    emit!(NewLiquidationIncentive {
        old_incentive,
        new_incentive: incentive,
    });
    Ok(())
}

pub fn set_protocol_seize_share(ctx: Context<SetRiskParameter>, share: u128) -> Result<()> {
    let engine = &mut ctx.accounts.risk_engine;
    let old_share = engine.protocol_seize_share;
    engine.set_protocol_seize_share(share)?;

    msg!(
        "protocol seize share: {} -> {}",
        display_wad(old_share),
        display_wad(share)
    );
    emit!(NewProtocolSeizeShare {
        old_share,
        new_share: share,
    });
    Ok(())
}
