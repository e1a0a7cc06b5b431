//! Price oracle instructions
//!
//! The oracle is a plain admin-fed price table. Anyone may create one for
//! themselves; the risk engine only reads the one its admin selected.

use anchor_lang::prelude::*;
use crate::constants::{PROGRAM_SEED_PREFIX, MAX_ORACLE_PRICES};
use crate::errors::LendingError;
use crate::events::{PriceOracleInitialized, PricePosted};
use crate::math::display_wad;
use crate::state::{PriceOracle, PriceEntry};

#[derive(Accounts)]
pub struct InitializePriceOracle<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = PriceOracle::space(),
        seeds = [PROGRAM_SEED_PREFIX, PriceOracle::SEED, admin.key().as_ref()],
        bump,
    )]
    pub price_oracle: Account<'info, PriceOracle>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_price_oracle(ctx: Context<InitializePriceOracle>) -> Result<()> {
    let oracle = &mut ctx.accounts.price_oracle;
    oracle.bump = ctx.bumps.price_oracle;
    oracle.admin = ctx.accounts.admin.key();
    oracle.count = 0;
    oracle.prices = [PriceEntry::default(); MAX_ORACLE_PRICES];

    emit!(PriceOracleInitialized {
        oracle: oracle.key(),
        admin: oracle.admin,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetUnderlyingPrice<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, PriceOracle::SEED, admin.key().as_ref()],
        bump = price_oracle.bump,
        constraint = price_oracle.admin == admin.key() @ LendingError::Unauthorized,
    )]
    pub price_oracle: Account<'info, PriceOracle>,
}

/// Post `price` (WAD) for `market`. A zero price marks it unusable.
pub fn set_underlying_price(
    ctx: Context<SetUnderlyingPrice>,
    market: Pubkey,
    price: u128,
) -> Result<()> {
    let oracle = &mut ctx.accounts.price_oracle;
    let previous_price = oracle.set_price(market, price)?;

    msg!("price {}: {}", market, display_wad(price));
    emit!(PricePosted {
        oracle: oracle.key(),
        market,
        previous_price,
        new_price: price,
    });
    Ok(())
}
