//! Market creation instruction
//!
//! Markets start unlisted; `support_market` lists them. Ledger cash tracks
//! requested transfer amounts, so mints that withhold a transfer fee are
//! refused.

use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::extension::{
    BaseStateWithExtensions, ExtensionType, StateWithExtensions,
};
use anchor_spl::token_2022::spl_token_2022::state::Mint as MintState;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::LendingError;
use crate::events::MarketCreated;
use crate::math::display_wad;
use crate::state::{RiskEngine, Market};

#[derive(Accounts)]
pub struct CreateMarket<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, RiskEngine::SEED],
        bump = risk_engine.bump,
        constraint = risk_engine.admin == admin.key() @ LendingError::Unauthorized,
    )]
    pub risk_engine: Box<Account<'info, RiskEngine>>,

    #[account(
        init,
        payer = admin,
        space = Market::space(),
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, underlying_mint.key().as_ref()],
        bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        constraint = is_supported_mint(&underlying_mint.to_account_info().try_borrow_data()?)
            @ LendingError::UnsupportedMint,
    )]
    pub underlying_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = admin,
        token::mint = underlying_mint,
        token::authority = market,
        token::token_program = token_program,
        seeds = [PROGRAM_SEED_PREFIX, Market::VAULT_SEED, market.key().as_ref()],
        bump,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// Whether transfers of this mint always deliver the requested amount
pub fn is_supported_mint(mint_data: &[u8]) -> bool {
    StateWithExtensions::<MintState>::unpack(mint_data)
        .and_then(|mint| mint.get_extension_types())
        .map(|extensions| !extensions.contains(&ExtensionType::TransferFeeConfig))
        .unwrap_or(false)
}

pub fn create_market(ctx: Context<CreateMarket>, initial_exchange_rate: u128) -> Result<()> {
    require!(initial_exchange_rate > 0, LendingError::InvalidParameter);

    let market_key = ctx.accounts.market.key();
    let market = &mut ctx.accounts.market;
    market.bump = ctx.bumps.market;
    market.underlying_mint = ctx.accounts.underlying_mint.key();
    market.underlying_decimals = ctx.accounts.underlying_mint.decimals;
    market.vault_bump = ctx.bumps.vault;
    market.initial_exchange_rate = initial_exchange_rate;
    market.is_listed = false;
    market.collateral_factor = 0;
    market.total_shares = 0;
    market.total_cash = 0;
    market.total_borrows = 0;
    market.reserve_shares = 0;

    let engine = &mut ctx.accounts.risk_engine;
    let market_index = engine.market_count;
    engine.market_count = market_index
        .checked_add(1)
        .ok_or(LendingError::MathOverflow)?;

    msg!(
        "market {} created, initial exchange rate {}",
        market_key,
        display_wad(initial_exchange_rate)
    );
    emit!(MarketCreated {
        market: market_key,
        market_index,
        underlying_mint: market.underlying_mint,
        initial_exchange_rate,
    });

    Ok(())
}
