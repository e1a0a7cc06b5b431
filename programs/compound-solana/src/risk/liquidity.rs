//! Cross-market account liquidity
//!
//! Collateral side: Σ floor(floor(floor(cf * er) * price) * shares) over
//! entered markets. Debt side: Σ floor(price * principal) over every market
//! with a borrow. Each product is divided by WAD before the next.

use anchor_lang::prelude::*;
use crate::math::{checked_add, wad_mul_down};

/// Valuation inputs for one market the account participates in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSnapshot {
    pub market: Pubkey,
    pub supply_shares: u128,
    pub borrow_principal: u128,
    pub exchange_rate: u128,
    pub collateral_factor: u128,
    pub price: u128,
    /// Whether the market is entered, i.e. its shares back borrows
    pub is_collateral: bool,
}

impl AssetSnapshot {
    /// Borrowing power of a single share: cf * er * price
    pub fn tokens_to_denom(&self) -> Result<u128> {
        wad_mul_down(
            wad_mul_down(self.collateral_factor, self.exchange_rate)?,
            self.price,
        )
    }
}

/// Pending action evaluated as if it had already happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HypotheticalEffect {
    pub market: Pubkey,
    pub redeem_shares: u128,
    pub borrow_amount: u128,
}

impl HypotheticalEffect {
    pub fn redeem(market: Pubkey, shares: u128) -> Self {
        Self { market, redeem_shares: shares, borrow_amount: 0 }
    }

    pub fn borrow(market: Pubkey, amount: u128) -> Self {
        Self { market, redeem_shares: 0, borrow_amount: amount }
    }
}

/// At most one of the two fields is nonzero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountLiquidity {
    pub liquidity: u128,
    pub shortfall: u128,
}

impl AccountLiquidity {
    pub fn has_shortfall(&self) -> bool {
        self.shortfall > 0
    }
}

/// Liquidity of an account from its current snapshots
pub fn account_liquidity(assets: &[AssetSnapshot]) -> Result<AccountLiquidity> {
    hypothetical_liquidity(assets, None)
}

/// Liquidity of an account as if `effect` were applied
///
/// A redeem is only charged when the target market is entered as
/// collateral. A borrow is charged at the target market's price.
pub fn hypothetical_liquidity(
    assets: &[AssetSnapshot],
    effect: Option<&HypotheticalEffect>,
) -> Result<AccountLiquidity> {
    let mut collateral = 0u128;
    let mut debt = 0u128;

    for asset in assets {
        let tokens_to_denom = asset.tokens_to_denom()?;

        if asset.is_collateral {
            collateral = checked_add(collateral, wad_mul_down(tokens_to_denom, asset.supply_shares)?)?;
        }
        debt = checked_add(debt, wad_mul_down(asset.price, asset.borrow_principal)?)?;

        if let Some(effect) = effect.filter(|e| e.market == asset.market) {
            if asset.is_collateral {
                debt = checked_add(debt, wad_mul_down(tokens_to_denom, effect.redeem_shares)?)?;
            }
            debt = checked_add(debt, wad_mul_down(asset.price, effect.borrow_amount)?)?;
        }
    }

    Ok(if collateral >= debt {
        AccountLiquidity { liquidity: collateral - debt, shortfall: 0 }
    } else {
        AccountLiquidity { liquidity: 0, shortfall: debt - collateral }
    })
}
