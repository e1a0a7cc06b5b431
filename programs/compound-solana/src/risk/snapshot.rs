//! Loading asset snapshots from instruction accounts
//!
//! Markets an account participates in beyond the instruction's named ones
//! arrive as `(Market, Position)` pairs in `remaining_accounts`. Every
//! market in the account's membership must be covered exactly once.

use anchor_lang::prelude::*;
use anchor_lang::error::ErrorCode;
use crate::errors::LendingError;
use crate::state::{AccountMarkets, Market, Position, PriceOracle};
use super::AssetSnapshot;

/// A market already deserialized by the instruction
pub struct KnownMarket<'a> {
    pub key: Pubkey,
    pub market: &'a Market,
    pub position: &'a Position,
}

impl<'a> KnownMarket<'a> {
    pub fn new(key: Pubkey, market: &'a Market, position: &'a Position) -> Self {
        Self { key, market, position }
    }
}

/// Deserialize an account this program owns, checking its discriminator
pub fn load_program_account<T: AccountDeserialize>(info: &AccountInfo) -> Result<T> {
    if info.owner != &crate::ID {
        return Err(ErrorCode::AccountOwnedByWrongProgram.into());
    }
    let data = info.try_borrow_data()?;
    let mut bytes: &[u8] = &data[..];
    T::try_deserialize(&mut bytes)
}

fn snapshot(
    key: Pubkey,
    market: &Market,
    position: &Position,
    owner: &Pubkey,
    membership: &AccountMarkets,
    oracle: &PriceOracle,
) -> Result<AssetSnapshot> {
    require!(
        position.market == key && position.owner == *owner,
        LendingError::PositionMismatch
    );
    let price = oracle
        .price_of(&key)
        .ok_or(LendingError::PriceNotAvailable)?;

    Ok(AssetSnapshot {
        market: key,
        supply_shares: position.supply_shares,
        borrow_principal: position.borrow_principal,
        exchange_rate: market.exchange_rate()?,
        collateral_factor: market.collateral_factor,
        price,
        is_collateral: membership.is_entered(&key),
    })
}

/// Snapshot every market `owner` participates in, plus the `known` ones
pub fn load_snapshots(
    remaining: &[AccountInfo],
    owner: &Pubkey,
    membership: &AccountMarkets,
    oracle: &PriceOracle,
    known: &[KnownMarket],
) -> Result<Vec<AssetSnapshot>> {
    require!(remaining.len() % 2 == 0, LendingError::MissingMarketAccount);

    let mut snapshots = Vec::with_capacity(known.len() + remaining.len() / 2);
    for k in known {
        if snapshots.iter().any(|s: &AssetSnapshot| s.market == k.key) {
            continue;
        }
        snapshots.push(snapshot(k.key, k.market, k.position, owner, membership, oracle)?);
    }

    for pair in remaining.chunks(2) {
        let key = *pair[0].key;
        require!(membership.is_member(&key), LendingError::UnexpectedMarketAccount);
        require!(
            !snapshots.iter().any(|s| s.market == key),
            LendingError::UnexpectedMarketAccount
        );

        let market: Market = load_program_account(&pair[0])?;
        let position: Position = load_program_account(&pair[1])?;
        snapshots.push(snapshot(key, &market, &position, owner, membership, oracle)?);
    }

    for market in membership.liquidity_markets() {
        require!(
            snapshots.iter().any(|s| s.market == market),
            LendingError::MissingMarketAccount
        );
    }

    Ok(snapshots)
}
