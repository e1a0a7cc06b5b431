//! Admin-fed price oracle account
//!
//! Maps market accounts to WAD prices (value of one underlying unit in the
//! common denomination). A missing or zero price is unusable.

use anchor_lang::prelude::*;
use crate::constants::{PROGRAM_SEED_PREFIX, MAX_ORACLE_PRICES};
use crate::errors::LendingError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct PriceEntry {
    pub market: Pubkey,
    pub price: u128,
}

/// PDA Seeds: [PROGRAM_SEED_PREFIX, b"price_oracle", admin]
#[account]
pub struct PriceOracle {
    /// PDA bump seed
    pub bump: u8,

    /// Only signer allowed to post prices
    pub admin: Pubkey,

    /// Number of quoted markets (active count in the array)
    pub count: u8,

    /// Fixed-size array for predictable account size
    pub prices: [PriceEntry; MAX_ORACLE_PRICES],
}

impl PriceOracle {
    pub const SEED: &'static [u8] = b"price_oracle";

    pub fn space() -> usize {
        8 +                                 // discriminator
        1 +                                 // bump
        32 +                                // admin
        1 +                                 // count
        ((32 + 16) * MAX_ORACLE_PRICES)     // prices
    }

    fn quoted(&self) -> &[PriceEntry] {
        &self.prices[..self.count as usize]
    }

    /// Usable price for `market`, None when absent or zero
    pub fn price_of(&self, market: &Pubkey) -> Option<u128> {
        self.quoted()
            .iter()
            .find(|entry| entry.market == *market)
            .map(|entry| entry.price)
            .filter(|price| *price > 0)
    }

    /// Insert or overwrite the price for `market`, returning the old value
    pub fn set_price(&mut self, market: Pubkey, price: u128) -> Result<u128> {
        let count = self.count as usize;
        if let Some(entry) = self.prices[..count].iter_mut().find(|e| e.market == market) {
            let previous = entry.price;
            entry.price = price;
            return Ok(previous);
        }

        require!(count < MAX_ORACLE_PRICES, LendingError::OracleFull);
        self.prices[count] = PriceEntry { market, price };
        self.count += 1;
        Ok(0)
    }
}

/// Derive price oracle PDA
pub fn derive_price_oracle(program_id: &Pubkey, admin: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, PriceOracle::SEED, admin.as_ref()],
        program_id,
    )
}
