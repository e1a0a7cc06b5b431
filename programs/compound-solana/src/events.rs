use anchor_lang::prelude::*;

// === Risk Engine Events ===

#[event]
pub struct RiskEngineInitialized {
    pub admin: Pubkey,
    pub close_factor: u128,
    pub liquidation_incentive: u128,
    pub protocol_seize_share: u128,
}

#[event]
pub struct AdminTransferStarted {
    pub current_admin: Pubkey,
    pub pending_admin: Pubkey,
}

#[event]
pub struct AdminTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
}

#[event]
pub struct NewPriceOracle {
    pub old_oracle: Pubkey,
    pub new_oracle: Pubkey,
}

#[event]
pub struct NewCloseFactor {
    pub old_close_factor: u128,
    pub new_close_factor: u128,
}

#[event]
pub struct NewLiquidationIncentive {
    pub old_incentive: u128,
    pub new_incentive: u128,
}

#[event]
pub struct NewProtocolSeizeShare {
    pub old_share: u128,
    pub new_share: u128,
}

// === Market Events ===

#[event]
pub struct MarketCreated {
    pub market: Pubkey,
    pub market_index: u64,
    pub underlying_mint: Pubkey,
    pub initial_exchange_rate: u128,
}

#[event]
pub struct MarketListed {
    pub market: Pubkey,
}

#[event]
pub struct NewCollateralFactor {
    pub market: Pubkey,
    pub old_collateral_factor: u128,
    pub new_collateral_factor: u128,
}

#[event]
pub struct ReservesClaimed {
    pub market: Pubkey,
    pub recipient: Pubkey,
    pub shares: u128,
}

// === Oracle Events ===

#[event]
pub struct PriceOracleInitialized {
    pub oracle: Pubkey,
    pub admin: Pubkey,
}

#[event]
pub struct PricePosted {
    pub oracle: Pubkey,
    pub market: Pubkey,
    pub previous_price: u128,
    pub new_price: u128,
}

// === Membership Events ===

#[event]
pub struct MarketEntered {
    pub market: Pubkey,
    pub account: Pubkey,
}

#[event]
pub struct MarketExited {
    pub market: Pubkey,
    pub account: Pubkey,
}

// === Position Events ===

#[event]
pub struct PositionCreated {
    pub market: Pubkey,
    pub owner: Pubkey,
}

#[event]
pub struct PositionClosed {
    pub market: Pubkey,
    pub owner: Pubkey,
}

// === Supply Events ===

#[event]
pub struct Supply {
    pub market: Pubkey,
    pub supplier: Pubkey,
    pub amount: u128,
    pub shares: u128,
}

#[event]
pub struct Withdraw {
    pub market: Pubkey,
    pub redeemer: Pubkey,
    pub receiver: Pubkey,
    pub amount: u128,
    pub shares: u128,
}

// === Borrow Events ===

#[event]
pub struct Borrow {
    pub market: Pubkey,
    pub borrower: Pubkey,
    pub receiver: Pubkey,
    pub amount: u128,
    pub account_borrows: u128,
    pub total_borrows: u128,
}

#[event]
pub struct RepayBorrow {
    pub market: Pubkey,
    pub payer: Pubkey,
    pub borrower: Pubkey,
    pub amount: u128,
    pub account_borrows: u128,
    pub total_borrows: u128,
}

// === Liquidation Events ===

#[event]
pub struct LiquidateBorrow {
    pub liquidator: Pubkey,
    pub borrower: Pubkey,
    pub debt_market: Pubkey,
    pub collateral_market: Pubkey,
    pub repay_amount: u128,
    pub seize_shares: u128,
    pub liquidator_shares: u128,
    pub protocol_shares: u128,
}

// === View Events ===

#[event]
pub struct AccountLiquidityComputed {
    pub account: Pubkey,
    pub liquidity: u128,
    pub shortfall: u128,
}
