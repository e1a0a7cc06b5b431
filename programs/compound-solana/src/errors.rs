use anchor_lang::prelude::*;

#[error_code]
pub enum LendingError {
    // === Authorization Errors ===
    #[msg("Caller is not authorized to perform this action")]
    Unauthorized,

    // === Input Validation Errors ===
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Risk parameter out of its allowed range")]
    InvalidParameter,

    #[msg("Oracle account does not match the configured price oracle")]
    InvalidOracle,

    #[msg("Token account does not belong to the expected owner or mint")]
    InvalidTokenAccount,

    #[msg("Mint charges transfer fees and cannot back a market")]
    UnsupportedMint,

    // === Market Errors ===
    #[msg("Market is not listed")]
    MarketNotListed,

    #[msg("Debt and collateral market must differ")]
    SameMarketLiquidation,

    // === Membership Errors ===
    #[msg("Maximum number of markets reached for this account")]
    MaxMarketsEntered,

    #[msg("A market the account participates in was not supplied")]
    MissingMarketAccount,

    #[msg("Supplied market account is not part of this account's markets")]
    UnexpectedMarketAccount,

    #[msg("Supplied position does not belong to this account and market")]
    PositionMismatch,

    #[msg("Position is not empty, cannot close")]
    PositionNotEmpty,

    #[msg("Position market is still entered or borrowed")]
    PositionInUse,

    // === Balance Errors ===
    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Insufficient market liquidity")]
    InsufficientLiquidity,

    #[msg("Insufficient collateral")]
    InsufficientCollateral,

    #[msg("No outstanding borrow to repay")]
    NoOutstandingBorrow,

    // === Liquidation Errors ===
    #[msg("Account has no shortfall, cannot liquidate")]
    NotEligible,

    #[msg("Repay amount exceeds the close factor limit")]
    RepayTooMuch,

    #[msg("Borrower holds fewer collateral shares than the seize amount")]
    InsufficientCollateralToSeize,

    #[msg("Liquidator cannot be the borrower")]
    SelfLiquidation,

    // === Oracle Errors ===
    #[msg("Oracle has no usable price for this market")]
    PriceNotAvailable,

    #[msg("Oracle has no room for another market")]
    OracleFull,

    // === Math Errors ===
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Amount exceeds u64 maximum")]
    AmountOverflow,
}
