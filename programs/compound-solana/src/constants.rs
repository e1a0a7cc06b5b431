//! Protocol constants and configuration parameters

/// Program-specific seed prefix for all PDAs
pub const PROGRAM_SEED_PREFIX: &[u8] = b"compound_v1";

// === Fixed-Point Constants ===

/// WAD = 1e18 (protocol-wide fixed-point scale)
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Exchange rate of a market with no outstanding shares, unless the market
/// was created with its own initial rate
pub const INITIAL_EXCHANGE_RATE: u128 = WAD;

// === Risk Parameter Defaults ===

/// Default close factor (50% of one debt position per liquidation)
pub const DEFAULT_CLOSE_FACTOR: u128 = WAD / 2;

/// Default liquidation incentive (1.0 = no bonus until configured)
pub const DEFAULT_LIQUIDATION_INCENTIVE: u128 = WAD;

/// Default share of seized collateral retained by the protocol (2.8%)
pub const DEFAULT_PROTOCOL_SEIZE_SHARE: u128 = 28_000_000_000_000_000;

// === Risk Parameter Bounds ===

/// Collateral factor must stay strictly below this value
pub const COLLATERAL_FACTOR_CEILING: u128 = WAD;

/// Close factor upper bound (inclusive)
pub const MAX_CLOSE_FACTOR: u128 = WAD;

/// Liquidation incentive lower bound (inclusive)
pub const MIN_LIQUIDATION_INCENTIVE: u128 = WAD;

/// Protocol seize share must stay strictly below this value
pub const PROTOCOL_SEIZE_SHARE_CEILING: u128 = WAD;

// === Account Limits ===

/// Markets an account can hold as collateral (and, separately, as debt)
pub const MAX_ACCOUNT_MARKETS: usize = 16;

/// Markets a single price oracle account can quote
pub const MAX_ORACLE_PRICES: usize = 32;

// === Repay Sentinel ===

/// Passing this amount to `repay_borrow` repays the whole outstanding principal
pub const REPAY_ALL: u128 = u128::MAX;

// === Safe Math Constants ===

/// Maximum value that fits in u64
pub const MAX_U64: u128 = u64::MAX as u128;
