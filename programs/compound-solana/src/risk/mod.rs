//! Risk engine computations spanning multiple markets

pub mod liquidity;
pub mod liquidation;
pub mod snapshot;

pub use liquidity::*;
pub use liquidation::*;
pub use snapshot::*;
