//! State account structures

pub mod risk_engine;
pub mod market;
pub mod position;
pub mod account_markets;
pub mod price_oracle;

pub use risk_engine::*;
pub use market::*;
pub use position::*;
pub use account_markets::*;
pub use price_oracle::*;
