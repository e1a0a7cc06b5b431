//! Instruction handlers for the lending protocol

pub mod admin;
pub mod oracle;
pub mod market;
pub mod position;
pub mod membership;
pub mod supply;
pub mod borrow;
pub mod liquidate;
pub mod utils;

pub use admin::*;
pub use oracle::*;
pub use market::*;
pub use position::*;
pub use membership::*;
pub use supply::*;
pub use borrow::*;
pub use liquidate::*;
pub use utils::*;
