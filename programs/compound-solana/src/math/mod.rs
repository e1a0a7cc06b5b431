//! Math library modules for safe arithmetic operations

pub mod safe_math;
pub mod wad;
pub mod shares;

pub use safe_math::*;
pub use wad::*;
pub use shares::*;
