//! State transitions over pool and creator accounts
//!
//! - `admission` - creation checks and quota accounting
//! - `executor` - locked buy/sell, read-only quotes, graduation

pub mod admission;
pub mod executor;

pub use admission::*;
pub use executor::*;
