//! State structures for the launchpad program

pub mod config;
pub mod creator;
pub mod pool;
pub mod report;
pub mod trader;

pub use config::*;
pub use creator::*;
pub use pool::*;
pub use report::*;
pub use trader::*;
