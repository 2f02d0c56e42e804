//! Instruction handlers for the launchpad
//!
//! Each instruction represents an action users can take:
//! - `initialize` - Set up the platform (admin only, once)
//! - `create_token` - Launch a token with its own bonding curve (permissionless)
//! - `trade` - Buy/sell against a pool
//! - `quote` - Preview a trade without writing anything
//! - `graduate` - Close a pool's curve once it is deep enough
//! - `admin` - Tunables, trading halt, creator reputation and bans
//! - `report` - Flag a creator for suspicious activity

pub mod admin;
pub mod create_token;
pub mod graduate;
pub mod initialize;
pub mod quote;
pub mod report;
pub mod trade;

pub use admin::*;
pub use create_token::*;
pub use graduate::*;
pub use initialize::*;
pub use quote::*;
pub use report::*;
pub use trade::*;
