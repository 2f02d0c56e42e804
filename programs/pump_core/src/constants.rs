//! Protocol-wide constants
//!
//! Fixed-point scales, parameter bounds and PDA seeds shared by the pure
//! pricing layer and the instruction handlers.

/// Prices are lamports per token base unit, scaled by this factor.
pub const PRICE_SCALE: u64 = 1_000_000_000;

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Platform fee cap (10%)
pub const MAX_PLATFORM_FEE_BPS: u16 = 1_000;

/// Constant-product curve fee cap (10%)
pub const MAX_CURVE_FEE_BPS: u16 = 1_000;

/// Decimals of every mint created by the program
pub const TOKEN_DECIMALS: u8 = 9;

/// One whole token in base units. Linear slopes are expressed per whole token.
pub const TOKEN_UNIT: u64 = 1_000_000_000;

/// Upper bound on the total supply of a launched token (10^9 tokens)
pub const MAX_TOTAL_SUPPLY: u64 = 1_000_000_000_000_000_000;

/// Reserves and amounts at or below this bound take the unchecked fast path.
///
/// Any two values `<= u64::MAX / 2` multiply to less than 2^126 and add to
/// less than 2^64.
pub const FAST_PATH_LIMIT: u64 = u64::MAX / 2;

/// Largest `growth_rate * total_supply / 10^18` an exponential curve may reach.
pub const MAX_EXPONENT: u64 = 40;

/// Smallest base price an exponential curve may start from.
///
/// Sells round the new price up, so a price within a few units of 1 can never
/// fall far enough to pay out a lamport.
pub const MIN_EXPONENTIAL_BASE_PRICE: u64 = 1_000;

/// Longest allowed creation cooldown (one day)
pub const MAX_CREATION_COOLDOWN_SECS: i64 = 86_400;

/// Longest allowed pause between two trades by the same wallet (one hour)
pub const MAX_TRADE_COOLDOWN_SECS: i64 = 3_600;

/// Whale tax cap (10%)
pub const MAX_WHALE_TAX_BPS: u16 = 1_000;

/// Reputation scores live in 0..=100
pub const MAX_REPUTATION: u32 = 100;

/// Largest reputation change a single admin call may apply
pub const MAX_REPUTATION_DELTA: u32 = 50;

/// Creators whose reputation falls below this are banned automatically
pub const REPUTATION_BAN_THRESHOLD: u32 = 10;

/// Reports at or above this risk score are flagged for review
pub const HIGH_RISK_SCORE: u8 = 80;

pub const MAX_REPORT_DESCRIPTION_LEN: usize = 500;
pub const MIN_REPORT_DESCRIPTION_LEN: usize = 10;

pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;
pub const MAX_URI_LEN: usize = 200;

pub const PLATFORM_CONFIG_SEED: &[u8] = b"platform_config";
pub const POOL_SEED: &[u8] = b"pool";
pub const CREATOR_SEED: &[u8] = b"creator";
pub const TRADER_SEED: &[u8] = b"trader";
pub const REPORT_SEED: &[u8] = b"report";
