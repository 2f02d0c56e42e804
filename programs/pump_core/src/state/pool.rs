//! Bonding Curve Pool State
//!
//! Each launched token owns exactly one pool: a two-asset reserve record
//! (SOL and the token) priced by the curve chosen at creation.

use anchor_lang::prelude::*;

use crate::amm::PoolReserves;
use crate::constants::POOL_SEED;

/// Per-token pool account
///
/// Seeds: ["pool", mint]
///
/// The pool PDA holds the SOL reserve as lamports, is the mint authority of
/// `mint` and owns the vault holding `token_reserves`.
#[account]
#[derive(InitSpace, Debug)]
pub struct Pool {
    /// Mint of the launched token
    pub mint: Pubkey,

    /// Launching creator
    pub creator: Pubkey,

    /// SOL held by the curve (lamports)
    pub sol_reserves: u64,

    /// Tokens still held by the curve (base units)
    pub token_reserves: u64,

    /// Total minted supply (base units)
    pub total_supply: u64,

    /// Pricing function
    pub curve: CurveParams,

    /// Spot price after the last trade (lamports per base unit, scaled by 10^9)
    pub current_price: u64,

    /// `current_price * circulating supply`, saturating (lamports)
    pub current_market_cap: u64,

    /// Per-pool reentrancy guard
    pub trading_locked: bool,

    /// Terminal flag: the curve no longer trades
    pub graduated: bool,

    pub total_volume_sol: u64,
    pub trade_count: u64,

    /// Unix timestamp of creation
    pub created_at: i64,

    /// Unix timestamp of the last committed trade
    pub last_trade_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl Pool {
    pub const SEED: &'static [u8] = POOL_SEED;

    /// Snapshot of the fields the curve engine prices against
    pub fn reserves(&self) -> PoolReserves {
        PoolReserves {
            sol: self.sol_reserves,
            token: self.token_reserves,
            total_supply: self.total_supply,
            price: self.current_price,
        }
    }
}

/// Curve variant chosen by the creator
///
/// Closed set: adding a variant forces every pricing match to handle it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum CurveParams {
    /// `sol_reserves * token_reserves = k`; the fee is kept in the pool
    ConstantProduct { fee_bps: u16 },

    /// `price = base_price + slope * circulating / 10^9`
    Linear { base_price: u64, slope: u64 },

    /// `price = base_price * exp(growth_rate / 10^18 * circulating)`
    Exponential { base_price: u64, growth_rate: u64 },
}

impl CurveParams {
    pub fn name(&self) -> &'static str {
        match self {
            CurveParams::ConstantProduct { .. } => "constant_product",
            CurveParams::Linear { .. } => "linear",
            CurveParams::Exponential { .. } => "exponential",
        }
    }
}

/// Direction of a trade against the curve
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TradeSide {
    /// SOL in, tokens out
    Buy,
    /// Tokens in, SOL out
    Sell,
}
