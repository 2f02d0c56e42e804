//! Read-only price quotes
//!
//! No account is writable, so quoting never takes a write lock on the pool
//! and can be simulated freely by clients.

use anchor_lang::prelude::*;

use crate::engine::{self, PriceQuote};
use crate::state::{PlatformConfig, Pool, TradeSide, TraderProfile};

#[derive(Accounts)]
pub struct GetQuote<'info> {
    #[account(
        seeds = [PlatformConfig::SEED],
        bump = platform_config.bump,
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        seeds = [Pool::SEED, pool.mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    /// Caller's trading record, if any; decides the whale tax
    pub trader_profile: Option<Account<'info, TraderProfile>>,
}

impl<'info> GetQuote<'info> {
    pub fn get_quote(&self, side: TradeSide, amount: u64) -> Result<PriceQuote> {
        let trader_volume = self
            .trader_profile
            .as_ref()
            .map_or(0, |profile| profile.total_volume_sol);
        engine::quote(&self.pool, &self.platform_config, trader_volume, side, amount)
    }
}
