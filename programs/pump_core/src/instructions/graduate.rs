//! Pool Graduation
//!
//! Permissionless: once a pool's SOL reserve reaches the platform threshold
//! anyone may close its curve. Graduated pools refuse every further trade.

use anchor_lang::prelude::*;

use crate::engine;
use crate::state::{PlatformConfig, Pool};

/// Event emitted when a pool leaves the bonding curve
#[event]
pub struct PoolGraduated {
    pub mint: Pubkey,
    pub sol_reserves: u64,
    pub token_reserves: u64,
    pub final_price: u64,
    pub final_market_cap: u64,
    pub timestamp: i64,
}

#[derive(Accounts)]
pub struct Graduate<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [PlatformConfig::SEED],
        bump = platform_config.bump,
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        mut,
        seeds = [Pool::SEED, pool.mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

impl<'info> Graduate<'info> {
    pub fn graduate(&mut self) -> Result<()> {
        engine::graduate(&mut self.pool, &self.platform_config)?;

        msg!("Pool graduated: {}", self.pool.mint);
        msg!("SOL reserves: {}", self.pool.sol_reserves);

        emit!(PoolGraduated {
            mint: self.pool.mint,
            sol_reserves: self.pool.sol_reserves,
            token_reserves: self.pool.token_reserves,
            final_price: self.pool.current_price,
            final_market_cap: self.pool.current_market_cap,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
