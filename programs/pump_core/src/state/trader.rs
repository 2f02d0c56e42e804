//! Trader Profile
//!
//! Per-wallet trading activity. Drives the trade cooldown and decides who
//! pays the whale tax.

use anchor_lang::prelude::*;

use crate::constants::TRADER_SEED;
use crate::errors::PumpError;

/// Seeds: ["trader", trader]
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct TraderProfile {
    pub trader: Pubkey,

    /// SOL moved across every committed trade (lamports, before fees)
    pub total_volume_sol: u64,

    pub trade_count: u64,

    /// Unix timestamp of the last committed trade (0 if none)
    pub last_trade_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl TraderProfile {
    pub const SEED: &'static [u8] = TRADER_SEED;

    pub fn ensure_initialized(&mut self, trader: Pubkey, bump: u8) {
        if self.trader == Pubkey::default() {
            self.trader = trader;
            self.bump = bump;
        }
    }

    /// Fails until `cooldown_secs` have passed since the last trade.
    pub fn ensure_cooled_down(&self, cooldown_secs: i64, now: i64) -> Result<()> {
        if self.trade_count > 0 {
            let ready_at = self.last_trade_at.saturating_add(cooldown_secs);
            require!(now >= ready_at, PumpError::TradeCooldownActive);
        }
        Ok(())
    }

    pub fn record_trade(&mut self, sol_volume: u64, now: i64) {
        self.total_volume_sol = self.total_volume_sol.saturating_add(sol_volume);
        self.trade_count = self.trade_count.saturating_add(1);
        self.last_trade_at = now;
    }
}
