//! # Pump Core: Bonding Curve Token Launchpad
//!
//! Anyone can launch a token whose price is set by an on-chain bonding curve
//! and trade it against SOL until the pool graduates.
//!
//! ## How it works
//! - The admission gate limits how often and how many tokens a creator may launch.
//! - Each pool prices trades with a constant-product, linear or exponential curve.
//! - The trade executor locks the pool, prices against a snapshot, commits and unlocks.
//!

use anchor_lang::prelude::*;

pub mod amm;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod instructions;
pub mod state;

pub use instructions::*;

use crate::engine::{PriceQuote, TradeReceipt};
use crate::state::{ReportReason, SecurityParams, TradeSide};

// Replace with your deployed program ID
declare_id!("Fnocndi1uFyk1khFYFzmgH8J58NmK8DdnsvAj3mdvE2R");

/// Main launchpad program
#[program]
pub mod pump_core {
    use super::*;

    /// Initialize the platform with global configuration
    pub fn initialize_platform(
        ctx: Context<InitializePlatform>,
        fee_bps: u16,
        treasury: Pubkey,
        security: SecurityParams,
        min_initial_liquidity: u64,
        graduation_threshold: u64,
    ) -> Result<()> {
        ctx.accounts.initialize_platform(
            fee_bps,
            treasury,
            security,
            min_initial_liquidity,
            graduation_threshold,
            &ctx.bumps,
        )
    }

    /// Launch a token with its own pool
    pub fn create_token(ctx: Context<CreateToken>, params: CreateTokenParams) -> Result<()> {
        ctx.accounts.create_token(params, &ctx.bumps)
    }

    /// Buy tokens with SOL
    pub fn buy(ctx: Context<Trade>, sol_in: u64, min_tokens_out: u64) -> Result<TradeReceipt> {
        ctx.accounts.buy(sol_in, min_tokens_out, &ctx.bumps)
    }

    /// Sell tokens for SOL
    pub fn sell(ctx: Context<Trade>, tokens_in: u64, min_sol_out: u64) -> Result<TradeReceipt> {
        ctx.accounts.sell(tokens_in, min_sol_out, &ctx.bumps)
    }

    /// Preview a trade (read-only)
    pub fn get_quote(ctx: Context<GetQuote>, side: TradeSide, amount: u64) -> Result<PriceQuote> {
        ctx.accounts.get_quote(side, amount)
    }

    /// Move a pool past its bonding curve
    pub fn graduate(ctx: Context<Graduate>) -> Result<()> {
        ctx.accounts.graduate()
    }

    /// Change platform tunables (admin only)
    pub fn update_platform_config(
        ctx: Context<AdminConfig>,
        fee_bps: u16,
        treasury: Pubkey,
        security: SecurityParams,
        min_initial_liquidity: u64,
        graduation_threshold: u64,
    ) -> Result<()> {
        ctx.accounts.update_platform_config(
            fee_bps,
            treasury,
            security,
            min_initial_liquidity,
            graduation_threshold,
        )
    }

    /// Halt or resume trading on every pool (admin only)
    pub fn set_trading_halt(ctx: Context<AdminConfig>, halted: bool) -> Result<()> {
        ctx.accounts.set_trading_halt(halted)
    }

    /// Hand platform administration to another key (admin only)
    pub fn transfer_admin(ctx: Context<AdminConfig>, new_admin: Pubkey) -> Result<()> {
        ctx.accounts.transfer_admin(new_admin)
    }

    /// Move a creator's reputation by a bounded delta (admin only)
    pub fn adjust_creator_reputation(ctx: Context<CreatorAdmin>, delta: i32) -> Result<()> {
        ctx.accounts.adjust_creator_reputation(delta, &ctx.bumps)
    }

    /// Ban or unban a creator (admin only)
    pub fn set_creator_ban(ctx: Context<CreatorAdmin>, banned: bool) -> Result<()> {
        ctx.accounts.set_creator_ban(banned, &ctx.bumps)
    }

    /// Report a creator for suspicious activity
    pub fn report_suspicious_activity(
        ctx: Context<ReportActivity>,
        reason: ReportReason,
        description: String,
    ) -> Result<()> {
        ctx.accounts
            .report_suspicious_activity(reason, description, &ctx.bumps)
    }
}
