//! Global Platform Configuration
//!
//! This account stores platform-wide settings read by the admission gate and
//! the trade executor. Only the admin can change it.

use anchor_lang::prelude::*;

use crate::constants::{
    BPS_DENOMINATOR, FAST_PATH_LIMIT, MAX_CREATION_COOLDOWN_SECS, MAX_PLATFORM_FEE_BPS,
    MAX_TRADE_COOLDOWN_SECS, MAX_WHALE_TAX_BPS, PLATFORM_CONFIG_SEED,
};
use crate::errors::PumpError;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["platform_config"]
#[account]
#[derive(InitSpace, Debug)]
pub struct PlatformConfig {
    /// Platform administrator
    pub admin: Pubkey,

    /// Receives platform trade fees
    pub treasury: Pubkey,

    /// Platform trade fee in basis points (max 1000 = 10%)
    pub fee_bps: u16,

    /// Anti-abuse limits
    pub security: SecurityParams,

    /// Emergency switch halting every pool, independent of per-pool locks
    pub trading_locked: bool,

    /// Minimum SOL a creator must seed a new pool with (lamports)
    pub min_initial_liquidity: u64,

    /// SOL reserves a pool needs before it can graduate (lamports)
    pub graduation_threshold: u64,

    pub total_tokens_created: u64,
    pub total_trades: u64,
    pub total_volume_sol: u64,
    pub total_fees_collected: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl PlatformConfig {
    pub const SEED: &'static [u8] = PLATFORM_CONFIG_SEED;

    /// Validate the admin-supplied tunables shared by initialize and update.
    pub fn validate_params(
        fee_bps: u16,
        security: &SecurityParams,
        graduation_threshold: u64,
    ) -> Result<()> {
        require!(fee_bps <= MAX_PLATFORM_FEE_BPS, PumpError::InvalidPlatformParams);
        require!(graduation_threshold > 0, PumpError::InvalidPlatformParams);
        security.validate()
    }

    /// Record a completed trade in the platform counters.
    pub fn record_trade(&mut self, sol_volume: u64, fee: u64) {
        self.total_trades = self.total_trades.saturating_add(1);
        self.total_volume_sol = self.total_volume_sol.saturating_add(sol_volume);
        self.total_fees_collected = self.total_fees_collected.saturating_add(fee);
    }
}

/// Anti-abuse limits applied at creation and trade time
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct SecurityParams {
    /// Largest SOL amount a single trade may move (lamports)
    pub max_trade_size: u64,

    /// Largest share of total supply one holder may reach, in basis points
    pub max_wallet_percentage: u16,

    /// Lifetime cap on launches per creator
    pub max_tokens_per_creator: u32,

    /// Reputation a creator needs before launching
    pub min_reputation_to_create: u32,

    /// Minimum delay between two launches by the same creator
    pub creation_cooldown_secs: i64,

    /// Trades moving at least this much SOL, or by wallets whose lifetime
    /// volume reached it, pay the whale tax (lamports)
    pub whale_threshold: u64,

    /// Extra fee on whale trades, paid to the treasury (basis points)
    pub whale_tax_bps: u16,

    /// Minimum delay between two trades by the same wallet
    pub trade_cooldown_secs: i64,

    /// Largest spot price move one trade may cause (basis points)
    pub max_price_impact_bps: u16,
}

impl SecurityParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.max_trade_size > 0 && self.max_trade_size <= FAST_PATH_LIMIT,
            PumpError::InvalidPlatformParams
        );
        require!(
            self.max_wallet_percentage >= 1 && self.max_wallet_percentage <= 10_000,
            PumpError::InvalidPlatformParams
        );
        require!(self.max_tokens_per_creator >= 1, PumpError::InvalidPlatformParams);
        require!(
            (0..=MAX_CREATION_COOLDOWN_SECS).contains(&self.creation_cooldown_secs),
            PumpError::InvalidPlatformParams
        );
        require!(self.whale_threshold > 0, PumpError::InvalidPlatformParams);
        require!(
            self.whale_tax_bps <= MAX_WHALE_TAX_BPS,
            PumpError::InvalidPlatformParams
        );
        require!(
            (0..=MAX_TRADE_COOLDOWN_SECS).contains(&self.trade_cooldown_secs),
            PumpError::InvalidPlatformParams
        );
        require!(
            self.max_price_impact_bps >= 1 && self.max_price_impact_bps as u64 <= BPS_DENOMINATOR,
            PumpError::InvalidPlatformParams
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_pump_error;

    fn security() -> SecurityParams {
        SecurityParams {
            max_trade_size: 100_000_000_000,
            max_wallet_percentage: 500,
            max_tokens_per_creator: 3,
            min_reputation_to_create: 10,
            creation_cooldown_secs: 60,
            whale_threshold: 10_000_000_000,
            whale_tax_bps: 200,
            trade_cooldown_secs: 5,
            max_price_impact_bps: 1_000,
        }
    }

    #[test]
    fn test_valid_params_accepted() {
        assert!(PlatformConfig::validate_params(100, &security(), 85_000_000_000).is_ok());
    }

    #[test]
    fn test_fee_above_cap_rejected() {
        assert_pump_error(
            PlatformConfig::validate_params(1_001, &security(), 1),
            PumpError::InvalidPlatformParams,
        );
    }

    #[test]
    fn test_trade_size_must_stay_on_fast_path() {
        let mut params = security();
        params.max_trade_size = FAST_PATH_LIMIT + 1;
        assert_pump_error(params.validate(), PumpError::InvalidPlatformParams);

        params.max_trade_size = 0;
        assert_pump_error(params.validate(), PumpError::InvalidPlatformParams);
    }

    #[test]
    fn test_wallet_percentage_bounds() {
        let mut params = security();
        params.max_wallet_percentage = 0;
        assert_pump_error(params.validate(), PumpError::InvalidPlatformParams);

        params.max_wallet_percentage = 10_001;
        assert_pump_error(params.validate(), PumpError::InvalidPlatformParams);

        params.max_wallet_percentage = 10_000;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_trade_side_limits() {
        let mut params = security();
        params.whale_tax_bps = MAX_WHALE_TAX_BPS + 1;
        assert_pump_error(params.validate(), PumpError::InvalidPlatformParams);

        let mut params = security();
        params.whale_threshold = 0;
        assert_pump_error(params.validate(), PumpError::InvalidPlatformParams);

        let mut params = security();
        params.trade_cooldown_secs = -1;
        assert_pump_error(params.validate(), PumpError::InvalidPlatformParams);
        params.trade_cooldown_secs = MAX_TRADE_COOLDOWN_SECS + 1;
        assert_pump_error(params.validate(), PumpError::InvalidPlatformParams);

        let mut params = security();
        params.max_price_impact_bps = 0;
        assert_pump_error(params.validate(), PumpError::InvalidPlatformParams);
        params.max_price_impact_bps = 10_001;
        assert_pump_error(params.validate(), PumpError::InvalidPlatformParams);
        params.max_price_impact_bps = 10_000;
        assert!(params.validate().is_ok());
    }
}
