//! Platform Initialization
//!
//! Creates the singleton configuration account. Called once at deployment;
//! the signer becomes the platform admin.

use anchor_lang::prelude::*;

use crate::state::{PlatformConfig, SecurityParams};

/// Event emitted once the platform is configured
#[event]
pub struct PlatformInitialized {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub fee_bps: u16,
    pub graduation_threshold: u64,
}

/// Accounts required for platform initialization
#[derive(Accounts)]
pub struct InitializePlatform<'info> {
    /// Platform administrator (pays for the config account)
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global configuration account (created)
    #[account(
        init,
        payer = admin,
        space = 8 + PlatformConfig::INIT_SPACE,
        seeds = [PlatformConfig::SEED],
        bump,
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> InitializePlatform<'info> {
    pub fn initialize_platform(
        &mut self,
        fee_bps: u16,
        treasury: Pubkey,
        security: SecurityParams,
        min_initial_liquidity: u64,
        graduation_threshold: u64,
        bumps: &InitializePlatformBumps,
    ) -> Result<()> {
        PlatformConfig::validate_params(fee_bps, &security, graduation_threshold)?;

        self.platform_config.set_inner(PlatformConfig {
            admin: self.admin.key(),
            treasury,
            fee_bps,
            security,
            trading_locked: false,
            min_initial_liquidity,
            graduation_threshold,
            total_tokens_created: 0,
            total_trades: 0,
            total_volume_sol: 0,
            total_fees_collected: 0,
            bump: bumps.platform_config,
        });

        msg!("Platform initialized");
        msg!("Admin: {}", self.admin.key());
        msg!("Treasury: {}", treasury);
        msg!("Fee: {} bps", fee_bps);

        emit!(PlatformInitialized {
            admin: self.admin.key(),
            treasury,
            fee_bps,
            graduation_threshold,
        });

        Ok(())
    }
}
