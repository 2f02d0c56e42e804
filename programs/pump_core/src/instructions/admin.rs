//! Admin Controls
//!
//! Only the admin recorded in the platform config may change tunables,
//! halt trading, adjust creator reputation or ban creators.

use anchor_lang::prelude::*;

use crate::errors::PumpError;
use crate::state::{BanReason, CreatorProfile, PlatformConfig, SecurityParams};

#[event]
pub struct PlatformConfigUpdated {
    pub treasury: Pubkey,
    pub fee_bps: u16,
    pub security: SecurityParams,
    pub min_initial_liquidity: u64,
    pub graduation_threshold: u64,
}

#[event]
pub struct TradingHaltChanged {
    pub halted: bool,
    pub timestamp: i64,
}

#[event]
pub struct AdminTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
}

#[event]
pub struct CreatorReputationUpdated {
    pub creator: Pubkey,
    pub previous_score: u32,
    pub reputation_score: u32,
    pub delta: i32,
    pub ban: Option<BanReason>,
    pub timestamp: i64,
}

#[event]
pub struct CreatorBanChanged {
    pub creator: Pubkey,
    pub ban: Option<BanReason>,
    pub timestamp: i64,
}

/// Accounts for config changes
#[derive(Accounts)]
pub struct AdminConfig<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PlatformConfig::SEED],
        bump = platform_config.bump,
        has_one = admin @ PumpError::Unauthorized,
    )]
    pub platform_config: Account<'info, PlatformConfig>,
}

impl<'info> AdminConfig<'info> {
    pub fn update_platform_config(
        &mut self,
        fee_bps: u16,
        treasury: Pubkey,
        security: SecurityParams,
        min_initial_liquidity: u64,
        graduation_threshold: u64,
    ) -> Result<()> {
        PlatformConfig::validate_params(fee_bps, &security, graduation_threshold)?;

        let config = &mut self.platform_config;
        config.fee_bps = fee_bps;
        config.treasury = treasury;
        config.security = security;
        config.min_initial_liquidity = min_initial_liquidity;
        config.graduation_threshold = graduation_threshold;

        msg!("Platform config updated");
        msg!("Fee: {} bps", fee_bps);

        emit!(PlatformConfigUpdated {
            treasury,
            fee_bps,
            security,
            min_initial_liquidity,
            graduation_threshold,
        });

        Ok(())
    }

    pub fn set_trading_halt(&mut self, halted: bool) -> Result<()> {
        self.platform_config.trading_locked = halted;

        msg!("Trading halted: {}", halted);

        emit!(TradingHaltChanged {
            halted,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }

    pub fn transfer_admin(&mut self, new_admin: Pubkey) -> Result<()> {
        let previous_admin = self.platform_config.admin;
        require!(
            new_admin != Pubkey::default() && new_admin != previous_admin,
            PumpError::InvalidPlatformParams
        );
        self.platform_config.admin = new_admin;

        msg!("Admin transferred: {} -> {}", previous_admin, new_admin);

        emit!(AdminTransferred {
            previous_admin,
            new_admin,
        });

        Ok(())
    }
}

/// Accounts for reputation and ban changes on one creator
#[derive(Accounts)]
pub struct CreatorAdmin<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [PlatformConfig::SEED],
        bump = platform_config.bump,
        has_one = admin @ PumpError::Unauthorized,
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    /// CHECK: Only used as a seed for the profile PDA
    pub creator: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + CreatorProfile::INIT_SPACE,
        seeds = [CreatorProfile::SEED, creator.key().as_ref()],
        bump,
    )]
    pub creator_profile: Account<'info, CreatorProfile>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreatorAdmin<'info> {
    /// Move a creator's reputation by at most 50 points, banning or
    /// unbanning on the way.
    pub fn adjust_creator_reputation(
        &mut self,
        delta: i32,
        bumps: &CreatorAdminBumps,
    ) -> Result<()> {
        let profile = &mut self.creator_profile;
        profile.ensure_initialized(self.creator.key(), bumps.creator_profile);

        let previous_score = profile.reputation_score;
        let was_banned = profile.is_banned();
        let reputation_score = profile.apply_reputation_delta(delta)?;

        msg!("Creator {} reputation: {} -> {}", profile.creator, previous_score, reputation_score);
        if profile.is_banned() != was_banned {
            msg!("Creator banned: {}", profile.is_banned());
        }

        emit!(CreatorReputationUpdated {
            creator: profile.creator,
            previous_score,
            reputation_score,
            delta,
            ban: profile.ban,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }

    pub fn set_creator_ban(&mut self, banned: bool, bumps: &CreatorAdminBumps) -> Result<()> {
        let profile = &mut self.creator_profile;
        profile.ensure_initialized(self.creator.key(), bumps.creator_profile);
        profile.set_admin_ban(banned);

        msg!("Creator {} ban: {:?}", profile.creator, profile.ban);

        emit!(CreatorBanChanged {
            creator: profile.creator,
            ban: profile.ban,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
