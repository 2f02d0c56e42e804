//! Creator Profile
//!
//! Anti-abuse record kept per creator identity. Counters only grow; the
//! account is never closed.

use anchor_lang::prelude::*;

use crate::constants::{CREATOR_SEED, MAX_REPUTATION, MAX_REPUTATION_DELTA, REPUTATION_BAN_THRESHOLD};
use crate::errors::PumpError;

/// Why a creator may no longer launch tokens
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum BanReason {
    /// Reputation fell below the ban threshold; lifted once it recovers
    LowReputation,
    /// Set by the admin; only the admin lifts it
    Admin,
}

/// Seeds: ["creator", creator]
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct CreatorProfile {
    pub creator: Pubkey,

    /// Tokens launched so far
    pub tokens_created: u32,

    /// Reputation in 0..=100, adjusted by the platform admin
    pub reputation_score: u32,

    /// Unix timestamp of the last successful launch (0 if none)
    pub last_created_at: i64,

    pub ban: Option<BanReason>,

    /// PDA bump seed
    pub bump: u8,
}

impl CreatorProfile {
    pub const SEED: &'static [u8] = CREATOR_SEED;

    /// Fill identity fields on a freshly allocated profile.
    pub fn ensure_initialized(&mut self, creator: Pubkey, bump: u8) {
        if self.creator == Pubkey::default() {
            self.creator = creator;
            self.bump = bump;
        }
    }

    pub fn is_banned(&self) -> bool {
        self.ban.is_some()
    }

    /// Move the reputation score by `delta`, clamped to 0..=100.
    ///
    /// Dropping below the ban threshold bans the creator; climbing back
    /// lifts a ban that was caused by low reputation, never an admin ban.
    pub fn apply_reputation_delta(&mut self, delta: i32) -> Result<u32> {
        let magnitude = delta.unsigned_abs();
        require!(
            magnitude <= MAX_REPUTATION_DELTA,
            PumpError::InvalidReputationDelta
        );

        let score = if delta >= 0 {
            self.reputation_score
                .saturating_add(magnitude)
                .min(MAX_REPUTATION)
        } else {
            self.reputation_score.saturating_sub(magnitude)
        };
        self.reputation_score = score;

        if score < REPUTATION_BAN_THRESHOLD {
            if self.ban.is_none() {
                self.ban = Some(BanReason::LowReputation);
            }
        } else if self.ban == Some(BanReason::LowReputation) {
            self.ban = None;
        }

        Ok(score)
    }

    pub fn set_admin_ban(&mut self, banned: bool) {
        self.ban = if banned {
            Some(BanReason::Admin)
        } else if self.reputation_score < REPUTATION_BAN_THRESHOLD && self.ban.is_some() {
            // a lifted admin ban still leaves a low-reputation one
            Some(BanReason::LowReputation)
        } else {
            None
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_pump_error;

    fn profile(reputation_score: u32) -> CreatorProfile {
        CreatorProfile {
            reputation_score,
            ..Default::default()
        }
    }

    #[test]
    fn test_delta_is_bounded_and_clamped() {
        let mut creator = profile(80);
        assert_eq!(creator.apply_reputation_delta(50).unwrap(), 100);

        assert_pump_error(
            creator.apply_reputation_delta(51),
            PumpError::InvalidReputationDelta,
        );
        assert_pump_error(
            creator.apply_reputation_delta(-51),
            PumpError::InvalidReputationDelta,
        );
        assert_eq!(creator.reputation_score, 100);

        let mut low = profile(30);
        assert_eq!(low.apply_reputation_delta(-50).unwrap(), 0);
    }

    #[test]
    fn test_low_reputation_bans_then_recovery_unbans() {
        let mut creator = profile(20);
        creator.apply_reputation_delta(-10).unwrap();
        assert_eq!(creator.reputation_score, 10);
        assert!(!creator.is_banned());

        creator.apply_reputation_delta(-1).unwrap();
        assert_eq!(creator.ban, Some(BanReason::LowReputation));

        creator.apply_reputation_delta(1).unwrap();
        assert_eq!(creator.reputation_score, 10);
        assert!(!creator.is_banned());
    }

    #[test]
    fn test_recovery_keeps_admin_ban() {
        let mut creator = profile(50);
        creator.set_admin_ban(true);
        creator.apply_reputation_delta(-45).unwrap();
        assert_eq!(creator.ban, Some(BanReason::Admin));

        creator.apply_reputation_delta(40).unwrap();
        assert_eq!(creator.ban, Some(BanReason::Admin));

        creator.set_admin_ban(false);
        assert!(!creator.is_banned());
    }

    #[test]
    fn test_lifting_admin_ban_falls_back_to_low_reputation() {
        let mut creator = profile(50);
        creator.set_admin_ban(true);
        creator.apply_reputation_delta(-48).unwrap();
        assert_eq!(creator.reputation_score, 2);

        creator.set_admin_ban(false);
        assert_eq!(creator.ban, Some(BanReason::LowReputation));
    }
}
