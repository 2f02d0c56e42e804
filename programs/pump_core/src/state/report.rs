//! Suspicious Activity Reports
//!
//! Anyone may report a creator once. Reports only record and flag; acting on
//! them (reputation changes, bans) stays with the admin.

use anchor_lang::prelude::*;

use crate::constants::{
    HIGH_RISK_SCORE, MAX_REPORT_DESCRIPTION_LEN, MIN_REPORT_DESCRIPTION_LEN, REPORT_SEED,
};
use crate::errors::PumpError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum ReportReason {
    RugPull,
    Scam,
    MarketManipulation,
    Impersonation,
    FakeMetadata,
    Spam,
    Other,
}

impl ReportReason {
    /// Risk in 0..=100 attached to a reason
    pub fn risk_score(&self) -> u8 {
        match self {
            ReportReason::RugPull => 95,
            ReportReason::Scam => 90,
            ReportReason::MarketManipulation => 85,
            ReportReason::Impersonation => 75,
            ReportReason::FakeMetadata => 70,
            ReportReason::Other => 50,
            ReportReason::Spam => 40,
        }
    }
}

/// Seeds: ["report", reported, reporter]
#[account]
#[derive(InitSpace, Debug)]
pub struct SuspiciousActivityReport {
    pub reporter: Pubkey,
    pub reported: Pubkey,
    pub reason: ReportReason,
    #[max_len(500)]
    pub description: String,
    pub risk_score: u8,

    /// High-risk reports are marked for admin review
    pub auto_flagged: bool,

    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl SuspiciousActivityReport {
    pub const SEED: &'static [u8] = REPORT_SEED;

    pub fn validate(reporter: &Pubkey, reported: &Pubkey, description: &str) -> Result<()> {
        require!(reporter != reported, PumpError::InvalidReport);
        require!(
            (MIN_REPORT_DESCRIPTION_LEN..=MAX_REPORT_DESCRIPTION_LEN).contains(&description.len()),
            PumpError::InvalidReport
        );
        Ok(())
    }

    pub fn is_high_risk(reason: &ReportReason) -> bool {
        reason.risk_score() >= HIGH_RISK_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_pump_error;

    #[test]
    fn test_high_risk_reasons_are_flagged() {
        assert!(SuspiciousActivityReport::is_high_risk(&ReportReason::RugPull));
        assert!(SuspiciousActivityReport::is_high_risk(&ReportReason::MarketManipulation));
        assert!(!SuspiciousActivityReport::is_high_risk(&ReportReason::Impersonation));
        assert!(!SuspiciousActivityReport::is_high_risk(&ReportReason::Spam));
    }

    #[test]
    fn test_report_validation() {
        let reporter = Pubkey::new_unique();
        let reported = Pubkey::new_unique();

        assert!(SuspiciousActivityReport::validate(&reporter, &reported, "pulled liquidity at launch").is_ok());
        assert_pump_error(
            SuspiciousActivityReport::validate(&reporter, &reporter, "reporting myself here"),
            PumpError::InvalidReport,
        );
        assert_pump_error(
            SuspiciousActivityReport::validate(&reporter, &reported, "short"),
            PumpError::InvalidReport,
        );
        assert_pump_error(
            SuspiciousActivityReport::validate(&reporter, &reported, &"x".repeat(501)),
            PumpError::InvalidReport,
        );
    }
}
