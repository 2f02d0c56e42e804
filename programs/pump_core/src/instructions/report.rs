//! Suspicious Activity Reports
//!
//! Any wallet may file one report per creator. High-risk reasons are flagged
//! for the admin, who decides on reputation changes or bans.

use anchor_lang::prelude::*;

use crate::state::{ReportReason, SuspiciousActivityReport};

#[event]
pub struct SuspiciousActivityReported {
    pub reported: Pubkey,
    pub reporter: Pubkey,
    pub reason: ReportReason,
    pub risk_score: u8,
    pub auto_flagged: bool,
    pub timestamp: i64,
}

#[derive(Accounts)]
pub struct ReportActivity<'info> {
    #[account(mut)]
    pub reporter: Signer<'info>,

    /// CHECK: Only used as a seed and recorded in the report
    pub reported: UncheckedAccount<'info>,

    #[account(
        init,
        payer = reporter,
        space = 8 + SuspiciousActivityReport::INIT_SPACE,
        seeds = [
            SuspiciousActivityReport::SEED,
            reported.key().as_ref(),
            reporter.key().as_ref(),
        ],
        bump,
    )]
    pub report: Account<'info, SuspiciousActivityReport>,

    pub system_program: Program<'info, System>,
}

impl<'info> ReportActivity<'info> {
    pub fn report_suspicious_activity(
        &mut self,
        reason: ReportReason,
        description: String,
        bumps: &ReportActivityBumps,
    ) -> Result<()> {
        let reporter = self.reporter.key();
        let reported = self.reported.key();
        SuspiciousActivityReport::validate(&reporter, &reported, &description)?;

        let now = Clock::get()?.unix_timestamp;
        let risk_score = reason.risk_score();
        let auto_flagged = SuspiciousActivityReport::is_high_risk(&reason);

        self.report.set_inner(SuspiciousActivityReport {
            reporter,
            reported,
            reason,
            description,
            risk_score,
            auto_flagged,
            created_at: now,
            bump: bumps.report,
        });

        msg!("Report filed against {}: {:?}", reported, reason);
        msg!("Risk score: {}/100", risk_score);

        emit!(SuspiciousActivityReported {
            reported,
            reporter,
            reason,
            risk_score,
            auto_flagged,
            timestamp: now,
        });

        Ok(())
    }
}
