//! Error taxonomy for the launchpad program
//!
//! Every failure aborts the whole instruction; callers receive one of these
//! typed reasons.

use anchor_lang::prelude::*;

#[error_code]
pub enum PumpError {
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Trade output would exceed available reserves")]
    InsufficientLiquidity,
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Insufficient token balance")]
    InsufficientBalance,
    #[msg("Another trade on this pool is in progress")]
    TradeInProgress,
    #[msg("Creator has reached the token creation limit")]
    TooManyTokensCreated,
    #[msg("Creator reputation is below the creation threshold")]
    InsufficientReputation,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
    #[msg("Curve parameters are out of bounds")]
    InvalidCurveParams,
    #[msg("Pool has graduated from the bonding curve")]
    PoolGraduated,
    #[msg("Trading is halted platform-wide")]
    TradingHalted,
    #[msg("Trade exceeds the maximum trade size")]
    TradeSizeExceeded,
    #[msg("Resulting balance exceeds the wallet limit")]
    WalletLimitExceeded,
    #[msg("Platform parameters are out of bounds")]
    InvalidPlatformParams,
    #[msg("Token name, symbol or uri is invalid")]
    InvalidMetadata,
    #[msg("Initial liquidity is below the platform minimum")]
    InsufficientInitialLiquidity,
    #[msg("Creator must wait before launching another token")]
    CreationCooldownActive,
    #[msg("Pool has not reached the graduation threshold")]
    GraduationThresholdNotMet,
    #[msg("Signer is not the platform admin")]
    Unauthorized,
    #[msg("Creator is banned from launching tokens")]
    CreatorBanned,
    #[msg("Trader must wait before trading again")]
    TradeCooldownActive,
    #[msg("Reputation change is out of bounds")]
    InvalidReputationDelta,
    #[msg("Activity report is invalid")]
    InvalidReport,
}

#[cfg(test)]
pub(crate) fn assert_pump_error<T: std::fmt::Debug>(result: Result<T>, expected: PumpError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(err)) => assert_eq!(
            err.error_code_number,
            u32::from(expected),
            "expected {:?}, got {}",
            expected,
            err.error_name
        ),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
