//! # Admission Gate
//!
//! Decides whether a creator may launch a token and with which curve.
//! Nothing on the profile changes unless every check passes.

use anchor_lang::prelude::*;

use crate::amm::{exponential, initial_price, linear_price};
use crate::constants::{
    MAX_CURVE_FEE_BPS, MAX_EXPONENT, MAX_TOTAL_SUPPLY, MIN_EXPONENTIAL_BASE_PRICE,
};
use crate::errors::PumpError;
use crate::state::{CreatorProfile, CurveParams, PlatformConfig};

/// What a creator asks for
#[derive(Debug, Clone, Copy)]
pub struct CreationRequest {
    pub curve: CurveParams,
    pub total_supply: u64,
    pub initial_sol_reserves: u64,
}

/// Starting values for an admitted pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolInit {
    pub curve: CurveParams,
    pub sol_reserves: u64,
    pub token_reserves: u64,
    pub total_supply: u64,
    pub initial_price: u64,
}

/// Run every creation check, then record the launch on `profile`.
pub fn admit(
    profile: &mut CreatorProfile,
    platform: &PlatformConfig,
    request: &CreationRequest,
    now: i64,
) -> Result<PoolInit> {
    let security = &platform.security;

    require!(!profile.is_banned(), PumpError::CreatorBanned);
    require!(
        profile.tokens_created < security.max_tokens_per_creator,
        PumpError::TooManyTokensCreated
    );
    require!(
        profile.reputation_score >= security.min_reputation_to_create,
        PumpError::InsufficientReputation
    );
    if profile.tokens_created > 0 {
        let ready_at = profile
            .last_created_at
            .saturating_add(security.creation_cooldown_secs);
        require!(now >= ready_at, PumpError::CreationCooldownActive);
    }

    require!(
        request.total_supply > 0 && request.total_supply <= MAX_TOTAL_SUPPLY,
        PumpError::InvalidCurveParams
    );
    validate_curve(&request.curve, request.total_supply)?;

    require!(
        request.initial_sol_reserves > 0
            && request.initial_sol_reserves >= platform.min_initial_liquidity,
        PumpError::InsufficientInitialLiquidity
    );

    let price = initial_price(
        &request.curve,
        request.initial_sol_reserves,
        request.total_supply,
    )?;

    profile.tokens_created += 1;
    profile.last_created_at = now;

    Ok(PoolInit {
        curve: request.curve,
        sol_reserves: request.initial_sol_reserves,
        token_reserves: request.total_supply,
        total_supply: request.total_supply,
        initial_price: price,
    })
}

/// Reject curve parameters that could overflow before the supply runs out.
pub fn validate_curve(curve: &CurveParams, total_supply: u64) -> Result<()> {
    match *curve {
        CurveParams::ConstantProduct { fee_bps } => {
            require!(fee_bps <= MAX_CURVE_FEE_BPS, PumpError::InvalidCurveParams);
        }
        CurveParams::Linear { base_price, slope } => {
            require!(base_price >= 1, PumpError::InvalidCurveParams);
            linear_price(base_price, slope, total_supply)
                .map_err(|_| error!(PumpError::InvalidCurveParams))?;
        }
        CurveParams::Exponential {
            base_price,
            growth_rate,
        } => {
            require!(
                base_price >= MIN_EXPONENTIAL_BASE_PRICE && growth_rate > 0,
                PumpError::InvalidCurveParams
            );
            let exponent = growth_rate as u128 * total_supply as u128;
            let limit = MAX_EXPONENT as u128 * exponential::GROWTH_SCALE as u128;
            require!(exponent <= limit, PumpError::InvalidCurveParams);
            exponential::price_at(base_price, growth_rate, total_supply)
                .map_err(|_| error!(PumpError::InvalidCurveParams))?;
        }
    }
    Ok(())
}
