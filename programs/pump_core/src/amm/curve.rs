//! # Curve Engine
//!
//! Pure pricing functions for every curve variant. Given the same reserves,
//! parameters and input, a quote is always the same; nothing here reads
//! accounts or the clock.
//!
//! ## Variants
//!
//! ```text
//! ┌─────────────────┬──────────────────────────────────────────────┐
//! │ ConstantProduct │ sol * token = k, price = sol * P / token      │
//! │ Linear          │ price = base + slope * s / 10^9               │
//! │ Exponential     │ price = base * e^(g * s)                      │
//! └─────────────────┴──────────────────────────────────────────────┘
//!   s = circulating supply = total_supply - token_reserves
//!   P = PRICE_SCALE
//! ```
//!
//! Amounts paid to the trader round down; amounts retained by the pool
//! round up.

use anchor_lang::prelude::*;

use crate::amm::exponential;
use crate::amm::math::{self, constant_product_swap, mul_div_floor, sqrt, to_u64};
use crate::constants::{PRICE_SCALE, TOKEN_UNIT};
use crate::errors::PumpError;
use crate::state::CurveParams;

/// Reserve snapshot a quote is computed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolReserves {
    /// SOL held by the curve (lamports)
    pub sol: u64,
    /// Tokens held by the curve (base units)
    pub token: u64,
    /// Total minted supply (base units)
    pub total_supply: u64,
    /// Spot price (lamports per base unit, scaled by PRICE_SCALE)
    pub price: u64,
}

impl PoolReserves {
    pub fn circulating(&self) -> u64 {
        self.total_supply.saturating_sub(self.token)
    }
}

/// Outcome of pricing one trade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveQuote {
    /// Input consumed by the curve
    pub amount_in: u64,
    /// Output paid by the curve
    pub amount_out: u64,
    /// Part of the input kept by the pool as a curve fee
    pub curve_fee: u64,
    /// Reserves after the trade; `reserves.price` is the new spot price
    pub reserves: PoolReserves,
}

/// Price a purchase of tokens with `sol_in` lamports.
pub fn quote_buy(reserves: &PoolReserves, curve: &CurveParams, sol_in: u64) -> Result<CurveQuote> {
    require!(sol_in > 0, PumpError::InvalidAmount);

    let (tokens_out, curve_fee, new_price) = match *curve {
        CurveParams::ConstantProduct { fee_bps } => {
            let swap = constant_product_swap(reserves.sol, reserves.token, sol_in, fee_bps)?;
            let price = constant_product_price(swap.new_reserve_in, swap.new_reserve_out)?;
            (swap.amount_out, swap.fee, price)
        }
        CurveParams::Linear { base_price, slope } => {
            let tokens = linear_tokens_for_sol(reserves.price, slope, sol_in)?;
            let supply = math::checked_add(reserves.circulating(), tokens)?;
            (tokens, 0, linear_price(base_price, slope, supply)?)
        }
        CurveParams::Exponential { growth_rate, .. } => {
            let (tokens, price) = exponential::buy(reserves.price, growth_rate, sol_in)?;
            (tokens, 0, price)
        }
    };

    require!(tokens_out > 0, PumpError::InvalidAmount);
    require!(tokens_out < reserves.token, PumpError::InsufficientLiquidity);

    Ok(CurveQuote {
        amount_in: sol_in,
        amount_out: tokens_out,
        curve_fee,
        reserves: PoolReserves {
            sol: math::checked_add(reserves.sol, sol_in)?,
            token: reserves.token - tokens_out,
            total_supply: reserves.total_supply,
            price: new_price,
        },
    })
}

/// Price a sale of `tokens_in` back to the curve.
pub fn quote_sell(
    reserves: &PoolReserves,
    curve: &CurveParams,
    tokens_in: u64,
) -> Result<CurveQuote> {
    require!(tokens_in > 0, PumpError::InvalidAmount);

    let (sol_out, curve_fee, new_price) = match *curve {
        CurveParams::ConstantProduct { fee_bps } => {
            let swap = constant_product_swap(reserves.token, reserves.sol, tokens_in, fee_bps)?;
            let price = constant_product_price(swap.new_reserve_out, swap.new_reserve_in)?;
            (swap.amount_out, swap.fee, price)
        }
        CurveParams::Linear { base_price, slope } => {
            let circulating = reserves.circulating();
            require!(tokens_in <= circulating, PumpError::InsufficientLiquidity);
            let supply = circulating - tokens_in;
            let floor_price = linear_price(base_price, slope, supply)?;
            let sol = linear_sol_for_tokens(floor_price, slope, tokens_in)?;
            (sol, 0, floor_price)
        }
        CurveParams::Exponential { growth_rate, .. } => {
            require!(tokens_in <= reserves.circulating(), PumpError::InsufficientLiquidity);
            let (sol, price) = exponential::sell(reserves.price, growth_rate, tokens_in)?;
            (sol, 0, price)
        }
    };

    require!(sol_out > 0, PumpError::InvalidAmount);
    require!(sol_out < reserves.sol, PumpError::InsufficientLiquidity);

    Ok(CurveQuote {
        amount_in: tokens_in,
        amount_out: sol_out,
        curve_fee,
        reserves: PoolReserves {
            sol: reserves.sol - sol_out,
            token: math::checked_add(reserves.token, tokens_in)?,
            total_supply: reserves.total_supply,
            price: new_price,
        },
    })
}

/// Spot price of a freshly created pool (nothing circulating yet).
pub fn initial_price(curve: &CurveParams, sol_reserves: u64, token_reserves: u64) -> Result<u64> {
    match *curve {
        CurveParams::ConstantProduct { .. } => constant_product_price(sol_reserves, token_reserves),
        CurveParams::Linear { base_price, .. } | CurveParams::Exponential { base_price, .. } => {
            Ok(base_price)
        }
    }
}

/// `sol * P / token`
pub fn constant_product_price(sol: u64, token: u64) -> Result<u64> {
    require!(token > 0, PumpError::InsufficientLiquidity);
    mul_div_floor(sol as u128, PRICE_SCALE as u128, token as u128)
}

/// `base + slope * supply / 10^9`
pub fn linear_price(base_price: u64, slope: u64, supply: u64) -> Result<u64> {
    let growth = (slope as u128 * supply as u128) / TOKEN_UNIT as u128;
    to_u64(growth)
        .and_then(|growth| math::checked_add(base_price, growth))
}

/// Tokens bought for `sol_in` starting at spot `price`.
///
/// Solving `sol_in = (p0·Δ + slope·Δ²/(2·10^9)) / P` for Δ with
/// `P = 10^9` gives `Δ = (√(p0² + 2·slope·sol_in) − p0) · 10^9 / slope`.
fn linear_tokens_for_sol(price: u64, slope: u64, sol_in: u64) -> Result<u64> {
    require!(price > 0, PumpError::InvalidCurveParams);
    if slope == 0 {
        return mul_div_floor(sol_in as u128, PRICE_SCALE as u128, price as u128);
    }

    let p0 = price as u128;
    let discriminant = (slope as u128)
        .checked_mul(sol_in as u128)
        .and_then(|v| v.checked_mul(2))
        .and_then(|v| v.checked_add(p0 * p0))
        .ok_or(PumpError::ArithmeticOverflow)?;
    let root = sqrt(discriminant);

    mul_div_floor(root.saturating_sub(p0), TOKEN_UNIT as u128, slope as u128)
}

/// SOL paid for `tokens` whose lowest price is `floor_price`.
///
/// Exact trapezoid: `(floor_price·Δ + slope·Δ²/(2·10^9)) / P`, rounded down.
fn linear_sol_for_tokens(floor_price: u64, slope: u64, tokens: u64) -> Result<u64> {
    let delta = tokens as u128;
    let base_part = floor_price as u128 * delta;

    // slope·Δ²/(2·10^9) split so the square never materializes
    let two_units = 2 * TOKEN_UNIT as u128;
    let slope_delta = slope as u128 * delta;
    let whole = (slope_delta / two_units)
        .checked_mul(delta)
        .ok_or(PumpError::ArithmeticOverflow)?;
    let rest = (slope_delta % two_units) * delta / two_units;

    let numerator = base_part
        .checked_add(whole)
        .and_then(|v| v.checked_add(rest))
        .ok_or(PumpError::ArithmeticOverflow)?;
    to_u64(numerator / PRICE_SCALE as u128)
}
