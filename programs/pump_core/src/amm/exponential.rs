//! # Exponential Curve Helper
//!
//! The only place floating point touches pricing. Callers pass integers and
//! receive integers; everything in between is `f64`.
//!
//! ```text
//!   price(s) = base_price * e^(g * s),      g = growth_rate / 10^18
//!
//!   buy  Δ:  Δ         = ln(1 + g * sol_in * P / p0) / g
//!            p1        = p0 * e^(g * Δ)                     (rounded down)
//!   sell Δ:  p1        = p0 * e^(-g * Δ)                    (rounded up)
//!            sol_out   = (p0 - p1) * 10^9 / growth_rate     (rounded down)
//! ```
//!
//! ## Approximation bound
//!
//! For `|x| < 0.001` the growth factor uses `1 + x + x²/2 + x³/6`. The
//! Lagrange remainder is `e^ξ · x⁴ / 24` with `|ξ| < |x|`, so the relative
//! error is at most `e^0.002 · 10^-12 / 24 ≈ 4.18e-14`, which stays under
//! [`TAYLOR_MAX_RELATIVE_ERROR`]. A committed price therefore drifts from
//! the exact curve by at most `price * 5e-14 + 1` per trade.
//!
//! ## Price floor
//!
//! A sell rounds the new price up and never below 1, so it pays nothing
//! until the price falls by at least one unit. At a price of 1 no sale ever
//! pays out; admission keeps base prices at or above
//! [`MIN_EXPONENTIAL_BASE_PRICE`](crate::constants::MIN_EXPONENTIAL_BASE_PRICE).

use anchor_lang::prelude::*;

use crate::amm::math::mul_div_floor;
use crate::constants::PRICE_SCALE;
use crate::errors::PumpError;

/// `growth_rate` is expressed per 10^18 base units
pub const GROWTH_SCALE: f64 = 1e18;

/// Exponents below this magnitude use the truncated series
pub const TAYLOR_THRESHOLD: f64 = 1e-3;

/// Upper bound on the relative error of the truncated series
pub const TAYLOR_MAX_RELATIVE_ERROR: f64 = 5e-14;

/// `e^x`, approximated by a third-order series when `|x|` is small.
pub fn growth_factor(x: f64) -> f64 {
    if x.abs() < TAYLOR_THRESHOLD {
        let x2 = x * x;
        1.0 + x + x2 / 2.0 + x2 * x / 6.0
    } else {
        x.exp()
    }
}

/// Tokens bought with `sol_in` starting at `price`, and the price afterwards.
pub fn buy(price: u64, growth_rate: u64, sol_in: u64) -> Result<(u64, u64)> {
    require!(price > 0 && growth_rate > 0, PumpError::InvalidCurveParams);
    let g = growth_rate as f64 / GROWTH_SCALE;

    let y = g * sol_in as f64 * PRICE_SCALE as f64 / price as f64;
    let tokens_out = floor_to_u64(y.ln_1p() / g)?;

    let factor = growth_factor(g * tokens_out as f64);
    let new_price = floor_to_u64(price as f64 * factor)?.max(price);
    Ok((tokens_out, new_price))
}

/// SOL paid for `tokens_in` starting at `price`, and the price afterwards.
pub fn sell(price: u64, growth_rate: u64, tokens_in: u64) -> Result<(u64, u64)> {
    require!(price > 0 && growth_rate > 0, PumpError::InvalidCurveParams);
    let g = growth_rate as f64 / GROWTH_SCALE;

    let factor = growth_factor(-g * tokens_in as f64);
    let new_price = ceil_to_u64(price as f64 * factor)?.clamp(1, price);

    let sol_out = mul_div_floor(
        (price - new_price) as u128,
        PRICE_SCALE as u128,
        growth_rate as u128,
    )?;
    Ok((sol_out, new_price))
}

/// `base_price * e^(g * supply)` with the full exponential
pub fn price_at(base_price: u64, growth_rate: u64, supply: u64) -> Result<u64> {
    let exponent = growth_rate as f64 / GROWTH_SCALE * supply as f64;
    floor_to_u64(base_price as f64 * exponent.exp())
}

fn floor_to_u64(value: f64) -> Result<u64> {
    narrow(value.floor())
}

fn ceil_to_u64(value: f64) -> Result<u64> {
    narrow(value.ceil())
}

fn narrow(value: f64) -> Result<u64> {
    // 2^64 is exactly representable; anything at or above it does not fit
    require!(
        value.is_finite() && value >= 0.0 && value < 18_446_744_073_709_551_616.0,
        PumpError::ArithmeticOverflow
    );
    Ok(value as u64)
}
