//! # Arithmetic Safety Layer
//!
//! Checked integer primitives used by every pricing path, plus the
//! fast-path/safe-path dispatcher for the constant-product swap.
//!
//! ## Fast path soundness
//!
//! ```text
//!   reserve_in, reserve_out, amount  <=  2^63 - 1   (FAST_PATH_LIMIT)
//!
//!   k      = reserve_in * reserve_out   <  2^126    fits u128
//!   new_in = reserve_in + amount        <  2^64     fits u64
//!   denom  = reserve_in + effective     <= new_in
//! ```
//!
//! Below the limit no intermediate can overflow, so the fast path skips the
//! checked operations. Anything above it goes through the safe path, which
//! reports `ArithmeticOverflow` instead of wrapping.

use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, FAST_PATH_LIMIT, PRICE_SCALE};
use crate::errors::PumpError;

/// Which arithmetic the constant-product swap runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticPath {
    /// Plain u128 arithmetic; inputs provably cannot overflow
    Fast,
    /// Checked u128 arithmetic failing with `ArithmeticOverflow`
    Safe,
}

/// Pick the arithmetic path for a swap of `amount` against two reserves.
pub fn select_path(reserve_in: u64, reserve_out: u64, amount: u64) -> ArithmeticPath {
    if reserve_in <= FAST_PATH_LIMIT && reserve_out <= FAST_PATH_LIMIT && amount <= FAST_PATH_LIMIT
    {
        ArithmeticPath::Fast
    } else {
        ArithmeticPath::Safe
    }
}

/// Result of a constant-product swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapResult {
    /// Amount paid out of `reserve_out`
    pub amount_out: u64,
    /// Fee withheld from the input (stays in the pool)
    pub fee: u64,
    /// `reserve_in` after the full input is deposited
    pub new_reserve_in: u64,
    /// `reserve_out` after the payout
    pub new_reserve_out: u64,
}

/// Swap `amount_in` into a constant-product pool.
///
/// ```text
/// fee        = floor(amount_in * fee_bps / 10000)
/// effective  = amount_in - fee
/// new_out    = ceil(k / (reserve_in + effective))
/// amount_out = reserve_out - new_out
/// new_in     = reserve_in + amount_in
/// ```
///
/// Rounding the remaining reserve up keeps `new_in * new_out >= k`.
pub fn constant_product_swap(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    fee_bps: u16,
) -> Result<SwapResult> {
    require!(amount_in > 0, PumpError::InvalidAmount);
    require!(reserve_in > 0 && reserve_out > 0, PumpError::InsufficientLiquidity);

    let fee = apply_bps(amount_in, fee_bps)?;
    let effective = amount_in - fee;

    let (new_reserve_in, new_reserve_out) = match select_path(reserve_in, reserve_out, amount_in) {
        ArithmeticPath::Fast => {
            let k = reserve_in as u128 * reserve_out as u128;
            let denom = reserve_in as u128 + effective as u128;
            let new_out = (k + denom - 1) / denom;
            (reserve_in + amount_in, new_out as u64)
        }
        ArithmeticPath::Safe => {
            let k = (reserve_in as u128)
                .checked_mul(reserve_out as u128)
                .ok_or(PumpError::ArithmeticOverflow)?;
            let denom = (reserve_in as u128)
                .checked_add(effective as u128)
                .ok_or(PumpError::ArithmeticOverflow)?;
            let new_out = div_ceil(k, denom)?;
            let new_in = reserve_in
                .checked_add(amount_in)
                .ok_or(PumpError::ArithmeticOverflow)?;
            (new_in, to_u64(new_out)?)
        }
    };

    let amount_out = reserve_out
        .checked_sub(new_reserve_out)
        .ok_or(PumpError::ArithmeticOverflow)?;
    require!(amount_out > 0, PumpError::InvalidAmount);

    Ok(SwapResult {
        amount_out,
        fee,
        new_reserve_in,
        new_reserve_out,
    })
}

/// `floor(amount * bps / 10000)`
pub fn apply_bps(amount: u64, bps: u16) -> Result<u64> {
    mul_div_floor(amount as u128, bps as u128, BPS_DENOMINATOR as u128)
}

/// `floor(a * b / c)` narrowed to u64
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Result<u64> {
    require!(c > 0, PumpError::ArithmeticOverflow);
    let product = a.checked_mul(b).ok_or(PumpError::ArithmeticOverflow)?;
    to_u64(product / c)
}

/// `ceil(a / b)` without the `a + b - 1` overflow
pub fn div_ceil(a: u128, b: u128) -> Result<u128> {
    require!(b > 0, PumpError::ArithmeticOverflow);
    let quotient = a / b;
    Ok(if a % b == 0 { quotient } else { quotient + 1 })
}

pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(PumpError::ArithmeticOverflow))
}

pub fn checked_add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or_else(|| error!(PumpError::ArithmeticOverflow))
}

pub fn checked_sub(a: u64, b: u64) -> Result<u64> {
    a.checked_sub(b).ok_or_else(|| error!(PumpError::ArithmeticOverflow))
}

/// Market cap in lamports from a fixed-point price, saturating at `u64::MAX`.
pub fn market_cap(price: u64, circulating: u64) -> u64 {
    let cap = (price as u128 * circulating as u128) / PRICE_SCALE as u128;
    u64::try_from(cap).unwrap_or(u64::MAX)
}

/// Relative price move in basis points, capped at 10000.
pub fn price_impact_bps(old_price: u64, new_price: u64) -> u16 {
    if old_price == 0 {
        return 10_000;
    }
    let diff = old_price.abs_diff(new_price) as u128;
    let impact = diff * BPS_DENOMINATOR as u128 / old_price as u128;
    impact.min(BPS_DENOMINATOR as u128) as u16
}

/// Integer square root using Newton's method
///
/// Computes floor(√x) for any u128.
pub fn sqrt(x: u128) -> u128 {
    if x == 0 {
        return 0;
    }

    // ceil(x / 2) without overflowing at u128::MAX
    let mut z = x / 2 + (x & 1);
    let mut y = x;

    while z < y {
        y = z;
        z = (x / z + z) / 2;
    }

    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_pump_error;

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(0), 0);
        assert_eq!(sqrt(1), 1);
        assert_eq!(sqrt(2), 1);
        assert_eq!(sqrt(3), 1);
        assert_eq!(sqrt(4), 2);
        assert_eq!(sqrt(10), 3);
        assert_eq!(sqrt(1_000_000), 1_000);
        assert_eq!(sqrt(u128::MAX), u64::MAX as u128);
    }

    #[test]
    fn test_path_selection_boundary() {
        assert_eq!(select_path(FAST_PATH_LIMIT, FAST_PATH_LIMIT, 1), ArithmeticPath::Fast);
        assert_eq!(select_path(FAST_PATH_LIMIT + 1, 1_000, 1), ArithmeticPath::Safe);
        assert_eq!(select_path(1_000, FAST_PATH_LIMIT + 1, 1), ArithmeticPath::Safe);
        assert_eq!(select_path(1_000, 1_000, FAST_PATH_LIMIT + 1), ArithmeticPath::Safe);
    }

    #[test]
    fn test_swap_rounds_in_favor_of_pool() {
        // k = 1_000_000, new_out = ceil(1_000_000 / 1_100) = 910
        let swap = constant_product_swap(1_000, 1_000, 100, 0).unwrap();
        assert_eq!(swap.amount_out, 90);
        assert_eq!(swap.new_reserve_in, 1_100);
        assert_eq!(swap.new_reserve_out, 910);
        assert_eq!(swap.fee, 0);
    }

    #[test]
    fn test_swap_fee_stays_in_pool() {
        // 1% of 100 = 1; effective 99 -> new_out = ceil(1_000_000 / 1_099) = 910
        let swap = constant_product_swap(1_000, 1_000, 100, 100).unwrap();
        assert_eq!(swap.fee, 1);
        assert_eq!(swap.new_reserve_in, 1_100);
        assert_eq!(swap.amount_out, 90);
        let k_before = 1_000u128 * 1_000;
        let k_after = swap.new_reserve_in as u128 * swap.new_reserve_out as u128;
        assert!(k_after >= k_before);
    }

    #[test]
    fn test_fast_and_safe_paths_agree() {
        let (rin, rout, amount) = (FAST_PATH_LIMIT, 3_000_000_000_000, 1_000_000_000);
        let fast = constant_product_swap(rin, rout, amount, 25).unwrap();
        // one lamport over the limit forces the checked path
        let safe = constant_product_swap(rin + 1, rout, amount, 25).unwrap();
        assert_eq!(select_path(rin + 1, rout, amount), ArithmeticPath::Safe);
        assert!(safe.amount_out <= fast.amount_out + 1);
        assert!(safe.amount_out + 1 >= fast.amount_out);
    }

    #[test]
    fn test_safe_path_reports_overflow_instead_of_wrapping() {
        let reserve = FAST_PATH_LIMIT + 1;
        assert_pump_error(
            constant_product_swap(reserve, 1_000_000, reserve, 0),
            PumpError::ArithmeticOverflow,
        );
        assert_pump_error(
            constant_product_swap(reserve, 1_000_000, u64::MAX, 0),
            PumpError::ArithmeticOverflow,
        );
    }

    #[test]
    fn test_zero_input_rejected() {
        assert_pump_error(constant_product_swap(1_000, 1_000, 0, 0), PumpError::InvalidAmount);
    }

    #[test]
    fn test_dust_output_rejected() {
        // 1 lamport against a deep pool buys nothing once rounded
        assert_pump_error(
            constant_product_swap(1_000_000_000, 1_000, 1, 0),
            PumpError::InvalidAmount,
        );
    }

    #[test]
    fn test_mul_div_rounding() {
        assert_eq!(mul_div_floor(10, 10, 3).unwrap(), 33);
        assert_eq!(div_ceil(100, 3).unwrap(), 34);
        assert_eq!(div_ceil(90, 3).unwrap(), 30);
        assert_pump_error(mul_div_floor(u128::MAX, 2, 1), PumpError::ArithmeticOverflow);
        assert_pump_error(mul_div_floor(u64::MAX as u128, 2, 1), PumpError::ArithmeticOverflow);
    }

    #[test]
    fn test_market_cap_saturates() {
        assert_eq!(market_cap(PRICE_SCALE, 1_000), 1_000);
        assert_eq!(market_cap(u64::MAX, u64::MAX), u64::MAX);
    }

    #[test]
    fn test_price_impact() {
        assert_eq!(price_impact_bps(1_000, 1_100), 1_000);
        assert_eq!(price_impact_bps(1_000, 900), 1_000);
        assert_eq!(price_impact_bps(1_000, 5_000), 10_000);
        assert_eq!(price_impact_bps(0, 5), 10_000);
    }
}
