//! # Trade Executor
//!
//! Runs one buy or sell against a pool:
//!
//! ```text
//!   Idle ──acquire──▶ Locked ──validate──▶ price ──commit──▶ Locked ──drop──▶ Idle
//!     ▲                  │                   │                                  │
//!     │                  └──── any error ────┴──────────── drop ───────────────┘
//!     └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is a guard value: `trading_locked` is cleared in `Drop`, so every
//! exit path (success, early `?`, panic unwinding in tests) leaves the pool
//! unlocked. Pricing runs against a snapshot and the pool is written only
//! after every check has passed.
//!
//! Besides the platform fee, large trades pay a whale tax. Both go to the
//! treasury and neither ever reaches the curve.

use std::ops::Deref;

use anchor_lang::prelude::*;

use crate::amm::math::{self, apply_bps, checked_sub, market_cap, mul_div_floor, price_impact_bps};
use crate::amm::{quote_buy, quote_sell, PoolReserves};
use crate::constants::BPS_DENOMINATOR;
use crate::errors::PumpError;
use crate::state::{PlatformConfig, Pool, TradeSide, TraderProfile};

/// Result of a committed trade, returned to the caller
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradeReceipt {
    pub side: TradeSide,
    /// SOL paid (buy) or tokens sold (sell)
    pub amount_in: u64,
    /// Tokens received (buy) or SOL received after the platform fee (sell)
    pub amount_out: u64,
    /// Platform fee sent to the treasury
    pub platform_fee: u64,
    /// Whale tax sent to the treasury
    pub whale_tax: u64,
    /// Part of the input retained by the curve
    pub curve_fee: u64,
    /// Lamports added to (buy) or removed from (sell) the SOL reserve
    pub reserve_delta: u64,
    /// SOL moved by the trade before platform fees
    pub sol_volume: u64,
    pub new_price: u64,
    pub new_market_cap: u64,
    pub price_impact_bps: u16,
}

impl TradeReceipt {
    /// Lamports owed to the treasury
    pub fn treasury_amount(&self) -> u64 {
        self.platform_fee + self.whale_tax
    }
}

/// Read-only preview of a trade
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceQuote {
    pub side: TradeSide,
    pub amount_in: u64,
    /// What the trader would receive after every fee
    pub amount_out: u64,
    pub platform_fee: u64,
    pub whale_tax: u64,
    pub curve_fee: u64,
    pub price_before: u64,
    pub price_after: u64,
    pub market_cap_after: u64,
    pub price_impact_bps: u16,
}

/// Priced but uncommitted trade
#[derive(Debug, Clone, Copy)]
struct TradePlan {
    side: TradeSide,
    amount_in: u64,
    amount_out: u64,
    platform_fee: u64,
    whale_tax: u64,
    curve_fee: u64,
    reserve_delta: u64,
    sol_volume: u64,
    price_before: u64,
    reserves: PoolReserves,
}

impl TradePlan {
    fn market_cap_after(&self) -> u64 {
        market_cap(self.reserves.price, self.reserves.circulating())
    }

    fn price_impact_bps(&self) -> u16 {
        price_impact_bps(self.price_before, self.reserves.price)
    }
}

/// Exclusive trading access to one pool
///
/// Holding a `TradeLock` means `pool.trading_locked` is set; dropping it
/// clears the flag.
pub struct TradeLock<'a> {
    pool: &'a mut Pool,
}

impl<'a> TradeLock<'a> {
    /// Check-and-set the pool's reentrancy flag.
    pub fn acquire(pool: &'a mut Pool) -> Result<Self> {
        require!(!pool.trading_locked, PumpError::TradeInProgress);
        pool.trading_locked = true;
        Ok(Self { pool })
    }

    /// Buy tokens with `sol_in` lamports.
    ///
    /// `holder_balance` is the buyer's token balance before the trade.
    pub fn buy(
        &mut self,
        platform: &PlatformConfig,
        trader: &mut TraderProfile,
        holder_balance: u64,
        sol_in: u64,
        min_tokens_out: u64,
        now: i64,
    ) -> Result<TradeReceipt> {
        ensure_tradable(self.pool, platform, sol_in)?;
        trader.ensure_cooled_down(platform.security.trade_cooldown_secs, now)?;
        let plan = price_buy(self.pool, platform, trader.total_volume_sol, sol_in)?;

        require!(plan.amount_out >= min_tokens_out, PumpError::SlippageExceeded);
        ensure_price_impact(&plan, platform)?;

        let wallet_cap = mul_div_floor(
            self.pool.total_supply as u128,
            platform.security.max_wallet_percentage as u128,
            BPS_DENOMINATOR as u128,
        )?;
        let balance_after = math::checked_add(holder_balance, plan.amount_out)?;
        require!(balance_after <= wallet_cap, PumpError::WalletLimitExceeded);

        Ok(self.commit(plan, trader, now))
    }

    /// Sell `tokens_in` back to the curve.
    ///
    /// `holder_balance` is the seller's token balance before the trade.
    pub fn sell(
        &mut self,
        platform: &PlatformConfig,
        trader: &mut TraderProfile,
        holder_balance: u64,
        tokens_in: u64,
        min_sol_out: u64,
        now: i64,
    ) -> Result<TradeReceipt> {
        ensure_tradable(self.pool, platform, tokens_in)?;
        require!(holder_balance >= tokens_in, PumpError::InsufficientBalance);
        trader.ensure_cooled_down(platform.security.trade_cooldown_secs, now)?;

        let plan = price_sell(self.pool, platform, trader.total_volume_sol, tokens_in)?;
        require!(plan.amount_out >= min_sol_out, PumpError::SlippageExceeded);
        ensure_price_impact(&plan, platform)?;

        Ok(self.commit(plan, trader, now))
    }

    fn commit(&mut self, plan: TradePlan, trader: &mut TraderProfile, now: i64) -> TradeReceipt {
        let new_market_cap = plan.market_cap_after();
        let pool = &mut *self.pool;

        pool.sol_reserves = plan.reserves.sol;
        pool.token_reserves = plan.reserves.token;
        pool.current_price = plan.reserves.price;
        pool.current_market_cap = new_market_cap;
        pool.total_volume_sol = pool.total_volume_sol.saturating_add(plan.sol_volume);
        pool.trade_count = pool.trade_count.saturating_add(1);
        pool.last_trade_at = now;

        trader.record_trade(plan.sol_volume, now);

        TradeReceipt {
            side: plan.side,
            amount_in: plan.amount_in,
            amount_out: plan.amount_out,
            platform_fee: plan.platform_fee,
            whale_tax: plan.whale_tax,
            curve_fee: plan.curve_fee,
            reserve_delta: plan.reserve_delta,
            sol_volume: plan.sol_volume,
            new_price: plan.reserves.price,
            new_market_cap,
            price_impact_bps: plan.price_impact_bps(),
        }
    }
}

impl Deref for TradeLock<'_> {
    type Target = Pool;

    fn deref(&self) -> &Pool {
        &*self.pool
    }
}

impl Drop for TradeLock<'_> {
    fn drop(&mut self) {
        self.pool.trading_locked = false;
    }
}

/// Lock, buy, unlock.
pub fn execute_buy(
    pool: &mut Pool,
    platform: &PlatformConfig,
    trader: &mut TraderProfile,
    holder_balance: u64,
    sol_in: u64,
    min_tokens_out: u64,
    now: i64,
) -> Result<TradeReceipt> {
    let mut lock = TradeLock::acquire(pool)?;
    lock.buy(platform, trader, holder_balance, sol_in, min_tokens_out, now)
}

/// Lock, sell, unlock.
pub fn execute_sell(
    pool: &mut Pool,
    platform: &PlatformConfig,
    trader: &mut TraderProfile,
    holder_balance: u64,
    tokens_in: u64,
    min_sol_out: u64,
    now: i64,
) -> Result<TradeReceipt> {
    let mut lock = TradeLock::acquire(pool)?;
    lock.sell(platform, trader, holder_balance, tokens_in, min_sol_out, now)
}

/// Preview a trade without locking or mutating the pool.
///
/// `trader_volume` is the caller's lifetime volume, used only to decide the
/// whale tax. Cooldown and price impact limits are not applied.
pub fn quote(
    pool: &Pool,
    platform: &PlatformConfig,
    trader_volume: u64,
    side: TradeSide,
    amount: u64,
) -> Result<PriceQuote> {
    ensure_tradable(pool, platform, amount)?;
    let plan = match side {
        TradeSide::Buy => price_buy(pool, platform, trader_volume, amount)?,
        TradeSide::Sell => price_sell(pool, platform, trader_volume, amount)?,
    };

    Ok(PriceQuote {
        side,
        amount_in: plan.amount_in,
        amount_out: plan.amount_out,
        platform_fee: plan.platform_fee,
        whale_tax: plan.whale_tax,
        curve_fee: plan.curve_fee,
        price_before: plan.price_before,
        price_after: plan.reserves.price,
        market_cap_after: plan.market_cap_after(),
        price_impact_bps: plan.price_impact_bps(),
    })
}

/// Move a pool to its terminal graduated state.
pub fn graduate(pool: &mut Pool, platform: &PlatformConfig) -> Result<()> {
    require!(!pool.trading_locked, PumpError::TradeInProgress);
    require!(!pool.graduated, PumpError::PoolGraduated);
    require!(
        pool.sol_reserves >= platform.graduation_threshold,
        PumpError::GraduationThresholdNotMet
    );
    pool.graduated = true;
    Ok(())
}

fn ensure_tradable(pool: &Pool, platform: &PlatformConfig, amount: u64) -> Result<()> {
    require!(!pool.graduated, PumpError::PoolGraduated);
    require!(!platform.trading_locked, PumpError::TradingHalted);
    require!(amount > 0, PumpError::InvalidAmount);
    Ok(())
}

fn ensure_price_impact(plan: &TradePlan, platform: &PlatformConfig) -> Result<()> {
    require!(
        plan.price_impact_bps() <= platform.security.max_price_impact_bps,
        PumpError::SlippageExceeded
    );
    Ok(())
}

/// Whale tax on `sol_amount`, zero unless the trade or the wallet is large.
fn whale_tax(platform: &PlatformConfig, trader_volume: u64, sol_amount: u64) -> Result<u64> {
    let security = &platform.security;
    if sol_amount >= security.whale_threshold || trader_volume >= security.whale_threshold {
        apply_bps(sol_amount, security.whale_tax_bps)
    } else {
        Ok(0)
    }
}

fn price_buy(
    pool: &Pool,
    platform: &PlatformConfig,
    trader_volume: u64,
    sol_in: u64,
) -> Result<TradePlan> {
    require!(
        sol_in <= platform.security.max_trade_size,
        PumpError::TradeSizeExceeded
    );

    let platform_fee = apply_bps(sol_in, platform.fee_bps)?;
    let whale_tax = whale_tax(platform, trader_volume, sol_in)?;
    let curve_in = checked_sub(sol_in, platform_fee + whale_tax)?;
    let reserves = pool.reserves();
    let quote = quote_buy(&reserves, &pool.curve, curve_in)?;

    Ok(TradePlan {
        side: TradeSide::Buy,
        amount_in: sol_in,
        amount_out: quote.amount_out,
        platform_fee,
        whale_tax,
        curve_fee: quote.curve_fee,
        reserve_delta: curve_in,
        sol_volume: sol_in,
        price_before: reserves.price,
        reserves: quote.reserves,
    })
}

fn price_sell(
    pool: &Pool,
    platform: &PlatformConfig,
    trader_volume: u64,
    tokens_in: u64,
) -> Result<TradePlan> {
    let reserves = pool.reserves();
    let quote = quote_sell(&reserves, &pool.curve, tokens_in)?;
    let gross = quote.amount_out;
    require!(
        gross <= platform.security.max_trade_size,
        PumpError::TradeSizeExceeded
    );

    let platform_fee = apply_bps(gross, platform.fee_bps)?;
    let whale_tax = whale_tax(platform, trader_volume, gross)?;

    Ok(TradePlan {
        side: TradeSide::Sell,
        amount_in: tokens_in,
        amount_out: checked_sub(gross, platform_fee + whale_tax)?,
        platform_fee,
        whale_tax,
        curve_fee: quote.curve_fee,
        reserve_delta: gross,
        sol_volume: gross,
        price_before: reserves.price,
        reserves: quote.reserves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::constant_product_price;
    use crate::constants::{PRICE_SCALE, TOKEN_UNIT};
    use crate::errors::assert_pump_error;
    use crate::state::{CurveParams, SecurityParams};
    use proptest::prelude::*;

    fn platform(fee_bps: u16) -> PlatformConfig {
        PlatformConfig {
            admin: Pubkey::new_unique(),
            treasury: Pubkey::new_unique(),
            fee_bps,
            security: SecurityParams {
                max_trade_size: 1_000_000_000_000,
                max_wallet_percentage: 10_000,
                max_tokens_per_creator: 5,
                min_reputation_to_create: 0,
                creation_cooldown_secs: 0,
                whale_threshold: u64::MAX,
                whale_tax_bps: 0,
                trade_cooldown_secs: 0,
                max_price_impact_bps: 10_000,
            },
            trading_locked: false,
            min_initial_liquidity: 1,
            graduation_threshold: 2_000,
            total_tokens_created: 0,
            total_trades: 0,
            total_volume_sol: 0,
            total_fees_collected: 0,
            bump: 255,
        }
    }

    fn pool(sol: u64, token: u64, curve: CurveParams) -> Pool {
        let current_price = match curve {
            CurveParams::ConstantProduct { .. } => constant_product_price(sol, token).unwrap(),
            CurveParams::Linear { base_price, .. }
            | CurveParams::Exponential { base_price, .. } => base_price,
        };
        Pool {
            mint: Pubkey::new_unique(),
            creator: Pubkey::new_unique(),
            sol_reserves: sol,
            token_reserves: token,
            total_supply: token,
            curve,
            current_price,
            current_market_cap: 0,
            trading_locked: false,
            graduated: false,
            total_volume_sol: 0,
            trade_count: 0,
            created_at: 0,
            last_trade_at: 0,
            bump: 254,
        }
    }

    fn trader() -> TraderProfile {
        TraderProfile::default()
    }

    fn cp_pool(sol: u64, token: u64) -> Pool {
        pool(sol, token, CurveParams::ConstantProduct { fee_bps: 0 })
    }

    fn snapshot(pool: &Pool) -> (u64, u64, u64, u64) {
        (
            pool.sol_reserves,
            pool.token_reserves,
            pool.current_price,
            pool.current_market_cap,
        )
    }

    #[test]
    fn test_reference_buy_commits_state() {
        let mut pool = cp_pool(1_000, 1_000);
        let receipt = execute_buy(&mut pool, &platform(0), &mut trader(), 0, 100, 90, 42).unwrap();

        assert_eq!(receipt.amount_out, 90);
        assert_eq!(receipt.reserve_delta, 100);
        assert_eq!(pool.sol_reserves, 1_100);
        assert_eq!(pool.token_reserves, 910);
        assert_eq!(pool.current_price, receipt.new_price);
        assert_eq!(pool.current_market_cap, market_cap(receipt.new_price, 90));
        assert_eq!(pool.trade_count, 1);
        assert_eq!(pool.last_trade_at, 42);
        assert!(!pool.trading_locked);
    }

    #[test]
    fn test_held_lock_rejects_second_trade() {
        let mut pool = cp_pool(1_000, 1_000);
        let guard = TradeLock::acquire(&mut pool).unwrap();
        // simulate an outer call that never released its lock
        std::mem::forget(guard);
        assert!(pool.trading_locked);

        let before = snapshot(&pool);
        assert_pump_error(
            execute_buy(&mut pool, &platform(0), &mut trader(), 0, 100, 0, 0),
            PumpError::TradeInProgress,
        );
        assert_pump_error(
            execute_sell(&mut pool, &platform(0), &mut trader(), 100, 10, 0, 0),
            PumpError::TradeInProgress,
        );
        assert_eq!(snapshot(&pool), before);
        assert!(pool.trading_locked);
    }

    #[test]
    fn test_lock_released_after_failure() {
        let mut pool = cp_pool(1_000, 1_000);
        let before = snapshot(&pool);

        assert_pump_error(
            execute_buy(&mut pool, &platform(0), &mut trader(), 0, 0, 0, 0),
            PumpError::InvalidAmount,
        );
        assert_eq!(snapshot(&pool), before);
        assert_eq!(pool.trade_count, 0);
        assert!(!pool.trading_locked);

        // slippage fails after pricing, still nothing committed
        assert_pump_error(
            execute_buy(&mut pool, &platform(0), &mut trader(), 0, 100, 91, 0),
            PumpError::SlippageExceeded,
        );
        assert_eq!(snapshot(&pool), before);
        assert!(!pool.trading_locked);
    }

    #[test]
    fn test_guard_derefs_to_pool() {
        let mut pool = cp_pool(1_000, 1_000);
        {
            let guard = TradeLock::acquire(&mut pool).unwrap();
            assert!(guard.trading_locked);
            assert_eq!(guard.sol_reserves, 1_000);
        }
        assert!(!pool.trading_locked);
    }

    #[test]
    fn test_graduated_pool_refuses_trades() {
        let mut pool = cp_pool(1_000, 1_000);
        pool.graduated = true;
        assert_pump_error(
            execute_buy(&mut pool, &platform(0), &mut trader(), 0, 100, 0, 0),
            PumpError::PoolGraduated,
        );
        assert_pump_error(
            quote(&pool, &platform(0), 0, TradeSide::Buy, 100),
            PumpError::PoolGraduated,
        );
    }

    #[test]
    fn test_global_halt() {
        let mut pool = cp_pool(1_000, 1_000);
        let mut halted = platform(0);
        halted.trading_locked = true;
        assert_pump_error(
            execute_sell(&mut pool, &halted, &mut trader(), 100, 10, 0, 0),
            PumpError::TradingHalted,
        );
        assert!(!pool.trading_locked);
    }

    #[test]
    fn test_trade_size_limits() {
        let mut pool = cp_pool(1_000_000, 1_000_000);
        let mut limited = platform(0);
        limited.security.max_trade_size = 500;

        assert_pump_error(
            execute_buy(&mut pool, &limited, &mut trader(), 0, 501, 0, 0),
            PumpError::TradeSizeExceeded,
        );
        assert!(execute_buy(&mut pool, &limited, &mut trader(), 0, 500, 0, 0).is_ok());

        // selling 2000 tokens pays out well over 500 lamports
        assert_pump_error(
            execute_sell(&mut pool, &limited, &mut trader(), 2_000, 2_000, 0, 0),
            PumpError::TradeSizeExceeded,
        );
    }

    #[test]
    fn test_sell_requires_balance() {
        let mut pool = cp_pool(1_000, 1_000);
        assert_pump_error(
            execute_sell(&mut pool, &platform(0), &mut trader(), 9, 10, 0, 0),
            PumpError::InsufficientBalance,
        );
    }

    #[test]
    fn test_wallet_limit() {
        let mut pool = cp_pool(1_000, 1_000);
        let mut capped = platform(0);
        // 5% of 1000 tokens
        capped.security.max_wallet_percentage = 500;

        assert_pump_error(
            execute_buy(&mut pool, &capped, &mut trader(), 0, 100, 0, 0),
            PumpError::WalletLimitExceeded,
        );
        assert_eq!(pool.sol_reserves, 1_000);

        // 5 lamports buys 4 tokens: 46 + 4 = 50 stays within the cap
        let receipt = execute_buy(&mut pool, &capped, &mut trader(), 46, 5, 0, 0).unwrap();
        assert_eq!(receipt.amount_out, 4);
    }

    #[test]
    fn test_platform_fee_goes_to_treasury_not_reserves() {
        let mut pool = cp_pool(1_000_000, 1_000_000);
        // 1% platform fee
        let receipt = execute_buy(&mut pool, &platform(100), &mut trader(), 0, 10_000, 0, 0).unwrap();
        assert_eq!(receipt.platform_fee, 100);
        assert_eq!(receipt.reserve_delta, 9_900);
        assert_eq!(pool.sol_reserves, 1_009_900);

        let sold = execute_sell(&mut pool, &platform(100), &mut trader(), receipt.amount_out, 1_000, 0, 0).unwrap();
        assert_eq!(sold.platform_fee, sold.reserve_delta / 100);
        assert_eq!(sold.amount_out + sold.platform_fee, sold.reserve_delta);
        assert_eq!(pool.sol_reserves, 1_009_900 - sold.reserve_delta);
    }

    #[test]
    fn test_sell_slippage_checked_on_net_output() {
        let mut pool = cp_pool(1_000_000, 1_000_000);
        let preview = quote(&pool, &platform(100), 0, TradeSide::Sell, 10_000).unwrap();
        assert_pump_error(
            execute_sell(&mut pool, &platform(100), &mut trader(), 10_000, 10_000, preview.amount_out + 1, 0),
            PumpError::SlippageExceeded,
        );
        let receipt =
            execute_sell(&mut pool, &platform(100), &mut trader(), 10_000, 10_000, preview.amount_out, 0).unwrap();
        assert_eq!(receipt.amount_out, preview.amount_out);
    }

    #[test]
    fn test_quote_matches_trade_and_mutates_nothing() {
        let curve = CurveParams::Linear {
            base_price: PRICE_SCALE,
            slope: PRICE_SCALE,
        };
        let mut pool = pool(1, 10 * TOKEN_UNIT, curve);
        let before = snapshot(&pool);

        let preview = quote(&pool, &platform(50), 0, TradeSide::Buy, 1_000_000_000).unwrap();
        assert_eq!(snapshot(&pool), before);
        assert!(!pool.trading_locked);

        let receipt = execute_buy(&mut pool, &platform(50), &mut trader(), 0, 1_000_000_000, 0, 0).unwrap();
        assert_eq!(receipt.amount_out, preview.amount_out);
        assert_eq!(receipt.new_price, preview.price_after);
        assert_eq!(receipt.new_market_cap, preview.market_cap_after);
        assert_eq!(receipt.price_impact_bps, preview.price_impact_bps);
        assert!(receipt.new_price > PRICE_SCALE);
    }

    #[test]
    fn test_graduation() {
        let mut pool = cp_pool(1_000, 1_000);
        let config = platform(0);

        assert_pump_error(graduate(&mut pool, &config), PumpError::GraduationThresholdNotMet);
        execute_buy(&mut pool, &config, &mut trader(), 0, 1_000, 0, 0).unwrap();
        assert!(pool.sol_reserves >= config.graduation_threshold);

        graduate(&mut pool, &config).unwrap();
        assert!(pool.graduated);
        assert_pump_error(graduate(&mut pool, &config), PumpError::PoolGraduated);
        assert_pump_error(
            execute_sell(&mut pool, &config, &mut trader(), 10, 10, 0, 0),
            PumpError::PoolGraduated,
        );
    }

    #[test]
    fn test_graduation_refused_while_locked() {
        let mut pool = cp_pool(5_000, 1_000);
        pool.trading_locked = true;
        assert_pump_error(graduate(&mut pool, &platform(0)), PumpError::TradeInProgress);
        assert!(!pool.graduated);
    }

    #[test]
    fn test_whale_tax_goes_to_treasury() {
        let mut pool = cp_pool(1_000_000_000, 1_000_000_000);
        let mut config = platform(100);
        config.security.whale_threshold = 10_000;
        config.security.whale_tax_bps = 200;

        let small = execute_buy(&mut pool, &config, &mut trader(), 0, 9_999, 0, 0).unwrap();
        assert_eq!(small.whale_tax, 0);
        assert_eq!(small.treasury_amount(), small.platform_fee);

        let large = execute_buy(&mut pool, &config, &mut trader(), 0, 10_000, 0, 0).unwrap();
        assert_eq!(large.platform_fee, 100);
        assert_eq!(large.whale_tax, 200);
        assert_eq!(large.treasury_amount(), 300);
        assert_eq!(large.reserve_delta, 9_700);
    }

    #[test]
    fn test_whale_tax_follows_trader_volume() {
        let mut pool = cp_pool(1_000_000_000, 1_000_000_000);
        let mut config = platform(0);
        config.security.whale_threshold = 10_000;
        config.security.whale_tax_bps = 200;

        let mut whale = trader();
        whale.total_volume_sol = 10_000;
        let bought = execute_buy(&mut pool, &config, &mut whale, 0, 1_000, 0, 0).unwrap();
        assert_eq!(bought.whale_tax, 20);
        assert_eq!(bought.reserve_delta, 980);
        assert_eq!(whale.total_volume_sol, 11_000);

        let preview = quote(&pool, &config, whale.total_volume_sol, TradeSide::Sell, 500).unwrap();
        let sold = execute_sell(&mut pool, &config, &mut whale, bought.amount_out, 500, 0, 0).unwrap();
        assert!(sold.whale_tax > 0);
        assert_eq!(sold.whale_tax, preview.whale_tax);
        assert_eq!(sold.amount_out + sold.treasury_amount(), sold.reserve_delta);
    }

    #[test]
    fn test_trade_cooldown_per_wallet() {
        let mut pool = cp_pool(1_000_000, 1_000_000);
        let mut config = platform(0);
        config.security.trade_cooldown_secs = 30;
        let mut wallet = trader();

        let bought = execute_buy(&mut pool, &config, &mut wallet, 0, 1_000, 0, 100).unwrap();
        assert_eq!(wallet.trade_count, 1);
        assert_eq!(wallet.last_trade_at, 100);

        let before = snapshot(&pool);
        assert_pump_error(
            execute_sell(&mut pool, &config, &mut wallet, bought.amount_out, 10, 0, 129),
            PumpError::TradeCooldownActive,
        );
        assert_eq!(snapshot(&pool), before);
        assert_eq!(wallet.trade_count, 1);
        assert!(!pool.trading_locked);

        // another wallet is not held back
        assert!(execute_buy(&mut pool, &config, &mut trader(), 0, 1_000, 0, 129).is_ok());
        assert!(execute_sell(&mut pool, &config, &mut wallet, bought.amount_out, 10, 0, 130).is_ok());
        assert_eq!(wallet.last_trade_at, 130);
    }

    #[test]
    fn test_price_impact_limit() {
        let mut pool = cp_pool(1_000, 1_000);
        let mut config = platform(0);

        let buy = quote(&pool, &config, 0, TradeSide::Buy, 100).unwrap();
        assert_eq!(buy.price_impact_bps, 2_087);
        config.security.max_price_impact_bps = buy.price_impact_bps - 1;
        let before = snapshot(&pool);
        assert_pump_error(
            execute_buy(&mut pool, &config, &mut trader(), 0, 100, 0, 0),
            PumpError::SlippageExceeded,
        );
        assert_eq!(snapshot(&pool), before);
        assert!(!pool.trading_locked);

        let sell = quote(&pool, &config, 0, TradeSide::Sell, 100).unwrap();
        config.security.max_price_impact_bps = sell.price_impact_bps - 1;
        assert_pump_error(
            execute_sell(&mut pool, &config, &mut trader(), 100, 100, 0, 0),
            PumpError::SlippageExceeded,
        );

        config.security.max_price_impact_bps = buy.price_impact_bps;
        let receipt = execute_buy(&mut pool, &config, &mut trader(), 0, 100, 0, 0).unwrap();
        assert_eq!(receipt.price_impact_bps, buy.price_impact_bps);
    }

    proptest! {
        #[test]
        fn prop_round_trip_never_profits(
            sol in 1_000u64..1_000_000_000_000,
            token in 1_000u64..1_000_000_000_000_000,
            sol_in in 1u64..1_000_000_000_000,
            fee_bps in 0u16..=1_000,
            curve_fee in 0u16..=1_000,
        ) {
            let mut pool = pool(sol, token, CurveParams::ConstantProduct { fee_bps: curve_fee });
            let config = platform(fee_bps);
            if let Ok(bought) = execute_buy(&mut pool, &config, &mut trader(), 0, sol_in, 0, 0) {
                if let Ok(sold) = execute_sell(&mut pool, &config, &mut trader(), bought.amount_out, bought.amount_out, 0, 0) {
                    prop_assert!(sold.amount_out <= sol_in);
                }
            }
            prop_assert!(!pool.trading_locked);
        }

        #[test]
        fn prop_linear_round_trip_never_profits(
            base_price in 1u64..10_000_000_000,
            slope in 0u64..1_000_000,
            sol_in in 1u64..1_000_000_000_000,
        ) {
            let curve = CurveParams::Linear { base_price, slope };
            let mut pool = pool(1_000_000_000, 1_000_000_000 * TOKEN_UNIT, curve);
            let config = platform(0);
            if let Ok(bought) = execute_buy(&mut pool, &config, &mut trader(), 0, sol_in, 0, 0) {
                if let Ok(sold) = execute_sell(&mut pool, &config, &mut trader(), bought.amount_out, bought.amount_out, 0, 0) {
                    prop_assert!(sold.amount_out <= sol_in);
                }
            }
            prop_assert!(!pool.trading_locked);
        }

        #[test]
        fn prop_exponential_round_trip_never_profits(
            base_price in 1u64..1_000_000_000,
            growth_rate in 1u64..40,
            sol_in in 1u64..1_000_000_000_000,
        ) {
            let curve = CurveParams::Exponential { base_price, growth_rate };
            let mut pool = pool(1_000_000_000, 1_000_000_000 * TOKEN_UNIT, curve);
            let config = platform(0);
            if let Ok(bought) = execute_buy(&mut pool, &config, &mut trader(), 0, sol_in, 0, 0) {
                if let Ok(sold) = execute_sell(&mut pool, &config, &mut trader(), bought.amount_out, bought.amount_out, 0, 0) {
                    prop_assert!(sold.amount_out <= sol_in);
                }
            }
            prop_assert!(!pool.trading_locked);
        }

        #[test]
        fn prop_failed_trades_leave_pool_untouched(
            sol in 1u64..1_000_000,
            token in 1u64..1_000_000,
            amount in 0u64..2_000_000,
            min_out in 0u64..2_000_000,
            buy in any::<bool>(),
        ) {
            let mut pool = cp_pool(sol.max(1), token.max(1));
            let before = snapshot(&pool);
            let result = if buy {
                execute_buy(&mut pool, &platform(0), &mut trader(), 0, amount, min_out, 0)
            } else {
                execute_sell(&mut pool, &platform(0), &mut trader(), amount, amount, min_out, 0)
            };
            if result.is_err() {
                prop_assert_eq!(snapshot(&pool), before);
                prop_assert_eq!(pool.trade_count, 0);
            }
            prop_assert!(!pool.trading_locked);
        }
    }
}
