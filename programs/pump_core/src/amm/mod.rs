//! # Bonding Curve Pricing
//!
//! Everything that turns reserves and an input amount into an output amount
//! and a new spot price. Nothing in here touches accounts.
//!
//! ```text
//!   ┌──────────────┐   quote_buy / quote_sell   ┌──────────────────┐
//!   │ PoolReserves │ ─────────────────────────▶ │ CurveQuote       │
//!   │ CurveParams  │                            │  amount_out      │
//!   │ amount_in    │                            │  curve_fee       │
//!   └──────────────┘                            │  reserves'       │
//!          │                                    └──────────────────┘
//!          ▼
//!   math         checked u64/u128 primitives, fast/safe swap dispatch
//!   exponential  the only floating point, bounded approximation
//! ```

pub mod curve;
pub mod exponential;
pub mod math;

pub use curve::*;
