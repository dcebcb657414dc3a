// SPDX-License-Identifier: MIT
// ReplicaSwap Curve Package
//
// The covered-call trading function: per-liquidity reserves (x, y)
// tied to price through the Gaussian CDF, parameterised by strike,
// implied volatility and time to maturity.

#![no_std]

use soroban_sdk::contracterror;

pub mod normal;
pub mod units;

pub use normal::{
    amount_out, compute_reserves, invariant, max_input, price_of_x, x_of_price, x_of_y, y_of_x,
    CurveParams,
};
pub use units::{bps_to_wad, seconds_to_wad_years, tau_wad, SECONDS_PER_YEAR};

/// Curve-level failures (800 range)
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CurveError {
    /// The trading function has no price at this point
    UndefinedPrice = 800,
}
