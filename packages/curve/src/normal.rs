// SPDX-License-Identifier: MIT
// Covered-Call Trading Function
//
// Per-liquidity reserves: x in (0, WAD], y in (0, strike].
//   x(S)        = 1 - Phi((ln(S/K) + (sigma^2/2) tau) / (sigma sqrt(tau)))
//   S(x)        = K * exp(Phi^-1(1-x) * sigma sqrt(tau) - sigma^2 tau / 2)
//   y(x)        = K * Phi(Phi^-1(1-x) - sigma sqrt(tau)) + invariant
//   k(x, y)     = y - K * Phi(Phi^-1(1-x) - sigma sqrt(tau))

use soroban_sdk::{panic_with_error, Env};

use replicaswap_math::constants::WAD;
use replicaswap_math::{
    div_wad_down, exp_wad, gaussian_cdf, gaussian_ppf, ln_wad, mul_wad_down, sdiv_wad, smul_wad,
    sqrt_wad, MathError,
};

use crate::CurveError;

/// Slack added to the inverted x reserve when quoting quote->asset
/// swaps, so the rebuilt invariant can never undercut the pre-swap
/// one by inversion noise. One part in 1e10 of a unit of liquidity.
const X_INVERSION_GUARD: u128 = 100_000_000;

/// Curve parameters in WAD terms. `tau_wad == 0` or `sigma_wad == 0`
/// degenerates the function to its expiry form.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CurveParams {
    pub strike: u128,
    pub sigma_wad: u128,
    pub tau_wad: u128,
}

impl CurveParams {
    pub fn degenerate(&self) -> bool {
        self.tau_wad == 0 || self.sigma_wad == 0
    }

    /// sigma * sqrt(tau), the total standard deviation to maturity
    fn sigma_sqrt_tau(&self, env: &Env) -> i128 {
        mul_wad_down(env, self.sigma_wad, sqrt_wad(env, self.tau_wad)) as i128
    }

    /// sigma^2 * tau / 2
    fn half_sigma_sq_tau(&self, env: &Env) -> i128 {
        let sigma_sq = mul_wad_down(env, self.sigma_wad, self.sigma_wad);
        (mul_wad_down(env, sigma_sq, self.tau_wad) / 2) as i128
    }
}

/// Asset reserve per liquidity for a given price
pub fn x_of_price(env: &Env, price: u128, params: &CurveParams) -> u128 {
    if params.strike == 0 || price == 0 {
        panic_with_error!(env, CurveError::UndefinedPrice);
    }
    if params.degenerate() {
        return 0;
    }

    let ratio = div_wad_down(env, price, params.strike);
    if ratio == 0 {
        panic_with_error!(env, CurveError::UndefinedPrice);
    }

    let d1 = sdiv_wad(
        env,
        ln_wad(env, ratio) + params.half_sigma_sq_tau(env),
        params.sigma_sqrt_tau(env),
    );
    WAD - gaussian_cdf(env, d1)
}

/// Price reported for an asset reserve per liquidity
pub fn price_of_x(env: &Env, x: u128, params: &CurveParams) -> u128 {
    if x == 0 {
        panic_with_error!(env, CurveError::UndefinedPrice);
    }
    if x > WAD {
        panic_with_error!(env, MathError::OverflowWad);
    }
    if params.degenerate() {
        return params.strike;
    }
    if x == WAD {
        return 0;
    }

    let d = gaussian_ppf(env, WAD - x);
    let arg = smul_wad(env, d, params.sigma_sqrt_tau(env)) - params.half_sigma_sq_tau(env);
    mul_wad_down(env, params.strike, exp_wad(env, arg))
}

/// Quote side of the trading function at zero invariant
fn quote_of_x(env: &Env, x: u128, params: &CurveParams) -> u128 {
    if x >= WAD {
        return 0;
    }
    if x == 0 {
        return params.strike;
    }
    if params.degenerate() {
        return mul_wad_down(env, params.strike, WAD - x);
    }

    let d = gaussian_ppf(env, WAD - x);
    let arg = d - params.sigma_sqrt_tau(env);
    mul_wad_down(env, params.strike, gaussian_cdf(env, arg))
}

/// Quote reserve per liquidity for an asset reserve and invariant
pub fn y_of_x(env: &Env, x: u128, params: &CurveParams, inv: i128) -> u128 {
    let base = quote_of_x(env, x, params) as i128 + inv;
    if base < 0 {
        0
    } else {
        base as u128
    }
}

/// Asset reserve per liquidity for a quote reserve and invariant
pub fn x_of_y(env: &Env, y: u128, params: &CurveParams, inv: i128) -> u128 {
    if params.strike == 0 {
        panic_with_error!(env, CurveError::UndefinedPrice);
    }

    let adjusted = y as i128 - inv;
    if adjusted <= 0 {
        return WAD;
    }
    let ratio = div_wad_down(env, adjusted as u128, params.strike);
    if ratio == 0 {
        return WAD;
    }
    if ratio >= WAD {
        return 0;
    }
    if params.degenerate() {
        return WAD - ratio;
    }

    let d = gaussian_ppf(env, ratio);
    WAD - gaussian_cdf(env, d + params.sigma_sqrt_tau(env))
}

/// The trading-function invariant k(x, y); non-negative for a healthy pool
pub fn invariant(env: &Env, x: u128, y: u128, params: &CurveParams) -> i128 {
    y as i128 - quote_of_x(env, x, params) as i128
}

/// Reserves (y, x) per liquidity for a price and invariant
pub fn compute_reserves(env: &Env, price: u128, params: &CurveParams, inv: i128) -> (u128, u128) {
    let x = x_of_price(env, price, params);
    (y_of_x(env, x, params, inv), x)
}

/// Largest WAD input the pool can absorb before the independent
/// reserve saturates: x stops at WAD, y stops at the strike.
pub fn max_input(
    env: &Env,
    params: &CurveParams,
    sell_asset: bool,
    x: u128,
    y: u128,
    liquidity: u128,
) -> u128 {
    if sell_asset {
        mul_wad_down(env, WAD.saturating_sub(x), liquidity)
    } else {
        mul_wad_down(env, params.strike.saturating_sub(y), liquidity)
    }
}

/// Move the independent reserve by `delta_per_liq` and rebuild the
/// dependent one through the trading function at the same invariant.
/// Returns (next_independent, next_dependent, output) per liquidity,
/// where independent/dependent follow the swap direction. The rebuilt
/// dependent reserve keeps one unit of slack, so a quoted trade always
/// moves the invariant strictly up.
pub fn amount_out(
    env: &Env,
    params: &CurveParams,
    sell_asset: bool,
    x: u128,
    y: u128,
    delta_per_liq: u128,
    inv: i128,
) -> (u128, u128, u128) {
    if sell_asset {
        let next_x = (x + delta_per_liq).min(WAD);
        let next_y = y_of_x(env, next_x, params, inv).saturating_add(1);
        let out = y.saturating_sub(next_y);
        (next_x, next_y.min(y), out)
    } else {
        let next_y = y + delta_per_liq;
        let next_x = x_of_y(env, next_y, params, inv)
            .saturating_add(X_INVERSION_GUARD)
            .min(WAD);
        let out = x.saturating_sub(next_x);
        (next_y, next_x.min(x), out)
    }
}
