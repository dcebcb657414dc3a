// SPDX-License-Identifier: MIT
// Gaussian CDF and Quantile on WAD Values
//
// erfc uses the classic rational approximation (Numerical Recipes form,
// fractional error below 1.2e-7 everywhere); the inverse refines a
// rational initial guess with two Newton steps against this same erfc,
// so quantile/CDF round trips are self-consistent to far better than
// the raw approximation error.

use soroban_sdk::{panic_with_error, Env};

use crate::constants::{
    ERFC_DOMAIN_CUTOFF, SQRT2_WAD, TWO_OVER_SQRT_PI_WAD, WAD, WAD_I,
};
use crate::transcend::{exp_wad, ln_wad};
use crate::wad::{div_wad_down, sdiv_wad, smul_wad, sqrt_wad};
use crate::MathError;

// erfc polynomial coefficients, WAD scale
const ERFC_C0: i128 = 1_265_512_230_000_000_000;
const ERFC_C1: i128 = 1_000_023_680_000_000_000;
const ERFC_C2: i128 = 374_091_960_000_000_000;
const ERFC_C3: i128 = 96_784_180_000_000_000;
const ERFC_C4: i128 = 186_288_060_000_000_000;
const ERFC_C5: i128 = 278_868_070_000_000_000;
const ERFC_C6: i128 = 1_135_203_980_000_000_000;
const ERFC_C7: i128 = 1_488_515_870_000_000_000;
const ERFC_C8: i128 = 822_152_230_000_000_000;
const ERFC_C9: i128 = 170_872_770_000_000_000;

// ierfc initial-guess coefficients, WAD scale
const IERFC_A: i128 = 707_110_000_000_000_000;
const IERFC_B: i128 = 2_307_530_000_000_000_000;
const IERFC_C: i128 = 270_610_000_000_000_000;
const IERFC_D: i128 = 992_290_000_000_000_000;
const IERFC_E: i128 = 44_810_000_000_000_000;

/// Complementary error function, result in [0, 2*WAD]
pub fn erfc_wad(env: &Env, z: i128) -> u128 {
    if z >= ERFC_DOMAIN_CUTOFF {
        return 0;
    }
    if z <= -ERFC_DOMAIN_CUTOFF {
        return 2 * WAD;
    }

    let az = z.unsigned_abs();
    let t = div_wad_down(env, WAD, WAD + az / 2) as i128;

    let mut poly = ERFC_C9;
    poly = -ERFC_C8 + t * poly / WAD_I;
    poly = ERFC_C7 + t * poly / WAD_I;
    poly = -ERFC_C6 + t * poly / WAD_I;
    poly = ERFC_C5 + t * poly / WAD_I;
    poly = -ERFC_C4 + t * poly / WAD_I;
    poly = ERFC_C3 + t * poly / WAD_I;
    poly = ERFC_C2 + t * poly / WAD_I;
    poly = ERFC_C1 + t * poly / WAD_I;

    let zsq = (z * z) / WAD_I;
    let arg = -zsq - ERFC_C0 + t * poly / WAD_I;
    let gauss = exp_wad(env, arg) as i128;

    let ans = (t * gauss / WAD_I).clamp(0, 2 * WAD_I);
    if z >= 0 {
        ans as u128
    } else {
        (2 * WAD_I - ans) as u128
    }
}

/// Standard normal CDF, result in [0, WAD]
pub fn gaussian_cdf(env: &Env, x: i128) -> u128 {
    let arg = sdiv_wad(env, -x, SQRT2_WAD);
    erfc_wad(env, arg) / 2
}

/// Inverse complementary error function on (0, 2*WAD)
pub fn ierfc_wad(env: &Env, x: u128) -> i128 {
    if x == 0 || x >= 2 * WAD {
        panic_with_error!(env, MathError::InvalidProbability);
    }

    let xx = if x < WAD { x } else { 2 * WAD - x };

    // t = sqrt(-2 * ln(xx / 2))
    let half = (xx / 2).max(1);
    let neg_two_ln = (-2 * ln_wad(env, half)) as u128;
    let t = sqrt_wad(env, neg_two_ln) as i128;

    // rational initial guess
    let num = IERFC_B + t * IERFC_C / WAD_I;
    let den = WAD_I + t * (IERFC_D + t * IERFC_E / WAD_I) / WAD_I;
    let mut r = -IERFC_A * (sdiv_wad(env, num, den) - t) / WAD_I;

    // two Newton steps against erfc_wad
    let mut step = 0;
    while step < 2 {
        let err = erfc_wad(env, r) as i128 - xx as i128;
        let rsq = (r * r) / WAD_I;
        let gauss = exp_wad(env, -rsq) as i128;
        let slope = TWO_OVER_SQRT_PI_WAD * gauss / WAD_I - r * err / WAD_I;
        if slope != 0 {
            r += sdiv_wad(env, err, slope);
        }
        step += 1;
    }

    if x < WAD {
        r
    } else {
        -r
    }
}

/// Standard normal quantile on (0, WAD): ppf(p) = -sqrt(2) * ierfc(2p)
pub fn gaussian_ppf(env: &Env, p: u128) -> i128 {
    if p == 0 || p >= WAD {
        panic_with_error!(env, MathError::InvalidProbability);
    }
    let r = ierfc_wad(env, 2 * p);
    -smul_wad(env, SQRT2_WAD, r)
}
