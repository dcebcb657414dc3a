// SPDX-License-Identifier: MIT
// Natural Logarithm and Exponential on WAD Values
//
// Both functions are pure integer algorithms: binary range reduction
// against ln(2), then a short fixed-length series on the reduced
// argument. Identical inputs produce identical outputs on every host.

use soroban_sdk::{panic_with_error, Env};

use crate::constants::{EXP_MAX_INPUT, EXP_MIN_INPUT, LN2_WAD, WAD, WAD_I};
use crate::wad::{div_wad_down, mul_wad_down};
use crate::MathError;

/// ln(x) for WAD x > 0, returning a signed WAD value
///
/// Normalises x = m * 2^k with m in [WAD, 2*WAD), recombines
/// k*ln(2) with the atanh series of ln(m).
pub fn ln_wad(env: &Env, x: u128) -> i128 {
    if x == 0 {
        panic_with_error!(env, MathError::NegativeLog);
    }

    // WAD sits between 2^59 and 2^60
    let bit_length = 127 - x.leading_zeros() as i32;
    let mut k = bit_length - 59;
    let mut m = if k >= 0 { x >> k } else { x << (-k) };
    while m >= 2 * WAD {
        m /= 2;
        k += 1;
    }
    while m < WAD {
        m *= 2;
        k -= 1;
    }

    // ln(m) = 2 * atanh(z), z = (m - WAD) / (m + WAD) in [0, 1/3)
    let z = div_wad_down(env, m - WAD, m + WAD);
    let zsq = mul_wad_down(env, z, z);
    let mut term = z;
    let mut sum = z;
    let mut n: u128 = 3;
    while n <= 39 {
        term = term * zsq / WAD;
        sum += term / n;
        n += 2;
    }

    (k as i128) * LN2_WAD + 2 * (sum as i128)
}

/// e^x for signed WAD x, returning a WAD value
///
/// Inputs below EXP_MIN_INPUT round to zero; inputs at or above
/// EXP_MAX_INPUT do not fit u128 and fail with OverflowWad.
pub fn exp_wad(env: &Env, x: i128) -> u128 {
    if x < EXP_MIN_INPUT {
        return 0;
    }
    if x >= EXP_MAX_INPUT {
        panic_with_error!(env, MathError::OverflowWad);
    }

    // x = k*ln(2) + r with |r| <= ln(2)/2
    let k = (x + LN2_WAD / 2).div_euclid(LN2_WAD);
    let r = x - k * LN2_WAD;

    // Taylor series of e^r; |r| < 0.35 so 15 terms reach WAD resolution
    let mut term: i128 = WAD_I;
    let mut sum: i128 = WAD_I;
    let mut n: i128 = 1;
    while n <= 15 {
        term = term * r / WAD_I / n;
        sum += term;
        n += 1;
    }
    let reduced = sum as u128;

    if k >= 0 {
        match reduced.checked_mul(1u128 << k) {
            Some(result) => result,
            None => panic_with_error!(env, MathError::OverflowWad),
        }
    } else {
        reduced >> ((-k) as u32)
    }
}
