// SPDX-License-Identifier: MIT
// WAD Fixed-Point Arithmetic Operations

use soroban_sdk::{panic_with_error, Env, U256};

use crate::constants::WAD;
use crate::MathError;

// ============================================================
// FULL-WIDTH MULTIPLY-DIVIDE
// ============================================================

/// Floor of (a * b) / denominator using a U256 intermediate
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        panic_with_error!(env, MathError::DivisionByZero);
    }

    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let quotient = product.div(&U256::from_u128(env, denominator));

    match quotient.to_u128() {
        Some(q) => q,
        None => panic_with_error!(env, MathError::OverflowWad),
    }
}

/// Ceiling of (a * b) / denominator using a U256 intermediate
pub fn mul_div_up(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        panic_with_error!(env, MathError::DivisionByZero);
    }

    let den = U256::from_u128(env, denominator);
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let quotient = product.div(&den);

    let floor = match quotient.to_u128() {
        Some(q) => q,
        None => panic_with_error!(env, MathError::OverflowWad),
    };

    if quotient.mul(&den) == product {
        floor
    } else {
        match floor.checked_add(1) {
            Some(q) => q,
            None => panic_with_error!(env, MathError::OverflowWad),
        }
    }
}

// ============================================================
// DIRECTED WAD OPERATIONS
// ============================================================

#[inline]
pub fn mul_wad_down(env: &Env, a: u128, b: u128) -> u128 {
    mul_div(env, a, b, WAD)
}

#[inline]
pub fn mul_wad_up(env: &Env, a: u128, b: u128) -> u128 {
    mul_div_up(env, a, b, WAD)
}

#[inline]
pub fn div_wad_down(env: &Env, a: u128, b: u128) -> u128 {
    mul_div(env, a, WAD, b)
}

#[inline]
pub fn div_wad_up(env: &Env, a: u128, b: u128) -> u128 {
    mul_div_up(env, a, WAD, b)
}

/// Integer division rounding up
#[inline]
pub fn div_round_up(env: &Env, numerator: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        panic_with_error!(env, MathError::DivisionByZero);
    }
    let result = numerator / denominator;
    if numerator % denominator != 0 {
        result + 1
    } else {
        result
    }
}

// ============================================================
// SIGNED WAD HELPERS
// ============================================================
// The Gaussian kernel works on signed WAD values whose products
// stay well inside i128; rounding is toward zero.

/// (a * b) / WAD on signed operands, truncating toward zero
pub fn smul_wad(env: &Env, a: i128, b: i128) -> i128 {
    let mag = mul_div(env, a.unsigned_abs(), b.unsigned_abs(), WAD);
    apply_sign(env, mag, (a < 0) != (b < 0))
}

/// (a * WAD) / b on signed operands, truncating toward zero
pub fn sdiv_wad(env: &Env, a: i128, b: i128) -> i128 {
    if b == 0 {
        panic_with_error!(env, MathError::DivisionByZero);
    }
    let mag = mul_div(env, a.unsigned_abs(), WAD, b.unsigned_abs());
    apply_sign(env, mag, (a < 0) != (b < 0))
}

fn apply_sign(env: &Env, mag: u128, negative: bool) -> i128 {
    if negative {
        if mag > i128::MAX as u128 + 1 {
            panic_with_error!(env, MathError::OverflowWad);
        }
        (mag as i128).wrapping_neg()
    } else {
        to_i128(env, mag)
    }
}

// ============================================================
// SQUARE ROOT
// ============================================================

/// Floor integer square root (Newton iteration)
pub fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let shift = (128 - n.leading_zeros() + 1) / 2;
    let mut x0 = 1u128 << shift;
    let mut x1 = (x0 + n / x0) / 2;
    while x1 < x0 {
        x0 = x1;
        x1 = (x0 + n / x0) / 2;
    }
    x0
}

/// sqrt of a WAD value, in WAD: sqrt_wad(x) = isqrt(x * 1e18)
pub fn sqrt_wad(env: &Env, x: u128) -> u128 {
    match x.checked_mul(WAD) {
        Some(scaled) => isqrt(scaled),
        None => panic_with_error!(env, MathError::OverflowWad),
    }
}

// ============================================================
// WIDTH CASTS
// ============================================================

/// u128 -> i128, failing on values past i128::MAX
pub fn to_i128(env: &Env, x: u128) -> i128 {
    if x > i128::MAX as u128 {
        panic_with_error!(env, MathError::CastOverflow);
    }
    x as i128
}

/// i128 -> u128, failing on negative values
pub fn to_u128(env: &Env, x: i128) -> u128 {
    if x < 0 {
        panic_with_error!(env, MathError::CastOverflow);
    }
    x as u128
}

// ============================================================
// TOKEN DECIMAL SCALING
// ============================================================

fn decimal_factor(env: &Env, decimals: u32) -> u128 {
    if decimals > 18 {
        panic_with_error!(env, MathError::CastOverflow);
    }
    10u128.pow(18 - decimals)
}

/// Raw token units -> WAD: x * 10^(18 - decimals)
pub fn scale_to_wad(env: &Env, x: u128, decimals: u32) -> u128 {
    let factor = decimal_factor(env, decimals);
    match x.checked_mul(factor) {
        Some(scaled) => scaled,
        None => panic_with_error!(env, MathError::OverflowWad),
    }
}

/// WAD -> raw token units, floor
pub fn scale_from_wad_down(env: &Env, x: u128, decimals: u32) -> u128 {
    x / decimal_factor(env, decimals)
}

/// WAD -> raw token units, rounding up
pub fn scale_from_wad_up(env: &Env, x: u128, decimals: u32) -> u128 {
    div_round_up(env, x, decimal_factor(env, decimals))
}
