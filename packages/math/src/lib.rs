// SPDX-License-Identifier: MIT
// ReplicaSwap Math Package

#![no_std]

use soroban_sdk::contracterror;

pub mod constants;
pub mod gaussian;
pub mod transcend;
pub mod wad;

// Re-export commonly used items
pub use constants::*;
pub use gaussian::{erfc_wad, gaussian_cdf, gaussian_ppf, ierfc_wad};
pub use transcend::{exp_wad, ln_wad};
pub use wad::{
    div_round_up, div_wad_down, div_wad_up, isqrt, mul_div, mul_div_up, mul_wad_down, mul_wad_up,
    scale_from_wad_down, scale_from_wad_up, scale_to_wad, sdiv_wad, smul_wad, sqrt_wad, to_i128,
    to_u128,
};

/// Math-level failures (700 range)
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MathError {
    /// Division by zero
    DivisionByZero = 700,
    /// Result does not fit the WAD width
    OverflowWad = 701,
    /// Width cast lost information
    CastOverflow = 702,
    /// Logarithm of a non-positive value
    NegativeLog = 703,
    /// Quantile argument outside (0, 1)
    InvalidProbability = 704,
}
