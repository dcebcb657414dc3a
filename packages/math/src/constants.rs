// Compatible with OpenZeppelin Stellar Soroban Contracts patterns
//
// Constants module following OpenZeppelin conventions:
// - Clear documentation for each constant
// - Grouped by functionality
// - Uses appropriate types for each constant

// ============================================================
// FIXED-POINT SCALE
// ============================================================

/// WAD scale: fixed-point with 18 fractional decimal digits
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Half of WAD, used for round-to-nearest divisions
pub const HALF_WAD: u128 = WAD / 2;

/// WAD as a signed value for the Gaussian kernel
pub const WAD_I: i128 = WAD as i128;

/// Basis-point denominator (10_000 = 100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

// ============================================================
// TRANSCENDENTAL CONSTANTS (WAD scale)
// ============================================================

/// ln(2) * 1e18
pub const LN2_WAD: i128 = 693_147_180_559_945_309;

/// sqrt(2) * 1e18
pub const SQRT2_WAD: i128 = 1_414_213_562_373_095_048;

/// 2/sqrt(pi) * 1e18, the slope of erfc used by the inverse refinement
pub const TWO_OVER_SQRT_PI_WAD: i128 = 1_128_379_167_095_512_570;

// ============================================================
// DOMAIN BOUNDS
// ============================================================

/// exp_wad inputs below this round to zero: ln(0.5e-18) * 1e18
pub const EXP_MIN_INPUT: i128 = -42_139_678_854_452_767_551;

/// exp_wad inputs at or above this overflow u128: ln(u128::MAX / 1e18) * 1e18
pub const EXP_MAX_INPUT: i128 = 47_276_209_000_000_000_000;

/// |z| beyond which erfc saturates to 0 or 2 at WAD resolution
pub const ERFC_DOMAIN_CUTOFF: i128 = 7_000_000_000_000_000_000;

// ============================================================
// TOKEN DECIMALS
// ============================================================

/// Narrowest token decimal width the engine accepts
pub const MIN_DECIMALS: u32 = 6;

/// Widest token decimal width the engine accepts (WAD itself)
pub const MAX_DECIMALS: u32 = 18;
