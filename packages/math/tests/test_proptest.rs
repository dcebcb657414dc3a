// Property-Based Testing with Proptest
// Run with: cargo test -p replicaswap-math --test test_proptest

use proptest::prelude::*;
use replicaswap_math::*;
use soroban_sdk::Env;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: mul_wad_down(a, WAD) = a
    #[test]
    fn prop_mul_wad_identity(a in 0u128..u128::MAX / 2) {
        let env = Env::default();
        prop_assert_eq!(mul_wad_down(&env, a, WAD), a);
        prop_assert_eq!(mul_wad_up(&env, a, WAD), a);
    }

    /// Property: up-rounding exceeds down-rounding by at most one unit
    #[test]
    fn prop_directed_rounding_band(
        a in 0u128..(1u128 << 100),
        b in 0u128..(1u128 << 27)
    ) {
        let env = Env::default();
        let down = mul_wad_down(&env, a, b);
        let up = mul_wad_up(&env, a, b);
        prop_assert!(up == down || up == down + 1);
    }

    /// Property: mul commutes
    #[test]
    fn prop_mul_wad_commutative(
        a in 0u128..(1u128 << 90),
        b in 0u128..(1u128 << 37)
    ) {
        let env = Env::default();
        prop_assert_eq!(mul_wad_down(&env, a, b), mul_wad_down(&env, b, a));
    }

    /// Property: div then mul under-recovers by at most one rounding step
    #[test]
    fn prop_div_mul_round_trip(
        a in 1u128..(1u128 << 80),
        b in 1u128..(1u128 << 80)
    ) {
        let env = Env::default();
        let q = div_wad_down(&env, a, b);
        let back = mul_wad_down(&env, q, b);
        prop_assert!(back <= a);
    }

    /// Property: isqrt brackets the true root
    #[test]
    fn prop_isqrt_brackets(n in 0u128..(1u128 << 120)) {
        let s = isqrt(n);
        prop_assert!(s.checked_mul(s).map(|sq| sq <= n).unwrap_or(false) || n == 0);
        let next = s + 1;
        match next.checked_mul(next) {
            Some(sq) => prop_assert!(sq > n),
            None => {}
        }
    }

    /// Property: exp(ln(x)) recovers x to relative 1e-9
    #[test]
    fn prop_exp_ln_round_trip(x in WAD / 1_000_000..WAD * 1_000_000) {
        let env = Env::default();
        let back = exp_wad(&env, ln_wad(&env, x));
        let tolerance = (x / 1_000_000_000).max(10);
        let diff = if back > x { back - x } else { x - back };
        prop_assert!(diff <= tolerance, "x {} back {}", x, back);
    }

    /// Property: cdf is monotone non-decreasing
    #[test]
    fn prop_cdf_monotone(a in -6i128..6i128, delta in 1u64..1_000_000_000u64) {
        let env = Env::default();
        let x = a * WAD_I / 2;
        let y = x + delta as i128 * 1_000_000_000;
        prop_assert!(gaussian_cdf(&env, x) <= gaussian_cdf(&env, y));
    }

    /// Property: quantile inverts the cdf inside the bulk of the support
    #[test]
    fn prop_ppf_cdf_round_trip(milli in -2500i64..2500i64) {
        let env = Env::default();
        let x = milli as i128 * (WAD_I / 1000);
        let p = gaussian_cdf(&env, x);
        let back = gaussian_ppf(&env, p);
        prop_assert!((back - x).abs() <= 5_000_000_000_000, "x {} back {}", x, back);
    }
}
