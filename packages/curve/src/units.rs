// Unit conversions between engine inputs and curve parameters

use replicaswap_math::constants::{BPS_DENOMINATOR, WAD};

/// 365 days; a pool with duration 31_536_000 runs for exactly one WAD year
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Seconds -> WAD years
pub fn seconds_to_wad_years(seconds: u64) -> u128 {
    seconds as u128 * WAD / SECONDS_PER_YEAR as u128
}

/// Basis points -> WAD fraction (10_000 bps = 1 WAD)
pub fn bps_to_wad(bps: u32) -> u128 {
    bps as u128 * (WAD / BPS_DENOMINATOR)
}

/// Remaining time to maturity in WAD years; zero once expired
pub fn tau_wad(created_at: u64, duration_seconds: u64, now: u64) -> u128 {
    let expiry = created_at.saturating_add(duration_seconds);
    seconds_to_wad_years(expiry.saturating_sub(now))
}
