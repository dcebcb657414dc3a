// Position Management Logic

use replicaswap_math::constants::WAD;

use crate::types::Position;

/// Sync a position's fee checkpoints and accrue owed tokens
///
/// 1. delta = global - last (wrapping arithmetic)
/// 2. owed += free_liquidity * delta / WAD
/// 3. last = global
pub fn sync_position(
    pos: &mut Position,
    fee_growth_asset_global: u128,
    fee_growth_quote_global: u128,
    invariant_growth_global: u128,
) {
    if pos.free_liquidity > 0 {
        let delta_asset = fee_growth_asset_global.wrapping_sub(pos.fee_growth_asset_last);
        let delta_quote = fee_growth_quote_global.wrapping_sub(pos.fee_growth_quote_last);

        // Accrue with overflow protection
        let earned_asset = pos
            .free_liquidity
            .checked_mul(delta_asset)
            .map(|product| product / WAD)
            .unwrap_or(0);

        let earned_quote = pos
            .free_liquidity
            .checked_mul(delta_quote)
            .map(|product| product / WAD)
            .unwrap_or(0);

        pos.tokens_owed_asset = pos.tokens_owed_asset.saturating_add(earned_asset);
        pos.tokens_owed_quote = pos.tokens_owed_quote.saturating_add(earned_quote);
    }

    // Always update checkpoints to current values
    pos.fee_growth_asset_last = fee_growth_asset_global;
    pos.fee_growth_quote_last = fee_growth_quote_global;
    pos.invariant_growth_last = invariant_growth_global;
}

/// Change a position's liquidity
///
/// Fees are synced before the change so the new liquidity does not
/// retroactively earn, then the JIT timestamp is stamped.
pub fn modify_position(
    pos: &mut Position,
    liquidity_delta: i128,
    fee_growth_asset_global: u128,
    fee_growth_quote_global: u128,
    invariant_growth_global: u128,
    now: u64,
) {
    sync_position(
        pos,
        fee_growth_asset_global,
        fee_growth_quote_global,
        invariant_growth_global,
    );

    if liquidity_delta > 0 {
        pos.free_liquidity = pos.free_liquidity.saturating_add(liquidity_delta as u128);
    } else if liquidity_delta < 0 {
        pos.free_liquidity = pos.free_liquidity.saturating_sub(liquidity_delta.unsigned_abs());
    }

    pos.last_timestamp = now;
}

/// Whether the JIT policy allows removing liquidity at `now`
#[inline]
pub fn satisfies_jit_policy(pos: &Position, now: u64, jit_seconds: u32) -> bool {
    now.saturating_sub(pos.last_timestamp) >= jit_seconds as u64
}

/// Move up to the requested amounts out of tokens_owed_*
///
/// Returns what was actually taken; callers pass u128::MAX for "all".
pub fn take_owed(pos: &mut Position, request_asset: u128, request_quote: u128) -> (u128, u128) {
    let taken_asset = request_asset.min(pos.tokens_owed_asset);
    let taken_quote = request_quote.min(pos.tokens_owed_quote);
    pos.tokens_owed_asset -= taken_asset;
    pos.tokens_owed_quote -= taken_quote;
    (taken_asset, taken_quote)
}

/// Check if a position has any liquidity
#[inline]
pub fn has_liquidity(pos: &Position) -> bool {
    pos.free_liquidity > 0
}

/// Check if a position is empty (no liquidity and no owed fees)
#[inline]
pub fn is_empty(pos: &Position) -> bool {
    pos.free_liquidity == 0 && pos.tokens_owed_asset == 0 && pos.tokens_owed_quote == 0
}
