use replicaswap_math::constants::WAD;

use crate::types::Position;

/// Fees a position would be owed if synced now, without mutating it
pub fn calculate_pending_fees(
    pos: &Position,
    fee_growth_asset_global: u128,
    fee_growth_quote_global: u128,
) -> (u128, u128) {
    if pos.free_liquidity == 0 {
        return (0, 0);
    }

    let delta_asset = fee_growth_asset_global.wrapping_sub(pos.fee_growth_asset_last);
    let delta_quote = fee_growth_quote_global.wrapping_sub(pos.fee_growth_quote_last);

    let pending_asset = pos
        .free_liquidity
        .checked_mul(delta_asset)
        .map(|product| product / WAD)
        .unwrap_or(0);

    let pending_quote = pos
        .free_liquidity
        .checked_mul(delta_quote)
        .map(|product| product / WAD)
        .unwrap_or(0);

    (pending_asset, pending_quote)
}
