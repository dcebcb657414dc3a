// Swap Iteration
//
// One pass along the trading function: clamp the input to the curve's
// saturation bound, floor the fee off, move the independent reserve,
// rebuild the dependent one through the objective and report the
// invariant movement. The contract validates the result and settles.

use soroban_sdk::Env;

use replicaswap_math::constants::{BPS_DENOMINATOR, WAD};
use replicaswap_math::{mul_div, mul_div_up, mul_wad_down};

use crate::objective::Objective;
use crate::types::{SwapIter, SwapState};

/// Execute one swap against a pool snapshot.
///
/// `input_wad` is the caller's offered input (already WAD scaled),
/// `min_output_wad` their demanded output. When the demand exceeds
/// the curve quote the dependent reserve is restated to meet it and
/// the invariant check downstream arbitrates the trade.
pub fn swap_iteration<O: Objective>(
    env: &Env,
    objective: &O,
    state: &SwapState,
    sell_asset: bool,
    input_wad: u128,
    min_output_wad: u128,
    fee_bps: u32,
    prev_invariant: i128,
) -> SwapIter {
    let max_input = objective.compute_max_input(env, state, sell_asset);
    let consumed = input_wad.min(max_input);

    let fee = mul_div(env, consumed, fee_bps as u128, BPS_DENOMINATOR);
    let consumed_less_fee = consumed - fee;
    let delta_per_liq = mul_div(env, consumed_less_fee, WAD, state.liquidity);

    let (next_independent, next_dependent, out_per_liq) =
        objective.amount_out(env, state, sell_asset, delta_per_liq, prev_invariant);
    let mut output_wad = mul_wad_down(env, out_per_liq, state.liquidity);

    let (mut next_x, mut next_y) = if sell_asset {
        (next_independent, next_dependent)
    } else {
        (next_dependent, next_independent)
    };

    if min_output_wad > output_wad {
        output_wad = min_output_wad;
        let demanded_per_liq = mul_div_up(env, output_wad, WAD, state.liquidity);
        if sell_asset {
            next_y = state.virtual_y.saturating_sub(demanded_per_liq);
        } else {
            next_x = state.virtual_x.saturating_sub(demanded_per_liq);
        }
    }

    let next_invariant = objective.check_invariant(env, state, next_x, next_y);

    let fee_growth_delta = if next_invariant > 0 && fee > 0 {
        mul_div(env, fee, WAD, state.liquidity)
    } else {
        0
    };

    SwapIter {
        consumed_wad: consumed,
        fee_wad: fee,
        output_wad,
        next_x,
        next_y,
        prev_invariant,
        next_invariant,
        fee_growth_delta,
    }
}
