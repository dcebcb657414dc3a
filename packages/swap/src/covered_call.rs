use soroban_sdk::Env;

use replicaswap_curve::{self as curve, CurveParams};
use replicaswap_math::constants::WAD;

use crate::objective::Objective;
use crate::types::SwapState;

/// The covered-call objective: reserves follow the Gaussian trading
/// function of replicaswap-curve.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoveredCall;

impl Objective for CoveredCall {
    fn before_swap(&self, env: &Env, state: &mut SwapState, now: u64) -> (bool, i128) {
        state.tau_wad = curve::tau_wad(state.created_at, state.duration_seconds, now);
        if state.tau_wad == 0 {
            return (false, 0);
        }
        let prev = curve::invariant(
            env,
            state.virtual_x,
            state.virtual_y,
            &state.curve_params(),
        );
        (true, prev)
    }

    fn after_swap(
        &self,
        _env: &Env,
        state: &mut SwapState,
        prev_invariant: i128,
        next_invariant: i128,
    ) {
        let moved = next_invariant.wrapping_sub(prev_invariant) as u128;
        state.invariant_growth = state.invariant_growth.wrapping_add(moved);
    }

    fn check_invariant(&self, env: &Env, state: &SwapState, x: u128, y: u128) -> i128 {
        curve::invariant(env, x, y, &state.curve_params())
    }

    fn check_pool(&self, env: &Env, state: &SwapState) -> bool {
        state.virtual_x > 0
            && state.virtual_x <= WAD
            && state.virtual_y > 0
            && self.check_invariant(env, state, state.virtual_x, state.virtual_y) >= 0
    }

    fn compute_max_input(&self, env: &Env, state: &SwapState, sell_asset: bool) -> u128 {
        curve::max_input(
            env,
            &state.curve_params(),
            sell_asset,
            state.virtual_x,
            state.virtual_y,
            state.liquidity,
        )
    }

    fn compute_reserves_from_price(
        &self,
        env: &Env,
        params: &CurveParams,
        price: u128,
    ) -> (u128, u128) {
        curve::compute_reserves(env, price, params, 0)
    }

    fn latest_price(&self, env: &Env, state: &SwapState) -> u128 {
        curve::price_of_x(env, state.virtual_x, &state.curve_params())
    }

    fn amount_out(
        &self,
        env: &Env,
        state: &SwapState,
        sell_asset: bool,
        delta_per_liq: u128,
        inv: i128,
    ) -> (u128, u128, u128) {
        curve::amount_out(
            env,
            &state.curve_params(),
            sell_asset,
            state.virtual_x,
            state.virtual_y,
            delta_per_liq,
            inv,
        )
    }
}
