use soroban_sdk::Env;

use replicaswap_curve::CurveParams;

use crate::types::SwapState;

/// Strategy seam between the engine and a trading function. The
/// engine owns storage and settlement; an objective owns pricing.
/// Concrete implementations are picked at engine construction.
pub trait Objective {
    /// Re-derive maturity at `now` ahead of a swap. Returns whether
    /// the pool still accepts trades and the pre-swap invariant.
    fn before_swap(&self, env: &Env, state: &mut SwapState, now: u64) -> (bool, i128);

    /// Fold a completed swap back into the growth checkpoints.
    fn after_swap(&self, env: &Env, state: &mut SwapState, prev_invariant: i128, next_invariant: i128);

    /// Invariant of a candidate reserve pair under this pool's parameters.
    fn check_invariant(&self, env: &Env, state: &SwapState, x: u128, y: u128) -> i128;

    /// Whole-pool reserve sanity: both sides live, invariant non-negative.
    fn check_pool(&self, env: &Env, state: &SwapState) -> bool;

    /// Largest WAD input the pool absorbs before reserve saturation.
    fn compute_max_input(&self, env: &Env, state: &SwapState, sell_asset: bool) -> u128;

    /// Per-liquidity reserves (y, x) for a fresh pool at `price`.
    fn compute_reserves_from_price(
        &self,
        env: &Env,
        params: &CurveParams,
        price: u128,
    ) -> (u128, u128);

    /// Price currently reported by the reserves.
    fn latest_price(&self, env: &Env, state: &SwapState) -> u128;

    /// Quote a reserve move: (next_independent, next_dependent, output)
    /// per liquidity for an input of `delta_per_liq` on the independent
    /// side, holding the invariant.
    fn amount_out(
        &self,
        env: &Env,
        state: &SwapState,
        sell_asset: bool,
        delta_per_liq: u128,
        inv: i128,
    ) -> (u128, u128, u128);
}
