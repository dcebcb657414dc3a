use replicaswap_curve::CurveParams;

/// Pool snapshot a swap operates on. Reserves are per WAD of
/// liquidity; the contract maps its pool record in and out of this.
#[derive(Clone, Debug)]
pub struct SwapState {
    pub virtual_x: u128,
    pub virtual_y: u128,
    pub liquidity: u128,
    pub strike: u128,
    pub sigma_wad: u128,
    pub tau_wad: u128,
    pub created_at: u64,
    pub duration_seconds: u64,
    pub fee_growth_asset: u128,
    pub fee_growth_quote: u128,
    pub invariant_growth: u128,
}

impl SwapState {
    pub fn curve_params(&self) -> CurveParams {
        CurveParams {
            strike: self.strike,
            sigma_wad: self.sigma_wad,
            tau_wad: self.tau_wad,
        }
    }
}

/// Outcome of one swap iteration, all amounts WAD
#[derive(Clone, Debug)]
pub struct SwapIter {
    /// Input actually consumed, fee included
    pub consumed_wad: u128,
    pub fee_wad: u128,
    pub output_wad: u128,
    pub next_x: u128,
    pub next_y: u128,
    pub prev_invariant: i128,
    pub next_invariant: i128,
    /// Fee growth to add to the input-side global checkpoint
    pub fee_growth_delta: u128,
}
