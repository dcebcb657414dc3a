use soroban_sdk::contracttype;

#[contracttype]
#[derive(Clone, Debug)]
pub struct Position {
    /// Liquidity owned by this position, WAD
    pub free_liquidity: u128,
    /// Fee revenue synced but not yet claimed, WAD of each pair side
    pub tokens_owed_asset: u128,
    pub tokens_owed_quote: u128,
    /// Global checkpoints at the last fee sync (wrapping counters)
    pub fee_growth_asset_last: u128,
    pub fee_growth_quote_last: u128,
    pub invariant_growth_last: u128,
    /// Ledger time of the last liquidity change; input to the JIT policy
    pub last_timestamp: u64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            free_liquidity: 0,
            tokens_owed_asset: 0,
            tokens_owed_quote: 0,
            fee_growth_asset_last: 0,
            fee_growth_quote_last: 0,
            invariant_growth_last: 0,
            last_timestamp: 0,
        }
    }
}
