// Engine Types

use soroban_sdk::{contracttype, Address};

// Re-export the position record stored per (owner, pool)
pub use replicaswap_position::Position;

// ============================================================
// PARAMETER BOUNDS
// ============================================================

/// Lowest accepted fee (0.01%)
pub const MIN_FEE_BPS: u32 = 1;

/// Highest accepted fee (10%)
pub const MAX_FEE_BPS: u32 = 1_000;

/// Lowest accepted implied volatility (1%)
pub const MIN_VOLATILITY_BPS: u32 = 100;

/// Highest accepted implied volatility (250%)
pub const MAX_VOLATILITY_BPS: u32 = 25_000;

/// Longest JIT window a controller may impose
pub const JIT_POLICY_MAX_SECONDS: u32 = 600;

/// JIT window pinned on controller-less pools
pub const DEFAULT_JIT_POLICY_SECONDS: u32 = 4;

/// Pair reference resolving to the most recently created pair
pub const MAGIC_PAIR_LATEST: u32 = 0;

/// Amount sentinel meaning "everything available"
pub const MAX_AMOUNT: i128 = i128::MAX;

// ============================================================
// POOL IDENTIFIER PACKING
// ============================================================
// (pair_id : 24 | has_controller : 8 | pool_nonce : 32)

pub fn encode_pool_id(pair_id: u32, has_controller: bool, pool_nonce: u32) -> u64 {
    let controller_bits: u64 = if has_controller { 1 } else { 0 };
    ((pair_id as u64 & 0xFF_FFFF) << 40) | (controller_bits << 32) | pool_nonce as u64
}

pub fn decode_pool_id(pool_id: u64) -> (u32, bool, u32) {
    let pair_id = ((pool_id >> 40) & 0xFF_FFFF) as u32;
    let has_controller = (pool_id >> 32) & 0xFF != 0;
    let pool_nonce = pool_id as u32;
    (pair_id, has_controller, pool_nonce)
}

// ============================================================
// ENGINE CONFIGURATION
// ============================================================

#[contracttype]
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// The chain-native token; `deposit` funds this asset
    pub native: Address,
}

// ============================================================
// PAIR
// ============================================================

#[contracttype]
#[derive(Clone, Debug)]
pub struct Pair {
    pub asset: Address,
    pub quote: Address,
    /// Decimal widths observed once at creation and pinned
    pub decimals_asset: u32,
    pub decimals_quote: u32,
}

// ============================================================
// POOL
// ============================================================

#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolParams {
    /// Strike of the trading function; upper bound on reported price
    pub max_price: u128,
    /// Seconds a position must rest before liquidity can be removed
    pub jit_seconds: u32,
    /// Trading fee in basis points
    pub fee_bps: u32,
    /// Fee paid by the controller instead of fee_bps
    pub priority_fee_bps: u32,
    /// Implied volatility in basis points
    pub volatility_bps: u32,
    /// Time from creation to maturity
    pub duration_seconds: u64,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct Pool {
    pub pair_id: u32,
    pub controller: Option<Address>,
    pub params: PoolParams,
    /// Reserves per WAD of liquidity
    pub virtual_x: u128,
    pub virtual_y: u128,
    /// Sum of position free liquidity, WAD
    pub liquidity: u128,
    /// Wrapping per-liquidity checkpoints
    pub fee_growth_asset_global: u128,
    pub fee_growth_quote_global: u128,
    pub invariant_growth_global: u128,
    pub last_timestamp: u64,
}

// ============================================================
// SETTLEMENT QUEUE
// ============================================================

#[contracttype]
#[derive(Clone, Debug)]
pub struct Payment {
    pub token: Address,
    /// Pull: counterparty -> engine. Payout: engine -> counterparty.
    pub counterparty: Address,
    pub amount: i128,
    pub pull: bool,
}
