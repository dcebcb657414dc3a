// Compatible with OpenZeppelin Stellar Soroban Contracts patterns
//
// Error handling module following OpenZeppelin conventions:
// - Uses contracterror derive macro for typed errors
// - Groups error codes by failure kind

use soroban_sdk::contracterror;

/// Engine-level errors, grouped by kind. Math (700) and curve (800)
/// failures surface with their own codes from the packages.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum EngineError {
    // Lifecycle errors (100-199)
    /// Engine has already been initialized
    AlreadyInitialized = 100,
    /// Engine has not been initialized
    NotInitialized = 101,

    // Invalid input (200-299)
    /// Pool price must be positive
    ZeroPrice = 200,
    /// Liquidity delta must be positive
    ZeroLiquidity = 201,
    /// Nothing to move between position and ledger
    ZeroAmounts = 202,
    /// Swap input resolves to zero
    ZeroInput = 203,
    /// Swap output resolves to zero
    ZeroOutput = 204,
    /// Token decimals outside [6, 18]
    InvalidDecimals = 205,
    /// Fee outside [MIN_FEE_BPS, MAX_FEE_BPS], or priority fee above fee
    InvalidFee = 206,
    /// Volatility outside [MIN_VOLATILITY_BPS, MAX_VOLATILITY_BPS]
    InvalidVolatility = 207,
    /// Duration must be positive
    InvalidDuration = 208,
    /// JIT policy above JIT_POLICY_MAX_SECONDS
    InvalidJit = 209,
    /// Pair sides must differ
    SameToken = 210,
    /// Transfer target must not be the engine itself
    InvalidTransfer = 211,
    /// Multiprocess payload failed to decode
    InvalidInstruction = 212,

    // State conflicts (300-399)
    /// Ordered pair already registered
    PairExists = 300,
    /// Pool identifier already occupied
    PoolExists = 301,
    /// No pair under this reference
    NonExistentPair = 302,
    /// No pool under this identifier
    NonExistentPool = 303,
    /// No position for this owner and pool
    NonExistentPosition = 304,
    /// Caller is not the pool controller
    NotController = 305,

    // Policy (400-499)
    /// Liquidity removed before the JIT window elapsed
    JitLiquidity = 400,
    /// Pool is past maturity and no longer accepts this operation
    PoolExpired = 401,
    /// Withdrawal exceeds balance or reserves
    DrawBalance = 402,

    // Invariant (500-599)
    /// Swap would move the invariant below its pre-swap value
    InvalidInvariant = 500,
    /// Operation closed without reconciling the ledger
    InvalidSettlement = 501,
    /// Nested external operation while one is in flight
    InvalidReentrancy = 502,
}
