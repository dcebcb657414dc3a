#![no_std]

pub mod fees;
pub mod manager;
pub mod types;

// Re-export types
pub use types::Position;

// Re-export manager functions
pub use manager::{
    has_liquidity, is_empty, modify_position, satisfies_jit_policy, sync_position, take_owed,
};

// Re-export fee functions
pub use fees::calculate_pending_fees;
