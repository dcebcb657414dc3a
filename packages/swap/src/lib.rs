// SPDX-License-Identifier: MIT
// ReplicaSwap Swap Package
//
// The objective seam and the per-swap iteration. A concrete objective
// supplies the trading function; the engine contract supplies storage
// and settlement around it.

#![no_std]

pub mod covered_call;
pub mod engine;
pub mod objective;
pub mod types;

pub use covered_call::CoveredCall;
pub use engine::swap_iteration;
pub use objective::Objective;
pub use types::{SwapIter, SwapState};
