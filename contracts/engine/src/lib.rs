#![no_std]

use soroban_sdk::{contract, contractimpl, panic_with_error, token, Address, Bytes, Env};

// External packages
use replicaswap_curve::{self as curve, CurveParams};
use replicaswap_math::{
    div_wad_down, mul_wad_down, mul_wad_up, scale_from_wad_down, scale_from_wad_up, scale_to_wad,
    to_i128, to_u128,
};
use replicaswap_position::{modify_position, satisfies_jit_policy, sync_position, take_owed};
use replicaswap_swap::{swap_iteration, CoveredCall, Objective, SwapState};

// Local modules
mod error;
mod events;
pub mod instructions;
mod ledger;
mod storage;
pub mod types;

use error::EngineError;
use events::*;
use instructions::Instruction;
use storage::*;
use types::{
    encode_pool_id, EngineConfig, Pair, Pool, PoolParams, Position, DEFAULT_JIT_POLICY_SECONDS,
    JIT_POLICY_MAX_SECONDS, MAGIC_PAIR_LATEST, MAX_AMOUNT, MAX_FEE_BPS, MAX_VOLATILITY_BPS,
    MIN_FEE_BPS, MIN_VOLATILITY_BPS,
};

pub use error::EngineError as Error;

#[contract]
pub struct ReplicaEngine;

#[contractimpl]
impl ReplicaEngine {
    // ========================================================
    // INITIALIZATION
    // ========================================================

    pub fn initialize(env: Env, native: Address) {
        if is_initialized(&env) {
            panic_with_error!(&env, EngineError::AlreadyInitialized);
        }
        write_config(&env, &EngineConfig { native: native.clone() });
        emit_initialized(&env, &native);
    }

    // ========================================================
    // EXTERNAL OPERATIONS
    // ========================================================
    // Each runs under the reentrancy lock, inside one settlement
    // window: validation, effects, then the settlement pass.

    pub fn deposit(env: Env, caller: Address, amount: i128) {
        caller.require_auth();
        let config = read_config(&env);

        open_operation(&env);
        let funded = fund_effects(&env, &caller, &config.native, amount);
        emit_deposit(&env, &caller, funded);
        close_operation(&env, &caller);
    }

    pub fn fund(env: Env, caller: Address, token: Address, amount: i128) {
        caller.require_auth();

        open_operation(&env);
        let funded = fund_effects(&env, &caller, &token, amount);
        emit_fund(&env, &caller, &token, funded);
        close_operation(&env, &caller);
    }

    pub fn draw(env: Env, caller: Address, token: Address, amount: i128, to: Address) {
        caller.require_auth();
        if to == env.current_contract_address() {
            panic_with_error!(&env, EngineError::InvalidTransfer);
        }

        open_operation(&env);

        let balance = read_balance(&env, &caller, &token);
        let resolved = if amount == MAX_AMOUNT { balance } else { amount };
        if resolved <= 0 {
            panic_with_error!(&env, EngineError::ZeroInput);
        }
        if resolved > balance || resolved > read_reserve(&env, &token) {
            panic_with_error!(&env, EngineError::DrawBalance);
        }

        write_balance(&env, &caller, &token, balance - resolved);
        ledger::decrease_reserve(&env, &token, resolved);
        ledger::queue_payout(&env, &token, &to, resolved);
        ledger::touch(&env, &token);

        emit_draw(&env, &caller, &token, resolved, &to);
        close_operation(&env, &caller);
    }

    pub fn multiprocess(env: Env, caller: Address, payload: Bytes) {
        caller.require_auth();

        open_operation(&env);
        instructions::execute_payload(&env, &payload, |instruction| {
            execute_instruction(&env, &caller, instruction);
        });
        close_operation(&env, &caller);
    }

    pub fn change_parameters(
        env: Env,
        caller: Address,
        pool_id: u64,
        priority_fee_bps: u32,
        fee_bps: u32,
        jit_seconds: u32,
    ) {
        caller.require_auth();

        open_operation(&env);

        let mut pool = read_pool(&env, pool_id);
        match &pool.controller {
            Some(controller) if *controller == caller => {}
            _ => panic_with_error!(&env, EngineError::NotController),
        }

        // zero means leave unchanged
        if fee_bps != 0 {
            validate_fee(&env, fee_bps);
            pool.params.fee_bps = fee_bps;
        }
        if priority_fee_bps != 0 {
            validate_priority_fee(&env, priority_fee_bps, pool.params.fee_bps);
            pool.params.priority_fee_bps = priority_fee_bps;
        }
        if jit_seconds != 0 {
            validate_jit(&env, jit_seconds);
            pool.params.jit_seconds = jit_seconds;
        }

        write_pool(&env, pool_id, &pool);
        emit_change_parameters(&env, pool_id, priority_fee_bps, fee_bps, jit_seconds);
        close_operation(&env, &caller);
    }

    // ========================================================
    // VIEW FUNCTIONS
    // ========================================================

    pub fn get_pair(env: Env, pair_id: u32) -> Pair {
        read_pair(&env, pair_id)
    }

    pub fn get_pool(env: Env, pool_id: u64) -> Pool {
        read_pool(&env, pool_id)
    }

    pub fn get_position(env: Env, owner: Address, pool_id: u64) -> Position {
        read_position(&env, &owner, pool_id)
    }

    pub fn get_pair_nonce(env: Env) -> u32 {
        read_pair_nonce(&env)
    }

    pub fn get_pool_nonce(env: Env) -> u32 {
        read_pool_nonce(&env)
    }

    pub fn get_reserve(env: Env, token: Address) -> i128 {
        read_reserve(&env, &token)
    }

    pub fn get_balance(env: Env, owner: Address, token: Address) -> i128 {
        read_balance(&env, &owner, &token)
    }

    pub fn get_net_balance(env: Env, token: Address) -> i128 {
        ledger::get_net_balance(&env, &token)
    }

    /// Token deltas for a liquidity change, rounded away from the pool
    pub fn get_liquidity_deltas(env: Env, pool_id: u64, delta_liquidity: i128) -> (i128, i128) {
        let pool = read_pool(&env, pool_id);
        let pair = read_pair(&env, pool.pair_id);
        if delta_liquidity == 0 {
            return (0, 0);
        }
        let magnitude = delta_liquidity.unsigned_abs();
        if delta_liquidity > 0 {
            let asset_wad = mul_wad_up(&env, pool.virtual_x, magnitude);
            let quote_wad = mul_wad_up(&env, pool.virtual_y, magnitude);
            (
                to_i128(&env, scale_from_wad_up(&env, asset_wad, pair.decimals_asset)),
                to_i128(&env, scale_from_wad_up(&env, quote_wad, pair.decimals_quote)),
            )
        } else {
            let asset_wad = mul_wad_down(&env, pool.virtual_x, magnitude);
            let quote_wad = mul_wad_down(&env, pool.virtual_y, magnitude);
            (
                to_i128(&env, scale_from_wad_down(&env, asset_wad, pair.decimals_asset)),
                to_i128(&env, scale_from_wad_down(&env, quote_wad, pair.decimals_quote)),
            )
        }
    }

    /// Largest liquidity these token amounts can mint
    pub fn get_max_liquidity(
        env: Env,
        pool_id: u64,
        amount_asset: i128,
        amount_quote: i128,
    ) -> u128 {
        let pool = read_pool(&env, pool_id);
        let pair = read_pair(&env, pool.pair_id);
        max_mintable(
            &env,
            &pool,
            scale_to_wad(&env, to_u128(&env, amount_asset), pair.decimals_asset),
            scale_to_wad(&env, to_u128(&env, amount_quote), pair.decimals_quote),
        )
    }

    /// Output quoted for a swap at the pool's standard fee
    pub fn get_amount_out(env: Env, pool_id: u64, sell_asset: bool, amount_in: i128) -> i128 {
        let pool = read_pool(&env, pool_id);
        let pair = read_pair(&env, pool.pair_id);
        if amount_in <= 0 {
            panic_with_error!(&env, EngineError::ZeroInput);
        }
        if pool.liquidity == 0 {
            panic_with_error!(&env, EngineError::ZeroLiquidity);
        }

        let objective = CoveredCall;
        let mut state = build_swap_state(&pool);
        let (valid, prev_invariant) = objective.before_swap(&env, &mut state, now(&env));
        if !valid {
            panic_with_error!(&env, EngineError::PoolExpired);
        }

        let (input_decimals, output_decimals) = if sell_asset {
            (pair.decimals_asset, pair.decimals_quote)
        } else {
            (pair.decimals_quote, pair.decimals_asset)
        };
        let input_wad = scale_to_wad(&env, amount_in as u128, input_decimals);
        let iter = swap_iteration(
            &env,
            &objective,
            &state,
            sell_asset,
            input_wad,
            0,
            pool.params.fee_bps,
            prev_invariant,
        );
        to_i128(&env, scale_from_wad_down(&env, iter.output_wad, output_decimals))
    }

    /// Price currently reported by the pool's reserves
    pub fn get_spot_price(env: Env, pool_id: u64) -> u128 {
        let pool = read_pool(&env, pool_id);
        let objective = CoveredCall;
        let mut state = build_swap_state(&pool);
        state.tau_wad = curve::tau_wad(
            pool.params.created_at,
            pool.params.duration_seconds,
            now(&env),
        );
        objective.latest_price(&env, &state)
    }
}

// ========================================================
// OPERATION WINDOW
// ========================================================

fn open_operation(env: &Env) {
    if is_locked(env) {
        panic_with_error!(env, EngineError::InvalidReentrancy);
    }
    set_locked(env);
    set_settled(env, false);
}

fn close_operation(env: &Env, caller: &Address) {
    ledger::settle(env, caller);
    ledger::assert_settled(env);
    clear_locked(env);
}

fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

// ========================================================
// INSTRUCTION DISPATCH
// ========================================================

fn execute_instruction(env: &Env, caller: &Address, instruction: Instruction) {
    match instruction {
        Instruction::CreatePair { asset, quote } => {
            op_create_pair(env, &asset, &quote);
        }
        Instruction::CreatePool {
            pair_ref,
            controller,
            priority_fee_bps,
            fee_bps,
            volatility_bps,
            duration_seconds,
            jit_seconds,
            max_price,
            price,
        } => {
            op_create_pool(
                env,
                pair_ref,
                controller,
                priority_fee_bps,
                fee_bps,
                volatility_bps,
                duration_seconds,
                jit_seconds,
                max_price,
                price,
            );
        }
        Instruction::Allocate {
            use_max,
            pool_id,
            delta_liquidity,
        } => {
            op_allocate(env, caller, use_max, pool_id, delta_liquidity);
        }
        Instruction::Deallocate {
            use_max,
            pool_id,
            delta_liquidity,
        } => {
            op_deallocate(env, caller, use_max, pool_id, delta_liquidity);
        }
        Instruction::Swap {
            use_max,
            pool_id,
            sell_asset,
            input,
            min_output,
        } => {
            op_swap(env, caller, use_max, pool_id, sell_asset, input, min_output);
        }
        Instruction::Claim {
            pool_id,
            delta_asset,
            delta_quote,
        } => {
            op_claim(env, caller, pool_id, delta_asset, delta_quote);
        }
    }
}

// ========================================================
// PAIR / POOL CREATION
// ========================================================

fn op_create_pair(env: &Env, asset: &Address, quote: &Address) -> u32 {
    if asset == quote {
        panic_with_error!(env, EngineError::SameToken);
    }
    if pair_exists(env, asset, quote) {
        panic_with_error!(env, EngineError::PairExists);
    }

    let decimals_asset = token::Client::new(env, asset).decimals();
    let decimals_quote = token::Client::new(env, quote).decimals();
    for decimals in [decimals_asset, decimals_quote] {
        if !(replicaswap_math::constants::MIN_DECIMALS..=replicaswap_math::constants::MAX_DECIMALS)
            .contains(&decimals)
        {
            panic_with_error!(env, EngineError::InvalidDecimals);
        }
    }

    let pair_id = bump_pair_nonce(env);
    let pair = Pair {
        asset: asset.clone(),
        quote: quote.clone(),
        decimals_asset,
        decimals_quote,
    };
    write_pair(env, pair_id, &pair);

    emit_create_pair(env, pair_id, asset, quote, decimals_asset, decimals_quote);
    pair_id
}

#[allow(clippy::too_many_arguments)]
fn op_create_pool(
    env: &Env,
    pair_ref: u32,
    controller: Option<Address>,
    priority_fee_bps: u32,
    fee_bps: u32,
    volatility_bps: u32,
    duration_seconds: u64,
    jit_seconds: u32,
    max_price: u128,
    price: u128,
) -> u64 {
    let pair_id = if pair_ref == MAGIC_PAIR_LATEST {
        read_pair_nonce(env)
    } else {
        pair_ref
    };
    if pair_id == 0 {
        panic_with_error!(env, EngineError::NonExistentPair);
    }
    let _ = read_pair(env, pair_id);

    if price == 0 || max_price == 0 {
        panic_with_error!(env, EngineError::ZeroPrice);
    }
    // strike and price must stay inside the signed invariant range
    to_i128(env, max_price);
    to_i128(env, price);
    validate_fee(env, fee_bps);
    if volatility_bps < MIN_VOLATILITY_BPS || volatility_bps > MAX_VOLATILITY_BPS {
        panic_with_error!(env, EngineError::InvalidVolatility);
    }
    if duration_seconds == 0 {
        panic_with_error!(env, EngineError::InvalidDuration);
    }

    // a controller-less pool pins the priority fee and the JIT policy
    let (priority_fee_bps, jit_seconds) = if controller.is_some() {
        validate_priority_fee(env, priority_fee_bps, fee_bps);
        validate_jit(env, jit_seconds);
        (priority_fee_bps, jit_seconds)
    } else {
        (0, DEFAULT_JIT_POLICY_SECONDS)
    };

    let pool_nonce = bump_pool_nonce(env);
    let pool_id = encode_pool_id(pair_id, controller.is_some(), pool_nonce);
    if has_pool(env, pool_id) {
        panic_with_error!(env, EngineError::PoolExists);
    }

    let created_at = now(env);
    let params = PoolParams {
        max_price,
        jit_seconds,
        fee_bps,
        priority_fee_bps,
        volatility_bps,
        duration_seconds,
        created_at,
    };

    let curve_params = CurveParams {
        strike: max_price,
        sigma_wad: curve::bps_to_wad(volatility_bps),
        tau_wad: curve::seconds_to_wad_years(duration_seconds),
    };
    let objective = CoveredCall;
    let (virtual_y, virtual_x) = objective.compute_reserves_from_price(env, &curve_params, price);

    let pool = Pool {
        pair_id,
        controller: controller.clone(),
        params,
        virtual_x,
        virtual_y,
        liquidity: 0,
        fee_growth_asset_global: 0,
        fee_growth_quote_global: 0,
        invariant_growth_global: 0,
        last_timestamp: created_at,
    };
    let mut state = build_swap_state(&pool);
    state.tau_wad = curve_params.tau_wad;
    if !objective.check_pool(env, &state) {
        panic_with_error!(env, EngineError::ZeroPrice);
    }
    write_pool(env, pool_id, &pool);

    emit_create_pool(env, pool_id, pair_id, &controller, price, virtual_x, virtual_y);
    pool_id
}

// ========================================================
// LIQUIDITY
// ========================================================

fn max_mintable(env: &Env, pool: &Pool, balance_asset_wad: u128, balance_quote_wad: u128) -> u128 {
    let by_asset = div_wad_down(env, balance_asset_wad, pool.virtual_x);
    let by_quote = div_wad_down(env, balance_quote_wad, pool.virtual_y);
    by_asset.min(by_quote)
}

fn op_allocate(
    env: &Env,
    caller: &Address,
    use_max: bool,
    pool_id: u64,
    delta_liquidity: u128,
) -> (i128, i128) {
    let mut pool = read_pool(env, pool_id);
    let pair = read_pair(env, pool.pair_id);
    let timestamp = now(env);

    if curve::tau_wad(pool.params.created_at, pool.params.duration_seconds, timestamp) == 0 {
        panic_with_error!(env, EngineError::PoolExpired);
    }

    let delta_liquidity = if use_max {
        let balance_asset = to_u128(env, read_balance(env, caller, &pair.asset).max(0));
        let balance_quote = to_u128(env, read_balance(env, caller, &pair.quote).max(0));
        max_mintable(
            env,
            &pool,
            scale_to_wad(env, balance_asset, pair.decimals_asset),
            scale_to_wad(env, balance_quote, pair.decimals_quote),
        )
    } else {
        delta_liquidity
    };
    if delta_liquidity == 0 {
        panic_with_error!(env, EngineError::ZeroLiquidity);
    }

    // token deltas round away from the pool
    let asset_wad = mul_wad_up(env, pool.virtual_x, delta_liquidity);
    let quote_wad = mul_wad_up(env, pool.virtual_y, delta_liquidity);

    let mut position = read_position(env, caller, pool_id);
    modify_position(
        &mut position,
        to_i128(env, delta_liquidity),
        pool.fee_growth_asset_global,
        pool.fee_growth_quote_global,
        pool.invariant_growth_global,
        timestamp,
    );
    pool.liquidity += delta_liquidity;
    pool.last_timestamp = timestamp;

    let delta_asset = to_i128(env, scale_from_wad_up(env, asset_wad, pair.decimals_asset));
    let delta_quote = to_i128(env, scale_from_wad_up(env, quote_wad, pair.decimals_quote));

    ledger::touch(env, &pair.asset);
    ledger::add_debit(env, &pair.asset, delta_asset);
    ledger::increase_reserve(env, &pair.asset, delta_asset);
    ledger::touch(env, &pair.quote);
    ledger::add_debit(env, &pair.quote, delta_quote);
    ledger::increase_reserve(env, &pair.quote, delta_quote);

    write_position(env, caller, pool_id, &position);
    write_pool(env, pool_id, &pool);

    emit_allocate(env, pool_id, caller, delta_liquidity, delta_asset, delta_quote);
    (delta_asset, delta_quote)
}

fn op_deallocate(
    env: &Env,
    caller: &Address,
    use_max: bool,
    pool_id: u64,
    delta_liquidity: u128,
) -> (i128, i128) {
    let mut pool = read_pool(env, pool_id);
    let pair = read_pair(env, pool.pair_id);
    let timestamp = now(env);

    if !has_position(env, caller, pool_id) {
        panic_with_error!(env, EngineError::NonExistentPosition);
    }
    let mut position = read_position(env, caller, pool_id);

    let delta_liquidity = if use_max {
        position.free_liquidity
    } else {
        delta_liquidity
    };
    if delta_liquidity == 0 {
        panic_with_error!(env, EngineError::ZeroLiquidity);
    }
    if delta_liquidity > position.free_liquidity {
        panic_with_error!(env, EngineError::DrawBalance);
    }
    if !satisfies_jit_policy(&position, timestamp, pool.params.jit_seconds) {
        panic_with_error!(env, EngineError::JitLiquidity);
    }

    // token deltas round toward the pool
    let asset_wad = mul_wad_down(env, pool.virtual_x, delta_liquidity);
    let quote_wad = mul_wad_down(env, pool.virtual_y, delta_liquidity);

    modify_position(
        &mut position,
        -to_i128(env, delta_liquidity),
        pool.fee_growth_asset_global,
        pool.fee_growth_quote_global,
        pool.invariant_growth_global,
        timestamp,
    );
    pool.liquidity -= delta_liquidity;
    pool.last_timestamp = timestamp;

    let delta_asset = to_i128(env, scale_from_wad_down(env, asset_wad, pair.decimals_asset));
    let delta_quote = to_i128(env, scale_from_wad_down(env, quote_wad, pair.decimals_quote));

    ledger::touch(env, &pair.asset);
    ledger::add_credit(env, &pair.asset, delta_asset);
    ledger::decrease_reserve(env, &pair.asset, delta_asset);
    ledger::touch(env, &pair.quote);
    ledger::add_credit(env, &pair.quote, delta_quote);
    ledger::decrease_reserve(env, &pair.quote, delta_quote);

    write_position(env, caller, pool_id, &position);
    write_pool(env, pool_id, &pool);

    emit_deallocate(env, pool_id, caller, delta_liquidity, delta_asset, delta_quote);
    (delta_asset, delta_quote)
}

// ========================================================
// SWAP
// ========================================================

fn build_swap_state(pool: &Pool) -> SwapState {
    SwapState {
        virtual_x: pool.virtual_x,
        virtual_y: pool.virtual_y,
        liquidity: pool.liquidity,
        strike: pool.params.max_price,
        sigma_wad: curve::bps_to_wad(pool.params.volatility_bps),
        tau_wad: 0,
        created_at: pool.params.created_at,
        duration_seconds: pool.params.duration_seconds,
        fee_growth_asset: pool.fee_growth_asset_global,
        fee_growth_quote: pool.fee_growth_quote_global,
        invariant_growth: pool.invariant_growth_global,
    }
}

fn op_swap(
    env: &Env,
    caller: &Address,
    use_max: bool,
    pool_id: u64,
    sell_asset: bool,
    input: u128,
    min_output: u128,
) -> (i128, i128) {
    let mut pool = read_pool(env, pool_id);
    let pair = read_pair(env, pool.pair_id);
    let timestamp = now(env);

    let objective = CoveredCall;
    let mut state = build_swap_state(&pool);
    let (valid, prev_invariant) = objective.before_swap(env, &mut state, timestamp);
    if !valid {
        panic_with_error!(env, EngineError::PoolExpired);
    }
    if pool.liquidity == 0 {
        panic_with_error!(env, EngineError::ZeroLiquidity);
    }

    let (input_token, input_decimals, output_token, output_decimals) = if sell_asset {
        (&pair.asset, pair.decimals_asset, &pair.quote, pair.decimals_quote)
    } else {
        (&pair.quote, pair.decimals_quote, &pair.asset, pair.decimals_asset)
    };

    let offered = if use_max {
        read_balance(env, caller, input_token)
    } else {
        to_i128(env, input)
    };
    if offered <= 0 {
        panic_with_error!(env, EngineError::ZeroInput);
    }
    let input_wad = scale_to_wad(env, offered as u128, input_decimals);
    let min_output_wad = scale_to_wad(env, min_output, output_decimals);

    let fee_bps = if pool.controller == Some(caller.clone()) {
        pool.params.priority_fee_bps
    } else {
        pool.params.fee_bps
    };

    let iter = swap_iteration(
        env,
        &objective,
        &state,
        sell_asset,
        input_wad,
        min_output_wad,
        fee_bps,
        prev_invariant,
    );
    if iter.consumed_wad == 0 {
        panic_with_error!(env, EngineError::ZeroInput);
    }
    let output_raw = scale_from_wad_down(env, iter.output_wad, output_decimals);
    if iter.output_wad == 0 || output_raw == 0 {
        panic_with_error!(env, EngineError::ZeroOutput);
    }
    if iter.next_invariant < iter.prev_invariant {
        panic_with_error!(env, EngineError::InvalidInvariant);
    }

    // fee growth accrues on the input side only
    if sell_asset {
        state.fee_growth_asset = state.fee_growth_asset.wrapping_add(iter.fee_growth_delta);
    } else {
        state.fee_growth_quote = state.fee_growth_quote.wrapping_add(iter.fee_growth_delta);
    }
    objective.after_swap(env, &mut state, iter.prev_invariant, iter.next_invariant);

    pool.virtual_x = iter.next_x;
    pool.virtual_y = iter.next_y;
    pool.fee_growth_asset_global = state.fee_growth_asset;
    pool.fee_growth_quote_global = state.fee_growth_quote;
    pool.invariant_growth_global = state.invariant_growth;
    pool.last_timestamp = timestamp;

    let consumed_raw =
        to_i128(env, scale_from_wad_up(env, iter.consumed_wad, input_decimals)).min(offered);
    let output_raw = to_i128(env, output_raw);

    ledger::touch(env, input_token);
    ledger::add_debit(env, input_token, consumed_raw);
    ledger::increase_reserve(env, input_token, consumed_raw);
    ledger::touch(env, output_token);
    ledger::add_credit(env, output_token, output_raw);
    ledger::decrease_reserve(env, output_token, output_raw);

    write_pool(env, pool_id, &pool);

    emit_swap(env, pool_id, caller, sell_asset, consumed_raw, output_raw, iter.fee_wad);
    (consumed_raw, output_raw)
}

// ========================================================
// CLAIM
// ========================================================

fn op_claim(env: &Env, caller: &Address, pool_id: u64, delta_asset: u128, delta_quote: u128) {
    let pool = read_pool(env, pool_id);
    let pair = read_pair(env, pool.pair_id);

    if !has_position(env, caller, pool_id) {
        panic_with_error!(env, EngineError::NonExistentPosition);
    }
    let mut position = read_position(env, caller, pool_id);
    sync_position(
        &mut position,
        pool.fee_growth_asset_global,
        pool.fee_growth_quote_global,
        pool.invariant_growth_global,
    );

    let (taken_asset_wad, taken_quote_wad) = take_owed(&mut position, delta_asset, delta_quote);
    if taken_asset_wad == 0 && taken_quote_wad == 0 {
        panic_with_error!(env, EngineError::ZeroAmounts);
    }

    // dust below one raw unit stays with the reserves
    let taken_asset = to_i128(
        env,
        scale_from_wad_down(env, taken_asset_wad, pair.decimals_asset),
    );
    let taken_quote = to_i128(
        env,
        scale_from_wad_down(env, taken_quote_wad, pair.decimals_quote),
    );

    if taken_asset > 0 {
        ledger::touch(env, &pair.asset);
        ledger::add_credit(env, &pair.asset, taken_asset);
        ledger::decrease_reserve(env, &pair.asset, taken_asset);
    }
    if taken_quote > 0 {
        ledger::touch(env, &pair.quote);
        ledger::add_credit(env, &pair.quote, taken_quote);
        ledger::decrease_reserve(env, &pair.quote, taken_quote);
    }

    write_position(env, caller, pool_id, &position);
    emit_collect(env, pool_id, caller, taken_asset, taken_quote);
}

// ========================================================
// FUND
// ========================================================

fn fund_effects(env: &Env, caller: &Address, token_address: &Address, amount: i128) -> i128 {
    let resolved = if amount == MAX_AMOUNT {
        token::Client::new(env, token_address).balance(caller)
    } else {
        amount
    };
    if resolved <= 0 {
        panic_with_error!(env, EngineError::ZeroInput);
    }

    // funding is new money: it never spends the virtual balance
    write_balance(
        env,
        caller,
        token_address,
        read_balance(env, caller, token_address) + resolved,
    );
    ledger::increase_reserve(env, token_address, resolved);
    ledger::queue_pull(env, token_address, caller, resolved);
    ledger::touch(env, token_address);
    resolved
}

// ========================================================
// PARAMETER VALIDATION
// ========================================================

fn validate_fee(env: &Env, fee_bps: u32) {
    if !(MIN_FEE_BPS..=MAX_FEE_BPS).contains(&fee_bps) {
        panic_with_error!(env, EngineError::InvalidFee);
    }
}

fn validate_priority_fee(env: &Env, priority_fee_bps: u32, fee_bps: u32) {
    if priority_fee_bps < MIN_FEE_BPS || priority_fee_bps > fee_bps {
        panic_with_error!(env, EngineError::InvalidFee);
    }
}

fn validate_jit(env: &Env, jit_seconds: u32) {
    if jit_seconds > JIT_POLICY_MAX_SECONDS {
        panic_with_error!(env, EngineError::InvalidJit);
    }
}
