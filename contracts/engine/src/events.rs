// Engine events module for ReplicaSwap
// All events use compact names to reduce storage/gas costs

use soroban_sdk::{Address, Env, Symbol};

/// Emitted when the engine is initialized
/// Topics: ("EngineInit",)
/// Data: (native,)
pub fn emit_initialized(env: &Env, native: &Address) {
    env.events()
        .publish((Symbol::new(env, "EngineInit"),), (native.clone(),));
}

/// Emitted when a pair is registered
/// Topics: ("CreatePair",)
/// Data: (pair_id, asset, quote, decimals_asset, decimals_quote)
pub fn emit_create_pair(
    env: &Env,
    pair_id: u32,
    asset: &Address,
    quote: &Address,
    decimals_asset: u32,
    decimals_quote: u32,
) {
    env.events().publish(
        (Symbol::new(env, "CreatePair"),),
        (
            pair_id,
            asset.clone(),
            quote.clone(),
            decimals_asset,
            decimals_quote,
        ),
    );
}

/// Emitted when a pool is created
/// Topics: ("CreatePool",)
/// Data: (pool_id, pair_id, controller, price, virtual_x, virtual_y)
pub fn emit_create_pool(
    env: &Env,
    pool_id: u64,
    pair_id: u32,
    controller: &Option<Address>,
    price: u128,
    virtual_x: u128,
    virtual_y: u128,
) {
    env.events().publish(
        (Symbol::new(env, "CreatePool"),),
        (
            pool_id,
            pair_id,
            controller.clone(),
            price,
            virtual_x,
            virtual_y,
        ),
    );
}

/// Emitted when a controller adjusts pool parameters
/// Topics: ("ChangeParams",)
/// Data: (pool_id, priority_fee_bps, fee_bps, jit_seconds)
pub fn emit_change_parameters(
    env: &Env,
    pool_id: u64,
    priority_fee_bps: u32,
    fee_bps: u32,
    jit_seconds: u32,
) {
    env.events().publish(
        (Symbol::new(env, "ChangeParams"),),
        (pool_id, priority_fee_bps, fee_bps, jit_seconds),
    );
}

/// Emitted when liquidity is added
/// Topics: ("Allocate",)
/// Data: (pool_id, owner, delta_liquidity, delta_asset, delta_quote)
pub fn emit_allocate(
    env: &Env,
    pool_id: u64,
    owner: &Address,
    delta_liquidity: u128,
    delta_asset: i128,
    delta_quote: i128,
) {
    env.events().publish(
        (Symbol::new(env, "Allocate"),),
        (pool_id, owner.clone(), delta_liquidity, delta_asset, delta_quote),
    );
}

/// Emitted when liquidity is removed
/// Topics: ("Deallocate",)
/// Data: (pool_id, owner, delta_liquidity, delta_asset, delta_quote)
pub fn emit_deallocate(
    env: &Env,
    pool_id: u64,
    owner: &Address,
    delta_liquidity: u128,
    delta_asset: i128,
    delta_quote: i128,
) {
    env.events().publish(
        (Symbol::new(env, "Deallocate"),),
        (pool_id, owner.clone(), delta_liquidity, delta_asset, delta_quote),
    );
}

/// Emitted on every executed swap
/// Topics: ("Swap",)
/// Data: (pool_id, caller, sell_asset, amount_in, amount_out, fee_wad)
pub fn emit_swap(
    env: &Env,
    pool_id: u64,
    caller: &Address,
    sell_asset: bool,
    amount_in: i128,
    amount_out: i128,
    fee_wad: u128,
) {
    env.events().publish(
        (Symbol::new(env, "Swap"),),
        (pool_id, caller.clone(), sell_asset, amount_in, amount_out, fee_wad),
    );
}

/// Emitted when earned fees move into the caller's balance
/// Topics: ("Collect",)
/// Data: (pool_id, owner, amount_asset, amount_quote)
pub fn emit_collect(
    env: &Env,
    pool_id: u64,
    owner: &Address,
    amount_asset: i128,
    amount_quote: i128,
) {
    env.events().publish(
        (Symbol::new(env, "Collect"),),
        (pool_id, owner.clone(), amount_asset, amount_quote),
    );
}

/// Emitted when the native token is deposited
/// Topics: ("Deposit",)
/// Data: (caller, amount)
pub fn emit_deposit(env: &Env, caller: &Address, amount: i128) {
    env.events()
        .publish((Symbol::new(env, "Deposit"),), (caller.clone(), amount));
}

/// Emitted when a token is funded into the engine
/// Topics: ("Fund",)
/// Data: (caller, token, amount)
pub fn emit_fund(env: &Env, caller: &Address, token: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "Fund"),),
        (caller.clone(), token.clone(), amount),
    );
}

/// Emitted when a balance is withdrawn
/// Topics: ("Draw",)
/// Data: (caller, token, amount, to)
pub fn emit_draw(env: &Env, caller: &Address, token: &Address, amount: i128, to: &Address) {
    env.events().publish(
        (Symbol::new(env, "Draw"),),
        (caller.clone(), token.clone(), amount, to.clone()),
    );
}

/// Emitted when tracked reserves grow
/// Topics: ("IncReserve",)
/// Data: (token, amount)
pub fn emit_increase_reserve(env: &Env, token: &Address, amount: i128) {
    env.events()
        .publish((Symbol::new(env, "IncReserve"),), (token.clone(), amount));
}

/// Emitted when tracked reserves shrink
/// Topics: ("DecReserve",)
/// Data: (token, amount)
pub fn emit_decrease_reserve(env: &Env, token: &Address, amount: i128) {
    env.events()
        .publish((Symbol::new(env, "DecReserve"),), (token.clone(), amount));
}

/// Emitted when settlement mints into a virtual balance
/// Topics: ("Credit",)
/// Data: (owner, token, amount)
pub fn emit_credit(env: &Env, owner: &Address, token: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "Credit"),),
        (owner.clone(), token.clone(), amount),
    );
}

/// Emitted when settlement spends a virtual balance
/// Topics: ("Debit",)
/// Data: (owner, token, amount)
pub fn emit_debit(env: &Env, owner: &Address, token: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "Debit"),),
        (owner.clone(), token.clone(), amount),
    );
}
