// SPDX-License-Identifier: MIT
// Engine Storage

use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};

use crate::error::EngineError;
use crate::types::{EngineConfig, Pair, Payment, Pool, Position};

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
pub enum DataKey {
    Config,
    PairNonce,
    PoolNonce,
    Pair(u32),
    PairIndex(Address, Address),
    Pool(u64),
    Position(Address, u64),
    Reserve(Address),
    Balance(Address, Address),
    // transient state of the in-flight operation
    OpLock,
    Settled,
    WarmTokens,
    PendingDebit(Address),
    PendingCredit(Address),
    Payments,
}

// ============================================================
// STORAGE CONFIGURATION
// ============================================================

pub mod storage_ttl {
    pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 6_307_200;
    pub const PERSISTENT_BUMP_AMOUNT: u32 = 6_307_200;
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage().persistent().extend_ttl(
        key,
        storage_ttl::PERSISTENT_LIFETIME_THRESHOLD,
        storage_ttl::PERSISTENT_BUMP_AMOUNT,
    );
}

// ============================================================
// CONFIG STORAGE
// ============================================================

#[inline]
pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Config)
}

pub fn write_config(env: &Env, config: &EngineConfig) {
    env.storage().persistent().set(&DataKey::Config, config);
    extend_persistent_ttl(env, &DataKey::Config);
}

pub fn read_config(env: &Env) -> EngineConfig {
    match env.storage().persistent().get(&DataKey::Config) {
        Some(config) => config,
        None => panic_with_error!(env, EngineError::NotInitialized),
    }
}

// ============================================================
// PAIR STORAGE
// ============================================================

pub fn read_pair_nonce(env: &Env) -> u32 {
    env.storage().persistent().get(&DataKey::PairNonce).unwrap_or(0)
}

pub fn bump_pair_nonce(env: &Env) -> u32 {
    let next = read_pair_nonce(env) + 1;
    env.storage().persistent().set(&DataKey::PairNonce, &next);
    extend_persistent_ttl(env, &DataKey::PairNonce);
    next
}

pub fn pair_exists(env: &Env, asset: &Address, quote: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::PairIndex(asset.clone(), quote.clone()))
}

pub fn write_pair(env: &Env, pair_id: u32, pair: &Pair) {
    let key = DataKey::Pair(pair_id);
    env.storage().persistent().set(&key, pair);
    extend_persistent_ttl(env, &key);

    let index = DataKey::PairIndex(pair.asset.clone(), pair.quote.clone());
    env.storage().persistent().set(&index, &pair_id);
    extend_persistent_ttl(env, &index);
}

pub fn read_pair(env: &Env, pair_id: u32) -> Pair {
    match env.storage().persistent().get(&DataKey::Pair(pair_id)) {
        Some(pair) => pair,
        None => panic_with_error!(env, EngineError::NonExistentPair),
    }
}

// ============================================================
// POOL STORAGE
// ============================================================

pub fn read_pool_nonce(env: &Env) -> u32 {
    env.storage().persistent().get(&DataKey::PoolNonce).unwrap_or(0)
}

pub fn bump_pool_nonce(env: &Env) -> u32 {
    let next = read_pool_nonce(env) + 1;
    env.storage().persistent().set(&DataKey::PoolNonce, &next);
    extend_persistent_ttl(env, &DataKey::PoolNonce);
    next
}

pub fn has_pool(env: &Env, pool_id: u64) -> bool {
    env.storage().persistent().has(&DataKey::Pool(pool_id))
}

pub fn write_pool(env: &Env, pool_id: u64, pool: &Pool) {
    let key = DataKey::Pool(pool_id);
    env.storage().persistent().set(&key, pool);
    extend_persistent_ttl(env, &key);
}

pub fn read_pool(env: &Env, pool_id: u64) -> Pool {
    match env.storage().persistent().get(&DataKey::Pool(pool_id)) {
        Some(pool) => pool,
        None => panic_with_error!(env, EngineError::NonExistentPool),
    }
}

// ============================================================
// POSITION STORAGE
// ============================================================

pub fn has_position(env: &Env, owner: &Address, pool_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Position(owner.clone(), pool_id))
}

pub fn write_position(env: &Env, owner: &Address, pool_id: u64, pos: &Position) {
    let key = DataKey::Position(owner.clone(), pool_id);
    env.storage().persistent().set(&key, pos);
    extend_persistent_ttl(env, &key);
}

pub fn read_position(env: &Env, owner: &Address, pool_id: u64) -> Position {
    env.storage()
        .persistent()
        .get(&DataKey::Position(owner.clone(), pool_id))
        .unwrap_or_default()
}

// ============================================================
// LEDGER STORAGE
// ============================================================

pub fn read_reserve(env: &Env, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Reserve(token.clone()))
        .unwrap_or(0)
}

pub fn write_reserve(env: &Env, token: &Address, amount: i128) {
    let key = DataKey::Reserve(token.clone());
    env.storage().persistent().set(&key, &amount);
    extend_persistent_ttl(env, &key);
}

pub fn read_balance(env: &Env, owner: &Address, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(owner.clone(), token.clone()))
        .unwrap_or(0)
}

pub fn write_balance(env: &Env, owner: &Address, token: &Address, amount: i128) {
    let key = DataKey::Balance(owner.clone(), token.clone());
    env.storage().persistent().set(&key, &amount);
    extend_persistent_ttl(env, &key);
}

// ============================================================
// OPERATION-TRANSIENT STORAGE
// ============================================================
// Instance entries live for exactly one external operation and are
// cleared by the settlement pass.

pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::OpLock)
}

pub fn set_locked(env: &Env) {
    env.storage().instance().set(&DataKey::OpLock, &true);
}

pub fn clear_locked(env: &Env) {
    env.storage().instance().remove(&DataKey::OpLock);
}

pub fn is_settled(env: &Env) -> bool {
    env.storage().instance().get(&DataKey::Settled).unwrap_or(true)
}

pub fn set_settled(env: &Env, settled: bool) {
    env.storage().instance().set(&DataKey::Settled, &settled);
}

pub fn read_warm_tokens(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::WarmTokens)
        .unwrap_or(Vec::new(env))
}

pub fn write_warm_tokens(env: &Env, warm: &Vec<Address>) {
    env.storage().instance().set(&DataKey::WarmTokens, warm);
}

pub fn clear_warm_tokens(env: &Env) {
    env.storage().instance().remove(&DataKey::WarmTokens);
}

pub fn read_pending_debit(env: &Env, token: &Address) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::PendingDebit(token.clone()))
        .unwrap_or(0)
}

pub fn write_pending_debit(env: &Env, token: &Address, amount: i128) {
    env.storage()
        .instance()
        .set(&DataKey::PendingDebit(token.clone()), &amount);
}

pub fn read_pending_credit(env: &Env, token: &Address) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::PendingCredit(token.clone()))
        .unwrap_or(0)
}

pub fn write_pending_credit(env: &Env, token: &Address, amount: i128) {
    env.storage()
        .instance()
        .set(&DataKey::PendingCredit(token.clone()), &amount);
}

pub fn clear_pending(env: &Env, token: &Address) {
    env.storage().instance().remove(&DataKey::PendingDebit(token.clone()));
    env.storage().instance().remove(&DataKey::PendingCredit(token.clone()));
}

pub fn read_payments(env: &Env) -> Vec<Payment> {
    env.storage()
        .instance()
        .get(&DataKey::Payments)
        .unwrap_or(Vec::new(env))
}

pub fn write_payments(env: &Env, payments: &Vec<Payment>) {
    env.storage().instance().set(&DataKey::Payments, payments);
}

pub fn clear_payments(env: &Env) {
    env.storage().instance().remove(&DataKey::Payments);
}
