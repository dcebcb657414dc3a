#![allow(dead_code)]

use soroban_sdk::{
    contract, contractimpl, contracttype, testutils::Address as _, token, Address, Env,
};

use replicaswap_engine::{instructions, types, ReplicaEngine, ReplicaEngineClient};
use replicaswap_math::constants::WAD;

// Test constants
pub const DEFAULT_FEE_BPS: u32 = 30; // 0.30%
pub const DEFAULT_VOLATILITY_BPS: u32 = 10_000; // 100%
pub const DEFAULT_DURATION: u64 = 31_536_000; // one year
pub const DEFAULT_JIT: u32 = 4;
pub const DEFAULT_STRIKE: u128 = 2_000 * WAD;
pub const DEFAULT_PRICE: u128 = 2_000 * WAD;

/// Register the engine with a native token and return its client
pub fn setup_engine(env: &Env) -> (ReplicaEngineClient<'_>, Address) {
    let admin = Address::generate(env);
    let native = create_token(env, &admin);

    let engine_id = env.register(ReplicaEngine, ());
    let client = ReplicaEngineClient::new(env, &engine_id);
    client.initialize(&native);

    (client, native)
}

/// Create a Stellar asset contract test token (7 decimals)
pub fn create_token(env: &Env, admin: &Address) -> Address {
    env.register_stellar_asset_contract_v2(admin.clone()).address()
}

/// Mint Stellar asset tokens to an address
pub fn mint_tokens(env: &Env, token: &Address, to: &Address, amount: i128) {
    use soroban_sdk::token::StellarAssetClient;
    StellarAssetClient::new(env, token).mint(to, &amount);
}

pub fn token_balance(env: &Env, token: &Address, id: &Address) -> i128 {
    token::Client::new(env, token).balance(id)
}

/// Register a pair through multiprocess, returning its id
pub fn create_pair(
    env: &Env,
    client: &ReplicaEngineClient,
    caller: &Address,
    asset: &Address,
    quote: &Address,
) -> u32 {
    client.multiprocess(caller, &instructions::encode_create_pair(env, asset, quote));
    client.get_pair_nonce()
}

/// Create a pool on the latest pair with default parameters
pub fn create_default_pool(
    env: &Env,
    client: &ReplicaEngineClient,
    caller: &Address,
    controller: Option<Address>,
) -> u64 {
    create_pool(
        env,
        client,
        caller,
        &controller,
        0,
        DEFAULT_FEE_BPS,
        DEFAULT_JIT,
        DEFAULT_STRIKE,
        DEFAULT_PRICE,
    )
}

pub fn create_pool(
    env: &Env,
    client: &ReplicaEngineClient,
    caller: &Address,
    controller: &Option<Address>,
    priority_fee_bps: u32,
    fee_bps: u32,
    jit_seconds: u32,
    max_price: u128,
    price: u128,
) -> u64 {
    client.multiprocess(
        caller,
        &instructions::encode_create_pool(
            env,
            types::MAGIC_PAIR_LATEST,
            controller,
            priority_fee_bps,
            fee_bps,
            DEFAULT_VOLATILITY_BPS,
            DEFAULT_DURATION,
            jit_seconds,
            max_price,
            price,
        ),
    );
    types::encode_pool_id(
        client.get_pair_nonce(),
        controller.is_some(),
        client.get_pool_nonce(),
    )
}

/// A pair of funded Stellar asset tokens plus a ready pool
pub struct PoolFixture {
    pub asset: Address,
    pub quote: Address,
    pub pool_id: u64,
    pub lp: Address,
}

pub fn setup_default_pool(env: &Env, client: &ReplicaEngineClient) -> PoolFixture {
    let admin = Address::generate(env);
    let lp = Address::generate(env);
    let asset = create_token(env, &admin);
    let quote = create_token(env, &admin);

    // 7-decimal tokens: 10^14 raw units = ten million tokens
    mint_tokens(env, &asset, &lp, 100_000_000_000_000);
    mint_tokens(env, &quote, &lp, 100_000_000_000_000);

    create_pair(env, client, &lp, &asset, &quote);
    let pool_id = create_default_pool(env, client, &lp, None);

    PoolFixture {
        asset,
        quote,
        pool_id,
        lp,
    }
}

pub fn allocate(
    env: &Env,
    client: &ReplicaEngineClient,
    caller: &Address,
    pool_id: &u64,
    delta_liquidity: u128,
) {
    client.multiprocess(
        caller,
        &instructions::encode_allocate(env, false, *pool_id, delta_liquidity),
    );
}

pub fn deallocate(
    env: &Env,
    client: &ReplicaEngineClient,
    caller: &Address,
    pool_id: &u64,
    delta_liquidity: u128,
) {
    client.multiprocess(
        caller,
        &instructions::encode_deallocate(env, false, *pool_id, delta_liquidity),
    );
}

pub fn swap(
    env: &Env,
    client: &ReplicaEngineClient,
    caller: &Address,
    pool_id: &u64,
    sell_asset: bool,
    input: u128,
    min_output: u128,
) {
    client.multiprocess(
        caller,
        &instructions::encode_swap(env, false, *pool_id, sell_asset, input, min_output),
    );
}

/// Error helper matching panic_with_error codes through try_ clients
pub fn contract_error(code: u32) -> soroban_sdk::Error {
    soroban_sdk::Error::from_contract_error(code)
}

/// The universal ledger invariants that must hold after every operation
pub fn assert_ledger_invariants(env: &Env, client: &ReplicaEngineClient, tokens: &[&Address]) {
    for touched in tokens {
        let reserve = client.get_reserve(touched);
        let held = token_balance(env, touched, &client.address);
        assert!(
            reserve <= held,
            "reserve {} exceeds held balance {}",
            reserve,
            held
        );
        assert!(client.get_net_balance(touched) <= 0);
    }
}

// ============================================================
// MOCK TOKEN
// ============================================================
// A minimal token with configurable decimals and an optional
// reentry hook in transfer, for the decimals validation and
// reentrancy scenarios the Stellar asset contract cannot drive.

#[contracttype]
pub enum MockTokenKey {
    Decimals,
    Reenter,
    Balance(Address),
}

#[contract]
pub struct MockToken;

#[contractimpl]
impl MockToken {
    pub fn init(env: Env, decimals: u32) {
        env.storage().instance().set(&MockTokenKey::Decimals, &decimals);
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage().instance().get(&MockTokenKey::Decimals).unwrap_or(7)
    }

    pub fn mint(env: Env, to: Address, amount: i128) {
        let key = MockTokenKey::Balance(to);
        let balance: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        env.storage().persistent().set(&key, &(balance + amount));
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&MockTokenKey::Balance(id))
            .unwrap_or(0)
    }

    /// When a reentry target is set, dial back into the engine before
    /// moving balances, as a hostile token callback would
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();

        if let Some(engine) = env
            .storage()
            .instance()
            .get::<_, Address>(&MockTokenKey::Reenter)
        {
            ReplicaEngineClient::new(&env, &engine).fund(
                &from,
                &env.current_contract_address(),
                &1,
            );
        }

        let from_key = MockTokenKey::Balance(from);
        let to_key = MockTokenKey::Balance(to);
        let from_balance: i128 = env.storage().persistent().get(&from_key).unwrap_or(0);
        let to_balance: i128 = env.storage().persistent().get(&to_key).unwrap_or(0);
        if from_balance < amount {
            panic!("mock token: balance too low");
        }
        env.storage().persistent().set(&from_key, &(from_balance - amount));
        env.storage().persistent().set(&to_key, &(to_balance + amount));
    }

    pub fn set_reenter(env: Env, engine: Address) {
        env.storage().instance().set(&MockTokenKey::Reenter, &engine);
    }
}

pub fn create_mock_token(env: &Env, decimals: u32) -> (Address, MockTokenClient<'_>) {
    let id = env.register(MockToken, ());
    let client = MockTokenClient::new(env, &id);
    client.init(&decimals);
    (id, client)
}
