mod common;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env,
};

use replicaswap_engine::instructions;
use replicaswap_math::constants::WAD;
use replicaswap_math::{scale_from_wad_down, scale_from_wad_up};

// ============================================================
// ALLOCATE
// ============================================================

#[test]
fn test_allocate_debits_virtual_reserves() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = common::setup_engine(&env);
    let fixture = common::setup_default_pool(&env, &client);
    let pool = client.get_pool(&fixture.pool_id);

    let wallet_asset_before = common::token_balance(&env, &fixture.asset, &fixture.lp);
    let wallet_quote_before = common::token_balance(&env, &fixture.quote, &fixture.lp);

    common::allocate(&env, &client, &fixture.lp, &fixture.pool_id, WAD);

    // one WAD of liquidity costs exactly the per-liquidity reserves,
    // rounded away from the pool at 7 decimals
    let expected_asset = scale_from_wad_up(&env, pool.virtual_x, 7) as i128;
    let expected_quote = scale_from_wad_up(&env, pool.virtual_y, 7) as i128;
    assert_eq!(
        client.get_liquidity_deltas(&fixture.pool_id, &(WAD as i128)),
        (expected_asset, expected_quote)
    );

    let position = client.get_position(&fixture.lp, &fixture.pool_id);
    assert_eq!(position.free_liquidity, WAD);
    assert_eq!(client.get_pool(&fixture.pool_id).liquidity, WAD);

    // reserves grew by the deltas, pulled from the wallet in settlement
    assert_eq!(client.get_reserve(&fixture.asset), expected_asset);
    assert_eq!(client.get_reserve(&fixture.quote), expected_quote);
    assert_eq!(
        common::token_balance(&env, &fixture.asset, &fixture.lp),
        wallet_asset_before - expected_asset
    );
    assert_eq!(
        common::token_balance(&env, &fixture.quote, &fixture.lp),
        wallet_quote_before - expected_quote
    );

    common::assert_ledger_invariants(&env, &client, &[&fixture.asset, &fixture.quote]);
}

#[test]
fn test_allocate_round_trip_returns_liquidity_and_keeps_dust() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|ledger| ledger.timestamp = 1_000);

    let (client, _) = common::setup_engine(&env);
    let fixture = common::setup_default_pool(&env, &client);
    let pool = client.get_pool(&fixture.pool_id);

    // an uneven delta so the directed roundings actually differ
    let delta = WAD + 7_777;
    common::allocate(&env, &client, &fixture.lp, &fixture.pool_id, delta);

    env.ledger().with_mut(|ledger| ledger.timestamp = 1_004);
    common::deallocate(&env, &client, &fixture.lp, &fixture.pool_id, delta);

    let position = client.get_position(&fixture.lp, &fixture.pool_id);
    assert_eq!(position.free_liquidity, 0);
    assert_eq!(client.get_pool(&fixture.pool_id).liquidity, 0);

    // rounding dust accrues to reserves, never to the caller
    let dust_asset = client.get_reserve(&fixture.asset);
    let dust_quote = client.get_reserve(&fixture.quote);
    assert!(dust_asset >= 0 && dust_asset <= 2);
    assert!(dust_quote >= 0 && dust_quote <= 2);

    // what came back landed in the virtual balance
    let credited_asset = client.get_balance(&fixture.lp, &fixture.asset);
    let credited_quote = client.get_balance(&fixture.lp, &fixture.quote);
    assert!(credited_asset > 0 && credited_quote > 0);
    assert_eq!(
        credited_asset + dust_asset,
        common::token_balance(&env, &fixture.asset, &client.address)
    );
    assert_eq!(
        credited_quote + dust_quote,
        common::token_balance(&env, &fixture.quote, &client.address)
    );

    common::assert_ledger_invariants(&env, &client, &[&fixture.asset, &fixture.quote]);
}

#[test]
fn test_allocate_use_max_matches_view() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = common::setup_engine(&env);
    let fixture = common::setup_default_pool(&env, &client);

    // fund virtual balances, then allocate everything they can mint
    client.fund(&fixture.lp, &fixture.asset, &40_000_000);
    client.fund(&fixture.lp, &fixture.quote, &50_000_000_000);

    let expected = client.get_max_liquidity(&fixture.pool_id, &40_000_000, &50_000_000_000);
    client.multiprocess(
        &fixture.lp,
        &instructions::encode_allocate(&env, true, fixture.pool_id, 0),
    );

    let position = client.get_position(&fixture.lp, &fixture.pool_id);
    assert_eq!(position.free_liquidity, expected);
    assert!(expected > 0);

    common::assert_ledger_invariants(&env, &client, &[&fixture.asset, &fixture.quote]);
}

#[test]
fn test_allocate_validation_errors() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = common::setup_engine(&env);
    let fixture = common::setup_default_pool(&env, &client);

    // unknown pool
    assert_eq!(
        client.try_multiprocess(
            &fixture.lp,
            &instructions::encode_allocate(&env, false, 999, WAD)
        ),
        Err(Ok(common::contract_error(303)))
    ); // NonExistentPool

    // zero delta
    assert_eq!(
        client.try_multiprocess(
            &fixture.lp,
            &instructions::encode_allocate(&env, false, fixture.pool_id, 0)
        ),
        Err(Ok(common::contract_error(201)))
    ); // ZeroLiquidity
}

// ============================================================
// JIT POLICY
// ============================================================

#[test]
fn test_jit_policy_gates_early_removal() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|ledger| ledger.timestamp = 10_000);

    let (client, _) = common::setup_engine(&env);
    let fixture = common::setup_default_pool(&env, &client);
    common::allocate(&env, &client, &fixture.lp, &fixture.pool_id, WAD);

    // one second inside the window: rejected
    env.ledger().with_mut(|ledger| ledger.timestamp = 10_000 + 3);
    assert_eq!(
        client.try_multiprocess(
            &fixture.lp,
            &instructions::encode_deallocate(&env, false, fixture.pool_id, WAD)
        ),
        Err(Ok(common::contract_error(400)))
    ); // JitLiquidity

    // exactly at the window: accepted
    env.ledger().with_mut(|ledger| ledger.timestamp = 10_000 + 4);
    common::deallocate(&env, &client, &fixture.lp, &fixture.pool_id, WAD);
    assert_eq!(client.get_pool(&fixture.pool_id).liquidity, 0);
}

#[test]
fn test_deallocate_validation_errors() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|ledger| ledger.timestamp = 10_000);

    let (client, _) = common::setup_engine(&env);
    let fixture = common::setup_default_pool(&env, &client);

    // no position yet
    assert_eq!(
        client.try_multiprocess(
            &fixture.lp,
            &instructions::encode_deallocate(&env, false, fixture.pool_id, WAD)
        ),
        Err(Ok(common::contract_error(304)))
    ); // NonExistentPosition

    common::allocate(&env, &client, &fixture.lp, &fixture.pool_id, WAD);
    env.ledger().with_mut(|ledger| ledger.timestamp = 10_010);

    // more than the position holds
    assert_eq!(
        client.try_multiprocess(
            &fixture.lp,
            &instructions::encode_deallocate(&env, false, fixture.pool_id, 2 * WAD)
        ),
        Err(Ok(common::contract_error(402)))
    ); // DrawBalance
}

#[test]
fn test_deallocate_use_max_empties_position() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|ledger| ledger.timestamp = 10_000);

    let (client, _) = common::setup_engine(&env);
    let fixture = common::setup_default_pool(&env, &client);
    common::allocate(&env, &client, &fixture.lp, &fixture.pool_id, 3 * WAD);

    env.ledger().with_mut(|ledger| ledger.timestamp = 10_004);
    client.multiprocess(
        &fixture.lp,
        &instructions::encode_deallocate(&env, true, fixture.pool_id, 0),
    );
    assert_eq!(
        client.get_position(&fixture.lp, &fixture.pool_id).free_liquidity,
        0
    );
}

// ============================================================
// EXPIRY
// ============================================================

#[test]
fn test_expired_pool_accepts_only_removal() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|ledger| ledger.timestamp = 1_000);

    let (client, _) = common::setup_engine(&env);
    let fixture = common::setup_default_pool(&env, &client);
    common::allocate(&env, &client, &fixture.lp, &fixture.pool_id, WAD);

    // past maturity
    env.ledger()
        .with_mut(|ledger| ledger.timestamp = 1_000 + common::DEFAULT_DURATION + 1);

    assert_eq!(
        client.try_multiprocess(
            &fixture.lp,
            &instructions::encode_swap(&env, false, fixture.pool_id, true, 1_000_000, 0)
        ),
        Err(Ok(common::contract_error(401)))
    ); // PoolExpired
    assert_eq!(
        client.try_multiprocess(
            &fixture.lp,
            &instructions::encode_allocate(&env, false, fixture.pool_id, WAD)
        ),
        Err(Ok(common::contract_error(401)))
    );

    // removal still works after expiry
    common::deallocate(&env, &client, &fixture.lp, &fixture.pool_id, WAD);
    assert_eq!(client.get_pool(&fixture.pool_id).liquidity, 0);
}

// ============================================================
// POSITION ACCOUNTING
// ============================================================

#[test]
fn test_pool_liquidity_is_sum_of_positions() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = common::setup_engine(&env);
    let fixture = common::setup_default_pool(&env, &client);

    let second = Address::generate(&env);
    common::mint_tokens(&env, &fixture.asset, &second, 100_000_000_000_000);
    common::mint_tokens(&env, &fixture.quote, &second, 100_000_000_000_000);

    common::allocate(&env, &client, &fixture.lp, &fixture.pool_id, 2 * WAD);
    common::allocate(&env, &client, &second, &fixture.pool_id, 5 * WAD);

    let total = client.get_position(&fixture.lp, &fixture.pool_id).free_liquidity
        + client.get_position(&second, &fixture.pool_id).free_liquidity;
    assert_eq!(client.get_pool(&fixture.pool_id).liquidity, total);
    assert_eq!(total, 7 * WAD);
}

#[test]
fn test_liquidity_deltas_view_rounds_by_direction() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = common::setup_engine(&env);
    let fixture = common::setup_default_pool(&env, &client);
    let pool = client.get_pool(&fixture.pool_id);

    let delta = WAD + 1;
    let (up_asset, up_quote) = client.get_liquidity_deltas(&fixture.pool_id, &(delta as i128));
    let (down_asset, down_quote) =
        client.get_liquidity_deltas(&fixture.pool_id, &-(delta as i128));

    assert!(up_asset >= down_asset);
    assert!(up_quote >= down_quote);

    // the down direction floors twice: WAD scale then token scale
    let exact_asset = pool.virtual_x * delta / WAD;
    assert_eq!(down_asset, scale_from_wad_down(&env, exact_asset, 7) as i128);
}
