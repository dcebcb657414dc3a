// SPDX-License-Identifier: MIT
// Accounting Ledger and Settlement
//
// During an operation, effects touch `reserves` and record pending
// per-token flows for the caller. No token moves until the settlement
// pass at the end of the operation: warm tokens reconcile LIFO, then
// the payment queue drains FIFO, then the settled flag flips back.

use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::error::EngineError;
use crate::events;
use crate::storage::*;
use crate::types::Payment;

// ============================================================
// OPERATION-SCOPED PRIMITIVES
// ============================================================

/// Mark a token as touched by the current operation
pub fn touch(env: &Env, token: &Address) {
    let mut warm = read_warm_tokens(env);
    if !warm.contains(token) {
        warm.push_back(token.clone());
        write_warm_tokens(env, &warm);
    }
}

/// Increase what the caller owes for this operation
pub fn add_debit(env: &Env, token: &Address, amount: i128) {
    if amount > 0 {
        write_pending_debit(env, token, read_pending_debit(env, token) + amount);
    }
}

/// Increase what the caller is owed by this operation
pub fn add_credit(env: &Env, token: &Address, amount: i128) {
    if amount > 0 {
        write_pending_credit(env, token, read_pending_credit(env, token) + amount);
    }
}

pub fn increase_reserve(env: &Env, token: &Address, amount: i128) {
    if amount > 0 {
        write_reserve(env, token, read_reserve(env, token) + amount);
        events::emit_increase_reserve(env, token, amount);
    }
}

pub fn decrease_reserve(env: &Env, token: &Address, amount: i128) {
    if amount > 0 {
        let reserve = read_reserve(env, token);
        if reserve < amount {
            panic_with_error!(env, EngineError::InvalidSettlement);
        }
        write_reserve(env, token, reserve - amount);
        events::emit_decrease_reserve(env, token, amount);
    }
}

/// Queue a pull (counterparty -> engine) for the settlement drain
pub fn queue_pull(env: &Env, token: &Address, from: &Address, amount: i128) {
    push_payment(env, token, from, amount, true);
}

/// Queue a payout (engine -> counterparty) for the settlement drain
pub fn queue_payout(env: &Env, token: &Address, to: &Address, amount: i128) {
    push_payment(env, token, to, amount, false);
}

fn push_payment(env: &Env, token: &Address, counterparty: &Address, amount: i128, pull: bool) {
    if amount == 0 {
        return;
    }
    let mut payments = read_payments(env);
    payments.push_back(Payment {
        token: token.clone(),
        counterparty: counterparty.clone(),
        amount,
        pull,
    });
    write_payments(env, &payments);
}

/// Tracked reserve minus the externally observable balance; at most
/// zero whenever no operation is in flight
pub fn get_net_balance(env: &Env, token: &Address) -> i128 {
    let held = token::Client::new(env, token).balance(&env.current_contract_address());
    read_reserve(env, token) - held
}

// ============================================================
// SETTLEMENT PASS
// ============================================================

pub fn settle(env: &Env, caller: &Address) {
    let engine = env.current_contract_address();
    let warm = read_warm_tokens(env);

    // warm tokens reconcile in LIFO order
    let mut index = warm.len();
    while index > 0 {
        index -= 1;
        let touched = warm.get_unchecked(index);
        let debit = read_pending_debit(env, &touched);
        let credit = read_pending_credit(env, &touched);

        if debit > credit {
            // caller owes: spend the virtual balance first, pull the rest
            let owed = debit - credit;
            let balance = read_balance(env, caller, &touched);
            let applied = balance.min(owed);
            if applied > 0 {
                write_balance(env, caller, &touched, balance - applied);
                decrease_reserve(env, &touched, applied);
                events::emit_debit(env, caller, &touched, applied);
            }
            let remainder = owed - applied;
            if remainder > 0 {
                queue_pull(env, &touched, caller, remainder);
            }
        } else if credit > debit {
            // caller is owed: mint the surplus and re-back it
            let surplus = credit - debit;
            write_balance(env, caller, &touched, read_balance(env, caller, &touched) + surplus);
            increase_reserve(env, &touched, surplus);
            events::emit_credit(env, caller, &touched, surplus);
        }

        clear_pending(env, &touched);
    }

    // drain queued transfers FIFO; these are the only external token
    // touches of the whole operation
    let payments = read_payments(env);
    for payment in payments.iter() {
        let client = token::Client::new(env, &payment.token);
        if payment.pull {
            client.transfer(&payment.counterparty, &engine, &payment.amount);
        } else {
            client.transfer(&engine, &payment.counterparty, &payment.amount);
        }
    }

    clear_payments(env);
    clear_warm_tokens(env);
    set_settled(env, true);
}

/// Warm list must be empty and the flag set once an operation closes
pub fn assert_settled(env: &Env) {
    if !is_settled(env) || !read_warm_tokens(env).is_empty() {
        panic_with_error!(env, EngineError::InvalidSettlement);
    }
}
