//! Tests for the dispatcher-only escrow and release path.

#![cfg(test)]

use crate::test_helpers::{setup, setup_bare};
use crate::EscrowRecord;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};
use zap_errors::ContractError;

// ═══════════════════════════════════════════════════════════════════
// 1. Escrow
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_escrow_moves_bound_dots() {
    let e = Env::default();
    let s = setup(&e);
    s.bond(26);

    let moved = s.ledger.escrow_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &2_u64,
    );

    assert_eq!(moved, 2);
    assert_eq!(s.dots(&s.subscriber), 3);
    assert_eq!(s.escrowed(&s.subscriber), 2);
    assert_eq!(s.issued(), 5);
}

#[test]
fn test_escrow_moves_budget_of_top_ranks() {
    let e = Env::default();
    let s = setup(&e);
    s.bond(26);

    s.ledger.escrow_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &2_u64,
    );

    // ranks 3 and 4 cost 7 + 9; ranks 0..3 keep 1 + 3 + 5
    assert_eq!(s.budget(&s.subscriber), 9);
    assert_eq!(
        s.ledger
            .get_escrow_record(&s.subscriber, &s.provider, &s.specifier),
        EscrowRecord {
            escrowed_dots: 2,
            escrowed_budget: 16,
        }
    );
    assert_eq!(s.tok_bound(), 25);

    // the rest unbonds for exactly what it cost
    let refund = s
        .ledger
        .unbond(&s.subscriber, &s.provider, &s.specifier, &3_u64);
    assert_eq!(refund, 9);
    assert_eq!(s.budget(&s.subscriber), 0);
    assert_eq!(s.tok_bound(), 16);
}

#[test]
fn test_escrow_accumulates() {
    let e = Env::default();
    let s = setup(&e);
    s.bond(26);

    for _ in 0..2 {
        s.ledger.escrow_dots(
            &s.dispatcher,
            &s.subscriber,
            &s.provider,
            &s.specifier,
            &2_u64,
        );
    }

    assert_eq!(s.dots(&s.subscriber), 1);
    assert_eq!(s.escrowed(&s.subscriber), 4);
}

#[test]
fn test_escrow_over_request_is_noop() {
    let e = Env::default();
    let s = setup(&e);
    s.bond(26);

    let moved = s.ledger.escrow_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &6_u64,
    );

    assert_eq!(moved, 0);
    assert_eq!(s.dots(&s.subscriber), 5);
    assert_eq!(s.escrowed(&s.subscriber), 0);
}

#[test]
fn test_escrow_entire_holding() {
    let e = Env::default();
    let s = setup(&e);
    s.bond(26);

    s.ledger.escrow_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &5_u64,
    );

    assert_eq!(s.dots(&s.subscriber), 0);
    assert_eq!(s.escrowed(&s.subscriber), 5);
}

#[test]
fn test_escrow_by_non_dispatcher_fails() {
    let e = Env::default();
    let s = setup(&e);
    s.bond(26);
    let intruder = Address::generate(&e);

    assert_eq!(
        s.ledger.try_escrow_dots(
            &intruder,
            &s.subscriber,
            &s.provider,
            &s.specifier,
            &2_u64
        ),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        s.ledger.try_escrow_dots(
            &s.owner,
            &s.subscriber,
            &s.provider,
            &s.specifier,
            &2_u64
        ),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(s.dots(&s.subscriber), 5);
}

#[test]
fn test_escrow_before_dispatcher_set_fails() {
    let e = Env::default();
    let s = setup_bare(&e);

    assert_eq!(
        s.ledger.try_escrow_dots(
            &s.dispatcher,
            &s.subscriber,
            &s.provider,
            &s.specifier,
            &1_u64
        ),
        Err(Ok(ContractError::Unauthorized))
    );
}

#[test]
fn test_escrowed_dots_cannot_be_unbonded() {
    let e = Env::default();
    let s = setup(&e);
    s.bond(26);
    s.ledger.escrow_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &5_u64,
    );

    let refund = s
        .ledger
        .unbond(&s.subscriber, &s.provider, &s.specifier, &5_u64);

    assert_eq!(refund, 0);
    assert_eq!(s.escrowed(&s.subscriber), 5);
    assert_eq!(s.tok_bound(), 25);
}

// ═══════════════════════════════════════════════════════════════════
// 2. Release
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_release_credits_provider() {
    let e = Env::default();
    let s = setup(&e);
    s.bond(26);
    s.ledger.escrow_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &3_u64,
    );

    let moved = s.ledger.release_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &2_u64,
    );

    assert_eq!(moved, 2);
    assert_eq!(s.escrowed(&s.subscriber), 1);
    assert_eq!(s.dots(&s.provider), 2);
    assert_eq!(s.dots(&s.subscriber), 2);
    assert_eq!(s.issued(), 5);

    // ranks 2..5 escrowed for 5 + 7 + 9; two of three dots carry 14
    assert_eq!(s.budget(&s.subscriber), 4);
    assert_eq!(s.budget(&s.provider), 14);
    assert_eq!(
        s.ledger
            .get_escrow_record(&s.subscriber, &s.provider, &s.specifier),
        EscrowRecord {
            escrowed_dots: 1,
            escrowed_budget: 7,
        }
    );
}

#[test]
fn test_release_in_parts_moves_whole_escrowed_budget() {
    let e = Env::default();
    let s = setup(&e);
    s.bond(26);
    s.ledger.escrow_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &2_u64,
    );

    // 16 escrowed over two dots: 8, then the remaining 8
    s.ledger.release_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &1_u64,
    );
    assert_eq!(s.budget(&s.provider), 8);

    s.ledger.release_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &1_u64,
    );
    assert_eq!(s.budget(&s.provider), 16);
    assert_eq!(
        s.ledger
            .get_escrow_record(&s.subscriber, &s.provider, &s.specifier),
        EscrowRecord::default()
    );
    assert_eq!(s.budget(&s.subscriber) + s.budget(&s.provider), s.tok_bound());
}

#[test]
fn test_release_over_request_is_noop() {
    let e = Env::default();
    let s = setup(&e);
    s.bond(26);
    s.ledger.escrow_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &2_u64,
    );

    let moved = s.ledger.release_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &3_u64,
    );

    assert_eq!(moved, 0);
    assert_eq!(s.escrowed(&s.subscriber), 2);
    assert_eq!(s.dots(&s.provider), 0);
}

#[test]
fn test_release_by_non_dispatcher_fails() {
    let e = Env::default();
    let s = setup(&e);
    s.bond(26);
    s.ledger.escrow_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &2_u64,
    );

    assert_eq!(
        s.ledger.try_release_dots(
            &s.provider,
            &s.subscriber,
            &s.provider,
            &s.specifier,
            &2_u64
        ),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(s.escrowed(&s.subscriber), 2);
}

#[test]
fn test_provider_can_unbond_released_dots() {
    let e = Env::default();
    let s = setup(&e);
    s.bond(26);
    s.ledger.escrow_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &2_u64,
    );
    s.ledger.release_dots(
        &s.dispatcher,
        &s.subscriber,
        &s.provider,
        &s.specifier,
        &2_u64,
    );

    // provider row carries the 7 + 9 paid for the subscriber's ranks 3 and 4
    assert_eq!(s.budget(&s.provider), 16);
    let refund = s
        .ledger
        .unbond(&s.provider, &s.provider, &s.specifier, &2_u64);

    assert_eq!(refund, 16);
    assert_eq!(s.token.balance(&s.provider), 16);
    assert_eq!(s.budget(&s.provider), 0);
    assert_eq!(s.tok_bound(), 9);
    assert_eq!(s.custody_balance(), 9);
    assert_eq!(s.issued(), 3);

    // the subscriber's remaining ranks are still fully covered
    let refund = s
        .ledger
        .unbond(&s.subscriber, &s.provider, &s.specifier, &3_u64);
    assert_eq!(refund, 9);
    assert_eq!(s.custody_balance(), 0);
}
