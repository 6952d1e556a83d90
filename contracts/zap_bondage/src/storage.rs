//! Storage layout of the bondage ledger.
//!
//! * Configuration (`Owner`, `Directory`, `Token`, `Gate`) lives in
//!   `instance()`. It is small and read on most calls.
//! * Ledger rows live in `persistent()`, one entry per key, and have their
//!   TTL bumped on every write. Reads never write, so an unwritten row reads
//!   as zero.

use soroban_sdk::{contracttype, Address, Env, IntoVal, String, TryFromVal, Val};

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
const BUMP_TARGET: u32 = 518_400;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    /// Provider directory contract
    Directory,
    /// Budget token contract
    Token,
    Gate,
    /// (subscriber, provider, specifier) -> BondRecord
    Bond(Address, Address, String),
    /// (subscriber, provider, specifier) -> EscrowRecord
    Escrow(Address, Address, String),
    /// (provider, specifier) -> dots issued
    Issued(Address, String),
    /// (provider, specifier) -> budget held in custody
    TotalBound(Address, String),
}

/// Active holdings of one subscriber against one provider endpoint.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BondRecord {
    /// Dots available to spend, excluding escrow.
    pub bound_dots: u64,
    /// Budget paid for the held dots. The most an unbond can refund.
    pub bound_budget: i128,
}

/// Dots held in escrow for one subscriber, with the budget paid for them.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EscrowRecord {
    pub escrowed_dots: u64,
    pub escrowed_budget: i128,
}

fn read<V: TryFromVal<Env, Val>>(e: &Env, key: &DataKey) -> Option<V> {
    e.storage().persistent().get(key)
}

fn write<V: IntoVal<Env, Val>>(e: &Env, key: &DataKey, value: &V) {
    let storage = e.storage().persistent();
    storage.set(key, value);
    storage.extend_ttl(key, BUMP_THRESHOLD, BUMP_TARGET);
}

// ── Bond rows ────────────────────────────────────────────────────────────────

pub fn load_bond(e: &Env, subscriber: &Address, provider: &Address, specifier: &String) -> BondRecord {
    read(
        e,
        &DataKey::Bond(subscriber.clone(), provider.clone(), specifier.clone()),
    )
    .unwrap_or_default()
}

pub fn save_bond(
    e: &Env,
    subscriber: &Address,
    provider: &Address,
    specifier: &String,
    record: &BondRecord,
) {
    write(
        e,
        &DataKey::Bond(subscriber.clone(), provider.clone(), specifier.clone()),
        record,
    );
}

// ── Escrow rows ──────────────────────────────────────────────────────────────

pub fn load_escrow(
    e: &Env,
    subscriber: &Address,
    provider: &Address,
    specifier: &String,
) -> EscrowRecord {
    read(
        e,
        &DataKey::Escrow(subscriber.clone(), provider.clone(), specifier.clone()),
    )
    .unwrap_or_default()
}

pub fn save_escrow(
    e: &Env,
    subscriber: &Address,
    provider: &Address,
    specifier: &String,
    record: &EscrowRecord,
) {
    write(
        e,
        &DataKey::Escrow(subscriber.clone(), provider.clone(), specifier.clone()),
        record,
    );
}

// ── Per-endpoint totals ──────────────────────────────────────────────────────

pub fn load_issued(e: &Env, provider: &Address, specifier: &String) -> u64 {
    read(e, &DataKey::Issued(provider.clone(), specifier.clone())).unwrap_or(0)
}

pub fn save_issued(e: &Env, provider: &Address, specifier: &String, dots: u64) {
    write(e, &DataKey::Issued(provider.clone(), specifier.clone()), &dots);
}

pub fn load_custody(e: &Env, provider: &Address, specifier: &String) -> i128 {
    read(e, &DataKey::TotalBound(provider.clone(), specifier.clone())).unwrap_or(0)
}

pub fn save_custody(e: &Env, provider: &Address, specifier: &String, amount: i128) {
    write(
        e,
        &DataKey::TotalBound(provider.clone(), specifier.clone()),
        &amount,
    );
}
