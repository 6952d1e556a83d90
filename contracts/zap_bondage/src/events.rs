use crate::access::Slot;
use soroban_sdk::{Address, Env, String, Symbol};

/// Emitted once when the ledger is initialized.
///
/// # Topics
/// * `Symbol` - "ledger_initialized"
/// * `Address` - The owner
///
/// # Data
/// * `Address` - The provider directory contract
/// * `Address` - The budget token contract
pub fn emit_ledger_initialized(e: &Env, owner: &Address, directory: &Address, token: &Address) {
    let topics = (Symbol::new(e, "ledger_initialized"), owner.clone());
    e.events().publish(topics, (directory.clone(), token.clone()));
}

/// Emitted when an access slot is filled.
///
/// # Topics
/// * `Symbol` - "slot_set"
/// * `Address` - The owner
///
/// # Data
/// * `Slot` - Which slot was filled
/// * `Address` - The assigned address
pub fn emit_slot_set(e: &Env, owner: &Address, slot: Slot, address: &Address) {
    let topics = (Symbol::new(e, "slot_set"), owner.clone());
    e.events().publish(topics, (slot, address.clone()));
}

/// Emitted when a subscriber bonds budget into dots.
///
/// # Topics
/// * `Symbol` - "bonded"
/// * `Address` - The subscriber
/// * `Address` - The provider
///
/// # Data
/// * `String` - The endpoint specifier
/// * `u64` - Dots bought
/// * `i128` - Budget consumed
pub fn emit_bonded(
    e: &Env,
    subscriber: &Address,
    provider: &Address,
    specifier: &String,
    dots: u64,
    cost: i128,
) {
    let topics = (Symbol::new(e, "bonded"), subscriber.clone(), provider.clone());
    e.events().publish(topics, (specifier.clone(), dots, cost));
}

/// Emitted when a subscriber returns dots for a refund.
///
/// # Topics
/// * `Symbol` - "unbonded"
/// * `Address` - The subscriber
/// * `Address` - The provider
///
/// # Data
/// * `String` - The endpoint specifier
/// * `u64` - Dots returned
/// * `i128` - Budget refunded
pub fn emit_unbonded(
    e: &Env,
    subscriber: &Address,
    provider: &Address,
    specifier: &String,
    dots: u64,
    refund: i128,
) {
    let topics = (Symbol::new(e, "unbonded"), subscriber.clone(), provider.clone());
    e.events().publish(topics, (specifier.clone(), dots, refund));
}

/// Emitted when the dispatcher moves dots into escrow.
///
/// # Topics
/// * `Symbol` - "escrowed"
/// * `Address` - The subscriber
/// * `Address` - The provider
///
/// # Data
/// * `String` - The endpoint specifier
/// * `u64` - Dots moved
pub fn emit_escrowed(e: &Env, subscriber: &Address, provider: &Address, specifier: &String, dots: u64) {
    let topics = (Symbol::new(e, "escrowed"), subscriber.clone(), provider.clone());
    e.events().publish(topics, (specifier.clone(), dots));
}

/// Emitted when the dispatcher releases escrowed dots to the provider.
///
/// # Topics
/// * `Symbol` - "released"
/// * `Address` - The subscriber
/// * `Address` - The provider
///
/// # Data
/// * `String` - The endpoint specifier
/// * `u64` - Dots moved
pub fn emit_released(e: &Env, subscriber: &Address, provider: &Address, specifier: &String, dots: u64) {
    let topics = (Symbol::new(e, "released"), subscriber.clone(), provider.clone());
    e.events().publish(topics, (specifier.clone(), dots));
}
