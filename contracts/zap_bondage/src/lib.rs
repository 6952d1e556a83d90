//! Zap Bondage Ledger
//!
//! Subscribers bond a token budget into "dots" against a provider endpoint,
//! priced by the endpoint's curve in the provider directory. Dots can be
//! unbonded for a refund along the same curve, or moved by the dispatcher
//! into escrow and from there released to the provider.
//!
//! ## Key design decisions
//!
//! - **Checks-Effects-Interactions**: every ledger row is written before the
//!   token transfer. A failed transfer fails the call and the host discards
//!   the writes.
//! - **Clamped over-requests**: unbond clamps to the held dots; escrow and
//!   release treat an over-request as a no-op. Neither is an error.
//! - **Pricing by holdings**: a bond is priced from the subscriber's own
//!   `bound_dots` rank, and an unbond refunds the same ranks back.
//! - **Budget follows dots**: every row carries the budget paid for its
//!   dots. Escrow and release move that budget along with the dots, and no
//!   unbond refunds more than its row carries, so the custody counter is
//!   always the sum of the row budgets.
//! - **One-time access slots**: arbiter and dispatcher are set once by the
//!   owner and never replaced.

#![no_std]

pub mod access;
mod directory;
mod events;
mod storage;
mod token_integration;

pub use access::{AccessGate, Slot};
pub use storage::{BondRecord, EscrowRecord};

use soroban_sdk::{contract, contractimpl, Address, Env, String};
use storage::DataKey;
use zap_curve::math::{add_i128, add_u64, mul_i128, sub_i128, sub_u64};
use zap_curve::Purchase;
use zap_errors::ContractError;

#[cfg(test)]
mod test_helpers;




#[cfg(test)]
mod test_escrow;



// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct ZapBondage;

#[contractimpl]
impl ZapBondage {
    // ── Setup ──────────────────────────────────────────────────────────────

    /// One-time initialization.
    ///
    /// # Arguments
    /// * `owner` - Address allowed to fill the access slots
    /// * `directory` - Provider directory contract
    /// * `token` - Budget token contract
    ///
    /// # Errors
    /// * `AlreadyInitialized` - On any call after the first
    pub fn initialize(
        e: Env,
        owner: Address,
        directory: Address,
        token: Address,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Owner) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        e.storage().instance().set(&DataKey::Owner, &owner);
        e.storage().instance().set(&DataKey::Directory, &directory);
        e.storage().instance().set(&DataKey::Token, &token);
        e.storage()
            .instance()
            .set(&DataKey::Gate, &AccessGate::default());

        events::emit_ledger_initialized(&e, &owner, &directory, &token);
        Ok(())
    }

    /// Fill the arbiter slot. Owner only, once.
    pub fn set_arbiter(e: Env, owner: Address, arbiter: Address) -> Result<(), ContractError> {
        access::set_slot(&e, &owner, Slot::Arbiter, &arbiter)?;
        events::emit_slot_set(&e, &owner, Slot::Arbiter, &arbiter);
        Ok(())
    }

    /// Fill the dispatcher slot. Owner only, once.
    pub fn set_dispatcher(e: Env, owner: Address, dispatcher: Address) -> Result<(), ContractError> {
        access::set_slot(&e, &owner, Slot::Dispatcher, &dispatcher)?;
        events::emit_slot_set(&e, &owner, Slot::Dispatcher, &dispatcher);
        Ok(())
    }

    pub fn get_owner(e: Env) -> Result<Address, ContractError> {
        access::owner(&e)
    }

    pub fn get_arbiter(e: Env) -> Option<Address> {
        access::load_gate(&e).get(Slot::Arbiter)
    }

    pub fn get_dispatcher(e: Env) -> Option<Address> {
        access::load_gate(&e).get(Slot::Dispatcher)
    }

    // ── Ledger operations ──────────────────────────────────────────────────

    /// Spend up to `budget` on dots of `(provider, specifier)`.
    ///
    /// Buys the largest number of dots whose cost from the subscriber's
    /// current rank fits the budget, and transfers exactly that cost. A
    /// budget too small for one dot is a successful no-op.
    ///
    /// # Returns
    /// The dots bought and the budget consumed
    ///
    /// # Errors
    /// * `ProviderOrCurveMissing` - Provider unregistered or curve unset
    /// * `InvalidAmount` - Negative budget
    /// * `BudgetTransferFailed` - Balance or allowance too small
    ///
    /// # Events
    /// Emits `bonded` with `(specifier, dots, cost)`
    pub fn bond(
        e: Env,
        subscriber: Address,
        provider: Address,
        specifier: String,
        budget: i128,
    ) -> Result<Purchase, ContractError> {
        subscriber.require_auth();
        let curve = directory::require_bondable(&e, &provider, &specifier)?;

        let mut record = storage::load_bond(&e, &subscriber, &provider, &specifier);
        let purchase = zap_curve::max_units_for_budget(&curve, record.bound_dots, budget)?;
        if purchase.is_empty() {
            return Ok(purchase);
        }

        record.bound_dots = add_u64(record.bound_dots, purchase.dots)?;
        record.bound_budget = add_i128(record.bound_budget, purchase.cost)?;
        let issued = add_u64(
            storage::load_issued(&e, &provider, &specifier),
            purchase.dots,
        )?;
        let custody = add_i128(
            storage::load_custody(&e, &provider, &specifier),
            purchase.cost,
        )?;

        storage::save_bond(&e, &subscriber, &provider, &specifier, &record);
        storage::save_issued(&e, &provider, &specifier, issued);
        storage::save_custody(&e, &provider, &specifier, custody);

        token_integration::transfer_in(&e, &subscriber, purchase.cost)?;

        events::emit_bonded(
            &e,
            &subscriber,
            &provider,
            &specifier,
            purchase.dots,
            purchase.cost,
        );
        Ok(purchase)
    }

    /// Return up to `dots` held dots for a refund.
    ///
    /// The request is clamped to the subscriber's bound dots. The refund is
    /// the cost of the top ranks given back, capped at the row's
    /// `bound_budget`. Returning every bound dot refunds the whole
    /// `bound_budget` without walking the curve.
    ///
    /// # Returns
    /// The budget refunded
    ///
    /// # Errors
    /// * `CurveUninitialized` - No curve for `(provider, specifier)`
    ///
    /// # Events
    /// Emits `unbonded` with `(specifier, dots, refund)`
    pub fn unbond(
        e: Env,
        subscriber: Address,
        provider: Address,
        specifier: String,
        dots: u64,
    ) -> Result<i128, ContractError> {
        subscriber.require_auth();
        let curve = directory::curve_for(&e, &provider, &specifier)?;

        let mut record = storage::load_bond(&e, &subscriber, &provider, &specifier);
        let returned = dots.min(record.bound_dots);
        if returned == 0 {
            return Ok(0);
        }

        let remaining = record.bound_dots - returned;
        // a row never takes back budget that other rows paid in
        let refund = if remaining == 0 {
            record.bound_budget
        } else {
            zap_curve::range_cost(&curve, remaining, record.bound_dots)?.min(record.bound_budget)
        };

        record.bound_dots = remaining;
        record.bound_budget = sub_i128(record.bound_budget, refund)?;
        let issued = sub_u64(storage::load_issued(&e, &provider, &specifier), returned)?;
        let custody = sub_i128(storage::load_custody(&e, &provider, &specifier), refund)?;

        storage::save_bond(&e, &subscriber, &provider, &specifier, &record);
        storage::save_issued(&e, &provider, &specifier, issued);
        storage::save_custody(&e, &provider, &specifier, custody);

        token_integration::transfer_out(&e, &subscriber, refund)?;

        events::emit_unbonded(&e, &subscriber, &provider, &specifier, returned, refund);
        Ok(refund)
    }

    /// Move `dots` of a subscriber's bound dots into escrow. Dispatcher only.
    ///
    /// The top ranks go to escrow together with their cost, taken out of the
    /// row's `bound_budget`. Asking for zero dots or more than are bound
    /// moves nothing.
    ///
    /// # Returns
    /// The dots moved
    ///
    /// # Errors
    /// * `Unauthorized` - Caller is not the dispatcher
    /// * `CurveUninitialized` - No curve for `(provider, specifier)`
    ///
    /// # Events
    /// Emits `escrowed` with `(specifier, dots)`
    pub fn escrow_dots(
        e: Env,
        caller: Address,
        subscriber: Address,
        provider: Address,
        specifier: String,
        dots: u64,
    ) -> Result<u64, ContractError> {
        access::require_dispatcher(&e, &caller)?;

        let mut record = storage::load_bond(&e, &subscriber, &provider, &specifier);
        if dots == 0 || dots > record.bound_dots {
            return Ok(0);
        }

        let curve = directory::curve_for(&e, &provider, &specifier)?;
        let remaining = record.bound_dots - dots;
        let budget = if remaining == 0 {
            record.bound_budget
        } else {
            zap_curve::range_cost(&curve, remaining, record.bound_dots)?.min(record.bound_budget)
        };

        record.bound_dots = remaining;
        record.bound_budget = sub_i128(record.bound_budget, budget)?;
        let mut escrow = storage::load_escrow(&e, &subscriber, &provider, &specifier);
        escrow.escrowed_dots = add_u64(escrow.escrowed_dots, dots)?;
        escrow.escrowed_budget = add_i128(escrow.escrowed_budget, budget)?;

        storage::save_bond(&e, &subscriber, &provider, &specifier, &record);
        storage::save_escrow(&e, &subscriber, &provider, &specifier, &escrow);

        events::emit_escrowed(&e, &subscriber, &provider, &specifier, dots);
        Ok(dots)
    }

    /// Release escrowed dots to the provider's own holdings. Dispatcher only.
    ///
    /// The released dots carry their pro-rata share of the escrowed budget
    /// into the provider's row, and the last dot out carries the remainder.
    /// Asking for zero dots or more than are escrowed moves nothing.
    ///
    /// # Returns
    /// The dots moved
    ///
    /// # Errors
    /// * `Unauthorized` - Caller is not the dispatcher
    ///
    /// # Events
    /// Emits `released` with `(specifier, dots)`
    pub fn release_dots(
        e: Env,
        caller: Address,
        subscriber: Address,
        provider: Address,
        specifier: String,
        dots: u64,
    ) -> Result<u64, ContractError> {
        access::require_dispatcher(&e, &caller)?;

        let mut escrow = storage::load_escrow(&e, &subscriber, &provider, &specifier);
        if dots == 0 || dots > escrow.escrowed_dots {
            return Ok(0);
        }

        let budget = if dots == escrow.escrowed_dots {
            escrow.escrowed_budget
        } else {
            mul_i128(escrow.escrowed_budget, dots as i128)? / escrow.escrowed_dots as i128
        };
        escrow.escrowed_dots -= dots;
        escrow.escrowed_budget = sub_i128(escrow.escrowed_budget, budget)?;

        let mut earned = storage::load_bond(&e, &provider, &provider, &specifier);
        earned.bound_dots = add_u64(earned.bound_dots, dots)?;
        earned.bound_budget = add_i128(earned.bound_budget, budget)?;

        storage::save_escrow(&e, &subscriber, &provider, &specifier, &escrow);
        storage::save_bond(&e, &provider, &provider, &specifier, &earned);

        events::emit_released(&e, &subscriber, &provider, &specifier, dots);
        Ok(dots)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// Bound (non-escrowed) dots of a subscriber.
    pub fn get_dots(e: Env, subscriber: Address, provider: Address, specifier: String) -> u64 {
        storage::load_bond(&e, &subscriber, &provider, &specifier).bound_dots
    }

    pub fn get_escrowed_dots(
        e: Env,
        subscriber: Address,
        provider: Address,
        specifier: String,
    ) -> u64 {
        storage::load_escrow(&e, &subscriber, &provider, &specifier).escrowed_dots
    }

    /// Escrowed dots of a subscriber and the budget held with them.
    pub fn get_escrow_record(
        e: Env,
        subscriber: Address,
        provider: Address,
        specifier: String,
    ) -> EscrowRecord {
        storage::load_escrow(&e, &subscriber, &provider, &specifier)
    }

    /// Budget a subscriber has paid for the dots currently bound.
    pub fn get_bound_budget(
        e: Env,
        subscriber: Address,
        provider: Address,
        specifier: String,
    ) -> i128 {
        storage::load_bond(&e, &subscriber, &provider, &specifier).bound_budget
    }

    pub fn get_bond_record(
        e: Env,
        subscriber: Address,
        provider: Address,
        specifier: String,
    ) -> BondRecord {
        storage::load_bond(&e, &subscriber, &provider, &specifier)
    }

    /// Budget held in custody for `(provider, specifier)`: the sum of every
    /// row's bound and escrowed budget.
    pub fn get_tok_bound(e: Env, provider: Address, specifier: String) -> i128 {
        storage::load_custody(&e, &provider, &specifier)
    }

    /// Dots issued for `(provider, specifier)` and not yet unbonded.
    pub fn get_dots_issued(e: Env, provider: Address, specifier: String) -> u64 {
        storage::load_issued(&e, &provider, &specifier)
    }

    /// Price of the next dot for a holder of `total_bound` dots.
    pub fn current_cost_of_dot(
        e: Env,
        provider: Address,
        specifier: String,
        total_bound: u64,
    ) -> Result<i128, ContractError> {
        let curve = directory::curve_for(&e, &provider, &specifier)?;
        zap_curve::current_unit_price(&curve, total_bound)
    }

    /// Budget needed to bond `dots` from zero.
    pub fn calc_tok_for_dots(
        e: Env,
        provider: Address,
        specifier: String,
        dots: u64,
    ) -> Result<i128, ContractError> {
        let curve = directory::curve_for(&e, &provider, &specifier)?;
        zap_curve::cumulative_cost(&curve, dots)
    }

    /// What `bond` would buy for `budget` right now, without buying it.
    pub fn calc_tok(
        e: Env,
        subscriber: Address,
        provider: Address,
        specifier: String,
        budget: i128,
    ) -> Result<Purchase, ContractError> {
        let curve = directory::curve_for(&e, &provider, &specifier)?;
        let held = storage::load_bond(&e, &subscriber, &provider, &specifier).bound_dots;
        zap_curve::max_units_for_budget(&curve, held, budget)
    }
}
