//! Owner checks and the one-time arbiter/dispatcher slots.

use crate::storage::DataKey;
use soroban_sdk::{contracttype, Address, Env};
use zap_errors::ContractError;

/// Names one slot of the [`AccessGate`].
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slot {
    Arbiter,
    Dispatcher,
}

/// Authorization slots guarding the escrow path. Each slot goes from `None`
/// to `Some` exactly once.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccessGate {
    pub arbiter: Option<Address>,
    pub dispatcher: Option<Address>,
}

impl AccessGate {
    pub fn get(&self, slot: Slot) -> Option<Address> {
        match slot {
            Slot::Arbiter => self.arbiter.clone(),
            Slot::Dispatcher => self.dispatcher.clone(),
        }
    }

    /// Fills an empty slot. A filled slot is never overwritten.
    pub fn assign(&mut self, slot: Slot, address: Address) -> Result<(), ContractError> {
        let field = match slot {
            Slot::Arbiter => &mut self.arbiter,
            Slot::Dispatcher => &mut self.dispatcher,
        };
        if field.is_some() {
            return Err(ContractError::AlreadyConfigured);
        }
        *field = Some(address);
        Ok(())
    }
}

pub fn load_gate(e: &Env) -> AccessGate {
    e.storage()
        .instance()
        .get(&DataKey::Gate)
        .unwrap_or_default()
}

pub fn owner(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(ContractError::NotInitialized)
}

/// Requires `caller` to authorize and be the stored owner.
pub fn require_owner(e: &Env, caller: &Address) -> Result<(), ContractError> {
    let owner = owner(e)?;
    caller.require_auth();
    if *caller != owner {
        return Err(ContractError::NotOwner);
    }
    Ok(())
}

/// Requires `caller` to authorize and occupy the dispatcher slot. An empty
/// slot admits nobody.
pub fn require_dispatcher(e: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    match load_gate(e).dispatcher {
        Some(dispatcher) if dispatcher == *caller => Ok(()),
        _ => Err(ContractError::Unauthorized),
    }
}

/// Owner-only, one-time assignment of `slot`.
pub fn set_slot(e: &Env, caller: &Address, slot: Slot, address: &Address) -> Result<(), ContractError> {
    require_owner(e, caller)?;
    let mut gate = load_gate(e);
    gate.assign(slot, address.clone())?;
    e.storage().instance().set(&DataKey::Gate, &gate);
    Ok(())
}
