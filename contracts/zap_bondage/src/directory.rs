//! Lookups against the provider directory contract.
//!
//! The directory is any contract exporting
//! `is_provider_registered(provider) -> bool` and
//! `get_curve(provider, specifier) -> Option<Curve>`.

use crate::storage::DataKey;
use soroban_sdk::{vec, Address, Env, IntoVal, String, Symbol};
use zap_curve::Curve;
use zap_errors::ContractError;

fn directory(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Directory)
        .ok_or(ContractError::NotInitialized)
}

fn is_registered(e: &Env, directory: &Address, provider: &Address) -> bool {
    e.invoke_contract::<bool>(
        directory,
        &Symbol::new(e, "is_provider_registered"),
        vec![e, provider.into_val(e)],
    )
}

fn lookup_curve(e: &Env, directory: &Address, provider: &Address, specifier: &String) -> Option<Curve> {
    e.invoke_contract::<Option<Curve>>(
        directory,
        &Symbol::new(e, "get_curve"),
        vec![e, provider.into_val(e), specifier.into_val(e)],
    )
}

/// Curve for a bond: the provider must be registered and the curve set.
pub fn require_bondable(e: &Env, provider: &Address, specifier: &String) -> Result<Curve, ContractError> {
    let directory = directory(e)?;
    if !is_registered(e, &directory, provider) {
        return Err(ContractError::ProviderOrCurveMissing);
    }
    lookup_curve(e, &directory, provider, specifier).ok_or(ContractError::ProviderOrCurveMissing)
}

/// Curve for pricing queries and unbond.
pub fn curve_for(e: &Env, provider: &Address, specifier: &String) -> Result<Curve, ContractError> {
    let directory = directory(e)?;
    zap_curve::require_curve(lookup_curve(e, &directory, provider, specifier))
}
