#![no_std]

//! # Zap Registry Contract
//!
//! Provider directory for the bondage ledger. Providers register themselves
//! once, then initialize one pricing curve per endpoint specifier.
//!
//! ## Features
//! - Self-registration of providers with a public key and title
//! - One immutable curve per (provider, specifier)
//! - Directory lookups consumed by the bondage ledger
//!
//! ## Security
//! - Every write requires the provider's own authorization
//! - Curves are validated before they are stored and can never be replaced

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Symbol, Vec};
use zap_curve::Curve;
use zap_errors::ContractError;

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
const BUMP_TARGET: u32 = 518_400;

/// A registered provider.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderEntry {
    /// The provider address
    pub provider: Address,
    /// Off-chain public key the provider answers queries with
    pub public_key: u64,
    /// Human-readable provider title
    pub title: String,
    /// Timestamp when the provider registered
    pub registered_at: u64,
}

/// Storage keys for the registry contract
#[contracttype]
#[derive(Clone)]
enum DataKey {
    /// Provider -> ProviderEntry
    Provider(Address),
    /// (Provider, specifier) -> Curve
    Curve(Address, String),
    /// Registration-ordered list of providers, kept in persistent storage
    Providers,
}

#[contract]
pub struct ZapRegistry;

#[contractimpl]
impl ZapRegistry {
    /// Register the caller as a provider.
    ///
    /// # Arguments
    /// * `provider` - The provider address, which must authorize the call
    /// * `public_key` - Public key advertised to subscribers
    /// * `title` - Display title
    ///
    /// # Errors
    /// * `ProviderAlreadyRegistered` - If the provider already exists
    ///
    /// # Events
    /// Emits `provider_created` with the `ProviderEntry`
    pub fn initiate_provider(
        e: Env,
        provider: Address,
        public_key: u64,
        title: String,
    ) -> Result<ProviderEntry, ContractError> {
        provider.require_auth();

        let key = DataKey::Provider(provider.clone());
        if e.storage().persistent().has(&key) {
            return Err(ContractError::ProviderAlreadyRegistered);
        }

        let entry = ProviderEntry {
            provider: provider.clone(),
            public_key,
            title,
            registered_at: e.ledger().timestamp(),
        };
        e.storage().persistent().set(&key, &entry);
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);

        let mut providers = Self::get_all_providers(e.clone());
        providers.push_back(provider.clone());
        e.storage().persistent().set(&DataKey::Providers, &providers);
        e.storage()
            .persistent()
            .extend_ttl(&DataKey::Providers, BUMP_THRESHOLD, BUMP_TARGET);

        e.events().publish(
            (Symbol::new(&e, "provider_created"), provider),
            entry.clone(),
        );
        Ok(entry)
    }

    /// Initialize the pricing curve of one of the provider's endpoints.
    ///
    /// # Arguments
    /// * `provider` - The registered provider, which must authorize the call
    /// * `specifier` - Endpoint the curve prices
    /// * `curve` - Curve parameters
    ///
    /// # Errors
    /// * `ProviderNotRegistered` - If the provider has not registered
    /// * `InvalidCurve` - If the parameters are negative or all zero
    /// * `CurveAlreadyInitialized` - If the specifier already has a curve
    ///
    /// # Events
    /// Emits `curve_created` with `(specifier, curve)`
    pub fn initiate_provider_curve(
        e: Env,
        provider: Address,
        specifier: String,
        curve: Curve,
    ) -> Result<(), ContractError> {
        provider.require_auth();

        if !e
            .storage()
            .persistent()
            .has(&DataKey::Provider(provider.clone()))
        {
            return Err(ContractError::ProviderNotRegistered);
        }
        zap_curve::validate(&curve)?;

        let key = DataKey::Curve(provider.clone(), specifier.clone());
        if e.storage().persistent().has(&key) {
            return Err(ContractError::CurveAlreadyInitialized);
        }
        e.storage().persistent().set(&key, &curve);
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);

        e.events().publish(
            (Symbol::new(&e, "curve_created"), provider),
            (specifier, curve),
        );
        Ok(())
    }

    /// Check if a provider is registered.
    pub fn is_provider_registered(e: Env, provider: Address) -> bool {
        e.storage().persistent().has(&DataKey::Provider(provider))
    }

    /// The curve of `(provider, specifier)`, or `None` while uninitialized.
    pub fn get_curve(e: Env, provider: Address, specifier: String) -> Option<Curve> {
        e.storage()
            .persistent()
            .get(&DataKey::Curve(provider, specifier))
    }

    /// Lookup a provider entry.
    ///
    /// # Errors
    /// * `ProviderNotRegistered` - If the provider is unknown
    pub fn get_provider(e: Env, provider: Address) -> Result<ProviderEntry, ContractError> {
        e.storage()
            .persistent()
            .get(&DataKey::Provider(provider))
            .ok_or(ContractError::ProviderNotRegistered)
    }

    /// All registered providers, in registration order.
    pub fn get_all_providers(e: Env) -> Vec<Address> {
        e.storage()
            .persistent()
            .get(&DataKey::Providers)
            .unwrap_or_else(|| Vec::new(&e))
    }
}
