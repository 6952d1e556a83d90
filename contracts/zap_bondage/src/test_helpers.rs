//! Shared test helpers for zap_bondage tests.

#![cfg(test)]

use crate::{ZapBondage, ZapBondageClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env, String};
use zap_curve::{Curve, CurveType};
use zap_registry::{ZapRegistry, ZapRegistryClient};

/// Default mint: large enough for all test scenarios.
pub const DEFAULT_MINT: i128 = 100_000_000_000_000;

pub const SPECIFIER: &str = "temperature";

/// `2n + 1`: rank prices 1, 3, 5, 7, 9, ...
pub fn linear() -> Curve {
    Curve::new(CurveType::Linear, 1, 2)
}

/// A deployed ledger wired to a registry and a Stellar asset budget token.
pub struct Setup<'a> {
    pub ledger: ZapBondageClient<'a>,
    pub registry: ZapRegistryClient<'a>,
    pub token: TokenClient<'a>,
    pub asset: StellarAssetClient<'a>,
    pub owner: Address,
    pub provider: Address,
    pub subscriber: Address,
    pub dispatcher: Address,
    pub specifier: String,
}

impl<'a> Setup<'a> {
    /// Mints `amount` to `who` and approves the ledger to spend it.
    pub fn fund(&self, e: &Env, who: &Address, amount: i128) {
        self.asset.set_authorized(who, &true);
        self.asset.mint(who, &amount);
        let expiry_ledger = e.ledger().sequence().saturating_add(10_000);
        self.token
            .approve(who, &self.ledger.address, &amount, &expiry_ledger);
    }

    pub fn bond(&self, budget: i128) -> zap_curve::Purchase {
        self.ledger
            .bond(&self.subscriber, &self.provider, &self.specifier, &budget)
    }

    pub fn dots(&self, holder: &Address) -> u64 {
        self.ledger.get_dots(holder, &self.provider, &self.specifier)
    }

    pub fn budget(&self, holder: &Address) -> i128 {
        self.ledger
            .get_bound_budget(holder, &self.provider, &self.specifier)
    }

    pub fn escrowed(&self, holder: &Address) -> u64 {
        self.ledger
            .get_escrowed_dots(holder, &self.provider, &self.specifier)
    }

    pub fn issued(&self) -> u64 {
        self.ledger.get_dots_issued(&self.provider, &self.specifier)
    }

    pub fn tok_bound(&self) -> i128 {
        self.ledger.get_tok_bound(&self.provider, &self.specifier)
    }

    /// Budget tokens held by the ledger contract.
    pub fn custody_balance(&self) -> i128 {
        self.token.balance(&self.ledger.address)
    }
}

/// Deploys registry, token and ledger without registering any provider.
pub fn setup_bare(e: &Env) -> Setup<'_> {
    e.mock_all_auths();

    let registry_id = e.register(ZapRegistry, ());
    let registry = ZapRegistryClient::new(e, &registry_id);

    let token_admin = Address::generate(e);
    let stellar_asset = e
        .register_stellar_asset_contract_v2(token_admin)
        .address();
    let asset = StellarAssetClient::new(e, &stellar_asset);
    let token = TokenClient::new(e, &stellar_asset);

    let ledger_id = e.register(ZapBondage, ());
    let ledger = ZapBondageClient::new(e, &ledger_id);

    let owner = Address::generate(e);
    ledger.initialize(&owner, &registry_id, &stellar_asset);

    let setup = Setup {
        ledger,
        registry,
        token,
        asset,
        owner,
        provider: Address::generate(e),
        subscriber: Address::generate(e),
        dispatcher: Address::generate(e),
        specifier: String::from_str(e, SPECIFIER),
    };
    setup.fund(e, &setup.subscriber, DEFAULT_MINT);
    setup
}

/// Full environment: provider registered with `curve` on `SPECIFIER`,
/// subscriber funded, dispatcher slot filled.
pub fn setup_with_curve<'a>(e: &'a Env, curve: &Curve) -> Setup<'a> {
    let setup = setup_bare(e);
    setup.registry.initiate_provider(
        &setup.provider,
        &7_u64,
        &String::from_str(e, "weather"),
    );
    setup
        .registry
        .initiate_provider_curve(&setup.provider, &setup.specifier, curve);
    setup
        .ledger
        .set_dispatcher(&setup.owner, &setup.dispatcher);
    setup
}

/// Full environment on the linear `1, 2` curve.
pub fn setup(e: &Env) -> Setup<'_> {
    setup_with_curve(e, &linear())
}
