#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by domain for monitoring, alerting, and dashboards.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and one-time configuration errors (codes 1-99).
    Initialization,
    /// Caller identity and permission errors (codes 100-199).
    Authorization,
    /// Pricing curve errors (codes 200-299).
    Curve,
    /// Provider directory errors (codes 300-399).
    Registry,
    /// Bond ledger and budget custody errors (codes 400-499).
    Ledger,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  ContractError
/// @notice Canonical error enum shared by the bondage and registry contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///         Use the ErrorExt trait to retrieve the category and description.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Curve
///   300 - 399 : Registry
///   400 - 499 : Ledger
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    /// Contracts: bondage
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    /// Contracts: bondage
    AlreadyInitialized = 2,

    /// A one-time access slot (arbiter or dispatcher) is already assigned.
    /// Contracts: bondage
    AlreadyConfigured = 3,

    // --- Authorization (100-199) ---
    /// Caller is not the contract owner.
    /// Contracts: bondage
    NotOwner = 100,

    /// Caller is not the configured dispatcher, or no dispatcher is set.
    /// Contracts: bondage
    Unauthorized = 101,

    // --- Curve (200-299) ---
    /// No curve has been initialized for the (provider, specifier) pair.
    /// Contracts: bondage
    CurveUninitialized = 200,

    /// Curve parameters are negative, or both start and multiplier are zero.
    /// Contracts: registry
    InvalidCurve = 201,

    /// The (provider, specifier) pair already has a curve.
    /// Contracts: registry
    CurveAlreadyInitialized = 202,

    /// Pricing would exceed the engine's deterministic work or precision bound.
    /// Contracts: bondage
    PricingBoundExceeded = 203,

    // --- Registry (300-399) ---
    /// Bond attempted against an unregistered provider or a missing curve.
    /// Contracts: bondage
    ProviderOrCurveMissing = 300,

    /// Provider has already been registered.
    /// Contracts: registry
    ProviderAlreadyRegistered = 301,

    /// Provider is not registered.
    /// Contracts: registry
    ProviderNotRegistered = 302,

    // --- Ledger (400-499) ---
    /// Budget or unit amount argument is negative.
    /// Contracts: bondage
    InvalidAmount = 400,

    /// The token contract declined a transfer into or out of custody.
    /// Contracts: bondage
    BudgetTransferFailed = 401,

    // --- Arithmetic (700-799) ---
    /// A computed value exceeds the representable range.
    /// Contracts: bondage, registry
    ArithmeticOverflow = 700,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every ContractError variant.
/// @dev    Use this for structured logging, monitoring, and off-chain display.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::AlreadyConfigured => ErrorCategory::Initialization,

            ContractError::NotOwner | ContractError::Unauthorized => ErrorCategory::Authorization,

            ContractError::CurveUninitialized
            | ContractError::InvalidCurve
            | ContractError::CurveAlreadyInitialized
            | ContractError::PricingBoundExceeded => ErrorCategory::Curve,

            ContractError::ProviderOrCurveMissing
            | ContractError::ProviderAlreadyRegistered
            | ContractError::ProviderNotRegistered => ErrorCategory::Registry,

            ContractError::InvalidAmount | ContractError::BudgetTransferFailed => {
                ErrorCategory::Ledger
            }

            ContractError::ArithmeticOverflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::AlreadyConfigured => "Access slot has already been assigned",
            ContractError::NotOwner => "Caller is not the contract owner",
            ContractError::Unauthorized => "Caller is not the configured dispatcher",
            ContractError::CurveUninitialized => "No curve initialized for provider and specifier",
            ContractError::InvalidCurve => "Curve parameters are negative or all zero",
            ContractError::CurveAlreadyInitialized => {
                "A curve already exists for this provider and specifier"
            }
            ContractError::PricingBoundExceeded => {
                "Pricing exceeds the engine's iteration or precision bound"
            }
            ContractError::ProviderOrCurveMissing => "Provider is unregistered or has no curve",
            ContractError::ProviderAlreadyRegistered => "Provider has already been registered",
            ContractError::ProviderNotRegistered => "Provider is not registered",
            ContractError::InvalidAmount => "Amount must be non-negative",
            ContractError::BudgetTransferFailed => "Token transfer was declined",
            ContractError::ArithmeticOverflow => "Integer overflow in checked arithmetic",
        }
    }
}
