//! Budget token transfers in and out of ledger custody.

use crate::storage::DataKey;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env};
use zap_errors::ContractError;

fn token_client(e: &Env) -> Result<TokenClient<'_>, ContractError> {
    let token: Address = e
        .storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(ContractError::NotInitialized)?;
    Ok(TokenClient::new(e, &token))
}

/// @notice Pulls `amount` from `from` into the ledger.
/// @dev Spends an allowance `from` granted to the ledger. Zero is a no-op.
pub fn transfer_in(e: &Env, from: &Address, amount: i128) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    match token_client(e)?.try_transfer_from(&contract, from, &contract, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::BudgetTransferFailed),
    }
}

/// @notice Pays `amount` out of custody to `to`. Zero is a no-op.
pub fn transfer_out(e: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    match token_client(e)?.try_transfer(&contract, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::BudgetTransferFailed),
    }
}
