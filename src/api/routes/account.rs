//! /account/* handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::api::server::SharedAppState;
use crate::error::{ApiError, Result};
use crate::rosetta::{AccountBalanceResponse, AccountCoinsResponse};

#[derive(Debug, Default, Deserialize)]
pub struct AccountRef {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexIdentifier {
    #[serde(default)]
    pub index: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct AccountBalanceRequest {
    #[serde(default)]
    pub account_identifier: Option<AccountRef>,
    #[serde(default)]
    pub block_identifier: Option<IndexIdentifier>,
}

/// The coins request names its address flat in the body; the nested
/// account-identifier form is accepted as well.
#[derive(Debug, Deserialize)]
pub struct AccountCoinsRequest {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub account_identifier: Option<AccountRef>,
}

/// POST /account/balance
pub async fn balance(
    State(state): State<SharedAppState>,
    Json(req): Json<AccountBalanceRequest>,
) -> Result<Json<AccountBalanceResponse>> {
    let address = req
        .account_identifier
        .unwrap_or_default()
        .address
        .ok_or_else(|| ApiError::invalid_request("account_identifier.address is required"))?;
    let block_index = req
        .block_identifier
        .unwrap_or_default()
        .index
        .ok_or_else(|| ApiError::invalid_request("block_identifier.index is required"))?;

    Ok(Json(state.accounts.balance(&address, block_index).await?))
}

/// POST /account/coins
pub async fn coins(
    State(state): State<SharedAppState>,
    Json(req): Json<AccountCoinsRequest>,
) -> Result<Json<AccountCoinsResponse>> {
    let address = req
        .address
        .or_else(|| req.account_identifier.unwrap_or_default().address)
        .ok_or_else(|| ApiError::invalid_request("address is required"))?;

    Ok(Json(state.accounts.coins(&address).await?))
}
