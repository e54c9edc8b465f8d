//! /construction/* and /call handlers
//!
//! Construction requests name their fields flat in the body (`txid`, `vout`,
//! `address`, `amount`, `unsigned_hex`, `signed_hex`); the handlers check
//! presence and forward to the daemon pass-throughs.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::api::server::SharedAppState;
use crate::error::{ApiError, Result};

#[derive(Debug, Deserialize)]
pub struct PayloadsRequest {
    #[serde(default)]
    pub txid: Option<String>,
    #[serde(default)]
    pub vout: Option<u32>,
    #[serde(default)]
    pub address: Option<String>,
    /// Display-unit amount forwarded to the daemon untouched
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub unsigned_hex: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub signed_hex: Option<String>,
}

/// The parameter list is named `parameter` on the wire; `params` is accepted
/// as an alias for JSON-RPC-habituated callers.
#[derive(Debug, Deserialize)]
pub struct CallRequest {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default, alias = "params")]
    pub parameter: Vec<Value>,
}

/// POST /construction/derive
pub async fn derive(State(state): State<SharedAppState>) -> Result<Json<Value>> {
    Ok(Json(state.construction.derive().await?))
}

/// POST /construction/payloads
pub async fn payloads(
    State(state): State<SharedAppState>,
    Json(req): Json<PayloadsRequest>,
) -> Result<Json<Value>> {
    let txid = req
        .txid
        .ok_or_else(|| ApiError::invalid_request("txid is required"))?;
    let vout = req
        .vout
        .ok_or_else(|| ApiError::invalid_request("vout is required"))?;
    let address = req
        .address
        .ok_or_else(|| ApiError::invalid_request("address is required"))?;
    let amount = req
        .amount
        .ok_or_else(|| ApiError::invalid_request("amount is required"))?;

    Ok(Json(
        state
            .construction
            .payloads(&txid, vout, &address, amount)
            .await?,
    ))
}

/// POST /construction/parse
pub async fn parse(
    State(state): State<SharedAppState>,
    Json(req): Json<ParseRequest>,
) -> Result<Json<Value>> {
    let unsigned_hex = req
        .unsigned_hex
        .ok_or_else(|| ApiError::invalid_request("unsigned_hex is required"))?;

    Ok(Json(state.construction.parse(&unsigned_hex).await?))
}

/// POST /construction/submit
pub async fn submit(
    State(state): State<SharedAppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<Value>> {
    let signed_hex = req
        .signed_hex
        .ok_or_else(|| ApiError::invalid_request("signed_hex is required"))?;

    Ok(Json(state.construction.submit(&signed_hex).await?))
}

/// POST /call
pub async fn call(
    State(state): State<SharedAppState>,
    Json(req): Json<CallRequest>,
) -> Result<Json<Value>> {
    let method = req
        .method
        .ok_or_else(|| ApiError::invalid_request("method is required"))?;

    Ok(Json(state.construction.call(&method, req.parameter).await?))
}
