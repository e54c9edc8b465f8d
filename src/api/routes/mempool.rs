//! /mempool handler

use axum::{extract::State, Json};

use crate::api::server::SharedAppState;
use crate::error::Result;
use crate::rosetta::MempoolResponse;

/// POST /mempool
pub async fn mempool(State(state): State<SharedAppState>) -> Result<Json<MempoolResponse>> {
    Ok(Json(state.transactions.mempool().await?))
}
