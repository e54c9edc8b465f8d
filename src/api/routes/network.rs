//! /network/* handlers. The request bodies carry only the network
//! identifier, which this gateway re-derives from the daemon on every call,
//! so the handlers take no extractors beyond state.

use axum::{extract::State, Json};

use crate::api::server::SharedAppState;
use crate::error::Result;
use crate::rosetta::{NetworkListResponse, NetworkOptionsResponse, NetworkStatusResponse};

/// POST /network/list
pub async fn list(State(state): State<SharedAppState>) -> Result<Json<NetworkListResponse>> {
    Ok(Json(state.network.network_list().await?))
}

/// POST /network/status
pub async fn status(State(state): State<SharedAppState>) -> Result<Json<NetworkStatusResponse>> {
    Ok(Json(state.network.network_status().await?))
}

/// POST /network/options
pub async fn options(State(state): State<SharedAppState>) -> Result<Json<NetworkOptionsResponse>> {
    Ok(Json(state.network.network_options().await?))
}
