//! /block and /block/transaction handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::api::server::SharedAppState;
use crate::error::{ApiError, Result};
use crate::resolver::BlockRef;
use crate::rosetta::{BlockResponse, BlockTransactionResponse};

#[derive(Debug, Deserialize)]
pub struct PartialBlockIdentifier {
    #[serde(default)]
    pub index: Option<u64>,
    #[serde(default)]
    pub hash: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BlockRequest {
    #[serde(default)]
    pub block_identifier: Option<PartialBlockIdentifier>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HashIdentifier {
    #[serde(default)]
    pub hash: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BlockTransactionRequest {
    #[serde(default)]
    pub transaction_identifier: Option<HashIdentifier>,
}

/// POST /block
///
/// The identifier may name the block by index or by hash; index wins when
/// both are present.
pub async fn block(
    State(state): State<SharedAppState>,
    Json(req): Json<BlockRequest>,
) -> Result<Json<BlockResponse>> {
    let identifier = req
        .block_identifier
        .ok_or_else(|| ApiError::invalid_request("block_identifier is required"))?;

    let reference = match (identifier.index, identifier.hash) {
        (Some(index), _) => BlockRef::Height(index),
        (None, Some(hash)) => BlockRef::Hash(hash),
        (None, None) => {
            return Err(ApiError::invalid_request(
                "block_identifier must carry an index or a hash",
            ))
        }
    };

    Ok(Json(state.blocks.block(&reference).await?))
}

/// POST /block/transaction
pub async fn block_transaction(
    State(state): State<SharedAppState>,
    Json(req): Json<BlockTransactionRequest>,
) -> Result<Json<BlockTransactionResponse>> {
    let hash = req
        .transaction_identifier
        .unwrap_or_default()
        .hash
        .ok_or_else(|| ApiError::invalid_request("transaction_identifier.hash is required"))?;

    Ok(Json(state.blocks.block_transaction(&hash).await?))
}
