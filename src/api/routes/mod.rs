//! Route Handlers
//!
//! Thin bindings from HTTP requests to the resolvers. Handlers validate the
//! presence of the fields they need and hand everything else to the resolver
//! layer; response shaping and status codes live in `crate::error`.

pub mod account;
pub mod block;
pub mod construction;
pub mod mempool;
pub mod network;

use axum::{response::IntoResponse, Json};

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "verus-rosetta",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
