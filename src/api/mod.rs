//! HTTP Transport
//!
//! axum binding over the resolvers: application state, router construction,
//! request middleware and the route handlers. All Rosetta endpoints are POST
//! per the schema; `/health` is the only GET.

pub mod middleware;
pub mod routes;
pub mod server;

pub use server::{create_router, start_server, AppState, SharedAppState};
