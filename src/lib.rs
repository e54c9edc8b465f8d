//! Verus Rosetta Gateway
//!
//! A Rosetta Data/Construction API gateway in front of a Verus-family UTXO
//! daemon. The daemon keeps its JSON-RPC surface; this crate translates
//! Rosetta documents to daemon calls and back.
//!
//! ## Layout
//!
//! - `daemon` - typed JSON-RPC client behind the [`daemon::DaemonRpc`] seam
//! - `resolver` - transport-agnostic document assembly
//! - `api` - axum routes, middleware and server startup
//! - `rosetta` - the Rosetta schema types and chain constants
//! - `error` - the stable error catalog and HTTP mapping

pub mod api;
pub mod config;
pub mod daemon;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod rosetta;

// Re-exports: configuration
pub use config::{Config, ConfigError};

// Re-exports: daemon client
pub use daemon::{DaemonClient, DaemonError, DaemonRpc};

// Re-exports: error taxonomy
pub use error::{ApiError, ErrorKind};

// Re-exports: resolvers
pub use resolver::{
    AccountResolver, BlockRef, BlockResolver, ConstructionResolver, NetworkResolver, SyncResolver,
    TransactionResolver,
};

// Re-exports: server
pub use api::{create_router, start_server, AppState, SharedAppState};
