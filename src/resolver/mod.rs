//! Resolvers
//!
//! The transport-agnostic core of the gateway. Each resolver turns one group
//! of Rosetta operations into daemon RPC calls and assembled documents; the
//! axum routes in `crate::api` are thin bindings over these. Every resolver
//! holds an `Arc<dyn DaemonRpc>` so tests can script the daemon.

pub mod account;
pub mod block;
pub mod construction;
pub mod network;
pub mod sync;
pub mod transaction;

pub use account::AccountResolver;
pub use block::{BlockRef, BlockResolver};
pub use construction::ConstructionResolver;
pub use network::NetworkResolver;
pub use sync::{ChainTip, SyncResolver};
pub use transaction::TransactionResolver;
