//! Sync State Resolution
//!
//! Derives the chain tip, the genesis identifier and the synchronization
//! status from daemon queries. Nothing here is stored between requests
//! except the genesis identifier, which is immutable for the life of the
//! chain and therefore memoized for the life of the process.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::daemon::DaemonRpc;
use crate::error::{ApiError, ErrorKind, Result};
use crate::rosetta::{BlockIdentifier, SyncStatus};

/// The daemon's current best block plus its timestamp in daemon seconds
#[derive(Debug, Clone)]
pub struct ChainTip {
    pub identifier: BlockIdentifier,
    pub time: u64,
}

pub struct SyncResolver {
    daemon: Arc<dyn DaemonRpc>,
    genesis: OnceCell<BlockIdentifier>,
}

impl SyncResolver {
    pub fn new(daemon: Arc<dyn DaemonRpc>) -> Self {
        Self {
            daemon,
            genesis: OnceCell::new(),
        }
    }

    /// Best block hash plus a second lookup for its height and time. The two
    /// round trips are not atomic; a tip advance in between yields a
    /// momentarily stale answer, which the next poll corrects.
    pub async fn chain_tip(&self) -> Result<ChainTip> {
        let hash = self
            .daemon
            .get_best_block_hash()
            .await
            .map_err(|e| ApiError::new(ErrorKind::NetworkVersion, e.to_string()))?;
        let block = self
            .daemon
            .get_block(&hash)
            .await
            .map_err(|e| ApiError::new(ErrorKind::NetworkVersion, e.to_string()))?;

        Ok(ChainTip {
            identifier: BlockIdentifier {
                index: block.height,
                hash: block.hash,
            },
            time: block.time,
        })
    }

    /// Genesis block identifier, resolved once per process. Racing first
    /// callers may each query the daemon, but they converge on the same
    /// immutable value.
    pub async fn genesis_block_identifier(&self) -> Result<BlockIdentifier> {
        self.genesis
            .get_or_try_init(|| async {
                let hash = self
                    .daemon
                    .get_block_hash(0)
                    .await
                    .map_err(|e| ApiError::new(ErrorKind::NetworkVersion, e.to_string()))?;
                Ok::<_, ApiError>(BlockIdentifier { index: 0, hash })
            })
            .await
            .cloned()
    }

    /// Synced means the locally indexed height has caught up with the tip.
    ///
    /// `current_index` and `target_index` come from different daemon calls,
    /// so a tip advance between them reads as one block of lag.
    pub async fn sync_status(&self, tip: &ChainTip) -> Result<SyncStatus> {
        let info = self
            .daemon
            .get_blockchain_info()
            .await
            .map_err(|e| ApiError::new(ErrorKind::NetworkVersion, e.to_string()))?;

        let current = info.blocks;
        let target = tip.identifier.index;
        let synced = current == target;

        Ok(SyncStatus {
            current_index: current,
            target_index: target,
            stage: if synced { "Synced" } else { "Syncing" }.to_string(),
            synced,
        })
    }
}
