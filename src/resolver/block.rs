//! Block Resolution
//!
//! Assembles the Rosetta block document: identifier, parent, timestamp in
//! daemon seconds, and one Rosetta transaction per transaction id in the
//! block. The parent comes from a second lookup at height-1; genesis is its
//! own parent, terminating client back-walks.

use std::sync::Arc;

use crate::daemon::DaemonRpc;
use crate::error::{ApiError, ErrorKind, Result};
use crate::resolver::TransactionResolver;
use crate::rosetta::{
    Block, BlockIdentifier, BlockResponse, BlockTransactionResponse, NetworkIdentifier,
    TransactionIdentifier,
};

/// How a client names the block it wants
#[derive(Debug, Clone)]
pub enum BlockRef {
    Height(u64),
    Hash(String),
}

impl BlockRef {
    /// The daemon's `getblock` accepts a hash or a decimal height string.
    fn as_param(&self) -> String {
        match self {
            BlockRef::Height(h) => h.to_string(),
            BlockRef::Hash(h) => h.clone(),
        }
    }
}

pub struct BlockResolver {
    daemon: Arc<dyn DaemonRpc>,
    transactions: Arc<TransactionResolver>,
    block_confirmations: u64,
}

impl BlockResolver {
    pub fn new(
        daemon: Arc<dyn DaemonRpc>,
        transactions: Arc<TransactionResolver>,
        block_confirmations: u64,
    ) -> Self {
        Self {
            daemon,
            transactions,
            block_confirmations,
        }
    }

    pub async fn block(&self, reference: &BlockRef) -> Result<BlockResponse> {
        let raw = self
            .daemon
            .get_block(&reference.as_param())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    ApiError::new(ErrorKind::BlockNotFound, e.to_string())
                } else {
                    ApiError::new(ErrorKind::BlockInfo, e.to_string())
                }
            })?;

        let chain = self
            .daemon
            .get_blockchain_info()
            .await
            .map_err(|e| ApiError::new(ErrorKind::BlockInfo, e.to_string()))?;
        let network = NetworkIdentifier::for_chain(&chain.chainid);

        let identifier = BlockIdentifier {
            index: raw.height,
            hash: raw.hash.clone(),
        };

        let parent = if raw.height == 0 {
            identifier.clone()
        } else {
            let parent_hash = self
                .daemon
                .get_block_hash(raw.height - 1)
                .await
                .map_err(|e| ApiError::new(ErrorKind::BlockInfo, e.to_string()))?;
            BlockIdentifier {
                index: raw.height - 1,
                hash: parent_hash,
            }
        };

        // One status for the whole block, judged against the block threshold.
        // Orphaned blocks report confirmations of -1 and stay unconfirmed.
        let status = if raw.confirmations > self.block_confirmations as i64 {
            "confirmed"
        } else {
            "unconfirmed"
        };

        let mut transactions = Vec::with_capacity(raw.tx.len());
        for txid in &raw.tx {
            let summary = self.transactions.output_summary(txid).await;
            transactions.push(TransactionResolver::document(
                txid, summary, status, &network,
            ));
        }

        let other_transactions = raw
            .tx
            .iter()
            .map(|txid| TransactionIdentifier {
                hash: txid.clone(),
            })
            .collect();

        Ok(BlockResponse {
            block: Block {
                block_identifier: identifier,
                parent_block_identifier: parent,
                timestamp: raw.time,
                transactions,
            },
            other_transactions,
        })
    }

    /// /block/transaction resolves the transaction directly; the block
    /// identifier in the request only scopes the lookup for the client.
    pub async fn block_transaction(&self, txid: &str) -> Result<BlockTransactionResponse> {
        let transaction = self.transactions.transaction(txid).await?;
        Ok(BlockTransactionResponse { transaction })
    }
}
