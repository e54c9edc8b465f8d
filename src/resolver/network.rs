//! Network Resolution
//!
//! /network/list, /network/status and /network/options documents. The chain
//! id comes from the daemon on every call; every network identifier embedded
//! in one response carries the same daemon-reported id.

use std::sync::Arc;

use crate::daemon::DaemonRpc;
use crate::error::{ApiError, ErrorKind, Result};
use crate::resolver::SyncResolver;
use crate::rosetta::{
    Allow, BalanceExemption, CatalogError, Currency, NetworkIdentifier, NetworkListResponse,
    NetworkOptionsResponse, NetworkStatusResponse, OperationStatusDescriptor, Peer, Version,
    MIDDLEWARE_VERSION, ROSETTA_VERSION,
};

/// First timestamp a Rosetta client may ask for (the chain predates nothing
/// before its own genesis time).
const TIMESTAMP_START_INDEX: u64 = 1_231_006_505;

pub struct NetworkResolver {
    daemon: Arc<dyn DaemonRpc>,
    sync: Arc<SyncResolver>,
}

impl NetworkResolver {
    pub fn new(daemon: Arc<dyn DaemonRpc>, sync: Arc<SyncResolver>) -> Self {
        Self { daemon, sync }
    }

    /// The single network this gateway fronts
    pub async fn network_list(&self) -> Result<NetworkListResponse> {
        let info = self
            .daemon
            .get_blockchain_info()
            .await
            .map_err(|e| ApiError::new(ErrorKind::NetworkVersion, e.to_string()))?;

        Ok(NetworkListResponse {
            network_identifiers: vec![NetworkIdentifier::for_chain(&info.chainid)],
        })
    }

    pub async fn network_status(&self) -> Result<NetworkStatusResponse> {
        let tip = self.sync.chain_tip().await?;
        let genesis = self.sync.genesis_block_identifier().await?;
        let sync_status = self.sync.sync_status(&tip).await?;

        let peers = self
            .daemon
            .get_peer_info()
            .await
            .map_err(|e| ApiError::new(ErrorKind::NetworkVersion, e.to_string()))?
            .into_iter()
            .map(|p| Peer {
                peer_id: p.id.to_string(),
            })
            .collect();

        Ok(NetworkStatusResponse {
            current_block_identifier: tip.identifier,
            // the only millisecond timestamp in the API
            current_block_timestamp: tip.time * 1000,
            genesis_block_identifier: genesis.clone(),
            oldest_block_identifier: genesis,
            sync_status,
            peers,
        })
    }

    /// Static capabilities plus the live node version. The error catalog is
    /// emitted verbatim so clients can key retries off stable codes.
    pub async fn network_options(&self) -> Result<NetworkOptionsResponse> {
        let chain = self
            .daemon
            .get_blockchain_info()
            .await
            .map_err(|e| ApiError::new(ErrorKind::NetworkVersion, e.to_string()))?;
        let node = self
            .daemon
            .get_network_info()
            .await
            .map_err(|e| ApiError::new(ErrorKind::NetworkVersion, e.to_string()))?;

        let operation_statuses = ["confirmed", "unconfirmed", "processing", "pubkey"]
            .iter()
            .map(|s| OperationStatusDescriptor {
                status: s.to_string(),
                successful: true,
            })
            .collect();

        let errors = ErrorKind::all()
            .iter()
            .map(|kind| CatalogError {
                code: kind.code(),
                message: kind.message().to_string(),
                description: kind.description().to_string(),
                retriable: kind.retriable(),
            })
            .collect();

        Ok(NetworkOptionsResponse {
            version: Version {
                rosetta_version: ROSETTA_VERSION.to_string(),
                node_version: node.version.to_string(),
                middleware_version: MIDDLEWARE_VERSION.to_string(),
            },
            allow: Allow {
                operation_statuses,
                operation_types: vec![
                    "Transfer".to_string(),
                    "mined".to_string(),
                    "minted".to_string(),
                    "pubkey".to_string(),
                ],
                errors,
                historical_balance_lookup: true,
                timestamp_start_index: TIMESTAMP_START_INDEX,
                call_methods: vec!["POST".to_string()],
                balance_exemptions: vec![BalanceExemption {
                    sub_account_address: chain.chainid,
                    currency: Currency::native(),
                    exemption_type: "dynamic".to_string(),
                }],
                mempool_coins: false,
            },
        })
    }
}
