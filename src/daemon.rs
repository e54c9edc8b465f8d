//! JSON-RPC Client for the Verus Daemon
//!
//! A thin typed wrapper over the daemon's JSON-RPC interface. One method per
//! RPC the gateway uses, all going through a single bounded-timeout reqwest
//! client with basic auth. No retries: a failed call surfaces immediately
//! and the Rosetta client decides whether to retry based on the catalog's
//! `retriable` flag.
//!
//! The [`DaemonRpc`] trait is the seam the resolvers depend on, so tests can
//! substitute a scripted daemon.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::Config;

// =============================================================================
// Daemon result types
// =============================================================================

/// `getblockchaininfo` fields the gateway consumes
#[derive(Debug, Clone, Deserialize)]
pub struct BlockchainInfo {
    pub chain: String,
    pub chainid: String,
    /// Locally synced block height
    pub blocks: u64,
}

/// `getnetworkinfo` fields the gateway consumes
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkInfo {
    pub version: u64,
    pub subversion: String,
    pub protocolversion: u64,
}

/// `getblock` (verbose) fields the gateway consumes
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub hash: String,
    pub height: u64,
    /// Block time in seconds since epoch
    pub time: u64,
    pub confirmations: i64,
    /// Transaction ids in block order
    #[serde(default)]
    pub tx: Vec<String>,
}

/// One decoded output of `getrawtransaction` verbose
#[derive(Debug, Clone, Deserialize)]
pub struct RawVout {
    #[serde(rename = "valueSat")]
    pub value_sat: u64,
    #[serde(rename = "scriptPubKey", default)]
    pub script_pub_key: ScriptPubKey,
}

/// Destination script of an output; `addresses` may be absent for
/// non-standard or pruned scripts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptPubKey {
    #[serde(default)]
    pub addresses: Vec<String>,
}

/// `getrawtransaction` (verbose) fields the gateway consumes
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    pub txid: String,
    /// Absent for mempool transactions
    #[serde(default)]
    pub confirmations: u64,
    #[serde(default)]
    pub vout: Vec<RawVout>,
}

/// One entry of `getpeerinfo`
#[derive(Debug, Clone, Deserialize)]
pub struct PeerInfo {
    pub id: u64,
}

/// `getaddressbalance` result (satoshi figures)
#[derive(Debug, Clone, Deserialize)]
pub struct AddressBalance {
    pub balance: u64,
    #[serde(default)]
    pub received: u64,
}

/// One entry of `getaddressutxos`
#[derive(Debug, Clone, Deserialize)]
pub struct AddressUtxo {
    pub txid: String,
    #[serde(rename = "outputIndex")]
    pub output_index: u32,
    pub satoshis: u64,
    pub height: u64,
}

// =============================================================================
// Errors
// =============================================================================

/// Daemon RPC error codes that mean "no such object" rather than a failure
/// of the daemon itself.
const RPC_INVALID_ADDRESS_OR_KEY: i64 = -5;
const RPC_INVALID_PARAMETER: i64 = -8;

/// Daemon client error types
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("daemon unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("daemon RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed daemon response: {0}")]
    Malformed(String),
}

impl DaemonError {
    /// True when the daemon explicitly reports no such block/transaction
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DaemonError::Rpc {
                code: RPC_INVALID_ADDRESS_OR_KEY | RPC_INVALID_PARAMETER,
                ..
            }
        )
    }
}

// =============================================================================
// Trait seam
// =============================================================================

/// The daemon operations the resolvers depend on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DaemonRpc: Send + Sync {
    async fn get_blockchain_info(&self) -> Result<BlockchainInfo, DaemonError>;
    async fn get_network_info(&self) -> Result<NetworkInfo, DaemonError>;
    async fn get_best_block_hash(&self) -> Result<String, DaemonError>;
    async fn get_block_hash(&self, height: u64) -> Result<String, DaemonError>;
    /// `identifier` is a block hash or a decimal height; the daemon accepts
    /// both forms.
    async fn get_block(&self, identifier: &str) -> Result<RawBlock, DaemonError>;
    async fn get_raw_transaction(&self, txid: &str) -> Result<RawTransaction, DaemonError>;
    async fn get_raw_mempool(&self) -> Result<Vec<String>, DaemonError>;
    async fn get_peer_info(&self) -> Result<Vec<PeerInfo>, DaemonError>;
    async fn get_address_balance(&self, address: &str) -> Result<AddressBalance, DaemonError>;
    async fn get_address_utxos(&self, address: &str) -> Result<Vec<AddressUtxo>, DaemonError>;
    async fn get_new_address(&self) -> Result<String, DaemonError>;
    async fn create_raw_transaction(
        &self,
        txid: &str,
        vout: u32,
        address: &str,
        amount: f64,
    ) -> Result<String, DaemonError>;
    async fn sign_raw_transaction(&self, unsigned_hex: &str) -> Result<Value, DaemonError>;
    async fn send_raw_transaction(&self, signed_hex: &str) -> Result<Value, DaemonError>;
    /// Raw escape hatch: forward any method and parameter list verbatim
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, DaemonError>;
}

// =============================================================================
// JSON-RPC plumbing
// =============================================================================

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: &'static str,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Concrete daemon client over HTTP
#[derive(Debug, Clone)]
pub struct DaemonClient {
    client: Client,
    url: String,
    user: String,
    pass: String,
}

impl DaemonClient {
    /// Build a client from the application config. The timeout bounds every
    /// upstream call so a stalled daemon cannot hold requests open forever.
    pub fn from_config(config: &Config) -> Result<Self, DaemonError> {
        let client = Client::builder().timeout(config.rpc_timeout()).build()?;
        Ok(Self {
            client,
            url: config.rpc_url.clone(),
            user: config.rpc_user.clone(),
            pass: config.rpc_pass.clone(),
        })
    }

    /// Issue one JSON-RPC call and decode its `result` field.
    ///
    /// The daemon responds with non-2xx status codes for RPC-level errors
    /// while still carrying the JSON envelope, so the body is decoded
    /// regardless of status.
    async fn rpc<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, DaemonError> {
        let payload = RpcRequest {
            jsonrpc: "1.0",
            id: "rosetta",
            method,
            params,
        };

        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.user, Some(&self.pass))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        let envelope: RpcResponse<T> = serde_json::from_slice(&body).map_err(|e| {
            DaemonError::Malformed(format!("{} (HTTP {}): {}", method, status, e))
        })?;

        if let Some(err) = envelope.error {
            return Err(DaemonError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        envelope
            .result
            .ok_or_else(|| DaemonError::Malformed(format!("{}: missing result", method)))
    }
}

#[async_trait]
impl DaemonRpc for DaemonClient {
    async fn get_blockchain_info(&self) -> Result<BlockchainInfo, DaemonError> {
        self.rpc("getblockchaininfo", json!([])).await
    }

    async fn get_network_info(&self) -> Result<NetworkInfo, DaemonError> {
        self.rpc("getnetworkinfo", json!([])).await
    }

    async fn get_best_block_hash(&self) -> Result<String, DaemonError> {
        self.rpc("getbestblockhash", json!([])).await
    }

    async fn get_block_hash(&self, height: u64) -> Result<String, DaemonError> {
        self.rpc("getblockhash", json!([height])).await
    }

    async fn get_block(&self, identifier: &str) -> Result<RawBlock, DaemonError> {
        self.rpc("getblock", json!([identifier])).await
    }

    async fn get_raw_transaction(&self, txid: &str) -> Result<RawTransaction, DaemonError> {
        // 1 selects the verbose (decoded) form
        self.rpc("getrawtransaction", json!([txid, 1])).await
    }

    async fn get_raw_mempool(&self) -> Result<Vec<String>, DaemonError> {
        self.rpc("getrawmempool", json!([])).await
    }

    async fn get_peer_info(&self) -> Result<Vec<PeerInfo>, DaemonError> {
        self.rpc("getpeerinfo", json!([])).await
    }

    async fn get_address_balance(&self, address: &str) -> Result<AddressBalance, DaemonError> {
        self.rpc("getaddressbalance", json!([{ "addresses": [address] }]))
            .await
    }

    async fn get_address_utxos(&self, address: &str) -> Result<Vec<AddressUtxo>, DaemonError> {
        self.rpc("getaddressutxos", json!([{ "addresses": [address] }]))
            .await
    }

    async fn get_new_address(&self) -> Result<String, DaemonError> {
        self.rpc("getnewaddress", json!([])).await
    }

    async fn create_raw_transaction(
        &self,
        txid: &str,
        vout: u32,
        address: &str,
        amount: f64,
    ) -> Result<String, DaemonError> {
        self.rpc(
            "createrawtransaction",
            json!([[{ "txid": txid, "vout": vout }], { address: amount }]),
        )
        .await
    }

    async fn sign_raw_transaction(&self, unsigned_hex: &str) -> Result<Value, DaemonError> {
        self.rpc("signrawtransaction", json!([unsigned_hex])).await
    }

    async fn send_raw_transaction(&self, signed_hex: &str) -> Result<Value, DaemonError> {
        self.rpc("sendrawtransaction", json!([signed_hex])).await
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, DaemonError> {
        self.rpc(method, Value::Array(params)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let not_found = DaemonError::Rpc {
            code: -5,
            message: "Block not found".to_string(),
        };
        assert!(not_found.is_not_found());

        let out_of_range = DaemonError::Rpc {
            code: -8,
            message: "Block height out of range".to_string(),
        };
        assert!(out_of_range.is_not_found());

        let internal = DaemonError::Rpc {
            code: -32603,
            message: "internal".to_string(),
        };
        assert!(!internal.is_not_found());
    }

    #[test]
    fn test_raw_transaction_decoding() {
        let raw = serde_json::json!({
            "txid": "ab".repeat(32),
            "confirmations": 120,
            "vout": [
                { "valueSat": 500000000u64, "scriptPubKey": { "addresses": ["A"] } },
                { "valueSat": 100000000u64, "scriptPubKey": { "addresses": ["B"] } }
            ]
        });
        let tx: RawTransaction = serde_json::from_value(raw).unwrap();
        assert_eq!(tx.confirmations, 120);
        assert_eq!(tx.vout.len(), 2);
        assert_eq!(tx.vout[0].value_sat, 500_000_000);
        assert_eq!(tx.vout[1].script_pub_key.addresses, vec!["B"]);
    }

    #[test]
    fn test_mempool_transaction_defaults() {
        // Mempool transactions carry no confirmations field and may lack
        // address lists on exotic scripts.
        let raw = serde_json::json!({
            "txid": "cd".repeat(32),
            "vout": [ { "valueSat": 1000u64, "scriptPubKey": {} } ]
        });
        let tx: RawTransaction = serde_json::from_value(raw).unwrap();
        assert_eq!(tx.confirmations, 0);
        assert!(tx.vout[0].script_pub_key.addresses.is_empty());
    }

    #[test]
    fn test_rpc_envelope_error() {
        let body = r#"{"result":null,"error":{"code":-5,"message":"Block not found"},"id":"rosetta"}"#;
        let envelope: RpcResponse<RawBlock> = serde_json::from_str(body).unwrap();
        assert!(envelope.result.is_none());
        assert_eq!(envelope.error.unwrap().code, -5);
    }
}
