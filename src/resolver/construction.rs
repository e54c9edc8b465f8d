//! Construction Resolution
//!
//! Pass-through wrappers over the daemon's wallet and raw-transaction RPCs.
//! The gateway validates that required fields are present and forwards the
//! call; signing semantics stay inside the daemon.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::daemon::DaemonRpc;
use crate::error::{ApiError, ErrorKind, Result};

pub struct ConstructionResolver {
    daemon: Arc<dyn DaemonRpc>,
}

impl ConstructionResolver {
    pub fn new(daemon: Arc<dyn DaemonRpc>) -> Self {
        Self { daemon }
    }

    /// A fresh receiving address from the daemon wallet
    pub async fn derive(&self) -> Result<Value> {
        let address = self
            .daemon
            .get_new_address()
            .await
            .map_err(|e| ApiError::new(ErrorKind::AddressDerivation, e.to_string()))?;
        Ok(json!({ "address": address }))
    }

    /// Unsigned spend of one coin to one destination
    pub async fn payloads(
        &self,
        txid: &str,
        vout: u32,
        address: &str,
        amount: f64,
    ) -> Result<Value> {
        let hex = self
            .daemon
            .create_raw_transaction(txid, vout, address, amount)
            .await
            .map_err(|e| ApiError::new(ErrorKind::AddressDerivation, e.to_string()))?;
        Ok(json!({ "transaction": hex }))
    }

    /// Daemon-side signing result, returned verbatim (hex, completeness flag,
    /// per-input errors)
    pub async fn parse(&self, unsigned_hex: &str) -> Result<Value> {
        self.daemon
            .sign_raw_transaction(unsigned_hex)
            .await
            .map_err(|e| ApiError::new(ErrorKind::AddressDerivation, e.to_string()))
    }

    /// Broadcast; the daemon's acceptance result is returned verbatim
    pub async fn submit(&self, signed_hex: &str) -> Result<Value> {
        self.daemon
            .send_raw_transaction(signed_hex)
            .await
            .map_err(|e| ApiError::new(ErrorKind::AddressDerivation, e.to_string()))
    }

    /// Raw escape hatch for `/call`: forward any method and parameters
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.daemon
            .call(method, params)
            .await
            .map_err(|e| ApiError::new(ErrorKind::AddressDerivation, e.to_string()))
    }
}
