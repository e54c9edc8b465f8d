//! Transaction Resolution
//!
//! Builds the Rosetta transaction document from the daemon's verbose
//! transaction form. The first output carries the primary account and the
//! amount; the second output, when present, carries the sub-account. A
//! transaction whose outputs cannot be decoded still resolves, with the
//! documented sentinel address and "0" value standing in for the unknowns.

use std::sync::Arc;

use crate::daemon::{DaemonRpc, RawTransaction};
use crate::error::{ApiError, ErrorKind, Result};
use crate::rosetta::{
    AccountIdentifier, Amount, CoinChange, CoinIdentifier, Currency, MempoolResponse,
    NetworkIdentifier, Operation, OperationIdentifier, RelatedTransaction, SubAccountIdentifier,
    Transaction, TransactionIdentifier, UNKNOWN_ADDRESS, UNKNOWN_VALUE,
};

/// What the first two outputs of a transaction say about it
#[derive(Debug, Clone)]
pub struct OutputSummary {
    /// First output's value in satoshis, as an integer string
    pub value: String,
    pub primary_address: String,
    pub sub_address: String,
}

impl OutputSummary {
    /// Sentinel summary for transactions whose outputs cannot be read
    pub fn unknown() -> Self {
        Self {
            value: UNKNOWN_VALUE.to_string(),
            primary_address: UNKNOWN_ADDRESS.to_string(),
            sub_address: UNKNOWN_ADDRESS.to_string(),
        }
    }
}

pub struct TransactionResolver {
    daemon: Arc<dyn DaemonRpc>,
    tx_confirmations: u64,
}

impl TransactionResolver {
    pub fn new(daemon: Arc<dyn DaemonRpc>, tx_confirmations: u64) -> Self {
        Self {
            daemon,
            tx_confirmations,
        }
    }

    /// Resolve one transaction by id, status judged against the transaction
    /// confirmation threshold.
    pub async fn transaction(&self, txid: &str) -> Result<Transaction> {
        let raw = self.daemon.get_raw_transaction(txid).await.map_err(|e| {
            if e.is_not_found() {
                ApiError::new(ErrorKind::TransactionNotFound, e.to_string())
            } else {
                ApiError::new(ErrorKind::TransactionInfo, e.to_string())
            }
        })?;

        let chain = self
            .daemon
            .get_blockchain_info()
            .await
            .map_err(|e| ApiError::new(ErrorKind::TransactionInfo, e.to_string()))?;
        let network = NetworkIdentifier::for_chain(&chain.chainid);

        let status = if raw.confirmations > self.tx_confirmations {
            "confirmed"
        } else {
            "unconfirmed"
        };

        Ok(Self::document(
            &raw.txid,
            summarize_outputs(&raw),
            status,
            &network,
        ))
    }

    /// Look up a transaction's output summary, swallowing every failure into
    /// the sentinel form. Used while assembling blocks, where one undecodable
    /// transaction must not fail the whole document.
    pub async fn output_summary(&self, txid: &str) -> OutputSummary {
        match self.daemon.get_raw_transaction(txid).await {
            Ok(raw) => summarize_outputs(&raw),
            Err(e) => {
                tracing::warn!(txid, error = %e, "transaction outputs unreadable, using sentinels");
                OutputSummary::unknown()
            }
        }
    }

    /// Pending transaction ids, one identifier per mempool entry
    pub async fn mempool(&self) -> Result<MempoolResponse> {
        let txids = self
            .daemon
            .get_raw_mempool()
            .await
            .map_err(|e| ApiError::new(ErrorKind::MempoolInfo, e.to_string()))?;

        Ok(MempoolResponse {
            transaction_identifiers: txids
                .into_iter()
                .map(|hash| TransactionIdentifier { hash })
                .collect(),
        })
    }

    /// Assemble the Rosetta transaction document from a summary and an
    /// already-decided status.
    pub fn document(
        txid: &str,
        summary: OutputSummary,
        status: &str,
        network: &NetworkIdentifier,
    ) -> Transaction {
        let identifier = TransactionIdentifier {
            hash: txid.to_string(),
        };

        let operation = Operation {
            operation_identifier: OperationIdentifier {
                index: 0,
                network_index: 0,
            },
            related_operations: vec![],
            operation_type: "Transfer".to_string(),
            status: status.to_string(),
            account: AccountIdentifier {
                address: summary.primary_address,
                sub_account: SubAccountIdentifier {
                    address: summary.sub_address,
                },
            },
            amount: Amount {
                value: summary.value,
                currency: Currency::native(),
            },
            coin_change: CoinChange {
                coin_identifier: CoinIdentifier {
                    identifier: format!("{}:0", txid),
                },
                coin_action: "coin_spent".to_string(),
            },
        };

        Transaction {
            transaction_identifier: identifier.clone(),
            operations: vec![operation],
            related_transactions: vec![RelatedTransaction {
                network_identifier: network.clone(),
                transaction_identifier: identifier,
                direction: "forward".to_string(),
            }],
        }
    }
}

/// Read the first two outputs; any missing piece falls back to sentinels.
/// Fewer than two addressed outputs makes the sub-account mirror the primary.
fn summarize_outputs(raw: &RawTransaction) -> OutputSummary {
    let first = raw.vout.first();

    let value = first
        .map(|v| v.value_sat.to_string())
        .unwrap_or_else(|| UNKNOWN_VALUE.to_string());

    let primary_address = first
        .and_then(|v| v.script_pub_key.addresses.first())
        .cloned()
        .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());

    let sub_address = raw
        .vout
        .get(1)
        .and_then(|v| v.script_pub_key.addresses.first())
        .cloned()
        .unwrap_or_else(|| primary_address.clone());

    OutputSummary {
        value,
        primary_address,
        sub_address,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_tx(json: serde_json::Value) -> RawTransaction {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_two_outputs_split_primary_and_sub() {
        let raw = raw_tx(serde_json::json!({
            "txid": "t1",
            "vout": [
                { "valueSat": 500000000u64, "scriptPubKey": { "addresses": ["A"] } },
                { "valueSat": 100000000u64, "scriptPubKey": { "addresses": ["B"] } }
            ]
        }));
        let summary = summarize_outputs(&raw);
        assert_eq!(summary.value, "500000000");
        assert_eq!(summary.primary_address, "A");
        assert_eq!(summary.sub_address, "B");
    }

    #[test]
    fn test_single_output_mirrors_sub_account() {
        let raw = raw_tx(serde_json::json!({
            "txid": "t2",
            "vout": [
                { "valueSat": 1234u64, "scriptPubKey": { "addresses": ["A"] } }
            ]
        }));
        let summary = summarize_outputs(&raw);
        assert_eq!(summary.primary_address, "A");
        assert_eq!(summary.sub_address, "A");
    }

    #[test]
    fn test_no_outputs_yield_sentinels() {
        let raw = raw_tx(serde_json::json!({ "txid": "t3", "vout": [] }));
        let summary = summarize_outputs(&raw);
        assert_eq!(summary.value, UNKNOWN_VALUE);
        assert_eq!(summary.primary_address, UNKNOWN_ADDRESS);
        assert_eq!(summary.sub_address, UNKNOWN_ADDRESS);
    }

    #[test]
    fn test_addressless_first_output() {
        // Exotic script with no decoded address on the first output; the
        // value is still readable so only the addresses fall back.
        let raw = raw_tx(serde_json::json!({
            "txid": "t4",
            "vout": [
                { "valueSat": 77u64, "scriptPubKey": {} }
            ]
        }));
        let summary = summarize_outputs(&raw);
        assert_eq!(summary.value, "77");
        assert_eq!(summary.primary_address, UNKNOWN_ADDRESS);
        assert_eq!(summary.sub_address, UNKNOWN_ADDRESS);
    }

    #[test]
    fn test_document_shape() {
        let network = NetworkIdentifier::for_chain("vrsc");
        let doc = TransactionResolver::document(
            "abcd",
            OutputSummary {
                value: "5".to_string(),
                primary_address: "A".to_string(),
                sub_address: "B".to_string(),
            },
            "confirmed",
            &network,
        );
        assert_eq!(doc.transaction_identifier.hash, "abcd");
        assert_eq!(doc.operations.len(), 1);
        let op = &doc.operations[0];
        assert_eq!(op.operation_identifier.index, 0);
        assert_eq!(op.coin_change.coin_identifier.identifier, "abcd:0");
        assert_eq!(doc.related_transactions[0].direction, "forward");
        assert_eq!(doc.related_transactions[0].network_identifier, network);
    }
}
