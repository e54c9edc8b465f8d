//! Rosetta Schema Types
//!
//! Serde models for the Rosetta Data/Construction documents this gateway
//! emits. Field names follow the Rosetta wire format exactly. Amount values
//! are always integer strings in the smallest unit (satoshis, 8 decimals);
//! display-unit fractions never appear on the wire.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chain constants
// =============================================================================

/// Fixed blockchain name embedded in every network identifier
pub const BLOCKCHAIN: &str = "VRSC";

/// Currency symbol
pub const CURRENCY_SYMBOL: &str = "VRSC";

/// Smallest-unit decimals (1 coin = 1e8 sats)
pub const CURRENCY_DECIMALS: u32 = 8;

/// Rosetta schema version this gateway implements
pub const ROSETTA_VERSION: &str = "1.2.5";

/// Gateway middleware version reported in /network/options
pub const MIDDLEWARE_VERSION: &str = "0.2.7";

/// Sentinel address reported when a transaction's outputs cannot be decoded.
/// Callers must treat it as "unknown", not as a real destination.
pub const UNKNOWN_ADDRESS: &str = "iCRUc98jcJCP3JEntuud7Ae6eeaWtfZaZK";

/// Sentinel amount paired with [`UNKNOWN_ADDRESS`]: unknown, not zero-value.
pub const UNKNOWN_VALUE: &str = "0";

// =============================================================================
// Identifiers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubNetworkIdentifier {
    pub network: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkIdentifier {
    pub blockchain: String,
    pub network: String,
    pub sub_network_identifier: SubNetworkIdentifier,
}

impl NetworkIdentifier {
    /// Build the canonical identifier for a daemon-reported chain id
    pub fn for_chain(chain_id: &str) -> Self {
        Self {
            blockchain: BLOCKCHAIN.to_string(),
            network: chain_id.to_string(),
            sub_network_identifier: SubNetworkIdentifier {
                network: chain_id.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockIdentifier {
    pub index: u64,
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionIdentifier {
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationIdentifier {
    pub index: i64,
    pub network_index: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinIdentifier {
    pub identifier: String,
}

// =============================================================================
// Network documents
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkListResponse {
    pub network_identifiers: Vec<NetworkIdentifier>,
}

/// Derived synchronization state; never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub current_index: u64,
    pub target_index: u64,
    pub stage: String,
    pub synced: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Peer {
    pub peer_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkStatusResponse {
    pub current_block_identifier: BlockIdentifier,
    /// Milliseconds since epoch; the only millisecond timestamp in the API
    pub current_block_timestamp: u64,
    pub genesis_block_identifier: BlockIdentifier,
    pub oldest_block_identifier: BlockIdentifier,
    pub sync_status: SyncStatus,
    pub peers: Vec<Peer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub rosetta_version: String,
    pub node_version: String,
    pub middleware_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationStatusDescriptor {
    pub status: String,
    pub successful: bool,
}

/// One entry of the fixed error catalog advertised in /network/options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogError {
    pub code: u32,
    pub message: String,
    pub description: String,
    pub retriable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub symbol: String,
    pub decimals: u32,
}

impl Currency {
    /// The native currency descriptor
    pub fn native() -> Self {
        Self {
            symbol: CURRENCY_SYMBOL.to_string(),
            decimals: CURRENCY_DECIMALS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceExemption {
    pub sub_account_address: String,
    pub currency: Currency,
    pub exemption_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allow {
    pub operation_statuses: Vec<OperationStatusDescriptor>,
    pub operation_types: Vec<String>,
    pub errors: Vec<CatalogError>,
    pub historical_balance_lookup: bool,
    pub timestamp_start_index: u64,
    pub call_methods: Vec<String>,
    pub balance_exemptions: Vec<BalanceExemption>,
    pub mempool_coins: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkOptionsResponse {
    pub version: Version,
    pub allow: Allow,
}

// =============================================================================
// Block and transaction documents
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAccountIdentifier {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentifier {
    pub address: String,
    pub sub_account: SubAccountIdentifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: String,
    pub currency: Currency,
}

impl Amount {
    /// Native-currency amount from a satoshi figure
    pub fn from_sats(sats: u64) -> Self {
        Self {
            value: sats.to_string(),
            currency: Currency::native(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinChange {
    pub coin_identifier: CoinIdentifier,
    pub coin_action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub operation_identifier: OperationIdentifier,
    pub related_operations: Vec<OperationIdentifier>,
    #[serde(rename = "type")]
    pub operation_type: String,
    pub status: String,
    pub account: AccountIdentifier,
    pub amount: Amount,
    pub coin_change: CoinChange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedTransaction {
    pub network_identifier: NetworkIdentifier,
    pub transaction_identifier: TransactionIdentifier,
    pub direction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_identifier: TransactionIdentifier,
    pub operations: Vec<Operation>,
    pub related_transactions: Vec<RelatedTransaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub block_identifier: BlockIdentifier,
    pub parent_block_identifier: BlockIdentifier,
    /// Daemon-reported seconds since epoch
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockResponse {
    pub block: Block,
    pub other_transactions: Vec<TransactionIdentifier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockTransactionResponse {
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MempoolResponse {
    pub transaction_identifiers: Vec<TransactionIdentifier>,
}

// =============================================================================
// Account documents
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalanceResponse {
    pub block_identifier: BlockIdentifier,
    pub balances: Vec<Amount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub coin_identifier: CoinIdentifier,
    pub amount: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCoinsResponse {
    pub block_identifier: BlockIdentifier,
    pub coins: Vec<Coin>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_identifier_embeds_chain_id_everywhere() {
        let id = NetworkIdentifier::for_chain("vrsc-main");
        assert_eq!(id.blockchain, "VRSC");
        assert_eq!(id.network, "vrsc-main");
        assert_eq!(id.sub_network_identifier.network, "vrsc-main");
    }

    #[test]
    fn test_amount_is_integer_string() {
        let amount = Amount::from_sats(500_000_000);
        assert_eq!(amount.value, "500000000");
        assert_eq!(amount.currency.symbol, "VRSC");
        assert_eq!(amount.currency.decimals, 8);
    }

    #[test]
    fn test_operation_type_field_name() {
        let op = Operation {
            operation_identifier: OperationIdentifier {
                index: 0,
                network_index: 0,
            },
            related_operations: vec![],
            operation_type: "Transfer".to_string(),
            status: "confirmed".to_string(),
            account: AccountIdentifier {
                address: "A".to_string(),
                sub_account: SubAccountIdentifier {
                    address: "B".to_string(),
                },
            },
            amount: Amount::from_sats(1),
            coin_change: CoinChange {
                coin_identifier: CoinIdentifier {
                    identifier: "tx:0".to_string(),
                },
                coin_action: "coin_spent".to_string(),
            },
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["type"], "Transfer");
        assert_eq!(json["coin_change"]["coin_action"], "coin_spent");
    }
}
