//! Account Resolution
//!
//! Balances and spendable coins. Values are the daemon's satoshi figures as
//! integer strings; a zero balance or an empty UTXO set is an ordinary
//! answer, not an error. Nothing is accumulated between requests.

use std::sync::Arc;

use crate::daemon::DaemonRpc;
use crate::error::{ApiError, ErrorKind, Result};
use crate::rosetta::{
    AccountBalanceResponse, AccountCoinsResponse, Amount, BlockIdentifier, Coin, CoinIdentifier,
};

pub struct AccountResolver {
    daemon: Arc<dyn DaemonRpc>,
}

impl AccountResolver {
    pub fn new(daemon: Arc<dyn DaemonRpc>) -> Self {
        Self { daemon }
    }

    /// Balance at the requested block height. The daemon tracks only the
    /// current balance; the block lookup anchors the answer to an identifier
    /// the client can compare against.
    pub async fn balance(&self, address: &str, block_index: u64) -> Result<AccountBalanceResponse> {
        let balance = self
            .daemon
            .get_address_balance(address)
            .await
            .map_err(|e| ApiError::new(ErrorKind::BalanceInfo, e.to_string()))?;

        let block = self
            .daemon
            .get_block(&block_index.to_string())
            .await
            .map_err(|e| ApiError::new(ErrorKind::BalanceInfo, e.to_string()))?;

        Ok(AccountBalanceResponse {
            block_identifier: BlockIdentifier {
                index: block.height,
                hash: block.hash,
            },
            balances: vec![Amount::from_sats(balance.balance)],
        })
    }

    /// Spendable coins, one per UTXO, identified as `txid:vout`. The block
    /// identifier is the highest UTXO height, or the chain tip when the
    /// address holds nothing.
    pub async fn coins(&self, address: &str) -> Result<AccountCoinsResponse> {
        let utxos = self
            .daemon
            .get_address_utxos(address)
            .await
            .map_err(|e| ApiError::new(ErrorKind::UtxoInfo, e.to_string()))?;

        let block_identifier = match utxos.iter().map(|u| u.height).max() {
            Some(height) => {
                let hash = self
                    .daemon
                    .get_block_hash(height)
                    .await
                    .map_err(|e| ApiError::new(ErrorKind::UtxoInfo, e.to_string()))?;
                BlockIdentifier {
                    index: height,
                    hash,
                }
            }
            None => {
                let hash = self
                    .daemon
                    .get_best_block_hash()
                    .await
                    .map_err(|e| ApiError::new(ErrorKind::UtxoInfo, e.to_string()))?;
                let block = self
                    .daemon
                    .get_block(&hash)
                    .await
                    .map_err(|e| ApiError::new(ErrorKind::UtxoInfo, e.to_string()))?;
                BlockIdentifier {
                    index: block.height,
                    hash: block.hash,
                }
            }
        };

        let coins = utxos
            .into_iter()
            .map(|u| Coin {
                coin_identifier: CoinIdentifier {
                    identifier: format!("{}:{}", u.txid, u.output_index),
                },
                amount: Amount::from_sats(u.satoshis),
            })
            .collect();

        Ok(AccountCoinsResponse {
            block_identifier,
            coins,
        })
    }
}
