//! JSON-RPC client backed by an `ethers` HTTP provider

use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{Address, Bytes, H256, Transaction, U256};
use std::time::Duration;
use tokio::time::Instant;

use super::{ChainClient, TransactionLookup};

/// Interval between receipt polls while waiting for a transaction to be mined
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub struct ProviderClient {
    provider: Provider<Http>,
    poll_interval: Duration,
}

impl ProviderClient {
    pub fn connect(url: &str) -> Result<Self, String> {
        let provider = Provider::<Http>::try_from(url)
            .map_err(|e| format!("Invalid connection URL {}: {}", url, e))?;

        log::debug!("[rpc] Using node at {}", url);

        Ok(Self {
            provider,
            poll_interval: RECEIPT_POLL_INTERVAL,
        })
    }

    #[cfg(test)]
    fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

#[async_trait]
impl ChainClient for ProviderClient {
    async fn transaction_by_hash(&self, hash: H256) -> Result<Option<TransactionLookup>, String> {
        let transaction = self
            .provider
            .get_transaction(hash)
            .await
            .map_err(|e| e.to_string())?;

        Ok(transaction.map(|transaction| TransactionLookup {
            pending: transaction.block_number.is_none(),
            transaction,
        }))
    }

    async fn sender_of(&self, transaction: &Transaction) -> Result<Address, String> {
        // The node reports the sender it recovered when accepting the transaction
        if !transaction.from.is_zero() {
            return Ok(transaction.from);
        }
        transaction
            .recover_from()
            .map_err(|e| format!("cannot recover sender of {:?}: {}", transaction.hash, e))
    }

    async fn chain_id(&self) -> Result<u64, String> {
        let chain_id = self
            .provider
            .get_chainid()
            .await
            .map_err(|e| e.to_string())?;

        if chain_id > U256::from(u64::MAX) {
            return Err(format!("chain ID {} out of range", chain_id));
        }
        Ok(chain_id.as_u64())
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, String> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(|e| e.to_string())?;

        let hash = pending.tx_hash();
        log::info!("[rpc] Transaction sent: {:?}", hash);
        Ok(hash)
    }

    async fn wait_for_mined(&self, hash: H256, limit: Duration) -> Result<bool, String> {
        let deadline = Instant::now() + limit;

        loop {
            match self.provider.get_transaction_receipt(hash).await {
                Ok(Some(receipt)) => {
                    log::info!(
                        "[rpc] Transaction {:?} mined in block {:?}",
                        hash,
                        receipt.block_number
                    );
                    return Ok(true);
                }
                Ok(None) => {}
                Err(e) => log::warn!("[rpc] Receipt lookup for {:?} failed: {}", hash, e),
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }
}
