//! Node access
//!
//! Commands reach the network only through [`ChainClient`], so tests can
//! replace the node with a fake. Every blocking call is wrapped in
//! [`bounded`], which drops the call once its time limit passes.

mod provider;

pub use provider::ProviderClient;

use async_trait::async_trait;
use ethers::types::{Address, Bytes, H256, Transaction};
use std::future::Future;
use std::time::Duration;

use crate::errors::{EtherealError, EtherealResult};

/// A transaction as returned by the node
#[derive(Debug, Clone)]
pub struct TransactionLookup {
    pub transaction: Transaction,
    /// True until the transaction is included in a block
    pub pending: bool,
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fetch a transaction; `None` if the node does not know the hash
    async fn transaction_by_hash(&self, hash: H256) -> Result<Option<TransactionLookup>, String>;

    /// Address that signed a transaction
    async fn sender_of(&self, transaction: &Transaction) -> Result<Address, String>;

    async fn chain_id(&self) -> Result<u64, String>;

    /// Broadcast a signed, RLP-encoded transaction and return its hash
    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, String>;

    /// Poll until the transaction has a receipt; `false` if `limit` passes first
    async fn wait_for_mined(&self, hash: H256, limit: Duration) -> Result<bool, String>;
}

/// Run `future` with a time limit; the future is dropped (cancelled) when the
/// limit passes or when the returned future itself is dropped
pub async fn bounded<T, F>(operation: &'static str, limit: Duration, future: F) -> EtherealResult<T>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(limit, future).await.map_err(|_| {
        log::warn!("[rpc] {} timed out after {:?}", operation, limit);
        EtherealError::Timeout { operation, limit }
    })
}
