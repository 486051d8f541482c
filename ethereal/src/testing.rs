//! Test doubles for the node and the wallet

use async_trait::async_trait;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, H256, Signature, Transaction, U64, U256};
use ethers::utils::keccak256;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::rpc::{ChainClient, TransactionLookup};
use crate::wallet::{PrivateKeyWalletProvider, WalletProvider, WalletResolver};

// Hardhat account #0 (DO NOT USE IN PRODUCTION)
pub const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

pub fn test_address() -> Address {
    Address::from_str(TEST_ADDRESS).unwrap()
}

pub fn test_wallet() -> Arc<dyn WalletProvider> {
    Arc::new(PrivateKeyWalletProvider::from_private_key(TEST_KEY).unwrap())
}

pub fn old_hash() -> H256 {
    H256::from_low_u64_be(0xcafe)
}

/// A transaction from the test account as the node would report it
pub fn node_transaction(gas_price: u64, nonce: u64) -> Transaction {
    Transaction {
        hash: old_hash(),
        from: test_address(),
        to: Some(Address::from_low_u64_be(0xbeef)),
        nonce: U256::from(nonce),
        gas_price: Some(U256::from(gas_price)),
        gas: U256::from(50_000u64),
        value: U256::from(1_000u64),
        ..Default::default()
    }
}

pub fn pending_lookup(gas_price: u64, nonce: u64) -> TransactionLookup {
    TransactionLookup {
        transaction: node_transaction(gas_price, nonce),
        pending: true,
    }
}

pub fn mined_lookup(gas_price: u64, nonce: u64) -> TransactionLookup {
    let mut transaction = node_transaction(gas_price, nonce);
    transaction.block_number = Some(U64::from(100u64));
    TransactionLookup {
        transaction,
        pending: false,
    }
}

/// Scripted node that records what is sent to it
pub struct FakeChainClient {
    lookup: Result<Option<TransactionLookup>, String>,
    lookup_delay: Option<Duration>,
    sender: Option<Result<Address, String>>,
    chain_id: Result<u64, String>,
    send_error: Option<String>,
    send_delay: Option<Duration>,
    mined: Result<bool, String>,
    broadcasts: Mutex<Vec<Bytes>>,
    chain_id_calls: AtomicUsize,
    wait_calls: AtomicUsize,
}

impl FakeChainClient {
    pub fn new() -> Self {
        Self {
            lookup: Ok(None),
            lookup_delay: None,
            sender: None,
            chain_id: Ok(1),
            send_error: None,
            send_delay: None,
            mined: Ok(true),
            broadcasts: Mutex::new(Vec::new()),
            chain_id_calls: AtomicUsize::new(0),
            wait_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_lookup(mut self, lookup: TransactionLookup) -> Self {
        self.lookup = Ok(Some(lookup));
        self
    }

    pub fn with_lookup_error(mut self, message: &str) -> Self {
        self.lookup = Err(message.to_string());
        self
    }

    pub fn with_lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = Some(delay);
        self
    }

    /// Overrides the `from` reported with the transaction
    pub fn with_sender(mut self, sender: Result<Address, String>) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn with_chain_id(mut self, chain_id: Result<u64, String>) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_send_error(mut self, message: &str) -> Self {
        self.send_error = Some(message.to_string());
        self
    }

    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = Some(delay);
        self
    }

    pub fn with_mined(mut self, mined: bool) -> Self {
        self.mined = Ok(mined);
        self
    }

    pub fn with_wait_error(mut self, message: &str) -> Self {
        self.mined = Err(message.to_string());
        self
    }

    pub fn broadcasts(&self) -> Vec<Bytes> {
        self.broadcasts.lock().unwrap().clone()
    }

    pub fn chain_id_calls(&self) -> usize {
        self.chain_id_calls.load(Ordering::SeqCst)
    }

    pub fn wait_calls(&self) -> usize {
        self.wait_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainClient for FakeChainClient {
    async fn transaction_by_hash(&self, _hash: H256) -> Result<Option<TransactionLookup>, String> {
        if let Some(delay) = self.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        self.lookup.clone()
    }

    async fn sender_of(&self, transaction: &Transaction) -> Result<Address, String> {
        match &self.sender {
            Some(sender) => sender.clone(),
            None => Ok(transaction.from),
        }
    }

    async fn chain_id(&self) -> Result<u64, String> {
        self.chain_id_calls.fetch_add(1, Ordering::SeqCst);
        self.chain_id.clone()
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, String> {
        if let Some(delay) = self.send_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.send_error {
            return Err(message.clone());
        }
        let hash = H256::from(keccak256(raw.as_ref()));
        self.broadcasts.lock().unwrap().push(raw);
        Ok(hash)
    }

    async fn wait_for_mined(&self, _hash: H256, _limit: Duration) -> Result<bool, String> {
        self.wait_calls.fetch_add(1, Ordering::SeqCst);
        self.mined.clone()
    }
}

/// Wallet that counts the transactions it signs
pub struct CountingWallet {
    inner: PrivateKeyWalletProvider,
    signed: Arc<AtomicUsize>,
}

#[async_trait]
impl WalletProvider for CountingWallet {
    fn address(&self) -> Address {
        self.inner.address()
    }

    async fn sign_transaction(&self, tx: &TypedTransaction) -> Result<Signature, String> {
        self.signed.fetch_add(1, Ordering::SeqCst);
        self.inner.sign_transaction(tx).await
    }

    fn mode_name(&self) -> &'static str {
        "counting"
    }
}

/// Resolves only the test account
pub struct TestWallets {
    signed: Arc<AtomicUsize>,
}

impl TestWallets {
    pub fn new() -> Self {
        Self {
            signed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn signed(&self) -> usize {
        self.signed.load(Ordering::SeqCst)
    }
}

impl WalletResolver for TestWallets {
    fn wallet_for(&self, address: Address) -> Result<Arc<dyn WalletProvider>, String> {
        if address != test_address() {
            return Err(format!("no key for {:?}", address));
        }
        Ok(Arc::new(CountingWallet {
            inner: PrivateKeyWalletProvider::from_private_key(TEST_KEY)?,
            signed: Arc::clone(&self.signed),
        }))
    }
}
