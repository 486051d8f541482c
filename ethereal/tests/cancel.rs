//! End-to-end runs of `transaction cancel` against a scripted node

use async_trait::async_trait;
use clap::Parser;
use ethers::types::{Address, Bytes, H256, Transaction, U256};
use ethers::utils::keccak256;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ethereal::cli::{Cli, Command, TransactionCommands};
use ethereal::commands::transaction_cancel::{self, CommandOutcome};
use ethereal::config::CancelConfig;
use ethereal::errors::EtherealError;
use ethereal::rpc::{ChainClient, TransactionLookup};
use ethereal::wallet::{PrivateKeyWalletProvider, WalletProvider, WalletResolver};

// Hardhat account #0 (DO NOT USE IN PRODUCTION)
const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const OLD_HASH: &str = "0x454d2274155cce506359de6358785ce5366f6c13e825263674c272eec8532c0c";

struct Node {
    from: Address,
    gas_price: U256,
    sent: Mutex<Vec<Bytes>>,
}

impl Node {
    fn new(from: Address, gas_price: u64) -> Self {
        Self {
            from,
            gas_price: U256::from(gas_price),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChainClient for Node {
    async fn transaction_by_hash(&self, hash: H256) -> Result<Option<TransactionLookup>, String> {
        Ok(Some(TransactionLookup {
            transaction: Transaction {
                hash,
                from: self.from,
                nonce: U256::from(9u64),
                gas_price: Some(self.gas_price),
                ..Default::default()
            },
            pending: true,
        }))
    }

    async fn sender_of(&self, transaction: &Transaction) -> Result<Address, String> {
        Ok(transaction.from)
    }

    async fn chain_id(&self) -> Result<u64, String> {
        Ok(1337)
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, String> {
        let hash = H256::from(keccak256(raw.as_ref()));
        self.sent.lock().unwrap().push(raw);
        Ok(hash)
    }

    async fn wait_for_mined(&self, _hash: H256, _limit: Duration) -> Result<bool, String> {
        Ok(false)
    }
}

struct KeyWallets;

impl WalletResolver for KeyWallets {
    fn wallet_for(&self, address: Address) -> Result<Arc<dyn WalletProvider>, String> {
        let provider = PrivateKeyWalletProvider::from_private_key(TEST_KEY)?;
        if provider.address() != address {
            return Err(format!("no key for {:?}", address));
        }
        Ok(Arc::new(provider))
    }
}

fn sender() -> Address {
    PrivateKeyWalletProvider::from_private_key(TEST_KEY)
        .unwrap()
        .address()
}

fn config(extra: &[&str]) -> CancelConfig {
    let mut args = vec![
        "ethereal",
        "transaction",
        "cancel",
        "--transaction",
        OLD_HASH,
    ];
    args.extend_from_slice(extra);
    let cli = Cli::try_parse_from(args).unwrap();
    let Command::Transaction(TransactionCommands::Cancel(cancel)) = &cli.command;
    let mut config = CancelConfig::from_args(&cli.global, cancel).unwrap();
    config.global.transaction_log = None;
    config
}

#[tokio::test]
async fn offline_cancel_prints_signed_replacement() {
    let node = Node::new(sender(), 20_000_000_000);
    let mut out = Vec::new();

    let outcome = transaction_cancel::run(&config(&["--offline"]), &node, &KeyWallets, &mut out)
        .await
        .unwrap();

    assert_eq!(outcome, CommandOutcome::Offline);
    assert_eq!(outcome.exit_code(), 0);
    assert!(node.sent.lock().unwrap().is_empty());

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("0x"));
    assert!(hex::decode(&lines[0][2..]).is_ok());
}

#[tokio::test]
async fn underpriced_override_is_rejected() {
    let node = Node::new(sender(), 20_000_000_000);
    let mut out = Vec::new();

    let err = transaction_cancel::run(
        &config(&["--offline", "--gasprice", "22gwei"]),
        &node,
        &KeyWallets,
        &mut out,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, EtherealError::GasPriceTooLow { .. }), "got: {}", err);
    assert_eq!(err.to_string(), "Gas price must be at least 22.000000001 GWei");
    assert_eq!(err.error_code(), 1);
}

#[tokio::test]
async fn online_cancel_not_mined_exits_2() {
    let node = Node::new(sender(), 1000);
    let mut out = Vec::new();

    let outcome = transaction_cancel::run(&config(&["--wait", "--limit", "1"]), &node, &KeyWallets, &mut out)
        .await
        .unwrap();

    assert_eq!(outcome.exit_code(), 2);
    let sent = node.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], format!("{:?}", H256::from(keccak256(sent[0].as_ref()))));
    assert_eq!(lines[1], "Transaction submitted but not mined");
}

#[tokio::test]
async fn sender_without_key_fails() {
    let node = Node::new(Address::from_low_u64_be(0x1234), 1000);
    let mut out = Vec::new();

    let err = transaction_cancel::run(&config(&["--offline"]), &node, &KeyWallets, &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, EtherealError::Wallet(_)), "got: {}", err);
    assert!(out.is_empty());
}
