use ethers::types::U256;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::{CancelArgs, GlobalArgs, TransactionArgs};
use crate::errors::{EtherealError, EtherealResult};
use crate::transaction::submission::SubmissionSettings;
use crate::units::string_to_wei;

/// Environment variables read in place of command line flags
pub mod env_vars {
    pub const CONNECTION: &str = "ETHEREAL_CONNECTION";
    pub const TIMEOUT: &str = "ETHEREAL_TIMEOUT";
    pub const KEYSTORE: &str = "ETHEREAL_KEYSTORE";
    pub const PASSPHRASE: &str = "ETHEREAL_PASSPHRASE";
    pub const PRIVATE_KEY: &str = "ETHEREAL_PRIVATE_KEY";
    pub const TRANSACTION_LOG: &str = "ETHEREAL_TRANSACTION_LOG";
}

pub const DEFAULT_CONNECTION: &str = "http://localhost:8545";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_WAIT_LIMIT_SECS: u64 = 300;

/// Settings shared by every command, read once per invocation
#[derive(Clone)]
pub struct Config {
    pub connection: String,
    pub timeout: Duration,
    pub offline: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub keystore: Option<PathBuf>,
    pub passphrase: Option<String>,
    pub private_key: Option<String>,
    pub transaction_log: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: &GlobalArgs) -> Self {
        Self {
            connection: args.connection.clone(),
            timeout: Duration::from_secs(args.timeout),
            offline: args.offline,
            quiet: args.quiet,
            verbose: args.verbose,
            keystore: args.keystore.clone(),
            passphrase: args.passphrase.clone(),
            private_key: args.privatekey.clone(),
            transaction_log: args
                .transaction_log
                .clone()
                .or_else(default_transaction_log),
        }
    }
}

/// `~/.ethereal/transactions.log`, when the home directory is known
fn default_transaction_log() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".ethereal")
            .join("transactions.log")
    })
}

/// Settings for commands that create a transaction
#[derive(Debug, Clone)]
pub struct TransactionConfig {
    /// Gas price override in wei
    pub gas_price: Option<U256>,
    pub gas_limit: Option<u64>,
    pub nonce: Option<u64>,
    pub chain_id: Option<u64>,
    pub wait: bool,
    pub limit: Duration,
}

impl TransactionConfig {
    pub fn from_args(args: &TransactionArgs) -> EtherealResult<Self> {
        let gas_price = args
            .gasprice
            .as_deref()
            .map(|value| {
                string_to_wei(value).map_err(|reason| EtherealError::InvalidAmount {
                    value: value.to_string(),
                    reason,
                })
            })
            .transpose()?;

        Ok(Self {
            gas_price,
            gas_limit: args.gaslimit,
            nonce: args.nonce,
            chain_id: args.chainid,
            wait: args.wait,
            limit: Duration::from_secs(args.limit),
        })
    }
}

/// Everything `transaction cancel` reads, populated once from parsed arguments
#[derive(Clone)]
pub struct CancelConfig {
    pub global: Config,
    pub transaction: TransactionConfig,
    pub transaction_hash: Option<String>,
    pub amount: Option<String>,
    pub to: Option<String>,
}

impl CancelConfig {
    pub fn from_args(global: &GlobalArgs, args: &CancelArgs) -> EtherealResult<Self> {
        Ok(Self {
            global: Config::from_args(global),
            transaction: TransactionConfig::from_args(&args.tx)?,
            transaction_hash: args.transaction.clone(),
            amount: args.amount.clone(),
            to: args.to.clone(),
        })
    }

    pub fn submission_settings(&self) -> SubmissionSettings {
        SubmissionSettings {
            quiet: self.global.quiet,
            wait: self.transaction.wait,
            limit: self.transaction.limit,
            transaction_log: self.global.transaction_log.clone(),
        }
    }
}
