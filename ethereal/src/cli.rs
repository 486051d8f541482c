//! Command line surface
//!
//! `ethereal <group> <command> [flags]`. Global flags can also be supplied
//! through `ETHEREAL_*` environment variables (or a `.env` file).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_CONNECTION, DEFAULT_TIMEOUT_SECS, DEFAULT_WAIT_LIMIT_SECS, env_vars};

const CANCEL_LONG_ABOUT: &str = "Cancel a pending transaction.  For example:

    ethereal transaction cancel --transaction=0x454d2274155cce506359de6358785ce5366f6c13e825263674c272eec8532c0c

Ethereum cannot remove a pending transaction, so this replaces it with a 0-value transfer from the sender back to itself using the same nonce.  The replacement still needs to be mined, so choose an appropriate gas price.  If not supplied the gas price defaults to just over 10% higher than the gas price of the transaction being cancelled.

The cancellation transaction costs 21000 gas.

Exit status is 0 if the transaction is submitted (and mined if --wait is supplied), 1 if the transaction is not submitted, and 2 if the transaction is submitted but not mined within the --limit time.";

#[derive(Parser, Debug)]
#[command(name = "ethereal", version, about = "Ethereum command line tool")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// JSON-RPC endpoint of the Ethereum node
    #[arg(long, global = true, env = env_vars::CONNECTION, default_value = DEFAULT_CONNECTION)]
    pub connection: String,

    /// Seconds to allow each network operation before giving up
    #[arg(long, global = true, env = env_vars::TIMEOUT, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Create the transaction but do not send it; print the signed transaction instead
    #[arg(long, global = true)]
    pub offline: bool,

    /// Suppress all output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log debug output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Directory holding encrypted keystore files
    #[arg(long, global = true, env = env_vars::KEYSTORE)]
    pub keystore: Option<PathBuf>,

    /// Passphrase to unlock the keystore file of the sending account
    #[arg(long, global = true, env = env_vars::PASSPHRASE, hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Private key of the sending account (hex, with or without 0x)
    #[arg(long, global = true, env = env_vars::PRIVATE_KEY, hide_env_values = true)]
    pub privatekey: Option<String>,

    /// File to which submitted transactions are appended
    #[arg(long = "transaction-log", global = true, env = env_vars::TRANSACTION_LOG)]
    pub transaction_log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage transactions
    #[command(subcommand)]
    Transaction(TransactionCommands),
}

#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Cancel a pending transaction
    #[command(long_about = CANCEL_LONG_ABOUT)]
    Cancel(CancelArgs),
}

/// Flags shared by commands that create a transaction
#[derive(Args, Debug, Clone)]
pub struct TransactionArgs {
    /// Gas price for the transaction (e.g. 20gwei)
    #[arg(long)]
    pub gasprice: Option<String>,

    /// Gas limit for the transaction
    #[arg(long)]
    pub gaslimit: Option<u64>,

    /// Nonce for the transaction
    #[arg(long)]
    pub nonce: Option<u64>,

    /// Chain ID used to sign the transaction (obtained from the node if not supplied)
    #[arg(long)]
    pub chainid: Option<u64>,

    /// Wait for the transaction to be mined before returning
    #[arg(long)]
    pub wait: bool,

    /// Seconds to wait for the transaction to be mined
    #[arg(long, default_value_t = DEFAULT_WAIT_LIMIT_SECS)]
    pub limit: u64,
}

#[derive(Args, Debug, Clone)]
pub struct CancelArgs {
    /// Hash of the pending transaction to cancel
    // Optional so a missing hash is reported as a command failure (exit 1)
    // rather than a usage error.
    #[arg(long)]
    pub transaction: Option<String>,

    #[command(flatten)]
    pub tx: TransactionArgs,

    /// Amount of Ether to transfer
    #[arg(long)]
    pub amount: Option<String>,

    /// Address to which to transfer Ether
    #[arg(long)]
    pub to: Option<String>,
}
