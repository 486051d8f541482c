//! Command errors
//!
//! Every failure of a command is terminal. Each variant carries the message
//! shown to the user; `error_code()` gives the process exit status.

use ethers::types::H256;
use std::time::Duration;
use thiserror::Error;

/// Exit status for a command that completed (and was mined, if waited on)
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for a command that failed before or during submission
pub const EXIT_FAILURE: i32 = 1;
/// Exit status for a transaction that was submitted but not mined in time
pub const EXIT_NOT_MINED: i32 = 2;

#[derive(Debug, Error)]
pub enum EtherealError {
    #[error("--transaction is required")]
    MissingTransaction,

    #[error("Invalid transaction hash {0}")]
    InvalidTransactionHash(String),

    #[error("Invalid amount {value}: {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to obtain transaction {hash:?}: {message}")]
    Lookup { hash: H256, message: String },

    #[error("Transaction {0:?} not found")]
    TransactionNotFound(H256),

    #[error("Transaction {0:?} has already been mined")]
    AlreadyMined(H256),

    #[error("Gas price must be at least {minimum}")]
    GasPriceTooLow { minimum: String },

    #[error("Failed to obtain from address: {0}")]
    Sender(String),

    #[error("Failed to obtain chain ID: {0}")]
    ChainId(String),

    #[error("Failed to access wallet: {0}")]
    Wallet(String),

    #[error("Failed to create transaction: {0}")]
    Signing(String),

    #[error("Failed to send transaction: {0}")]
    Broadcast(String),

    #[error("{operation} timed out after {}s", .limit.as_secs())]
    Timeout {
        operation: &'static str,
        limit: Duration,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl EtherealError {
    /// Process exit status for this error
    #[must_use]
    pub fn error_code(&self) -> i32 {
        // A transaction that was submitted but never mined is reported through
        // `SubmissionOutcome::NotMined`, never as an error.
        EXIT_FAILURE
    }
}

pub type EtherealResult<T> = Result<T, EtherealError>;
