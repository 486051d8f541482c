//! Transaction log
//!
//! Every submitted transaction is appended to a local file as one JSON object
//! per line, so a user can later find the hash and nonce of what they sent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use super::SignedTransaction;

/// One submitted transaction, as written to the transaction log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLogEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "transactionid")]
    pub transaction_id: String,
    pub from: String,
    /// Empty for contract creation
    pub to: String,
    /// Amounts as decimal strings to handle large numbers
    pub nonce: String,
    pub gas: String,
    #[serde(rename = "gasprice")]
    pub gas_price: String,
    pub value: String,
    /// Command-specific fields (group, command, ...)
    #[serde(flatten)]
    pub metadata: BTreeMap<String, String>,
}

impl TransactionLogEntry {
    pub fn new(signed: &SignedTransaction, metadata: BTreeMap<String, String>) -> Self {
        Self {
            timestamp: Utc::now(),
            transaction_id: format!("{:?}", signed.hash()),
            from: format!("{:?}", signed.from()),
            to: signed.to().map(|to| format!("{:?}", to)).unwrap_or_default(),
            nonce: signed.nonce().to_string(),
            gas: signed.gas_limit().to_string(),
            gas_price: signed.gas_price().to_string(),
            value: signed.value().to_string(),
            metadata,
        }
    }
}

/// Append `entry` to the log at `path`, creating the file and its directory
/// if needed
pub fn append(path: &Path, entry: &TransactionLogEntry) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Cannot create {}: {}", parent.display(), e))?;
        }
    }

    let line = serde_json::to_string(entry)
        .map_err(|e| format!("Cannot serialize log entry: {}", e))?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Cannot open {}: {}", path.display(), e))?;
    writeln!(file, "{}", line).map_err(|e| format!("Cannot write {}: {}", path.display(), e))
}
