//! Handling of a transaction once it has been broadcast

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use super::SignedTransaction;
use super::history::{self, TransactionLogEntry};
use crate::errors::{EXIT_NOT_MINED, EXIT_SUCCESS};
use crate::rpc::ChainClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSettings {
    pub quiet: bool,
    /// `--wait`
    pub wait: bool,
    /// How long to wait for the transaction to be mined
    pub limit: Duration,
    pub transaction_log: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Broadcast; not waited on
    Submitted,
    Mined,
    /// Broadcast but not mined before the wait limit
    NotMined,
}

impl SubmissionOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            SubmissionOutcome::Submitted | SubmissionOutcome::Mined => EXIT_SUCCESS,
            SubmissionOutcome::NotMined => EXIT_NOT_MINED,
        }
    }
}

/// Record, report and optionally wait for a transaction that has just been
/// broadcast
///
/// Waiting happens only when the command asks for it (`wait_for_mined`) and
/// the user passed `--wait`.
pub async fn handle_submitted_transaction<W: Write>(
    client: &dyn ChainClient,
    signed: &SignedTransaction,
    metadata: BTreeMap<String, String>,
    wait_for_mined: bool,
    settings: &SubmissionSettings,
    out: &mut W,
) -> SubmissionOutcome {
    let hash = signed.hash();
    log::info!(
        "[submission] Transaction {:?} submitted: nonce={}, gas_price={}, metadata={:?}",
        hash,
        signed.nonce(),
        signed.gas_price(),
        metadata
    );

    if let Some(path) = &settings.transaction_log {
        let entry = TransactionLogEntry::new(signed, metadata);
        if let Err(e) = history::append(path, &entry) {
            log::warn!("[submission] Failed to write transaction log: {}", e);
        }
    }

    report(out, settings.quiet, &format!("{:?}", hash));

    if !(wait_for_mined && settings.wait) {
        return SubmissionOutcome::Submitted;
    }

    let mined = match client.wait_for_mined(hash, settings.limit).await {
        Ok(mined) => mined,
        Err(e) => {
            log::warn!("[submission] Failed to check whether {:?} was mined: {}", hash, e);
            false
        }
    };

    if mined {
        report(out, settings.quiet, "Transaction mined");
        SubmissionOutcome::Mined
    } else {
        report(out, settings.quiet, "Transaction submitted but not mined");
        SubmissionOutcome::NotMined
    }
}

/// Write one line unless quiet; failures are logged, never returned
fn report<W: Write>(out: &mut W, quiet: bool, line: &str) {
    if quiet {
        return;
    }
    if let Err(e) = writeln!(out, "{}", line).and_then(|()| out.flush()) {
        log::warn!("[submission] Failed to write \"{}\": {}", line, e);
    }
}
