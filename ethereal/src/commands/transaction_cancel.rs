//! `ethereal transaction cancel`
//!
//! A pending transaction cannot be removed from the network, only replaced.
//! This command replaces it with a 0-value transfer from the sender to itself
//! that reuses the nonce, priced high enough for nodes to accept the
//! replacement.

use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, H256, Transaction, U256};
use std::collections::BTreeMap;
use std::io::Write;
use std::str::FromStr;

use crate::config::CancelConfig;
use crate::errors::{EXIT_SUCCESS, EtherealError, EtherealResult};
use crate::rpc::{ChainClient, bounded};
use crate::transaction::submission::{SubmissionOutcome, handle_submitted_transaction};
use crate::transaction::{TRANSFER_GAS_LIMIT, TransactionParams, create_signed_transaction};
use crate::units::wei_to_string;
use crate::wallet::WalletResolver;

pub const CANCEL_GAS_LIMIT: u64 = TRANSFER_GAS_LIMIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Signed and printed, not broadcast
    Offline,
    Submitted(SubmissionOutcome),
}

impl CommandOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandOutcome::Offline => EXIT_SUCCESS,
            CommandOutcome::Submitted(outcome) => outcome.exit_code(),
        }
    }
}

/// Lowest gas price a node will accept for the replacement: just over 10%
/// above the original
pub fn minimum_gas_price(original: U256) -> U256 {
    original
        .saturating_add(original / 10)
        .saturating_add(U256::one())
}

/// The user's gas price if it beats the minimum, otherwise the minimum
pub fn select_gas_price(original: U256, requested: Option<U256>) -> EtherealResult<U256> {
    let minimum = minimum_gas_price(original);
    match requested {
        None => Ok(minimum),
        Some(price) if price > minimum => Ok(price),
        Some(price) => {
            log::debug!(
                "[transaction cancel] Requested gas price {} does not exceed minimum {}",
                price,
                minimum
            );
            Err(EtherealError::GasPriceTooLow {
                minimum: wei_to_string(minimum, true),
            })
        }
    }
}

/// Gas price the original transaction bid; the fee cap for dynamic-fee
/// transactions
pub fn original_gas_price(transaction: &Transaction) -> U256 {
    transaction
        .max_fee_per_gas
        .or(transaction.gas_price)
        .unwrap_or_default()
}

pub fn cancellation_params(
    sender: Address,
    nonce: U256,
    gas_price: U256,
    chain_id: u64,
) -> TransactionParams {
    TransactionParams {
        from: sender,
        to: sender,
        value: U256::zero(),
        data: Bytes::default(),
        gas_limit: CANCEL_GAS_LIMIT,
        gas_price,
        nonce,
        chain_id,
    }
}

pub fn cancellation_request(
    sender: Address,
    nonce: U256,
    gas_price: U256,
    chain_id: u64,
) -> TypedTransaction {
    cancellation_params(sender, nonce, gas_price, chain_id).build()
}

pub fn parse_transaction_hash(value: Option<&str>) -> EtherealResult<H256> {
    let value = value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(EtherealError::MissingTransaction)?;

    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.len() != 64 {
        return Err(EtherealError::InvalidTransactionHash(value.to_string()));
    }
    H256::from_str(digits).map_err(|_| EtherealError::InvalidTransactionHash(value.to_string()))
}

/// Flags shared with other transaction commands that have no effect on a
/// cancellation
pub fn warn_ignored_flags(config: &CancelConfig) -> Vec<&'static str> {
    let mut ignored = Vec::new();
    if config.transaction.nonce.is_some() {
        ignored.push("--nonce");
    }
    if config
        .transaction
        .gas_limit
        .is_some_and(|limit| limit != CANCEL_GAS_LIMIT)
    {
        ignored.push("--gaslimit");
    }
    // TODO: decide whether --amount and --to should turn the cancellation
    // into a transfer; until then the replacement is always 0 to self
    if config.amount.is_some() {
        ignored.push("--amount");
    }
    if config.to.is_some() {
        ignored.push("--to");
    }

    for flag in &ignored {
        log::warn!("[transaction cancel] {} does not apply to a cancellation; ignoring", flag);
    }
    ignored
}

/// Cancel the transaction named in `config`
///
/// Offline, the signed replacement is written to `out`. Online it is
/// broadcast and handed to the submission handler, which reports the hash
/// and waits for it to be mined if `--wait` was given.
pub async fn run<W: Write>(
    config: &CancelConfig,
    client: &dyn ChainClient,
    wallets: &dyn WalletResolver,
    out: &mut W,
) -> EtherealResult<CommandOutcome> {
    let hash = parse_transaction_hash(config.transaction_hash.as_deref())?;
    warn_ignored_flags(config);

    let timeout = config.global.timeout;

    // Obtain the original transaction
    let (original, chain_id) = bounded("Transaction lookup", timeout, async {
        let lookup = client
            .transaction_by_hash(hash)
            .await
            .map_err(|message| EtherealError::Lookup { hash, message })?
            .ok_or(EtherealError::TransactionNotFound(hash))?;

        if !lookup.pending {
            return Err(EtherealError::AlreadyMined(hash));
        }

        let chain_id = match config.transaction.chain_id {
            Some(chain_id) => chain_id,
            None => client.chain_id().await.map_err(EtherealError::ChainId)?,
        };

        Ok::<_, EtherealError>((lookup.transaction, chain_id))
    })
    .await??;

    let gas_price = select_gas_price(original_gas_price(&original), config.transaction.gas_price)?;

    let sender = client
        .sender_of(&original)
        .await
        .map_err(EtherealError::Sender)?;

    log::info!(
        "[transaction cancel] Replacing {:?} from {:?}: nonce={}, gas_price={}",
        hash,
        sender,
        original.nonce,
        wei_to_string(gas_price, true)
    );

    let params = cancellation_params(sender, original.nonce, gas_price, chain_id);
    let wallet = wallets.wallet_for(sender).map_err(EtherealError::Wallet)?;
    let signed = create_signed_transaction(wallet.as_ref(), &params)
        .await
        .map_err(EtherealError::Signing)?;

    if config.global.offline {
        if !config.global.quiet {
            writeln!(out, "{}", signed.raw_hex())?;
            out.flush()?;
        }
        return Ok(CommandOutcome::Offline);
    }

    let sent = bounded(
        "Transaction broadcast",
        timeout,
        client.send_raw_transaction(signed.raw()),
    )
    .await?
    .map_err(EtherealError::Broadcast)?;

    if sent != signed.hash() {
        log::warn!(
            "[transaction cancel] Node reported hash {:?}, expected {:?}",
            sent,
            signed.hash()
        );
    }

    let metadata = BTreeMap::from([
        ("group".to_string(), "transaction".to_string()),
        ("command".to_string(), "cancel".to_string()),
        ("oldtransactionid".to_string(), format!("{:?}", hash)),
    ]);

    let outcome = handle_submitted_transaction(
        client,
        &signed,
        metadata,
        true,
        &config.submission_settings(),
        out,
    )
    .await;

    Ok(CommandOutcome::Submitted(outcome))
}
