//! Transaction construction and signing
//!
//! Commands describe the transaction they want with [`TransactionParams`];
//! [`create_signed_transaction`] builds it as an EIP-155 legacy transaction
//! and has the sender's wallet sign it.

pub mod history;
pub mod submission;

use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, H256, Signature, TransactionRequest, U256};

use crate::wallet::WalletProvider;

/// Gas used by a plain value transfer
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionParams {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub gas_limit: u64,
    pub gas_price: U256,
    pub nonce: U256,
    pub chain_id: u64,
}

impl TransactionParams {
    pub fn build(&self) -> TypedTransaction {
        TransactionRequest::new()
            .from(self.from)
            .to(self.to)
            .value(self.value)
            .data(self.data.clone())
            .gas(self.gas_limit)
            .gas_price(self.gas_price)
            .nonce(self.nonce)
            .chain_id(self.chain_id)
            .into()
    }
}

/// A transaction together with its signature; immutable once created
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    tx: TypedTransaction,
    signature: Signature,
}

impl SignedTransaction {
    pub fn new(tx: TypedTransaction, signature: Signature) -> Self {
        Self { tx, signature }
    }

    pub fn transaction(&self) -> &TypedTransaction {
        &self.tx
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// RLP encoding of the signed transaction, as broadcast to the network
    pub fn raw(&self) -> Bytes {
        self.tx.rlp_signed(&self.signature)
    }

    /// `0x`-prefixed hex of [`raw`](Self::raw)
    pub fn raw_hex(&self) -> String {
        format!("0x{}", hex::encode(self.raw()))
    }

    pub fn hash(&self) -> H256 {
        self.tx.hash(&self.signature)
    }

    pub fn from(&self) -> Address {
        self.tx.from().copied().unwrap_or_default()
    }

    pub fn to(&self) -> Option<Address> {
        self.tx.to_addr().copied()
    }

    pub fn nonce(&self) -> U256 {
        self.tx.nonce().copied().unwrap_or_default()
    }

    pub fn gas_limit(&self) -> U256 {
        self.tx.gas().copied().unwrap_or_default()
    }

    pub fn gas_price(&self) -> U256 {
        self.tx.gas_price().unwrap_or_default()
    }

    pub fn value(&self) -> U256 {
        self.tx.value().copied().unwrap_or_default()
    }
}

/// Build the transaction described by `params` and sign it with `wallet`
///
/// The wallet must hold the key of `params.from`.
pub async fn create_signed_transaction(
    wallet: &dyn WalletProvider,
    params: &TransactionParams,
) -> Result<SignedTransaction, String> {
    if wallet.address() != params.from {
        return Err(format!(
            "wallet for {:?} cannot sign for {:?}",
            wallet.address(),
            params.from
        ));
    }

    let tx = params.build();
    let signature = wallet.sign_transaction(&tx).await?;

    log::debug!(
        "[transaction] Signed with {} wallet: nonce={}, gas={}, gas_price={}",
        wallet.mode_name(),
        params.nonce,
        params.gas_limit,
        params.gas_price
    );

    Ok(SignedTransaction::new(tx, signature))
}
