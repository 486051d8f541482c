//! Private-key Wallet Provider
//!
//! Holds a key supplied directly on the command line or through
//! ETHEREAL_PRIVATE_KEY.

use async_trait::async_trait;
use ethers::core::k256::ecdsa::SigningKey;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Signature};

use super::WalletProvider;

pub struct PrivateKeyWalletProvider {
    wallet: LocalWallet,
}

impl PrivateKeyWalletProvider {
    /// Create provider from a private key string
    pub fn from_private_key(private_key: &str) -> Result<Self, String> {
        let key_hex = private_key.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let key_bytes = hex::decode(key_hex)
            .map_err(|e| format!("Invalid private key hex: {}", e))?;

        let signing_key = SigningKey::from_slice(&key_bytes)
            .map_err(|e| format!("Invalid private key: {}", e))?;

        Ok(Self::from_wallet(LocalWallet::from(signing_key)))
    }

    pub fn from_wallet(wallet: LocalWallet) -> Self {
        Self { wallet }
    }
}

#[async_trait]
impl WalletProvider for PrivateKeyWalletProvider {
    fn address(&self) -> Address {
        self.wallet.address()
    }

    async fn sign_transaction(&self, tx: &TypedTransaction) -> Result<Signature, String> {
        if tx.chain_id().is_none() {
            return Err("transaction has no chain ID".to_string());
        }
        self.wallet
            .sign_transaction(tx)
            .await
            .map_err(|e| format!("Failed to sign: {}", e))
    }

    fn mode_name(&self) -> &'static str {
        "private-key"
    }
}
