//! Wallet Provider Abstraction
//!
//! Signing keys come from one of two sources:
//!
//! - **Private key**: `--privatekey` / `ETHEREAL_PRIVATE_KEY`
//! - **Keystore**: an encrypted V3 keystore file in `--keystore`, unlocked
//!   with `--passphrase`
//!
//! A private key takes precedence. Either way the key must belong to the
//! address that is sending the transaction.

mod keystore_provider;
mod private_key_provider;

pub use keystore_provider::KeystoreWalletProvider;
pub use private_key_provider::PrivateKeyWalletProvider;

use async_trait::async_trait;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Signature};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;

/// Signs transactions for a single address
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Address whose key this provider holds
    fn address(&self) -> Address;

    /// Sign a transaction; the transaction's chain ID is used for EIP-155
    async fn sign_transaction(&self, tx: &TypedTransaction) -> Result<Signature, String>;

    /// Get the mode name for logging
    fn mode_name(&self) -> &'static str;
}

/// Finds the wallet provider able to sign for an address
pub trait WalletResolver: Send + Sync {
    fn wallet_for(&self, address: Address) -> Result<Arc<dyn WalletProvider>, String>;
}

/// Wallet sources configured on the command line
pub struct ConfiguredWallets {
    private_key: Option<String>,
    keystore: Option<PathBuf>,
    passphrase: Option<String>,
}

impl ConfiguredWallets {
    pub fn from_config(config: &Config) -> Self {
        Self {
            private_key: config.private_key.clone(),
            keystore: config.keystore.clone(),
            passphrase: config.passphrase.clone(),
        }
    }
}

impl WalletResolver for ConfiguredWallets {
    fn wallet_for(&self, address: Address) -> Result<Arc<dyn WalletProvider>, String> {
        if let Some(private_key) = &self.private_key {
            let provider = PrivateKeyWalletProvider::from_private_key(private_key)?;
            if provider.address() != address {
                return Err(format!(
                    "private key is for {:?}, not {:?}",
                    provider.address(),
                    address
                ));
            }
            log::info!("[wallet] Using private key for {:?}", address);
            return Ok(Arc::new(provider));
        }

        let keystore = self
            .keystore
            .as_ref()
            .ok_or_else(|| format!("no private key or keystore supplied for {:?}", address))?;
        let passphrase = self
            .passphrase
            .as_deref()
            .ok_or_else(|| "--passphrase is required to unlock the keystore".to_string())?;

        let provider = KeystoreWalletProvider::open(keystore, address, passphrase)?;
        log::info!(
            "[wallet] Unlocked keystore for {:?} from {}",
            address,
            provider.path().display()
        );
        Ok(Arc::new(provider))
    }
}
