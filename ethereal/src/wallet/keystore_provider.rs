//! Keystore Wallet Provider
//!
//! Finds the encrypted V3 keystore file belonging to an address and unlocks
//! it with a passphrase. Files that declare a different address are skipped
//! without being decrypted; files that declare none are decrypted and
//! checked.

use async_trait::async_trait;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Signature};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::WalletProvider;
use super::private_key_provider::PrivateKeyWalletProvider;

/// The only keystore field read before decryption
#[derive(Debug, Deserialize)]
struct KeystoreHeader {
    address: Option<String>,
}

pub struct KeystoreWalletProvider {
    inner: PrivateKeyWalletProvider,
    path: PathBuf,
}

impl KeystoreWalletProvider {
    /// Unlock the keystore file for `address` found in `dir`
    pub fn open(dir: &Path, address: Address, passphrase: &str) -> Result<Self, String> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| format!("Cannot read keystore {}: {}", dir.display(), e))?;

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        candidates.sort();

        for path in candidates {
            match declared_address(&path) {
                Some(Some(declared)) if declared != address => continue,
                // Not a keystore file
                None => continue,
                _ => {}
            }

            match LocalWallet::decrypt_keystore(&path, passphrase) {
                Ok(wallet) if wallet.address() == address => {
                    log::debug!("[wallet] Keystore file {} unlocked", path.display());
                    return Ok(Self {
                        inner: PrivateKeyWalletProvider::from_wallet(wallet),
                        path,
                    });
                }
                Ok(_) => continue,
                Err(e) => {
                    log::debug!(
                        "[wallet] Could not decrypt {}: {}",
                        path.display(),
                        e
                    );
                    continue;
                }
            }
        }

        Err(format!(
            "no keystore file in {} could be unlocked for {:?}",
            dir.display(),
            address
        ))
    }

    /// Keystore file the key was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `None` if the file is not JSON, `Some(None)` if it declares no address
fn declared_address(path: &Path) -> Option<Option<Address>> {
    let contents = std::fs::read_to_string(path).ok()?;
    let header: KeystoreHeader = serde_json::from_str(&contents).ok()?;
    Some(header.address.and_then(|declared| {
        let declared = declared.trim();
        let declared = declared.strip_prefix("0x").unwrap_or(declared);
        Address::from_str(declared).ok()
    }))
}

#[async_trait]
impl WalletProvider for KeystoreWalletProvider {
    fn address(&self) -> Address {
        self.inner.address()
    }

    async fn sign_transaction(&self, tx: &TypedTransaction) -> Result<Signature, String> {
        self.inner.sign_transaction(tx).await
    }

    fn mode_name(&self) -> &'static str {
        "keystore"
    }
}
