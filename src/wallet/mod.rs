//! Wallet Keys
//!
//! BIP-39 mnemonic handling and BIP-32 derivation along the account
//! path `m/44'/60'/0'/0/{index}`.
//!
//! SECURITY: seeds and private key material are zeroized on drop, and
//! key bytes never appear in Debug output.

use std::fmt;
use std::str::FromStr;

use bip39::Mnemonic;
use bitcoin::bip32::{DerivationPath, Xpriv};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::signing::{self, SigningError};
use crate::types::{Address, Hash, Signature};

/// Errors from mnemonic handling and key derivation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),
}

/// A 32-byte secp256k1 private key with its derived address.
///
/// The key bytes are zeroized when the value is dropped. The address is
/// computed once at construction, so lookups after that never touch the
/// secret scalar.
pub struct PrivateKey {
    bytes: [u8; 32],
    address: Address,
}

impl PrivateKey {
    /// Derive the account key for `index` from a BIP-39 mnemonic.
    ///
    /// # Arguments
    /// * `mnemonic` - BIP-39 phrase
    /// * `passphrase` - BIP-39 passphrase, often empty
    /// * `index` - account index in `m/44'/60'/0'/0/{index}`
    pub fn load(mnemonic: &str, passphrase: &str, index: u32) -> Result<Self, WalletError> {
        let mnemonic =
            Mnemonic::parse(mnemonic).map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;

        let seed = Zeroizing::new(mnemonic.to_seed(passphrase));

        let secp = bitcoin::secp256k1::Secp256k1::new();
        let master = Xpriv::new_master(bitcoin::Network::Bitcoin, seed.as_ref())
            .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;

        let path = DerivationPath::from_str(&format!("m/44'/60'/0'/0/{index}"))
            .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;
        let child = master
            .derive_priv(&secp, &path)
            .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;

        Self::from_bytes(child.private_key.secret_bytes())
    }

    /// Wrap raw key bytes, validating them as a curve scalar.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, WalletError> {
        let address = signing::address_from_private_key(&bytes)
            .map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self { bytes, address })
    }

    /// Parse a hex-encoded private key, with or without the 0x prefix.
    pub fn from_hex(s: &str) -> Result<Self, WalletError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let decoded =
            hex::decode(stripped).map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))?;
        if decoded.len() != 32 {
            return Err(WalletError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                decoded.len()
            )));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        Self::from_bytes(bytes)
    }

    /// Lowercase 0x-prefixed hex of the key bytes. Handle with care.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// The address derived from this key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The uncompressed public key, 0x04 tag stripped (64 bytes).
    pub fn public_key(&self) -> Result<[u8; 64], SigningError> {
        signing::public_key_from_private(&self.bytes)
    }

    /// Sign a 32-byte message hash.
    pub fn sign_hash(&self, message_hash: &Hash) -> Result<Signature, SigningError> {
        signing::sign_hash(&self.bytes, message_hash)
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl Clone for PrivateKey {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes,
            address: self.address,
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secret bytes never reach Debug output
        write!(f, "PrivateKey(address={})", self.address)
    }
}

/// Generate a fresh 12-word BIP-39 mnemonic from OS entropy.
pub fn generate_mnemonic() -> Result<String, WalletError> {
    let mut entropy = Zeroizing::new([0u8; 16]);
    OsRng.fill_bytes(entropy.as_mut());

    let mnemonic = Mnemonic::from_entropy(entropy.as_ref())
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_string())
}
