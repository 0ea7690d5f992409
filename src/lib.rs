//! GoldenEra Core Library
//!
//! Client-side construction, signing, and serialization of GoldenEra
//! transactions. The defining correctness property is byte-exact
//! interoperability with the reference implementation: identical inputs
//! produce identical signing hashes, canonical hashes, signatures, and
//! encoded byte streams.
//!
//! # Architecture
//!
//! - **types**: fixed-width byte types (Address, Hash, Signature)
//! - **enums**: stable wire codes for networks, versions, and payloads
//! - **rlp**: the RLP codec with the optional-as-list wire convention
//! - **tx**: the typed transaction model, payload codec, encoder,
//!   decoder, and builder
//! - **signing**: secp256k1 recoverable ECDSA and Keccak-256 addresses
//! - **wallet**: BIP-39/BIP-32 private key derivation
//! - **utils**: decimal amount conversions
//!
//! # Example
//!
//! ```rust,ignore
//! use goldenera_core::{Network, PrivateKey, TxBuilder, TxType};
//! use goldenera_core::utils::amounts;
//!
//! let key = PrivateKey::load(mnemonic, "", 0)?;
//! let tx = TxBuilder::new()
//!     .tx_type(TxType::Transfer)
//!     .network(Network::Mainnet)
//!     .nonce(1)
//!     .recipient(recipient)
//!     .amount(amounts::tokens(100))
//!     .fee(amounts::tokens_decimal("0.001")?)
//!     .sign(&key)?;
//! println!("tx hash: {}", tx.hash());
//! ```
//!
//! # Security
//!
//! Seeds and private keys are zeroized on drop and redacted from Debug
//! output. No encoder, decoder, or signing path panics on malformed
//! input; every failure surfaces as a typed error.

pub mod enums;
pub mod error;
pub mod rlp;
pub mod signing;
pub mod tx;
pub mod types;
pub mod utils;
pub mod wallet;

pub use enums::{BipPayloadType, BipVoteType, Network, TxType, TxVersion};
pub use error::{CoreError, CoreResult};
pub use signing::{keccak256, recover_address, sign_hash, validate_signature};
pub use tx::builder::TxBuilder;
pub use tx::decoder::{decode_tx, decode_unsigned_tx};
pub use tx::encoder::{encode_signed_tx, encode_tx, hash_for_signing, hash_tx, size_tx};
pub use tx::{BipPayload, CodecError, SignedTx, Tx};
pub use types::{Address, Hash, Signature, NATIVE_TOKEN};
pub use wallet::PrivateKey;
