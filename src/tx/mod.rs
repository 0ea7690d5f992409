//! Transaction Model
//!
//! Typed V1 transactions: the unsigned record, the signed record with
//! its frozen derived fields, and the codec error type shared by the
//! encoder, decoder, and payload codec.

pub mod builder;
pub mod decoder;
pub mod encoder;
pub mod payload;

pub use builder::TxBuilder;
pub use payload::BipPayload;

use ethereum_types::U256;
use serde::{Deserialize, Serialize};

use crate::enums::{Network, TxType, TxVersion};
use crate::rlp::RlpError;
use crate::signing::{self, SigningError};
use crate::types::{Address, Hash, Signature};

/// Errors from transaction and payload decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Rlp(#[from] RlpError),

    #[error("unknown transaction version {0}")]
    UnknownVersion(u64),

    #[error("unknown transaction type code {0}")]
    UnknownTxType(u64),

    #[error("unknown network code {0}")]
    UnknownNetwork(u64),

    #[error("unknown payload type code {0}")]
    UnknownPayloadCode(u64),

    #[error("unknown vote type code {0}")]
    UnknownVoteCode(u64),

    #[error("{context} list has {actual} items, expected {expected}")]
    WrongItemCount {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("transaction has no signature")]
    MissingSignature,

    #[error(transparent)]
    Signing(#[from] SigningError),
}

/// An unsigned V1 transaction.
///
/// All fields are value-style and the record is immutable once built;
/// construction goes through [`TxBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    /// Serialization version.
    pub version: TxVersion,

    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,

    /// Operation discriminant.
    pub tx_type: TxType,

    /// Target network.
    pub network: Network,

    /// Sender sequence number.
    pub nonce: Option<u64>,

    /// Destination address (TRANSFER only).
    pub recipient: Option<Address>,

    /// Token being transferred; NATIVE_TOKEN for native transfers.
    pub token_address: Option<Address>,

    /// Amount in wei.
    pub amount: Option<U256>,

    /// Fee in wei, always present.
    pub fee: U256,

    /// Arbitrary message bytes.
    pub message: Option<Vec<u8>>,

    /// BIP payload (BIP_CREATE and BIP_VOTE).
    pub payload: Option<BipPayload>,

    /// Hash of the BIP a vote targets.
    pub reference_hash: Option<Hash>,
}

impl Tx {
    /// RLP encoding with the signature omitted (the signing preimage).
    pub fn encode(&self) -> Vec<u8> {
        encoder::encode_tx(self)
    }

    /// Keccak-256 of the unsigned encoding; the message that gets signed.
    pub fn hash_for_signing(&self) -> Hash {
        encoder::hash_for_signing(self)
    }
}

/// A signed V1 transaction.
///
/// The derived fields (`sender`, `hash`, `size`) are computed once at
/// construction and frozen; decoding recomputes them from the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTx {
    tx: Tx,
    signature: Signature,
    sender: Address,
    hash: Hash,
    size: u32,
}

impl SignedTx {
    /// Bind a signature to an unsigned transaction, recovering the
    /// sender and freezing the canonical hash and size.
    ///
    /// Fails if the signature is structurally invalid or does not
    /// recover to any public key for this transaction's signing hash.
    pub fn new(tx: Tx, signature: Signature) -> Result<Self, SigningError> {
        let signing_hash = tx.hash_for_signing();
        let sender = signing::recover_address(&signing_hash, &signature)?;

        let encoded = encoder::encode_tx_with_signature(&tx, Some(&signature));
        let hash = Hash::new(signing::keccak256(&encoded));
        let size = encoded.len() as u32;

        Ok(Self {
            tx,
            signature,
            sender,
            hash,
            size,
        })
    }

    /// The underlying unsigned record.
    pub fn tx(&self) -> &Tx {
        &self.tx
    }

    /// The 65-byte signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The sender address recovered from the signature.
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// The canonical transaction hash (over the signed encoding).
    pub fn hash(&self) -> Hash {
        self.hash
    }

    /// Byte length of the canonical encoding.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// RLP encoding including the signature (the canonical bytes).
    pub fn encode(&self) -> Vec<u8> {
        encoder::encode_signed_tx(self)
    }

    /// Keccak-256 of the unsigned encoding.
    pub fn hash_for_signing(&self) -> Hash {
        self.tx.hash_for_signing()
    }
}
