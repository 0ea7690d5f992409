//! Transaction Encoding (V1)
//!
//! Outer list order, exact:
//!
//! ```text
//! [ version, timestamp, type, network,
//!   optional(nonce), optional(recipient), optional(tokenAddress),
//!   optional(amount), fee,
//!   optional(message), optional(payloadRaw), optional(referenceHash),
//!   signature? ]
//! ```
//!
//! `fee` is a mandatory unwrapped scalar; the payload, when present, is
//! a one-element list holding the already-encoded payload list; the
//! signature is appended as a bare 65-byte string.

use crate::rlp;
use crate::signing::keccak256;
use crate::types::{Hash, Signature};

use super::{SignedTx, Tx};

/// Encode a transaction with the signature omitted: the signing preimage.
pub fn encode_tx(tx: &Tx) -> Vec<u8> {
    encode_tx_with_signature(tx, None)
}

/// Encode a signed transaction: the canonical wire bytes.
pub fn encode_signed_tx(signed: &SignedTx) -> Vec<u8> {
    encode_tx_with_signature(signed.tx(), Some(signed.signature()))
}

pub(crate) fn encode_tx_with_signature(tx: &Tx, signature: Option<&Signature>) -> Vec<u8> {
    let payload_raw = tx.payload.as_ref().map(|p| p.encode());

    let mut content = Vec::new();
    content.extend(rlp::encode_u64(tx.version.code()));
    content.extend(rlp::encode_u64(tx.timestamp));
    content.extend(rlp::encode_u64(tx.tx_type.code()));
    content.extend(rlp::encode_u64(tx.network.code()));
    content.extend(rlp::encode_opt_u64(tx.nonce));
    content.extend(rlp::encode_opt_address(tx.recipient.as_ref()));
    content.extend(rlp::encode_opt_address(tx.token_address.as_ref()));
    content.extend(rlp::encode_opt_u256(tx.amount.as_ref()));
    content.extend(rlp::encode_u256(&tx.fee));
    content.extend(rlp::encode_opt_bytes(tx.message.as_deref()));
    content.extend(rlp::encode_opt_raw(payload_raw.as_deref()));
    content.extend(rlp::encode_opt_hash(tx.reference_hash.as_ref()));

    if let Some(sig) = signature {
        content.extend(rlp::encode_bytes(sig.as_bytes()));
    }

    rlp::encode_list(&content)
}

/// Keccak-256 of the unsigned encoding; the message that gets signed.
pub fn hash_for_signing(tx: &Tx) -> Hash {
    Hash::new(keccak256(&encode_tx(tx)))
}

/// The canonical transaction hash, frozen at signing or decode time.
pub fn hash_tx(signed: &SignedTx) -> Hash {
    signed.hash()
}

/// Byte length of the canonical encoding.
pub fn size_tx(signed: &SignedTx) -> u32 {
    signed.size()
}
