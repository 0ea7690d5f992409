//! Transaction Decoding (V1)
//!
//! Mirrors the encoder exactly. The version scalar is dispatched first;
//! unknown versions fail before any other field is touched. Decoding a
//! signed transaction recovers the sender and recomputes the canonical
//! hash and size, so the returned record is indistinguishable from one
//! produced by signing.

use ethereum_types::U256;

use crate::enums::{Network, TxType, TxVersion};
use crate::rlp;
use crate::types::Signature;

use super::{BipPayload, CodecError, SignedTx, Tx};

/// Number of outer list items without the trailing signature.
const UNSIGNED_ITEMS: usize = 12;

/// Number of outer list items with the trailing signature.
const SIGNED_ITEMS: usize = 13;

/// Decode canonical signed transaction bytes.
///
/// Recovers the sender from the signature and freezes the recomputed
/// canonical hash and size on the returned record.
pub fn decode_tx(data: &[u8]) -> Result<SignedTx, CodecError> {
    let (tx, signature) = decode_parts(data)?;
    let signature = signature.ok_or(CodecError::MissingSignature)?;
    Ok(SignedTx::new(tx, signature)?)
}

/// Decode the unsigned transaction record.
///
/// Accepts both the 12-item unsigned layout and the 13-item signed
/// layout; a trailing signature is validated for framing but dropped.
pub fn decode_unsigned_tx(data: &[u8]) -> Result<Tx, CodecError> {
    let (tx, _) = decode_parts(data)?;
    Ok(tx)
}

fn decode_parts(data: &[u8]) -> Result<(Tx, Option<Signature>), CodecError> {
    let items = rlp::decode_list(data)?;

    // Version dispatch happens before anything else is decoded.
    let version_item = *items.first().ok_or(CodecError::WrongItemCount {
        context: "transaction",
        expected: SIGNED_ITEMS,
        actual: 0,
    })?;
    let version_code = rlp::decode_u64(version_item)?;
    let version =
        TxVersion::from_code(version_code).ok_or(CodecError::UnknownVersion(version_code))?;

    match version {
        TxVersion::V1 => decode_v1(&items),
    }
}

fn decode_v1(items: &[&[u8]]) -> Result<(Tx, Option<Signature>), CodecError> {
    if items.len() != UNSIGNED_ITEMS && items.len() != SIGNED_ITEMS {
        return Err(CodecError::WrongItemCount {
            context: "transaction",
            expected: SIGNED_ITEMS,
            actual: items.len(),
        });
    }

    let timestamp = rlp::decode_u64(items[1])?;

    let type_code = rlp::decode_u64(items[2])?;
    let tx_type = TxType::from_code(type_code).ok_or(CodecError::UnknownTxType(type_code))?;

    let network_code = rlp::decode_u64(items[3])?;
    let network =
        Network::from_code(network_code).ok_or(CodecError::UnknownNetwork(network_code))?;

    let nonce = rlp::decode_opt_u64(items[4])?;
    let recipient = rlp::decode_opt_address(items[5])?;
    let token_address = rlp::decode_opt_address(items[6])?;
    let amount: Option<U256> = rlp::decode_opt_u256(items[7])?;
    let fee = rlp::decode_u256(items[8])?;
    let message = rlp::decode_opt_bytes(items[9])?;

    let payload = match rlp::decode_opt_raw(items[10])? {
        Some(raw) => Some(BipPayload::decode(raw)?),
        None => None,
    };

    let reference_hash = rlp::decode_opt_hash(items[11])?;

    let signature = if items.len() == SIGNED_ITEMS {
        Some(rlp::decode_signature(items[12])?)
    } else {
        None
    };

    let tx = Tx {
        version: TxVersion::V1,
        timestamp,
        tx_type,
        network,
        nonce,
        recipient,
        token_address,
        amount,
        fee,
        message,
        payload,
        reference_hash,
    };
    Ok((tx, signature))
}
