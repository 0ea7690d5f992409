//! Signing Pipeline
//!
//! secp256k1 ECDSA with Ethereum-style 65-byte recoverable signatures
//! (r[32] + s[32] + v[1], v = recovery id + 27) and Keccak-256 address
//! derivation. Signing is deterministic (RFC 6979) and low-S normalized,
//! so identical inputs always produce identical bytes.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use tiny_keccak::{Hasher, Keccak};

use crate::types::{Address, Hash, Signature};

/// The secp256k1 curve order n, big-endian.
pub const CURVE_ORDER: [u8; 32] = secp256k1::constants::CURVE_ORDER;

/// n / 2, the low-S boundary: a canonical signature has s <= this value.
pub const HALF_CURVE_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b,
    0x20, 0xa0,
];

/// Errors from signing, recovery, and signature validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigningError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("public key recovery failed: {0}")]
    RecoveryFailed(String),
}

/// Compute the Keccak-256 digest of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// Sign a 32-byte message hash with a 32-byte private key.
///
/// The signature is deterministic and low-S: if the backend ever yields
/// `s > n/2`, s is replaced with `n - s` and the recovery parity flipped.
///
/// # Arguments
/// * `private_key` - 32-byte secp256k1 secret scalar
/// * `message_hash` - the hash to sign (already Keccak-256 digested)
pub fn sign_hash(private_key: &[u8], message_hash: &Hash) -> Result<Signature, SigningError> {
    if private_key.len() != 32 {
        return Err(SigningError::InvalidPrivateKey(format!(
            "expected 32 bytes, got {}",
            private_key.len()
        )));
    }

    let secp = Secp256k1::new();
    let secret_key = SecretKey::from_slice(private_key)
        .map_err(|e| SigningError::InvalidPrivateKey(e.to_string()))?;

    let msg = Message::from_digest(*message_hash.as_bytes());
    let sig = secp.sign_ecdsa_recoverable(&msg, &secret_key);
    let (recovery_id, sig_bytes) = sig.serialize_compact();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&sig_bytes[..32]);
    s.copy_from_slice(&sig_bytes[32..]);

    let mut rec_id = recovery_id.to_i32() as u8;
    if s > HALF_CURVE_ORDER {
        s = order_minus(&s);
        rec_id ^= 1;
    }

    Ok(Signature::from_rsv(r, s, rec_id + 27))
}

/// Recover the signer's address from a message hash and signature.
///
/// Structural validation runs first: `v` must be 27 or 28 (raw recovery
/// ids 0/1 are out of contract), `0 < r < n`, and `0 < s <= n/2`.
pub fn recover_address(message_hash: &Hash, signature: &Signature) -> Result<Address, SigningError> {
    check_signature(signature)?;

    let secp = Secp256k1::new();
    let msg = Message::from_digest(*message_hash.as_bytes());

    let rec_id = RecoveryId::from_i32(i32::from(signature.v() - 27))
        .map_err(|e| SigningError::InvalidSignature(e.to_string()))?;
    let recoverable_sig = RecoverableSignature::from_compact(&signature.as_bytes()[..64], rec_id)
        .map_err(|e| SigningError::InvalidSignature(e.to_string()))?;

    let public_key = secp
        .recover_ecdsa(&msg, &recoverable_sig)
        .map_err(|e| SigningError::RecoveryFailed(e.to_string()))?;

    Ok(address_from_public_key(&public_key))
}

/// Check whether a signature over a message hash was produced by the
/// key behind `expected`. Structural violations and recovery failures
/// all report `false`.
pub fn validate_signature(message_hash: &Hash, signature: &Signature, expected: &Address) -> bool {
    matches!(recover_address(message_hash, signature), Ok(addr) if addr == *expected)
}

/// Structural signature validation: length is fixed by the type; checks
/// `v` in {27, 28}, `0 < r < n`, `0 < s <= n/2`.
pub fn check_signature(signature: &Signature) -> Result<(), SigningError> {
    let v = signature.v();
    if v != 27 && v != 28 {
        return Err(SigningError::InvalidSignature(format!(
            "v must be 27 or 28, got {v}"
        )));
    }

    let r = signature.r();
    if r == [0u8; 32] {
        return Err(SigningError::InvalidSignature("r is zero".into()));
    }
    if r >= CURVE_ORDER {
        return Err(SigningError::InvalidSignature(
            "r is not below the curve order".into(),
        ));
    }

    let s = signature.s();
    if s == [0u8; 32] {
        return Err(SigningError::InvalidSignature("s is zero".into()));
    }
    if s > HALF_CURVE_ORDER {
        return Err(SigningError::InvalidSignature(
            "s is above n/2 (high-S)".into(),
        ));
    }

    Ok(())
}

/// Derive the uncompressed public key (64 bytes, 0x04 tag stripped)
/// from a 32-byte private key.
pub fn public_key_from_private(private_key: &[u8]) -> Result<[u8; 64], SigningError> {
    if private_key.len() != 32 {
        return Err(SigningError::InvalidPrivateKey(format!(
            "expected 32 bytes, got {}",
            private_key.len()
        )));
    }

    let secp = Secp256k1::new();
    let secret_key = SecretKey::from_slice(private_key)
        .map_err(|e| SigningError::InvalidPrivateKey(e.to_string()))?;
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);

    let uncompressed = public_key.serialize_uncompressed();
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&uncompressed[1..]);
    Ok(bytes)
}

/// Derive the address from a private key: keccak of the uncompressed
/// public key, last 20 bytes.
pub fn address_from_private_key(private_key: &[u8]) -> Result<Address, SigningError> {
    let public_key = public_key_from_private(private_key)?;
    let digest = keccak256(&public_key);
    Address::from_slice(&digest[12..])
        .map_err(|e| SigningError::InvalidPrivateKey(e.to_string()))
}

fn address_from_public_key(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    let digest = keccak256(&uncompressed[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    Address::new(bytes)
}

/// Compute n - s over big-endian bytes; s must be nonzero and below n.
fn order_minus(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow = 0i16;
    for i in (0..32).rev() {
        let diff = i16::from(CURVE_ORDER[i]) - i16::from(s[i]) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }
    result
}
