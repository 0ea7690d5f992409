//! Fixed-Width Byte Types
//!
//! Address (20 bytes), Hash (32 bytes), and Signature (65 bytes, r|s|v)
//! with lowercase 0x-prefixed hex conversions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Byte length of an address.
pub const ADDRESS_LENGTH: usize = 20;

/// Byte length of a hash.
pub const HASH_LENGTH: usize = 32;

/// Byte length of a recoverable signature (r[32] + s[32] + v[1]).
pub const SIGNATURE_LENGTH: usize = 65;

/// The all-zero address denoting the chain's native asset.
pub const NATIVE_TOKEN: Address = Address([0u8; ADDRESS_LENGTH]);

/// Errors from hex string parsing of fixed-width types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

fn decode_fixed_hex<const N: usize>(s: &str) -> Result<[u8; N], HexError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(stripped).map_err(|e| HexError::InvalidHex(e.to_string()))?;
    if bytes.len() != N {
        return Err(HexError::WrongLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut arr = [0u8; N];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

// =============================================================================
// Address
// =============================================================================

/// A 20-byte account or token address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Wrap raw 20-byte address material.
    pub fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Construct from a byte slice, validating the length.
    pub fn from_slice(slice: &[u8]) -> Result<Self, HexError> {
        if slice.len() != ADDRESS_LENGTH {
            return Err(HexError::WrongLength {
                expected: ADDRESS_LENGTH,
                actual: slice.len(),
            });
        }
        let mut arr = [0u8; ADDRESS_LENGTH];
        arr.copy_from_slice(slice);
        Ok(Self(arr))
    }

    /// Parse a hex string, with or without the 0x prefix.
    pub fn from_hex(s: &str) -> Result<Self, HexError> {
        decode_fixed_hex(s).map(Self)
    }

    /// Lowercase 0x-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// True for the all-zero native token sentinel.
    pub fn is_native_token(&self) -> bool {
        *self == NATIVE_TOKEN
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Hash
// =============================================================================

/// A 32-byte Keccak-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; HASH_LENGTH]);

impl Hash {
    pub fn new(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Construct from a byte slice, validating the length.
    pub fn from_slice(slice: &[u8]) -> Result<Self, HexError> {
        if slice.len() != HASH_LENGTH {
            return Err(HexError::WrongLength {
                expected: HASH_LENGTH,
                actual: slice.len(),
            });
        }
        let mut arr = [0u8; HASH_LENGTH];
        arr.copy_from_slice(slice);
        Ok(Self(arr))
    }

    /// Parse a hex string, with or without the 0x prefix.
    pub fn from_hex(s: &str) -> Result<Self, HexError> {
        decode_fixed_hex(s).map(Self)
    }

    /// Lowercase 0x-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl From<[u8; HASH_LENGTH]> for Hash {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Signature
// =============================================================================

/// A 65-byte recoverable ECDSA signature, laid out r(32) | s(32) | v(1).
///
/// `v` is the Ethereum-style recovery byte: recovery id + 27, so 27 or 28.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    pub fn new(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Assemble from the r, s, v components.
    pub fn from_rsv(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(&r);
        bytes[32..64].copy_from_slice(&s);
        bytes[64] = v;
        Self(bytes)
    }

    /// Construct from a byte slice, validating the length.
    pub fn from_slice(slice: &[u8]) -> Result<Self, HexError> {
        if slice.len() != SIGNATURE_LENGTH {
            return Err(HexError::WrongLength {
                expected: SIGNATURE_LENGTH,
                actual: slice.len(),
            });
        }
        let mut arr = [0u8; SIGNATURE_LENGTH];
        arr.copy_from_slice(slice);
        Ok(Self(arr))
    }

    /// Parse a hex string, with or without the 0x prefix.
    pub fn from_hex(s: &str) -> Result<Self, HexError> {
        decode_fixed_hex(s).map(Self)
    }

    /// Lowercase 0x-prefixed hex representation (130 hex characters).
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// The r component, big-endian.
    pub fn r(&self) -> [u8; 32] {
        let mut r = [0u8; 32];
        r.copy_from_slice(&self.0[..32]);
        r
    }

    /// The s component, big-endian.
    pub fn s(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        s.copy_from_slice(&self.0[32..64]);
        s
    }

    /// The recovery byte (27 or 28 for valid signatures).
    pub fn v(&self) -> u8 {
        self.0[64]
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(
            f,
            "Signature({}...{})",
            &hex_str[..10],
            &hex_str[hex_str.len() - 8..]
        )
    }
}

impl From<[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Signature::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_hex_roundtrip() {
        let addr = Address::from_hex("0x1111111111111111111111111111111111111111").unwrap();
        assert_eq!(addr.to_hex(), "0x1111111111111111111111111111111111111111");

        // Prefix is optional on input
        let bare = Address::from_hex("1111111111111111111111111111111111111111").unwrap();
        assert_eq!(addr, bare);
    }

    #[test]
    fn test_address_rejects_wrong_length() {
        let err = Address::from_hex("0x1111").unwrap_err();
        assert_eq!(
            err,
            HexError::WrongLength {
                expected: 20,
                actual: 2
            }
        );

        assert!(Address::from_slice(&[0u8; 19]).is_err());
        assert!(Address::from_slice(&[0u8; 21]).is_err());
    }

    #[test]
    fn test_address_rejects_bad_hex() {
        assert!(matches!(
            Address::from_hex("0xzz11111111111111111111111111111111111111"),
            Err(HexError::InvalidHex(_))
        ));
        // Odd length
        assert!(Address::from_hex("0x111").is_err());
    }

    #[test]
    fn test_native_token_sentinel() {
        assert!(NATIVE_TOKEN.is_native_token());
        assert_eq!(
            NATIVE_TOKEN.to_hex(),
            "0x0000000000000000000000000000000000000000"
        );

        let other = Address::new([1u8; 20]);
        assert!(!other.is_native_token());
    }

    #[test]
    fn test_hash_hex_roundtrip() {
        let h =
            Hash::from_hex("0xabcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890")
                .unwrap();
        assert_eq!(
            h.to_hex(),
            "0xabcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890"
        );
    }

    #[test]
    fn test_signature_components() {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&[0xaa; 32]);
        bytes[32..64].copy_from_slice(&[0xbb; 32]);
        bytes[64] = 27;

        let sig = Signature::new(bytes);
        assert_eq!(sig.r(), [0xaa; 32]);
        assert_eq!(sig.s(), [0xbb; 32]);
        assert_eq!(sig.v(), 27);

        let rebuilt = Signature::from_rsv([0xaa; 32], [0xbb; 32], 27);
        assert_eq!(sig, rebuilt);
    }

    #[test]
    fn test_signature_length_validation() {
        assert!(Signature::from_slice(&[0u8; 64]).is_err());
        assert!(Signature::from_slice(&[0u8; 66]).is_err());
        assert!(Signature::from_slice(&[0u8; 65]).is_ok());
    }

    #[test]
    fn test_serde_hex_strings() {
        let addr = Address::new([0x22; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x2222222222222222222222222222222222222222\"");

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
