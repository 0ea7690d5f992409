//! RLP Encoding
//!
//! Scalars are minimal big-endian with no leading zeros; zero is the
//! empty byte string. Lists wrap the concatenation of their elements.

use ethereum_types::U256;

use crate::types::{Address, Hash};

/// Encode an unsigned 64-bit scalar.
pub fn encode_u64(value: u64) -> Vec<u8> {
    if value == 0 {
        return vec![0x80];
    }

    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(8);
    let significant = &bytes[start..];

    if significant.len() == 1 && significant[0] < 0x80 {
        significant.to_vec()
    } else {
        let mut encoded = vec![0x80 + significant.len() as u8];
        encoded.extend_from_slice(significant);
        encoded
    }
}

/// Encode an unsigned 256-bit scalar.
pub fn encode_u256(value: &U256) -> Vec<u8> {
    if value.is_zero() {
        return vec![0x80];
    }

    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(32);
    let significant = &bytes[start..];

    if significant.len() == 1 && significant[0] < 0x80 {
        significant.to_vec()
    } else {
        let mut encoded = vec![0x80 + significant.len() as u8];
        encoded.extend_from_slice(significant);
        encoded
    }
}

/// Encode a raw byte string.
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    if data.len() == 1 && data[0] < 0x80 {
        data.to_vec()
    } else if data.len() <= 55 {
        let mut encoded = vec![0x80 + data.len() as u8];
        encoded.extend_from_slice(data);
        encoded
    } else {
        let len_bytes = encode_length(data.len());
        let mut encoded = vec![0xb7 + len_bytes.len() as u8];
        encoded.extend_from_slice(&len_bytes);
        encoded.extend_from_slice(data);
        encoded
    }
}

/// Encode a UTF-8 string as its bytes.
pub fn encode_str(s: &str) -> Vec<u8> {
    encode_bytes(s.as_bytes())
}

/// Encode a boolean as the scalar 1 or 0.
pub fn encode_bool(value: bool) -> Vec<u8> {
    encode_u64(u64::from(value))
}

/// Encode a 20-byte address.
pub fn encode_address(address: &Address) -> Vec<u8> {
    encode_bytes(address.as_bytes())
}

/// Encode a 32-byte hash.
pub fn encode_hash(hash: &Hash) -> Vec<u8> {
    encode_bytes(hash.as_bytes())
}

/// Wrap an already-encoded payload in a list header.
pub fn encode_list(payload: &[u8]) -> Vec<u8> {
    let mut encoded;
    if payload.len() <= 55 {
        encoded = Vec::with_capacity(1 + payload.len());
        encoded.push(0xc0 + payload.len() as u8);
    } else {
        let len_bytes = encode_length(payload.len());
        encoded = Vec::with_capacity(1 + len_bytes.len() + payload.len());
        encoded.push(0xf7 + len_bytes.len() as u8);
        encoded.extend_from_slice(&len_bytes);
    }
    encoded.extend_from_slice(payload);
    encoded
}

/// The empty list, used for every absent optional field.
pub fn empty_list() -> Vec<u8> {
    vec![0xc0]
}

// =============================================================================
// Optional-as-list wrappers
// =============================================================================

fn wrap_present(inner: Vec<u8>) -> Vec<u8> {
    encode_list(&inner)
}

/// Encode an optional 64-bit scalar under the list-wrap convention.
pub fn encode_opt_u64(value: Option<u64>) -> Vec<u8> {
    match value {
        Some(v) => wrap_present(encode_u64(v)),
        None => empty_list(),
    }
}

/// Encode an optional 256-bit scalar under the list-wrap convention.
pub fn encode_opt_u256(value: Option<&U256>) -> Vec<u8> {
    match value {
        Some(v) => wrap_present(encode_u256(v)),
        None => empty_list(),
    }
}

/// Encode optional raw bytes under the list-wrap convention.
pub fn encode_opt_bytes(value: Option<&[u8]>) -> Vec<u8> {
    match value {
        Some(v) => wrap_present(encode_bytes(v)),
        None => empty_list(),
    }
}

/// Encode an optional UTF-8 string under the list-wrap convention.
pub fn encode_opt_str(value: Option<&str>) -> Vec<u8> {
    match value {
        Some(v) => wrap_present(encode_str(v)),
        None => empty_list(),
    }
}

/// Encode an optional address under the list-wrap convention.
pub fn encode_opt_address(value: Option<&Address>) -> Vec<u8> {
    match value {
        Some(v) => wrap_present(encode_address(v)),
        None => empty_list(),
    }
}

/// Encode an optional hash under the list-wrap convention.
pub fn encode_opt_hash(value: Option<&Hash>) -> Vec<u8> {
    match value {
        Some(v) => wrap_present(encode_hash(v)),
        None => empty_list(),
    }
}

/// Encode optional already-encoded RLP under the list-wrap convention.
///
/// The raw bytes are inserted verbatim as the single list element. Used
/// for the transaction payload, which is itself an encoded list.
pub fn encode_opt_raw(value: Option<&[u8]>) -> Vec<u8> {
    match value {
        Some(raw) => encode_list(raw),
        None => empty_list(),
    }
}

fn encode_length(len: usize) -> Vec<u8> {
    let bytes = (len as u64).to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(7);
    bytes[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_zero_is_empty_string() {
        assert_eq!(encode_u64(0), vec![0x80]);
        assert_eq!(encode_u256(&U256::zero()), vec![0x80]);
    }

    #[test]
    fn test_scalar_single_byte_boundary() {
        // Below 0x80: the byte itself
        assert_eq!(encode_u64(0x7f), vec![0x7f]);
        assert_eq!(encode_u64(1), vec![0x01]);
        // At 0x80: gains a length prefix
        assert_eq!(encode_u64(0x80), vec![0x81, 0x80]);
        assert_eq!(encode_u64(255), vec![0x81, 0xff]);
    }

    #[test]
    fn test_scalar_multi_byte() {
        assert_eq!(encode_u64(256), vec![0x82, 0x01, 0x00]);
        assert_eq!(encode_u64(1024), vec![0x82, 0x04, 0x00]);
        // 1702200000000 = 0x018c5306be00
        assert_eq!(
            encode_u64(1_702_200_000_000),
            vec![0x86, 0x01, 0x8c, 0x53, 0x06, 0xbe, 0x00]
        );
    }

    #[test]
    fn test_u256_strips_leading_zeros() {
        let v = U256::from(0x0100u64);
        assert_eq!(encode_u256(&v), vec![0x82, 0x01, 0x00]);

        // 10^10 token wei: 100 tokens at 10^8 wei each
        let wei = U256::from(10_000_000_000u64);
        assert_eq!(encode_u256(&wei), vec![0x85, 0x02, 0x54, 0x0b, 0xe4, 0x00]);
    }

    #[test]
    fn test_bytes_encoding_forms() {
        assert_eq!(encode_bytes(&[]), vec![0x80]);
        assert_eq!(encode_bytes(&[0x42]), vec![0x42]);
        assert_eq!(encode_bytes(&[0x80]), vec![0x81, 0x80]);
        assert_eq!(encode_bytes(b"abc"), vec![0x83, b'a', b'b', b'c']);

        // 56 bytes forces the long form
        let long = vec![0xaa; 56];
        let encoded = encode_bytes(&long);
        assert_eq!(encoded[0], 0xb8);
        assert_eq!(encoded[1], 56);
        assert_eq!(&encoded[2..], &long[..]);
    }

    #[test]
    fn test_list_encoding_forms() {
        assert_eq!(encode_list(&[]), vec![0xc0]);

        let payload = [0x01, 0x02, 0x03];
        assert_eq!(encode_list(&payload), vec![0xc3, 0x01, 0x02, 0x03]);

        let long_payload = vec![0x80; 60];
        let encoded = encode_list(&long_payload);
        assert_eq!(encoded[0], 0xf8);
        assert_eq!(encoded[1], 60);
    }

    #[test]
    fn test_optional_absent_is_empty_list() {
        assert_eq!(encode_opt_u64(None), vec![0xc0]);
        assert_eq!(encode_opt_u256(None), vec![0xc0]);
        assert_eq!(encode_opt_bytes(None), vec![0xc0]);
        assert_eq!(encode_opt_address(None), vec![0xc0]);
        assert_eq!(encode_opt_hash(None), vec![0xc0]);
        assert_eq!(encode_opt_raw(None), vec![0xc0]);
    }

    #[test]
    fn test_optional_present_wraps_in_list() {
        // nonce = 0 is a one-element list holding the empty scalar,
        // distinct from absence
        assert_eq!(encode_opt_u64(Some(0)), vec![0xc1, 0x80]);
        assert_eq!(encode_opt_u64(Some(1)), vec![0xc1, 0x01]);
        assert_eq!(encode_opt_u64(Some(0x80)), vec![0xc2, 0x81, 0x80]);

        let addr = Address::new([0x11; 20]);
        let encoded = encode_opt_address(Some(&addr));
        assert_eq!(encoded[0], 0xc0 + 21);
        assert_eq!(encoded[1], 0x80 + 20);
        assert_eq!(&encoded[2..], addr.as_bytes());
    }

    #[test]
    fn test_opt_raw_inserts_verbatim() {
        // A pre-encoded payload list lands inside the wrapper unchanged
        let payload = vec![0xc2, 0x09, 0x01];
        let encoded = encode_opt_raw(Some(&payload));
        assert_eq!(encoded, vec![0xc3, 0xc2, 0x09, 0x01]);
    }

    #[test]
    fn test_bool_is_scalar() {
        assert_eq!(encode_bool(true), vec![0x01]);
        assert_eq!(encode_bool(false), vec![0x80]);
    }
}
