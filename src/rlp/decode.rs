//! RLP Decoding
//!
//! Non-panicking decoder with strict canonicality checks: non-minimal
//! length prefixes, wrapped single bytes, and scalars with leading zeros
//! are all rejected so that decode(encode(x)) is the only accepted form.

use ethereum_types::U256;

use crate::types::{Address, Hash, Signature};

/// Framing errors from RLP decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RlpError {
    #[error("truncated input: needed {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("oversize length prefix")]
    OversizePrefix,

    #[error("non-canonical encoding: {0}")]
    NonCanonical(&'static str),

    #[error("expected a list, found a byte string")]
    ExpectedList,

    #[error("expected a byte string, found a list")]
    ExpectedBytes,

    #[error("{trailing} trailing bytes after item")]
    TrailingBytes { trailing: usize },

    #[error("expected {expected}-byte field, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("scalar does not fit in target integer")]
    IntegerOverflow,

    #[error("string field is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid boolean scalar {0}")]
    InvalidBool(u64),

    #[error("optional wrapper holds {0} elements, expected 0 or 1")]
    InvalidOptional(usize),
}

struct Header {
    is_list: bool,
    payload_offset: usize,
    payload_len: usize,
}

impl Header {
    fn total_len(&self) -> usize {
        self.payload_offset + self.payload_len
    }
}

/// Parse the header of the item at the start of `data`.
fn parse_header(data: &[u8]) -> Result<Header, RlpError> {
    let first = *data.first().ok_or(RlpError::Truncated {
        needed: 1,
        available: 0,
    })?;

    let header = match first {
        0x00..=0x7f => Header {
            is_list: false,
            payload_offset: 0,
            payload_len: 1,
        },
        0x80..=0xb7 => {
            let len = (first - 0x80) as usize;
            if len == 1 {
                let byte = *data.get(1).ok_or(RlpError::Truncated {
                    needed: 2,
                    available: data.len(),
                })?;
                if byte < 0x80 {
                    return Err(RlpError::NonCanonical("single byte below 0x80 was wrapped"));
                }
            }
            Header {
                is_list: false,
                payload_offset: 1,
                payload_len: len,
            }
        }
        0xb8..=0xbf => {
            let len = parse_long_length(data, (first - 0xb7) as usize)?;
            Header {
                is_list: false,
                payload_offset: 1 + (first - 0xb7) as usize,
                payload_len: len,
            }
        }
        0xc0..=0xf7 => Header {
            is_list: true,
            payload_offset: 1,
            payload_len: (first - 0xc0) as usize,
        },
        0xf8..=0xff => {
            let len = parse_long_length(data, (first - 0xf7) as usize)?;
            Header {
                is_list: true,
                payload_offset: 1 + (first - 0xf7) as usize,
                payload_len: len,
            }
        }
    };

    // Compare without computing offset + len, which a hostile length
    // prefix could overflow
    if data.len() - header.payload_offset < header.payload_len {
        return Err(RlpError::Truncated {
            needed: header.payload_offset.saturating_add(header.payload_len),
            available: data.len(),
        });
    }
    Ok(header)
}

/// Parse the big-endian length bytes of a long-form item.
fn parse_long_length(data: &[u8], len_of_len: usize) -> Result<usize, RlpError> {
    if len_of_len > std::mem::size_of::<usize>() {
        return Err(RlpError::OversizePrefix);
    }
    if data.len() < 1 + len_of_len {
        return Err(RlpError::Truncated {
            needed: 1 + len_of_len,
            available: data.len(),
        });
    }

    let len_bytes = &data[1..1 + len_of_len];
    if len_bytes[0] == 0 {
        return Err(RlpError::OversizePrefix);
    }

    let mut len: usize = 0;
    for &b in len_bytes {
        len = (len << 8) | b as usize;
    }
    if len <= 55 {
        // Short form would have fit
        return Err(RlpError::OversizePrefix);
    }
    Ok(len)
}

/// Decode a byte string, requiring the input to be exactly one item.
pub fn decode_bytes(data: &[u8]) -> Result<&[u8], RlpError> {
    let header = parse_header(data)?;
    if header.is_list {
        return Err(RlpError::ExpectedBytes);
    }
    expect_consumed(data, &header)?;
    Ok(&data[header.payload_offset..header.total_len()])
}

/// Decode a list into its still-encoded items, requiring exact consumption.
pub fn decode_list(data: &[u8]) -> Result<Vec<&[u8]>, RlpError> {
    let header = parse_header(data)?;
    if !header.is_list {
        return Err(RlpError::ExpectedList);
    }
    expect_consumed(data, &header)?;

    let mut payload = &data[header.payload_offset..header.total_len()];
    let mut items = Vec::new();
    while !payload.is_empty() {
        let item_header = parse_header(payload)?;
        let item_len = item_header.total_len();
        items.push(&payload[..item_len]);
        payload = &payload[item_len..];
    }
    Ok(items)
}

fn expect_consumed(data: &[u8], header: &Header) -> Result<(), RlpError> {
    if data.len() > header.total_len() {
        return Err(RlpError::TrailingBytes {
            trailing: data.len() - header.total_len(),
        });
    }
    Ok(())
}

fn check_scalar(payload: &[u8]) -> Result<(), RlpError> {
    if payload.first() == Some(&0) {
        return Err(RlpError::NonCanonical("scalar has leading zero bytes"));
    }
    Ok(())
}

/// Decode an unsigned 64-bit scalar.
pub fn decode_u64(data: &[u8]) -> Result<u64, RlpError> {
    let payload = decode_bytes(data)?;
    check_scalar(payload)?;
    if payload.len() > 8 {
        return Err(RlpError::IntegerOverflow);
    }
    let mut value: u64 = 0;
    for &b in payload {
        value = (value << 8) | b as u64;
    }
    Ok(value)
}

/// Decode an unsigned 256-bit scalar.
pub fn decode_u256(data: &[u8]) -> Result<U256, RlpError> {
    let payload = decode_bytes(data)?;
    check_scalar(payload)?;
    if payload.len() > 32 {
        return Err(RlpError::IntegerOverflow);
    }
    Ok(U256::from_big_endian(payload))
}

/// Decode a UTF-8 string field.
pub fn decode_string(data: &[u8]) -> Result<String, RlpError> {
    let payload = decode_bytes(data)?;
    String::from_utf8(payload.to_vec()).map_err(|_| RlpError::InvalidUtf8)
}

/// Decode a boolean encoded as the scalar 1 or 0.
pub fn decode_bool(data: &[u8]) -> Result<bool, RlpError> {
    match decode_u64(data)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RlpError::InvalidBool(other)),
    }
}

/// Decode an address; exactly 20 bytes or a framing error.
pub fn decode_address(data: &[u8]) -> Result<Address, RlpError> {
    let payload = decode_bytes(data)?;
    Address::from_slice(payload).map_err(|_| RlpError::WrongLength {
        expected: crate::types::ADDRESS_LENGTH,
        actual: payload.len(),
    })
}

/// Decode a hash; exactly 32 bytes or a framing error.
pub fn decode_hash(data: &[u8]) -> Result<Hash, RlpError> {
    let payload = decode_bytes(data)?;
    Hash::from_slice(payload).map_err(|_| RlpError::WrongLength {
        expected: crate::types::HASH_LENGTH,
        actual: payload.len(),
    })
}

/// Decode a signature; exactly 65 bytes or a framing error.
pub fn decode_signature(data: &[u8]) -> Result<Signature, RlpError> {
    let payload = decode_bytes(data)?;
    Signature::from_slice(payload).map_err(|_| RlpError::WrongLength {
        expected: crate::types::SIGNATURE_LENGTH,
        actual: payload.len(),
    })
}

// =============================================================================
// Optional-as-list unwrappers
// =============================================================================

/// Unwrap an optional field: empty list is absent, a one-element list
/// yields the still-encoded inner item.
pub fn decode_opt_raw(data: &[u8]) -> Result<Option<&[u8]>, RlpError> {
    let items = decode_list(data)?;
    match items.len() {
        0 => Ok(None),
        1 => Ok(Some(items[0])),
        n => Err(RlpError::InvalidOptional(n)),
    }
}

/// Decode an optional 64-bit scalar.
pub fn decode_opt_u64(data: &[u8]) -> Result<Option<u64>, RlpError> {
    decode_opt_raw(data)?.map(decode_u64).transpose()
}

/// Decode an optional 256-bit scalar.
pub fn decode_opt_u256(data: &[u8]) -> Result<Option<U256>, RlpError> {
    decode_opt_raw(data)?.map(decode_u256).transpose()
}

/// Decode optional raw bytes.
pub fn decode_opt_bytes(data: &[u8]) -> Result<Option<Vec<u8>>, RlpError> {
    decode_opt_raw(data)?
        .map(|inner| decode_bytes(inner).map(<[u8]>::to_vec))
        .transpose()
}

/// Decode an optional UTF-8 string.
pub fn decode_opt_str(data: &[u8]) -> Result<Option<String>, RlpError> {
    decode_opt_raw(data)?.map(decode_string).transpose()
}

/// Decode an optional address.
pub fn decode_opt_address(data: &[u8]) -> Result<Option<Address>, RlpError> {
    decode_opt_raw(data)?.map(decode_address).transpose()
}

/// Decode an optional hash.
pub fn decode_opt_hash(data: &[u8]) -> Result<Option<Hash>, RlpError> {
    decode_opt_raw(data)?.map(decode_hash).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rlp::encode;

    #[test]
    fn test_decode_bytes_forms() {
        assert_eq!(decode_bytes(&[0x80]).unwrap(), &[] as &[u8]);
        assert_eq!(decode_bytes(&[0x42]).unwrap(), &[0x42]);
        assert_eq!(decode_bytes(&[0x83, b'a', b'b', b'c']).unwrap(), b"abc");

        let long = vec![0xaa; 60];
        let mut encoded = vec![0xb8, 60];
        encoded.extend_from_slice(&long);
        assert_eq!(decode_bytes(&encoded).unwrap(), &long[..]);
    }

    #[test]
    fn test_decode_bytes_rejects_list() {
        assert_eq!(decode_bytes(&[0xc0]), Err(RlpError::ExpectedBytes));
        assert_eq!(
            decode_bytes(&[0xc2, 0x01, 0x02]),
            Err(RlpError::ExpectedBytes)
        );
    }

    #[test]
    fn test_decode_truncated() {
        assert!(matches!(
            decode_bytes(&[0x83, 0x61, 0x62]),
            Err(RlpError::Truncated { .. })
        ));
        assert!(matches!(
            decode_list(&[0xc3, 0x01, 0x02]),
            Err(RlpError::Truncated { .. })
        ));
        assert!(matches!(decode_bytes(&[]), Err(RlpError::Truncated { .. })));
        // Long form missing its length bytes
        assert!(matches!(
            decode_bytes(&[0xb8]),
            Err(RlpError::Truncated { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_oversize_prefix() {
        // Long form used for a 3-byte payload
        assert_eq!(
            decode_bytes(&[0xb8, 0x03, 0x61, 0x62, 0x63]),
            Err(RlpError::OversizePrefix)
        );
        // Leading zero in the length bytes
        let mut data = vec![0xb9, 0x00, 0x38];
        data.extend_from_slice(&[0xaa; 56]);
        assert_eq!(decode_bytes(&data), Err(RlpError::OversizePrefix));
        // Same rules for lists
        let mut list = vec![0xf8, 0x03];
        list.extend_from_slice(&[0x01, 0x02, 0x03]);
        assert_eq!(decode_list(&list), Err(RlpError::OversizePrefix));
    }

    #[test]
    fn test_decode_rejects_wrapped_single_byte() {
        assert_eq!(
            decode_bytes(&[0x81, 0x42]),
            Err(RlpError::NonCanonical("single byte below 0x80 was wrapped"))
        );
        // 0x80 and above legitimately need the prefix
        assert_eq!(decode_bytes(&[0x81, 0x80]).unwrap(), &[0x80]);
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        assert_eq!(
            decode_bytes(&[0x42, 0x43]),
            Err(RlpError::TrailingBytes { trailing: 1 })
        );
        assert_eq!(
            decode_list(&[0xc1, 0x01, 0xff]),
            Err(RlpError::TrailingBytes { trailing: 1 })
        );
    }

    #[test]
    fn test_decode_list_splits_items() {
        let items = decode_list(&[0xc0]).unwrap();
        assert!(items.is_empty());

        let items = decode_list(&[0xc3, 0x01, 0x02, 0x03]).unwrap();
        assert_eq!(items, vec![&[0x01][..], &[0x02][..], &[0x03][..]]);

        // Nested list stays encoded
        let items = decode_list(&[0xc4, 0xc2, 0x01, 0x02, 0x03]).unwrap();
        assert_eq!(items, vec![&[0xc2, 0x01, 0x02][..], &[0x03][..]]);
    }

    #[test]
    fn test_decode_u64_roundtrip() {
        for value in [0u64, 1, 0x7f, 0x80, 255, 256, 1024, u64::MAX] {
            let encoded = encode::encode_u64(value);
            assert_eq!(decode_u64(&encoded).unwrap(), value);
        }
    }

    #[test]
    fn test_decode_u64_rejects_leading_zero() {
        assert_eq!(
            decode_u64(&[0x82, 0x00, 0x01]),
            Err(RlpError::NonCanonical("scalar has leading zero bytes"))
        );
    }

    #[test]
    fn test_decode_u64_overflow() {
        let encoded = [0x89, 0x01, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(decode_u64(&encoded), Err(RlpError::IntegerOverflow));
    }

    #[test]
    fn test_decode_u256_roundtrip() {
        for value in [
            U256::zero(),
            U256::one(),
            U256::from(10_000_000_000u64),
            U256::MAX,
        ] {
            let encoded = encode::encode_u256(&value);
            assert_eq!(decode_u256(&encoded).unwrap(), value);
        }
    }

    #[test]
    fn test_decode_u256_overflow() {
        let mut encoded = vec![0x80 + 33];
        encoded.push(0x01);
        encoded.extend_from_slice(&[0u8; 32]);
        assert_eq!(decode_u256(&encoded), Err(RlpError::IntegerOverflow));
    }

    #[test]
    fn test_decode_address_exact_length_only() {
        let addr = Address::new([0x11; 20]);
        let encoded = encode::encode_address(&addr);
        assert_eq!(decode_address(&encoded).unwrap(), addr);

        let nineteen = encode::encode_bytes(&[0x11; 19]);
        assert_eq!(
            decode_address(&nineteen),
            Err(RlpError::WrongLength {
                expected: 20,
                actual: 19
            })
        );
        let twentyone = encode::encode_bytes(&[0x11; 21]);
        assert!(decode_address(&twentyone).is_err());
    }

    #[test]
    fn test_decode_hash_exact_length_only() {
        let hash = Hash::new([0xab; 32]);
        let encoded = encode::encode_hash(&hash);
        assert_eq!(decode_hash(&encoded).unwrap(), hash);

        let short = encode::encode_bytes(&[0xab; 31]);
        assert_eq!(
            decode_hash(&short),
            Err(RlpError::WrongLength {
                expected: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn test_decode_string_utf8() {
        let encoded = encode::encode_str("Hello GoldenEra!");
        assert_eq!(decode_string(&encoded).unwrap(), "Hello GoldenEra!");

        let bad = encode::encode_bytes(&[0xff, 0xfe]);
        assert_eq!(decode_string(&bad), Err(RlpError::InvalidUtf8));
    }

    #[test]
    fn test_decode_bool() {
        assert!(!decode_bool(&[0x80]).unwrap());
        assert!(decode_bool(&[0x01]).unwrap());
        assert_eq!(decode_bool(&[0x02]), Err(RlpError::InvalidBool(2)));
    }

    #[test]
    fn test_optional_unwrapping() {
        assert_eq!(decode_opt_u64(&[0xc0]).unwrap(), None);
        assert_eq!(decode_opt_u64(&[0xc1, 0x80]).unwrap(), Some(0));
        assert_eq!(decode_opt_u64(&[0xc1, 0x2a]).unwrap(), Some(42));

        let addr = Address::new([0x22; 20]);
        let encoded = encode::encode_opt_address(Some(&addr));
        assert_eq!(decode_opt_address(&encoded).unwrap(), Some(addr));
        assert_eq!(decode_opt_address(&[0xc0]).unwrap(), None);
    }

    #[test]
    fn test_optional_rejects_multi_element() {
        assert_eq!(
            decode_opt_u64(&[0xc2, 0x01, 0x02]),
            Err(RlpError::InvalidOptional(2))
        );
    }

    #[test]
    fn test_optional_zero_distinct_from_absent() {
        // Absence is 0xc0; zero is a wrapped empty scalar
        assert_eq!(encode::encode_opt_u64(None), vec![0xc0]);
        assert_eq!(encode::encode_opt_u64(Some(0)), vec![0xc1, 0x80]);
        assert_eq!(decode_opt_u64(&[0xc0]).unwrap(), None);
        assert_eq!(decode_opt_u64(&[0xc1, 0x80]).unwrap(), Some(0));
    }
}
