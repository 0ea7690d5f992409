//! Recursive Length Prefix Codec
//!
//! Byte-accurate RLP encoding and decoding, plus the optional-as-list
//! convention used throughout the transaction wire format: a present
//! optional value encodes as a one-element list wrapping the value, an
//! absent one as the empty list `0xc0`. Absence and zero are distinct:
//! `nonce = 0` encodes as `[0x80]` wrapped in a list, `nonce` absent
//! encodes as the single byte `0xc0`.

mod decode;
mod encode;

pub use decode::{
    decode_address, decode_bool, decode_bytes, decode_hash, decode_list, decode_opt_address,
    decode_opt_bytes, decode_opt_hash, decode_opt_raw, decode_opt_str, decode_opt_u256,
    decode_opt_u64, decode_signature, decode_string, decode_u256, decode_u64, RlpError,
};
pub use encode::{
    empty_list, encode_address, encode_bool, encode_bytes, encode_hash, encode_list,
    encode_opt_address, encode_opt_bytes, encode_opt_hash, encode_opt_raw, encode_opt_str,
    encode_opt_u256, encode_opt_u64, encode_str, encode_u256, encode_u64,
};
