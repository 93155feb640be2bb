//! Binary encoding/decoding for BCS.

pub mod primitives;
pub mod value;

pub use primitives::{uleb128_len, Reader, Writer};
pub use value::{
    decode, decode_exact, decode_value, decode_with_options, encode, encode_hex, encode_value,
    encode_with_schema, encoded_len, DecodeOptions,
};
