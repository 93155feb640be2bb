//! BCS: Binary Canonical Serialization.
//!
//! This crate encodes and decodes values in the BCS wire format used for
//! Move transaction arguments and account data. BCS is deterministic and
//! not self-describing: the same value always produces the same bytes, and
//! decoding needs a [`Schema`] to know what to read.
//!
//! # Quick Start
//!
//! ```rust
//! use bcs_codec::{decode, encode_hex, EnumSchema, EnumValue, Schema, StructSchema, StructValue, Value};
//!
//! let item = StructSchema::new("Item")
//!     .field("name", Schema::Str)
//!     .field("count", Schema::U32)
//!     .field("limit", Schema::option(Schema::U32));
//!
//! let value = StructValue::new(&item, vec![Value::str("A"), Value::U32(1), Value::some(Value::U32(99))])
//!     .unwrap();
//! let value = Value::Struct(value);
//! assert_eq!(encode_hex(&value).unwrap(), "0141010000000163000000");
//!
//! let bytes = bcs_codec::encode(&value).unwrap();
//! let (decoded, consumed) = decode(&bytes, &Schema::Struct(item)).unwrap();
//! assert_eq!(decoded, value);
//! assert_eq!(consumed, bytes.len());
//!
//! // Tag/payload consistency is checked when the enum value is built.
//! let kind = EnumSchema::builder("Kind")
//!     .variant(0, "U32", Schema::U32)
//!     .variant(1, "String", Schema::Str)
//!     .build()
//!     .unwrap();
//! assert!(EnumValue::new(&kind, 0, Value::str("oops")).is_err());
//! ```
//!
//! # Modules
//!
//! - [`model`]: Values, schemas, addresses and `U256`
//! - [`codec`]: Primitive reader/writer and value encode/decode
//! - [`error`]: Error types
//! - [`limits`]: Wire constants and decoding limits
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Lengths and nesting depth are bounded by [`DecodeOptions`]
//! - ULEB128 lengths must be minimal and fit in 32 bits
//! - Truncated input fails with an error, never a partial value

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{
    decode, decode_exact, decode_with_options, encode, encode_hex, encode_value,
    encode_with_schema, encoded_len, DecodeOptions, Reader, Writer,
};
pub use error::{DecodeError, EncodeError, ErrorKind};
pub use model::{
    Address, EnumSchema, EnumValue, Field, FieldSchema, FixedBytes, Schema, StructSchema,
    StructValue, UintWidth, Value, VariantSchema, U256,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
