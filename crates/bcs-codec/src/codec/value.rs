//! Value encoding/decoding for the BCS binary format.
//!
//! Wire rules:
//! - integers: little-endian at their fixed width
//! - bool / option presence: one byte, 0 or 1
//! - address: 32 raw bytes
//! - bytes, string, sequence: ULEB128 length, then the contents
//! - fixed bytes: raw, length taken from the schema
//! - struct: fields concatenated in declaration order
//! - enum: plain u32 tag (not ULEB128), then the payload

use crate::codec::primitives::{checked_length, uleb128_len, Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{
    ADDRESS_LENGTH, MAX_CONTAINER_DEPTH, MAX_SEQUENCE_LENGTH, MAX_ZERO_SIZED_ELEMENTS,
};
use crate::model::value::Shape;
use crate::model::{EnumValue, FixedBytes, Schema, StructValue, Value};

// =============================================================================
// DECODING
// =============================================================================

/// Options controlling how strictly input is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting of option, sequence, struct and enum containers.
    pub max_container_depth: usize,
    /// Maximum element count for sequences, byte strings and strings.
    pub max_sequence_length: usize,
    /// Whether input may continue past the top-level value.
    pub allow_trailing_bytes: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_container_depth: MAX_CONTAINER_DEPTH,
            max_sequence_length: MAX_SEQUENCE_LENGTH,
            allow_trailing_bytes: true,
        }
    }
}

impl DecodeOptions {
    /// Creates default options (trailing bytes allowed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that reject trailing bytes.
    pub fn strict() -> Self {
        Self {
            allow_trailing_bytes: false,
            ..Self::default()
        }
    }

    pub fn with_max_container_depth(mut self, depth: usize) -> Self {
        self.max_container_depth = depth;
        self
    }

    pub fn with_max_sequence_length(mut self, len: usize) -> Self {
        self.max_sequence_length = len.min(MAX_SEQUENCE_LENGTH);
        self
    }
}

/// Decodes a value of the given schema from the start of `bytes`.
///
/// Returns the value and the number of bytes consumed. Input past the
/// value is left unread.
pub fn decode(bytes: &[u8], schema: &Schema) -> Result<(Value, usize), DecodeError> {
    decode_with_options(bytes, schema, &DecodeOptions::default())
}

/// Decodes a value that must span all of `bytes`.
pub fn decode_exact(bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError> {
    decode_with_options(bytes, schema, &DecodeOptions::strict()).map(|(value, _)| value)
}

/// Decodes a value with explicit options.
pub fn decode_with_options(
    bytes: &[u8],
    schema: &Schema,
    options: &DecodeOptions,
) -> Result<(Value, usize), DecodeError> {
    let mut reader = Reader::new(bytes);
    let value = decode_value(&mut reader, schema, options)?;
    if !options.allow_trailing_bytes && !reader.is_empty() {
        return Err(DecodeError::TrailingBytes {
            count: reader.remaining_len(),
        });
    }
    Ok((value, reader.position()))
}

/// Decodes one value from the reader, advancing it past the value.
pub fn decode_value(
    reader: &mut Reader<'_>,
    schema: &Schema,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    decode_at_depth(reader, schema, options, 0)
}

fn enter(depth: usize, options: &DecodeOptions) -> Result<usize, DecodeError> {
    let next = depth + 1;
    if next > options.max_container_depth {
        return Err(DecodeError::LengthExceedsLimit {
            field: "depth",
            len: next,
            max: options.max_container_depth,
        });
    }
    Ok(next)
}

fn decode_at_depth(
    reader: &mut Reader<'_>,
    schema: &Schema,
    options: &DecodeOptions,
    depth: usize,
) -> Result<Value, DecodeError> {
    let max_len = options.max_sequence_length;
    let value = match schema {
        Schema::U8 => Value::U8(reader.read_u8()?),
        Schema::U16 => Value::U16(reader.read_u16()?),
        Schema::U32 => Value::U32(reader.read_u32()?),
        Schema::U64 => Value::U64(reader.read_u64()?),
        Schema::U128 => Value::U128(reader.read_u128()?),
        Schema::U256 => Value::U256(reader.read_u256()?),
        Schema::Bool => Value::Bool(reader.read_bool("bool")?),
        Schema::Address => Value::Address(reader.read_address()?),
        Schema::Bytes => Value::Bytes(reader.read_bytes_prefixed(max_len, "bytes")?.to_vec()),
        Schema::FixedBytes(n) => {
            Value::FixedBytes(FixedBytes::from_decoded(reader.read_bytes(*n, "fixed_bytes")?))
        }
        Schema::Str => Value::Str(reader.read_str(max_len, "string")?.to_string()),
        Schema::Option(inner) => {
            let depth = enter(depth, options)?;
            if reader.read_bool("option")? {
                Value::some(decode_at_depth(reader, inner, options, depth)?)
            } else {
                Value::none()
            }
        }
        Schema::Sequence(inner) => {
            let depth = enter(depth, options)?;
            let count = reader.read_length(max_len, "sequence")?;
            check_sequence_fits(reader, inner, count)?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(decode_at_depth(reader, inner, options, depth)?);
            }
            Value::Sequence(items)
        }
        Schema::Struct(schema) => {
            let depth = enter(depth, options)?;
            let mut values = Vec::with_capacity(schema.fields.len());
            for field in &schema.fields {
                values.push(decode_at_depth(reader, &field.schema, options, depth)?);
            }
            Value::Struct(StructValue::from_parts(schema, values))
        }
        Schema::Enum(schema) => {
            let depth = enter(depth, options)?;
            let tag = reader.read_u32()?;
            let variant = schema.variant(tag).ok_or_else(|| DecodeError::UnknownVariant {
                name: schema.name().to_string(),
                tag,
            })?;
            let payload = decode_at_depth(reader, &variant.payload, options, depth)?;
            Value::Enum(EnumValue::from_parts(schema, tag, payload))
        }
    };
    Ok(value)
}

/// Rejects element counts the remaining input cannot hold.
fn check_sequence_fits(reader: &Reader<'_>, element: &Schema, count: usize) -> Result<(), DecodeError> {
    match element.min_encoded_len() {
        0 if count > MAX_ZERO_SIZED_ELEMENTS => Err(DecodeError::LengthExceedsLimit {
            field: "sequence",
            len: count,
            max: MAX_ZERO_SIZED_ELEMENTS,
        }),
        0 => Ok(()),
        min => {
            let needed = count.saturating_mul(min);
            if needed > reader.remaining_len() {
                return Err(DecodeError::UnexpectedEof {
                    context: "sequence",
                    needed,
                    remaining: reader.remaining_len(),
                });
            }
            Ok(())
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value to a fresh byte vector.
///
/// The whole value is validated and measured before any byte is written,
/// so a failing value never produces a partial encoding.
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let len = encoded_len(value)?;
    let mut writer = Writer::with_capacity(len);
    write_value(&mut writer, value)?;
    Ok(writer.into_bytes())
}

/// Encodes a value and returns it as lowercase hex without a prefix.
pub fn encode_hex(value: &Value) -> Result<String, EncodeError> {
    Ok(hex::encode(encode(value)?))
}

/// Checks the value against `schema`, then encodes it.
pub fn encode_with_schema(value: &Value, schema: &Schema) -> Result<Vec<u8>, EncodeError> {
    schema.check(value)?;
    encode(value)
}

/// Appends a value to an existing writer.
///
/// Nothing is appended if the value fails validation.
pub fn encode_value(writer: &mut Writer, value: &Value) -> Result<(), EncodeError> {
    encoded_len(value)?;
    write_value(writer, value)
}

/// Returns the exact number of bytes `value` encodes to.
///
/// Fails on the same conditions as [`encode`]: over-long lengths, nesting
/// deeper than [`MAX_CONTAINER_DEPTH`], and sequences whose elements do not
/// share one shape.
pub fn encoded_len(value: &Value) -> Result<usize, EncodeError> {
    measure(value, 0)
}

fn measure(value: &Value, depth: usize) -> Result<usize, EncodeError> {
    let prefixed = |len: usize, field: &'static str| -> Result<usize, EncodeError> {
        Ok(uleb128_len(checked_length(len, field)?) + len)
    };
    let size = match value {
        Value::U8(_) | Value::Bool(_) => 1,
        Value::U16(_) => 2,
        Value::U32(_) => 4,
        Value::U64(_) => 8,
        Value::U128(_) => 16,
        Value::U256(_) => 32,
        Value::Address(_) => ADDRESS_LENGTH,
        Value::Bytes(b) => prefixed(b.len(), "bytes")?,
        Value::FixedBytes(b) => b.len(),
        Value::Str(s) => prefixed(s.len(), "string")?,
        Value::Option(inner) => {
            let depth = enter_encode(depth)?;
            match inner {
                Some(v) => 1 + measure(v, depth)?,
                None => 1,
            }
        }
        Value::Sequence(items) => {
            let depth = enter_encode(depth)?;
            check_homogeneous(items)?;
            let prefix = uleb128_len(checked_length(items.len(), "sequence")?);
            let mut total = 0;
            for item in items {
                total += measure(item, depth)?;
            }
            if total == 0 && items.len() > MAX_ZERO_SIZED_ELEMENTS {
                return Err(EncodeError::LengthExceedsLimit {
                    field: "sequence",
                    len: items.len(),
                    max: MAX_ZERO_SIZED_ELEMENTS,
                });
            }
            prefix + total
        }
        Value::Struct(s) => {
            let depth = enter_encode(depth)?;
            let mut total = 0;
            for field in s.fields() {
                total += measure(&field.value, depth)?;
            }
            total
        }
        Value::Enum(e) => {
            let depth = enter_encode(depth)?;
            4 + measure(e.payload(), depth)?
        }
    };
    Ok(size)
}

fn check_homogeneous(items: &[Value]) -> Result<(), EncodeError> {
    let mut shape = Shape::Open;
    for item in items {
        if !shape.unify(item) {
            return Err(EncodeError::SchemaMismatch {
                expected: items[0].type_name(),
                found: item.type_name(),
            });
        }
    }
    Ok(())
}

fn enter_encode(depth: usize) -> Result<usize, EncodeError> {
    let next = depth + 1;
    if next > MAX_CONTAINER_DEPTH {
        return Err(EncodeError::LengthExceedsLimit {
            field: "depth",
            len: next,
            max: MAX_CONTAINER_DEPTH,
        });
    }
    Ok(next)
}

fn write_value(writer: &mut Writer, value: &Value) -> Result<(), EncodeError> {
    match value {
        Value::U8(v) => writer.write_u8(*v),
        Value::U16(v) => writer.write_u16(*v),
        Value::U32(v) => writer.write_u32(*v),
        Value::U64(v) => writer.write_u64(*v),
        Value::U128(v) => writer.write_u128(*v),
        Value::U256(v) => writer.write_u256(v),
        Value::Bool(v) => writer.write_bool(*v),
        Value::Address(a) => writer.write_address(a),
        Value::Bytes(b) => writer.write_bytes_prefixed(b)?,
        Value::FixedBytes(b) => writer.write_bytes(b.as_bytes()),
        Value::Str(s) => writer.write_str(s)?,
        Value::Option(None) => writer.write_bool(false),
        Value::Option(Some(v)) => {
            writer.write_bool(true);
            write_value(writer, v)?;
        }
        Value::Sequence(items) => {
            writer.write_length(items.len(), "sequence")?;
            for item in items {
                write_value(writer, item)?;
            }
        }
        Value::Struct(s) => {
            for field in s.fields() {
                write_value(writer, &field.value)?;
            }
        }
        Value::Enum(e) => {
            writer.write_u32(e.tag());
            write_value(writer, e.payload())?;
        }
    }
    Ok(())
}
