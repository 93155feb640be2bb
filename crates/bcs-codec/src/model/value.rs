//! Dynamic BCS values.
//!
//! A [`Value`] is a closed sum over the primitive kinds and the four
//! composite kinds (option, sequence, struct, tagged union). Values are
//! immutable once built; structs and enums can only be built through
//! constructors that check them against their schema.

use crate::error::EncodeError;
use crate::model::schema::{EnumSchema, StructSchema};
use crate::model::{parse_u256, Address, Schema, U256};

/// Fixed integer widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UintWidth {
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
}

impl UintWidth {
    /// Width in bits.
    pub fn bits(self) -> u32 {
        match self {
            UintWidth::U8 => 8,
            UintWidth::U16 => 16,
            UintWidth::U32 => 32,
            UintWidth::U64 => 64,
            UintWidth::U128 => 128,
            UintWidth::U256 => 256,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UintWidth::U8 => "u8",
            UintWidth::U16 => "u16",
            UintWidth::U32 => "u32",
            UintWidth::U64 => "u64",
            UintWidth::U128 => "u128",
            UintWidth::U256 => "u256",
        }
    }
}

/// A value that can be encoded to BCS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    U256(U256),
    Bool(bool),
    Address(Address),
    /// Length-prefixed byte string.
    Bytes(Vec<u8>),
    /// Raw bytes; the length is part of the schema, not the wire.
    FixedBytes(FixedBytes),
    Str(String),
    Option(Option<Box<Value>>),
    Sequence(Vec<Value>),
    Struct(StructValue),
    Enum(EnumValue),
}

impl Value {
    /// Builds an integer of the given width from decimal or `0x` hex text.
    ///
    /// Fails with a range error if the number does not fit the width.
    pub fn uint(width: UintWidth, text: &str) -> Result<Value, EncodeError> {
        let n = parse_u256(text).map_err(|e| match e {
            EncodeError::OutOfRange { .. } => EncodeError::OutOfRange {
                width: width.name(),
                value: text.to_string(),
            },
            other => other,
        })?;
        Self::uint_from_u256(width, n)
    }

    /// Builds an integer of the given width from a u128.
    pub fn uint_from_u128(width: UintWidth, n: u128) -> Result<Value, EncodeError> {
        Self::uint_from_u256(width, U256::from(n))
    }

    /// Narrows a U256 to the given width, failing if it does not fit.
    pub fn uint_from_u256(width: UintWidth, n: U256) -> Result<Value, EncodeError> {
        if n.bits() > width.bits() as usize {
            return Err(EncodeError::OutOfRange {
                width: width.name(),
                value: n.to_string(),
            });
        }
        // bits() <= width, so the narrowing casts below cannot truncate
        let small = n.low_u128();
        Ok(match width {
            UintWidth::U8 => Value::U8(small as u8),
            UintWidth::U16 => Value::U16(small as u16),
            UintWidth::U32 => Value::U32(small as u32),
            UintWidth::U64 => Value::U64(small as u64),
            UintWidth::U128 => Value::U128(small),
            UintWidth::U256 => Value::U256(n),
        })
    }

    pub fn str(s: impl Into<String>) -> Value {
        Value::Str(s.into())
    }

    pub fn bytes(b: impl Into<Vec<u8>>) -> Value {
        Value::Bytes(b.into())
    }

    /// Fixed-size bytes whose length is a compile-time constant.
    pub fn fixed_bytes<const N: usize>(bytes: [u8; N]) -> Value {
        Value::FixedBytes(FixedBytes::from_array(bytes))
    }

    /// Fixed-size bytes with a declared length, checked against `bytes`.
    pub fn fixed_bytes_of(len: usize, bytes: impl Into<Vec<u8>>) -> Result<Value, EncodeError> {
        Ok(Value::FixedBytes(FixedBytes::new(len, bytes)?))
    }

    /// Parses an address, left-padding short forms like `0x1`.
    pub fn address(s: &str) -> Result<Value, EncodeError> {
        Ok(Value::Address(Address::from_hex(s)?))
    }

    pub fn some(inner: Value) -> Value {
        Value::Option(Some(Box::new(inner)))
    }

    pub fn none() -> Value {
        Value::Option(None)
    }

    /// Builds a sequence after checking every element against `element`.
    pub fn sequence(element: &Schema, items: Vec<Value>) -> Result<Value, EncodeError> {
        for item in &items {
            element.check(item)?;
        }
        Ok(Value::Sequence(items))
    }

    fn is_composite(&self) -> bool {
        matches!(
            self,
            Value::Option(_) | Value::Sequence(_) | Value::Struct(_) | Value::Enum(_)
        )
    }

    /// Returns a Move-style name for the kind of this value.
    pub fn type_name(&self) -> String {
        match self {
            Value::U8(_) => "u8".to_string(),
            Value::U16(_) => "u16".to_string(),
            Value::U32(_) => "u32".to_string(),
            Value::U64(_) => "u64".to_string(),
            Value::U128(_) => "u128".to_string(),
            Value::U256(_) => "u256".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Address(_) => "address".to_string(),
            Value::Bytes(_) => "vector<u8>".to_string(),
            Value::FixedBytes(b) => format!("[u8; {}]", b.len()),
            Value::Str(_) => "string".to_string(),
            Value::Option(_) => "option".to_string(),
            Value::Sequence(_) => "vector".to_string(),
            Value::Struct(s) => s.name.clone(),
            Value::Enum(e) => e.enum_name.clone(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<u128> for Value {
    fn from(v: u128) -> Self {
        Value::U128(v)
    }
}

impl From<U256> for Value {
    fn from(v: U256) -> Self {
        Value::U256(v)
    }
}

impl From<Address> for Value {
    fn from(v: Address) -> Self {
        Value::Address(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Value::Option(v.map(|inner| Box::new(inner.into())))
    }
}

/// Raw bytes of a declared, fixed length.
///
/// The length never comes from the wire: it is fixed when the value is
/// built, either by the array type or by an explicit declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedBytes {
    bytes: Vec<u8>,
}

impl FixedBytes {
    /// Declares `len` bytes, failing if `bytes` has a different length.
    pub fn new(len: usize, bytes: impl Into<Vec<u8>>) -> Result<Self, EncodeError> {
        let bytes = bytes.into();
        if bytes.len() != len {
            return Err(EncodeError::FixedLengthMismatch {
                expected: len,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    pub fn from_array<const N: usize>(bytes: [u8; N]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Wraps bytes read for a schema-declared length.
    pub(crate) fn from_decoded(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes {
    fn from(bytes: [u8; N]) -> Self {
        Self::from_array(bytes)
    }
}

impl From<FixedBytes> for Value {
    fn from(v: FixedBytes) -> Self {
        Value::FixedBytes(v)
    }
}

// =============================================================================
// SHAPES
// =============================================================================

/// Structural type of a value, used to check that sequence elements agree.
///
/// Parts no value has revealed yet stay open: the inside of `none`, the
/// elements of an empty sequence, and enum variants not seen so far.
#[derive(Debug)]
pub(crate) enum Shape<'a> {
    Open,
    Leaf(String),
    Option(Box<Shape<'a>>),
    Sequence(Box<Shape<'a>>),
    Struct(&'a str, Vec<Shape<'a>>),
    Enum(&'a str, Vec<(u32, Shape<'a>)>),
}

impl<'a> Shape<'a> {
    /// Narrows this shape by `value`. Returns false if they conflict.
    pub(crate) fn unify(&mut self, value: &'a Value) -> bool {
        if let Shape::Open = self {
            *self = Shape::skeleton(value);
        }
        match (self, value) {
            (Shape::Leaf(name), v) if !v.is_composite() => *name == v.type_name(),
            (Shape::Option(inner), Value::Option(v)) => match v {
                Some(v) => inner.unify(v),
                None => true,
            },
            (Shape::Sequence(inner), Value::Sequence(items)) => {
                items.iter().all(|item| inner.unify(item))
            }
            (Shape::Struct(name, fields), Value::Struct(s)) => {
                *name == s.name()
                    && fields.len() == s.fields().len()
                    && fields
                        .iter_mut()
                        .zip(s.fields())
                        .all(|(shape, field)| shape.unify(&field.value))
            }
            (Shape::Enum(name, seen), Value::Enum(e)) => {
                if *name != e.enum_name() {
                    return false;
                }
                match seen.iter().position(|(tag, _)| *tag == e.tag()) {
                    Some(i) => seen[i].1.unify(e.payload()),
                    None => {
                        let mut shape = Shape::Open;
                        let ok = shape.unify(e.payload());
                        seen.push((e.tag(), shape));
                        ok
                    }
                }
            }
            _ => false,
        }
    }

    fn skeleton(value: &'a Value) -> Shape<'a> {
        match value {
            Value::Option(_) => Shape::Option(Box::new(Shape::Open)),
            Value::Sequence(_) => Shape::Sequence(Box::new(Shape::Open)),
            Value::Struct(s) => {
                Shape::Struct(s.name(), s.fields().iter().map(|_| Shape::Open).collect())
            }
            Value::Enum(e) => Shape::Enum(e.enum_name(), Vec::new()),
            other => Shape::Leaf(other.type_name()),
        }
    }
}

/// A struct field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

/// A struct instance whose fields match a [`StructSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructValue {
    name: String,
    fields: Vec<Field>,
}

impl StructValue {
    /// Builds a struct from field values given in declaration order.
    pub fn new(schema: &StructSchema, values: Vec<Value>) -> Result<Self, EncodeError> {
        if values.len() != schema.fields.len() {
            return Err(EncodeError::FieldCountMismatch {
                name: schema.name.clone(),
                expected: schema.fields.len(),
                actual: values.len(),
            });
        }
        for (field, value) in schema.fields.iter().zip(&values) {
            field.schema.check(value)?;
        }
        Ok(Self::from_parts(schema, values))
    }

    /// Pairs already-checked values with the schema's field names.
    pub(crate) fn from_parts(schema: &StructSchema, values: Vec<Value>) -> Self {
        let fields = schema
            .fields
            .iter()
            .zip(values)
            .map(|(field, value)| Field {
                name: field.name.clone(),
                value,
            })
            .collect();
        Self {
            name: schema.name.clone(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}

/// A tagged-union instance.
///
/// The payload is guaranteed to match the schema registered for the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    enum_name: String,
    variant_name: String,
    tag: u32,
    payload: Box<Value>,
}

impl EnumValue {
    /// Builds a tagged union, failing with an invalid-variant error if the
    /// tag is unknown or the payload does not match the tag's schema.
    pub fn new(schema: &EnumSchema, tag: u32, payload: Value) -> Result<Self, EncodeError> {
        let variant = schema.variant(tag).ok_or_else(|| EncodeError::UnknownVariant {
            name: schema.name().to_string(),
            tag,
        })?;
        if variant.payload.check(&payload).is_err() {
            return Err(EncodeError::VariantPayloadMismatch {
                name: schema.name().to_string(),
                tag,
                expected: variant.payload.type_name(),
                found: payload.type_name(),
            });
        }
        Ok(Self::from_parts(schema, tag, payload))
    }

    /// Builds a tagged union by variant name.
    pub fn named(schema: &EnumSchema, variant: &str, payload: Value) -> Result<Self, EncodeError> {
        let tag = schema
            .variant_named(variant)
            .ok_or_else(|| EncodeError::SchemaMismatch {
                expected: format!("variant of {}", schema.name()),
                found: variant.to_string(),
            })?
            .tag;
        Self::new(schema, tag, payload)
    }

    /// Assembles a value whose tag is registered and payload already checked.
    pub(crate) fn from_parts(schema: &EnumSchema, tag: u32, payload: Value) -> Self {
        let variant_name = schema
            .variant(tag)
            .map(|v| v.name.clone())
            .unwrap_or_default();
        Self {
            enum_name: schema.name().to_string(),
            variant_name,
            tag,
            payload: Box::new(payload),
        }
    }

    pub fn enum_name(&self) -> &str {
        &self.enum_name
    }

    pub fn variant_name(&self) -> &str {
        &self.variant_name
    }

    pub fn tag(&self) -> u32 {
        self.tag
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

impl From<StructValue> for Value {
    fn from(v: StructValue) -> Self {
        Value::Struct(v)
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Value::Enum(v)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::ser::{SerializeMap, Serializer};
    use serde::Serialize;

    use super::{EnumValue, StructValue, Value};

    /// Serializes values the way they read in a debugger: integers as
    /// numbers (u256 as a decimal string), byte strings as `0x` hex,
    /// structs as objects and enums as `{variant: payload}`.
    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Value::U8(v) => serializer.serialize_u8(*v),
                Value::U16(v) => serializer.serialize_u16(*v),
                Value::U32(v) => serializer.serialize_u32(*v),
                Value::U64(v) => serializer.serialize_u64(*v),
                Value::U128(v) => serializer.serialize_u128(*v),
                Value::U256(v) => serializer.collect_str(v),
                Value::Bool(v) => serializer.serialize_bool(*v),
                Value::Address(v) => v.serialize(serializer),
                Value::Bytes(b) => serializer.serialize_str(&format!("0x{}", hex::encode(b))),
                Value::FixedBytes(b) => {
                    serializer.serialize_str(&format!("0x{}", hex::encode(b.as_bytes())))
                }
                Value::Str(s) => serializer.serialize_str(s),
                Value::Option(None) => serializer.serialize_none(),
                Value::Option(Some(v)) => serializer.serialize_some(v.as_ref()),
                Value::Sequence(items) => serializer.collect_seq(items),
                Value::Struct(s) => s.serialize(serializer),
                Value::Enum(e) => e.serialize(serializer),
            }
        }
    }

    impl Serialize for StructValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.fields.len()))?;
            for field in &self.fields {
                map.serialize_entry(&field.name, &field.value)?;
            }
            map.end()
        }
    }

    impl Serialize for EnumValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry(&self.variant_name, self.payload.as_ref())?;
            map.end()
        }
    }
}
