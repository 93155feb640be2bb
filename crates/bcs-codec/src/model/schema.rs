//! Schemas describing the shape of BCS values.
//!
//! BCS bytes are not self-describing: the decoder needs a schema to know
//! how many fields a struct has, which payload an enum tag selects and how
//! long a fixed byte array is. Schemas are also used to check values
//! before encoding.

use rustc_hash::FxHashMap;

use crate::error::EncodeError;
use crate::limits::ADDRESS_LENGTH;
use crate::model::Value;

/// The type of a BCS value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Bool,
    Address,
    /// Length-prefixed byte string.
    Bytes,
    /// Raw bytes with a length known from the schema, no prefix on the wire.
    FixedBytes(usize),
    /// Length-prefixed UTF-8 string.
    Str,
    Option(Box<Schema>),
    Sequence(Box<Schema>),
    Struct(StructSchema),
    Enum(EnumSchema),
}

impl Schema {
    pub fn option(inner: Schema) -> Self {
        Schema::Option(Box::new(inner))
    }

    pub fn sequence(element: Schema) -> Self {
        Schema::Sequence(Box::new(element))
    }

    /// Returns a Move-style type name, e.g. `vector<u8>`.
    pub fn type_name(&self) -> String {
        match self {
            Schema::U8 => "u8".to_string(),
            Schema::U16 => "u16".to_string(),
            Schema::U32 => "u32".to_string(),
            Schema::U64 => "u64".to_string(),
            Schema::U128 => "u128".to_string(),
            Schema::U256 => "u256".to_string(),
            Schema::Bool => "bool".to_string(),
            Schema::Address => "address".to_string(),
            Schema::Bytes => "vector<u8>".to_string(),
            Schema::FixedBytes(n) => format!("[u8; {n}]"),
            Schema::Str => "string".to_string(),
            Schema::Option(inner) => format!("option<{}>", inner.type_name()),
            Schema::Sequence(inner) => format!("vector<{}>", inner.type_name()),
            Schema::Struct(s) => s.name.clone(),
            Schema::Enum(e) => e.name.clone(),
        }
    }

    /// Checks that `value` has exactly the shape this schema declares.
    pub fn check(&self, value: &Value) -> Result<(), EncodeError> {
        match (self, value) {
            (Schema::U8, Value::U8(_))
            | (Schema::U16, Value::U16(_))
            | (Schema::U32, Value::U32(_))
            | (Schema::U64, Value::U64(_))
            | (Schema::U128, Value::U128(_))
            | (Schema::U256, Value::U256(_))
            | (Schema::Bool, Value::Bool(_))
            | (Schema::Address, Value::Address(_))
            | (Schema::Bytes, Value::Bytes(_))
            | (Schema::Str, Value::Str(_)) => Ok(()),
            (Schema::FixedBytes(n), Value::FixedBytes(bytes)) => {
                if bytes.len() != *n {
                    return Err(EncodeError::FixedLengthMismatch {
                        expected: *n,
                        actual: bytes.len(),
                    });
                }
                Ok(())
            }
            (Schema::Option(_), Value::Option(None)) => Ok(()),
            (Schema::Option(inner), Value::Option(Some(v))) => inner.check(v),
            (Schema::Sequence(inner), Value::Sequence(items)) => {
                items.iter().try_for_each(|item| inner.check(item))
            }
            (Schema::Struct(schema), Value::Struct(v)) if schema.name == v.name() => {
                schema.check_fields(v.fields().iter().map(|f| (f.name.as_str(), &f.value)))
            }
            (Schema::Enum(schema), Value::Enum(v)) if schema.name == v.enum_name() => {
                let variant = schema.variant(v.tag()).ok_or_else(|| EncodeError::UnknownVariant {
                    name: schema.name.clone(),
                    tag: v.tag(),
                })?;
                variant.payload.check(v.payload())
            }
            _ => Err(EncodeError::SchemaMismatch {
                expected: self.type_name(),
                found: value.type_name(),
            }),
        }
    }

    /// Fewest bytes any value of this schema encodes to.
    ///
    /// Zero for empty structs and zero-length fixed bytes, and for
    /// containers built only from those.
    pub fn min_encoded_len(&self) -> usize {
        match self {
            Schema::U8 | Schema::Bool => 1,
            Schema::U16 => 2,
            Schema::U32 => 4,
            Schema::U64 => 8,
            Schema::U128 => 16,
            Schema::U256 => 32,
            Schema::Address => ADDRESS_LENGTH,
            Schema::FixedBytes(n) => *n,
            // one-byte length or presence prefix
            Schema::Bytes | Schema::Str | Schema::Option(_) | Schema::Sequence(_) => 1,
            Schema::Struct(s) => s
                .fields
                .iter()
                .fold(0usize, |acc, f| acc.saturating_add(f.schema.min_encoded_len())),
            Schema::Enum(e) => {
                let payload = e.variants().iter().map(|v| v.payload.min_encoded_len()).min();
                4usize.saturating_add(payload.unwrap_or(0))
            }
        }
    }
}

/// A named struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    pub schema: Schema,
}

/// An ordered, fixed set of named fields.
///
/// Encodes as the concatenation of its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
}

impl StructSchema {
    /// Creates a struct schema with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            schema,
        });
        self
    }

    pub(crate) fn check_fields<'v>(
        &self,
        values: impl ExactSizeIterator<Item = (&'v str, &'v Value)>,
    ) -> Result<(), EncodeError> {
        if values.len() != self.fields.len() {
            return Err(EncodeError::FieldCountMismatch {
                name: self.name.clone(),
                expected: self.fields.len(),
                actual: values.len(),
            });
        }
        for (field, (name, value)) in self.fields.iter().zip(values) {
            if field.name != name {
                return Err(EncodeError::SchemaMismatch {
                    expected: format!("{}.{}", self.name, field.name),
                    found: format!("{}.{}", self.name, name),
                });
            }
            field.schema.check(value)?;
        }
        Ok(())
    }
}

impl From<StructSchema> for Schema {
    fn from(s: StructSchema) -> Self {
        Schema::Struct(s)
    }
}

/// One alternative of a tagged union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSchema {
    pub tag: u32,
    pub name: String,
    pub payload: Schema,
}

/// A tagged union: a u32 discriminant followed by the payload registered
/// for that tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSchema {
    name: String,
    variants: Vec<VariantSchema>,
    by_tag: FxHashMap<u32, usize>,
}

impl EnumSchema {
    /// Starts building an enum schema.
    pub fn builder(name: impl Into<String>) -> EnumSchemaBuilder {
        EnumSchemaBuilder {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variants in registration order.
    pub fn variants(&self) -> &[VariantSchema] {
        &self.variants
    }

    /// Looks up the variant registered for `tag`.
    pub fn variant(&self, tag: u32) -> Option<&VariantSchema> {
        self.by_tag.get(&tag).map(|&i| &self.variants[i])
    }

    /// Looks up a variant by name.
    pub fn variant_named(&self, name: &str) -> Option<&VariantSchema> {
        self.variants.iter().find(|v| v.name == name)
    }
}

impl From<EnumSchema> for Schema {
    fn from(e: EnumSchema) -> Self {
        Schema::Enum(e)
    }
}

/// Builder for [`EnumSchema`].
#[derive(Debug, Clone)]
pub struct EnumSchemaBuilder {
    name: String,
    variants: Vec<VariantSchema>,
}

impl EnumSchemaBuilder {
    /// Registers `payload` as the schema for `tag`.
    pub fn variant(mut self, tag: u32, name: impl Into<String>, payload: Schema) -> Self {
        self.variants.push(VariantSchema {
            tag,
            name: name.into(),
            payload,
        });
        self
    }

    /// Finishes the schema, rejecting duplicate tags.
    pub fn build(self) -> Result<EnumSchema, EncodeError> {
        let mut by_tag = FxHashMap::default();
        for (i, variant) in self.variants.iter().enumerate() {
            if by_tag.insert(variant.tag, i).is_some() {
                return Err(EncodeError::DuplicateVariant {
                    name: self.name,
                    tag: variant.tag,
                });
            }
        }
        Ok(EnumSchema {
            name: self.name,
            variants: self.variants,
            by_tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StructValue;

    fn point_schema() -> StructSchema {
        StructSchema::new("Point").field("x", Schema::U32).field("y", Schema::U32)
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Schema::sequence(Schema::U8).type_name(), "vector<u8>");
        assert_eq!(Schema::option(Schema::Str).type_name(), "option<string>");
        assert_eq!(Schema::FixedBytes(3).type_name(), "[u8; 3]");
        assert_eq!(Schema::from(point_schema()).type_name(), "Point");
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let result = EnumSchema::builder("E")
            .variant(0, "A", Schema::U8)
            .variant(0, "B", Schema::U16)
            .build();
        assert!(matches!(result, Err(EncodeError::DuplicateVariant { tag: 0, .. })));
    }

    #[test]
    fn test_variant_lookup() {
        let schema = EnumSchema::builder("E")
            .variant(0, "A", Schema::U8)
            .variant(7, "B", Schema::Str)
            .build()
            .unwrap();
        assert_eq!(schema.variant(7).unwrap().name, "B");
        assert_eq!(schema.variant_named("A").unwrap().tag, 0);
        assert!(schema.variant(1).is_none());
    }

    #[test]
    fn test_check_primitives() {
        assert!(Schema::U32.check(&Value::U32(1)).is_ok());
        let err = Schema::U32.check(&Value::Str("1".to_string())).unwrap_err();
        assert_eq!(
            err,
            EncodeError::SchemaMismatch {
                expected: "u32".to_string(),
                found: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_check_fixed_bytes_length() {
        let schema = Schema::FixedBytes(4);
        assert!(schema.check(&Value::fixed_bytes([1u8, 2, 3, 4])).is_ok());
        let err = schema.check(&Value::fixed_bytes([1u8, 2])).unwrap_err();
        assert_eq!(err, EncodeError::FixedLengthMismatch { expected: 4, actual: 2 });
    }

    #[test]
    fn test_min_encoded_len() {
        assert_eq!(Schema::U64.min_encoded_len(), 8);
        assert_eq!(Schema::Str.min_encoded_len(), 1);
        assert_eq!(Schema::sequence(Schema::U256).min_encoded_len(), 1);
        assert_eq!(Schema::FixedBytes(0).min_encoded_len(), 0);
        assert_eq!(Schema::from(StructSchema::new("Unit")).min_encoded_len(), 0);

        let pair = StructSchema::new("Pair").field("a", Schema::U16).field("b", Schema::Address);
        assert_eq!(Schema::from(pair).min_encoded_len(), 34);

        let kind = EnumSchema::builder("Kind")
            .variant(0, "Wide", Schema::U128)
            .variant(1, "Narrow", Schema::U8)
            .build()
            .unwrap();
        assert_eq!(Schema::from(kind).min_encoded_len(), 5);
    }

    #[test]
    fn test_check_heterogeneous_sequence() {
        let schema = Schema::sequence(Schema::U8);
        let value = Value::Sequence(vec![Value::U8(1), Value::U16(2)]);
        assert!(matches!(schema.check(&value), Err(EncodeError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_check_struct() {
        let schema = point_schema();
        let value = StructValue::new(&schema, vec![Value::U32(1), Value::U32(2)]).unwrap();
        assert!(Schema::from(schema).check(&Value::Struct(value)).is_ok());
    }
}
