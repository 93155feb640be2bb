//! Property tests for the round-trip and truncation laws.

use bcs_codec::{
    decode, decode_exact, encode, encoded_len, Address, EnumSchema, EnumValue, ErrorKind, Reader,
    Schema, StructSchema, StructValue, Value, Writer, U256,
};
use proptest::prelude::*;

fn kind_schema() -> EnumSchema {
    EnumSchema::builder("Kind")
        .variant(0, "Count", Schema::U32)
        .variant(1, "Label", Schema::Str)
        .variant(2, "Pair", Schema::sequence(Schema::U16))
        .build()
        .unwrap()
}

fn record_schema() -> StructSchema {
    StructSchema::new("Record")
        .field("a", Schema::U8)
        .field("b", Schema::U16)
        .field("c", Schema::U64)
        .field("d", Schema::U128)
        .field("e", Schema::U256)
        .field("flag", Schema::Bool)
        .field("owner", Schema::Address)
        .field("name", Schema::Str)
        .field("blob", Schema::Bytes)
        .field("digest", Schema::FixedBytes(4))
        .field("maybe", Schema::option(Schema::U32))
        .field("list", Schema::sequence(Schema::U64))
        .field("kind", kind_schema().into())
}

#[derive(Debug, Clone)]
struct Record {
    a: u8,
    b: u16,
    c: u64,
    d: u128,
    e: [u8; 32],
    flag: bool,
    owner: [u8; 32],
    name: String,
    blob: Vec<u8>,
    digest: [u8; 4],
    maybe: Option<u32>,
    list: Vec<u64>,
    kind: (u32, u32, String, Vec<u16>),
}

impl Record {
    fn kind_value(&self) -> Value {
        let (tag, count, label, pair) = self.kind.clone();
        let payload = match tag {
            0 => Value::U32(count),
            1 => Value::Str(label),
            _ => Value::Sequence(pair.into_iter().map(Value::U16).collect()),
        };
        EnumValue::new(&kind_schema(), tag, payload).unwrap().into()
    }

    fn to_value(&self) -> Value {
        let values = vec![
            Value::U8(self.a),
            Value::U16(self.b),
            Value::U64(self.c),
            Value::U128(self.d),
            Value::U256(U256::from_little_endian(&self.e)),
            Value::Bool(self.flag),
            Value::Address(Address::new(self.owner)),
            Value::Str(self.name.clone()),
            Value::Bytes(self.blob.clone()),
            Value::fixed_bytes(self.digest),
            self.maybe.into(),
            Value::Sequence(self.list.iter().copied().map(Value::U64).collect()),
            self.kind_value(),
        ];
        StructValue::new(&record_schema(), values).unwrap().into()
    }
}

prop_compose! {
    fn arb_record(max_text: usize, max_items: usize)(
        a in any::<u8>(),
        b in any::<u16>(),
        c in any::<u64>(),
        d in any::<u128>(),
        e in any::<[u8; 32]>(),
        flag in any::<bool>(),
        owner in any::<[u8; 32]>(),
        name in prop::collection::vec(any::<char>(), 0..max_text),
        blob in prop::collection::vec(any::<u8>(), 0..max_text * 5),
        digest in any::<[u8; 4]>(),
        maybe in any::<Option<u32>>(),
        list in prop::collection::vec(any::<u64>(), 0..max_items),
        kind in (0u32..3, any::<u32>(), ".{0,8}", prop::collection::vec(any::<u16>(), 0..4)),
    ) -> Record {
        let name = name.into_iter().collect();
        Record { a, b, c, d, e, flag, owner, name, blob, digest, maybe, list, kind }
    }
}

proptest! {
    #[test]
    fn uleb128_roundtrip(v in any::<u32>()) {
        let mut writer = Writer::new();
        writer.write_uleb128(v);
        prop_assert!(writer.len() <= 5);
        let mut reader = Reader::new(writer.as_bytes());
        prop_assert_eq!(reader.read_uleb128("prop").unwrap(), v);
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn u32_roundtrip(v in any::<u32>()) {
        let bytes = encode(&Value::U32(v)).unwrap();
        prop_assert_eq!(&bytes, &v.to_le_bytes().to_vec());
        prop_assert_eq!(decode_exact(&bytes, &Schema::U32).unwrap(), Value::U32(v));
    }

    #[test]
    fn u256_roundtrip(le in any::<[u8; 32]>()) {
        let value = Value::U256(U256::from_little_endian(&le));
        let bytes = encode(&value).unwrap();
        prop_assert_eq!(&bytes[..], &le[..]);
        prop_assert_eq!(decode_exact(&bytes, &Schema::U256).unwrap(), value);
    }

    #[test]
    fn record_roundtrip(record in arb_record(40, 20)) {
        let value = record.to_value();
        let bytes = encode(&value).unwrap();
        prop_assert_eq!(encoded_len(&value).unwrap(), bytes.len());

        let schema = Schema::Struct(record_schema());
        let (decoded, consumed) = decode(&bytes, &schema).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn truncated_input_is_eof(
        record in arb_record(10, 5),
        cut in any::<prop::sample::Index>(),
    ) {
        let bytes = encode(&record.to_value()).unwrap();
        let cut = cut.index(bytes.len());
        let err = decode(&bytes[..cut], &Schema::Struct(record_schema())).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
    }
}
