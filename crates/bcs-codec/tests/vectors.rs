//! Golden byte strings for primitives and composite values.

use bcs_codec::{
    decode, decode_exact, encode, encode_hex, EnumSchema, EnumValue, ErrorKind, Schema,
    StructSchema, StructValue, UintWidth, Value,
};

fn hex(value: &Value) -> String {
    encode_hex(value).unwrap()
}

fn item_schema() -> StructSchema {
    StructSchema::new("Struct")
        .field("str", Schema::Str)
        .field("num", Schema::U32)
        .field("option", Schema::option(Schema::U32))
}

fn kind_schema() -> EnumSchema {
    EnumSchema::builder("Enum")
        .variant(0, "U32", Schema::U32)
        .variant(1, "String", Schema::Str)
        .variant(2, "U64", Schema::U64)
        .build()
        .unwrap()
}

fn complex_schema() -> StructSchema {
    StructSchema::new("ComplexStruct")
        .field("structs", Schema::sequence(item_schema().into()))
        .field("enums", Schema::sequence(kind_schema().into()))
}

fn item(s: &str, num: u32, option: Option<u32>) -> Value {
    StructValue::new(&item_schema(), vec![Value::str(s), Value::U32(num), option.into()])
        .unwrap()
        .into()
}

fn kind(tag: u32, payload: Value) -> Value {
    EnumValue::new(&kind_schema(), tag, payload).unwrap().into()
}

fn complex(structs: Vec<Value>, enums: Vec<Value>) -> Value {
    StructValue::new(&complex_schema(), vec![Value::Sequence(structs), Value::Sequence(enums)])
        .unwrap()
        .into()
}

fn full_complex() -> Value {
    complex(
        vec![item("A", 1, Some(99)), item("B", 2, Some(128))],
        vec![
            kind(0, Value::U32(20)),
            kind(2, Value::uint(UintWidth::U64, "18446744073709551615").unwrap()),
            kind(1, Value::str("hello")),
        ],
    )
}

#[test]
fn unsigned_integers() {
    assert_eq!(hex(&Value::U8(255)), "ff");
    assert_eq!(hex(&Value::U16(65535)), "ffff");
    assert_eq!(hex(&Value::U32(255)), "ff000000");
    assert_eq!(hex(&Value::U64(65535)), "ffff000000000000");
    assert_eq!(hex(&Value::U128(u128::MAX)), "ff".repeat(16));
    let u256_max = Value::uint(
        UintWidth::U256,
        "115792089237316195423570985008687907853269984665640564039457584007913129639935",
    )
    .unwrap();
    assert_eq!(hex(&u256_max), "ff".repeat(32));
    assert_eq!(
        hex(&Value::uint(UintWidth::U256, "65535").unwrap()),
        format!("ffff{}", "00".repeat(30))
    );
}

#[test]
fn out_of_range_integer_is_rejected() {
    let err = Value::uint(UintWidth::U16, "65536").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeError);
}

#[test]
fn addresses() {
    assert_eq!(
        hex(&Value::address("0x1").unwrap()),
        "0000000000000000000000000000000000000000000000000000000000000001"
    );
    assert_eq!(
        hex(&Value::address("0xDEADFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF").unwrap()),
        "deadffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
    );
}

#[test]
fn strings_and_bytes() {
    assert_eq!(hex(&Value::str("hello")), "0568656c6c6f");
    let long = vec![0xFFu8; 44];
    assert_eq!(hex(&Value::bytes(long)), format!("2c{}", "ff".repeat(44)));
    assert_eq!(hex(&Value::fixed_bytes([0xFFu8; 44])), "ff".repeat(44));
}

#[test]
fn structs_with_and_without_option() {
    assert_eq!(
        hex(&item("With option", 1, Some(1))),
        "0b57697468206f7074696f6e010000000101000000"
    );
    assert_eq!(
        hex(&item("Without option", 2, None)),
        "0e576974686f7574206f7074696f6e0200000000"
    );
}

#[test]
fn enums() {
    assert_eq!(hex(&kind(0, Value::U32(22))), "0000000016000000");
    assert_eq!(
        hex(&kind(1, Value::str("Hello from space"))),
        "010000001048656c6c6f2066726f6d207370616365"
    );
}

#[test]
fn enum_mismatch_writes_nothing() {
    let err = EnumValue::new(&kind_schema(), 0, Value::str("22")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidVariant);
}

#[test]
fn complex_structs() {
    assert_eq!(
        hex(&full_complex()),
        "020141010000000163000000014202000000018000000003000000001400000002000000ffffffffffffffff010000000568656c6c6f"
    );
    assert_eq!(
        hex(&complex(vec![item("A", 1, Some(99)), item("B", 2, Some(128))], vec![])),
        "020141010000000163000000014202000000018000000000"
    );
    assert_eq!(hex(&complex(vec![], vec![])), "0000");
}

#[test]
fn sequence_of_optional_complex_structs() {
    let value = Value::Sequence(vec![
        Value::some(full_complex()),
        Value::some(complex(vec![item("A", 1, Some(99)), item("B", 2, Some(128))], vec![])),
        Value::some(complex(vec![], vec![])),
        Value::none(),
    ]);
    let expected = "0401020141010000000163000000014202000000018000000003000000001400000002000000ffffffffffffffff010000000568656c6c6f0102014101000000016300000001420200000001800000000001000000";
    assert_eq!(hex(&value), expected);

    let schema = Schema::sequence(Schema::option(complex_schema().into()));
    let bytes = encode(&value).unwrap();
    assert_eq!(decode_exact(&bytes, &schema).unwrap(), value);
}

#[test]
fn decode_reports_consumed_bytes() {
    let mut bytes = encode(&item("A", 1, None)).unwrap();
    let len = bytes.len();
    bytes.extend_from_slice(&[0xEE, 0xEE]);
    let (value, consumed) = decode(&bytes, &Schema::Struct(item_schema())).unwrap();
    assert_eq!(value, item("A", 1, None));
    assert_eq!(consumed, len);
}
