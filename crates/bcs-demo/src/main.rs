//! Prints the BCS encoding of sample primitives and composite values.
//!
//! Usage: `bcs-demo [--json] [--iterations N]`
//!
//! With `--json` each value is printed as JSON next to its bytes. With
//! `--iterations N` the nested sample is also encoded N times and the
//! throughput is reported.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use bcs_codec::{
    decode_exact, encode, encode_hex, EncodeError, EnumSchema, EnumValue, Schema, StructSchema,
    StructValue, UintWidth, Value,
};

// =============================================================================
// SAMPLE SCHEMAS
// =============================================================================

fn item_schema() -> StructSchema {
    StructSchema::new("Struct")
        .field("str", Schema::Str)
        .field("num", Schema::U32)
        .field("option", Schema::option(Schema::U32))
}

fn kind_schema() -> Result<EnumSchema, EncodeError> {
    EnumSchema::builder("Enum")
        .variant(0, "U32", Schema::U32)
        .variant(1, "String", Schema::Str)
        .variant(2, "U64", Schema::U64)
        .build()
}

fn complex_schema(kind: &EnumSchema) -> StructSchema {
    StructSchema::new("ComplexStruct")
        .field("structs", Schema::sequence(item_schema().into()))
        .field("enums", Schema::sequence(kind.clone().into()))
}

// =============================================================================
// SAMPLE VALUES
// =============================================================================

struct Samples {
    kind: EnumSchema,
    complex: StructSchema,
}

impl Samples {
    fn new() -> Result<Self, EncodeError> {
        let kind = kind_schema()?;
        let complex = complex_schema(&kind);
        Ok(Self { kind, complex })
    }

    fn item(&self, s: &str, num: u32, option: Option<u32>) -> Result<Value, EncodeError> {
        let values = vec![Value::str(s), Value::U32(num), option.into()];
        Ok(StructValue::new(&item_schema(), values)?.into())
    }

    fn kind(&self, tag: u32, payload: Value) -> Result<Value, EncodeError> {
        Ok(EnumValue::new(&self.kind, tag, payload)?.into())
    }

    fn complex(&self, structs: Vec<Value>, enums: Vec<Value>) -> Result<Value, EncodeError> {
        let values = vec![Value::Sequence(structs), Value::Sequence(enums)];
        Ok(StructValue::new(&self.complex, values)?.into())
    }

    fn two_items(&self) -> Result<Vec<Value>, EncodeError> {
        Ok(vec![self.item("A", 1, Some(99))?, self.item("B", 2, Some(128))?])
    }

    fn full_complex(&self) -> Result<Value, EncodeError> {
        let enums = vec![
            self.kind(0, Value::U32(20))?,
            self.kind(2, Value::uint(UintWidth::U64, "18446744073709551615")?)?,
            self.kind(1, Value::str("hello"))?,
        ];
        self.complex(self.two_items()?, enums)
    }

    fn nested(&self) -> Result<Value, EncodeError> {
        Ok(Value::Sequence(vec![
            Value::some(self.full_complex()?),
            Value::some(self.complex(self.two_items()?, vec![])?),
            Value::some(self.complex(vec![], vec![])?),
            Value::none(),
        ]))
    }

    fn nested_schema(&self) -> Schema {
        Schema::sequence(Schema::option(self.complex.clone().into()))
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

struct Printer {
    json: bool,
}

impl Printer {
    fn section(&self, title: &str) {
        println!("-----------------");
        println!("Serialize {}", title);
    }

    fn row(&self, label: &str, value: &Value) -> Result<(), EncodeError> {
        let hex = encode_hex(value)?;
        if self.json {
            let json = serde_json::to_string(value).unwrap_or_else(|e| format!("<{}>", e));
            println!("{}:\t{}\t{}", label, json, hex);
        } else {
            println!("{}:\t{}", label, hex);
        }
        Ok(())
    }

    fn rows(&self, width: UintWidth, inputs: &[&str]) -> Result<(), EncodeError> {
        self.section(width.name());
        for input in inputs {
            self.row(input, &Value::uint(width, input)?)?;
        }
        Ok(())
    }
}

fn print_primitives(p: &Printer) -> Result<(), EncodeError> {
    p.rows(UintWidth::U8, &["0", "1", "255"])?;
    p.rows(UintWidth::U16, &["0", "1", "255", "65535"])?;
    p.rows(UintWidth::U32, &["0", "1", "255", "4294967295"])?;
    p.rows(UintWidth::U64, &["0", "1", "255", "65535", "18446744073709551615"])?;
    p.rows(UintWidth::U128, &["0", "1", "255", "65535", "340282366920938463463374607431768211455"])?;
    p.rows(
        UintWidth::U256,
        &[
            "0",
            "1",
            "255",
            "65535",
            "115792089237316195423570985008687907853269984665640564039457584007913129639935",
        ],
    )?;

    p.section("bool");
    for b in [false, true] {
        p.row(&b.to_string(), &Value::Bool(b))?;
    }

    p.section("address");
    for addr in [
        "0x1",
        "0x2",
        "0xDEADFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF",
        "0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF",
    ] {
        p.row(addr, &Value::address(addr)?)?;
    }

    p.section("string");
    for s in ["abcd", "hello"] {
        p.row(s, &Value::str(s))?;
    }

    let short = [0x12u8, 0x34, 0x56];
    let long = [0xFFu8; 44];
    p.section("bytes");
    p.row(&label(&short), &Value::bytes(short))?;
    p.row(&label(&long), &Value::bytes(long))?;
    p.section("fixed bytes");
    p.row(&label(&short), &Value::fixed_bytes(short))?;
    p.row(&label(&long), &Value::fixed_bytes(long))?;

    p.section("uleb32");
    for n in [0u32, 1, 2, 3, 7, 15, 31, 63, 127, 255, 511, 1023, 2047, 4095, 8191, 16383, 32767, 65535] {
        let mut writer = bcs_codec::Writer::new();
        writer.write_uleb128(n);
        println!("{}:\t{}", n, writer.to_hex());
    }
    Ok(())
}

fn print_composites(p: &Printer, samples: &Samples) -> Result<(), EncodeError> {
    p.section("struct");
    p.row("With option", &samples.item("With option", 1, Some(1))?)?;
    p.row("Without option", &samples.item("Without option", 2, None)?)?;

    p.section("enum");
    p.row("U32(22)", &samples.kind(0, Value::U32(22))?)?;
    p.row("String", &samples.kind(1, Value::str("Hello from space"))?)?;

    p.section("complex struct");
    p.row("full", &samples.full_complex()?)?;
    p.row("no enums", &samples.complex(samples.two_items()?, vec![])?)?;
    p.row("empty", &samples.complex(vec![], vec![])?)?;

    p.section("all kinds of stuff");
    p.row("vector<option<ComplexStruct>>", &samples.nested()?)?;
    Ok(())
}

fn label(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode_upper(bytes))
}

/// Average time per iteration; zero iterations count as one.
fn per_value(total: Duration, iterations: usize) -> Duration {
    let nanos = total.as_nanos() / iterations.max(1) as u128;
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

fn run_timing(samples: &Samples, iterations: usize) -> Result<(), Box<dyn std::error::Error>> {
    let value = samples.nested()?;
    let schema = samples.nested_schema();

    let encode_start = Instant::now();
    let mut bytes = Vec::new();
    for _ in 0..iterations {
        bytes = encode(&value)?;
    }
    let encode_time = encode_start.elapsed();

    let decode_start = Instant::now();
    for _ in 0..iterations {
        decode_exact(&bytes, &schema)?;
    }
    let decode_time = decode_start.elapsed();

    println!();
    println!("=== Timing ({} iterations, {} bytes each) ===", iterations, bytes.len());
    println!("Encode: {:?} total, {:?} per value", encode_time, per_value(encode_time, iterations));
    println!("Decode: {:?} total, {:?} per value", decode_time, per_value(decode_time, iterations));
    Ok(())
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    let mut json = false;
    let mut iterations = 0usize;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--iterations" => match args.next().and_then(|n| n.parse().ok()) {
                Some(n) => iterations = n,
                None => {
                    eprintln!("--iterations expects a number");
                    return ExitCode::FAILURE;
                }
            },
            other => {
                eprintln!("unknown arg {}", other);
                return ExitCode::FAILURE;
            }
        }
    }

    let printer = Printer { json };
    let result = Samples::new().and_then(|samples| {
        print_primitives(&printer)?;
        print_composites(&printer, &samples)?;
        Ok(samples)
    });
    let samples = match result {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if iterations > 0 {
        if let Err(e) = run_timing(&samples, iterations) {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_value_handles_any_iteration_count() {
        let total = Duration::from_secs(4);
        assert_eq!(per_value(total, 4), Duration::from_secs(1));
        assert_eq!(per_value(total, 0), total);
        // a multiple of 2^32 must not collapse to a zero divisor
        assert_eq!(per_value(total, 1usize << 32), Duration::from_nanos(0));
    }

    #[test]
    fn test_label_is_uppercase_hex() {
        assert_eq!(label(&[0x12, 0xab]), "0x12AB");
    }
}
