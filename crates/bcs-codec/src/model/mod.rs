//! Data model types for BCS values.
//!
//! This module contains the types that describe what gets encoded:
//! - Addresses and 256-bit integers
//! - Values (primitives plus option, sequence, struct and enum)
//! - Schemas (the shape the decoder reads against)

pub mod address;
pub mod schema;
pub mod u256;
pub mod value;

pub use address::Address;
pub use schema::{EnumSchema, EnumSchemaBuilder, FieldSchema, Schema, StructSchema, VariantSchema};
pub use u256::{parse_u256, U256};
pub use value::{EnumValue, Field, FixedBytes, StructValue, UintWidth, Value};
