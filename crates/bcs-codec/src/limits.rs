//! Wire constants and decoding limits.

/// Length of an account address in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// Maximum ULEB128 groups for a 32-bit value.
pub const MAX_ULEB128_BYTES: usize = 5;

/// Maximum element count for sequences, byte strings and strings.
pub const MAX_SEQUENCE_LENGTH: usize = (1 << 31) - 1;

/// Maximum nesting of option, sequence, struct and enum containers.
pub const MAX_CONTAINER_DEPTH: usize = 500;

/// Maximum element count for a sequence whose elements encode to zero bytes.
///
/// Such a sequence costs only its length prefix on the wire, so its size
/// cannot be bounded by the input length.
pub const MAX_ZERO_SIZED_ELEMENTS: usize = 1 << 16;
