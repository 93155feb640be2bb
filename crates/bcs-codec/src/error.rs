//! Error types for BCS encoding, decoding and value construction.

use thiserror::Error;

/// Broad error categories shared by encoding and decoding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A numeric value does not fit the declared width.
    RangeError,
    /// Tag/payload mismatch on construction, or unknown tag on decode.
    InvalidVariant,
    /// A bool or option presence byte was neither 0 nor 1.
    InvalidBoolean,
    /// Malformed, overlong or non-canonical ULEB128 sequence.
    InvalidVarint,
    /// Decoding needs more bytes than remain.
    UnexpectedEndOfInput,
    /// String bytes are not valid UTF-8.
    InvalidUtf8,
    /// A length, count or nesting depth exceeds the configured maximum.
    LengthExceedsLimit,
    /// A value does not have the shape its schema declares.
    SchemaMismatch,
    /// Input remains after the top-level value.
    TrailingBytes,
}

impl ErrorKind {
    /// Returns the kind name (e.g., "RangeError").
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::RangeError => "RangeError",
            ErrorKind::InvalidVariant => "InvalidVariant",
            ErrorKind::InvalidBoolean => "InvalidBoolean",
            ErrorKind::InvalidVarint => "InvalidVarint",
            ErrorKind::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorKind::InvalidUtf8 => "InvalidUtf8",
            ErrorKind::LengthExceedsLimit => "LengthExceedsLimit",
            ErrorKind::SchemaMismatch => "SchemaMismatch",
            ErrorKind::TrailingBytes => "TrailingBytes",
        }
    }
}

/// Error while building or encoding a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("[RangeError] {value} does not fit in {width}")]
    OutOfRange { width: &'static str, value: String },

    #[error("[RangeError] invalid integer literal {input:?}")]
    InvalidNumber { input: String },

    #[error("[RangeError] address is {len} bytes, maximum is 32")]
    AddressTooLong { len: usize },

    #[error("[RangeError] invalid hex: {reason}")]
    InvalidHex { reason: String },

    #[error("[InvalidVariant] enum {name} has no variant with tag {tag}")]
    UnknownVariant { name: String, tag: u32 },

    #[error("[InvalidVariant] enum {name} registers tag {tag} more than once")]
    DuplicateVariant { name: String, tag: u32 },

    #[error("[InvalidVariant] enum {name} variant {tag} expects {expected}, found {found}")]
    VariantPayloadMismatch {
        name: String,
        tag: u32,
        expected: String,
        found: String,
    },

    #[error("[SchemaMismatch] expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },

    #[error("[SchemaMismatch] struct {name} declares {expected} fields, got {actual}")]
    FieldCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("[SchemaMismatch] fixed bytes declared as {expected} bytes, got {actual}")]
    FixedLengthMismatch { expected: usize, actual: usize },

    #[error("[LengthExceedsLimit] {field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

impl EncodeError {
    /// Returns the error kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::OutOfRange { .. }
            | EncodeError::InvalidNumber { .. }
            | EncodeError::AddressTooLong { .. }
            | EncodeError::InvalidHex { .. } => ErrorKind::RangeError,
            EncodeError::UnknownVariant { .. }
            | EncodeError::DuplicateVariant { .. }
            | EncodeError::VariantPayloadMismatch { .. } => ErrorKind::InvalidVariant,
            EncodeError::SchemaMismatch { .. }
            | EncodeError::FieldCountMismatch { .. }
            | EncodeError::FixedLengthMismatch { .. } => ErrorKind::SchemaMismatch,
            EncodeError::LengthExceedsLimit { .. } => ErrorKind::LengthExceedsLimit,
        }
    }
}

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("[UnexpectedEndOfInput] needed {needed} bytes for {context}, {remaining} remain")]
    UnexpectedEof {
        context: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("[InvalidVarint] uleb128 exceeds maximum length (5 bytes)")]
    VarintTooLong,

    #[error("[InvalidVarint] uleb128 value overflows u32")]
    VarintOverflow,

    #[error("[InvalidVarint] uleb128 is not minimally encoded")]
    VarintNotCanonical,

    #[error("[InvalidBoolean] invalid {context} byte: {value} (expected 0x00 or 0x01)")]
    InvalidBool { context: &'static str, value: u8 },

    #[error("[InvalidVariant] enum {name} has no variant with tag {tag}")]
    UnknownVariant { name: String, tag: u32 },

    #[error("[InvalidUtf8] invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("[LengthExceedsLimit] {field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("[TrailingBytes] {count} bytes remain after the value")]
    TrailingBytes { count: usize },
}

impl DecodeError {
    /// Returns the error kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::UnexpectedEof { .. } => ErrorKind::UnexpectedEndOfInput,
            DecodeError::VarintTooLong
            | DecodeError::VarintOverflow
            | DecodeError::VarintNotCanonical => ErrorKind::InvalidVarint,
            DecodeError::InvalidBool { .. } => ErrorKind::InvalidBoolean,
            DecodeError::UnknownVariant { .. } => ErrorKind::InvalidVariant,
            DecodeError::InvalidUtf8 { .. } => ErrorKind::InvalidUtf8,
            DecodeError::LengthExceedsLimit { .. } => ErrorKind::LengthExceedsLimit,
            DecodeError::TrailingBytes { .. } => ErrorKind::TrailingBytes,
        }
    }
}
