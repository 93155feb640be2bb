//! Primitive encoding/decoding for the BCS binary format.
//!
//! Implements fixed-width little-endian integers, ULEB128 lengths,
//! booleans, addresses and length-prefixed byte strings.

use crate::error::{DecodeError, EncodeError};
use crate::limits::{ADDRESS_LENGTH, MAX_SEQUENCE_LENGTH, MAX_ULEB128_BYTES};
use crate::model::{Address, U256};

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader positioned at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        Ok(self.read_bytes(1, context)?[0])
    }

    /// Reads exactly n bytes.
    ///
    /// The cursor only advances when all n bytes are available.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining_len();
        if n > remaining {
            return Err(DecodeError::UnexpectedEof { context, needed: n, remaining });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads exactly N bytes into an array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, context)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.read_byte("u8")
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array("u16")?))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array("u32")?))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array("u64")?))
    }

    pub fn read_u128(&mut self) -> Result<u128, DecodeError> {
        Ok(u128::from_le_bytes(self.read_array("u128")?))
    }

    pub fn read_u256(&mut self) -> Result<U256, DecodeError> {
        let bytes: [u8; 32] = self.read_array("u256")?;
        Ok(U256::from_little_endian(&bytes))
    }

    /// Reads a boolean, rejecting any byte other than 0 or 1.
    pub fn read_bool(&mut self, context: &'static str) -> Result<bool, DecodeError> {
        match self.read_byte(context)? {
            0x00 => Ok(false),
            0x01 => Ok(true),
            value => Err(DecodeError::InvalidBool { context, value }),
        }
    }

    /// Reads a 32-byte account address.
    pub fn read_address(&mut self) -> Result<Address, DecodeError> {
        Ok(Address::new(self.read_array::<ADDRESS_LENGTH>("address")?))
    }

    /// Reads an unsigned LEB128 value in the 32-bit domain.
    ///
    /// Rejects chains longer than five groups, values above `u32::MAX`
    /// and non-minimal encodings.
    #[inline]
    pub fn read_uleb128(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let mut result: u64 = 0;
        let mut shift = 0;

        for i in 0..MAX_ULEB128_BYTES {
            let byte = self.read_byte(context)?;
            let value = (byte & 0x7F) as u64;
            result |= value << shift;

            if byte & 0x80 == 0 {
                if i > 0 && value == 0 {
                    return Err(DecodeError::VarintNotCanonical);
                }
                return u32::try_from(result).map_err(|_| DecodeError::VarintOverflow);
            }
            shift += 7;
        }

        Err(DecodeError::VarintTooLong)
    }

    /// Reads a ULEB128 length and checks it against `max_len`.
    pub fn read_length(&mut self, max_len: usize, field: &'static str) -> Result<usize, DecodeError> {
        let len = self.read_uleb128(field)? as usize;
        if len > max_len {
            return Err(DecodeError::LengthExceedsLimit { field, len, max: max_len });
        }
        Ok(len)
    }

    /// Reads a length-prefixed UTF-8 string.
    #[inline]
    pub fn read_str(&mut self, max_len: usize, field: &'static str) -> Result<&'a str, DecodeError> {
        let len = self.read_length(max_len, field)?;
        let bytes = self.read_bytes(len, field)?;
        std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    /// Reads a length-prefixed byte array.
    pub fn read_bytes_prefixed(&mut self, max_len: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        let len = self.read_length(max_len, field)?;
        self.read_bytes(len, field)
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Append-only byte buffer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns a copy of the bytes written so far.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }

    /// Returns the written bytes as lowercase hex without a prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.buf)
    }

    /// Returns the written bytes as lowercase hex with a `0x` prefix.
    pub fn to_hex_prefixed(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes with no length prefix.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u128(&mut self, value: u128) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u256(&mut self, value: &U256) {
        self.buf.extend_from_slice(&value.to_little_endian());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(if value { 0x01 } else { 0x00 });
    }

    /// Writes the 32 raw address bytes.
    pub fn write_address(&mut self, address: &Address) {
        self.buf.extend_from_slice(address.as_bytes());
    }

    /// Writes an unsigned LEB128 value.
    #[inline]
    pub fn write_uleb128(&mut self, mut value: u32) {
        let mut buf = [0u8; MAX_ULEB128_BYTES];
        let mut len = 0;
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            buf[len] = byte;
            len += 1;
            if value == 0 {
                break;
            }
        }
        self.buf.extend_from_slice(&buf[..len]);
    }

    /// Writes a ULEB128 length prefix, rejecting lengths above the sequence limit.
    pub fn write_length(&mut self, len: usize, field: &'static str) -> Result<(), EncodeError> {
        let prefix = checked_length(len, field)?;
        self.write_uleb128(prefix);
        Ok(())
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_str(&mut self, s: &str) -> Result<(), EncodeError> {
        self.write_length(s.len(), "string")?;
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    /// Writes a length-prefixed byte array.
    pub fn write_bytes_prefixed(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.write_length(bytes.len(), "bytes")?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}

/// Validates a length against [`MAX_SEQUENCE_LENGTH`] and narrows it to u32.
pub(crate) fn checked_length(len: usize, field: &'static str) -> Result<u32, EncodeError> {
    if len > MAX_SEQUENCE_LENGTH {
        return Err(EncodeError::LengthExceedsLimit { field, len, max: MAX_SEQUENCE_LENGTH });
    }
    Ok(len as u32)
}

/// Returns the number of bytes the ULEB128 encoding of `value` occupies.
pub fn uleb128_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        0x20_0000..=0xFFF_FFFF => 4,
        _ => 5,
    }
}
