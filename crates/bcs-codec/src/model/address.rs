//! 32-byte account addresses.

use std::fmt;
use std::str::FromStr;

use crate::error::EncodeError;
use crate::limits::ADDRESS_LENGTH;

/// Fixed-size 32-byte account address.
///
/// Stored big-endian: the short form `0x1` is the 32-byte value whose last
/// byte is 1. Addresses are produced elsewhere (derivation from a seed is
/// not part of this crate); here they are only parsed, formatted and
/// encoded as 32 raw bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address(bytes)
    }

    /// Creates an address from up to 32 bytes, left-padding with zeros.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EncodeError> {
        if bytes.len() > ADDRESS_LENGTH {
            return Err(EncodeError::AddressTooLong { len: bytes.len() });
        }
        let mut out = [0u8; ADDRESS_LENGTH];
        out[ADDRESS_LENGTH - bytes.len()..].copy_from_slice(bytes);
        Ok(Address(out))
    }

    /// Parses a hex address such as `0x1` or a full 64-digit form.
    ///
    /// The `0x` prefix is optional and odd digit counts are accepted.
    pub fn from_hex(s: &str) -> Result<Self, EncodeError> {
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        if digits.is_empty() {
            return Err(EncodeError::InvalidHex { reason: "empty address".to_string() });
        }
        let padded = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        let bytes = hex::decode(padded).map_err(|e| EncodeError::InvalidHex { reason: e.to_string() })?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Returns the 64 lowercase hex digits without a prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Formats with leading zeros stripped, e.g. `0x1`.
    pub fn to_short_string(&self) -> String {
        let full = self.to_hex();
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{trimmed}")
        }
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address(bytes)
    }
}

impl FromStr for Address {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Long form: `0x` followed by 64 hex digits.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address_is_left_padded() {
        let addr = Address::from_hex("0x1").unwrap();
        assert_eq!(
            addr.to_hex(),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(addr.to_short_string(), "0x1");
    }

    #[test]
    fn test_full_address() {
        let s = "0xDEADFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF";
        let addr: Address = s.parse().unwrap();
        assert_eq!(addr.as_bytes()[0], 0xde);
        assert_eq!(addr.to_string(), s.to_lowercase());
    }

    #[test]
    fn test_from_slice_padding() {
        let addr = Address::from_slice(&[0xab, 0xcd]).unwrap();
        assert_eq!(&addr.as_bytes()[30..], &[0xab, 0xcd]);
        assert!(addr.as_bytes()[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_too_long() {
        let err = Address::from_slice(&[1u8; 33]).unwrap_err();
        assert_eq!(err, EncodeError::AddressTooLong { len: 33 });
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(Address::from_hex("0xzz"), Err(EncodeError::InvalidHex { .. })));
        assert!(matches!(Address::from_hex("0x"), Err(EncodeError::InvalidHex { .. })));
    }

    #[test]
    fn test_zero_short_string() {
        assert_eq!(Address::ZERO.to_short_string(), "0x0");
    }
}
