//! Hash literal decoding.
//!
//! Registry files write hash values in one of four notations:
//!
//! - `5309` — signed decimal
//! - `0x6e62ba` — hexadecimal, `0x` prefix
//! - `#6e62ba` — hexadecimal, `#` prefix (only ever appears after a tab,
//!   never at the start of a line, where `#` marks a comment)
//! - `10011b` — binary, `b` suffix
//!
//! Hex and binary digits are decoded as an unsigned 32-bit magnitude and
//! reinterpreted as a signed 32-bit integer, so `0xffffffff` decodes to
//! `-1` rather than overflowing.

use crate::error::{RegistryError, Result};

/// Decode a hash literal into a signed 32-bit integer.
///
/// An empty string decodes to `0`. Returns
/// [`RegistryError::MalformedLiteral`] if the digits are invalid for the
/// selected base or the magnitude does not fit in 32 bits.
pub fn parse_i32(text: &str) -> Result<i32> {
    if text.is_empty() {
        return Ok(0);
    }

    let parsed = if let Some(digits) = text.strip_prefix("0x") {
        u32::from_str_radix(digits, 16).map(|v| v as i32)
    } else if let Some(digits) = text.strip_prefix('#') {
        u32::from_str_radix(digits, 16).map(|v| v as i32)
    } else if let Some(digits) = text.strip_suffix('b') {
        u32::from_str_radix(digits, 2).map(|v| v as i32)
    } else {
        text.parse::<i32>()
    };

    parsed.map_err(|_| RegistryError::MalformedLiteral {
        literal: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_is_zero() {
        assert_eq!(parse_i32("").unwrap(), 0);
    }

    #[test]
    fn decimal() {
        assert_eq!(parse_i32("5309").unwrap(), 5309);
        assert_eq!(parse_i32("-42").unwrap(), -42);
        assert_eq!(parse_i32("0").unwrap(), 0);
    }

    #[test]
    fn hex_0x_prefix() {
        assert_eq!(parse_i32("0x6e62ba").unwrap(), 0x6e62ba);
        assert_eq!(parse_i32("0x0").unwrap(), 0);
    }

    #[test]
    fn hex_hash_prefix() {
        assert_eq!(parse_i32("#6e62ba").unwrap(), 0x6e62ba);
        assert_eq!(parse_i32("#ff").unwrap(), 255);
    }

    #[test]
    fn binary_suffix() {
        assert_eq!(parse_i32("10011b").unwrap(), 19);
        assert_eq!(parse_i32("0b").unwrap(), 0);
    }

    #[test]
    fn high_bit_wraps_to_negative() {
        assert_eq!(parse_i32("0xffffffff").unwrap(), -1);
        assert_eq!(parse_i32("#80000000").unwrap(), i32::MIN);
    }

    #[test]
    fn bad_digits_are_rejected() {
        assert!(parse_i32("0xzz").is_err());
        assert!(parse_i32("#g1").is_err());
        assert!(parse_i32("12021b").is_err());
        assert!(parse_i32("twelve").is_err());
        // A lone suffix has no digits to decode.
        assert!(parse_i32("b").is_err());
    }

    #[test]
    fn overflow_is_rejected() {
        assert!(parse_i32("0x1ffffffff").is_err());
        assert!(parse_i32("4294967296").is_err());
    }

    proptest! {
        // A value written back in the serializer's `0x` form decodes to
        // the same value it came from.
        #[test]
        fn hex_writer_round_trip(value in any::<i32>()) {
            let written = format!("0x{:x}", value as u32);
            prop_assert_eq!(parse_i32(&written).unwrap(), value);
        }
    }
}
