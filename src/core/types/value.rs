//! Runtime-typed numeric values for callers that pick the type at runtime

use super::error::{MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric primitive types supported by runtime-typed reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl ValueType {
    /// All supported types, smallest first
    pub const ALL: [ValueType; 10] = [
        ValueType::I8,
        ValueType::U8,
        ValueType::I16,
        ValueType::U16,
        ValueType::I32,
        ValueType::U32,
        ValueType::F32,
        ValueType::I64,
        ValueType::U64,
        ValueType::F64,
    ];

    /// Returns the size in bytes of this type
    pub const fn size(&self) -> usize {
        match self {
            ValueType::I8 | ValueType::U8 => 1,
            ValueType::I16 | ValueType::U16 => 2,
            ValueType::I32 | ValueType::U32 | ValueType::F32 => 4,
            ValueType::I64 | ValueType::U64 | ValueType::F64 => 8,
        }
    }

    /// Returns the lowercase type name
    pub const fn name(&self) -> &'static str {
        match self {
            ValueType::I8 => "i8",
            ValueType::I16 => "i16",
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::U8 => "u8",
            ValueType::U16 => "u16",
            ValueType::U32 => "u32",
            ValueType::U64 => "u64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
        }
    }
}

impl FromStr for ValueType {
    type Err = MemoryError;

    fn from_str(s: &str) -> MemoryResult<Self> {
        ValueType::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MemoryError::InvalidValue(format!("unknown value type '{}'", s)))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A numeric value tagged with its type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MemoryValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl MemoryValue {
    /// Returns the type of this value
    pub const fn value_type(&self) -> ValueType {
        match self {
            MemoryValue::I8(_) => ValueType::I8,
            MemoryValue::I16(_) => ValueType::I16,
            MemoryValue::I32(_) => ValueType::I32,
            MemoryValue::I64(_) => ValueType::I64,
            MemoryValue::U8(_) => ValueType::U8,
            MemoryValue::U16(_) => ValueType::U16,
            MemoryValue::U32(_) => ValueType::U32,
            MemoryValue::U64(_) => ValueType::U64,
            MemoryValue::F32(_) => ValueType::F32,
            MemoryValue::F64(_) => ValueType::F64,
        }
    }

    /// Returns the size in bytes of the value
    pub const fn size(&self) -> usize {
        self.value_type().size()
    }

    /// Parses `text` as a value of type `value_type`
    ///
    /// Integers accept decimal or `0x`-prefixed hex; floats accept decimal.
    /// Hex for a signed type is the raw bit pattern of that width, so
    /// `0xFF` as `i8` is `-1`.
    pub fn parse(value_type: ValueType, text: &str) -> MemoryResult<Self> {
        let text = text.trim();
        let parsed = match value_type {
            ValueType::I8 => parse_signed(text, |v: u8| v as i8).map(MemoryValue::I8),
            ValueType::I16 => parse_signed(text, |v: u16| v as i16).map(MemoryValue::I16),
            ValueType::I32 => parse_signed(text, |v: u32| v as i32).map(MemoryValue::I32),
            ValueType::I64 => parse_signed(text, |v: u64| v as i64).map(MemoryValue::I64),
            ValueType::U8 => parse_int(text).map(MemoryValue::U8),
            ValueType::U16 => parse_int(text).map(MemoryValue::U16),
            ValueType::U32 => parse_int(text).map(MemoryValue::U32),
            ValueType::U64 => parse_int(text).map(MemoryValue::U64),
            ValueType::F32 => text.parse().ok().map(MemoryValue::F32),
            ValueType::F64 => text.parse().ok().map(MemoryValue::F64),
        };

        parsed.ok_or_else(|| {
            MemoryError::InvalidValue(format!("'{}' is not a valid {}", text, value_type))
        })
    }
}

fn hex_digits(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

fn parse_int<T>(text: &str) -> Option<T>
where
    T: FromStr + TryFrom<u64>,
{
    match hex_digits(text) {
        Some(hex) => u64::from_str_radix(hex, 16)
            .ok()
            .and_then(|v| T::try_from(v).ok()),
        None => text.parse().ok(),
    }
}

/// Decimal parses as `S`; hex parses as the unsigned `U` of the same width
/// and is reinterpreted
fn parse_signed<S, U, F>(text: &str, from_bits: F) -> Option<S>
where
    S: FromStr,
    U: FromStr + TryFrom<u64>,
    F: FnOnce(U) -> S,
{
    match hex_digits(text) {
        Some(_) => parse_int::<U>(text).map(from_bits),
        None => text.parse().ok(),
    }
}

impl fmt::Display for MemoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryValue::I8(v) => write!(f, "{}", v),
            MemoryValue::I16(v) => write!(f, "{}", v),
            MemoryValue::I32(v) => write!(f, "{}", v),
            MemoryValue::I64(v) => write!(f, "{}", v),
            MemoryValue::U8(v) => write!(f, "{}", v),
            MemoryValue::U16(v) => write!(f, "{}", v),
            MemoryValue::U32(v) => write!(f, "{}", v),
            MemoryValue::U64(v) => write!(f, "{}", v),
            MemoryValue::F32(v) => write!(f, "{}", v),
            MemoryValue::F64(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_sizes() {
        for ty in ValueType::ALL {
            let expected = match ty.name() {
                "i8" | "u8" => 1,
                "i16" | "u16" => 2,
                "i32" | "u32" | "f32" => 4,
                _ => 8,
            };
            assert_eq!(ty.size(), expected, "{ty}");
        }
    }

    #[test]
    fn test_value_type_from_str() {
        assert_eq!("u32".parse::<ValueType>().unwrap(), ValueType::U32);
        assert_eq!("F64".parse::<ValueType>().unwrap(), ValueType::F64);
        assert!(matches!(
            "string".parse::<ValueType>(),
            Err(MemoryError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(
            MemoryValue::parse(ValueType::U32, "100").unwrap(),
            MemoryValue::U32(100)
        );
        assert_eq!(
            MemoryValue::parse(ValueType::U32, "0xDEADBEEF").unwrap(),
            MemoryValue::U32(0xDEADBEEF)
        );
        assert_eq!(
            MemoryValue::parse(ValueType::I16, "-32768").unwrap(),
            MemoryValue::I16(i16::MIN)
        );
        assert_eq!(
            MemoryValue::parse(ValueType::U64, "0xFFFFFFFFFFFFFFFF").unwrap(),
            MemoryValue::U64(u64::MAX)
        );
    }

    #[test]
    fn test_parse_signed_hex_bit_patterns() {
        assert_eq!(
            MemoryValue::parse(ValueType::I8, "0xFF").unwrap(),
            MemoryValue::I8(-1)
        );
        assert_eq!(
            MemoryValue::parse(ValueType::I16, "0x8000").unwrap(),
            MemoryValue::I16(i16::MIN)
        );
        assert_eq!(
            MemoryValue::parse(ValueType::I32, "0xFFFFFFFF").unwrap(),
            MemoryValue::I32(-1)
        );
        assert_eq!(
            MemoryValue::parse(ValueType::I64, "0x7FFFFFFFFFFFFFFF").unwrap(),
            MemoryValue::I64(i64::MAX)
        );
        assert_eq!(
            MemoryValue::parse(ValueType::I32, "0x10").unwrap(),
            MemoryValue::I32(16)
        );
        // Wider than the type is still rejected
        assert!(MemoryValue::parse(ValueType::I8, "0x100").is_err());
        assert!(MemoryValue::parse(ValueType::I32, "0x1FFFFFFFF").is_err());
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(MemoryValue::parse(ValueType::U8, "256").is_err());
        assert!(MemoryValue::parse(ValueType::U8, "0x100").is_err());
        assert!(MemoryValue::parse(ValueType::U16, "-1").is_err());
        assert!(MemoryValue::parse(ValueType::I32, "abc").is_err());
    }

    #[test]
    fn test_parse_floats() {
        assert_eq!(
            MemoryValue::parse(ValueType::F32, "1.5").unwrap(),
            MemoryValue::F32(1.5)
        );
        assert_eq!(
            MemoryValue::parse(ValueType::F64, "-0.25").unwrap(),
            MemoryValue::F64(-0.25)
        );
        assert!(MemoryValue::parse(ValueType::F64, "0x10").is_err());
    }

    #[test]
    fn test_value_type_round_trip() {
        let value = MemoryValue::I64(-7);
        assert_eq!(value.value_type(), ValueType::I64);
        assert_eq!(value.size(), 8);
        assert_eq!(value.to_string(), "-7");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&MemoryValue::U32(100)).unwrap();
        assert_eq!(json, r#"{"type":"u32","value":100}"#);
    }
}
