// Canonical element types for the Tessera schema system
//
// This module defines the closed set of element types a storage column can
// carry, and the normalization function that converts user-facing type names
// into canonical values.

use std::fmt;

use crate::internal::error::{Error, Result};

/// Canonical element type of a single tensor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dtype {
    /// Boolean type
    Bool,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 16-bit floating point (IEEE 754 half precision)
    Float16,
    /// 32-bit floating point (IEEE 754)
    Float32,
    /// 64-bit floating point (IEEE 754)
    Float64,
    /// UTF-8 encoded string
    Utf8,
    /// Binary data (bytes)
    Binary,
}

/// Every canonical dtype, in declaration order.
pub const ALL_DTYPES: [Dtype; 14] = [
    Dtype::Bool,
    Dtype::UInt8,
    Dtype::UInt16,
    Dtype::UInt32,
    Dtype::UInt64,
    Dtype::Int8,
    Dtype::Int16,
    Dtype::Int32,
    Dtype::Int64,
    Dtype::Float16,
    Dtype::Float32,
    Dtype::Float64,
    Dtype::Utf8,
    Dtype::Binary,
];

impl Dtype {
    /// Returns true if this type is a numeric type
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Returns true if this type is an integer type
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Dtype::UInt8 | Dtype::UInt16 | Dtype::UInt32 | Dtype::UInt64 |
            Dtype::Int8 | Dtype::Int16 | Dtype::Int32 | Dtype::Int64
        )
    }

    /// Returns true if this type is a floating point type
    pub fn is_float(&self) -> bool {
        matches!(self, Dtype::Float16 | Dtype::Float32 | Dtype::Float64)
    }

    /// Size of one element in bytes, or `None` for variable-width types
    /// (`Utf8`, `Binary`).
    pub fn item_size(&self) -> Option<usize> {
        match self {
            Dtype::Bool | Dtype::UInt8 | Dtype::Int8 => Some(1),
            Dtype::UInt16 | Dtype::Int16 | Dtype::Float16 => Some(2),
            Dtype::UInt32 | Dtype::Int32 | Dtype::Float32 => Some(4),
            Dtype::UInt64 | Dtype::Int64 | Dtype::Float64 => Some(8),
            Dtype::Utf8 | Dtype::Binary => None,
        }
    }

    /// Canonical lowercase name, the form `parse` always accepts.
    pub fn name(&self) -> &'static str {
        match self {
            Dtype::Bool => "bool",
            Dtype::UInt8 => "uint8",
            Dtype::UInt16 => "uint16",
            Dtype::UInt32 => "uint32",
            Dtype::UInt64 => "uint64",
            Dtype::Int8 => "int8",
            Dtype::Int16 => "int16",
            Dtype::Int32 => "int32",
            Dtype::Int64 => "int64",
            Dtype::Float16 => "float16",
            Dtype::Float32 => "float32",
            Dtype::Float64 => "float64",
            Dtype::Utf8 => "utf8",
            Dtype::Binary => "binary",
        }
    }

    /// Normalizes a raw type name into a canonical dtype.
    ///
    /// Accepts canonical names, common aliases (`boolean`, `half`, `double`,
    /// `str`, `string`, `bytes`) and numpy-style short codes (`u1`..`u8`,
    /// `i1`..`i8`, `f2`..`f8`). Fails deterministically with a
    /// [`DtypeError`](Error::DtypeError) for anything else.
    pub fn parse(raw: &str) -> Result<Dtype> {
        match raw {
            "bool" | "boolean" => Ok(Dtype::Bool),
            "uint8" | "u1" => Ok(Dtype::UInt8),
            "uint16" | "u2" => Ok(Dtype::UInt16),
            "uint32" | "u4" => Ok(Dtype::UInt32),
            "uint64" | "u8" => Ok(Dtype::UInt64),
            "int8" | "i1" => Ok(Dtype::Int8),
            "int16" | "i2" => Ok(Dtype::Int16),
            "int32" | "i4" => Ok(Dtype::Int32),
            "int64" | "i8" => Ok(Dtype::Int64),
            "float16" | "half" | "f2" => Ok(Dtype::Float16),
            "float32" | "f4" => Ok(Dtype::Float32),
            "float64" | "double" | "f8" => Ok(Dtype::Float64),
            "utf8" | "str" | "string" => Ok(Dtype::Utf8),
            "binary" | "bytes" => Ok(Dtype::Binary),
            _ => Err(Error::DtypeError(format!("Unknown dtype: {}", raw))),
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for dtype in ALL_DTYPES {
            assert_eq!(Dtype::parse(dtype.name()).unwrap(), dtype);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Dtype::parse("boolean").unwrap(), Dtype::Bool);
        assert_eq!(Dtype::parse("half").unwrap(), Dtype::Float16);
        assert_eq!(Dtype::parse("double").unwrap(), Dtype::Float64);
        assert_eq!(Dtype::parse("str").unwrap(), Dtype::Utf8);
        assert_eq!(Dtype::parse("string").unwrap(), Dtype::Utf8);
        assert_eq!(Dtype::parse("bytes").unwrap(), Dtype::Binary);
    }

    #[test]
    fn test_parse_short_codes() {
        assert_eq!(Dtype::parse("u1").unwrap(), Dtype::UInt8);
        assert_eq!(Dtype::parse("u8").unwrap(), Dtype::UInt64);
        assert_eq!(Dtype::parse("i4").unwrap(), Dtype::Int32);
        assert_eq!(Dtype::parse("f2").unwrap(), Dtype::Float16);
        assert_eq!(Dtype::parse("f8").unwrap(), Dtype::Float64);
    }

    #[test]
    fn test_parse_unknown() {
        let result = Dtype::parse("complex128");
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Dtype Error: Unknown dtype: complex128"
        );
    }

    #[test]
    fn test_classification() {
        assert!(Dtype::Int32.is_integer());
        assert!(Dtype::Int32.is_numeric());
        assert!(!Dtype::Int32.is_float());
        assert!(Dtype::Float16.is_float());
        assert!(Dtype::Float16.is_numeric());
        assert!(!Dtype::Bool.is_numeric());
        assert!(!Dtype::Utf8.is_numeric());
    }

    #[test]
    fn test_item_size() {
        assert_eq!(Dtype::Bool.item_size(), Some(1));
        assert_eq!(Dtype::Float16.item_size(), Some(2));
        assert_eq!(Dtype::Int32.item_size(), Some(4));
        assert_eq!(Dtype::UInt64.item_size(), Some(8));
        assert_eq!(Dtype::Utf8.item_size(), None);
        assert_eq!(Dtype::Binary.item_size(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Dtype::Float32.to_string(), "float32");
        assert_eq!(Dtype::UInt8.to_string(), "uint8");
    }
}
