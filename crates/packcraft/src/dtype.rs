//! Fixed-width numeric types and byte order.

use std::{fmt, str::FromStr};

use crate::errors::ConfigError;

/// Byte order of a multi-byte field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Endianness {
    Big,
    Little,
}

impl Default for Endianness {
    fn default() -> Self {
        Endianness::Big
    }
}

/// Fixed-width numeric types a field can be encoded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    /// IEEE-754 single precision.
    F32,
    /// IEEE-754 double precision.
    F64,
}

impl NumericType {
    pub const ALL: [NumericType; 10] = [
        NumericType::U8,
        NumericType::U16,
        NumericType::U32,
        NumericType::U64,
        NumericType::I8,
        NumericType::I16,
        NumericType::I32,
        NumericType::I64,
        NumericType::F32,
        NumericType::F64,
    ];

    /// Encoded size in bytes.
    pub fn size(self) -> usize {
        match self {
            NumericType::U8 | NumericType::I8 => 1,
            NumericType::U16 | NumericType::I16 => 2,
            NumericType::U32 | NumericType::I32 | NumericType::F32 => 4,
            NumericType::U64 | NumericType::I64 | NumericType::F64 => 8,
        }
    }

    /// Encoded size in bits.
    pub fn bits(self) -> u32 {
        self.size() as u32 * 8
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            NumericType::U8 | NumericType::U16 | NumericType::U32 | NumericType::U64
        )
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            NumericType::I8 | NumericType::I16 | NumericType::I32 | NumericType::I64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, NumericType::F32 | NumericType::F64)
    }

    /// Canonical name, as accepted by [NumericType::from_str].
    pub fn name(self) -> &'static str {
        match self {
            NumericType::U8 => "uint8",
            NumericType::U16 => "uint16",
            NumericType::U32 => "uint32",
            NumericType::U64 => "uint64",
            NumericType::I8 => "int8",
            NumericType::I16 => "int16",
            NumericType::I32 => "int32",
            NumericType::I64 => "int64",
            NumericType::F32 => "float",
            NumericType::F64 => "double",
        }
    }

    /// Inclusive integer range of the type. `None` for floats.
    pub fn integer_range(self) -> Option<(i128, i128)> {
        if self.is_float() {
            return None;
        }

        let bits = self.bits();
        if self.is_unsigned() {
            Some((0, (1i128 << bits) - 1))
        } else {
            Some((-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1))
        }
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumericType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ConfigError::UnknownType(s.to_string()))
    }
}
