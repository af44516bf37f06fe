//! Values exchanged with [crate::FieldCodec]s.

use std::fmt;

use crate::record::Record;

/// Named subfield values of a bit-packed field, in schema order.
pub type BitValues = Record<u64>;

/// Field values of a whole packet, in schema order.
pub type PacketValue = Record<Value>;

/// A single field value, packed by or unpacked from a [crate::FieldCodec].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Raw bytes of a [crate::RawField].
    Bytes(Vec<u8>),
    /// Subfields of a [crate::BitPacker].
    Bits(BitValues),
}

/// The kind of a [Value], used in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    U64,
    I64,
    F32,
    F64,
    Bytes,
    Bits,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::U64(_) => ValueKind::U64,
            Value::I64(_) => ValueKind::I64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Bits(_) => ValueKind::Bits,
        }
    }

    /// Integer content widened to `i128`, if this is an integer value.
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Value::U64(v) => Some(v as i128),
            Value::I64(v) => Some(v as i128),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_bits(&self) -> Option<&BitValues> {
        match self {
            Value::Bits(bits) => Some(bits),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::U64 => "unsigned integer",
            ValueKind::I64 => "signed integer",
            ValueKind::F32 => "float",
            ValueKind::F64 => "double",
            ValueKind::Bytes => "bytes",
            ValueKind::Bits => "bit fields",
        };
        f.write_str(name)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::U64(value.into())
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::U64(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::U64(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::U64(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::I64(value.into())
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::I64(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I64(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::F32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<BitValues> for Value {
    fn from(value: BitValues) -> Self {
        Value::Bits(value)
    }
}
