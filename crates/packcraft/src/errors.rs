//! Error types for schema construction and for packing/unpacking values.

use crate::{dtype::NumericType, value::ValueKind};

/// Errors produced when building a [crate::BitPacker], a field adapter or a
/// [crate::PacketComposer] from an invalid schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Container type is not one of uint8, uint16, uint32 or uint64.
    #[error("{0} is not a valid container type, it must be an unsigned integer type")]
    UnsupportedContainer(NumericType),
    /// Type name does not match any [NumericType].
    #[error("unknown field type `{0}`")]
    UnknownType(String),
    /// Subfield widths do not add up to the container width.
    #[error("subfields are {actual} bits wide, but must be exactly {expected} bits")]
    WidthMismatch { expected: u32, actual: u32 },
    /// A subfield has a width of 0 bits.
    #[error("subfield `{0}` has zero width")]
    ZeroWidthSubfield(String),
    /// A field or subfield name is empty.
    #[error("field name must not be empty")]
    EmptyName,
    /// A field name is not an identifier.
    #[error("field name `{0}` is not a valid identifier")]
    InvalidName(String),
    /// A field or subfield name appears more than once.
    #[error("field name `{0}` is used more than once")]
    DuplicateName(String),
    /// A raw byte field was configured with a length of 0.
    #[error("byte field length must be at least 1")]
    ZeroLength,
    /// A codec reports a length of 0 bytes.
    #[error("field `{0}` has a length of 0 bytes")]
    ZeroLengthField(String),
    /// The summed field lengths do not fit in `usize`.
    #[error("packet length overflows at field `{0}`")]
    PacketTooLong(String),
}

/// Errors produced by [crate::FieldCodec::pack] and [crate::FieldCodec::unpack].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// Keys of an ordered mapping differ from the schema in membership or order.
    #[error("expected keys {expected:?} in this order, got {found:?}")]
    Shape {
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// A value does not fit the bits allotted to it.
    #[error("value {value} of `{field}` does not fit in {bits} bits")]
    Range {
        field: String,
        value: i128,
        bits: u32,
    },
    /// A finite float is too large for the precision of the field.
    #[error("value {value} is too large to pack as `{field}`")]
    FloatRange { field: String, value: f64 },
    /// A byte buffer does not have the expected length.
    #[error("expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
    /// A value has the wrong kind for the field.
    #[error("expected a value of kind {expected}, got {found}")]
    Type {
        expected: &'static str,
        found: ValueKind,
    },
}

impl CodecError {
    pub(crate) fn length(expected: usize, actual: usize) -> Self {
        CodecError::Length { expected, actual }
    }

    pub(crate) fn shape<'a>(
        expected: impl IntoIterator<Item = &'a str>,
        found: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        CodecError::Shape {
            expected: expected.into_iter().map(str::to_owned).collect(),
            found: found.into_iter().map(str::to_owned).collect(),
        }
    }
}
