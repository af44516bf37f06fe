//! Deserializable packet description.
//!
//! These types describe the layout of a packet so that it can be shipped as a
//! configuration file (for example JSON) and compiled into a
//! [crate::PacketComposer] with `PacketComposer::try_from`:
//!
//! ```json
//! {
//!   "fields": [
//!     { "name": "kind", "type": "Numeric", "dtype": "uint8" },
//!     { "name": "payload", "type": "Bytes", "len": 4 },
//!     {
//!       "name": "flags",
//!       "type": "Bits",
//!       "container": "uint16",
//!       "endianness": "little",
//!       "subfields": [
//!         { "name": "version", "bits": 3 },
//!         { "name": "priority", "bits": 6 },
//!         { "name": "channel", "bits": 7 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Compilation applies the same validation as the programmatic API.

use serde::{Deserialize, Serialize};

use crate::{
    bit_packer::BitPacker,
    codec::FieldCodec,
    dtype::{Endianness, NumericType},
    errors::ConfigError,
    numeric::NumericField,
    raw::RawField,
};

/// Top-level packet definition: fields in packet order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PacketDef {
    pub fields: Vec<FieldDef>,
}

/// A single named field.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name; becomes the key in packed and unpacked values.
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKindDef,
}

/// Kind of field, tagged by `type`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum FieldKindDef {
    /// Fixed-width integer or float.
    Numeric {
        /// Type name such as `uint16`, `int8` or `double`.
        dtype: String,
        #[serde(default)]
        endianness: Endianness,
    },
    /// Raw bytes of a fixed length.
    Bytes { len: usize },
    /// Named subfields packed into an unsigned container.
    Bits {
        /// One of `uint8`, `uint16`, `uint32`, `uint64`.
        container: String,
        #[serde(default)]
        endianness: Endianness,
        /// Subfields, most significant first.
        subfields: Vec<SubfieldDef>,
    },
}

/// A subfield of a `Bits` field.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SubfieldDef {
    pub name: String,
    pub bits: u32,
}

impl FieldKindDef {
    /// Builds the codec described by this definition.
    pub fn build(&self) -> Result<Box<dyn FieldCodec>, ConfigError> {
        let codec: Box<dyn FieldCodec> = match self {
            FieldKindDef::Numeric { dtype, endianness } => {
                Box::new(NumericField::new(dtype.parse()?, *endianness))
            }
            FieldKindDef::Bytes { len } => Box::new(RawField::new(*len)?),
            FieldKindDef::Bits {
                container,
                endianness,
                subfields,
            } => Box::new(BitPacker::new(
                container.parse::<NumericType>()?,
                subfields.iter().cloned(),
                *endianness,
            )?),
        };

        Ok(codec)
    }
}
