//! # packcraft
//!
//! A library for packing named values into fixed-length binary packets and
//! unpacking them back.
//!
//! A packet is an ordered list of named fields, each a [FieldCodec] with a
//! constant byte length: fixed-width numbers ([NumericField]), raw bytes
//! ([RawField]) and named sub-byte bit fields packed into one unsigned
//! container ([BitPacker]). A [PacketComposer] concatenates them in order.
//! Schemas are validated once when built; packing and unpacking then only
//! check the shape and ranges of each call's input, and either succeed with a
//! complete result or fail without producing any output.
//!
//! ## Example
//!
//! ```
//! use packcraft::{
//!     BitPacker, BitValues, NumericField, NumericType, PacketComposer, PacketValue, RawField,
//!     Value,
//! };
//!
//! let composer = PacketComposer::builder()
//!     .field("id", NumericField::big_endian(NumericType::U8))
//!     .field("temperature", NumericField::big_endian(NumericType::I16))
//!     .field("tag", RawField::new(2).unwrap())
//!     .field(
//!         "flags",
//!         BitPacker::big_endian(NumericType::U8, [("mode", 3), ("level", 5)]).unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//! assert_eq!(composer.length(), 6);
//!
//! let values = PacketValue::new()
//!     .with("id", Value::U64(0x42))
//!     .with("temperature", Value::I64(-300))
//!     .with("tag", Value::Bytes(vec![0xAB, 0xCD]))
//!     .with("flags", Value::Bits(BitValues::from([("mode", 5), ("level", 17)])));
//!
//! let packed = composer.pack(&values).unwrap();
//! assert_eq!(packed, vec![0x42, 0xFE, 0xD4, 0xAB, 0xCD, 0b101_10001]);
//! assert_eq!(composer.unpack(&packed).unwrap(), values);
//! ```
//!
//! ## Features
//!
//! - `serde`: deserializable packet descriptions (module `serde`) that compile into
//!   a [PacketComposer], and map (de)serialization for [Record].

pub mod bit_packer;
pub mod bits;
pub mod codec;
pub mod composer;
pub mod dtype;
pub mod errors;
pub mod numeric;
pub mod raw;
pub mod record;
#[cfg(feature = "serde")]
pub mod serde;
pub mod value;

pub use bit_packer::{BitPacker, Subfield};
pub use codec::FieldCodec;
pub use composer::{ComposedField, PacketComposer, PacketComposerBuilder};
pub use dtype::{Endianness, NumericType};
pub use errors::{CodecError, ConfigError};
pub use numeric::NumericField;
pub use raw::RawField;
pub use record::Record;
pub use value::{BitValues, PacketValue, Value, ValueKind};
