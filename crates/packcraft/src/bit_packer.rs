//! Named sub-integer fields packed into one unsigned integer container.
//!
//! Subfields are laid out most-significant first: the first subfield occupies
//! the high bits of the container and the last one the low bits. The
//! container itself is then encoded in the configured byte order, so the
//! byte order never changes which bits belong to which subfield.
//!
//! ```
//! use packcraft::{BitPacker, BitValues, Endianness, NumericType};
//!
//! let packer = BitPacker::new(
//!     NumericType::U16,
//!     [("f1", 3), ("f2", 6), ("f3", 7)],
//!     Endianness::Big,
//! )
//! .unwrap();
//!
//! let values = BitValues::from([("f1", 7), ("f2", 20), ("f3", 30)]);
//! let packed = packer.pack_fields(&values).unwrap();
//! assert_eq!(packed, vec![0xEA, 0x1E]);
//! assert_eq!(packer.unpack_fields(&packed).unwrap(), values);
//! ```

use std::collections::HashSet;

use crate::{
    bits,
    codec::{FieldCodec, check_length},
    dtype::{Endianness, NumericType},
    errors::{CodecError, ConfigError},
    value::{BitValues, Value},
};

/// A named bit range of a [BitPacker] container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subfield {
    pub name: String,
    /// Width in bits.
    pub bits: u32,
}

impl Subfield {
    pub fn new(name: impl Into<String>, bits: u32) -> Self {
        Subfield {
            name: name.into(),
            bits,
        }
    }
}

impl<S: Into<String>> From<(S, u32)> for Subfield {
    fn from((name, bits): (S, u32)) -> Self {
        Subfield::new(name, bits)
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::SubfieldDef> for Subfield {
    fn from(value: crate::serde::SubfieldDef) -> Self {
        Subfield::new(value.name, value.bits)
    }
}

#[derive(Debug, Clone)]
struct CompiledSubfield {
    name: String,
    bits: u32,
    /// Distance of the subfield's lowest bit from bit 0 of the container.
    shift: u32,
}

impl CompiledSubfield {
    fn extract(&self, container: u64) -> u64 {
        (container >> self.shift) & bits::low_mask(self.bits)
    }
}

/// Packs and unpacks named subfields into a uint8/16/32/64 container.
#[derive(Debug, Clone)]
pub struct BitPacker {
    container: NumericType,
    endianness: Endianness,
    subfields: Vec<CompiledSubfield>,
}

impl BitPacker {
    /// Builds a packer over `subfields`, in most-significant-first order.
    ///
    /// Fails unless `container` is unsigned and the subfield widths add up to
    /// exactly its bit width. Subfield names must be non-empty and unique, and
    /// every subfield must be at least one bit wide.
    pub fn new<I>(
        container: NumericType,
        subfields: I,
        endianness: Endianness,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<Subfield>,
    {
        if !container.is_unsigned() {
            return Err(ConfigError::UnsupportedContainer(container));
        }

        let subfields: Vec<Subfield> = subfields.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(subfields.len());
        for subfield in &subfields {
            if subfield.name.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !seen.insert(subfield.name.as_str()) {
                return Err(ConfigError::DuplicateName(subfield.name.clone()));
            }
            if subfield.bits == 0 {
                return Err(ConfigError::ZeroWidthSubfield(subfield.name.clone()));
            }
        }

        let total_bits = subfields
            .iter()
            .fold(0u32, |acc, subfield| acc.saturating_add(subfield.bits));
        if total_bits != container.bits() {
            return Err(ConfigError::WidthMismatch {
                expected: container.bits(),
                actual: total_bits,
            });
        }

        let mut remaining = container.bits();
        let compiled = subfields
            .into_iter()
            .map(|subfield| {
                remaining -= subfield.bits;
                CompiledSubfield {
                    name: subfield.name,
                    bits: subfield.bits,
                    shift: remaining,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            container = %container,
            subfields = compiled.len(),
            ?endianness,
            "built bit packer"
        );

        Ok(BitPacker {
            container,
            endianness,
            subfields: compiled,
        })
    }

    /// [BitPacker::new] with big-endian byte order.
    pub fn big_endian<I>(container: NumericType, subfields: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<Subfield>,
    {
        Self::new(container, subfields, Endianness::Big)
    }

    pub fn container(&self) -> NumericType {
        self.container
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Subfield names in layout order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subfields.iter().map(|s| s.name.as_str())
    }

    /// Subfields in layout order.
    pub fn subfields(&self) -> impl Iterator<Item = Subfield> + '_ {
        self.subfields
            .iter()
            .map(|s| Subfield::new(s.name.clone(), s.bits))
    }

    /// Encodes a whole container value.
    pub fn pack_integer(&self, value: u64) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(self.container.size());
        self.write_integer(value, &mut out)?;
        Ok(out)
    }

    /// Encodes subfield values. The keys of `values` must be the subfield
    /// names in layout order.
    pub fn pack_fields(&self, values: &BitValues) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(self.container.size());
        self.write_fields(values, &mut out)?;
        Ok(out)
    }

    /// Decodes the container as a single integer.
    pub fn unpack_integer(&self, data: &[u8]) -> Result<u64, CodecError> {
        check_length(data, self.container.size())?;
        Ok(bits::read_uint(data, self.endianness))
    }

    /// Decodes the container into its subfields, in layout order.
    pub fn unpack_fields(&self, data: &[u8]) -> Result<BitValues, CodecError> {
        let container = self.unpack_integer(data)?;

        let mut values = BitValues::with_capacity(self.subfields.len());
        for subfield in &self.subfields {
            values.insert(subfield.name.clone(), subfield.extract(container));
        }

        Ok(values)
    }

    /// Decodes `data` as [Value::U64] if `as_integer`, else as [Value::Bits].
    pub fn unpack_with(&self, data: &[u8], as_integer: bool) -> Result<Value, CodecError> {
        if as_integer {
            self.unpack_integer(data).map(Value::U64)
        } else {
            self.unpack_fields(data).map(Value::Bits)
        }
    }

    fn write_integer(&self, value: u64, dst: &mut Vec<u8>) -> Result<(), CodecError> {
        if !bits::fits_unsigned(value, self.container.bits()) {
            return Err(CodecError::Range {
                field: self.container.name().to_string(),
                value: value as i128,
                bits: self.container.bits(),
            });
        }

        bits::write_uint(value, self.container.size(), self.endianness, dst);
        Ok(())
    }

    fn write_fields(&self, values: &BitValues, dst: &mut Vec<u8>) -> Result<(), CodecError> {
        if !values.keys_match(self.names()) {
            return Err(CodecError::shape(self.names(), values.keys()));
        }

        let mut container = 0u64;
        for (subfield, &value) in self.subfields.iter().zip(values.values()) {
            if !bits::fits_unsigned(value, subfield.bits) {
                return Err(CodecError::Range {
                    field: subfield.name.clone(),
                    value: value as i128,
                    bits: subfield.bits,
                });
            }

            container |= value << subfield.shift;
        }

        bits::write_uint(container, self.container.size(), self.endianness, dst);
        Ok(())
    }
}

impl FieldCodec for BitPacker {
    fn length(&self) -> usize {
        self.container.size()
    }

    fn pack_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), CodecError> {
        match value {
            Value::Bits(values) => self.write_fields(values, dst),
            Value::U64(v) => self.write_integer(*v, dst),
            Value::I64(v) => match u64::try_from(*v) {
                Ok(v) => self.write_integer(v, dst),
                Err(_) => Err(CodecError::Range {
                    field: self.container.name().to_string(),
                    value: *v as i128,
                    bits: self.container.bits(),
                }),
            },
            other => Err(CodecError::Type {
                expected: "integer or bit fields",
                found: other.kind(),
            }),
        }
    }

    fn unpack(&self, data: &[u8]) -> Result<Value, CodecError> {
        self.unpack_with(data, false)
    }
}
