//! Fixed-width integer and floating point fields.

use crate::{
    bits,
    codec::{FieldCodec, check_length},
    dtype::{Endianness, NumericType},
    errors::CodecError,
    value::Value,
};

/// A field holding one [NumericType] value in a chosen byte order.
///
/// Integer types accept [Value::U64] and [Value::I64] as long as the value is
/// in range for the type; float types accept [Value::F32] and [Value::F64].
/// Unpacking yields `U64` for unsigned types, `I64` for signed types, `F32`
/// for `float` and `F64` for `double`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericField {
    dtype: NumericType,
    endianness: Endianness,
}

impl NumericField {
    pub fn new(dtype: NumericType, endianness: Endianness) -> Self {
        NumericField { dtype, endianness }
    }

    pub fn big_endian(dtype: NumericType) -> Self {
        Self::new(dtype, Endianness::Big)
    }

    pub fn little_endian(dtype: NumericType) -> Self {
        Self::new(dtype, Endianness::Little)
    }

    pub fn dtype(&self) -> NumericType {
        self.dtype
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Raw bit pattern of `value` for this type.
    fn encode(&self, value: &Value) -> Result<u64, CodecError> {
        match (self.dtype, value) {
            (NumericType::F32, Value::F32(v)) => Ok(v.to_bits() as u64),
            (NumericType::F32, Value::F64(v)) => {
                let narrowed = *v as f32;
                if v.is_finite() && narrowed.is_infinite() {
                    return Err(CodecError::FloatRange {
                        field: NumericType::F32.name().to_string(),
                        value: *v,
                    });
                }
                Ok(narrowed.to_bits() as u64)
            }
            (NumericType::F64, Value::F64(v)) => Ok(v.to_bits()),
            (NumericType::F64, Value::F32(v)) => Ok((*v as f64).to_bits()),
            (dtype, _) if dtype.is_float() => Err(CodecError::Type {
                expected: "float",
                found: value.kind(),
            }),
            (dtype, _) => {
                let v = value.as_integer().ok_or(CodecError::Type {
                    expected: "integer",
                    found: value.kind(),
                })?;

                let in_range = dtype
                    .integer_range()
                    .is_some_and(|(min, max)| (min..=max).contains(&v));
                if !in_range {
                    return Err(CodecError::Range {
                        field: dtype.name().to_string(),
                        value: v,
                        bits: dtype.bits(),
                    });
                }

                // Truncation keeps the two's complement low bytes.
                Ok(v as u64)
            }
        }
    }
}

impl FieldCodec for NumericField {
    fn length(&self) -> usize {
        self.dtype.size()
    }

    fn pack_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), CodecError> {
        let raw = self.encode(value)?;
        bits::write_uint(raw, self.dtype.size(), self.endianness, dst);
        Ok(())
    }

    fn unpack(&self, data: &[u8]) -> Result<Value, CodecError> {
        check_length(data, self.dtype.size())?;

        let raw = bits::read_uint(data, self.endianness);
        let value = match self.dtype {
            NumericType::F32 => Value::F32(f32::from_bits(raw as u32)),
            NumericType::F64 => Value::F64(f64::from_bits(raw)),
            dtype if dtype.is_signed() => Value::I64(bits::sign_extend(raw, dtype.bits())),
            _ => Value::U64(raw),
        };

        Ok(value)
    }
}
