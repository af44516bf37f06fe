//! The [FieldCodec] trait implemented by every packet field.

use crate::{errors::CodecError, value::Value};

/// A fixed-length field that converts a [Value] to bytes and back.
///
/// Implementations must be immutable once built: [FieldCodec::length] is
/// constant, and every successful pack produces exactly that many bytes.
pub trait FieldCodec: Send + Sync + std::fmt::Debug {
    /// Encoded length in bytes. Always greater than 0.
    fn length(&self) -> usize;

    /// Appends the encoding of `value` to `dst`.
    ///
    /// On error nothing is guaranteed about `dst`; callers discard it.
    fn pack_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), CodecError>;

    /// Decodes `data`, which must be exactly [FieldCodec::length] bytes.
    fn unpack(&self, data: &[u8]) -> Result<Value, CodecError>;

    /// Encodes `value` into a new buffer of [FieldCodec::length] bytes.
    fn pack(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(self.length());
        self.pack_into(value, &mut out)?;
        Ok(out)
    }
}

impl<T: FieldCodec + ?Sized> FieldCodec for Box<T> {
    fn length(&self) -> usize {
        (**self).length()
    }

    fn pack_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), CodecError> {
        (**self).pack_into(value, dst)
    }

    fn unpack(&self, data: &[u8]) -> Result<Value, CodecError> {
        (**self).unpack(data)
    }
}

/// Fails with [CodecError::Length] unless `data` is exactly `expected` bytes.
pub(crate) fn check_length(data: &[u8], expected: usize) -> Result<(), CodecError> {
    if data.len() != expected {
        return Err(CodecError::length(expected, data.len()));
    }

    Ok(())
}
