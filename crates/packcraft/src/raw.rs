use crate::{
    codec::{FieldCodec, check_length},
    errors::{CodecError, ConfigError},
    value::Value,
};

/// A field of raw bytes passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawField {
    len: usize,
}

impl RawField {
    pub fn new(len: usize) -> Result<Self, ConfigError> {
        if len == 0 {
            return Err(ConfigError::ZeroLength);
        }

        Ok(RawField { len })
    }
}

impl FieldCodec for RawField {
    fn length(&self) -> usize {
        self.len
    }

    fn pack_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), CodecError> {
        let bytes = value.as_bytes().ok_or(CodecError::Type {
            expected: "bytes",
            found: value.kind(),
        })?;
        check_length(bytes, self.len)?;

        dst.extend_from_slice(bytes);
        Ok(())
    }

    fn unpack(&self, data: &[u8]) -> Result<Value, CodecError> {
        check_length(data, self.len)?;
        Ok(Value::Bytes(data.to_vec()))
    }
}
