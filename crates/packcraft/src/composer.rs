//! Packet composer: an ordered set of named fields packed back to back.

use std::collections::HashSet;

use crate::{
    codec::{FieldCodec, check_length},
    errors::{CodecError, ConfigError},
    value::PacketValue,
};

/// A named field of a [PacketComposer].
#[derive(Debug)]
pub struct ComposedField {
    name: String,
    offset: usize,
    /// Length reported by the codec when the composer was built.
    len: usize,
    codec: Box<dyn FieldCodec>,
}

impl ComposedField {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte offset of the field within the packet.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Encoded length of the field in bytes.
    pub fn length(&self) -> usize {
        self.len
    }

    pub fn codec(&self) -> &dyn FieldCodec {
        self.codec.as_ref()
    }
}

/// Composes named [FieldCodec]s into one fixed-length packet.
///
/// Fields are packed in definition order with no padding between them. Use
/// [PacketComposer::new] or [PacketComposer::builder] to build one, then
/// [PacketComposer::pack] and [PacketComposer::unpack] as many times as needed.
#[derive(Debug)]
pub struct PacketComposer {
    total_len: usize,
    /// Fields in definition order.
    fields: Vec<ComposedField>,
}

impl PacketComposer {
    /// Builds a composer from `(name, codec)` pairs. Fails if a name is empty,
    /// not an identifier or repeated, or if a codec has a length of 0.
    pub fn new<I, S>(fields: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, Box<dyn FieldCodec>)>,
        S: Into<String>,
    {
        let mut composed: Vec<ComposedField> = Vec::new();
        let mut seen = HashSet::new();
        let mut total_len: usize = 0;

        for (name, codec) in fields {
            let name = name.into();
            validate_name(&name)?;

            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateName(name));
            }

            let len = codec.length();
            if len == 0 {
                return Err(ConfigError::ZeroLengthField(name));
            }

            let Some(end) = total_len.checked_add(len) else {
                return Err(ConfigError::PacketTooLong(name));
            };

            composed.push(ComposedField {
                name,
                offset: total_len,
                len,
                codec,
            });
            total_len = end;
        }

        tracing::debug!(
            fields = composed.len(),
            length = total_len,
            "built packet composer"
        );

        Ok(PacketComposer {
            total_len,
            fields: composed,
        })
    }

    pub fn builder() -> PacketComposerBuilder {
        PacketComposerBuilder::default()
    }

    /// Total packet length in bytes.
    pub fn length(&self) -> usize {
        self.total_len
    }

    pub fn fields(&self) -> &[ComposedField] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&ComposedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Packs `values` into a buffer of exactly [PacketComposer::length] bytes.
    ///
    /// The keys of `values` must be the field names in definition order. The
    /// first field that fails to pack aborts the whole packet.
    pub fn pack(&self, values: &PacketValue) -> Result<Vec<u8>, CodecError> {
        if !values.keys_match(self.field_names()) {
            return Err(CodecError::shape(self.field_names(), values.keys()));
        }

        let mut out = Vec::with_capacity(self.total_len);
        for (field, value) in self.fields.iter().zip(values.values()) {
            field.codec.pack_into(value, &mut out).inspect_err(|err| {
                tracing::debug!(field = %field.name, %err, "failed to pack field");
            })?;

            let written = out.len() - field.offset;
            if written != field.len {
                tracing::debug!(
                    field = %field.name,
                    written,
                    expected = field.len,
                    "codec wrote wrong length"
                );
                return Err(CodecError::length(field.len, written));
            }
        }

        tracing::trace!(length = out.len(), "packed packet");
        Ok(out)
    }

    /// Unpacks a buffer of exactly [PacketComposer::length] bytes into field
    /// values in definition order.
    pub fn unpack(&self, data: &[u8]) -> Result<PacketValue, CodecError> {
        check_length(data, self.total_len)?;

        let mut values = PacketValue::with_capacity(self.fields.len());
        for field in &self.fields {
            let bytes = &data[field.offset..field.offset + field.len];
            let value = field.codec.unpack(bytes).inspect_err(|err| {
                tracing::debug!(field = %field.name, %err, "failed to unpack field");
            })?;

            values.insert(field.name.clone(), value);
        }

        tracing::trace!(fields = values.len(), "unpacked packet");
        Ok(values)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<crate::serde::PacketDef> for PacketComposer {
    type Error = ConfigError;

    fn try_from(value: crate::serde::PacketDef) -> Result<Self, Self::Error> {
        let fields = value
            .fields
            .into_iter()
            .map(|field| -> Result<_, ConfigError> { Ok((field.name, field.kind.build()?)) })
            .collect::<Result<Vec<_>, _>>()?;

        PacketComposer::new(fields)
    }
}

/// Incremental builder for a [PacketComposer].
#[derive(Debug, Default)]
pub struct PacketComposerBuilder {
    fields: Vec<(String, Box<dyn FieldCodec>)>,
}

impl PacketComposerBuilder {
    /// Appends a field. Validation is deferred to [PacketComposerBuilder::build].
    pub fn field(mut self, name: impl Into<String>, codec: impl FieldCodec + 'static) -> Self {
        let codec: Box<dyn FieldCodec> = Box::new(codec);
        self.fields.push((name.into(), codec));
        self
    }

    pub fn build(self) -> Result<PacketComposer, ConfigError> {
        PacketComposer::new(self.fields)
    }
}

/// Field names are identifiers: `[A-Za-z_][A-Za-z0-9_]*`.
fn validate_name(name: &str) -> Result<(), ConfigError> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(ConfigError::EmptyName);
    };

    let valid = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(ConfigError::InvalidName(name.to_string()));
    }

    Ok(())
}
