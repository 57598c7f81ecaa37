use uuid::Uuid;

use crate::info::{FieldKind, TypePath};
use crate::{DecodeError, Decoder, EncodeError, Encoder, Field};

impl TypePath for Uuid {
    #[inline]
    fn type_path() -> &'static str {
        "uuid::Uuid"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Uuid"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Uuid"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("uuid")
    }
}

/// Written in the hyphenated form.
impl Field for Uuid {
    #[inline]
    fn kind() -> FieldKind {
        FieldKind::Uuid
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.write_scalar(self.hyphenated());
        Ok(())
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.read_with("uuid", |literal| Uuid::parse_str(literal).ok())
    }
}
