use alloc::boxed::Box;
use alloc::string::String;

use crate::info::{FieldKind, TypePath};
use crate::{DecodeError, Decoder, EncodeError, Encoder, Field};

impl TypePath for String {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::string::String"
    }

    #[inline]
    fn type_name() -> &'static str {
        "String"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "String"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::string")
    }
}

impl Field for String {
    #[inline]
    fn kind() -> FieldKind {
        FieldKind::String
    }

    #[inline]
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.write_str(self);
        Ok(())
    }

    #[inline]
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.read_str().map(String::from)
    }
}

impl TypePath for Box<str> {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::boxed::Box<str>"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Box<str>"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Box"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::boxed")
    }
}

impl Field for Box<str> {
    #[inline]
    fn kind() -> FieldKind {
        FieldKind::String
    }

    #[inline]
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.write_str(self);
        Ok(())
    }

    #[inline]
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.read_str().map(Box::from)
    }
}
