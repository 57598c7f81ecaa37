use alloc::boxed::Box;

use crate::impls::{GenericTypePathCell, concat};
use crate::info::{FieldKind, TypePath};
use crate::{DecodeError, Decoder, EncodeError, Encoder, Field};

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Option"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

/// `None` is written as null.
///
/// Nested options collapse: `Some(None)` reads back as `None`.
impl<T: Field> Field for Option<T> {
    #[inline]
    fn kind() -> FieldKind {
        FieldKind::Nullable(Box::new(T::kind()))
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        match self {
            Some(value) => value.encode(encoder),
            None => {
                encoder.write_null();
                Ok(())
            }
        }
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        if decoder.take_null() {
            return Ok(None);
        }
        T::decode(decoder).map(Some)
    }
}
