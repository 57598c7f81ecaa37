use alloc::rc::Rc;
use core::cell::RefCell;

use crate::impls::{GenericTypePathCell, concat};
use crate::info::{FieldKind, TypePath, Typed};
use crate::{DecodeError, Decoder, EncodeError, Encoder, Field, Object, ObjectRef};

impl<T: TypePath> TypePath for Rc<RefCell<T>> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["alloc::rc::Rc<core::cell::RefCell<", T::type_path(), ">>"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Rc<RefCell<", T::type_name(), ">>"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Rc"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::rc")
    }
}

/// A shared instance of a known type, see [`Shared`](crate::Shared).
impl<T: Object + Typed + Default> Field for Rc<RefCell<T>> {
    #[inline]
    fn kind() -> FieldKind {
        FieldKind::Object
    }

    #[inline]
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.write_shared(self)
    }

    #[inline]
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.read_shared()
    }
}

impl TypePath for ObjectRef {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::rc::Rc<core::cell::RefCell<dyn rg_serial::Object>>"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Rc<RefCell<dyn Object>>"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Rc"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::rc")
    }
}

/// A shared instance of any registered type, see [`ObjectRef`].
impl Field for ObjectRef {
    #[inline]
    fn kind() -> FieldKind {
        FieldKind::Interface
    }

    #[inline]
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.write_object_ref(self)
    }

    #[inline]
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.read_object_ref()
    }
}
