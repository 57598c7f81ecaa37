use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::Any;

use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{FieldKind, TypeInfo, TypePath, Typed};
use crate::{DecodeError, Decoder, EncodeError, Encoder, Field, Object};

#[inline]
fn encode_elements<T: Field>(elements: &[T], encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
    elements.iter().try_for_each(|element| element.encode(encoder))
}

fn decode_elements<T: Field>(
    len: usize,
    decoder: &mut Decoder<'_>,
    out: &mut Vec<T>,
) -> Result<(), DecodeError> {
    // A hostile length must not drive the allocation.
    out.reserve(len.min(decoder.remaining()));
    for _ in 0..len {
        out.push(T::decode(decoder)?);
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Vec

impl<T: TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::vec::Vec<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Vec<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Vec"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::vec")
    }
}

/// An owned list, written inline without identity.
impl<T: Field> Field for Vec<T> {
    #[inline]
    fn kind() -> FieldKind {
        FieldKind::List(Box::new(T::kind()))
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.write_list(self.len(), |encoder| encode_elements(self, encoder))
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.read_list(|decoder, len| {
            let mut out = Vec::new();
            decode_elements(len, decoder, &mut out)?;
            Ok(out)
        })
    }
}

impl<T: Field> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(TypeInfo::list::<Self>)
    }
}

/// A shared list: the body is the elements.
impl<T: Field> Object for Vec<T> {
    #[inline]
    fn object_type_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    #[inline]
    fn body_len(&self) -> usize {
        self.len()
    }

    fn encode_body(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encode_elements(self, encoder)
    }

    fn decode_body(&mut self, len: usize, decoder: &mut Decoder<'_>) -> Result<(), DecodeError> {
        self.clear();
        decode_elements(len, decoder, self)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// -----------------------------------------------------------------------------
// Box<[T]>

impl<T: TypePath> TypePath for Box<[T]> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::boxed::Box<[", T::type_path(), "]>"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Box<[", T::type_name(), "]>"]))
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

impl<T: Field> Field for Box<[T]> {
    #[inline]
    fn kind() -> FieldKind {
        FieldKind::Array(Box::new(T::kind()))
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.write_list(self.len(), |encoder| encode_elements(self, encoder))
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Vec::<T>::decode(decoder).map(Vec::into_boxed_slice)
    }
}

// -----------------------------------------------------------------------------
// [T; N]

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["[", T::type_path(), "; ", &N.to_string(), "]"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["[", T::type_name(), "; ", &N.to_string(), "]"])
        })
    }

    #[inline]
    fn type_ident() -> &'static str {
        "[T; N]"
    }
}

/// A fixed-size array; a different length in the input is an error.
impl<T: Field, const N: usize> Field for [T; N] {
    #[inline]
    fn kind() -> FieldKind {
        FieldKind::Array(Box::new(T::kind()))
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.write_list(N, |encoder| encode_elements(self, encoder))
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.read_list(|decoder, len| {
            if len != N {
                return Err(DecodeError::LengthMismatch {
                    expected: N,
                    found: len,
                });
            }
            let mut out = Vec::with_capacity(N);
            decode_elements(len, decoder, &mut out)?;
            out.try_into().map_err(|out: Vec<T>| DecodeError::LengthMismatch {
                expected: N,
                found: out.len(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::{TypeRegistry, TypeRegistryArc};
    use crate::info::{FieldKind, TypePath};
    use crate::{DecodeError, Decoder, Field};
    use alloc::boxed::Box;

    fn decode<T: Field>(text: &str) -> Result<T, DecodeError> {
        let registry = TypeRegistryArc::new(TypeRegistry::empty());
        Decoder::new(text, &registry, 8).decode()
    }

    #[test]
    fn array_type_path() {
        assert_eq!(<[u8; 4]>::type_path(), "[u8; 4]");
        assert_eq!(<[u8; 4]>::kind(), FieldKind::Array(Box::new(FieldKind::UInt)));
    }

    #[test]
    fn array_length_is_checked() {
        assert_eq!(decode::<[u8; 2]>("~l2;1;2;").unwrap(), [1, 2]);
        assert!(matches!(
            decode::<[u8; 3]>("~l2;1;2;"),
            Err(DecodeError::LengthMismatch {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn huge_length_does_not_preallocate() {
        assert!(matches!(
            decode::<alloc::vec::Vec<u8>>("~l18446744073709551615;1;"),
            Err(DecodeError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn boxed_slice() {
        let value: Box<[i16]> = decode("~l3;-1;0;1;").unwrap();
        assert_eq!(&*value, &[-1, 0, 1]);
    }
}
