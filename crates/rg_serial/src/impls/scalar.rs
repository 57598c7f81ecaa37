use crate::info::{FieldKind, TypePath};
use crate::{DecodeError, Decoder, EncodeError, Encoder, Field};

macro_rules! impl_primitive_type_path {
    ($($ty:ident),*) => {$(
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                stringify!($ty)
            }

            #[inline]
            fn type_name() -> &'static str {
                stringify!($ty)
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($ty)
            }
        }
    )*};
}

impl_primitive_type_path!(bool, char);
impl_primitive_type_path!(i8, i16, i32, i64, i128, isize);
impl_primitive_type_path!(u8, u16, u32, u64, u128, usize);
impl_primitive_type_path!(f32, f64);

// Numbers round-trip through `Display` and `FromStr`; floats keep NaN and infinities.
macro_rules! impl_number_field {
    ($kind:ident, $target:literal: $($ty:ident),*) => {$(
        impl Field for $ty {
            #[inline]
            fn kind() -> FieldKind {
                FieldKind::$kind
            }

            #[inline]
            fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
                encoder.write_scalar(self);
                Ok(())
            }

            #[inline]
            fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
                decoder.read_parsed($target)
            }
        }
    )*};
}

impl_number_field!(Int, "integer": i8, i16, i32, i64, i128, isize);
impl_number_field!(UInt, "unsigned integer": u8, u16, u32, u64, u128, usize);
impl_number_field!(Float, "float": f32, f64);

impl Field for bool {
    #[inline]
    fn kind() -> FieldKind {
        FieldKind::Bool
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.write_scalar(u8::from(*self));
        Ok(())
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.read_with("bool", |literal| match literal {
            "1" => Some(true),
            "0" => Some(false),
            _ => None,
        })
    }
}

/// Written as its Unicode scalar value.
impl Field for char {
    #[inline]
    fn kind() -> FieldKind {
        FieldKind::Char
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.write_scalar(u32::from(*self));
        Ok(())
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.read_with("char", |literal| {
            literal.parse::<u32>().ok().and_then(char::from_u32)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::{TypeRegistry, TypeRegistryArc};
    use crate::{DecodeError, Decoder, Field};

    fn decode<T: Field>(text: &str) -> Result<T, DecodeError> {
        let registry = TypeRegistryArc::new(TypeRegistry::empty());
        Decoder::new(text, &registry, 8).decode()
    }

    #[test]
    fn literals() {
        assert_eq!(decode::<i64>("-9223372036854775808;").unwrap(), i64::MIN);
        assert_eq!(decode::<u64>("18446744073709551615;").unwrap(), u64::MAX);
        assert!(decode::<bool>("1;").unwrap());
        assert_eq!(decode::<char>("128512;").unwrap(), '😀');
        assert!(decode::<f64>("NaN;").unwrap().is_nan());
        assert_eq!(decode::<f32>("-inf;").unwrap(), f32::NEG_INFINITY);
    }

    #[test]
    fn invalid_literals() {
        assert!(matches!(
            decode::<u8>("256;"),
            Err(DecodeError::InvalidLiteral { target: "unsigned integer", .. })
        ));
        assert!(matches!(
            decode::<bool>("true;"),
            Err(DecodeError::InvalidLiteral { target: "bool", .. })
        ));
        // A surrogate is not a `char`.
        assert!(matches!(
            decode::<char>("55296;"),
            Err(DecodeError::InvalidLiteral { target: "char", .. })
        ));
    }
}
