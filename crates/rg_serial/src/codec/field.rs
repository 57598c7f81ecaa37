use crate::info::{FieldKind, TypePath};
use crate::{DecodeError, Decoder, EncodeError, Encoder};

/// A type that can be a member of a serializable record.
///
/// Implemented for scalars, strings, time and identifier types, `Option`,
/// sequences, tables and [`Shared`](crate::Shared) handles. Records derive it
/// through their [`Shared`](crate::Shared) handle; value types and fieldless
/// enumerations derive it directly.
///
/// # Implementation
///
/// Implementations write exactly one value with the [`Encoder`] and read back
/// exactly one value with the [`Decoder`].
///
/// ```
/// use rg_serial::{DecodeError, Decoder, EncodeError, Encoder, Field};
/// use rg_serial::info::{FieldKind, TypePath};
///
/// /// Degrees, stored as a plain float.
/// #[derive(Debug, PartialEq)]
/// struct Angle(f64);
///
/// impl TypePath for Angle {
///     fn type_path() -> &'static str { "geo::Angle" }
///     fn type_name() -> &'static str { "Angle" }
///     fn type_ident() -> &'static str { "Angle" }
/// }
///
/// impl Field for Angle {
///     fn kind() -> FieldKind { FieldKind::Float }
///
///     fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
///         encoder.write_scalar(self.0);
///         Ok(())
///     }
///
///     fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
///         decoder.read_parsed("float").map(Angle)
///     }
/// }
///
/// let serializer = rg_serial::Serializer::new();
/// let text = serializer.serialize(&Angle(90.5)).unwrap();
/// assert_eq!(serializer.deserialize::<Angle>(&text).unwrap(), Angle(90.5));
/// ```
pub trait Field: TypePath + Sized {
    /// How the type is encoded.
    fn kind() -> FieldKind;

    /// Writes `self` as one value.
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError>;

    /// Reads one value.
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError>;
}
