use alloc::boxed::Box;
use core::fmt;

/// The classification of a member, used to choose its encoding.
///
/// Scalar kinds are written as a literal, `String` as a length-prefixed string.
/// Composite kinds carry the kinds of their elements.
///
/// # Examples
///
/// ```
/// use rg_serial::Field;
/// use rg_serial::info::FieldKind;
///
/// assert_eq!(<Option<Vec<i32>>>::kind(), FieldKind::Nullable(Box::new(
///     FieldKind::List(Box::new(FieldKind::Int)),
/// )));
/// assert!(u8::kind().is_scalar());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// Signed integers.
    Int,
    /// Unsigned integers.
    UInt,
    /// `f32` and `f64`.
    Float,
    /// Text.
    String,
    /// A point in time.
    DateTime,
    /// A span of time.
    Duration,
    /// A 128-bit unique identifier.
    Uuid,
    /// A fieldless enumeration, written as its discriminant.
    Enum,
    /// A value that may be absent.
    Nullable(Box<FieldKind>),
    /// A fixed-size sequence.
    Array(Box<FieldKind>),
    /// A growable sequence owned by its holder.
    List(Box<FieldKind>),
    /// A key/value table owned by its holder.
    Map(Box<FieldKind>, Box<FieldKind>),
    /// A record copied by value, without identity.
    Value,
    /// A shared instance of a statically known type.
    Object,
    /// A shared instance whose concrete type is only known at run time.
    Interface,
}

impl FieldKind {
    /// Returns `true` for kinds written as a single literal.
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::Char
                | Self::Int
                | Self::UInt
                | Self::Float
                | Self::DateTime
                | Self::Duration
                | Self::Uuid
                | Self::Enum
        )
    }

    /// Returns `true` for kinds that carry reference identity.
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::Object | Self::Interface)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Char => f.write_str("char"),
            Self::Int => f.write_str("int"),
            Self::UInt => f.write_str("uint"),
            Self::Float => f.write_str("float"),
            Self::String => f.write_str("string"),
            Self::DateTime => f.write_str("datetime"),
            Self::Duration => f.write_str("duration"),
            Self::Uuid => f.write_str("uuid"),
            Self::Enum => f.write_str("enum"),
            Self::Nullable(inner) => write!(f, "{inner}?"),
            Self::Array(inner) => write!(f, "[{inner}]"),
            Self::List(inner) => write!(f, "list<{inner}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
            Self::Value => f.write_str("value"),
            Self::Object => f.write_str("object"),
            Self::Interface => f.write_str("interface"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FieldKind;
    use alloc::boxed::Box;
    use alloc::string::ToString;

    #[test]
    fn display_nests() {
        let kind = FieldKind::Map(
            Box::new(FieldKind::String),
            Box::new(FieldKind::Nullable(Box::new(FieldKind::Object))),
        );
        assert_eq!(kind.to_string(), "map<string, object?>");
    }

    #[test]
    fn classification() {
        assert!(FieldKind::Enum.is_scalar());
        assert!(!FieldKind::String.is_scalar());
        assert!(FieldKind::Interface.is_reference());
        assert!(!FieldKind::Value.is_reference());
    }
}
