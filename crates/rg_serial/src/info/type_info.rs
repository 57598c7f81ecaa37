use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::info::{FieldKind, TypePath};
use crate::{Field, Object, Tracked, share};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Implemented by [`#[derive(Serializable)]`](crate::derive::Serializable) and
/// by the std containers that can be shared instances.
///
/// # Examples
///
/// ```
/// use rg_serial::Serializable;
/// use rg_serial::info::{Typed, TypeKind};
///
/// #[derive(Serializable, Default)]
/// struct Account {
///     owner: String,
///     balance: i64,
///     #[serializable(ignore)]
///     cached: Option<u64>,
/// }
///
/// let info = Account::type_info();
/// assert_eq!(info.kind(), TypeKind::Record);
/// assert_eq!(info.members().len(), 2);
/// assert_eq!(info.member("balance").unwrap().type_path(), "i64");
/// assert!(info.member("cached").is_none());
/// ```
pub trait Typed: TypePath {
    /// Returns the compile-time info for the underlying type.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// TypeKind

/// The broad shape of a described type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A record with reference identity, see [`Object`].
    Record,
    /// A record copied by value.
    Value,
    /// A fieldless enumeration.
    Enum,
    /// A sequence that can be a shared instance.
    List,
    /// A key/value table that can be a shared instance.
    Map,
}

// -----------------------------------------------------------------------------
// MemberInfo

/// Describes one serializable member of a record.
///
/// Members are listed in declaration order, which is also the order their
/// values appear in encoded text. Members marked `#[serializable(ignore)]`
/// are not described at all.
#[derive(Clone)]
pub struct MemberInfo {
    name: &'static str,
    kind: FieldKind,
    type_path: &'static str,
}

impl MemberInfo {
    /// Describes a member named `name` of type `F`.
    pub fn new<F: Field>(name: &'static str) -> Self {
        Self {
            name,
            kind: F::kind(),
            type_path: F::type_path(),
        }
    }

    /// The member name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The encoding kind of the member.
    #[inline]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// The type path of the member type.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.name, self.type_path, self.kind)
    }
}

// -----------------------------------------------------------------------------
// VariantInfo

/// Describes one variant of a fieldless enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantInfo {
    name: &'static str,
    discriminant: i64,
}

impl VariantInfo {
    /// Creates a variant descriptor.
    #[inline]
    pub const fn new(name: &'static str, discriminant: i64) -> Self {
        Self { name, discriminant }
    }

    /// The variant name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The discriminant written to encoded text.
    #[inline]
    pub const fn discriminant(&self) -> i64 {
        self.discriminant
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information about a type.
///
/// Created once per type, stored in a static cell and referred to as
/// `&'static TypeInfo` from then on. See [`Typed`].
pub struct TypeInfo {
    type_id: TypeId,
    type_path: &'static str,
    type_name: &'static str,
    kind: TypeKind,
    members: Box<[MemberInfo]>,
    variants: Box<[VariantInfo]>,
    allocate: Option<fn() -> Tracked>,
}

fn allocate<T: Object + Typed + Default>() -> Tracked {
    Tracked::new(&share(T::default()))
}

impl TypeInfo {
    #[inline]
    fn of<T: TypePath>(kind: TypeKind) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: T::type_path(),
            type_name: T::type_name(),
            kind,
            members: Box::new([]),
            variants: Box::new([]),
            allocate: None,
        }
    }

    /// Describes a record with identity.
    ///
    /// Records can be created by name, which is what lets an
    /// [`ObjectRef`](crate::ObjectRef) slot hold any registered record.
    pub fn record<T: Object + Typed + Default>(
        members: impl IntoIterator<Item = MemberInfo>,
    ) -> Self {
        Self {
            members: members.into_iter().collect(),
            allocate: Some(allocate::<T>),
            ..Self::of::<T>(TypeKind::Record)
        }
    }

    /// Describes a record copied by value.
    pub fn value<T: TypePath>(members: impl IntoIterator<Item = MemberInfo>) -> Self {
        Self {
            members: members.into_iter().collect(),
            ..Self::of::<T>(TypeKind::Value)
        }
    }

    /// Describes a fieldless enumeration.
    pub fn enumeration<T: TypePath>(variants: impl IntoIterator<Item = VariantInfo>) -> Self {
        Self {
            variants: variants.into_iter().collect(),
            ..Self::of::<T>(TypeKind::Enum)
        }
    }

    /// Describes a sequence that can be a shared instance.
    pub fn list<T: Object + Typed + Default>() -> Self {
        Self {
            allocate: Some(allocate::<T>),
            ..Self::of::<T>(TypeKind::List)
        }
    }

    /// Describes a key/value table that can be a shared instance.
    pub fn map<T: Object + Typed + Default>() -> Self {
        Self {
            allocate: Some(allocate::<T>),
            ..Self::of::<T>(TypeKind::Map)
        }
    }

    /// The [`TypeId`] of the described type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The shape of the type.
    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Serializable members in declaration order. Empty for non-records.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Finds a member by name.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|member| member.name == name)
    }

    /// Enumeration variants. Empty for other kinds.
    #[inline]
    pub fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    /// Finds the variant with the given discriminant.
    pub fn variant(&self, discriminant: i64) -> Option<&VariantInfo> {
        self.variants
            .iter()
            .find(|variant| variant.discriminant == discriminant)
    }

    /// Returns `true` if instances can be created from the type name alone.
    #[inline]
    pub fn is_instantiable(&self) -> bool {
        self.allocate.is_some()
    }

    /// Creates a default shared instance, if the type has identity.
    #[inline]
    pub fn instantiate(&self) -> Option<Tracked> {
        self.allocate.map(|allocate| allocate())
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_path", &self.type_path)
            .field("kind", &self.kind)
            .field("members", &self.members)
            .field("variants", &self.variants)
            .finish()
    }
}
