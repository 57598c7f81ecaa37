//! Containers for static storage of type information.
//!
//! ## NonGenericTypeInfoCell
//!
//! For non-generic types, [`NonGenericTypeInfoCell`] stores the [`TypeInfo`]
//! in a [`OnceLock`]. Type paths of non-generic types are string literals and
//! need no cell.
//!
//! ## GenericTypeCell
//!
//! A `static CELL` inside a generic function is shared by every instantiation,
//! so [`GenericTypeInfoCell`] and [`GenericTypePathCell`] keep one entry per
//! [`TypeId`] in a [`TypeIdMap`] behind a [`RwLock`].

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use rg_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;
    use alloc::string::String;
    pub trait TypedProperty: 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
}

use sealed::TypedProperty;

/// Container for static storage of non-generic type information.
///
/// See [`NonGenericTypeInfoCell`].
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// Container for static storage of non-generic type information.
///
/// ## Example
///
/// ```
/// use rg_serial::impls::NonGenericTypeInfoCell;
/// use rg_serial::info::{MemberInfo, TypeInfo, TypePath, Typed};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl TypePath for Point {
///     fn type_path() -> &'static str { "geo::Point" }
///     fn type_name() -> &'static str { "Point" }
///     fn type_ident() -> &'static str { "Point" }
/// }
///
/// impl Typed for Point {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::value::<Self>([
///             MemberInfo::new::<i32>("x"),
///             MemberInfo::new::<i32>("y"),
///         ]))
///     }
/// }
///
/// assert_eq!(Point::type_info().members().len(), 2);
/// assert!(core::ptr::eq(Point::type_info(), Point::type_info()));
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, generating it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

/// Container for static storage of type information with generics.
///
/// See [`GenericTypeInfoCell`] and [`GenericTypePathCell`].
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Container for static storage of [`TypeInfo`] with generics.
///
/// Used the same way as [`NonGenericTypeInfoCell`], with
/// `CELL.get_or_insert::<Self>(..)` in place of `get_or_init`.
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Container for static storage of type paths with generics.
///
/// ## Example
///
/// ```
/// use rg_serial::info::TypePath;
/// use rg_serial::impls::{concat, GenericTypePathCell};
///
/// struct Pair<T>(T, T);
///
/// impl<T: TypePath> TypePath for Pair<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["geo::Pair", "<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["Pair", "<", T::type_name(), ">"]))
///     }
///     fn type_ident() -> &'static str { "Pair" }
/// }
///
/// assert_eq!(<Pair<i32>>::type_path(), "geo::Pair<i32>");
/// assert_eq!(<Pair<String>>::type_name(), "Pair<String>");
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for `G`, generating it with `f` on first access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // A concurrent insert for the same id keeps the first value; `value` is then dropped.
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
