//! `Field` implementations for std types, and utilities for implementing
//! the info traits by hand.
//!
//! - [`concat`]: An efficient string concatenation function.
//! - [`NonGenericTypeInfoCell`]: Used to implement [`Typed`] for non-generic types.
//! - [`GenericTypePathCell`]: Used to implement [`TypePath`] for generic types.
//! - [`GenericTypeInfoCell`]: Used to implement [`Typed`] for generic types.
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `char`, `i8`-`i128`, `isize`, `u8`-`u128`, `usize`, `f32`, `f64`
//! - text: `String`, `Box<str>`
//! - time: `core::time::Duration`, `chrono::DateTime<Utc>` ("chrono" feature)
//! - identifiers: `uuid::Uuid` ("uuid" feature)
//! - nullable: `Option<T>`
//! - sequences: `Vec<T>`, `Box<[T]>`, `[T; N]`
//! - tables: `HashMap<K, V>`, `BTreeMap<K, V>`
//! - shared: `Rc<RefCell<T>>`, `Rc<RefCell<dyn Object>>`
//!
//! `Vec<T>`, `HashMap<K, V>` and `BTreeMap<K, V>` are also [`Object`]s, so they
//! can be shared and referenced like records when wrapped in [`Shared`].
//!
//! [`Typed`]: crate::info::Typed
//! [`TypePath`]: crate::info::TypePath
//! [`Object`]: crate::Object
//! [`Shared`]: crate::Shared

// -----------------------------------------------------------------------------
// Modules

mod cell;

mod map;
mod option;
mod scalar;
mod sequence;
mod shared;
mod text;
mod time;

#[cfg(feature = "uuid")]
mod uuid;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

/// An efficient string concatenation function.
///
/// This is usually used for the implementation of `TypePath`.
///
/// # Example
///
/// ```
/// use rg_serial::impls;
///
/// let s = impls::concat(&["module", "::", "name", "<", "T" , ">"]);
///
/// assert_eq!(s, "module::name<T>");
/// assert_eq!(s.capacity(), 15);
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> ::alloc::string::String {
    let mut len = 0usize;
    for &item in arr {
        len += item.len();
    }
    let mut res = ::alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}
