//! Compile-time type information.
//!
//! - [`TypePath`]: stable type names, the key under which types are encoded.
//! - [`Typed`]: access to the static [`TypeInfo`] of a type.
//! - [`MemberInfo`]: an ordered, named member of a record.
//! - [`FieldKind`]: how a member is encoded.

// -----------------------------------------------------------------------------
// Modules

mod field_kind;
mod type_info;
mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use field_kind::FieldKind;
pub use type_info::{MemberInfo, TypeInfo, TypeKind, Typed, VariantInfo};
pub use type_path::{DynamicTypePath, TypePath};
