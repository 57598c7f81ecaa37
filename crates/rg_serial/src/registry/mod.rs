//! The metadata registry.
//!
//! - [`TypeRegistry`]: type info by [`TypeId`](core::any::TypeId), type path and short name.
//! - [`TypeRegistryArc`]: a shared, lockable handle, and the process-wide registry.

// -----------------------------------------------------------------------------
// Modules

mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_registry::{TypeRegistry, TypeRegistryArc};
