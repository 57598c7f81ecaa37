//! Parsing of the derive input and its attributes.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod serial_derive;
mod serial_meta;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use serial_derive::{SerialDerive, SerialField, active_fields};
pub(crate) use serial_meta::SerialMeta;
