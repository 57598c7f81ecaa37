//! Encoding and decoding of object graphs.
//!
//! - [`Field`]: a value that can be written and read.
//! - [`Encoder`]: writes a graph; owns a [`TypeInterner`] and a [`ReferenceTracker`].
//! - [`Decoder`]: reads a graph; owns a [`TypeInterner`] and a [`ReferenceTable`].
//!
//! # Text form
//!
//! ```text
//! value      = null | back-ref | object | list | map | inline | string | scalar
//! null       = "~n"
//! back-ref   = "~r" id ";"
//! object     = "~o" type-ref "|" [id] "|" len ";" value*len
//! list       = "~l" len ";" value*len
//! map        = "~m" len ";" (value value)*len
//! inline     = "~v" len ";" value*len
//! string     = "~[" byte-len ":" bytes
//! scalar     = literal ";"
//! type-ref   = token | type-path
//! ```
//!
//! A `type-ref` made only of digits is the token of a type path written in
//! full earlier in the same text. Object ids count up from 0 in the order
//! objects are first written, and are left empty when references are not
//! tracked. A text holds exactly one root value.

// -----------------------------------------------------------------------------
// Modules

mod decoder;
mod encoder;
mod field;
mod grammar;
mod interner;
mod reader;
mod tracker;
mod type_stack;
mod writer;

use type_stack::TypeStack;

// -----------------------------------------------------------------------------
// Exports

pub use decoder::Decoder;
pub use encoder::{Encoder, References};
pub use field::Field;
pub use interner::{Interned, TypeInterner};
pub use tracker::{ReferenceTable, ReferenceTracker, Tracking};
