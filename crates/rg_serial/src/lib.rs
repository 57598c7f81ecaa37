//! Reference-preserving serialization of object graphs.
//!
//! A graph of [`Shared`] records is turned into a compact text form and back.
//! Every instance reachable more than once is written once and referred to by
//! id afterwards, so shared sub-objects and cycles survive a round trip.
//!
//! # Quick start
//!
//! ```
//! use rg_serial::{Serializable, Serializer, Shared, share};
//!
//! #[derive(Serializable, Default)]
//! struct Node {
//!     name: String,
//!     next: Option<Shared<Node>>,
//! }
//!
//! let node = share(Node { name: "a".into(), next: None });
//! node.borrow_mut().next = Some(node.clone());
//!
//! let serializer = Serializer::new();
//! let text = serializer.serialize(&node).unwrap();
//!
//! let back: Shared<Node> = serializer.deserialize(&text).unwrap();
//! let next = back.borrow().next.clone().unwrap();
//! assert!(std::rc::Rc::ptr_eq(&back, &next));
//! ```
//!
//! # Layout
//!
//! - [`info`]: [`TypePath`](info::TypePath), [`TypeInfo`](info::TypeInfo) and member descriptors.
//! - [`registry`]: the metadata registry, [`TypeRegistry`](registry::TypeRegistry).
//! - [`codec`]: [`Encoder`], [`Decoder`] and the [`Field`] trait.
//! - [`impls`]: `Field` implementations for std types and static info cells.
//! - [`Serializer`]: the entry point, with transport and configuration.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Derive output refers to `::rg_serial`, which must also resolve inside this crate.
extern crate self as rg_serial;

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod config;
mod error;
mod object;
mod serializer;
mod transport;

pub mod codec;
pub mod impls;
pub mod info;
pub mod registry;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use codec::{Decoder, Encoder, Field};
pub use config::SerializerConfig;
pub use error::{DecodeError, EncodeError};
pub use object::{Object, ObjectRef, Shared, Tracked, share};
pub use serializer::Serializer;
pub use transport::Transport;

pub use rg_serial_derive as derive;
pub use rg_serial_derive::{Serializable, impl_auto_register};
