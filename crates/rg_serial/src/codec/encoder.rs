use alloc::string::String;
use core::cell::RefCell;
use core::fmt::Display;

use rg_utils::hash::{FixedHashState, HashSet};

use super::grammar;
use super::writer::{TextWriter, TypeRef};
use super::{ReferenceTracker, Tracking, TypeInterner, TypeStack};
use crate::info::TypeInfo;
use crate::registry::TypeRegistryArc;
use crate::{EncodeError, Field, Object, ObjectRef, Shared};

/// Whether shared instances keep their identity in the output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum References {
    /// Each instance is written once; later encounters become back-references.
    #[default]
    Track,
    /// Each encounter writes a full copy. Cycles cannot be copied.
    Copy,
}

/// Writes one object graph into the text form.
///
/// An encoder holds the tables of a single serialization: the type tokens
/// assigned so far and the identity of every instance written. It is created
/// per call, so independent calls never share state.
///
/// # Examples
///
/// ```
/// use rg_serial::{Encoder, share};
/// use rg_serial::codec::References;
/// use rg_serial::registry::TypeRegistryArc;
///
/// let registry = TypeRegistryArc::default();
/// let list = share(vec![1_u8, 2]);
///
/// let mut encoder = Encoder::new(&registry, References::Track, 64);
/// encoder.encode(&vec![list.clone(), list]).unwrap();
///
/// assert_eq!(encoder.finish(), "~l2;~oalloc::vec::Vec<u8>|0|2;1;2;~r0;");
/// assert_eq!(encoder.back_references(), 1);
/// encoder.dispose();
/// ```
pub struct Encoder<'a> {
    registry: &'a TypeRegistryArc,
    references: References,
    writer: TextWriter,
    types: TypeInterner<'static>,
    tracker: ReferenceTracker,
    // Addresses on the current path while copying, to detect cycles.
    active: HashSet<usize, FixedHashState>,
    copies: usize,
    depth: usize,
    max_depth: usize,
    stack: TypeStack<'static>,
}

#[inline]
fn address_of(cell: &RefCell<dyn Object>) -> usize {
    core::ptr::from_ref(cell).cast::<()>() as usize
}

impl<'a> Encoder<'a> {
    /// Creates an encoder with empty tables.
    ///
    /// Types written are registered in `registry` on first sight.
    pub fn new(registry: &'a TypeRegistryArc, references: References, max_depth: usize) -> Self {
        Self {
            registry,
            references,
            writer: TextWriter::new(),
            types: TypeInterner::new(),
            tracker: ReferenceTracker::new(),
            active: HashSet::with_hasher(FixedHashState),
            copies: 0,
            depth: 0,
            max_depth,
            stack: TypeStack::new(),
        }
    }

    /// The reference mode of this encoder.
    #[inline]
    pub fn references(&self) -> References {
        self.references
    }

    /// Writes `root` as the root value.
    #[inline]
    pub fn encode<T: Field>(&mut self, root: &T) -> Result<(), EncodeError> {
        root.encode(self)
    }

    /// Takes the text written so far.
    #[inline]
    pub fn finish(&mut self) -> String {
        self.writer.take()
    }

    /// Number of distinct instances written in full.
    pub fn objects(&self) -> usize {
        match self.references {
            References::Track => self.tracker.len(),
            References::Copy => self.copies,
        }
    }

    /// Number of instances that were written as back-references at least once.
    #[inline]
    pub fn back_references(&self) -> usize {
        self.tracker.back_referenced_count()
    }

    /// Number of distinct types named in the output.
    #[inline]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Clears all tables and output so the encoder can start a new graph.
    pub fn reset(&mut self) {
        self.writer.clear();
        self.types.clear();
        self.tracker.clear();
        self.active.clear();
        self.copies = 0;
        self.depth = 0;
        self.stack.clear();
    }

    /// Releases all tables. Calling it again has no effect.
    pub fn dispose(&mut self) {
        self.writer = TextWriter::new();
        self.types = TypeInterner::new();
        self.tracker = ReferenceTracker::new();
        self.active = HashSet::with_hasher(FixedHashState);
        self.copies = 0;
        self.depth = 0;
        self.stack = TypeStack::new();
    }

    /// Logs `err` together with the values being written when it occurred.
    pub(crate) fn log_failure(&self, err: &EncodeError) {
        log::debug!("serialization failed: {err}, while writing {:?}", self.stack);
    }

    fn descend<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, EncodeError>,
    ) -> Result<R, EncodeError> {
        if self.depth >= self.max_depth {
            return Err(EncodeError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self)?;
        self.depth -= 1;
        Ok(result)
    }

    fn type_ref(&mut self, info: &'static TypeInfo) -> Result<TypeRef<'static>, EncodeError> {
        let type_path = info.type_path();
        if let Some(token) = self.types.token_of(type_path) {
            return Ok(TypeRef::Token(token));
        }
        if !grammar::is_valid_type_path(type_path) {
            return Err(EncodeError::InvalidTypePath { type_path });
        }
        let token = self.types.intern(type_path).token();
        self.registry.ensure(info);
        log::trace!("type `{type_path}` takes token {token}");
        Ok(TypeRef::Name(type_path))
    }

    // -------------------------------------------------------------------------
    // Values

    /// Writes a null.
    #[inline]
    pub fn write_null(&mut self) {
        self.writer.null();
    }

    /// Writes a scalar literal.
    ///
    /// The literal must not contain `;` and must not start with `~`; all
    /// numeric, time and identifier formats satisfy this.
    #[inline]
    pub fn write_scalar(&mut self, value: impl Display) {
        self.writer.scalar(value);
    }

    /// Writes a string. Any content is allowed.
    #[inline]
    pub fn write_str(&mut self, value: &str) {
        self.writer.string(value);
    }

    /// Writes a list header, then `f` must write exactly `len` values.
    pub fn write_list(
        &mut self,
        len: usize,
        f: impl FnOnce(&mut Self) -> Result<(), EncodeError>,
    ) -> Result<(), EncodeError> {
        self.writer.list_header(len);
        self.descend(f)
    }

    /// Writes a map header, then `f` must write exactly `len` key/value pairs.
    pub fn write_map(
        &mut self,
        len: usize,
        f: impl FnOnce(&mut Self) -> Result<(), EncodeError>,
    ) -> Result<(), EncodeError> {
        self.writer.map_header(len);
        self.descend(f)
    }

    /// Writes an inline record of type `type_path`, then `f` must write
    /// exactly `len` member values.
    pub fn write_value(
        &mut self,
        type_path: &'static str,
        len: usize,
        f: impl FnOnce(&mut Self) -> Result<(), EncodeError>,
    ) -> Result<(), EncodeError> {
        self.writer.value_header(len);
        self.stack.push(type_path);
        self.descend(f)?;
        self.stack.pop();
        Ok(())
    }

    /// Writes a shared instance of a known type.
    #[inline]
    pub fn write_shared<T: Object>(&mut self, value: &Shared<T>) -> Result<(), EncodeError> {
        self.write_object(&**value)
    }

    /// Writes a shared instance of any type.
    #[inline]
    pub fn write_object_ref(&mut self, value: &ObjectRef) -> Result<(), EncodeError> {
        self.write_object(&**value)
    }

    fn write_object(&mut self, cell: &RefCell<dyn Object>) -> Result<(), EncodeError> {
        let address = address_of(cell);
        let id = match self.references {
            References::Track => match self.tracker.track_if_new(address) {
                Tracking::Seen(id) => {
                    self.writer.back_reference(id);
                    return Ok(());
                }
                Tracking::New(id) => Some(id),
            },
            References::Copy => None,
        };

        let object = cell.try_borrow().map_err(|_| EncodeError::AlreadyBorrowed)?;
        let info = object.object_type_info();

        let copying = self.references == References::Copy;
        if copying {
            if !self.active.insert(address) {
                return Err(EncodeError::CyclicCopy {
                    type_path: info.type_path(),
                });
            }
            self.copies += 1;
        }

        let type_ref = self.type_ref(info)?;
        self.writer.object_header(type_ref, id, object.body_len());

        self.stack.push(info.type_path());
        self.descend(|encoder| object.encode_body(encoder))?;
        self.stack.pop();

        if copying {
            self.active.remove(&address);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Encoder, References};
    use crate::registry::{TypeRegistry, TypeRegistryArc};
    use crate::{EncodeError, share};
    use alloc::vec;
    use alloc::vec::Vec;

    fn registry() -> TypeRegistryArc {
        TypeRegistryArc::new(TypeRegistry::empty())
    }

    #[test]
    fn registers_types_on_first_sight() {
        let registry = registry();
        let mut encoder = Encoder::new(&registry, References::Track, 16);
        encoder.encode(&share(vec![true])).unwrap();

        assert_eq!(encoder.finish(), "~oalloc::vec::Vec<bool>|0|1;1;");
        assert!(registry.read().contains_type_path("alloc::vec::Vec<bool>"));
    }

    #[test]
    fn second_occurrence_of_a_type_uses_token() {
        let registry = registry();
        let mut encoder = Encoder::new(&registry, References::Track, 16);
        encoder
            .encode(&vec![share(Vec::<u8>::new()), share(Vec::<u8>::new())])
            .unwrap();

        assert_eq!(encoder.finish(), "~l2;~oalloc::vec::Vec<u8>|0|0;~o0|1|0;");
        assert_eq!(encoder.type_count(), 1);
        assert_eq!(encoder.back_references(), 0);
    }

    #[test]
    fn copy_mode_omits_ids() {
        let registry = registry();
        let shared = share(vec![7_i8]);
        let mut encoder = Encoder::new(&registry, References::Copy, 16);
        encoder.encode(&vec![shared.clone(), shared]).unwrap();

        assert_eq!(
            encoder.finish(),
            "~l2;~oalloc::vec::Vec<i8>||1;7;~o0||1;7;"
        );
        assert_eq!(encoder.objects(), 2);
    }

    #[test]
    fn depth_limit() {
        let registry = registry();
        let nested = vec![vec![vec![1_u8]]];
        let mut encoder = Encoder::new(&registry, References::Track, 2);
        assert!(matches!(
            encoder.encode(&nested),
            Err(EncodeError::DepthLimitExceeded { limit: 2 })
        ));
    }

    #[test]
    fn mutably_borrowed_instance() {
        let registry = registry();
        let shared = share(vec![1_u8]);
        let _guard = shared.borrow_mut();
        let mut encoder = Encoder::new(&registry, References::Track, 16);
        assert!(matches!(
            encoder.encode(&shared),
            Err(EncodeError::AlreadyBorrowed)
        ));
    }

    #[test]
    fn reset_and_dispose() {
        let registry = registry();
        let mut encoder = Encoder::new(&registry, References::Track, 16);
        encoder.encode(&share(vec![1_u8])).unwrap();
        encoder.reset();
        assert_eq!(encoder.objects(), 0);
        assert_eq!(encoder.finish(), "");

        encoder.encode(&share(vec![1_u8])).unwrap();
        assert_eq!(encoder.finish(), "~oalloc::vec::Vec<u8>|0|1;1;");
        encoder.dispose();
        encoder.dispose();
        assert_eq!(encoder.type_count(), 0);
    }
}
