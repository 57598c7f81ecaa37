use alloc::string::{String, ToString};
use core::str::FromStr;

use super::grammar;
use super::reader::{Marker, TextReader};
use super::{ReferenceTable, TypeInterner, TypeStack};
use crate::info::Typed;
use crate::registry::TypeRegistryArc;
use crate::{DecodeError, Field, Object, ObjectRef, Shared, Tracked, share};

struct ObjectHeader<'de> {
    type_path: &'de str,
    id: Option<u32>,
    len: usize,
}

/// Reads one object graph from the text form.
///
/// A decoder holds the tables of a single deserialization: the type names
/// declared so far and every instance created, by id. Back-references resolve
/// to the very instance created for their id, so the decoded graph has the
/// same shape as the encoded one.
///
/// # Examples
///
/// ```
/// use rg_serial::{Decoder, Shared};
/// use rg_serial::registry::TypeRegistryArc;
///
/// let registry = TypeRegistryArc::default();
/// let text = "~l2;~oalloc::vec::Vec<u8>|0|2;1;2;~r0;";
///
/// let mut decoder = Decoder::new(text, &registry, 64);
/// let lists: Vec<Shared<Vec<u8>>> = decoder.decode().unwrap();
///
/// assert!(std::rc::Rc::ptr_eq(&lists[0], &lists[1]));
/// assert_eq!(*lists[0].borrow(), [1, 2]);
/// assert_eq!(decoder.objects(), 1);
/// ```
pub struct Decoder<'de> {
    registry: &'de TypeRegistryArc,
    reader: TextReader<'de>,
    types: TypeInterner<'de>,
    references: ReferenceTable,
    depth: usize,
    max_depth: usize,
    stack: TypeStack<'de>,
}

impl<'de> Decoder<'de> {
    /// Creates a decoder over `input` with empty tables.
    ///
    /// `registry` resolves the concrete types of [`ObjectRef`] slots.
    pub fn new(input: &'de str, registry: &'de TypeRegistryArc, max_depth: usize) -> Self {
        Self {
            registry,
            reader: TextReader::new(input),
            types: TypeInterner::new(),
            references: ReferenceTable::new(),
            depth: 0,
            max_depth,
            stack: TypeStack::new(),
        }
    }

    /// Reads the root value, which must span the whole input.
    pub fn decode<T: Field>(&mut self) -> Result<T, DecodeError> {
        let value = T::decode(self)?;
        self.reader.expect_end()?;
        Ok(value)
    }

    /// Number of shared instances created so far.
    #[inline]
    pub fn objects(&self) -> usize {
        self.references.len()
    }

    /// Number of distinct type names read so far.
    #[inline]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Current byte offset into the input.
    #[inline]
    pub fn offset(&self) -> usize {
        self.reader.offset()
    }

    /// Bytes left in the input.
    ///
    /// Every value takes at least one byte, so this bounds any element count
    /// worth preallocating for.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    /// Clears all tables and rewinds to the start of the input.
    pub fn reset(&mut self) {
        self.reader.rewind(0);
        self.types.clear();
        self.references.clear();
        self.depth = 0;
        self.stack.clear();
    }

    /// Releases all tables, dropping the decoder's handles to created instances.
    /// Calling it again has no effect.
    pub fn dispose(&mut self) {
        self.types = TypeInterner::new();
        self.references = ReferenceTable::new();
        self.depth = 0;
        self.stack = TypeStack::new();
    }

    /// Logs `err` together with the values being read when it occurred.
    pub(crate) fn log_failure(&self, err: &DecodeError) {
        log::debug!("deserialization failed: {err}, while reading {:?}", self.stack);
    }

    fn descend<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, DecodeError>,
    ) -> Result<R, DecodeError> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self)?;
        self.depth -= 1;
        Ok(result)
    }

    fn unexpected_at(&mut self, offset: usize, expected: &'static str) -> DecodeError {
        self.reader.rewind(offset);
        self.reader.unexpected(expected)
    }

    fn length(&mut self) -> Result<usize, DecodeError> {
        self.reader.parse_until(b';', "length")
    }

    // -------------------------------------------------------------------------
    // Values

    /// Consumes a null if one comes next.
    #[inline]
    pub fn take_null(&mut self) -> bool {
        self.reader.take_null()
    }

    /// Reads a scalar literal.
    #[inline]
    pub fn read_scalar(&mut self) -> Result<&'de str, DecodeError> {
        self.reader.scalar()
    }

    /// Reads a scalar literal and parses it; `target` names the kind in errors.
    pub fn read_parsed<T: FromStr>(&mut self, target: &'static str) -> Result<T, DecodeError> {
        let offset = self.reader.offset();
        let literal = self.reader.scalar()?;
        literal.parse().map_err(|_| DecodeError::InvalidLiteral {
            offset,
            literal: literal.to_string(),
            target,
        })
    }

    /// Reads a literal with a custom parser; `target` names the kind in errors.
    pub fn read_with<T>(
        &mut self,
        target: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, DecodeError> {
        let offset = self.reader.offset();
        let literal = self.reader.scalar()?;
        parse(literal).ok_or_else(|| DecodeError::InvalidLiteral {
            offset,
            literal: literal.to_string(),
            target,
        })
    }

    /// Reads a string.
    pub fn read_str(&mut self) -> Result<&'de str, DecodeError> {
        self.reader.expect_marker(Marker::String, "string")?;
        self.reader.string_body()
    }

    /// Reads a list header and lets `f` read that many values.
    pub fn read_list<R>(
        &mut self,
        f: impl FnOnce(&mut Self, usize) -> Result<R, DecodeError>,
    ) -> Result<R, DecodeError> {
        self.reader.expect_marker(Marker::List, "list")?;
        let len = self.length()?;
        self.descend(|decoder| f(decoder, len))
    }

    /// Reads a map header and lets `f` read that many key/value pairs.
    pub fn read_map<R>(
        &mut self,
        f: impl FnOnce(&mut Self, usize) -> Result<R, DecodeError>,
    ) -> Result<R, DecodeError> {
        self.reader.expect_marker(Marker::Map, "map")?;
        let len = self.length()?;
        self.descend(|decoder| f(decoder, len))
    }

    /// Reads an inline record of type `type_path` with `members` values, read by `f`.
    pub fn read_value<R>(
        &mut self,
        type_path: &'static str,
        members: usize,
        f: impl FnOnce(&mut Self) -> Result<R, DecodeError>,
    ) -> Result<R, DecodeError> {
        self.reader.expect_marker(Marker::Value, "inline value")?;
        let len = self.length()?;
        self.expect_members(type_path, members, len)?;
        self.stack.push(type_path);
        let value = self.descend(f)?;
        self.stack.pop();
        Ok(value)
    }

    /// Fails with [`DecodeError::MemberCountMismatch`] unless `found == expected`.
    pub fn expect_members(
        &self,
        type_path: &str,
        expected: usize,
        found: usize,
    ) -> Result<(), DecodeError> {
        if expected != found {
            return Err(DecodeError::MemberCountMismatch {
                type_path: type_path.to_string(),
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Reads a shared instance of a known type, or a back-reference to one.
    pub fn read_shared<T: Object + Typed + Default>(&mut self) -> Result<Shared<T>, DecodeError> {
        let start = self.reader.offset();
        match self.reader.marker("object or back-reference")? {
            Marker::BackReference => {
                let tracked = self.back_reference()?;
                tracked
                    .downcast::<T>()
                    .ok_or_else(|| DecodeError::TypeMismatch {
                        expected: T::type_path().to_string(),
                        found: tracked.type_path().to_string(),
                    })
            }
            Marker::Object => {
                let header = self.object_header()?;
                if header.type_path != T::type_path() {
                    return Err(DecodeError::TypeMismatch {
                        expected: T::type_path().to_string(),
                        found: header.type_path.to_string(),
                    });
                }
                let shared = share(T::default());
                self.populate(header, Tracked::new(&shared))?;
                Ok(shared)
            }
            _ => Err(self.unexpected_at(start, "object or back-reference")),
        }
    }

    /// Reads a shared instance of any registered type, or a back-reference to one.
    pub fn read_object_ref(&mut self) -> Result<ObjectRef, DecodeError> {
        let start = self.reader.offset();
        match self.reader.marker("object or back-reference")? {
            Marker::BackReference => Ok(self.back_reference()?.object().clone()),
            Marker::Object => {
                let header = self.object_header()?;
                let info = self
                    .registry
                    .get_with_type_path(header.type_path)
                    .ok_or_else(|| DecodeError::UnknownType {
                        type_path: header.type_path.to_string(),
                    })?;
                let tracked = info
                    .instantiate()
                    .ok_or_else(|| DecodeError::TypeMismatch {
                        expected: String::from("a shared type"),
                        found: header.type_path.to_string(),
                    })?;
                let tracked = self.populate(header, tracked)?;
                Ok(tracked.object().clone())
            }
            _ => Err(self.unexpected_at(start, "object or back-reference")),
        }
    }

    fn back_reference(&mut self) -> Result<Tracked, DecodeError> {
        let id: u32 = self.reader.parse_until(b';', "reference id")?;
        self.references.resolve(id).cloned()
    }

    fn object_header(&mut self) -> Result<ObjectHeader<'de>, DecodeError> {
        let offset = self.reader.offset();
        let type_ref = self.reader.until(b'|')?;
        let type_path = if grammar::is_token(type_ref) {
            let token: u32 = type_ref.parse().map_err(|_| DecodeError::InvalidLiteral {
                offset,
                literal: type_ref.to_string(),
                target: "type token",
            })?;
            self.types
                .resolve(token)
                .ok_or(DecodeError::UnknownTypeToken { token })?
        } else if type_ref.is_empty() {
            return Err(self.unexpected_at(offset, "type name"));
        } else {
            self.types.declare(type_ref);
            type_ref
        };

        let offset = self.reader.offset();
        let id = self.reader.until(b'|')?;
        let id = match id {
            "" => None,
            id => Some(id.parse().map_err(|_| DecodeError::InvalidLiteral {
                offset,
                literal: id.to_string(),
                target: "object id",
            })?),
        };

        let len = self.length()?;
        Ok(ObjectHeader { type_path, id, len })
    }

    // The instance is registered before its body is read, so members that
    // refer back to it resolve to it.
    fn populate(
        &mut self,
        header: ObjectHeader<'de>,
        tracked: Tracked,
    ) -> Result<Tracked, DecodeError> {
        if let Some(id) = header.id {
            self.references.register(id, tracked.clone())?;
        }
        self.stack.push(header.type_path);
        let object = tracked.object();
        self.descend(|decoder| object.borrow_mut().decode_body(header.len, decoder))?;
        self.stack.pop();
        Ok(tracked)
    }
}

#[cfg(test)]
mod tests {
    use super::Decoder;
    use crate::registry::{TypeRegistry, TypeRegistryArc};
    use crate::{DecodeError, ObjectRef, Shared};
    use alloc::rc::Rc;
    use alloc::vec::Vec;

    fn registry() -> TypeRegistryArc {
        TypeRegistryArc::new(TypeRegistry::empty())
    }

    #[test]
    fn tokens_resolve_to_declared_names() {
        let registry = registry();
        let mut decoder = Decoder::new("~l2;~oalloc::vec::Vec<u8>|0|0;~o0|1|1;9;", &registry, 8);
        let lists: Vec<Shared<Vec<u8>>> = decoder.decode().unwrap();

        assert!(!Rc::ptr_eq(&lists[0], &lists[1]));
        assert_eq!(*lists[1].borrow(), [9]);
        assert_eq!(decoder.type_count(), 1);
    }

    #[test]
    fn unknown_token() {
        let registry = registry();
        let mut decoder = Decoder::new("~o3|0|0;", &registry, 8);
        assert!(matches!(
            decoder.decode::<Shared<Vec<u8>>>(),
            Err(DecodeError::UnknownTypeToken { token: 3 })
        ));
    }

    #[test]
    fn forward_reference() {
        let registry = registry();
        let mut decoder = Decoder::new("~r0;", &registry, 8);
        assert!(matches!(
            decoder.decode::<Shared<Vec<u8>>>(),
            Err(DecodeError::UnresolvedReference { id: 0 })
        ));
    }

    #[test]
    fn type_mismatch_on_known_type() {
        let registry = registry();
        let mut decoder = Decoder::new("~oalloc::vec::Vec<u8>|0|0;", &registry, 8);
        assert!(matches!(
            decoder.decode::<Shared<Vec<i8>>>(),
            Err(DecodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn object_ref_requires_registration() {
        let text = "~oalloc::vec::Vec<u8>|0|1;5;";

        let registry = registry();
        let mut decoder = Decoder::new(text, &registry, 8);
        assert!(matches!(
            decoder.decode::<ObjectRef>(),
            Err(DecodeError::UnknownType { .. })
        ));

        registry.write().register::<Vec<u8>>();
        let mut decoder = Decoder::new(text, &registry, 8);
        let object = decoder.decode::<ObjectRef>().unwrap();
        assert_eq!(
            object.borrow().downcast_ref::<Vec<u8>>().map(Vec::as_slice),
            Some(&[5_u8][..])
        );
    }

    #[test]
    fn empty_input_is_structural_error() {
        let registry = registry();
        let mut decoder = Decoder::new("", &registry, 8);
        assert!(matches!(
            decoder.decode::<Shared<Vec<u8>>>(),
            Err(DecodeError::UnexpectedEnd { offset: 0 })
        ));
    }

    #[test]
    fn depth_limit() {
        let registry = registry();
        let mut decoder = Decoder::new("~l1;~l1;~l1;~l0;", &registry, 3);
        assert!(matches!(
            decoder.decode::<Vec<Vec<Vec<Vec<u8>>>>>(),
            Err(DecodeError::DepthLimitExceeded { limit: 3 })
        ));
    }

    #[test]
    fn reset_rewinds() {
        let registry = registry();
        let mut decoder = Decoder::new("~oalloc::vec::Vec<u8>|0|0;", &registry, 8);
        let first: Shared<Vec<u8>> = decoder.decode().unwrap();
        decoder.reset();
        let second: Shared<Vec<u8>> = decoder.decode().unwrap();
        assert!(!Rc::ptr_eq(&first, &second));
        decoder.dispose();
        decoder.dispose();
        assert_eq!(decoder.objects(), 0);
    }
}
