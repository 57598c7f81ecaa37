use alloc::string::String;

use crate::codec::References;
use crate::registry::TypeRegistryArc;
use crate::{DecodeError, Decoder, EncodeError, Encoder, Field, SerializerConfig, Transport};

/// Converts object graphs to transportable text and back.
///
/// A `Serializer` holds only its configuration and a registry handle. The
/// tables of a call live in the [`Encoder`] or [`Decoder`] created for that
/// call and are disposed before it returns, so one serializer can be cloned
/// and used from any number of threads.
///
/// Encoding and decoding recurse once per nesting level and stop at
/// [`SerializerConfig::max_depth`]. With the default configuration a chain of
/// more than 512 linked objects is rejected; use
/// [`SerializerConfig::with_max_depth`] for longer chains.
///
/// # Examples
///
/// ```
/// use rg_serial::{Serializable, Serializer, Shared, share};
///
/// #[derive(Serializable, Default)]
/// struct Person {
///     name: String,
///     friend: Option<Shared<Person>>,
/// }
///
/// let alice = share(Person { name: "Alice".into(), friend: None });
/// let bob = share(Person { name: "Bob".into(), friend: Some(alice.clone()) });
/// alice.borrow_mut().friend = Some(bob.clone());
///
/// let serializer = Serializer::new();
///
/// // References kept: the cycle survives.
/// let text = serializer.serialize(&bob).unwrap();
/// let bob2: Shared<Person> = serializer.deserialize(&text).unwrap();
/// let alice2 = bob2.borrow().friend.clone().unwrap();
/// let back = alice2.borrow().friend.clone().unwrap();
/// assert!(std::rc::Rc::ptr_eq(&bob2, &back));
///
/// // Copies cannot represent the cycle.
/// assert!(serializer.serialize_copy(&bob).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Serializer {
    config: SerializerConfig,
    registry: TypeRegistryArc,
}

impl Default for Serializer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer {
    /// Creates a serializer with the default configuration and the global registry.
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    /// Creates a serializer with `config` and the global registry.
    pub fn with_config(config: SerializerConfig) -> Self {
        Self {
            config,
            registry: TypeRegistryArc::global(),
        }
    }

    /// Replaces the registry used to look up types by name.
    pub fn with_registry(mut self, registry: TypeRegistryArc) -> Self {
        self.registry = registry;
        self
    }

    /// The configuration of this serializer.
    #[inline]
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// The registry of this serializer.
    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    /// Serializes `root`, preserving shared references and cycles.
    #[inline]
    pub fn serialize<T: Field>(&self, root: &T) -> Result<String, EncodeError> {
        self.serialize_with(root, self.config.transport)
    }

    /// Serializes `root` with an explicit transport.
    pub fn serialize_with<T: Field>(
        &self,
        root: &T,
        transport: Transport,
    ) -> Result<String, EncodeError> {
        self.encode(root, References::Track, transport)
    }

    /// Serializes `root` as a tree: every occurrence of a shared instance is
    /// written as an independent copy.
    ///
    /// Fails with [`EncodeError::CyclicCopy`] if the graph has a cycle.
    #[inline]
    pub fn serialize_copy<T: Field>(&self, root: &T) -> Result<String, EncodeError> {
        self.serialize_copy_with(root, self.config.transport)
    }

    /// Serializes `root` as a tree with an explicit transport.
    pub fn serialize_copy_with<T: Field>(
        &self,
        root: &T,
        transport: Transport,
    ) -> Result<String, EncodeError> {
        self.encode(root, References::Copy, transport)
    }

    /// Deserializes text produced by [`serialize`](Self::serialize) or
    /// [`serialize_copy`](Self::serialize_copy).
    #[inline]
    pub fn deserialize<T: Field>(&self, data: &str) -> Result<T, DecodeError> {
        self.deserialize_with(data, self.config.transport)
    }

    /// Deserializes with an explicit transport.
    pub fn deserialize_with<T: Field>(
        &self,
        data: &str,
        transport: Transport,
    ) -> Result<T, DecodeError> {
        let text = transport.decode(data).inspect_err(|err| {
            log::debug!("deserialization failed: {err}");
        })?;

        log::debug!(
            "deserializing `{}` from {} bytes ({transport:?})",
            T::type_path(),
            text.len(),
        );

        let mut decoder = Decoder::new(&text, &self.registry, self.config.max_depth);
        let result = decoder.decode::<T>();
        match &result {
            Ok(_) => log::debug!(
                "deserialized {} objects of {} types",
                decoder.objects(),
                decoder.type_count(),
            ),
            Err(err) => decoder.log_failure(err),
        }
        decoder.dispose();
        result
    }

    fn encode<T: Field>(
        &self,
        root: &T,
        references: References,
        transport: Transport,
    ) -> Result<String, EncodeError> {
        log::debug!(
            "serializing `{}` ({references:?}, {transport:?})",
            T::type_path(),
        );

        let mut encoder = Encoder::new(&self.registry, references, self.config.max_depth);
        let result = encoder.encode(root).map(|()| encoder.finish());
        match &result {
            Ok(text) => log::debug!(
                "serialized {} objects of {} types into {} bytes, {} back-referenced",
                encoder.objects(),
                encoder.type_count(),
                text.len(),
                encoder.back_references(),
            ),
            Err(err) => encoder.log_failure(err),
        }
        encoder.dispose();
        result.map(|text| transport.encode(text))
    }
}
