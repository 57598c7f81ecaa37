use core::any::TypeId;
use std::sync::{Arc, LazyLock, PoisonError};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rg_utils::TypeIdMap;
use rg_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::info::{MemberInfo, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// TypeRegistry

/// The metadata registry: every type that may appear by name in encoded text.
///
/// Types are looked up by [`TypeId`], by full type path, and by short type
/// name when that name is unambiguous. Decoding an [`ObjectRef`] slot creates
/// the instance from the registered [`TypeInfo`] of the encoded type name.
///
/// Encoding registers every type it writes on first sight, so registration by
/// hand is only needed for types that are decoded before this process ever
/// encoded them.
///
/// # Example
///
/// ```
/// use rg_serial::Serializable;
/// use rg_serial::registry::TypeRegistry;
///
/// #[derive(Serializable, Default)]
/// #[serializable(type_path = "zoo::Dog")]
/// struct Dog {
///     name: String,
/// }
///
/// let mut registry = TypeRegistry::empty();
/// registry.register::<Dog>();
///
/// let info = registry.get_with_type_path("zoo::Dog").unwrap();
/// assert_eq!(info.type_name(), "Dog");
/// assert!(registry.get_with_type_name("Dog").is_some());
/// assert_eq!(registry.members("zoo::Dog").unwrap()[0].name(), "name");
/// ```
///
/// [`ObjectRef`]: crate::ObjectRef
pub struct TypeRegistry {
    type_info_table: TypeIdMap<&'static TypeInfo>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a empty [`TypeRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_info_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    /// Create a registry holding every type marked `#[serializable(auto_register)]`.
    ///
    /// See [`auto_register`](Self::auto_register).
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.auto_register();
        registry
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        info: &'static TypeInfo,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let type_name = info.type_name();

        // Short names may collide; a collided name is only reachable by path.
        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, info.type_id());
            }
        }

        if let Some(other) = type_path_to_id.insert(info.type_path(), info.type_id()) {
            panic!(
                "type path `{}` is used by two different types ({:?} and {:?})",
                info.type_path(),
                other,
                info.type_id(),
            );
        }
    }

    /// Registers `info` unless its type is already present.
    ///
    /// Returns `true` if the type was newly inserted.
    ///
    /// # Panics
    ///
    /// Panics if another type is registered under the same type path.
    pub fn register_info(&mut self, info: &'static TypeInfo) -> bool {
        let inserted = self.type_info_table.try_insert(info.type_id(), || info);
        if inserted {
            Self::add_new_type_indices(
                info,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            log::trace!("registered type `{}`", info.type_path());
        }
        inserted
    }

    /// Registers `T` unless it is already present.
    ///
    /// # Panics
    ///
    /// Panics if another type is registered under the type path of `T`.
    #[inline]
    pub fn register<T: Typed>(&mut self) -> bool {
        self.register_info(T::type_info())
    }

    /// Registers every non-generic type marked `#[serializable(auto_register)]`
    /// or listed with `impl_auto_register!`.
    ///
    /// Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration works on the current platform.
    ///
    /// ## Feature Dependency
    ///
    /// Requires the `auto_register` feature. When disabled, it does nothing
    /// and returns `false`.
    ///
    /// ## Platform Support
    ///
    /// Supported platforms are those of the `inventory` crate: Linux, macOS,
    /// Windows, iOS, Android and Web. Elsewhere this is a no-op.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;
            // Reduce the cost of duplicate registrations.
            if self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
                return true;
            }
            auto_register::__register_types(self);
            let available = self.contains(TypeId::of::<auto_register::__AvailFlag>());
            if !available {
                log::warn!("automatic type registration is not supported on this platform");
            }
            available
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Returns `true` if the type is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_info_table.contains(&type_id)
    }

    /// Returns `true` if a type is registered under `type_path`.
    #[inline]
    pub fn contains_type_path(&self, type_path: &str) -> bool {
        self.type_path_to_id.contains_key(type_path)
    }

    /// Returns the info of a registered type.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.type_info_table.get(&type_id).copied()
    }

    /// Returns the info of the type registered under `type_path`.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static TypeInfo> {
        self.type_path_to_id
            .get(type_path)
            .and_then(|id| self.get(*id))
    }

    /// Returns the info of the type with the short name `type_name`.
    ///
    /// Returns `None` if the name is [ambiguous](Self::is_ambiguous).
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static TypeInfo> {
        self.type_name_to_id
            .get(type_name)
            .and_then(|id| self.get(*id))
    }

    /// Returns `true` if several registered types share the short name `type_name`.
    ///
    /// # Example
    ///
    /// ```
    /// # use rg_serial::Serializable;
    /// # use rg_serial::registry::TypeRegistry;
    /// mod a {
    ///     # use rg_serial::Serializable;
    ///     #[derive(Serializable, Default)]
    ///     pub struct Config;
    /// }
    /// mod b {
    ///     # use rg_serial::Serializable;
    ///     #[derive(Serializable, Default)]
    ///     pub struct Config;
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// registry.register::<a::Config>();
    /// registry.register::<b::Config>();
    ///
    /// assert!(registry.is_ambiguous("Config"));
    /// assert!(registry.get_with_type_name("Config").is_none());
    /// ```
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// The serializable members of the type registered under `type_path`,
    /// in declaration order.
    pub fn members(&self, type_path: &str) -> Option<&'static [MemberInfo]> {
        self.get_with_type_path(type_path).map(TypeInfo::members)
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.type_info_table.len()
    }

    /// Returns `true` if nothing is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_info_table.is_empty()
    }

    /// Iterates over all registered types in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static TypeInfo> + '_ {
        self.type_info_table.values().copied()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A shareable, thread-safe handle to a [`TypeRegistry`].
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

static GLOBAL: LazyLock<TypeRegistryArc> = LazyLock::new(TypeRegistryArc::default);

impl TypeRegistryArc {
    /// Wraps an existing registry.
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// The process-wide registry used by [`Serializer::new`](crate::Serializer::new).
    ///
    /// It starts out with the automatically registered types.
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `info` if needed, taking the write lock only when it is missing.
    pub fn ensure(&self, info: &'static TypeInfo) -> bool {
        if self.read().contains(info.type_id()) {
            return false;
        }
        self.write().register_info(info)
    }

    /// See [`TypeRegistry::get_with_type_path`].
    #[inline]
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static TypeInfo> {
        self.read().get_with_type_path(type_path)
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.read().type_path_to_id.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{TypeRegistry, TypeRegistryArc};
    use crate::info::{TypeKind, TypePath, Typed};
    use core::any::TypeId;

    #[test]
    fn registers_once() {
        let mut registry = TypeRegistry::empty();
        assert!(registry.register::<alloc::vec::Vec<i32>>());
        assert!(!registry.register::<alloc::vec::Vec<i32>>());
        assert_eq!(registry.len(), 1);

        let info = registry.get(TypeId::of::<alloc::vec::Vec<i32>>()).unwrap();
        assert_eq!(info.kind(), TypeKind::List);
        assert!(info.is_instantiable());
    }

    #[test]
    fn ensure_on_shared_handle() {
        let shared = TypeRegistryArc::new(TypeRegistry::empty());
        let info = <alloc::vec::Vec<u8>>::type_info();

        assert!(shared.ensure(info));
        assert!(!shared.ensure(info));
        assert!(shared.clone().read().contains_type_path(<alloc::vec::Vec<u8>>::type_path()));
    }

    #[test]
    fn lookup_by_name() {
        let mut registry = TypeRegistry::empty();
        registry.register::<alloc::vec::Vec<i32>>();
        assert!(registry.get_with_type_name("Vec<i32>").is_some());
        assert!(registry.get_with_type_name("Vec<u8>").is_none());
        assert!(registry.members("alloc::vec::Vec<i32>").unwrap().is_empty());
    }
}
