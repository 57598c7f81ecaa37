// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// The type path is the name a type is written under in encoded text and the
/// key it is looked up by when decoding, so it must be unique and stable.
/// Unlike [`core::any::type_name`] it does not change between compiler versions.
///
/// # Methods
///
/// - [`type_path`]: The unique identifier of the type, cannot be duplicated.
/// - [`type_name`]: Type name without module path, may be duplicated.
/// - [`type_ident`]: The shortest type name without module path and generics.
/// - [`module_path`]: Optional module path.
///
/// These names never start with `::`.
///
/// # Implementation
///
/// [`#[derive(Serializable)]`](crate::derive::Serializable) implements this trait.
/// The default path is `module_path!()` plus the type name, and can be fixed with
/// `#[serializable(type_path = "...")]` so it survives moving the definition.
///
/// ```
/// use rg_serial::Serializable;
/// use rg_serial::info::TypePath;
///
/// #[derive(Serializable, Default)]
/// #[serializable(type_path = "shapes::Circle")]
/// struct Circle {
///     radius: f64,
/// }
///
/// assert_eq!(Circle::type_path(), "shapes::Circle");
/// assert_eq!(Circle::type_name(), "Circle");
/// assert_eq!(Circle::module_path(), Some("shapes"));
/// ```
///
/// For manual implementations of generic types, see
/// [`GenericTypePathCell`](crate::impls::GenericTypePathCell).
///
/// [`type_path`]: TypePath::type_path
/// [`type_name`]: TypePath::type_name
/// [`type_ident`]: TypePath::type_ident
/// [`module_path`]: TypePath::module_path
pub trait TypePath: 'static {
    /// Returns the fully qualified path with generics of the target type.
    ///
    /// For `Option<Vec<usize>>`, this is `"core::option::Option<alloc::vec::Vec<usize>>"`.
    fn type_path() -> &'static str;

    /// Returns a short, pretty-print enabled path to the type.
    ///
    /// For `Option<Vec<usize>>`, this is `"Option<Vec<usize>>"`.
    fn type_name() -> &'static str;

    /// Returns the short name of the type, without generics.
    ///
    /// For `Option<Vec<usize>>`, this is `"Option"`.
    fn type_ident() -> &'static str;

    /// Optional module path where the type is defined.
    ///
    /// Primitive built-in types return `None`.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Provide dynamic dispatch for types that implement [`TypePath`].
///
/// # Examples
///
/// ```
/// use rg_serial::info::DynamicTypePath;
///
/// let x = String::new();
/// assert_eq!(x.dyn_type_path(), "alloc::string::String");
/// assert_eq!(x.dyn_type_name(), "String");
/// ```
pub trait DynamicTypePath {
    /// See [`TypePath::type_path`].
    fn dyn_type_path(&self) -> &'static str;

    /// See [`TypePath::type_name`].
    fn dyn_type_name(&self) -> &'static str;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn dyn_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn dyn_type_name(&self) -> &'static str {
        Self::type_name()
    }
}
