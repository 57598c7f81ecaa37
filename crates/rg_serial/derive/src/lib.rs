//! See following macros:
//!
//! - [`Serializable`]
//! - [`impl_auto_register`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static SERIALIZABLE_ATTRIBUTE_NAME: &str = "serializable";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Serializable Derivation
///
/// `#[derive(Serializable)]` makes a type usable in an object graph.
/// What is generated depends on the shape of the type:
///
/// | Shape | Generated | Used as a member through |
/// |-------|-----------|--------------------------|
/// | `struct T { .. }`, `struct T;` | `TypePath`, `Typed`, `Object` | `Shared<T>` or `ObjectRef` |
/// | `#[serializable(value)] struct T { .. }` | `TypePath`, `Typed`, `Field` | `T` |
/// | `enum T { A, B = 5 }` | `TypePath`, `Typed`, `Field` | `T` |
///
/// Structs must implement `Default`: decoding starts from a default instance
/// and assigns the members in declaration order. A shared record is created
/// and tracked before its members are read, so members may refer back to it.
///
/// Tuple structs, enumerations with fields, unions and types with lifetime
/// parameters are rejected.
///
/// ## Type Path
///
/// The type path is written into encoded text and used to find the type when
/// decoding. It defaults to `module_path!()` plus the type name, and can be
/// fixed so it survives moving the definition:
///
/// ```rust, ignore
/// #[derive(Serializable, Default)]
/// #[serializable(type_path = "zoo::Cat")]
/// struct Cat { name: String }
/// ```
///
/// Generic parameters are appended automatically, e.g. `zoo::Cage<zoo::Cat>`.
///
/// ## Ignored Fields
///
/// Fields marked `ignore` are neither written nor read; they keep their
/// default value after decoding.
///
/// ```rust, ignore
/// #[derive(Serializable, Default)]
/// struct Cache {
///     key: String,
///     #[serializable(ignore)]
///     hits: u64,
/// }
/// ```
///
/// ## Value Types
///
/// `value` structs have no identity: every occurrence is written inline and
/// decoded into a fresh copy.
///
/// ```rust, ignore
/// #[derive(Serializable, Default, Clone, Copy)]
/// #[serializable(value)]
/// struct Point { x: i32, y: i32 }
/// ```
///
/// ## Automatic Registration
///
/// Types only reachable through `ObjectRef` must be registered before they can
/// be decoded. With the `auto_register` feature, `auto_register` submits the
/// type to the global registry at startup.
///
/// ```rust, ignore
/// #[derive(Serializable, Default)]
/// #[serializable(auto_register)]
/// struct Dog { name: String }
/// ```
///
/// Generic types cannot be registered this way, see [`impl_auto_register`].
#[proc_macro_derive(Serializable, attributes(serializable))]
pub fn derive_serializable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::SerialDerive::from_input(&ast) {
        Ok(derive) => impls::expand(&derive).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Registers a concrete type with the global registry at startup.
///
/// The type must implement `Typed`; generic types need one invocation per
/// instantiation.
///
/// ```rust, ignore
/// impl_auto_register!(zoo::Cage<zoo::Cat>);
/// impl_auto_register!(Vec<u32>);
/// ```
///
/// Without the `auto_register` feature this expands to nothing.
#[proc_macro]
pub fn impl_auto_register(_input: TokenStream) -> TokenStream {
    #[cfg(not(feature = "auto_register"))]
    return TokenStream::new();

    #[cfg(feature = "auto_register")]
    {
        use quote::quote;

        let ty = parse_macro_input!(_input as syn::Type);

        let rg_serial_path = path::rg_serial();
        let auto_register_ = path::auto_register_(&rg_serial_path);

        TokenStream::from(quote! {
            const _: () = {
                #auto_register_::inventory::submit!{
                    #auto_register_::__AutoRegisterFunc(
                        <#ty as #auto_register_::__RegisterType>::__register
                    )
                }
            };
        })
    }
}
