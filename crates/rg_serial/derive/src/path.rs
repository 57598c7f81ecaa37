//! Paths into `rg_serial` used by the generated code.
//!
//! Keeping them in one place limits the changes needed when the runtime
//! crate is reorganized.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `rg_serial` crate.
///
/// 1. For crates that depend on `rg_serial`, `::rg_serial` is returned.
/// 2. For crates that depend on `refgraph`, `::refgraph::serial` is returned.
/// 3. Otherwise `::rg_serial` is returned, which `rg_serial` itself resolves
///    through `extern crate self as rg_serial`.
///
/// This reads the caller's `Cargo.toml`, so it is resolved once per
/// expansion and passed along.
pub(crate) fn rg_serial() -> syn::Path {
    rg_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("rg_serial"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn type_path_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::info::TypePath }
}

#[inline(always)]
pub(crate) fn typed_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::info::Typed }
}

#[inline(always)]
pub(crate) fn type_info_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::info::TypeInfo }
}

#[inline(always)]
pub(crate) fn member_info_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::info::MemberInfo }
}

#[inline(always)]
pub(crate) fn variant_info_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::info::VariantInfo }
}

#[inline(always)]
pub(crate) fn field_kind_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::info::FieldKind }
}

#[inline(always)]
pub(crate) fn field_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::Field }
}

#[inline(always)]
pub(crate) fn object_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::Object }
}

#[inline(always)]
pub(crate) fn encoder_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::Encoder }
}

#[inline(always)]
pub(crate) fn decoder_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::Decoder }
}

#[inline(always)]
pub(crate) fn encode_error_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::EncodeError }
}

#[inline(always)]
pub(crate) fn decode_error_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::DecodeError }
}

// -----------------------------------------------------------------------------
// Cells

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::impls::NonGenericTypeInfoCell }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::impls::GenericTypeInfoCell }
}

#[inline(always)]
pub(crate) fn generic_type_path_cell_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::impls::GenericTypePathCell }
}

#[inline(always)]
pub(crate) fn concat_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::impls::concat }
}

// -----------------------------------------------------------------------------
// Macro Exports

#[inline(always)]
pub(crate) fn to_string_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::__macro_exports::ToString }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(rg_serial_path: &syn::Path) -> TokenStream {
    quote! { #rg_serial_path::__macro_exports::auto_register }
}

// -----------------------------------------------------------------------------
// Core

/// Fully qualified paths into `core`, so the expansion does not depend on
/// the prelude of the caller.
pub(crate) mod fp {
    use proc_macro2::TokenStream;
    use quote::quote;

    pub(crate) fn result() -> TokenStream {
        quote! { ::core::result::Result }
    }

    pub(crate) fn option() -> TokenStream {
        quote! { ::core::option::Option }
    }

    pub(crate) fn default() -> TokenStream {
        quote! { ::core::default::Default }
    }

    pub(crate) fn any() -> TokenStream {
        quote! { ::core::any::Any }
    }
}
