//! Code generation.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod enumeration;
mod record;
mod type_path;
mod typed;
mod value;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::SerialDerive;

/// Expands a parsed `#[derive(Serializable)]` input.
pub(crate) fn expand(derive: &SerialDerive) -> TokenStream {
    let impls = match derive {
        SerialDerive::Record(meta, fields) => record::impl_record(meta, fields),
        SerialDerive::Value(meta, fields) => value::impl_value(meta, fields),
        SerialDerive::Enum(meta, variants) => enumeration::impl_enum(meta, variants),
    };
    let auto_register = auto_register::impl_auto_register(derive.meta_ref());

    quote! {
        #impls
        #auto_register
    }
}
