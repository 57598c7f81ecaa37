use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::SerialMeta;

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_type_path(meta: &SerialMeta) -> TokenStream {
    let type_path_ = crate::path::type_path_(meta.rg_serial_path());

    let ident = meta.ident();
    let type_path = meta.type_path_body();
    let type_name = meta.type_name_body();
    let type_ident = meta.type_ident();
    let module_path = meta.module_path();
    let option = crate::path::fp::option();

    let inline_flag = if meta.is_generic() {
        quote! {}
    } else {
        quote! { #[inline] }
    };

    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();
    let where_clause = meta.where_clause(&type_path_, &[]);

    quote! {
        impl #impl_generics #type_path_ for #ident #ty_generics #where_clause {
            #inline_flag
            fn type_path() -> &'static str {
                #type_path
            }

            #inline_flag
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #type_ident
            }

            #[inline]
            fn module_path() -> #option<&'static str> {
                #module_path
            }
        }
    }
}
