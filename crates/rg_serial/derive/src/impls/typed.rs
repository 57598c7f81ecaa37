use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::SerialMeta;

/// Generate implementation codes for `Typed`
///
/// `info` is an expression building the `TypeInfo`; it runs once per type.
pub(crate) fn impl_typed(meta: &SerialMeta, info: TokenStream, extra: &[TokenStream]) -> TokenStream {
    let rg_serial_path = meta.rg_serial_path();
    let typed_ = crate::path::typed_(rg_serial_path);
    let type_info_ = crate::path::type_info_(rg_serial_path);
    let field_ = crate::path::field_(rg_serial_path);

    let body = if meta.is_generic() {
        let cell_ = crate::path::generic_type_info_cell_(rg_serial_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| #info)
        }
    } else {
        let cell_ = crate::path::non_generic_type_info_cell_(rg_serial_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| #info)
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();
    let where_clause = meta.where_clause(&field_, extra);

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #body
            }
        }
    }
}

/// The member list passed to `TypeInfo::record` and `TypeInfo::value`.
pub(crate) fn member_list(members: Vec<TokenStream>) -> TokenStream {
    if members.is_empty() {
        quote! { ::core::iter::empty() }
    } else {
        quote! { [#(#members),*] }
    }
}
