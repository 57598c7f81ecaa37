use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::derive_data::{SerialField, SerialMeta, active_fields};
use crate::path::fp;

/// Generate `TypePath`, `Typed` and `Field` for a struct copied by value.
pub(crate) fn impl_value(meta: &SerialMeta, fields: &[SerialField]) -> TokenStream {
    let rg_serial_path = meta.rg_serial_path();
    let type_info_ = crate::path::type_info_(rg_serial_path);

    let members = active_fields(fields)
        .map(|field| field.to_info_tokens(rg_serial_path))
        .collect();
    let members = super::typed::member_list(members);

    let type_path_impl = super::type_path::impl_type_path(meta);
    let typed_impl = super::typed::impl_typed(
        meta,
        quote! { #type_info_::value::<Self>(#members) },
        &[],
    );
    let field_impl = impl_field(meta, fields);

    quote! {
        #type_path_impl
        #typed_impl
        #field_impl
    }
}

fn impl_field(meta: &SerialMeta, fields: &[SerialField]) -> TokenStream {
    let rg_serial_path = meta.rg_serial_path();
    let field_ = crate::path::field_(rg_serial_path);
    let field_kind_ = crate::path::field_kind_(rg_serial_path);
    let type_path_ = crate::path::type_path_(rg_serial_path);
    let encoder_ = crate::path::encoder_(rg_serial_path);
    let decoder_ = crate::path::decoder_(rg_serial_path);
    let encode_error_ = crate::path::encode_error_(rg_serial_path);
    let decode_error_ = crate::path::decode_error_(rg_serial_path);
    let result = fp::result();
    let default = fp::default();

    let active: Vec<&SerialField> = active_fields(fields).collect();
    let len = active.len();
    let idents = active.iter().map(|field| field.ident);
    let tys = active.iter().map(|field| field.ty);
    let decode_idents = idents.clone();
    let decode_tys = tys.clone();

    let (encoder, decoder, this) = if active.is_empty() {
        (format_ident!("_encoder"), format_ident!("_decoder"), quote!(this))
    } else {
        (format_ident!("encoder"), format_ident!("decoder"), quote!(mut this))
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();
    let where_clause = meta.where_clause(&field_, &[quote! { Self: #default }]);

    quote! {
        impl #impl_generics #field_ for #ident #ty_generics #where_clause {
            #[inline]
            fn kind() -> #field_kind_ {
                #field_kind_::Value
            }

            fn encode(&self, encoder: &mut #encoder_<'_>) -> #result<(), #encode_error_> {
                encoder.write_value(<Self as #type_path_>::type_path(), #len, |#encoder| {
                    #( <#tys as #field_>::encode(&self.#idents, #encoder)?; )*
                    #result::Ok(())
                })
            }

            fn decode(decoder: &mut #decoder_<'_>) -> #result<Self, #decode_error_> {
                decoder.read_value(<Self as #type_path_>::type_path(), #len, |#decoder| {
                    let #this = <Self as #default>::default();
                    #( this.#decode_idents = <#decode_tys as #field_>::decode(#decoder)?; )*
                    #result::Ok(this)
                })
            }
        }
    }
}
