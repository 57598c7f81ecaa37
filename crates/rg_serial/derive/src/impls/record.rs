use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::derive_data::{SerialField, SerialMeta, active_fields};
use crate::path::fp;

/// Generate `TypePath`, `Typed` and `Object` for a struct with identity.
pub(crate) fn impl_record(meta: &SerialMeta, fields: &[SerialField]) -> TokenStream {
    let rg_serial_path = meta.rg_serial_path();
    let type_info_ = crate::path::type_info_(rg_serial_path);
    let default = fp::default();

    let members = active_fields(fields)
        .map(|field| field.to_info_tokens(rg_serial_path))
        .collect();
    let members = super::typed::member_list(members);

    let type_path_impl = super::type_path::impl_type_path(meta);
    let typed_impl = super::typed::impl_typed(
        meta,
        quote! { #type_info_::record::<Self>(#members) },
        &[quote! { Self: #default }],
    );
    let object_impl = impl_object(meta, fields);

    quote! {
        #type_path_impl
        #typed_impl
        #object_impl
    }
}

fn impl_object(meta: &SerialMeta, fields: &[SerialField]) -> TokenStream {
    let rg_serial_path = meta.rg_serial_path();
    let object_ = crate::path::object_(rg_serial_path);
    let field_ = crate::path::field_(rg_serial_path);
    let typed_ = crate::path::typed_(rg_serial_path);
    let type_path_ = crate::path::type_path_(rg_serial_path);
    let type_info_ = crate::path::type_info_(rg_serial_path);
    let encoder_ = crate::path::encoder_(rg_serial_path);
    let decoder_ = crate::path::decoder_(rg_serial_path);
    let encode_error_ = crate::path::encode_error_(rg_serial_path);
    let decode_error_ = crate::path::decode_error_(rg_serial_path);
    let result = fp::result();
    let default = fp::default();
    let any = fp::any();

    let active: Vec<&SerialField> = active_fields(fields).collect();
    let len = active.len();
    let idents = active.iter().map(|field| field.ident);
    let tys = active.iter().map(|field| field.ty);
    let decode_idents = idents.clone();
    let decode_tys = tys.clone();

    let encoder = if active.is_empty() {
        format_ident!("_encoder")
    } else {
        format_ident!("encoder")
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();
    let where_clause = meta.where_clause(&field_, &[quote! { Self: #default }]);

    quote! {
        impl #impl_generics #object_ for #ident #ty_generics #where_clause {
            #[inline]
            fn object_type_info(&self) -> &'static #type_info_ {
                <Self as #typed_>::type_info()
            }

            #[inline]
            fn body_len(&self) -> usize {
                #len
            }

            fn encode_body(
                &self,
                #encoder: &mut #encoder_<'_>,
            ) -> #result<(), #encode_error_> {
                #( <#tys as #field_>::encode(&self.#idents, #encoder)?; )*
                #result::Ok(())
            }

            fn decode_body(
                &mut self,
                len: usize,
                decoder: &mut #decoder_<'_>,
            ) -> #result<(), #decode_error_> {
                decoder.expect_members(<Self as #type_path_>::type_path(), #len, len)?;
                #( self.#decode_idents = <#decode_tys as #field_>::decode(decoder)?; )*
                #result::Ok(())
            }

            #[inline]
            fn as_any(&self) -> &dyn #any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn #any {
                self
            }
        }
    }
}
