use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, LitStr};

use crate::derive_data::SerialMeta;
use crate::path::fp;

/// Generate `TypePath`, `Typed` and `Field` for a fieldless enumeration.
///
/// Variants are written as their discriminant, cast to `i64`.
pub(crate) fn impl_enum(meta: &SerialMeta, variants: &[&Ident]) -> TokenStream {
    let rg_serial_path = meta.rg_serial_path();
    let type_info_ = crate::path::type_info_(rg_serial_path);
    let variant_info_ = crate::path::variant_info_(rg_serial_path);

    let infos = variants.iter().map(|variant| {
        let name = LitStr::new(&variant.to_string(), variant.span());
        quote! { #variant_info_::new(#name, Self::#variant as i64) }
    });

    let type_path_impl = super::type_path::impl_type_path(meta);
    let typed_impl = super::typed::impl_typed(
        meta,
        quote! { #type_info_::enumeration::<Self>([#(#infos),*]) },
        &[],
    );
    let field_impl = impl_field(meta, variants);

    quote! {
        #type_path_impl
        #typed_impl
        #field_impl
    }
}

fn impl_field(meta: &SerialMeta, variants: &[&Ident]) -> TokenStream {
    let rg_serial_path = meta.rg_serial_path();
    let field_ = crate::path::field_(rg_serial_path);
    let field_kind_ = crate::path::field_kind_(rg_serial_path);
    let type_path_ = crate::path::type_path_(rg_serial_path);
    let encoder_ = crate::path::encoder_(rg_serial_path);
    let decoder_ = crate::path::decoder_(rg_serial_path);
    let encode_error_ = crate::path::encode_error_(rg_serial_path);
    let decode_error_ = crate::path::decode_error_(rg_serial_path);
    let result = fp::result();

    let encode_arms = variants.iter().map(|variant| {
        quote! { Self::#variant => Self::#variant as i64, }
    });
    let decode_arms = variants.iter().map(|variant| {
        quote! {
            if value == Self::#variant as i64 {
                return #result::Ok(Self::#variant);
            }
        }
    });

    let ident = meta.ident();

    quote! {
        impl #field_ for #ident {
            #[inline]
            fn kind() -> #field_kind_ {
                #field_kind_::Enum
            }

            fn encode(&self, encoder: &mut #encoder_<'_>) -> #result<(), #encode_error_> {
                let discriminant: i64 = match self {
                    #(#encode_arms)*
                };
                encoder.write_scalar(discriminant);
                #result::Ok(())
            }

            fn decode(decoder: &mut #decoder_<'_>) -> #result<Self, #decode_error_> {
                let value: i64 = decoder.read_parsed("integer")?;
                #(#decode_arms)*
                #result::Err(#decode_error_::UnknownVariant {
                    type_path: <Self as #type_path_>::type_path(),
                    value,
                })
            }
        }
    }
}
