use proc_macro2::TokenStream;

use crate::derive_data::SerialMeta;

/// Generate the `inventory` submission for `#[serializable(auto_register)]`.
#[cfg(feature = "auto_register")]
pub(crate) fn impl_auto_register(meta: &SerialMeta) -> TokenStream {
    use quote::quote_spanned;

    let Some(span) = meta.attrs().auto_register else {
        return TokenStream::new();
    };

    let auto_register_ = crate::path::auto_register_(meta.rg_serial_path());
    let ident = meta.ident();

    quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                <#ident as #auto_register_::__RegisterType>::__register
            )
        }
    }
}

/// Generate the `inventory` submission for `#[serializable(auto_register)]`.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn impl_auto_register(_: &SerialMeta) -> TokenStream {
    TokenStream::new()
}
