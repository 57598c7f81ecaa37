use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, LitStr, Path, WherePredicate, parse_quote};

use super::TypeAttributes;

/// Everything about the deriving type that is shared by all generated impls.
pub(crate) struct SerialMeta<'a> {
    rg_serial_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl<'a> SerialMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            rg_serial_path: crate::path::rg_serial(),
            attrs,
            ident,
            generics,
        }
    }

    #[inline]
    pub fn rg_serial_path(&self) -> &Path {
        &self.rg_serial_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub fn generics(&self) -> &'a Generics {
        self.generics
    }

    /// Whether the impls need generic cells instead of plain statics.
    pub fn is_generic(&self) -> bool {
        self.generics
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)))
    }

    /// The where clause of an impl: the type's own predicates, `bound` on every
    /// type parameter, then `extra`.
    pub fn where_clause(&self, bound: &TokenStream, extra: &[TokenStream]) -> TokenStream {
        let mut generics = self.generics.clone();
        let clause = generics.make_where_clause();

        for param in self.generics.type_params() {
            let ident = &param.ident;
            let predicate: WherePredicate = parse_quote!(#ident: #bound);
            clause.predicates.push(predicate);
        }
        for predicate in extra {
            let predicate: WherePredicate = parse_quote!(#predicate);
            clause.predicates.push(predicate);
        }

        clause.to_token_stream()
    }

    // -------------------------------------------------------------------------
    // Names

    /// The custom path split at its last `::`.
    fn custom_parts(&self) -> Option<(Option<String>, String)> {
        let path = self.attrs.type_path.as_ref()?.value();
        Some(match path.rsplit_once("::") {
            Some((module, name)) => (Some(module.to_owned()), name.to_owned()),
            None => (None, path),
        })
    }

    /// The type ident as written in the type path, e.g. `"Node"`.
    pub fn type_ident(&self) -> LitStr {
        match self.custom_parts() {
            Some((_, name)) => LitStr::new(&name, self.ident.span()),
            None => LitStr::new(&self.ident.to_string(), self.ident.span()),
        }
    }

    /// An `Option<&'static str>` expression for the module path.
    pub fn module_path(&self) -> TokenStream {
        let option = crate::path::fp::option();
        match self.custom_parts() {
            Some((Some(module), _)) => quote! { #option::Some(#module) },
            Some((None, _)) => quote! { #option::None },
            None => quote! { #option::Some(::core::module_path!()) },
        }
    }

    /// A `&'static str` expression for the path without generics.
    fn base_path(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(lit) => lit.to_token_stream(),
            None => {
                let name = self.ident.to_string();
                quote! { ::core::concat!(::core::module_path!(), "::", #name) }
            }
        }
    }

    /// The body of `TypePath::type_path`.
    pub fn type_path_body(&self) -> TokenStream {
        if self.is_generic() {
            self.generic_string(self.base_path(), quote!(type_path))
        } else {
            self.base_path()
        }
    }

    /// The body of `TypePath::type_name`.
    pub fn type_name_body(&self) -> TokenStream {
        let ident = self.type_ident();
        if self.is_generic() {
            self.generic_string(ident.to_token_stream(), quote!(type_name))
        } else {
            ident.to_token_stream()
        }
    }

    /// Appends `<A, B, N>` to `base`, where type parameters are rendered with
    /// `TypePath::#method` and const parameters with their value.
    fn generic_string(&self, base: TokenStream, method: TokenStream) -> TokenStream {
        let rg_serial_path = &self.rg_serial_path;
        let cell_ = crate::path::generic_type_path_cell_(rg_serial_path);
        let concat_ = crate::path::concat_(rg_serial_path);
        let type_path_ = crate::path::type_path_(rg_serial_path);
        let to_string_ = crate::path::to_string_(rg_serial_path);

        let mut parts = vec![base, quote!("<")];
        let params = self
            .generics
            .params
            .iter()
            .filter(|param| !matches!(param, GenericParam::Lifetime(_)));
        for (index, param) in params.enumerate() {
            if index > 0 {
                parts.push(quote!(", "));
            }
            match param {
                GenericParam::Type(param) => {
                    let ident = &param.ident;
                    parts.push(quote! { <#ident as #type_path_>::#method() });
                }
                GenericParam::Const(param) => {
                    let ident = &param.ident;
                    parts.push(quote! { #to_string_::to_string(&#ident).as_str() });
                }
                GenericParam::Lifetime(_) => {}
            }
        }
        parts.push(quote!(">"));

        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| #concat_(&[#(#parts),*]))
        }
    }
}
