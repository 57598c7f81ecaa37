use proc_macro2::Span;
use syn::{Attribute, LitStr, spanned::Spanned};

use crate::SERIALIZABLE_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes placed on the type, `#[serializable(...)]`.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `type_path = "crate::module::Name"`, replaces `module_path!()` plus the ident.
    pub type_path: Option<LitStr>,
    /// `value`, the struct is copied by value instead of shared.
    pub value: Option<Span>,
    /// `auto_register`, submits the type to the global registry.
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(SERIALIZABLE_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    if this.type_path.is_some() {
                        return Err(meta.error("duplicate `type_path`"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    validate_type_path(&lit)?;
                    this.type_path = Some(lit);
                } else if meta.path.is_ident("value") {
                    this.value = Some(meta.path.span());
                } else if meta.path.is_ident("auto_register") {
                    this.auto_register = Some(meta.path.span());
                } else {
                    return Err(meta.error(
                        "expected `type_path = \"...\"`, `value` or `auto_register`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(this)
    }
}

/// The custom path is written into encoded text as-is, so it must not
/// collide with the grammar.
fn validate_type_path(lit: &LitStr) -> syn::Result<()> {
    let path = lit.value();

    let message = if path.is_empty() {
        "type path cannot be empty"
    } else if path.bytes().all(|b| b.is_ascii_digit()) {
        "type path cannot consist of digits only"
    } else if path.contains(['|', '~']) {
        "type path cannot contain `|` or `~`"
    } else if path.starts_with("::") || path.ends_with("::") {
        "type path cannot start or end with `::`"
    } else if path.contains(['<', '>']) {
        "type path cannot contain generics, they are appended automatically"
    } else {
        return Ok(());
    };

    Err(syn::Error::new(lit.span(), message))
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Attributes placed on a named field, `#[serializable(...)]`.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `ignore`, the field is neither written nor read and keeps its default.
    pub ignore: Option<Span>,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(SERIALIZABLE_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("ignore") {
                    this.ignore = Some(meta.path.span());
                    Ok(())
                } else {
                    Err(meta.error("expected `ignore`"))
                }
            })?;
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{FieldAttributes, TypeAttributes};
    use syn::{Attribute, parse_quote};

    #[test]
    fn type_attributes() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[derive(Default)]),
            parse_quote!(#[serializable(type_path = "zoo::Cat", auto_register)]),
        ];
        let parsed = TypeAttributes::parse(&attrs).unwrap();
        assert_eq!(parsed.type_path.unwrap().value(), "zoo::Cat");
        assert!(parsed.auto_register.is_some());
        assert!(parsed.value.is_none());
    }

    #[test]
    fn invalid_type_paths() {
        for path in ["", "123", "a|b", "a~b", "::a", "a::", "Foo<T>"] {
            let attrs: Vec<Attribute> = vec![parse_quote!(#[serializable(type_path = #path)])];
            assert!(TypeAttributes::parse(&attrs).is_err(), "{path:?} accepted");
        }

        let attrs: Vec<Attribute> = vec![parse_quote!(#[serializable(type_path = "[u8; 4]")])];
        assert!(TypeAttributes::parse(&attrs).is_ok());
    }

    #[test]
    fn unknown_attributes() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[serializable(rename = "x")])];
        assert!(TypeAttributes::parse(&attrs).is_err());

        let attrs: Vec<Attribute> = vec![parse_quote!(#[serializable(value)])];
        assert!(FieldAttributes::parse(&attrs).is_err());

        let attrs: Vec<Attribute> = vec![parse_quote!(#[serializable(ignore)])];
        assert!(FieldAttributes::parse(&attrs).unwrap().ignore.is_some());
    }
}
