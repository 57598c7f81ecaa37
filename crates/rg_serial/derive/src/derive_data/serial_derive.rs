use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type};

use super::{FieldAttributes, SerialMeta, TypeAttributes};

// -----------------------------------------------------------------------------
// Define

/// The parsed input of `#[derive(Serializable)]`.
pub(crate) enum SerialDerive<'a> {
    /// A struct with reference identity, shared through `Shared<T>`.
    Record(SerialMeta<'a>, Vec<SerialField<'a>>),
    /// A struct marked `#[serializable(value)]`, copied inline.
    Value(SerialMeta<'a>, Vec<SerialField<'a>>),
    /// A fieldless enumeration.
    Enum(SerialMeta<'a>, Vec<&'a Ident>),
}

/// A named field of a struct.
pub(crate) struct SerialField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl<'a> SerialField<'a> {
    fn new(field: &'a syn::Field) -> syn::Result<Self> {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        Ok(Self {
            ident,
            ty: &field.ty,
            attrs: FieldAttributes::parse(&field.attrs)?,
        })
    }

    /// The member name, without a raw identifier prefix.
    pub fn name(&self) -> LitStr {
        LitStr::new(&self.ident.unraw().to_string(), self.ident.span())
    }

    /// Generates `MemberInfo::new::<Ty>("name")`.
    pub fn to_info_tokens(&self, rg_serial_path: &syn::Path) -> TokenStream {
        let member_info_ = crate::path::member_info_(rg_serial_path);
        let ty = self.ty;
        let name = self.name();
        quote! { #member_info_::new::<#ty>(#name) }
    }
}

// -----------------------------------------------------------------------------
// Parse

impl<'a> SerialDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse(&input.attrs)?;

        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "serializable types cannot borrow, remove the lifetime parameter",
            ));
        }

        match &input.data {
            Data::Struct(data) => {
                let fields = match &data.fields {
                    Fields::Named(fields) => fields
                        .named
                        .iter()
                        .map(SerialField::new)
                        .collect::<syn::Result<Vec<_>>>()?,
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(fields) => {
                        return Err(syn::Error::new_spanned(
                            fields,
                            "tuple structs are not supported, name the fields",
                        ));
                    }
                };

                let is_value = attrs.value.is_some();
                let meta = Self::meta(attrs, input)?;
                Ok(if is_value {
                    Self::Value(meta, fields)
                } else {
                    Self::Record(meta, fields)
                })
            }
            Data::Enum(data) => {
                if let Some(span) = attrs.value {
                    return Err(syn::Error::new(span, "`value` applies to structs only"));
                }
                if !input.generics.params.is_empty() {
                    return Err(syn::Error::new_spanned(
                        &input.generics,
                        "generic enumerations are not supported",
                    ));
                }
                if data.variants.is_empty() {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "an enumeration needs at least one variant",
                    ));
                }

                let variants = data
                    .variants
                    .iter()
                    .map(|variant| match variant.fields {
                        Fields::Unit => Ok(&variant.ident),
                        _ => Err(syn::Error::new_spanned(
                            variant,
                            "only fieldless enumerations are supported",
                        )),
                    })
                    .collect::<syn::Result<Vec<_>>>()?;

                Ok(Self::Enum(Self::meta(attrs, input)?, variants))
            }
            Data::Union(_) => Err(syn::Error::new(
                input.ident.span(),
                "unions are not supported",
            )),
        }
    }

    fn meta(attrs: TypeAttributes, input: &'a DeriveInput) -> syn::Result<SerialMeta<'a>> {
        let meta = SerialMeta::new(attrs, &input.ident, &input.generics);
        if let Some(span) = meta.attrs().auto_register
            && meta.is_generic()
        {
            return Err(syn::Error::new(
                span,
                "generic types cannot be registered automatically, \
                 use `impl_auto_register!` for each instantiation",
            ));
        }
        Ok(meta)
    }

    pub fn meta_ref(&self) -> &SerialMeta<'a> {
        match self {
            Self::Record(meta, _) | Self::Value(meta, _) | Self::Enum(meta, _) => meta,
        }
    }
}

/// Fields that are written and read, in declaration order.
pub(crate) fn active_fields<'b, 'a>(
    fields: &'b [SerialField<'a>],
) -> impl Iterator<Item = &'b SerialField<'a>> {
    fields.iter().filter(|field| field.attrs.ignore.is_none())
}
