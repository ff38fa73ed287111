use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericArgument, Ident, PathArguments, Type};

use super::{ConfigMeta, FieldAttributes};

// -----------------------------------------------------------------------------
// ConfigField

/// A mapped field of a `#[derive(Config)]` struct.
pub(crate) struct ConfigField<'a> {
    pub ident: &'a Ident,
    pub attrs: FieldAttributes,
    /// The declared type, or `T` for an `Option<T>` field.
    pub value_ty: &'a Type,
    pub optional: bool,
}

impl ConfigField<'_> {
    /// `Option` fields are always nullable.
    pub fn nullable(&self) -> bool {
        self.optional || self.attrs.nullable
    }
}

// -----------------------------------------------------------------------------
// ConfigStruct

pub(crate) struct ConfigStruct<'a> {
    pub meta: ConfigMeta<'a>,
    /// Mapped fields in declaration order; skipped fields are left out.
    pub fields: Vec<ConfigField<'a>>,
}

impl<'a> ConfigStruct<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        let meta = ConfigMeta::from_input(ast, "Config")?;

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`Config` needs a struct with named fields",
                    ));
                }
            },
            Data::Enum(_) => {
                return Err(syn::Error::new(
                    ast.ident.span(),
                    "`Config` cannot be derived for enums, use `ConfigEnum`",
                ));
            }
            Data::Union(_) => {
                return Err(syn::Error::new(ast.ident.span(), "`Config` cannot be derived for unions"));
            }
        };

        let mut fields = Vec::with_capacity(named.named.len());
        let mut has_base = false;

        for field in &named.named {
            let attrs = FieldAttributes::parse(&field.attrs)?;
            if attrs.skip {
                continue;
            }
            let Some(ident) = field.ident.as_ref() else {
                return Err(syn::Error::new(field.span(), "expected a named field"));
            };
            let (value_ty, optional) = match option_inner(&field.ty) {
                Some(inner) => (inner, true),
                None => (&field.ty, false),
            };
            if attrs.base {
                if has_base {
                    return Err(syn::Error::new(field.span(), "a struct has at most one `base` field"));
                }
                if optional {
                    return Err(syn::Error::new(field.ty.span(), "a `base` field cannot be an `Option`"));
                }
                has_base = true;
            }
            fields.push(ConfigField {
                ident,
                attrs,
                value_ty,
                optional,
            });
        }

        Ok(Self { meta, fields })
    }

    pub fn base(&self) -> Option<&ConfigField<'a>> {
        self.fields.iter().find(|field| field.attrs.base)
    }
}

/// `T` when `ty` is spelled `Option<T>`, `std::option::Option<T>` or
/// `core::option::Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let last = path.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}
