use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::CONFIG_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[config(...)]` on the type itself.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// Overrides `module_path!()::Name` as the raw type path.
    pub type_path: Option<LitStr>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in config_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    if result.type_path.is_some() {
                        return Err(meta.error("duplicate `type_path`"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().trim().is_empty() {
                        return Err(syn::Error::new(lit.span(), "`type_path` cannot be empty"));
                    }
                    result.type_path = Some(lit);
                    Ok(())
                } else {
                    Err(meta.error("unknown type attribute, expected `type_path`"))
                }
            })?;
        }

        Ok(result)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[config(...)]` on a field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub path: Option<LitStr>,
    /// One element per comment line, in declaration order.
    pub comments: Vec<LitStr>,
    pub nullable: bool,
    pub skip: bool,
    pub base: bool,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        let mut span = None;

        for attr in config_attributes(attrs) {
            span.get_or_insert(attr.span());
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("path") {
                    if result.path.is_some() {
                        return Err(meta.error("duplicate `path`"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    let text = lit.value();
                    if text.split('.').any(|segment| segment.trim().is_empty()) {
                        return Err(syn::Error::new(
                            lit.span(),
                            "`path` needs non-empty segments separated by `.`",
                        ));
                    }
                    result.path = Some(lit);
                } else if meta.path.is_ident("comment") {
                    result.comments.push(meta.value()?.parse()?);
                } else if meta.path.is_ident("nullable") {
                    result.nullable = true;
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("base") {
                    result.base = true;
                } else {
                    return Err(meta.error(
                        "unknown field attribute, expected one of `path`, `comment`, `nullable`, `skip`, `base`",
                    ));
                }
                Ok(())
            })?;
        }

        if let Some(span) = span {
            if result.skip && (result.path.is_some() || !result.comments.is_empty() || result.nullable || result.base) {
                return Err(syn::Error::new(span, "a skipped field takes no other attribute"));
            }
            if result.base && (result.path.is_some() || !result.comments.is_empty() || result.nullable) {
                return Err(syn::Error::new(span, "a base field takes no other attribute"));
            }
        }

        Ok(result)
    }
}

fn config_attributes(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(CONFIG_ATTRIBUTE_NAME))
}
