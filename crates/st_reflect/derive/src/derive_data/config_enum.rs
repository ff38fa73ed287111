use syn::{Data, DeriveInput, Fields, Ident};

use super::ConfigMeta;

/// A field-less enum deriving `ConfigEnum`.
pub(crate) struct ConfigEnum<'a> {
    pub meta: ConfigMeta<'a>,
    pub variants: Vec<&'a Ident>,
}

impl<'a> ConfigEnum<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        let meta = ConfigMeta::from_input(ast, "ConfigEnum")?;

        let Data::Enum(data) = &ast.data else {
            return Err(syn::Error::new(
                ast.ident.span(),
                "`ConfigEnum` needs an enum, use `Config` for structs",
            ));
        };
        if data.variants.is_empty() {
            return Err(syn::Error::new(ast.ident.span(), "`ConfigEnum` needs at least one variant"));
        }

        let mut variants = Vec::with_capacity(data.variants.len());
        for variant in &data.variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    &variant.fields,
                    "`ConfigEnum` variants cannot carry fields",
                ));
            }
            variants.push(&variant.ident);
        }

        Ok(Self { meta, variants })
    }
}
