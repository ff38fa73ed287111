//! Parsed forms of the derive inputs.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod config_enum;
mod config_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use config_enum::ConfigEnum;
pub(crate) use config_struct::{ConfigField, ConfigStruct};

use quote::quote;
use syn::{DeriveInput, Ident};

/// Data shared by both derives.
pub(crate) struct ConfigMeta<'a> {
    pub ident: &'a Ident,
    pub attrs: TypeAttributes,
    pub st_reflect_path: syn::Path,
}

impl<'a> ConfigMeta<'a> {
    pub fn from_input(ast: &'a DeriveInput, derive_name: &str) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                format!("`{derive_name}` cannot be derived for generic types"),
            ));
        }
        Ok(Self {
            ident: &ast.ident,
            attrs: TypeAttributes::parse(&ast.attrs)?,
            st_reflect_path: crate::path::st_reflect(),
        })
    }

    /// The raw type path as an expression of type `&'static str`.
    pub fn type_path_tokens(&self) -> proc_macro2::TokenStream {
        match &self.attrs.type_path {
            Some(lit) => quote!(#lit),
            None => {
                let name = self.ident.to_string();
                quote!(::core::concat!(::core::module_path!(), "::", #name))
            }
        }
    }

    pub fn name(&self) -> String {
        self.ident.to_string()
    }
}
