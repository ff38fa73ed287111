use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

use crate::derive_data::{ConfigField, ConfigStruct};

/// `Typed`, `Reflect` and `Configurable` for a named-field struct.
pub(crate) fn impl_struct(info: &ConfigStruct) -> TokenStream {
    let typed_impl = impl_typed(info);
    let reflect_impl = super::impl_trait_reflect(&info.meta, quote!(Object));
    let configurable_impl = impl_configurable(info);

    quote! {
        #typed_impl

        #reflect_impl

        #configurable_impl
    }
}

fn impl_typed(info: &ConfigStruct) -> TokenStream {
    let meta = &info.meta;
    let st_reflect_path = &meta.st_reflect_path;
    let typed_ = crate::path::typed_(st_reflect_path);
    let type_ = crate::path::type_(st_reflect_path);
    let raw_type_ = crate::path::raw_type_(st_reflect_path);
    let type_kind_ = crate::path::type_kind_(st_reflect_path);
    let type_ops_ = crate::path::type_ops_(st_reflect_path);
    let configurable_ = crate::path::configurable_(st_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(st_reflect_path);

    let ident = meta.ident;
    let name = meta.name();
    let type_path = meta.type_path_tokens();

    // The embedded base is the only declared supertype.
    let supertypes = match info.base() {
        Some(base) => {
            let base_ty = base.value_ty;
            quote!(#macro_exports_::Vec::from([<#base_ty as #typed_>::ty()]))
        }
        None => quote!(#macro_exports_::Vec::new()),
    };

    quote! {
        impl #typed_ for #ident {
            fn ty() -> #type_ {
                fn supertypes() -> #macro_exports_::Vec<#type_> {
                    #supertypes
                }

                static RAW: #raw_type_ = #raw_type_::new(#type_path, #name, #type_kind_::Class)
                    .with_supertypes(supertypes);
                static TY: #macro_exports_::OnceLock<#type_> = #macro_exports_::OnceLock::new();

                TY.get_or_init(|| {
                    #type_::class(&RAW).with_ops(
                        #type_ops_::of::<Self>()
                            .with_default::<Self>()
                            .with_schema(<Self as #configurable_>::type_schema),
                    )
                })
                .clone()
            }
        }
    }
}

fn impl_configurable(info: &ConfigStruct) -> TokenStream {
    let meta = &info.meta;
    let st_reflect_path = &meta.st_reflect_path;
    let configurable_ = crate::path::configurable_(st_reflect_path);
    let schema_ = crate::path::schema_(st_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(st_reflect_path);

    let ident = meta.ident;
    let type_path = meta.type_path_tokens();
    let fields = info.fields.iter().map(|field| field_info_tokens(field, st_reflect_path));

    quote! {
        impl #configurable_ for #ident {
            #[inline]
            fn schema(&self) -> &'static #schema_ {
                <Self as #configurable_>::type_schema()
            }

            fn type_schema() -> &'static #schema_ {
                static SCHEMA: #macro_exports_::OnceLock<#schema_> = #macro_exports_::OnceLock::new();

                SCHEMA.get_or_init(|| {
                    #schema_::new(#type_path, #macro_exports_::Vec::from([#(#fields),*]))
                })
            }
        }
    }
}

/// A `FieldInfo` expression for one field.
fn field_info_tokens(field: &ConfigField, st_reflect_path: &syn::Path) -> TokenStream {
    let typed_ = crate::path::typed_(st_reflect_path);
    let field_info_ = crate::path::field_info_(st_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(st_reflect_path);

    let ident = field.ident;
    let name = ident.unraw().to_string();
    let value_ty = field.value_ty;

    let (get, get_mut, set) = if field.optional {
        (quote!(get_option), quote!(get_mut_option), quote!(set_option))
    } else {
        (quote!(get), quote!(get_mut), quote!(set))
    };

    let mut tokens = quote! {
        #field_info_::new(
            #name,
            <#value_ty as #typed_>::ty,
            |owner| #macro_exports_::#get::<Self, #value_ty>(owner, |this| &this.#ident),
            |owner| #macro_exports_::#get_mut::<Self, #value_ty>(owner, |this| &mut this.#ident),
            |owner, value| #macro_exports_::#set::<Self, #value_ty>(owner, value, |this| &mut this.#ident),
        )
    };

    let attrs = &field.attrs;
    if let Some(path) = &attrs.path {
        tokens.extend(quote!(.with_path(#path)));
    }
    if !attrs.comments.is_empty() {
        let comments = &attrs.comments;
        tokens.extend(quote!(.with_comments(&[#(#comments),*])));
    }
    if field.nullable() {
        tokens.extend(quote!(.with_nullable(true)));
    }
    if attrs.base {
        tokens.extend(quote!(.with_base(true)));
    }

    tokens
}
