use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

use crate::derive_data::ConfigEnum;

/// `Typed`, `Reflect` and `Enum` for a field-less enum.
pub(crate) fn impl_enum(info: &ConfigEnum) -> TokenStream {
    let meta = &info.meta;
    let st_reflect_path = &meta.st_reflect_path;
    let typed_ = crate::path::typed_(st_reflect_path);
    let type_ = crate::path::type_(st_reflect_path);
    let raw_type_ = crate::path::raw_type_(st_reflect_path);
    let type_kind_ = crate::path::type_kind_(st_reflect_path);
    let type_ops_ = crate::path::type_ops_(st_reflect_path);
    let enum_ops_ = crate::path::enum_ops_(st_reflect_path);
    let enum_ = crate::path::enum_(st_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(st_reflect_path);

    let ident = meta.ident;
    let name = meta.name();
    let type_path = meta.type_path_tokens();

    let variants = &info.variants;
    let names: Vec<String> = variants.iter().map(|variant| variant.unraw().to_string()).collect();

    let reflect_impl = super::impl_trait_reflect(meta, quote!(Enum));

    quote! {
        impl #typed_ for #ident {
            fn ty() -> #type_ {
                static RAW: #raw_type_ = #raw_type_::new(#type_path, #name, #type_kind_::Enum);
                static TY: #macro_exports_::OnceLock<#type_> = #macro_exports_::OnceLock::new();

                TY.get_or_init(|| {
                    #type_::class(&RAW).with_ops(#type_ops_::of::<Self>().with_enum(#enum_ops_::new(
                        &[#(#names),*],
                        |name| match name {
                            #(#names => ::core::option::Option::Some(#macro_exports_::boxed(Self::#variants)),)*
                            _ => ::core::option::Option::None,
                        },
                    )))
                })
                .clone()
            }
        }

        #reflect_impl

        impl #enum_ for #ident {
            fn variant_name(&self) -> &'static str {
                match self {
                    #(Self::#variants => #names,)*
                }
            }
        }
    }
}
