use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ConfigMeta;

/// Generates `Reflect`, viewing the value as `ReflectRef::<variant>`.
pub(crate) fn impl_trait_reflect(meta: &ConfigMeta, variant: TokenStream) -> TokenStream {
    let st_reflect_path = &meta.st_reflect_path;
    let reflect_ = crate::path::reflect_(st_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(st_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(st_reflect_path);
    let ident = meta.ident;

    quote! {
        impl #reflect_ for #ident {
            #[inline]
            fn as_reflect(&self) -> &dyn #reflect_ {
                self
            }

            #[inline]
            fn as_reflect_mut(&mut self) -> &mut dyn #reflect_ {
                self
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#variant(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#variant(self)
            }
        }
    }
}
