//! Paths of the `st_reflect` items named by generated code.
//!
//! Every path is built from the crate path returned by [`st_reflect`], so
//! generated code keeps working when the invoking crate only depends on the
//! `strata` facade.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// The path of the `st_reflect` crate as seen from the invoking crate.
///
/// 1. Crates depending on `st_reflect` get `::st_reflect`.
/// 2. Crates depending on `strata` get `::strata::reflect`.
/// 3. Anything else gets `::st_reflect`.
///
/// This reads the invoking crate's Cargo.toml; resolve it once per macro
/// invocation and pass it around.
pub(crate) fn st_reflect() -> syn::Path {
    st_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("st_reflect"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn macro_exports_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::__macro_exports
    }
}

#[inline(always)]
pub(crate) fn reflect_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::Reflect
    }
}

#[inline(always)]
pub(crate) fn typed_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::info::Type
    }
}

#[inline(always)]
pub(crate) fn raw_type_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::info::RawType
    }
}

#[inline(always)]
pub(crate) fn type_kind_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::info::TypeKind
    }
}

#[inline(always)]
pub(crate) fn type_ops_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::info::TypeOps
    }
}

#[inline(always)]
pub(crate) fn enum_ops_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::info::EnumOps
    }
}

#[inline(always)]
pub(crate) fn reflect_ref_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::ops::ReflectRef
    }
}

#[inline(always)]
pub(crate) fn reflect_mut_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::ops::ReflectMut
    }
}

#[inline(always)]
pub(crate) fn enum_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::ops::Enum
    }
}

#[inline(always)]
pub(crate) fn configurable_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::mapper::Configurable
    }
}

#[inline(always)]
pub(crate) fn schema_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::mapper::Schema
    }
}

#[inline(always)]
pub(crate) fn field_info_(st_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #st_reflect_path::mapper::FieldInfo
    }
}
