//! Derive macros for `st_reflect`:
//!
//! - [`Config`]
//! - [`ConfigEnum`]
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static CONFIG_ATTRIBUTE_NAME: &str = "config";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Configurable structs
///
/// `#[derive(Config)]` implements `Typed`, `Reflect` and `Configurable` for a
/// struct with named fields, so that an `ObjectMapper` can move it to and from
/// a `MapNode`. The struct must implement [`Default`], which serves as its
/// parameterless constructor, and cannot be generic.
///
/// Every field type must implement `Typed` and `Reflect`. A field of type
/// `Option<T>` is mapped as a nullable `T`.
///
/// ```rust, ignore
/// #[derive(Config, Default)]
/// #[config(type_path = "app::Server")]
/// struct Server {
///     #[config(comment = "bind address")]
///     host: String,
///     #[config(path = "http.port")]
///     port: u16,
///     proxy: Option<String>,
///     #[config(skip)]
///     connections: usize,
/// }
/// ```
///
/// ## Field attributes
///
/// - `path = "a.b"`: the dotted node path of the field, defaulting to its
///   name. Intermediate maps are created on extraction.
/// - `comment = "..."`: one comment line; repeat the attribute for more.
/// - `nullable`: an absent or null node leaves the field untouched instead
///   of failing. Implied by `Option<T>`, where it clears the field.
/// - `skip`: the field is not mapped.
/// - `base`: the field is an embedded struct deriving `Config` whose fields
///   are mapped first, at the level of the owner. Its type becomes the
///   supertype of the owner. At most one field may be a base.
///
/// ## Type attributes
///
/// - `type_path = "..."`: the unique path of the raw type, defaulting to
///   `module_path!()::Name`.
#[proc_macro_derive(Config, attributes(config))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let info = match derive_data::ConfigStruct::from_input(&ast) {
        Ok(info) => info,
        Err(err) => return err.into_compile_error().into(),
    };
    let impls = impls::impl_struct(&info);

    TokenStream::from(quote! {
        const _: () = {
            #impls
        };
    })
}

/// # Configurable enums
///
/// `#[derive(ConfigEnum)]` implements `Typed`, `Reflect` and `Enum` for an
/// enum whose variants carry no fields. A value is written as its variant
/// name; reading matches the exact name first, then ignores ASCII case.
///
/// ```rust, ignore
/// #[derive(ConfigEnum)]
/// enum Mode {
///     Fast,
///     Safe,
/// }
/// ```
///
/// Accepts the `type_path` type attribute of [`Config`].
#[proc_macro_derive(ConfigEnum, attributes(config))]
pub fn derive_config_enum(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let info = match derive_data::ConfigEnum::from_input(&ast) {
        Ok(info) => info,
        Err(err) => return err.into_compile_error().into(),
    };
    let impls = impls::impl_enum(&info);

    TokenStream::from(quote! {
        const _: () = {
            #impls
        };
    })
}
