use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The Cargo.toml of the crate invoking a proc-macro.
///
/// Generated code must name other crates by a path that resolves from the
/// invoking crate, which may depend on a member crate directly or only on the
/// `strata` facade.
///
/// ```rust
/// # use st_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("st_reflect"));
/// ```
///
/// Reading the manifest is not free: resolve each path once per macro
/// invocation.
///
/// # Resolution rules
///
/// 1. A crate listed in `dependencies` resolves to `::crate_name`.
/// 2. A crate named `st_<short>` resolves to `::strata::<short>` when
///    `strata` is listed in `dependencies` (e.g. `st_reflect` ->
///    `::strata::reflect`).
/// 3. Rules 1 and 2 are repeated for `dev-dependencies`.
/// 4. Anything else falls back to `::crate_name`.
///
/// A crate that expands its own derives in doctests or unit tests should
/// declare `extern crate self as crate_name;` so that the fallback resolves.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "strata";
const MEMBER_PREFIX: &str = "st_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .unwrap_or_else(|| panic!("CARGO_MANIFEST_DIR is not set; proc-macros must run under cargo"));
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> SystemTime {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .unwrap_or_else(|e| panic!("Unable to stat cargo manifest {}: {e}", path.display()))
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Unable to read cargo manifest {}: {e}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|e| panic!("Failed to parse cargo manifest {}: {e}", path.display()))
    }

    fn parse_path(text: &str) -> syn::Path {
        syn::parse_str(text).unwrap_or_else(|e| panic!("`{text}` is not a path: {e}"))
    }

    fn find_in(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_path(&format!("::{name}")));
        }
        let short = name.strip_prefix(MEMBER_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::parse_path(&format!("::{FACADE_NAME}::{short}")))
    }

    /// The path of the crate `name` as seen from the invoking crate.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|table| match self.manifest.get(table) {
                Some(Item::Table(deps)) => Self::find_in(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| Self::parse_path(&format!("::{name}")))
    }

    /// Runs `func` with the manifest of the invoking crate.
    ///
    /// Manifests are cached per path and re-read when the file changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time = Self::modified_time(&path);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
