use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to spell paths to other crates from
/// generated code.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.crate_path("vc_bean"));
/// ```
///
/// Reading the manifest takes a file access and a global lock, so resolve
/// a path once per macro invocation and pass it around.
///
/// # Resolution rules
///
/// 1. A dependency named `name`, or renamed from package `name`, yields
///    `::dependency_key`.
/// 2. For a `vc_` crate, a dependency on the facade `vc_beans` yields
///    `::vc_beans::short_name` (e.g. `vc_bean` -> `::vc_beans::bean`).
/// 3. Steps 1 and 2 are repeated over `dev-dependencies`.
/// 4. Otherwise `::name`.
///
/// A crate that expands its own macros should declare
/// `extern crate self as name;` so that rule 4 resolves inside it.
#[derive(Debug)]
pub struct Manifest {
    document: Document<Box<str>>,
    modified: SystemTime,
}

const FACADE_NAME: &str = "vc_beans";
const CRATE_PREFIX: &str = "vc_";

impl Manifest {
    fn path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(path.exists(), "missing cargo manifest at {}", path.display());
        path
    }

    fn modified(path: &Path) -> std::io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }

    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()));
        Document::parse(text.into_boxed_str())
            .unwrap_or_else(|err| panic!("cannot parse {}: {err}", path.display()))
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let text = segments.iter().fold(String::new(), |mut text, segment| {
            text.push_str("::");
            text.push_str(segment);
            text
        });
        syn::parse_str(&text).unwrap_or_else(|err| panic!("invalid crate path `{text}`: {err}"))
    }

    /// The key under which package `name` is listed, following renames.
    fn dependency_key<'t>(deps: &'t Table, name: &str) -> Option<&'t str> {
        if let Some((key, _)) = deps.get_key_value(name) {
            return Some(key.get());
        }
        deps.iter().find_map(|(key, item)| {
            let package = item.get("package").and_then(Item::as_str)?;
            (package == name).then_some(key)
        })
    }

    fn find_in(deps: &Table, name: &str) -> Option<syn::Path> {
        if let Some(key) = Self::dependency_key(deps, name) {
            return Some(Self::absolute(&[&key.replace('-', "_")]));
        }

        let short = name.strip_prefix(CRATE_PREFIX)?;
        let facade = Self::dependency_key(deps, FACADE_NAME)?;
        Some(Self::absolute(&[&facade.replace('-', "_"), short]))
    }

    /// Returns the path to crate `name` as seen from the caller.
    pub fn crate_path(&self, name: &str) -> syn::Path {
        for section in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.document.get(section)
                && let Some(path) = Self::find_in(deps, name)
            {
                return path;
            }
        }
        Self::absolute(&[name])
    }

    /// Runs `func` with the caller's manifest, reading it only when it
    /// changed since the last call.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::path();
        let modified = Self::modified(&path).expect("cargo manifest has a modification time");

        {
            let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = cache.get(&path)
                && manifest.modified == modified
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            document: Self::read(&path),
            modified,
        };
        let result = func(&manifest);

        CACHE
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);
        result
    }
}
