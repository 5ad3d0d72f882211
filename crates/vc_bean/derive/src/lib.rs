//! Provides `#[derive(Bean)]`.
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static BEAN_ATTRIBUTE_NAME: &str = "bean";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Bean Derivation
///
/// `#[derive(Bean)]` turns a struct with named fields into a record and
/// implements `Typed`, `Reflect` and `Record` for it.
///
/// Every field becomes a member of the same name, with a field-backed getter
/// and setter. A `pub` field is public; any other field is private and only
/// reachable in declared mode.
///
/// ## Field attributes
///
/// - `rename = "name"`: the member name.
/// - `skip`: the field is not a member. `reflect_clone` fills it with
///   `Default::default()`.
/// - `raw`: the field is reachable as a raw field only, without getter or
///   setter.
/// - `get = path`: read through `fn(&Self) -> Result<T, E>` instead of the
///   field.
/// - `set = path`: write through `fn(&mut Self, T) -> Result<(), E>` instead
///   of the field.
/// - `private`: the member is private whatever the field visibility.
///
/// `E` is any error convertible into `Box<dyn Error + Send + Sync>`.
///
/// ```rust, ignore
/// #[derive(Bean)]
/// struct User {
///     #[bean(rename = "userName")]
///     pub name: String,
///     #[bean(get = User::age, set = User::set_age)]
///     pub age: u32,
///     #[bean(raw)]
///     id: u64,
///     #[bean(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// ## Type attributes
///
/// - `default`: registers `Default::default` as the constructor used by
///   forced creation.
/// - `clone`: `reflect_clone` uses `Clone` instead of cloning field by field.
/// - `crate = "path"`: the path to the bean crate, when it cannot be found
///   in the caller's `Cargo.toml`.
/// - `property(name = "..", ty = T, get = path, set = path, private)`: a
///   virtual member without backing field. At least one of `get` and `set`
///   is required.
///
/// ```rust, ignore
/// #[derive(Bean, Default)]
/// #[bean(default, property(name = "total", ty = u64, get = Cart::total))]
/// struct Cart {
///     pub items: Vec<u64>,
/// }
/// ```
#[proc_macro_derive(Bean, attributes(bean))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let bean = match derive_data::BeanStruct::from_input(&ast) {
        Ok(bean) => bean,
        Err(err) => return err.into_compile_error().into(),
    };

    impls::impl_bean(&bean).into()
}
