//! Reflection for common types.
//!
//! ## Implemented Menu
//!
//! - opaque: `()`, `bool`, `char`, `i8`-`i128`, `u8`-`u128`, `isize`,
//!   `usize`, `f32`, `f64`, `String`, `&'static str`
//! - optional: `Option<T>`
//! - sequence: `Vec<T>`, `VecDeque<T>`, `[T; N]`
//! - dictionary: `HashMap<String, V, S>` (std and `hashbrown`),
//!   `BTreeMap<String, V>`
//!
//! Other leaf types are declared with [`impl_opaque!`](crate::impl_opaque).

// -----------------------------------------------------------------------------
// Modules

mod map;
mod opaque;
mod option;
mod sequence;

// -----------------------------------------------------------------------------
// Utilities

use crate::Reflect;
use crate::ops::ReflectCloneError;

/// Clones a value through [`Reflect::reflect_clone`], keeping its static type.
///
/// Used by container impls and by `#[derive(Bean)]`.
pub fn clone_value<T: Reflect>(value: &T) -> Result<T, ReflectCloneError> {
    value
        .reflect_clone()?
        .take::<T>()
        .map_err(|value| ReflectCloneError::NotSupported {
            type_path: value.reflect_type_path(),
        })
}
