//! Data access by kind.
//!
//! Each container kind of [`ReflectKind`](crate::info::ReflectKind) has a
//! subtrait of [`Reflect`](crate::Reflect):
//!
//! - [`Record`]: named backing fields of a struct.
//! - [`Dictionary`]: string-keyed containers, e.g. `HashMap<String, V>`.
//! - [`Sequence`]: integer-indexed containers, e.g. `Vec<T>` or `[T; N]`.
//! - [`LazySupplier`]: zero-argument thunks, e.g. [`Supplier<T>`].
//! - [`Optional`]: nullable slots, i.e. `Option<T>`.
//!
//! [`DynamicMap`] is an untyped dictionary with nullable values, the usual
//! target when copying records into maps.

// -----------------------------------------------------------------------------
// Modules

mod assign;
mod clone_error;
mod dictionary;
mod kind;
mod optional;
mod record;
mod sequence;
mod supplier;

// -----------------------------------------------------------------------------
// Exports

pub use assign::{AssignError, assign, take_value};
pub use clone_error::ReflectCloneError;
pub use kind::{ReflectMut, ReflectOwned, ReflectRef};

pub use dictionary::{Dictionary, DynamicMap, dictionary_debug};
pub use optional::{Optional, optional_debug};
pub use record::{Record, record_debug};
pub use sequence::{Sequence, sequence_debug};
pub use supplier::{LazySupplier, Supplier};
