//! Property navigation by path.
//!
//! [`BeanUtil`] reads, writes and checks properties addressed by a
//! [`PropertyPath`](crate::access::PropertyPath). Its behavior is tuned by
//! three flags:
//!
//! - `declared`: private members are accessible.
//! - `forced`: writes create missing intermediates and grow sequences.
//! - `silent`: a missing property reads as null and a write to it is ignored.
//!
//! The common flag combinations are collected in [`Presets`].
//!
//! [`BeanVisitor`] streams the top-level properties of a value and
//! [`BeanCopy`] copies them into another value.
//!
//! Every failure is a [`BeanError`] carrying a [`PropertyContext`].

// -----------------------------------------------------------------------------
// Modules

mod container;
mod copy;
mod cursor;
mod error;
mod navigator;
mod presets;
mod visitor;

// -----------------------------------------------------------------------------
// Exports

pub use copy::BeanCopy;
pub use error::{BeanError, PropertyContext};
pub use navigator::BeanUtil;
pub use presets::Presets;
pub use visitor::BeanVisitor;
