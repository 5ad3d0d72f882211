//! The introspection collaborator.
//!
//! [`Introspector`] resolves a [`TypeInfo`](crate::info::TypeInfo) into a
//! cached [`TypeDescriptor`], whose [`MemberDescriptor`]s apply the
//! visibility rules of the declared and public modes and expose the
//! member's [`Getter`] and [`Setter`].

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod introspector;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::{AccessorError, Getter, MemberDescriptor, PropertyValue, Setter, TypeDescriptor};
pub use introspector::Introspector;
