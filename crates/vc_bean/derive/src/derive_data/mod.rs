//! Parsing of the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod bean_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, PropertyAttribute, TypeAttributes};
pub(crate) use bean_struct::{BeanField, BeanStruct};
