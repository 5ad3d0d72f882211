//! Compile-time type information.
//!
//! Every reflected type exposes a `&'static` [`TypeInfo`] through [`Typed`].
//! The navigator uses it to classify values, to find the declared type of a
//! member (type-mode traversal), and to default-construct missing
//! intermediates (forced mode).

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod container_info;
mod record_info;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use container_info::{DictionaryInfo, OpaqueInfo, OptionalInfo, SequenceInfo, SupplierInfo};
pub use record_info::{BoxError, GetterFn, GetterInfo, GetterKind, MemberInfo, RecordInfo};
pub use record_info::{SetterFn, SetterInfo, SetterKind, Visibility};
pub use ty::Type;
pub use type_info::{Constructor, ReflectKind, ReflectKindError, TypeInfo, default_constructor};
pub use typed::{DynamicTyped, Typed};
