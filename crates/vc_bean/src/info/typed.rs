use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// Static access to the [`TypeInfo`] of a type.
///
/// Usually implemented by `#[derive(Bean)]` or the `impl_opaque!` macro, storing the
/// info in a [`NonGenericTypeInfoCell`](crate::info::NonGenericTypeInfoCell)
/// or [`GenericTypeInfoCell`](crate::info::GenericTypeInfoCell).
pub trait Typed: 'static {
    /// Returns the compile-time info for the underlying type.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Object-safe access to the [`TypeInfo`] of a value.
///
/// Implemented for every [`Typed`] type, you should not implement it manually.
pub trait DynamicTyped {
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
