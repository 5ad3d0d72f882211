//! Containers for static storage of type information.
//!
//! A non generic type keeps its [`TypeInfo`] in a [`NonGenericTypeInfoCell`],
//! a thin wrapper over [`OnceLock`].
//!
//! The `static CELL` inside a generic function is shared by every
//! instantiation, so [`GenericTypeInfoCell`] keys its entries by [`TypeId`]
//! behind a [`RwLock`].
//!
//! # Examples
//!
//! ```
//! use vc_bean::info::{NonGenericTypeInfoCell, OpaqueInfo, TypeInfo, Typed};
//!
//! struct Token;
//!
//! impl Typed for Token {
//!     fn type_info() -> &'static TypeInfo {
//!         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
//!         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
//!     }
//! }
//!
//! assert_eq!(Token::type_info().type_name(), "Token");
//! ```

use core::any::{Any, TypeId};

use alloc::boxed::Box;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::info::TypeInfo;
use crate::utils::{TypeIdMap, new_fixed_map};

/// Storage of the [`TypeInfo`] of a non generic type.
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    /// Create an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, initializing it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

/// Storage of the [`TypeInfo`]s of every instantiation of a generic type.
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    /// Create an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(new_fixed_map()))
    }

    /// Returns the info stored for `G`, initializing it with `f` on first access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        let cached = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();

        match cached {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f),
        }
    }

    // `f` may recurse into other cells, so it runs outside the write lock.
    #[inline(never)]
    fn insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        let info = f();
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert_with(|| &*Box::leak(Box::new(info)))
    }
}
