use core::any::{Any, TypeId};
use core::fmt;

use alloc::boxed::Box;

use crate::info::{DynamicTyped, ReflectKind};
use crate::ops::{ReflectCloneError, ReflectMut, ReflectOwned, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The base trait of every navigable value.
///
/// A value is viewed through one of the container kinds of
/// [`ReflectKind`]: records, dictionaries, sequences and suppliers can be
/// navigated by paths, optionals are nullable slots and opaque values are
/// leaves.
///
/// Implement it with `#[derive(Bean)]` for records and with `impl_opaque!` for
/// leaf types. Containers of the standard library are implemented in
/// [`impls`](crate::impls).
pub trait Reflect: DynamicTyped + Send + Sync + Any {
    /// Casts this type to a reflected value.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable reflected value.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a boxed reflected value.
    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    /// Boxes the value.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the full path of the underlying type.
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        self.reflect_type_info().type_path()
    }

    /// Replaces the whole value.
    ///
    /// Returns the argument back if its type differs from `Self`.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn reflect_kind(&self) -> ReflectKind;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    fn reflect_owned(self: Box<Self>) -> ReflectOwned;

    /// Clones the value into a new box of the same concrete type.
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError>;

    /// Debug formatter used by the `Debug` impl of `dyn Reflect`.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::ops;
        match self.reflect_ref() {
            ReflectRef::Record(data) => ops::record_debug(data, f),
            ReflectRef::Dictionary(data) => ops::dictionary_debug(data, f),
            ReflectRef::Sequence(data) => ops::sequence_debug(data, f),
            ReflectRef::Supplier(_) => write!(f, "Supplier({})", self.reflect_type_path()),
            ReflectRef::Optional(data) => ops::optional_debug(data, f),
            ReflectRef::Opaque(_) => write!(f, "Opaque({})", self.reflect_type_path()),
        }
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the box, giving it back on type mismatch.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Unboxes the value, giving the box back on type mismatch.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements `set`, `reflect_kind`, `reflect_ref`, `reflect_mut` and
/// `reflect_owned` for a type of the given kind.
#[doc(hidden)]
#[macro_export]
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::std::boxed::Box<dyn $crate::Reflect>,
        ) -> ::core::result::Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }

        #[inline]
        fn reflect_owned(self: ::std::boxed::Box<Self>) -> $crate::ops::ReflectOwned {
            $crate::ops::ReflectOwned::$kind(self)
        }
    };
}
