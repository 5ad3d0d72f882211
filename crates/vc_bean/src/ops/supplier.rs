use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use crate::Reflect;
use crate::info::{GenericTypeInfoCell, SupplierInfo, TypeInfo, Typed};
use crate::ops::ReflectCloneError;

// -----------------------------------------------------------------------------
// LazySupplier

/// A zero-argument thunk producing a value on demand.
///
/// The navigator invokes it once per traversal step and never caches the
/// result, so every visit observes a fresh value.
pub trait LazySupplier: Reflect {
    fn supply(&self) -> Box<dyn Reflect>;

    /// The declared type of the produced value.
    fn item_info(&self) -> Option<&'static TypeInfo> {
        self.reflect_type_info()
            .as_supplier()
            .ok()
            .map(SupplierInfo::item_info)
    }
}

// -----------------------------------------------------------------------------
// Supplier

/// A cloneable [`LazySupplier`] over a closure.
///
/// # Examples
///
/// ```
/// use vc_bean::ops::{LazySupplier, Supplier};
///
/// let answer = Supplier::new(|| 42_i32);
/// let value = answer.supply();
///
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
/// assert_eq!(answer.get(), 42);
/// ```
pub struct Supplier<T> {
    func: Arc<dyn Fn() -> T + Send + Sync>,
}

impl<T> Supplier<T> {
    pub fn new(func: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            func: Arc::new(func),
        }
    }

    /// Invokes the closure.
    #[inline]
    pub fn get(&self) -> T {
        (self.func)()
    }
}

impl<T> Clone for Supplier<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

impl<T> fmt::Debug for Supplier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supplier").finish_non_exhaustive()
    }
}

impl<T: Reflect + Typed> Typed for Supplier<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Supplier(SupplierInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed> Reflect for Supplier<T> {
    crate::impl_reflect_cast_fn!(Supplier);

    #[inline]
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        Ok(Box::new(self.clone()))
    }
}

impl<T: Reflect + Typed> LazySupplier for Supplier<T> {
    #[inline]
    fn supply(&self) -> Box<dyn Reflect> {
        Box::new(self.get())
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};

    use alloc::sync::Arc;

    use super::Supplier;
    use crate::info::{ReflectKind, Typed};
    use crate::ops::LazySupplier;

    #[test]
    fn supplies_fresh_values() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let supplier = Supplier::new(move || counter.fetch_add(1, Ordering::Relaxed) as u32);

        assert_eq!(supplier.supply().downcast_ref::<u32>(), Some(&0));
        assert_eq!(supplier.supply().downcast_ref::<u32>(), Some(&1));
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn type_info_links_item() {
        let info = Supplier::<u8>::type_info();
        assert_eq!(info.kind(), ReflectKind::Supplier);
        assert_eq!(info.unwrap_declared().type_name(), "u8");

        let chained = Supplier::<Supplier<u8>>::type_info().unwrap_declared();
        assert_eq!(chained.kind(), ReflectKind::Supplier);
    }
}
