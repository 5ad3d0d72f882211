use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock};

use crate::Reflect;
use crate::info::{TypeInfo, Typed};
use crate::registry::TypeDescriptor;
use crate::utils::TypeIdMap;

/// A shared, thread-safe cache of [`TypeDescriptor`]s keyed by type.
///
/// Cloning an `Introspector` shares the cache. Each type is described at
/// most once, even under concurrent lookups.
///
/// # Examples
///
/// ```
/// use vc_bean::derive::Bean;
/// use vc_bean::registry::Introspector;
///
/// #[derive(Bean)]
/// struct Foo {
///     pub id: u32,
///     secret: u32,
/// }
///
/// let introspector = Introspector::new();
/// let foo = introspector.lookup_type::<Foo>();
///
/// assert!(foo.member("id", false).is_some());
/// assert!(foo.member("secret", false).is_none());
/// assert!(foo.member("secret", true).is_some());
/// assert_eq!(introspector.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Introspector {
    cache: Arc<RwLock<TypeIdMap<Arc<TypeDescriptor>>>>,
}

impl Introspector {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the descriptor of the given type, describing it on first use.
    pub fn lookup(&self, info: &'static TypeInfo) -> Arc<TypeDescriptor> {
        let type_id = info.type_id();

        if let Some(descriptor) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return Arc::clone(descriptor);
        }

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let descriptor = cache.entry(type_id).or_insert_with(|| {
            log::debug!("describing `{}`", info.type_path());
            Arc::new(TypeDescriptor::new(info))
        });
        Arc::clone(descriptor)
    }

    #[inline]
    pub fn lookup_type<T: Typed>(&self) -> Arc<TypeDescriptor> {
        self.lookup(T::type_info())
    }

    /// Returns the descriptor of the runtime type of `value`.
    #[inline]
    pub fn describe(&self, value: &dyn Reflect) -> Arc<TypeDescriptor> {
        self.lookup(value.reflect_type_info())
    }

    pub fn contains(&self, info: &'static TypeInfo) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&info.type_id())
    }

    /// The number of described types.
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached descriptor.
    pub fn clear(&self) {
        self.cache.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl core::fmt::Debug for Introspector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Introspector")
            .field("len", &self.len())
            .finish()
    }
}
