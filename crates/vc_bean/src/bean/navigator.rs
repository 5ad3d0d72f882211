use alloc::borrow::Cow;
use alloc::boxed::Box;

use crate::Reflect;
use crate::access::{self, IndexKey, OffsetSegment, PropertyPath, Segment};
use crate::bean::container::{AdapterError, Container, ContainerMut};
use crate::bean::container::{resolve_container, resolve_optional, resolve_optional_mut};
use crate::bean::cursor::{BeanProperty, PathStep, Step, parse_steps};
use crate::bean::{BeanError, PropertyContext};
use crate::impls::clone_value;
use crate::info::{TypeInfo, Typed};
use crate::ops::ReflectRef;
use crate::registry::{Introspector, PropertyValue};

/// A failed read, handing the unused consumer back for silent recovery.
struct Failed<F> {
    error: BeanError,
    sink: F,
}

// -----------------------------------------------------------------------------
// BeanUtil

/// Reads, writes and checks properties by path.
///
/// The three flags select the navigation policy:
///
/// - `declared`: private members are visible, not only public ones.
/// - `forced`: writes create missing or null intermediates with their
///   default constructor instead of failing.
/// - `silent`: a [`PropertyNotFound`](BeanError::PropertyNotFound) error
///   turns into "no value" for reads and into a no-op for writes.
///
/// A `BeanUtil` is cheap to clone and holds no state between calls beyond
/// the shared [`Introspector`] cache.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use vc_bean::bean::BeanUtil;
/// use vc_bean::derive::Bean;
/// use vc_bean::registry::Introspector;
///
/// #[derive(Bean, Default)]
/// struct Inventory {
///     pub items: Vec<String>,
///     pub prices: HashMap<String, u32>,
/// }
///
/// let beans = BeanUtil::new(Introspector::new());
/// let mut inventory = Inventory::default();
/// inventory.items.push("apple".into());
///
/// beans.set_property(&mut inventory, "prices[apple]", 3_u32).unwrap();
/// beans.set_property(&mut inventory, "items[0]", String::from("pear")).unwrap();
///
/// assert_eq!(beans.get_property_as::<u32>(&inventory, "prices[apple]").unwrap(), Some(3));
/// assert_eq!(inventory.items, ["pear"]);
///
/// let err = beans.get_property(&inventory, "items[4]").unwrap_err();
/// assert!(err.is_not_found());
/// assert!(!beans.has_property(&inventory, "items[0]"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BeanUtil {
    introspector: Introspector,
    declared: bool,
    forced: bool,
    silent: bool,
}

impl BeanUtil {
    /// A public, non-forced, non-silent navigator.
    #[inline]
    pub fn new(introspector: Introspector) -> Self {
        Self {
            introspector,
            declared: false,
            forced: false,
            silent: false,
        }
    }

    /// Same as [`new`](Self::new).
    #[inline]
    pub fn pojo(introspector: Introspector) -> Self {
        Self::new(introspector)
    }

    #[inline]
    pub fn declared(mut self, declared: bool) -> Self {
        self.declared = declared;
        self
    }

    #[inline]
    pub fn forced(mut self, forced: bool) -> Self {
        self.forced = forced;
        self
    }

    #[inline]
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    #[inline]
    pub fn is_declared(&self) -> bool {
        self.declared
    }

    #[inline]
    pub fn is_forced(&self) -> bool {
        self.forced
    }

    #[inline]
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    #[inline]
    pub fn introspector(&self) -> &Introspector {
        &self.introspector
    }

    /// Returns the member name of the first segment of `path`.
    #[inline]
    pub fn extract_this_reference<'p>(&self, path: &'p str) -> &'p str {
        access::extract_this_reference(path)
    }

    // -------------------------------------------------------------------------
    // Reads

    /// Resolves `path` and hands the value to `f`, `None` being null.
    ///
    /// Intermediates produced as temporaries, by suppliers or method
    /// getters, live for the duration of the call.
    pub fn with_property<R>(
        &self,
        bean: &dyn Reflect,
        path: &str,
        f: impl FnOnce(Option<&dyn Reflect>) -> R,
    ) -> Result<R, BeanError> {
        let steps = parse_steps(path)?;
        self.with_steps(bean, path, &steps, |value, _| f(value))
    }

    /// Returns a clone of the value at `path`.
    pub fn get_property(&self, bean: &dyn Reflect, path: &str) -> Result<Option<Box<dyn Reflect>>, BeanError> {
        self.with_property(bean, path, |value| value.map(|value| value.reflect_clone()).transpose())?
            .map_err(|err| BeanError::InvokeProperty {
                context: PropertyContext::whole(path),
                source: err.into(),
            })
    }

    /// Returns a clone of the value at `path` as a `T`.
    pub fn get_property_as<T: Reflect + Typed>(&self, bean: &dyn Reflect, path: &str) -> Result<Option<T>, BeanError> {
        self.with_property(bean, path, |value| downcast_clone::<T>(value, path))?
    }

    /// Returns a clone of the member `name`, without path parsing.
    pub fn get_simple_property(&self, bean: &dyn Reflect, name: &str) -> Result<Option<Box<dyn Reflect>>, BeanError> {
        let steps = simple_steps(name)?;
        self.with_steps(bean, name, &steps, |value, _| {
            value.map(|value| value.reflect_clone()).transpose()
        })?
        .map_err(|err| BeanError::InvokeProperty {
            context: PropertyContext::whole(name),
            source: err.into(),
        })
    }

    /// Returns the runtime type of the value at `path`, or its declared type
    /// when the value is null.
    pub fn get_property_type(&self, bean: &dyn Reflect, path: &str) -> Result<Option<&'static TypeInfo>, BeanError> {
        let steps = parse_steps(path)?;
        self.with_steps(bean, path, &steps, |value, declared| match value {
            Some(value) => Some(value.reflect_type_info()),
            None => declared.map(TypeInfo::unwrap_optional),
        })
    }

    /// Reads the entry `key` of a dictionary-like `bean`, or the member `key`
    /// of a record.
    pub(crate) fn with_entry<R>(
        &self,
        bean: &dyn Reflect,
        key: &str,
        keyed: bool,
        f: impl FnOnce(Option<&dyn Reflect>) -> R,
    ) -> Result<R, BeanError> {
        if keyed {
            let path = alloc::format!("[{key}]");
            let steps = [keyed_step(key)];
            self.with_steps(bean, &path, &steps, |value, _| f(value))
        } else {
            let steps = simple_steps(key)?;
            self.with_steps(bean, key, &steps, |value, _| f(value))
        }
    }

    fn with_steps<'p, R, F>(&self, bean: &dyn Reflect, path: &'p str, steps: &[PathStep<'p>], f: F) -> Result<R, BeanError>
    where
        F: FnOnce(Option<&dyn Reflect>, Option<&'static TypeInfo>) -> R,
    {
        let mut cursor = BeanProperty::new(path, steps, self.declared, self.forced);
        cursor.set_declared_type(Some(bean.reflect_type_info()));

        match self.read(&mut cursor, Some(PropertyValue::Borrowed(bean)), steps, f) {
            Ok(value) => Ok(value),
            Err(Failed { error, sink }) if self.silent && error.is_not_found() => {
                log::debug!("silent read: {error}");
                Ok(sink(None, None))
            }
            Err(Failed { error, .. }) => Err(error),
        }
    }

    fn read<'p, R, F>(
        &self,
        cursor: &mut BeanProperty<'p>,
        current: Option<PropertyValue<'_>>,
        steps: &[PathStep<'p>],
        f: F,
    ) -> Result<R, Failed<F>>
    where
        F: FnOnce(Option<&dyn Reflect>, Option<&'static TypeInfo>) -> R,
    {
        let Some((step, rest)) = steps.split_first() else {
            let value = current.and_then(resolve_optional);
            return Ok(f(value.as_deref(), cursor.declared_type()));
        };

        let Some(container) = current.and_then(resolve_container) else {
            let error = self.null_error(cursor, step);
            return Err(Failed { error, sink: f });
        };

        cursor.enter(step, container.reflect_type_info());
        let child = match Container::classify(&*container).get(&self.introspector, cursor, step.step) {
            Ok(child) => child,
            Err(error) => {
                let error = cursor.error(error);
                return Err(Failed { error, sink: f });
            }
        };

        self.read(cursor, child, rest, f)
    }

    /// The error for a null intermediate followed by `next`.
    ///
    /// A member step that the declared type of the null value cannot have is
    /// reported as not found.
    fn null_error(&self, cursor: &BeanProperty<'_>, next: &PathStep<'_>) -> BeanError {
        if let Step::Member(name) = next.step
            && let Some(declared) = cursor.declared_type()
        {
            let descriptor = self.introspector.lookup(declared.unwrap_declared());
            if descriptor.is_record_like() && descriptor.member(name, self.declared).is_none() {
                return BeanError::PropertyNotFound {
                    context: cursor.context_at(next, Some(descriptor.type_info())),
                };
            }
        }
        BeanError::NullProperty {
            context: cursor.context(),
        }
    }

    // -------------------------------------------------------------------------
    // Writes

    /// Writes `value` at `path`.
    #[inline]
    pub fn set_property<T: Reflect>(&self, bean: &mut dyn Reflect, path: &str, value: T) -> Result<(), BeanError> {
        self.set_property_boxed(bean, path, Some(Box::new(value)))
    }

    /// Writes `value` at `path`, `None` being null.
    pub fn set_property_boxed(
        &self,
        bean: &mut dyn Reflect,
        path: &str,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), BeanError> {
        let steps = parse_steps(path)?;
        self.set_steps(bean, path, &steps, value)
    }

    /// Writes `value` into the member `name`, without path parsing.
    #[inline]
    pub fn set_simple_property<T: Reflect>(&self, bean: &mut dyn Reflect, name: &str, value: T) -> Result<(), BeanError> {
        let steps = simple_steps(name)?;
        self.set_steps(bean, name, &steps, Some(Box::new(value)))
    }

    /// Writes into the entry `key` of a dictionary-like `bean`, or follows
    /// `key` as a path otherwise.
    pub(crate) fn set_entry(
        &self,
        bean: &mut dyn Reflect,
        key: &str,
        keyed: bool,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), BeanError> {
        if keyed {
            let path = alloc::format!("[{key}]");
            self.set_steps(bean, &path, &[keyed_step(key)], value)
        } else {
            self.set_property_boxed(bean, key, value)
        }
    }

    fn set_steps<'p>(
        &self,
        bean: &mut dyn Reflect,
        path: &'p str,
        steps: &[PathStep<'p>],
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), BeanError> {
        let mut cursor = BeanProperty::new(path, steps, self.declared, self.forced);
        match self.write(&mut cursor, bean, steps, value) {
            Err(error) if self.silent && error.is_not_found() => {
                log::debug!("silent write: {error}");
                Ok(())
            }
            other => other,
        }
    }

    fn write<'p>(
        &self,
        cursor: &mut BeanProperty<'p>,
        bean: &mut dyn Reflect,
        steps: &[PathStep<'p>],
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), BeanError> {
        let Some((last, init)) = steps.split_last() else {
            return Ok(());
        };

        cursor.set_declared_type(Some(bean.reflect_type_info()));
        let Some(mut current) = resolve_optional_mut(bean) else {
            return Err(self.null_error(cursor, init.first().unwrap_or(last)));
        };

        for (position, step) in init.iter().enumerate() {
            cursor.enter(step, current.reflect_type_info());
            current = match ContainerMut::classify(current).descend(&self.introspector, cursor, step.step) {
                Ok(child) => child,
                Err(AdapterError::Null) => {
                    let next = steps.get(position + 1).unwrap_or(last);
                    return Err(self.null_error(cursor, next));
                }
                Err(error) => return Err(cursor.error(error)),
            };
        }

        cursor.enter(last, current.reflect_type_info());
        ContainerMut::classify(current)
            .assign(&self.introspector, cursor, last.step, value)
            .map_err(|error| cursor.error(error))
    }

    // -------------------------------------------------------------------------
    // Existence

    /// Checks `path` against declared types only.
    ///
    /// Intermediate values are never read, so the check succeeds through
    /// null members. Index and key segments are never resolved and yield
    /// `false`. A dictionary root is the exception: a plain first name is
    /// checked as a key for existence. Never fails; malformed paths yield
    /// `false`.
    pub fn has_property(&self, bean: &dyn Reflect, path: &str) -> bool {
        match PropertyPath::parse(path) {
            Ok(path) => self.has_segments(bean, path.iter().map(|segment| segment.segment)),
            Err(_) => false,
        }
    }

    /// Checks the first segment of `path` only.
    #[inline]
    pub fn has_root_property(&self, bean: &dyn Reflect, path: &str) -> bool {
        self.has_simple_property(bean, access::extract_this_reference(path))
    }

    /// Checks the single member `name`, without path parsing.
    pub fn has_simple_property(&self, bean: &dyn Reflect, name: &str) -> bool {
        !name.is_empty() && self.has_segments(bean, core::iter::once(Segment::Name(name)))
    }

    fn has_segments<'s>(&self, bean: &dyn Reflect, mut segments: impl Iterator<Item = Segment<'s>>) -> bool {
        let mut info = bean.reflect_type_info().unwrap_declared();

        if let Some(root) = resolve_optional(PropertyValue::Borrowed(bean))
            && let ReflectRef::Dictionary(dictionary) = root.reflect_ref()
        {
            let Some(Segment::Name(key)) = segments.next() else {
                return false;
            };
            if !dictionary.contains_key(key) {
                return false;
            }
            match dictionary.value_info() {
                Some(value_info) => info = value_info.unwrap_declared(),
                None => return segments.next().is_none(),
            }
        }

        for segment in segments {
            let Segment::Name(name) = segment else {
                return false;
            };
            let descriptor = self.introspector.lookup(info);
            if !descriptor.is_record_like() {
                return false;
            }
            let Some(member) = descriptor.member(name, self.declared) else {
                return false;
            };
            info = member.declared_type().unwrap_declared();
        }
        true
    }
}

fn simple_steps(name: &str) -> Result<[PathStep<'_>; 1], BeanError> {
    if name.is_empty() {
        return Err(BeanError::InvalidProperty {
            context: PropertyContext::whole(name),
            reason: Cow::Borrowed("empty property name"),
        });
    }
    Ok([PathStep {
        step: Step::Member(name),
        segment: OffsetSegment {
            segment: Segment::Name(name),
            offset: 0,
        },
    }])
}

fn keyed_step(key: &str) -> PathStep<'_> {
    let key = IndexKey::Key(key);
    PathStep {
        step: Step::Index(key),
        segment: OffsetSegment {
            segment: Segment::Key(key),
            offset: 0,
        },
    }
}

fn downcast_clone<T: Reflect + Typed>(value: Option<&dyn Reflect>, path: &str) -> Result<Option<T>, BeanError> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.downcast_ref::<T>() {
        Some(value) => clone_value(value)
            .map(Some)
            .map_err(|err| BeanError::InvokeProperty {
                context: PropertyContext::whole(path),
                source: err.into(),
            }),
        None => Err(BeanError::InvalidDowncast {
            context: PropertyContext::whole(path),
            expected: T::type_info().type_path(),
            found: value.reflect_type_path(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use super::BeanUtil;
    use crate::info::Typed;
    use crate::ops::{DynamicMap, Supplier};
    use crate::registry::Introspector;

    fn beans() -> BeanUtil {
        BeanUtil::new(Introspector::new())
    }

    #[test]
    fn sequences() {
        let beans = beans();
        let mut list: Vec<Option<u8>> = vec![Some(1), None];

        assert_eq!(beans.get_property_as::<u8>(&list, "[0]").unwrap(), Some(1));
        assert_eq!(beans.get_property_as::<u8>(&list, "[1]").unwrap(), None);
        assert!(beans.get_property(&list, "[2]").unwrap_err().is_not_found());
        assert!(beans.get_property(&list, "[x]").unwrap_err().is_invalid());

        beans.set_property(&mut list, "[1]", 5_u8).unwrap();
        assert_eq!(list, [Some(1), Some(5)]);
        assert!(beans.set_property(&mut list, "[3]", 5_u8).unwrap_err().is_not_found());

        beans.clone().forced(true).set_property(&mut list, "[3]", 9_u8).unwrap();
        assert_eq!(list, [Some(1), Some(5), None, Some(9)]);
    }

    #[test]
    fn fixed_arrays_do_not_grow() {
        let beans = beans().forced(true);
        let mut array = [1_u8, 2];

        beans.set_property(&mut array, "[1]", 7_u8).unwrap();
        assert_eq!(array, [1, 7]);
        assert!(beans.set_property(&mut array, "[2]", 7_u8).unwrap_err().is_forced());
    }

    #[test]
    fn dictionaries() {
        let beans = beans();
        let mut map: HashMap<String, Vec<u8>> = HashMap::new();

        beans.set_property(&mut map, "a", vec![1_u8]).unwrap();
        beans.set_property(&mut map, "[b.c]", vec![2_u8]).unwrap();
        assert_eq!(beans.get_property_as::<u8>(&map, "a[0]").unwrap(), Some(1));
        assert!(beans.get_property_as::<u8>(&map, "[b.c][0]").unwrap_err().is_invalid());
        assert_eq!(map.len(), 2);
        assert!(beans.get_property(&map, "missing").unwrap_err().is_not_found());
        assert!(beans.set_property(&mut map, "missing[0]", 1_u8).unwrap_err().is_not_found());

        beans.clone().forced(true).set_property(&mut map, "fresh[2]", 3_u8).unwrap();
        assert_eq!(map["fresh"], [0, 0, 3]);
    }

    #[test]
    fn untyped_dictionaries_nest() {
        let beans = beans().forced(true);
        let mut map = DynamicMap::new();
        map.insert_null("empty");

        beans.set_property(&mut map, "outer.inner", 1_i32).unwrap();
        beans.set_property(&mut map, "empty.x", true).unwrap();

        assert_eq!(beans.get_property_as::<i32>(&map, "outer.inner").unwrap(), Some(1));
        assert_eq!(beans.get_property_as::<bool>(&map, "[empty].x").unwrap(), Some(true));
        assert!(beans.get_property(&map, "outer").unwrap().unwrap().is::<DynamicMap>());
    }

    #[test]
    fn typed_reads() {
        let beans = beans();
        let map: HashMap<String, u8> = HashMap::from([(String::from("k"), 1)]);

        let err = beans.get_property_as::<u16>(&map, "k").unwrap_err();
        assert!(matches!(err, super::BeanError::InvalidDowncast { expected: "u16", .. }));
        assert_eq!(
            beans.get_property_type(&map, "k").unwrap().map(|info| info.type_id()),
            Some(u8::type_info().type_id())
        );
    }

    #[test]
    fn silent_mode() {
        let beans = beans().silent(true);
        let mut map: HashMap<String, u8> = HashMap::new();

        assert!(beans.get_property(&map, "nope").unwrap().is_none());
        assert!(beans.set_property(&mut map, "nope[1]", 1_u8).is_ok());
        assert!(map.is_empty());
        assert!(beans.get_property(&map, "a..b").unwrap_err().is_invalid());
    }

    #[test]
    fn suppliers_are_read_only() {
        let beans = beans();
        let mut supplier = Supplier::new(|| vec![4_u8, 5]);

        assert_eq!(beans.get_property_as::<u8>(&supplier, "[1]").unwrap(), Some(5));
        assert!(beans.get_property(&supplier, "[0]").unwrap().is_some());
        assert!(beans.set_property(&mut supplier, "[0]", 1_u8).unwrap_err().is_invalid());
    }

    #[test]
    fn null_roots() {
        let beans = beans();
        let mut root: Option<Vec<u8>> = None;

        assert!(beans.get_property(&root, "[0]").unwrap_err().is_null());
        assert!(
            beans
                .set_property_boxed(&mut root, "[0]", Some(Box::new(1_u8)))
                .unwrap_err()
                .is_null()
        );
    }

    #[test]
    fn has_on_containers() {
        let beans = beans();
        let mut map: HashMap<String, Vec<u8>> = HashMap::new();
        map.insert(String::from("a"), vec![1]);

        assert!(beans.has_property(&map, "a"));
        assert!(!beans.has_property(&map, "[a]"));
        assert!(!beans.has_property(&map, "b"));
        assert!(!beans.has_property(&map, "a[0]"));
        assert!(!beans.has_property(&map, "a.len"));
        assert!(!beans.has_property(&map, ""));
        assert!(beans.has_simple_property(&map, "a"));
        assert!(beans.has_root_property(&map, "a[0].x"));
        assert!(!beans.has_simple_property(&map, ""));
    }
}
