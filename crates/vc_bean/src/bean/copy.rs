use alloc::boxed::Box;

use crate::Reflect;
use crate::bean::container::resolve_optional;
use crate::bean::{BeanError, BeanUtil, BeanVisitor, PropertyContext};
use crate::info::ReflectKind;
use crate::registry::{Introspector, PropertyValue};

type NameFilter<'a> = Box<dyn Fn(&str) -> bool + 'a>;
type ValueFilter<'a> = Box<dyn Fn(&str, Option<&dyn Reflect>) -> bool + 'a>;

/// Copies the top-level properties of a source into a destination.
///
/// Properties are enumerated and read with a [`BeanVisitor`], cloned, and
/// written with a silent [`BeanUtil`]: a property the destination does not
/// have is skipped. Property names are paths into a record destination and
/// plain keys into a dictionary destination. Values are not converted.
///
/// # Examples
///
/// ```
/// use vc_bean::bean::BeanCopy;
/// use vc_bean::derive::Bean;
/// use vc_bean::ops::DynamicMap;
/// use vc_bean::registry::Introspector;
///
/// #[derive(Bean, Default)]
/// struct Pair {
///     pub a: i32,
///     pub b: i32,
/// }
///
/// let mut source = DynamicMap::new();
/// source.insert("a", 1_i32);
/// source.insert("b", 2_i32);
/// source.insert("c", 3_i32);
///
/// let mut pair = Pair::default();
/// BeanCopy::new(&Introspector::new(), &source, &mut pair).copy().unwrap();
///
/// assert_eq!((pair.a, pair.b), (1, 2));
/// ```
pub struct BeanCopy<'a> {
    introspector: Introspector,
    source: &'a dyn Reflect,
    destination: &'a mut dyn Reflect,
    declared: bool,
    forced: bool,
    include_fields: bool,
    ignore_nulls: bool,
    filter: Option<NameFilter<'a>>,
    filter_value: Option<ValueFilter<'a>>,
}

impl<'a> BeanCopy<'a> {
    pub fn new(introspector: &Introspector, source: &'a dyn Reflect, destination: &'a mut dyn Reflect) -> Self {
        Self {
            introspector: introspector.clone(),
            source,
            destination,
            declared: false,
            forced: false,
            include_fields: false,
            ignore_nulls: false,
            filter: None,
            filter_value: None,
        }
    }

    /// Reads and writes private members too.
    #[inline]
    pub fn declared(mut self, declared: bool) -> Self {
        self.declared = declared;
        self
    }

    /// Creates missing intermediates in the destination.
    #[inline]
    pub fn forced(mut self, forced: bool) -> Self {
        self.forced = forced;
        self
    }

    #[inline]
    pub fn include_fields(mut self, include_fields: bool) -> Self {
        self.include_fields = include_fields;
        self
    }

    #[inline]
    pub fn ignore_nulls(mut self, ignore_nulls: bool) -> Self {
        self.ignore_nulls = ignore_nulls;
        self
    }

    /// Copies only the properties whose name is accepted.
    pub fn filter(mut self, filter: impl Fn(&str) -> bool + 'a) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Copies only the properties whose name and value are accepted.
    pub fn filter_value(mut self, filter: impl Fn(&str, Option<&dyn Reflect>) -> bool + 'a) -> Self {
        self.filter_value = Some(Box::new(filter));
        self
    }

    pub fn copy(self) -> Result<(), BeanError> {
        let Self {
            introspector,
            source,
            destination,
            declared,
            forced,
            include_fields,
            ignore_nulls,
            filter,
            filter_value,
        } = self;

        let keyed = resolve_optional(PropertyValue::Borrowed(&*destination))
            .is_some_and(|value| value.reflect_kind() == ReflectKind::Dictionary);
        let writer = BeanUtil::new(introspector.clone())
            .declared(declared)
            .forced(forced)
            .silent(true);

        BeanVisitor::new(&introspector, source)
            .declared(declared)
            .include_fields(include_fields)
            .ignore_nulls(ignore_nulls)
            .visit(|name, value| {
                if filter.as_ref().is_some_and(|filter| !filter(name)) {
                    return Ok(());
                }
                if filter_value.as_ref().is_some_and(|filter| !filter(name, value)) {
                    return Ok(());
                }

                let value = value
                    .map(|value| value.reflect_clone())
                    .transpose()
                    .map_err(|err| BeanError::InvokeProperty {
                        context: PropertyContext::whole(name),
                        source: err.into(),
                    })?;
                writer.set_entry(&mut *destination, name, keyed, value)
            })
    }
}

impl core::fmt::Debug for BeanCopy<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BeanCopy")
            .field("source", &self.source.reflect_type_path())
            .field("destination", &self.destination.reflect_type_path())
            .field("declared", &self.declared)
            .field("forced", &self.forced)
            .field("include_fields", &self.include_fields)
            .finish_non_exhaustive()
    }
}
