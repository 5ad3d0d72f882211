use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::bean::container::resolve_container;
use crate::bean::{BeanError, BeanUtil};
use crate::ops::ReflectRef;
use crate::registry::{Introspector, MemberDescriptor, PropertyValue};

/// Enumerates the top-level properties of a value and streams them with
/// their values.
///
/// Dictionary sources yield their keys verbatim. Record sources yield the
/// members with a visible getter and, with `include_fields`, the members
/// that only expose a visible raw field. Supplier sources are unwrapped
/// first.
///
/// # Examples
///
/// ```
/// use vc_bean::bean::BeanVisitor;
/// use vc_bean::ops::DynamicMap;
/// use vc_bean::registry::Introspector;
///
/// let mut map = DynamicMap::new();
/// map.insert("a", 1_i32);
/// map.insert_null("b");
/// map.insert("c", String::new());
///
/// let introspector = Introspector::new();
/// let mut seen = Vec::new();
/// BeanVisitor::new(&introspector, &map)
///     .ignore_nulls(true)
///     .ignore_empty_string(true)
///     .visit(|name, _| {
///         seen.push(name.to_owned());
///         Ok(())
///     })
///     .unwrap();
///
/// assert_eq!(seen, ["a"]);
/// ```
#[derive(Clone)]
pub struct BeanVisitor<'a> {
    introspector: Introspector,
    source: &'a dyn Reflect,
    declared: bool,
    include_fields: bool,
    ignore_nulls: bool,
    ignore_empty_string: bool,
}

impl<'a> BeanVisitor<'a> {
    pub fn new(introspector: &Introspector, source: &'a dyn Reflect) -> Self {
        Self {
            introspector: introspector.clone(),
            source,
            declared: false,
            include_fields: false,
            ignore_nulls: false,
            ignore_empty_string: false,
        }
    }

    #[inline]
    pub fn declared(mut self, declared: bool) -> Self {
        self.declared = declared;
        self
    }

    /// Also enumerate members that have a raw field but no visible getter.
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

    #[inline]
    pub fn ignore_empty_string(mut self, ignore_empty_string: bool) -> Self {
        self.ignore_empty_string = ignore_empty_string;
        self
    }

    /// The property names `visit` would read, in order.
    pub fn property_names(&self) -> Vec<String> {
        match resolve_container(PropertyValue::Borrowed(self.source)) {
            Some(source) => self.enumerate(&*source).0,
            None => Vec::new(),
        }
    }

    /// Reads every enumerated property and hands it to `consumer`, stopping
    /// at the first error.
    pub fn visit<F>(&self, mut consumer: F) -> Result<(), BeanError>
    where
        F: FnMut(&str, Option<&dyn Reflect>) -> Result<(), BeanError>,
    {
        let Some(source) = resolve_container(PropertyValue::Borrowed(self.source)) else {
            return Ok(());
        };
        let (names, keyed) = self.enumerate(&*source);
        let beans = BeanUtil::new(self.introspector.clone()).declared(self.declared);

        for name in &names {
            beans.with_entry(&*source, name, keyed, |value| {
                if self.ignore_nulls && value.is_none() {
                    return Ok(());
                }
                if self.ignore_empty_string && value.is_some_and(is_empty_string) {
                    return Ok(());
                }
                consumer(name, value)
            })??;
        }
        Ok(())
    }

    /// Returns the names and whether they are dictionary keys.
    fn enumerate(&self, source: &dyn Reflect) -> (Vec<String>, bool) {
        if let ReflectRef::Dictionary(dictionary) = source.reflect_ref() {
            return (dictionary.keys().map(String::from).collect(), true);
        }

        let descriptor = self.introspector.describe(source);
        let names = descriptor
            .members()
            .iter()
            .filter(|member| self.is_enumerated(member))
            .map(|member| String::from(member.name()))
            .collect();
        (names, false)
    }

    fn is_enumerated(&self, member: &MemberDescriptor) -> bool {
        match member.info().getter() {
            Some(getter) if getter.visibility.is_visible(self.declared) => true,
            _ => self.include_fields && member.field(self.declared),
        }
    }
}

fn is_empty_string(value: &dyn Reflect) -> bool {
    if let Some(text) = value.downcast_ref::<String>() {
        return text.is_empty();
    }
    value.downcast_ref::<&'static str>().is_some_and(|text| text.is_empty())
}

impl core::fmt::Debug for BeanVisitor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BeanVisitor")
            .field("source", &self.source.reflect_type_path())
            .field("declared", &self.declared)
            .field("include_fields", &self.include_fields)
            .field("ignore_nulls", &self.ignore_nulls)
            .field("ignore_empty_string", &self.ignore_empty_string)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::BeanVisitor;
    use crate::ops::{DynamicMap, Supplier};
    use crate::registry::Introspector;

    #[test]
    fn dictionary_keys_in_order() {
        let mut map = DynamicMap::new();
        map.insert("z", 1_u8);
        map.insert("a.b", 2_u8);

        let introspector = Introspector::new();
        let visitor = BeanVisitor::new(&introspector, &map);
        assert_eq!(visitor.property_names(), ["z", "a.b"]);

        let mut values = Vec::new();
        visitor
            .visit(|name, value| {
                let value = value.and_then(|value| value.downcast_ref::<u8>()).copied();
                values.push((String::from(name), value));
                Ok(())
            })
            .unwrap();
        assert_eq!(values, [(String::from("z"), Some(1)), (String::from("a.b"), Some(2))]);
    }

    #[test]
    fn nulls_are_delivered_unless_ignored() {
        let mut map = DynamicMap::new();
        map.insert_null("n");
        map.insert("s", String::new());

        let introspector = Introspector::new();
        let mut count = 0;
        BeanVisitor::new(&introspector, &map)
            .visit(|_, _| {
                count += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 2);

        BeanVisitor::new(&introspector, &map)
            .ignore_nulls(true)
            .visit(|name, value| {
                assert!(value.is_some(), "`{name}` is null");
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn suppliers_are_unwrapped() {
        let supplier = Supplier::new(|| {
            let mut map = DynamicMap::new();
            map.insert("lazy", true);
            map
        });

        let introspector = Introspector::new();
        assert_eq!(BeanVisitor::new(&introspector, &supplier).property_names(), ["lazy"]);
        assert!(BeanVisitor::new(&introspector, &None::<DynamicMap>).property_names().is_empty());
    }
}
