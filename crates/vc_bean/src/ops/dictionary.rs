use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::Reflect;
use crate::info::{DictionaryInfo, NonGenericTypeInfoCell, TypeInfo, Typed};
use crate::ops::{AssignError, ReflectCloneError};
use crate::utils::{FixedHashMap, new_fixed_map};

// -----------------------------------------------------------------------------
// Dictionary

/// Type-erased access to a string-keyed associative container.
///
/// A present key may hold a null value, so [`get`](Dictionary::get)
/// returning `None` does not imply that the key is missing. Use
/// [`contains_key`](Dictionary::contains_key) for existence checks.
pub trait Dictionary: Reflect {
    fn contains_key(&self, key: &str) -> bool;

    /// Returns the value stored at `key`, `None` if missing or null.
    fn get(&self, key: &str) -> Option<&dyn Reflect>;

    /// Returns the value stored at `key` mutably, `None` if missing or null.
    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect>;

    /// Inserts or overwrites the value at `key`. `None` stores null.
    fn insert(&mut self, key: &str, value: Option<Box<dyn Reflect>>) -> Result<(), AssignError>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the keys in iteration order.
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// The declared type of the values, `None` for untyped dictionaries.
    fn value_info(&self) -> Option<&'static TypeInfo> {
        self.reflect_type_info()
            .as_dictionary()
            .ok()
            .and_then(DictionaryInfo::value_info)
    }
}

/// Formats a dictionary like a map.
pub fn dictionary_debug(data: &dyn Dictionary, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_map();
    for key in data.keys() {
        debug.entry(&key, &data.get(key));
    }
    debug.finish()
}

// -----------------------------------------------------------------------------
// DynamicMap

/// An untyped dictionary keeping insertion order.
///
/// Values may be of any reflected type, or null.
///
/// # Examples
///
/// ```
/// use vc_bean::ops::{Dictionary, DynamicMap};
///
/// let mut map = DynamicMap::new();
/// map.insert("a", 1_i32);
/// map.insert("b", String::from("two"));
/// map.insert_null("c");
///
/// assert_eq!(map.len(), 3);
/// assert!(map.contains_key("c"));
/// assert!(Dictionary::get(&map, "c").is_none());
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
/// ```
#[derive(Default)]
pub struct DynamicMap {
    entries: Vec<(String, Option<Box<dyn Reflect>>)>,
    indices: FixedHashMap<String, usize>,
}

impl DynamicMap {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            indices: new_fixed_map(),
        }
    }

    /// Inserts or overwrites a value, keeping the original position of an
    /// existing key.
    #[inline]
    pub fn insert<T: Reflect>(&mut self, key: impl Into<String>, value: T) {
        self.insert_boxed(key, Some(Box::new(value)));
    }

    /// Stores a null value at `key`.
    #[inline]
    pub fn insert_null(&mut self, key: impl Into<String>) {
        self.insert_boxed(key, None);
    }

    pub fn insert_boxed(&mut self, key: impl Into<String>, value: Option<Box<dyn Reflect>>) {
        let key: String = key.into();
        if let Some(&index) = self.indices.get(&key) {
            self.entries[index].1 = value;
        } else {
            self.indices.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }

    /// Removes the entry at `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Option<Box<dyn Reflect>>> {
        let index = self.indices.remove(key)?;
        let (_, value) = self.entries.remove(index);
        for slot in self.indices.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(value)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&dyn Reflect>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    fn entry(&self, key: &str) -> Option<&Option<Box<dyn Reflect>>> {
        self.indices.get(key).map(|&index| &self.entries[index].1)
    }
}

impl Typed for DynamicMap {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::Dictionary(DictionaryInfo::untyped::<Self>().with_default::<Self>())
        })
    }
}

impl Reflect for DynamicMap {
    crate::impl_reflect_cast_fn!(Dictionary);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let mut map = DynamicMap::new();
        for (key, value) in &self.entries {
            let value = match value {
                Some(value) => Some(value.reflect_clone()?),
                None => None,
            };
            map.insert_boxed(key.clone(), value);
        }
        Ok(Box::new(map))
    }
}

impl Dictionary for DynamicMap {
    #[inline]
    fn contains_key(&self, key: &str) -> bool {
        self.indices.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        self.entry(key)?.as_deref()
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
        let index = *self.indices.get(key)?;
        self.entries[index].1.as_deref_mut()
    }

    fn insert(&mut self, key: &str, value: Option<Box<dyn Reflect>>) -> Result<(), AssignError> {
        self.insert_boxed(key, value);
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.entries.iter().map(|(key, _)| key.as_str()))
    }
}

impl fmt::Debug for DynamicMap {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dictionary_debug(self, f)
    }
}

impl<K: Into<String>> FromIterator<(K, Option<Box<dyn Reflect>>)> for DynamicMap {
    fn from_iter<T: IntoIterator<Item = (K, Option<Box<dyn Reflect>>)>>(entries: T) -> Self {
        let mut map = DynamicMap::new();
        for (key, value) in entries {
            map.insert_boxed(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::DynamicMap;
    use crate::Reflect;
    use crate::ops::Dictionary;

    #[test]
    fn keeps_insertion_order() {
        let mut map = DynamicMap::new();
        map.insert("z", 1_i32);
        map.insert("a", 2_i32);
        map.insert("z", 3_i32);

        assert_eq!(map.keys().collect::<Vec<_>>(), ["z", "a"]);
        assert_eq!(
            Dictionary::get(&map, "z").and_then(|v| v.downcast_ref::<i32>()),
            Some(&3)
        );
    }

    #[test]
    fn remove_shifts_indices() {
        let mut map = DynamicMap::new();
        map.insert("a", 1_i32);
        map.insert("b", 2_i32);
        map.insert("c", 3_i32);

        assert!(map.remove("a").is_some());
        assert!(map.remove("a").is_none());
        assert_eq!(
            Dictionary::get(&map, "c").and_then(|v| v.downcast_ref::<i32>()),
            Some(&3)
        );
    }

    #[test]
    fn null_entries() {
        let mut map = DynamicMap::new();
        map.insert_null("gone");
        assert!(map.contains_key("gone"));
        assert!(Dictionary::get(&map, "gone").is_none());
        assert!(!map.contains_key("other"));

        Dictionary::insert(&mut map, "gone", Some(String::from("back").into_boxed_reflect()))
            .unwrap();
        assert_eq!(
            Dictionary::get(&map, "gone").and_then(|v| v.downcast_ref::<String>()),
            Some(&String::from("back"))
        );
    }

    #[test]
    fn clone_is_deep() {
        let mut map = DynamicMap::new();
        map.insert("a", String::from("x"));
        map.insert_null("b");

        let cloned = map.reflect_clone().unwrap().take::<DynamicMap>().unwrap();
        assert_eq!(cloned.len(), 2);
        assert!(cloned.contains_key("b"));
    }
}
