use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::hash::BuildHasher;
use std::collections::HashMap;

use hashbrown::HashMap as HashbrownMap;

use crate::Reflect;
use crate::impls::clone_value;
use crate::info::{DictionaryInfo, GenericTypeInfoCell, TypeInfo, Typed};
use crate::ops::{AssignError, Dictionary, ReflectCloneError, take_value};

// Every supported map has the same method names, so one body serves all.
macro_rules! impl_reflect_dictionary {
    ($map:ident) => {
        crate::impl_reflect_cast_fn!(Dictionary);

        fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
            let mut map = Self::default();
            for (key, value) in $map::iter(self) {
                $map::insert(&mut map, key.clone(), clone_value(value)?);
            }
            Ok(Box::new(map))
        }
    };
}

macro_rules! impl_dictionary {
    ($map:ident) => {
        #[inline]
        fn contains_key(&self, key: &str) -> bool {
            $map::contains_key(self, key)
        }

        #[inline]
        fn get(&self, key: &str) -> Option<&dyn Reflect> {
            $map::get(self, key).map(|value| value as &dyn Reflect)
        }

        #[inline]
        fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
            $map::get_mut(self, key).map(|value| value as &mut dyn Reflect)
        }

        fn insert(&mut self, key: &str, value: Option<Box<dyn Reflect>>) -> Result<(), AssignError> {
            $map::insert(self, key.to_owned(), take_value::<V>(value)?);
            Ok(())
        }

        #[inline]
        fn len(&self) -> usize {
            $map::len(self)
        }

        fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
            Box::new($map::keys(self).map(String::as_str))
        }
    };
}

// -----------------------------------------------------------------------------
// std HashMap

impl<V, S> Typed for HashMap<String, V, S>
where
    V: Reflect + Typed,
    S: BuildHasher + Default + Clone + Send + Sync + 'static,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Dictionary(DictionaryInfo::new::<Self, V>().with_default::<Self>())
        })
    }
}

impl<V, S> Reflect for HashMap<String, V, S>
where
    V: Reflect + Typed,
    S: BuildHasher + Default + Clone + Send + Sync + 'static,
{
    impl_reflect_dictionary!(HashMap);
}

impl<V, S> Dictionary for HashMap<String, V, S>
where
    V: Reflect + Typed,
    S: BuildHasher + Default + Clone + Send + Sync + 'static,
{
    impl_dictionary!(HashMap);
}

// -----------------------------------------------------------------------------
// hashbrown HashMap

impl<V, S> Typed for HashbrownMap<String, V, S>
where
    V: Reflect + Typed,
    S: BuildHasher + Default + Clone + Send + Sync + 'static,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Dictionary(DictionaryInfo::new::<Self, V>().with_default::<Self>())
        })
    }
}

impl<V, S> Reflect for HashbrownMap<String, V, S>
where
    V: Reflect + Typed,
    S: BuildHasher + Default + Clone + Send + Sync + 'static,
{
    impl_reflect_dictionary!(HashbrownMap);
}

impl<V, S> Dictionary for HashbrownMap<String, V, S>
where
    V: Reflect + Typed,
    S: BuildHasher + Default + Clone + Send + Sync + 'static,
{
    impl_dictionary!(HashbrownMap);
}

// -----------------------------------------------------------------------------
// BTreeMap

impl<V: Reflect + Typed> Typed for BTreeMap<String, V> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Dictionary(DictionaryInfo::new::<Self, V>().with_default::<Self>())
        })
    }
}

impl<V: Reflect + Typed> Reflect for BTreeMap<String, V> {
    impl_reflect_dictionary!(BTreeMap);
}

impl<V: Reflect + Typed> Dictionary for BTreeMap<String, V> {
    impl_dictionary!(BTreeMap);
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};
    use crate::ops::{AssignError, Dictionary};

    #[test]
    fn typed_values() {
        let info = HashMap::<String, u32>::type_info();
        assert_eq!(info.kind(), ReflectKind::Dictionary);
        let value = info.as_dictionary().unwrap().value_info().unwrap();
        assert_eq!(value.type_name(), "u32");
    }

    #[test]
    fn insert_and_read() {
        let mut map: BTreeMap<String, u32> = BTreeMap::new();
        Dictionary::insert(&mut map, "b", Some(Box::new(2_u32))).unwrap();
        Dictionary::insert(&mut map, "a", Some(Box::new(1_u32))).unwrap();

        assert!(Dictionary::contains_key(&map, "a"));
        assert_eq!(Dictionary::keys(&map).collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(
            Dictionary::get(&map, "b").and_then(|v| v.downcast_ref::<u32>()),
            Some(&2)
        );
        assert!(matches!(
            Dictionary::insert(&mut map, "c", Some(Box::new(String::new()))),
            Err(AssignError::Mismatch { .. })
        ));
    }

    #[test]
    fn nullable_values() {
        let mut map: HashMap<String, Option<u32>> = HashMap::new();
        Dictionary::insert(&mut map, "none", None).unwrap();
        assert_eq!(map.get("none"), Some(&None));

        let cloned = map.reflect_clone().unwrap();
        assert_eq!(cloned.downcast_ref::<HashMap<String, Option<u32>>>(), Some(&map));
    }
}
