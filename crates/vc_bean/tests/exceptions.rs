use core::convert::Infallible;
use std::collections::HashMap;

use vc_bean::bean::{BeanCopy, BeanError, BeanUtil};
use vc_bean::derive::Bean;
use vc_bean::impl_opaque;
use vc_bean::info::Typed;
use vc_bean::ops::DynamicMap;
use vc_bean::registry::Introspector;

#[derive(Clone, Debug, PartialEq)]
pub struct Handle(u8);

impl_opaque!(Handle);

#[derive(Bean, Default)]
#[bean(default)]
struct Y {
    pub a: i32,
}

#[derive(Bean, Default)]
struct X {
    pub nested: Option<Y>,
    #[bean(rename = "priv", get = X::failing_get)]
    pub private_value: String,
    #[bean(set = X::failing_set)]
    pub bad: String,
    pub ys: Option<Vec<Option<Y>>>,
    pub strings: Vec<Handle>,
    pub map: HashMap<String, Handle>,
}

impl X {
    fn failing_get(&self) -> Result<String, &'static str> {
        Err("getter refused")
    }

    fn failing_set(&mut self, _: String) -> Result<(), &'static str> {
        Err("setter refused")
    }
}

#[derive(Bean, Default)]
#[bean(property(name = "virt", ty = Y, get = V::virt))]
struct V {
    pub y: Y,
}

impl V {
    fn virt(&self) -> Result<Y, Infallible> {
        Ok(Y { a: self.y.a + 1 })
    }
}

fn pojo() -> BeanUtil {
    BeanUtil::new(Introspector::new())
}

#[test]
fn has_through_null_member() {
    let beans = pojo();
    let x = X::default();

    assert!(beans.has_property(&x, "nested.a"));
    assert!(!beans.has_property(&x, "nested.na"));
}

#[test]
fn empty_names_are_invalid() {
    let beans = pojo();
    let mut x = X::default();

    assert!(beans.get_property(&x, "").unwrap_err().is_invalid());
    assert!(beans.get_simple_property(&x, "").unwrap_err().is_invalid());
    assert!(beans.set_property(&mut x, "", 1_i32).unwrap_err().is_invalid());
    assert!(beans.set_simple_property(&mut x, "", 1_i32).unwrap_err().is_invalid());
}

#[test]
fn failing_accessors_are_invoke_errors() {
    let beans = pojo();
    let mut x = X::default();

    let err = beans.get_property(&x, "priv").unwrap_err();
    assert!(err.is_invoke());
    assert_eq!(err.context().segment, "priv");

    let err = beans.set_property(&mut x, "bad", String::from("xxx")).unwrap_err();
    assert!(matches!(err, BeanError::InvokeProperty { .. }));
    assert!(x.bad.is_empty());
}

#[test]
fn missing_members_and_keys() {
    let beans = pojo();
    let mut x = X::default();
    let map: HashMap<String, String> = HashMap::new();

    assert!(beans.get_property(&map, "priv").unwrap_err().is_not_found());
    assert!(beans.get_property(&x, "na").unwrap_err().is_not_found());
    assert!(beans.set_property(&mut x, "na", 1_i32).unwrap_err().is_not_found());
}

#[test]
fn null_items_and_lookahead() {
    let beans = pojo();
    let mut x = X::default();

    assert!(beans.get_property(&x, "ys[0].foo").unwrap_err().is_null());
    assert!(beans.set_property(&mut x, "ys[1]", Some(Y::default())).unwrap_err().is_null());

    x.ys = Some(vec![None]);
    assert!(beans.get_property(&x, "ys[0].a").unwrap_err().is_null());
    assert!(beans.get_property(&x, "ys[0].foo").unwrap_err().is_not_found());
}

#[test]
fn forced_creation_failures() {
    let beans = pojo().forced(true);
    let mut x = X::default();

    let err = beans.set_property(&mut x, "strings[2].nope", 1_i32).unwrap_err();
    assert!(err.is_forced());
    assert!(x.strings.is_empty());

    assert!(beans.set_property(&mut x, "map[foo].nope", 1_i32).unwrap_err().is_forced());
    assert!(x.map.is_empty());

    assert!(beans.set_property(&mut x, "nested[foo].nope", 1_i32).unwrap_err().is_invalid());
}

#[test]
fn indexing_a_record_is_invalid() {
    let beans = pojo();
    let mut x = X::default();
    x.nested = Some(Y::default());

    let err = beans.set_property(&mut x, "nested[1]", 1_i32).unwrap_err();
    assert!(err.is_invalid());
    assert_eq!(err.context().container, Some(Y::type_info().type_path()));
}

#[test]
fn null_versus_not_found() {
    let beans = pojo();
    let x = X::default();

    assert!(beans.get_property(&x, "nested.a").unwrap_err().is_null());
    assert!(beans.get_property(&x, "nested.a.na").unwrap_err().is_null());

    let err = beans.get_property(&x, "nested.na").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.context().segment, "na");
    assert_eq!(err.context().offset, 7);
}

#[test]
fn writes_through_virtual_members_are_invalid() {
    let mut v = V::default();
    assert_eq!(pojo().get_property_as::<i32>(&v, "virt.a").unwrap(), Some(1));

    let err = pojo().set_property(&mut v, "virt.a", 5_i32).unwrap_err();
    assert!(err.is_invalid());
    assert_eq!(err.context().segment, "virt");

    let silent = pojo().silent(true).forced(true);
    assert!(silent.set_property(&mut v, "virt.a", 5_i32).unwrap_err().is_invalid());

    let mut source = DynamicMap::new();
    source.insert("virt.a", 5_i32);
    let introspector = Introspector::new();
    let err = BeanCopy::new(&introspector, &source, &mut v).copy().unwrap_err();
    assert!(err.is_invalid());
    assert_eq!(v.y.a, 0);
}
