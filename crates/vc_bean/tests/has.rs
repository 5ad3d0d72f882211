use std::collections::HashMap;

use vc_bean::bean::BeanUtil;
use vc_bean::derive::Bean;
use vc_bean::impl_opaque;
use vc_bean::ops::DynamicMap;
use vc_bean::registry::Introspector;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl_opaque!(Level, default);

#[derive(Bean, Default)]
#[bean(default)]
struct Foo {
    foo: Option<String>,
    bar: Option<Bar>,
    bars: Option<Vec<Bar>>,
    map: Option<HashMap<String, Bar>>,
}

#[derive(Bean, Default)]
#[bean(default)]
struct Bar {
    baz: Option<Baz>,
    level: Option<Level>,
}

#[derive(Bean, Default)]
#[bean(default)]
struct Baz {
    name: String,
    bars: Vec<Bar>,
}

fn declared() -> BeanUtil {
    BeanUtil::new(Introspector::new()).declared(true)
}

#[test]
fn declared_chain_through_nulls() {
    let beans = declared();
    let mut bean = Foo::default();

    for _ in 0..2 {
        assert!(beans.has_property(&bean, "bar.level"));
        assert!(beans.has_property(&bean, "bar.baz"));
        assert!(beans.has_property(&bean, "bar.baz.name"));
        assert!(beans.has_property(&bean, "bar.baz.bars"));
        assert!(!beans.has_property(&bean, "bar.baz.nope"));
        assert!(!beans.has_property(&bean, "bar.level.nope"));

        bean.bar = Some(Bar::default());
    }
}

#[test]
fn indexes_are_never_resolved() {
    let beans = declared();
    let mut bean = Foo::default();
    bean.bars = Some(vec![Bar::default(), Bar::default()]);

    assert!(beans.has_property(&bean, "bars"));
    assert!(!beans.has_property(&bean, "bars[1]"));
    assert!(beans.has_property(&bean, "bar.baz.bars"));
    assert!(!beans.has_property(&bean, "bar.baz.bars[1]"));

    assert!(beans.has_property(&bean, "map"));
    assert!(!beans.has_property(&bean, "map[a]"));
    assert!(!beans.has_property(&bean, "map.a"));
}

#[test]
fn private_members_need_declared_mode() {
    let bean = Foo::default();
    let pojo = BeanUtil::new(Introspector::new());

    assert!(!pojo.has_property(&bean, "bar"));
    assert!(declared().has_property(&bean, "bar"));
}

#[test]
fn root_and_simple_checks() {
    let beans = declared();
    let bean = Foo::default();

    assert!(beans.has_root_property(&bean, "bar.whatever[3]"));
    assert!(beans.has_root_property(&bean, "map[key]"));
    assert!(!beans.has_root_property(&bean, "nope.level"));

    assert!(beans.has_simple_property(&bean, "foo"));
    assert!(!beans.has_simple_property(&bean, "bar.level"));
    assert!(!beans.has_simple_property(&bean, ""));
}

#[test]
fn malformed_paths_are_absent() {
    let beans = declared();
    let bean = Foo::default();

    assert!(!beans.has_property(&bean, ""));
    assert!(!beans.has_property(&bean, "bar..level"));
    assert!(!beans.has_property(&bean, "bar["));
}

#[test]
fn dictionary_roots_check_their_first_key() {
    let beans = declared();

    let mut typed: HashMap<String, Bar> = HashMap::new();
    typed.insert("first".into(), Bar::default());
    assert!(beans.has_property(&typed, "first"));
    assert!(beans.has_property(&typed, "first.baz.name"));
    assert!(!beans.has_property(&typed, "[first].baz.name"));
    assert!(!beans.has_property(&typed, "second"));
    assert!(!beans.has_property(&typed, "first.nope"));

    let mut untyped = DynamicMap::new();
    untyped.insert("bar", Bar::default());
    assert!(beans.has_property(&untyped, "bar"));
    assert!(!beans.has_property(&untyped, "bar.baz"));
}
