use std::collections::HashMap;

use vc_bean::bean::Presets;
use vc_bean::derive::Bean;
use vc_bean::impl_opaque;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Level {
    #[default]
    Debug,
}

impl_opaque!(Level, default);

#[derive(Bean, Default, Debug, PartialEq)]
#[bean(default)]
struct Child {
    pub number: i32,
}

#[derive(Bean, Debug, PartialEq)]
struct Plain {
    pub number: i32,
}

#[derive(Bean, Default)]
struct Parent {
    pub child: Option<Child>,
    pub children: Vec<Option<Child>>,
    pub plains: Vec<Option<Plain>>,
    pub numbers: Vec<i32>,
    pub kids: HashMap<String, Child>,
    pub level: Option<Level>,
    #[bean(set = Parent::locked)]
    pub guarded: Option<Child>,
    secret: Option<Child>,
}

impl Parent {
    fn locked(&mut self, _: Option<Child>) -> Result<(), &'static str> {
        Err("locked")
    }
}

#[test]
fn creates_null_members() {
    let presets = Presets::default();
    let mut parent = Parent::default();

    presets.forced.set_property(&mut parent, "child.number", 43_i32).unwrap();
    assert_eq!(parent.child, Some(Child { number: 43 }));

    presets.forced.set_property(&mut parent, "child.number", 44_i32).unwrap();
    assert_eq!(parent.child.as_ref().map(|child| child.number), Some(44));
}

#[test]
fn grows_sequences_and_fills_dictionaries() {
    let presets = Presets::default();
    let mut parent = Parent::default();

    presets.forced.set_property(&mut parent, "children[2].number", 7_i32).unwrap();
    assert_eq!(parent.children, [None, None, Some(Child { number: 7 })]);

    presets.forced.set_property(&mut parent, "kids[a].number", 1_i32).unwrap();
    presets.forced.set_property(&mut parent, "kids.b.number", 2_i32).unwrap();
    assert_eq!(parent.kids["a"], Child { number: 1 });
    assert_eq!(parent.kids["b"], Child { number: 2 });
}

#[test]
fn failed_growth_leaves_sequences_untouched() {
    let presets = Presets::default();
    let mut parent = Parent::default();

    let err = presets.forced.set_property(&mut parent, "plains[2].number", 1_i32).unwrap_err();
    assert!(err.is_forced());
    assert!(parent.plains.is_empty());

    let err = presets.forced.set_property_boxed(&mut parent, "numbers[3]", None).unwrap_err();
    assert!(err.is_invoke());
    assert!(parent.numbers.is_empty());

    let err = presets.forced.set_property(&mut parent, "numbers[1]", String::from("1")).unwrap_err();
    assert!(err.is_invoke());
    assert!(parent.numbers.is_empty());

    presets.forced.set_property(&mut parent, "numbers[2]", 7_i32).unwrap();
    assert_eq!(parent.numbers, [0, 0, 7]);
    assert_eq!(presets.pojo.get_property_as::<i32>(&parent, "numbers[02]").unwrap(), Some(7));
    presets.pojo.set_property(&mut parent, "numbers[01]", 5_i32).unwrap();
    assert_eq!(parent.numbers, [0, 5, 7]);
}

#[test]
fn without_force_nothing_is_created() {
    let presets = Presets::default();
    let mut parent = Parent::default();

    assert!(presets.pojo.set_property(&mut parent, "child.number", 1_i32).unwrap_err().is_null());
    assert!(presets.pojo.set_property(&mut parent, "children[0].number", 1_i32).unwrap_err().is_not_found());
    assert!(presets.forced.get_property(&parent, "child.number").unwrap_err().is_null());
    assert!(parent.child.is_none() && parent.children.is_empty());
}

#[test]
fn private_members_need_declared_mode() {
    let presets = Presets::default();
    let mut parent = Parent::default();

    assert!(presets.forced.set_property(&mut parent, "secret.number", 5_i32).unwrap_err().is_not_found());
    assert!(presets.forced_silent.set_property(&mut parent, "secret.number", 5_i32).is_ok());
    assert!(parent.secret.is_none());

    presets.declared_forced.set_property(&mut parent, "secret.number", 5_i32).unwrap();
    assert_eq!(parent.secret, Some(Child { number: 5 }));
}

#[test]
fn failing_setter_aborts_creation() {
    let presets = Presets::default();
    let mut parent = Parent::default();

    let err = presets.forced.set_property(&mut parent, "guarded.number", 1_i32).unwrap_err();
    assert!(err.is_forced());
    assert!(parent.guarded.is_none());
}

#[test]
fn reads_of_null_leaves_create_nothing() {
    let presets = Presets::default();
    let parent = Parent::default();

    assert!(presets.forced_silent.has_property(&parent, "level"));
    assert!(presets.forced_silent.get_property(&parent, "level").unwrap().is_none());
    assert!(parent.level.is_none());

    assert!(presets.forced_silent.get_property(&parent, "nope").unwrap().is_none());
}
