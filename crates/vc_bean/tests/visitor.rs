use core::convert::Infallible;

use vc_bean::Reflect;
use vc_bean::bean::BeanVisitor;
use vc_bean::derive::Bean;
use vc_bean::registry::Introspector;

#[derive(Bean, Default)]
#[bean(
    property(name = "getter", ty = i64, get = Source::getter),
    property(name = "prop", ty = i32, get = Source::prop, set = Source::set_prop),
)]
struct Source {
    moo: String,
    #[bean(raw, rename = "pub")]
    pub public: String,
    #[bean(raw, rename = "priv")]
    private: String,
    #[bean(raw, rename = "_prop")]
    prop: i32,
}

impl Source {
    fn getter(&self) -> Result<i64, Infallible> {
        Ok(i64::from(self.prop) * 2)
    }

    fn prop(&self) -> Result<i32, Infallible> {
        Ok(self.prop)
    }

    fn set_prop(&mut self, prop: i32) -> Result<(), Infallible> {
        self.prop = prop;
        Ok(())
    }
}

fn names(source: &Source, declared: bool, include_fields: bool) -> Vec<String> {
    let introspector = Introspector::new();
    BeanVisitor::new(&introspector, source)
        .declared(declared)
        .include_fields(include_fields)
        .property_names()
}

#[test]
fn enumeration_matrix() {
    let source = Source::default();

    assert_eq!(names(&source, false, false), ["getter", "prop"]);
    assert_eq!(names(&source, false, true), ["pub", "getter", "prop"]);
    assert_eq!(names(&source, true, false), ["moo", "getter", "prop"]);
    assert_eq!(
        names(&source, true, true),
        ["moo", "pub", "priv", "_prop", "getter", "prop"]
    );
}

#[test]
fn values_follow_accessors() {
    let source = Source {
        moo: String::from("cow"),
        public: String::from("open"),
        private: String::from("closed"),
        prop: 21,
    };
    let introspector = Introspector::new();

    let mut seen = Vec::new();
    BeanVisitor::new(&introspector, &source)
        .declared(true)
        .include_fields(true)
        .visit(|name, value| {
            let value = value.map(describe).unwrap_or_default();
            seen.push(format!("{name}={value}"));
            Ok(())
        })
        .unwrap();

    assert_eq!(
        seen,
        ["moo=cow", "pub=open", "priv=closed", "_prop=21", "getter=42", "prop=21"]
    );
}

#[test]
fn ignored_values() {
    let source = Source::default();
    let introspector = Introspector::new();

    let mut seen = Vec::new();
    BeanVisitor::new(&introspector, &source)
        .declared(true)
        .include_fields(true)
        .ignore_empty_string(true)
        .visit(|name, _| {
            seen.push(String::from(name));
            Ok(())
        })
        .unwrap();

    assert_eq!(seen, ["_prop", "getter", "prop"]);
}

#[test]
fn consumer_errors_stop_the_visit() {
    let source = Source::default();
    let introspector = Introspector::new();

    let mut calls = 0;
    let visitor = BeanVisitor::new(&introspector, &source);
    let result = visitor.visit(|name, _| {
        calls += 1;
        Err(vc_bean::bean::BeanError::PropertyNotFound {
            context: vc_bean::bean::PropertyContext::whole(name),
        })
    });

    assert!(result.unwrap_err().is_not_found());
    assert_eq!(calls, 1);
}

fn describe(value: &dyn Reflect) -> String {
    if let Some(text) = value.downcast_ref::<String>() {
        return text.clone();
    }
    if let Some(number) = value.downcast_ref::<i32>() {
        return number.to_string();
    }
    if let Some(number) = value.downcast_ref::<i64>() {
        return number.to_string();
    }
    String::from("?")
}
