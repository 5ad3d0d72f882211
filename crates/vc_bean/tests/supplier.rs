use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use vc_bean::bean::Presets;
use vc_bean::derive::Bean;
use vc_bean::ops::Supplier;

#[derive(Bean, Default)]
#[bean(default)]
struct Child {
    pub number: i32,
}

#[derive(Bean)]
struct Holder {
    pub sup: Supplier<Child>,
    pub sup2: Supplier<Supplier<Child>>,
}

fn holder(calls: &Arc<AtomicUsize>) -> Holder {
    let counter = Arc::clone(calls);
    Holder {
        sup: Supplier::new(move || Child {
            number: counter.fetch_add(1, Ordering::Relaxed) as i32 + 1,
        }),
        sup2: Supplier::new(|| Supplier::new(Child::default)),
    }
}

#[test]
fn member_suppliers_run_on_every_read() {
    let presets = Presets::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let holder = holder(&calls);

    assert_eq!(presets.pojo.get_property_as::<i32>(&holder, "sup.number").unwrap(), Some(1));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(presets.pojo.get_property_as::<i32>(&holder, "sup.number").unwrap(), Some(2));
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    assert!(presets.pojo.has_property(&holder, "sup.number"));
    assert!(!presets.pojo.has_property(&holder, "sup.nope"));
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn member_suppliers_are_read_only() {
    let presets = Presets::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut holder = holder(&calls);

    let err = presets.pojo.set_property(&mut holder, "sup.number", 5_i32).unwrap_err();
    assert!(err.is_invalid());
    assert!(presets.forced_silent.set_property(&mut holder, "sup.number", 5_i32).unwrap_err().is_invalid());
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn suppliers_are_not_chained() {
    let presets = Presets::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let holder = holder(&calls);

    assert!(!presets.pojo.has_property(&holder, "sup2.number"));
    assert!(presets.pojo.get_property(&holder, "sup2.number").unwrap_err().is_not_found());
}
