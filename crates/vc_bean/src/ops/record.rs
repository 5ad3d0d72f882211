use core::fmt;

use crate::Reflect;
use crate::info::RecordInfo;

// -----------------------------------------------------------------------------
// Record

/// Type-erased access to the backing fields of a record.
///
/// Implemented by `#[derive(Bean)]`. Only members with a backing field are
/// reachable here; visibility rules and method accessors are applied by the
/// [`registry`](crate::registry).
///
/// # Examples
///
/// ```
/// use vc_bean::{derive::Bean, ops::Record};
///
/// #[derive(Bean)]
/// struct Point {
///     pub x: i32,
///     pub y: i32,
/// }
///
/// let point = Point { x: 1, y: 2 };
/// let record: &dyn Record = &point;
///
/// assert_eq!(record.field_len(), 2);
/// assert_eq!(record.name_at(1), Some("y"));
/// assert_eq!(record.field("x").and_then(|x| x.downcast_ref::<i32>()), Some(&1));
/// ```
pub trait Record: Reflect {
    /// Returns the backing field named `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the backing field named `name` mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns the number of backing fields.
    fn field_len(&self) -> usize;

    /// Returns the name of the backing field at `index`, in declaration order.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns the [`RecordInfo`] of the underlying type.
    fn record_info(&self) -> Option<&'static RecordInfo> {
        self.reflect_type_info().as_record().ok()
    }
}

/// Formats a record like a struct literal.
pub fn record_debug(data: &dyn Record, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = data.reflect_type_info().type_name();
    let mut debug = f.debug_struct(name);
    for index in 0..data.field_len() {
        if let Some(name) = data.name_at(index)
            && let Some(value) = data.field(name)
        {
            debug.field(name, &value as &dyn fmt::Debug);
        }
    }
    debug.finish()
}
