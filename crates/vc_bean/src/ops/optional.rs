use alloc::boxed::Box;
use core::fmt;

use crate::Reflect;
use crate::info::{OptionalInfo, TypeInfo};
use crate::ops::AssignError;

/// A nullable slot. `None` is the null value of the navigator.
pub trait Optional: Reflect {
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Unwraps the slot, consuming it.
    fn take_value(self: Box<Self>) -> Option<Box<dyn Reflect>>;

    /// Replaces the content. `None` clears the slot.
    fn set_value(&mut self, value: Option<Box<dyn Reflect>>) -> Result<(), AssignError>;

    #[inline]
    fn is_null(&self) -> bool {
        self.value().is_none()
    }

    /// The declared type of the content.
    fn inner_info(&self) -> Option<&'static TypeInfo> {
        self.reflect_type_info()
            .as_optional()
            .ok()
            .map(OptionalInfo::inner_info)
    }
}

pub fn optional_debug(data: &dyn Optional, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match data.value() {
        Some(value) => f.debug_tuple("Some").field(&value).finish(),
        None => f.write_str("None"),
    }
}
