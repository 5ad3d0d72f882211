use alloc::boxed::Box;
use core::fmt;

use crate::Reflect;
use crate::info::{SequenceInfo, TypeInfo};
use crate::ops::AssignError;

// -----------------------------------------------------------------------------
// Sequence

/// Type-erased access to an integer-indexed collection.
///
/// Fixed-size sequences reject [`push`](Sequence::push) with
/// [`AssignError::FixedSize`].
pub trait Sequence: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an item. `None` appends null, which requires a nullable item type.
    fn push(&mut self, value: Option<Box<dyn Reflect>>) -> Result<(), AssignError>;

    /// Returns `true` if the sequence cannot grow.
    fn is_fixed(&self) -> bool {
        self.reflect_type_info()
            .as_sequence()
            .is_ok_and(|info| info.fixed_len().is_some())
    }

    /// The declared type of the items.
    fn item_info(&self) -> Option<&'static TypeInfo> {
        self.reflect_type_info()
            .as_sequence()
            .ok()
            .map(SequenceInfo::item_info)
    }
}

/// Formats a sequence like a list.
pub fn sequence_debug(data: &dyn Sequence, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_list();
    for index in 0..data.len() {
        if let Some(item) = data.get(index) {
            debug.entry(&item);
        }
    }
    debug.finish()
}
