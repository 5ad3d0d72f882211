//! Items referenced by code generated with `#[derive(Bean)]`.
//!
//! Not public API.

use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{BoxError, Typed};
use crate::ops::take_value;

pub use crate::impls::clone_value;

/// An accessor was handed a record of another type.
#[derive(Debug, thiserror::Error)]
#[error("accessor of `{expected}` called on `{found}`")]
pub struct ReceiverMismatch {
    expected: &'static str,
    found: &'static str,
}

fn mismatch<S: Typed>(this: &dyn Reflect) -> BoxError {
    Box::new(ReceiverMismatch {
        expected: S::type_info().type_path(),
        found: this.reflect_type_path(),
    })
}

/// Calls a method getter through a type-erased receiver.
#[inline]
pub fn invoke_getter<S, T, E>(this: &dyn Reflect, getter: fn(&S) -> Result<T, E>) -> Result<Box<dyn Reflect>, BoxError>
where
    S: Reflect + Typed,
    T: Reflect,
    E: Into<BoxError>,
{
    let Some(record) = this.downcast_ref::<S>() else {
        return Err(mismatch::<S>(this));
    };
    match getter(record) {
        Ok(value) => Ok(Box::new(value)),
        Err(err) => Err(err.into()),
    }
}

/// Calls a method setter through a type-erased receiver, converting the
/// value with [`take_value`].
#[inline]
pub fn invoke_setter<S, T, E>(
    this: &mut dyn Reflect,
    value: Option<Box<dyn Reflect>>,
    setter: fn(&mut S, T) -> Result<(), E>,
) -> Result<(), BoxError>
where
    S: Reflect + Typed,
    T: Reflect + Typed,
    E: Into<BoxError>,
{
    if !this.is::<S>() {
        return Err(mismatch::<S>(this));
    }
    let value = take_value::<T>(value)?;
    match this.downcast_mut::<S>() {
        Some(record) => setter(record, value).map_err(Into::into),
        None => Err(mismatch::<S>(this)),
    }
}
