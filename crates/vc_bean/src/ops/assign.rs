use alloc::boxed::Box;

use crate::Reflect;
use crate::info::Typed;
use crate::ops::{ReflectMut, ReflectOwned};

/// A value could not be stored into a slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    #[error("expected a value of `{expected}`, found `{found}`")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{expected}` cannot hold null")]
    NullNotAllowed { expected: &'static str },
    #[error("`{ty}` has a fixed size")]
    FixedSize { ty: &'static str },
    #[error("`{ty}` has no default constructor")]
    NoConstructor { ty: &'static str },
}

/// Stores `value` into `slot`, `None` being null.
///
/// Values of the slot's own type replace it. Nullable slots accept their
/// content type and null, and nullable values are unwrapped before being
/// stored. There is no other conversion.
///
/// # Examples
///
/// ```
/// use vc_bean::Reflect;
/// use vc_bean::ops::{AssignError, assign};
///
/// let mut slot: Option<i32> = None;
/// assign(&mut slot, Some(Box::new(7_i32))).unwrap();
/// assert_eq!(slot, Some(7));
///
/// let mut number = 1_i32;
/// assert!(matches!(
///     assign(&mut number, None),
///     Err(AssignError::NullNotAllowed { .. })
/// ));
/// ```
pub fn assign(slot: &mut dyn Reflect, value: Option<Box<dyn Reflect>>) -> Result<(), AssignError> {
    let expected = slot.reflect_type_path();

    let Some(value) = value else {
        return match slot.reflect_mut() {
            ReflectMut::Optional(optional) => optional.set_value(None),
            _ => Err(AssignError::NullNotAllowed { expected }),
        };
    };

    if value.ty_id() == slot.ty_id() {
        return slot.set(value).map_err(|value| AssignError::Mismatch {
            expected,
            found: value.reflect_type_path(),
        });
    }

    let value = match value.reflect_owned() {
        ReflectOwned::Optional(optional) => return assign(slot, optional.take_value()),
        owned => owned.into_reflect(),
    };

    match slot.reflect_mut() {
        ReflectMut::Optional(optional) => optional.set_value(Some(value)),
        _ => Err(AssignError::Mismatch {
            expected,
            found: value.reflect_type_path(),
        }),
    }
}

/// Converts `value` into a `T` with the rules of [`assign`].
pub fn take_value<T: Reflect + Typed>(value: Option<Box<dyn Reflect>>) -> Result<T, AssignError> {
    let info = T::type_info();

    let value = match value {
        Some(value) => match value.take::<T>() {
            Ok(value) => return Ok(value),
            Err(value) => Some(value),
        },
        None => None,
    };

    let Some(constructor) = info.constructor() else {
        // Without a slot to assign through, only a nullable wrapper can still match.
        return match value.map(|value| value.reflect_owned()) {
            None => Err(AssignError::NullNotAllowed {
                expected: info.type_path(),
            }),
            Some(ReflectOwned::Optional(optional)) => take_value::<T>(optional.take_value()),
            Some(owned) => Err(AssignError::Mismatch {
                expected: info.type_path(),
                found: owned.into_reflect().reflect_type_path(),
            }),
        };
    };

    let mut slot = constructor();
    assign(&mut *slot, value)?;
    slot.take::<T>().map_err(|slot| AssignError::Mismatch {
        expected: info.type_path(),
        found: slot.reflect_type_path(),
    })
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use super::{AssignError, assign, take_value};
    use crate::Reflect;

    #[test]
    fn assign_same_type() {
        let mut text = String::from("a");
        assign(&mut text, Some(String::from("b").into_boxed_reflect())).unwrap();
        assert_eq!(text, "b");
    }

    #[test]
    fn assign_mismatch() {
        let mut number = 0_u8;
        let err = assign(&mut number, Some(Box::new(1_i64))).unwrap_err();
        assert!(matches!(err, AssignError::Mismatch { .. }));
        assert_eq!(number, 0);
    }

    #[test]
    fn assign_optional() {
        let mut slot: Option<u8> = Some(3);
        assign(&mut slot, None).unwrap();
        assert_eq!(slot, None);

        assign(&mut slot, Some(Box::new(Some(5_u8)))).unwrap();
        assert_eq!(slot, Some(5));

        let mut number = 0_u8;
        assign(&mut number, Some(Box::new(Some(9_u8)))).unwrap();
        assert_eq!(number, 9);
    }

    #[test]
    fn take_values() {
        assert_eq!(take_value::<u8>(Some(Box::new(4_u8))), Ok(4));
        assert_eq!(take_value::<Option<u8>>(None), Ok(None));
        assert_eq!(take_value::<Option<u8>>(Some(Box::new(4_u8))), Ok(Some(4)));
        assert!(matches!(
            take_value::<u8>(None),
            Err(AssignError::NullNotAllowed { .. })
        ));
    }
}
