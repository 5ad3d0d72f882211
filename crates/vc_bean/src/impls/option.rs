use alloc::boxed::Box;

use crate::Reflect;
use crate::impls::clone_value;
use crate::info::{GenericTypeInfoCell, OptionalInfo, TypeInfo, Typed};
use crate::ops::{AssignError, Optional, ReflectCloneError, take_value};

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionalInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    crate::impl_reflect_cast_fn!(Optional);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let value = match self {
            Some(value) => Some(clone_value(value)?),
            None => None,
        };
        Ok(Box::new(value))
    }
}

impl<T: Reflect + Typed> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn take_value(self: Box<Self>) -> Option<Box<dyn Reflect>> {
        (*self).map(|value| Box::new(value) as Box<dyn Reflect>)
    }

    fn set_value(&mut self, value: Option<Box<dyn Reflect>>) -> Result<(), AssignError> {
        *self = match value {
            Some(value) => Some(take_value::<T>(Some(value))?),
            None => None,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;

    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};
    use crate::ops::{Optional, ReflectRef};

    #[test]
    fn option_is_nullable() {
        let info = Option::<u16>::type_info();
        assert_eq!(info.kind(), ReflectKind::Optional);
        assert_eq!(info.unwrap_optional().type_name(), "u16");

        let null = (info.constructor().unwrap())();
        assert_eq!(null.take::<Option<u16>>().ok(), Some(None));
    }

    #[test]
    fn set_and_take() {
        let mut slot: Option<u16> = None;
        slot.set_value(Some(Box::new(8_u16))).unwrap();
        assert_eq!(slot, Some(8));
        assert!(slot.set_value(Some(Box::new(8_u32))).is_err());
        assert_eq!(slot, Some(8));

        let boxed: Box<Option<u16>> = Box::new(slot);
        let inner = boxed.take_value().unwrap();
        assert_eq!(inner.downcast_ref::<u16>(), Some(&8));
    }

    #[test]
    fn reflect_views() {
        let value: Option<u16> = Some(1);
        let ReflectRef::Optional(optional) = value.reflect_ref() else {
            panic!("expected an optional");
        };
        assert!(!optional.is_null());
        assert_eq!(format!("{:?}", value.as_reflect()), "Some(1)");
    }
}
