use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::clone_value;
use crate::info::{GenericTypeInfoCell, SequenceInfo, TypeInfo, Typed};
use crate::ops::{AssignError, ReflectCloneError, Sequence, take_value};

// -----------------------------------------------------------------------------
// Vec

impl<T: Reflect + Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Sequence(SequenceInfo::new::<Self, T>().with_default::<Self>())
        })
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
    crate::impl_reflect_cast_fn!(Sequence);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let items = self.iter().map(clone_value).collect::<Result<Vec<T>, _>>()?;
        Ok(Box::new(items))
    }
}

impl<T: Reflect + Typed> Sequence for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn push(&mut self, value: Option<Box<dyn Reflect>>) -> Result<(), AssignError> {
        Vec::push(self, take_value::<T>(value)?);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// VecDeque

impl<T: Reflect + Typed> Typed for VecDeque<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Sequence(SequenceInfo::new::<Self, T>().with_default::<Self>())
        })
    }
}

impl<T: Reflect + Typed> Reflect for VecDeque<T> {
    crate::impl_reflect_cast_fn!(Sequence);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let items = self.iter().map(clone_value).collect::<Result<VecDeque<T>, _>>()?;
        Ok(Box::new(items))
    }
}

impl<T: Reflect + Typed> Sequence for VecDeque<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        VecDeque::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn push(&mut self, value: Option<Box<dyn Reflect>>) -> Result<(), AssignError> {
        VecDeque::push_back(self, take_value::<T>(value)?);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Array

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Sequence(SequenceInfo::fixed::<Self, T>(N)))
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    crate::impl_reflect_cast_fn!(Sequence);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let items = self.iter().map(clone_value).collect::<Result<Vec<T>, _>>()?;
        let array = <[T; N]>::try_from(items).map_err(|_| ReflectCloneError::NotSupported {
            type_path: Self::type_info().type_path(),
        })?;
        Ok(Box::new(array))
    }
}

impl<T: Reflect + Typed, const N: usize> Sequence for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn push(&mut self, _value: Option<Box<dyn Reflect>>) -> Result<(), AssignError> {
        Err(AssignError::FixedSize {
            ty: Self::type_info().type_path(),
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::{AssignError, Sequence};

    #[test]
    fn vec_access() {
        let mut list: Vec<i32> = vec![1, 2];
        assert_eq!(Sequence::len(&list), 2);
        assert!(!list.is_fixed());
        assert_eq!(Sequence::get(&list, 1).and_then(|v| v.downcast_ref::<i32>()), Some(&2));
        assert!(Sequence::get(&list, 2).is_none());

        Sequence::push(&mut list, Some(Box::new(3_i32))).unwrap();
        assert_eq!(list, [1, 2, 3]);
        assert!(Sequence::push(&mut list, None).is_err());
    }

    #[test]
    fn nullable_items() {
        let mut list: VecDeque<Option<i32>> = VecDeque::new();
        Sequence::push(&mut list, None).unwrap();
        Sequence::push(&mut list, Some(Box::new(5_i32))).unwrap();
        assert_eq!(list, [None, Some(5)]);
    }

    #[test]
    fn arrays_are_fixed() {
        let mut array = [1_u8, 2, 3];
        assert!(array.is_fixed());
        assert_eq!(<[u8; 3]>::type_info().as_sequence().unwrap().fixed_len(), Some(3));
        assert_eq!(
            Sequence::push(&mut array, Some(Box::new(4_u8))),
            Err(AssignError::FixedSize { ty: "[u8; 3]" })
        );

        let cloned = array.reflect_clone().unwrap().take::<[u8; 3]>().unwrap();
        assert_eq!(cloned, [1, 2, 3]);
    }
}
