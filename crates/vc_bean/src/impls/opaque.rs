use alloc::string::String;

/// Implements [`Typed`](crate::info::Typed) and [`Reflect`](crate::Reflect)
/// for a leaf type.
///
/// The type must implement `Clone` and `Debug`. The `default` form also
/// registers `Default` as the constructor used by forced creation.
///
/// # Examples
///
/// ```
/// use vc_bean::impl_opaque;
/// use vc_bean::info::{ReflectKind, Typed};
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// pub enum Level {
///     #[default]
///     Low,
///     High,
/// }
///
/// impl_opaque!(Level, default);
///
/// assert_eq!(Level::type_info().kind(), ReflectKind::Opaque);
/// assert!(Level::type_info().constructor().is_some());
/// ```
#[macro_export]
macro_rules! impl_opaque {
    (@info $ty:ty => $info:expr) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::info::NonGenericTypeInfoCell =
                    $crate::info::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| $crate::info::TypeInfo::Opaque($info))
            }
        }

        impl $crate::Reflect for $ty {
            $crate::impl_reflect_cast_fn!(Opaque);

            #[inline]
            fn reflect_clone(
                &self,
            ) -> ::core::result::Result<::std::boxed::Box<dyn $crate::Reflect>, $crate::ops::ReflectCloneError>
            {
                Ok(::std::boxed::Box::new(::core::clone::Clone::clone(self)))
            }

            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }
    };
    ($ty:ty) => {
        $crate::impl_opaque!(@info $ty => $crate::info::OpaqueInfo::new::<$ty>());
    };
    ($ty:ty, default) => {
        $crate::impl_opaque!(@info $ty => $crate::info::OpaqueInfo::new::<$ty>().with_default::<$ty>());
    };
}

crate::impl_opaque!((), default);
crate::impl_opaque!(bool, default);
crate::impl_opaque!(char, default);
crate::impl_opaque!(i8, default);
crate::impl_opaque!(i16, default);
crate::impl_opaque!(i32, default);
crate::impl_opaque!(i64, default);
crate::impl_opaque!(i128, default);
crate::impl_opaque!(isize, default);
crate::impl_opaque!(u8, default);
crate::impl_opaque!(u16, default);
crate::impl_opaque!(u32, default);
crate::impl_opaque!(u64, default);
crate::impl_opaque!(u128, default);
crate::impl_opaque!(usize, default);
crate::impl_opaque!(f32, default);
crate::impl_opaque!(f64, default);
crate::impl_opaque!(String, default);
crate::impl_opaque!(&'static str, default);

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};

    #[test]
    fn leaves_are_opaque() {
        assert_eq!(i32::type_info().kind(), ReflectKind::Opaque);
        assert_eq!(String::type_info().type_name(), "String");
        assert_eq!(<&'static str>::type_info().type_name(), "&str");
    }

    #[test]
    fn clone_and_debug() {
        let value: &dyn Reflect = &String::from("text");
        let cloned = value.reflect_clone().unwrap();
        assert_eq!(cloned.downcast_ref::<String>().map(String::as_str), Some("text"));
        assert_eq!(format!("{cloned:?}"), "\"text\"");
    }

    #[test]
    fn constructors() {
        let zero = (u64::type_info().constructor().unwrap())();
        assert_eq!(zero.take::<u64>().ok(), Some(0));
    }
}
