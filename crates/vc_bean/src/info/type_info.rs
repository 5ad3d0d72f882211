use core::any::TypeId;
use core::fmt;

use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{DictionaryInfo, OpaqueInfo, OptionalInfo};
use crate::info::{RecordInfo, SequenceInfo, SupplierInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// The kind of a reflected value, mirroring the variants of [`TypeInfo`].
///
/// `Record`, `Dictionary`, `Sequence` and `Supplier` are the container
/// kinds navigated by paths. `Optional` is a nullable slot and `Opaque` is a
/// leaf value without members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Record,
    Dictionary,
    Sequence,
    Supplier,
    Optional,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record => f.pad("Record"),
            Self::Dictionary => f.pad("Dictionary"),
            Self::Sequence => f.pad("Sequence"),
            Self::Supplier => f.pad("Supplier"),
            Self::Optional => f.pad("Optional"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// A [`TypeInfo`] was cast to the wrong kind.
#[derive(Debug, thiserror::Error)]
#[error("reflect kind mismatch: expected {expected}, received {received}")]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Default constructor registered for a type, used by forced creation.
pub type Constructor = fn() -> Box<dyn Reflect>;

/// Builds a `T::default()` behind a [`Constructor`] pointer.
pub fn default_constructor<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

/// Compile-time information about a reflected type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info) or
/// [`DynamicTyped::reflect_type_info`](crate::info::DynamicTyped::reflect_type_info).
#[derive(Debug)]
pub enum TypeInfo {
    Record(RecordInfo),
    Dictionary(DictionaryInfo),
    Sequence(SequenceInfo),
    Supplier(SupplierInfo),
    Optional(OptionalInfo),
    Opaque(OpaqueInfo),
}

// Helper macro that implements type-safe accessor methods like `as_record`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Returns the inner [`", stringify!($info), "`] or a kind error.")]
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_record: Record => RecordInfo);
    impl_cast_method!(as_dictionary: Dictionary => DictionaryInfo);
    impl_cast_method!(as_sequence: Sequence => SequenceInfo);
    impl_cast_method!(as_supplier: Supplier => SupplierInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    /// Returns the [`Type`] described by this info.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Record(info) => info.ty(),
            Self::Dictionary(info) => info.ty(),
            Self::Sequence(info) => info.ty(),
            Self::Supplier(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Record(_) => ReflectKind::Record,
            Self::Dictionary(_) => ReflectKind::Dictionary,
            Self::Sequence(_) => ReflectKind::Sequence,
            Self::Supplier(_) => ReflectKind::Supplier,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns the default constructor of the type, if it has one.
    ///
    /// Suppliers never have one. Optionals always construct `None`.
    pub const fn constructor(&self) -> Option<Constructor> {
        match self {
            Self::Record(info) => info.constructor(),
            Self::Dictionary(info) => info.constructor(),
            Self::Sequence(info) => info.constructor(),
            Self::Supplier(_) => None,
            Self::Optional(info) => Some(info.constructor()),
            Self::Opaque(info) => info.constructor(),
        }
    }

    /// Strips nullable wrappers: `Option<Option<T>>` resolves to `T`.
    pub fn unwrap_optional(&'static self) -> &'static TypeInfo {
        let mut info = self;
        while let Self::Optional(optional) = info {
            info = optional.inner_info();
        }
        info
    }

    /// Strips nullable wrappers and a single supplier hop, yielding the type
    /// a path segment actually navigates into. Suppliers are not chained.
    pub fn unwrap_declared(&'static self) -> &'static TypeInfo {
        match self.unwrap_optional() {
            Self::Supplier(supplier) => supplier.item_info().unwrap_optional(),
            info => info,
        }
    }
}
