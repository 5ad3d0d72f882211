use core::any::Any;

use crate::Reflect;
use crate::info::{Constructor, Type, TypeInfo, Typed, default_constructor};

// -----------------------------------------------------------------------------
// DictionaryInfo

/// Type info of a string-keyed dictionary.
#[derive(Debug)]
pub struct DictionaryInfo {
    ty: Type,
    constructor: Option<Constructor>,
    value_info: Option<fn() -> &'static TypeInfo>,
}

impl DictionaryInfo {
    /// A dictionary whose values are all of type `V`.
    pub fn new<T: Any, V: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            constructor: None,
            value_info: Some(V::type_info),
        }
    }

    /// A dictionary holding values of arbitrary types.
    pub fn untyped<T: Any>() -> Self {
        Self {
            ty: Type::of::<T>(),
            constructor: None,
            value_info: None,
        }
    }

    pub fn with_default<T: Reflect + Default>(mut self) -> Self {
        self.constructor = Some(default_constructor::<T>);
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }

    /// The declared value type, `None` for untyped dictionaries.
    #[inline]
    pub fn value_info(&self) -> Option<&'static TypeInfo> {
        self.value_info.map(|info| info())
    }
}

// -----------------------------------------------------------------------------
// SequenceInfo

/// Type info of an integer-indexed sequence.
#[derive(Debug)]
pub struct SequenceInfo {
    ty: Type,
    constructor: Option<Constructor>,
    item_info: fn() -> &'static TypeInfo,
    fixed_len: Option<usize>,
}

impl SequenceInfo {
    /// A growable sequence of `I`.
    pub fn new<T: Any, I: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            constructor: None,
            item_info: I::type_info,
            fixed_len: None,
        }
    }

    /// A fixed-size sequence of `N` items of `I`.
    pub fn fixed<T: Any, I: Typed>(len: usize) -> Self {
        Self {
            ty: Type::of::<T>(),
            constructor: None,
            item_info: I::type_info,
            fixed_len: Some(len),
        }
    }

    pub fn with_default<T: Reflect + Default>(mut self) -> Self {
        self.constructor = Some(default_constructor::<T>);
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// The length of a fixed-size sequence.
    #[inline]
    pub const fn fixed_len(&self) -> Option<usize> {
        self.fixed_len
    }
}

// -----------------------------------------------------------------------------
// SupplierInfo

/// Type info of a lazy supplier producing `I`.
#[derive(Debug)]
pub struct SupplierInfo {
    ty: Type,
    item_info: fn() -> &'static TypeInfo,
}

impl SupplierInfo {
    pub fn new<T: Any, I: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            item_info: I::type_info,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// The type of the supplied value.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }
}

// -----------------------------------------------------------------------------
// OptionalInfo

/// Type info of a nullable slot, `Option<I>`.
#[derive(Debug)]
pub struct OptionalInfo {
    ty: Type,
    constructor: Constructor,
    inner_info: fn() -> &'static TypeInfo,
}

impl OptionalInfo {
    pub fn new<T: Reflect + Default, I: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            constructor: default_constructor::<T>,
            inner_info: I::type_info,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Constructs the null value.
    #[inline]
    pub const fn constructor(&self) -> Constructor {
        self.constructor
    }

    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }
}

// -----------------------------------------------------------------------------
// OpaqueInfo

/// Type info of a leaf value.
#[derive(Debug)]
pub struct OpaqueInfo {
    ty: Type,
    constructor: Option<Constructor>,
}

impl OpaqueInfo {
    pub fn new<T: Any>() -> Self {
        Self {
            ty: Type::of::<T>(),
            constructor: None,
        }
    }

    pub fn with_default<T: Reflect + Default>(mut self) -> Self {
        self.constructor = Some(default_constructor::<T>);
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }
}
