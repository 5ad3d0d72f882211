use core::any::Any;
use core::fmt;

use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{Constructor, Type, TypeInfo, Typed, default_constructor};

// -----------------------------------------------------------------------------
// Accessors

/// Error type returned by user accessors.
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

/// A type-erased method getter. It receives the owning record.
pub type GetterFn = fn(&dyn Reflect) -> Result<Box<dyn Reflect>, BoxError>;

/// A type-erased method setter. It receives the owning record and the new
/// value, `None` being null.
pub type SetterFn = fn(&mut dyn Reflect, Option<Box<dyn Reflect>>) -> Result<(), BoxError>;

/// Visibility of a member part.
///
/// `Private` parts are only reachable in declared mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Returns `true` if a part with this visibility matches the `declared` flag.
    #[inline]
    pub const fn is_visible(self, declared: bool) -> bool {
        declared || matches!(self, Self::Public)
    }
}

/// How a getter reads its value.
#[derive(Clone, Copy)]
pub enum GetterKind {
    /// Borrows the backing field of the same name.
    Field,
    /// Calls a user method, producing an owned value.
    Method(GetterFn),
}

/// How a setter writes its value.
#[derive(Clone, Copy)]
pub enum SetterKind {
    /// Assigns the backing field of the same name.
    Field,
    /// Calls a user method.
    Method(SetterFn),
}

impl fmt::Debug for GetterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.write_str("Field"),
            Self::Method(_) => f.write_str("Method"),
        }
    }
}

impl fmt::Debug for SetterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.write_str("Field"),
            Self::Method(_) => f.write_str("Method"),
        }
    }
}

/// A getter declaration.
#[derive(Debug, Clone, Copy)]
pub struct GetterInfo {
    pub kind: GetterKind,
    pub visibility: Visibility,
}

/// A setter declaration.
#[derive(Debug, Clone, Copy)]
pub struct SetterInfo {
    pub kind: SetterKind,
    pub visibility: Visibility,
}

// -----------------------------------------------------------------------------
// MemberInfo

/// A named member of a record.
///
/// A member is made of up to three parts, each with its own visibility:
/// a raw field, a getter and a setter. Fields declared on a struct produce
/// field-backed accessors unless marked `raw`; virtual properties have
/// method accessors and no field.
#[derive(Clone)]
pub struct MemberInfo {
    name: &'static str,
    type_info: fn() -> &'static TypeInfo,
    field: Option<Visibility>,
    getter: Option<GetterInfo>,
    setter: Option<SetterInfo>,
}

impl MemberInfo {
    /// A struct field with field-backed getter and setter.
    pub fn field<T: Typed>(name: &'static str, visibility: Visibility) -> Self {
        Self {
            name,
            type_info: T::type_info,
            field: Some(visibility),
            getter: Some(GetterInfo {
                kind: GetterKind::Field,
                visibility,
            }),
            setter: Some(SetterInfo {
                kind: SetterKind::Field,
                visibility,
            }),
        }
    }

    /// A struct field that exposes no accessor, only raw field access.
    pub fn raw_field<T: Typed>(name: &'static str, visibility: Visibility) -> Self {
        Self {
            name,
            type_info: T::type_info,
            field: Some(visibility),
            getter: None,
            setter: None,
        }
    }

    /// A virtual property without backing field. Attach accessors with
    /// [`with_getter`](Self::with_getter) and [`with_setter`](Self::with_setter).
    pub fn property<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
            field: None,
            getter: None,
            setter: None,
        }
    }

    /// Replaces the getter with a user method.
    pub fn with_getter(mut self, getter: GetterFn, visibility: Visibility) -> Self {
        self.getter = Some(GetterInfo {
            kind: GetterKind::Method(getter),
            visibility,
        });
        self
    }

    /// Replaces the setter with a user method.
    pub fn with_setter(mut self, setter: SetterFn, visibility: Visibility) -> Self {
        self.setter = Some(SetterInfo {
            kind: SetterKind::Method(setter),
            visibility,
        });
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The declared type of the member.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Visibility of the raw field, `None` for virtual properties.
    #[inline]
    pub const fn field_visibility(&self) -> Option<Visibility> {
        self.field
    }

    #[inline]
    pub const fn getter(&self) -> Option<&GetterInfo> {
        self.getter.as_ref()
    }

    #[inline]
    pub const fn setter(&self) -> Option<&SetterInfo> {
        self.setter.as_ref()
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("field", &self.field)
            .field("getter", &self.getter)
            .field("setter", &self.setter)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// RecordInfo

/// Type info of a record: a struct with named members.
#[derive(Debug)]
pub struct RecordInfo {
    ty: Type,
    constructor: Option<Constructor>,
    members: Box<[MemberInfo]>,
}

impl RecordInfo {
    /// Creates record info from members in declaration order.
    pub fn new<T: Any>(members: impl Into<Box<[MemberInfo]>>) -> Self {
        Self {
            ty: Type::of::<T>(),
            constructor: None,
            members: members.into(),
        }
    }

    /// Registers `T::default` as the constructor used by forced creation.
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
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Linear lookup by name. The introspector keeps an index for hot paths.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|member| member.name == name)
    }
}
