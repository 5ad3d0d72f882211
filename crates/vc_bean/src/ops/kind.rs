use alloc::boxed::Box;

use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{Dictionary, LazySupplier, Optional, Record, Sequence};

/// An immutable view of a reflected value, by kind.
pub enum ReflectRef<'a> {
    Record(&'a dyn Record),
    Dictionary(&'a dyn Dictionary),
    Sequence(&'a dyn Sequence),
    Supplier(&'a dyn LazySupplier),
    Optional(&'a dyn Optional),
    Opaque(&'a dyn Reflect),
}

/// A mutable view of a reflected value, by kind.
pub enum ReflectMut<'a> {
    Record(&'a mut dyn Record),
    Dictionary(&'a mut dyn Dictionary),
    Sequence(&'a mut dyn Sequence),
    Supplier(&'a mut dyn LazySupplier),
    Optional(&'a mut dyn Optional),
    Opaque(&'a mut dyn Reflect),
}

/// An owned reflected value, by kind.
pub enum ReflectOwned {
    Record(Box<dyn Record>),
    Dictionary(Box<dyn Dictionary>),
    Sequence(Box<dyn Sequence>),
    Supplier(Box<dyn LazySupplier>),
    Optional(Box<dyn Optional>),
    Opaque(Box<dyn Reflect>),
}

impl<'a> ReflectRef<'a> {
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

    /// Returns the value as a plain `&dyn Reflect`.
    pub fn as_reflect(&self) -> &'a dyn Reflect {
        match *self {
            Self::Record(value) => value,
            Self::Dictionary(value) => value,
            Self::Sequence(value) => value,
            Self::Supplier(value) => value,
            Self::Optional(value) => value,
            Self::Opaque(value) => value,
        }
    }
}

impl<'a> ReflectMut<'a> {
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

    /// Returns the value as a plain `&mut dyn Reflect`.
    pub fn into_reflect(self) -> &'a mut dyn Reflect {
        match self {
            Self::Record(value) => value,
            Self::Dictionary(value) => value,
            Self::Sequence(value) => value,
            Self::Supplier(value) => value,
            Self::Optional(value) => value,
            Self::Opaque(value) => value,
        }
    }
}

impl ReflectOwned {
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

    /// Returns the value as a plain `Box<dyn Reflect>`.
    pub fn into_reflect(self) -> Box<dyn Reflect> {
        match self {
            Self::Record(value) => value,
            Self::Dictionary(value) => value,
            Self::Sequence(value) => value,
            Self::Supplier(value) => value,
            Self::Optional(value) => value,
            Self::Opaque(value) => value,
        }
    }
}
