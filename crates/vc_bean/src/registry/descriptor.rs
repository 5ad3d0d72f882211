use alloc::boxed::Box;
use core::ops::Deref;

use crate::Reflect;
use crate::info::{BoxError, GetterKind, MemberInfo, ReflectKind, SetterKind, TypeInfo};
use crate::ops::{ReflectCloneError, ReflectMut, ReflectRef, assign};
use crate::utils::{FixedHashMap, new_fixed_map};

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The resolved metadata of one type, as cached by the
/// [`Introspector`](crate::registry::Introspector).
#[derive(Debug)]
pub struct TypeDescriptor {
    info: &'static TypeInfo,
    members: Box<[MemberDescriptor]>,
    index: FixedHashMap<&'static str, usize>,
}

impl TypeDescriptor {
    pub(crate) fn new(info: &'static TypeInfo) -> Self {
        let members: Box<[MemberDescriptor]> = match info.as_record() {
            Ok(record) => record
                .members()
                .iter()
                .map(|member| MemberDescriptor {
                    info: member,
                    owner: info,
                })
                .collect(),
            Err(_) => Box::new([]),
        };

        let mut index = new_fixed_map();
        for (position, member) in members.iter().enumerate() {
            index.insert(member.name(), position);
        }

        Self {
            info,
            members,
            index,
        }
    }

    #[inline]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.info
    }

    /// All members in declaration order, regardless of visibility.
    #[inline]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Returns the member named `name` if any of its parts is visible in
    /// the given mode.
    pub fn member(&self, name: &str, declared: bool) -> Option<MemberDescriptor> {
        let member = self.members[*self.index.get(name)?];
        member.is_visible(declared).then_some(member)
    }

    #[inline]
    pub fn is_record_like(&self) -> bool {
        matches!(self.info.kind(), ReflectKind::Record | ReflectKind::Opaque)
    }

    #[inline]
    pub fn is_dictionary_like(&self) -> bool {
        self.info.kind() == ReflectKind::Dictionary
    }

    #[inline]
    pub fn is_sequence_like(&self) -> bool {
        self.info.kind() == ReflectKind::Sequence
    }

    #[inline]
    pub fn is_supplier_like(&self) -> bool {
        self.info.kind() == ReflectKind::Supplier
    }
}

// -----------------------------------------------------------------------------
// MemberDescriptor

/// A member of a record type, resolved against the visibility rules.
#[derive(Debug, Clone, Copy)]
pub struct MemberDescriptor {
    info: &'static MemberInfo,
    owner: &'static TypeInfo,
}

impl MemberDescriptor {
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.info.name()
    }

    #[inline]
    pub const fn info(&self) -> &'static MemberInfo {
        self.info
    }

    /// The record type declaring this member.
    #[inline]
    pub const fn owner(&self) -> &'static TypeInfo {
        self.owner
    }

    /// The declared type of the member.
    #[inline]
    pub fn declared_type(&self) -> &'static TypeInfo {
        self.info.type_info()
    }

    #[inline]
    pub fn has_field(&self) -> bool {
        self.info.field_visibility().is_some()
    }

    /// Returns `true` if the raw field exists and is visible.
    #[inline]
    pub fn field(&self, declared: bool) -> bool {
        self.info.field_visibility().is_some_and(|vis| vis.is_visible(declared))
    }

    /// Returns `true` if the raw field, the getter or the setter is visible.
    pub fn is_visible(&self, declared: bool) -> bool {
        self.field(declared)
            || self.info.getter().is_some_and(|g| g.visibility.is_visible(declared))
            || self.info.setter().is_some_and(|s| s.visibility.is_visible(declared))
    }

    /// Returns the visible getter, falling back to the raw field.
    pub fn getter(&self, declared: bool) -> Option<Getter> {
        let kind = match self.info.getter() {
            Some(getter) if getter.visibility.is_visible(declared) => getter.kind,
            _ if self.field(declared) => GetterKind::Field,
            _ => return None,
        };
        Some(Getter {
            name: self.name(),
            kind,
        })
    }

    /// Returns the visible setter, falling back to the raw field.
    pub fn setter(&self, declared: bool) -> Option<Setter> {
        let kind = match self.info.setter() {
            Some(setter) if setter.visibility.is_visible(declared) => setter.kind,
            _ if self.field(declared) => SetterKind::Field,
            _ => return None,
        };
        Some(Setter {
            name: self.name(),
            kind,
        })
    }
}

// -----------------------------------------------------------------------------
// Accessors

/// A backing field could not be reached.
#[derive(Debug, thiserror::Error)]
pub enum AccessorError {
    #[error("`{ty}` has no backing field `{name}`")]
    MissingField {
        ty: &'static str,
        name: &'static str,
    },
    #[error("`{ty}` is not a record")]
    NotARecord { ty: &'static str },
}

fn field_ref<'a>(bean: &'a dyn Reflect, name: &'static str) -> Result<&'a dyn Reflect, AccessorError> {
    let ty = bean.reflect_type_path();
    match bean.reflect_ref() {
        ReflectRef::Record(record) => record
            .field(name)
            .ok_or(AccessorError::MissingField { ty, name }),
        _ => Err(AccessorError::NotARecord { ty }),
    }
}

fn field_mut<'a>(
    bean: &'a mut dyn Reflect,
    name: &'static str,
) -> Result<&'a mut dyn Reflect, AccessorError> {
    let ty = bean.reflect_type_path();
    match bean.reflect_mut() {
        ReflectMut::Record(record) => record
            .field_mut(name)
            .ok_or(AccessorError::MissingField { ty, name }),
        _ => Err(AccessorError::NotARecord { ty }),
    }
}

/// A readable member: either its backing field or a method.
#[derive(Debug, Clone, Copy)]
pub struct Getter {
    name: &'static str,
    kind: GetterKind,
}

impl Getter {
    /// Returns `true` if the getter reads the backing field in place.
    #[inline]
    pub const fn is_field(&self) -> bool {
        matches!(self.kind, GetterKind::Field)
    }

    /// Reads the member of `bean`. Field getters borrow, method getters
    /// produce an owned value.
    pub fn invoke<'a>(&self, bean: &'a dyn Reflect) -> Result<PropertyValue<'a>, BoxError> {
        match self.kind {
            GetterKind::Field => Ok(PropertyValue::Borrowed(field_ref(bean, self.name)?)),
            GetterKind::Method(getter) => getter(bean).map(PropertyValue::Owned),
        }
    }

    /// Borrows the member mutably. Only field getters can do this, method
    /// getters yield `None`.
    pub fn invoke_mut<'a>(
        &self,
        bean: &'a mut dyn Reflect,
    ) -> Option<Result<&'a mut dyn Reflect, BoxError>> {
        match self.kind {
            GetterKind::Field => Some(field_mut(bean, self.name).map_err(Into::into)),
            GetterKind::Method(_) => None,
        }
    }
}

/// A writable member: either its backing field or a method.
#[derive(Debug, Clone, Copy)]
pub struct Setter {
    name: &'static str,
    kind: SetterKind,
}

impl Setter {
    #[inline]
    pub const fn is_field(&self) -> bool {
        matches!(self.kind, SetterKind::Field)
    }

    /// Writes `value` into the member of `bean`, `None` being null.
    pub fn invoke(&self, bean: &mut dyn Reflect, value: Option<Box<dyn Reflect>>) -> Result<(), BoxError> {
        match self.kind {
            SetterKind::Field => {
                let slot = field_mut(bean, self.name)?;
                assign(slot, value)?;
                Ok(())
            }
            SetterKind::Method(setter) => setter(bean, value),
        }
    }
}

// -----------------------------------------------------------------------------
// PropertyValue

/// The result of a getter: a borrow of a backing field, or an owned value
/// produced by a method.
pub enum PropertyValue<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Box<dyn Reflect>),
}

impl PropertyValue<'_> {
    #[inline]
    pub fn as_reflect(&self) -> &dyn Reflect {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }

    /// Converts into an owned value, cloning borrowed ones.
    pub fn into_owned(self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        match self {
            Self::Borrowed(value) => value.reflect_clone(),
            Self::Owned(value) => Ok(value),
        }
    }
}

impl Deref for PropertyValue<'_> {
    type Target = dyn Reflect;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_reflect()
    }
}

impl core::fmt::Debug for PropertyValue<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.as_reflect().reflect_debug(f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use core::convert::Infallible;

    use crate::derive::Bean;
    use crate::registry::Introspector;

    #[derive(Bean, Default)]
    #[bean(property(name = "shout", ty = String, get = Sample::shout))]
    struct Sample {
        pub name: String,
        hidden: u8,
        #[bean(raw)]
        pub raw: u8,
    }

    impl Sample {
        fn shout(&self) -> Result<String, Infallible> {
            Ok(self.name.to_uppercase())
        }
    }

    #[test]
    fn visibility_by_mode() {
        let descriptor = Introspector::new().lookup_type::<Sample>();

        assert_eq!(descriptor.members().len(), 4);
        assert!(descriptor.member("hidden", false).is_none());
        assert!(descriptor.member("hidden", true).is_some());
        assert!(descriptor.member("nope", true).is_none());

        let raw = descriptor.member("raw", false).unwrap();
        assert!(raw.has_field() && raw.field(false));
        assert!(raw.info().getter().is_none());
        assert!(raw.getter(false).unwrap().is_field());

        let shout = descriptor.member("shout", false).unwrap();
        assert!(!shout.has_field());
        assert!(!shout.getter(false).unwrap().is_field());
        assert!(shout.setter(true).is_none());
    }

    #[test]
    fn getters_and_setters() {
        let descriptor = Introspector::new().lookup_type::<Sample>();
        let mut sample = Sample {
            name: String::from("quiet"),
            hidden: 1,
            raw: 2,
        };

        let name = descriptor.member("name", false).unwrap();
        name.setter(false)
            .unwrap()
            .invoke(&mut sample, Some(Box::new(String::from("loud"))))
            .unwrap();
        assert!(name.setter(false).unwrap().invoke(&mut sample, None).is_err());

        let shout = descriptor.member("shout", false).unwrap().getter(false).unwrap();
        let value = shout.invoke(&sample).unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("LOUD"));
        assert!(shout.invoke_mut(&mut sample).is_none());

        let hidden = descriptor.member("hidden", true).unwrap().getter(true).unwrap();
        *hidden
            .invoke_mut(&mut sample)
            .unwrap()
            .unwrap()
            .downcast_mut::<u8>()
            .unwrap() = 9;
        let owned = hidden.invoke(&sample).unwrap().into_owned().unwrap();
        assert_eq!(owned.take::<u8>().ok(), Some(9));
    }
}
