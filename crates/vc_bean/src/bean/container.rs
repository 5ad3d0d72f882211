use alloc::borrow::Cow;
use alloc::boxed::Box;

use crate::Reflect;
use crate::access::IndexKey;
use crate::bean::cursor::{BeanProperty, Step};
use crate::info::{BoxError, TypeInfo};
use crate::ops::{Dictionary, DynamicMap, ReflectMut, ReflectOwned, ReflectRef, Sequence, assign};
use crate::registry::{Introspector, PropertyValue};

// -----------------------------------------------------------------------------
// AdapterError

/// A failed container operation, turned into a
/// [`BeanError`](crate::bean::BeanError) by the cursor.
#[derive(Debug)]
pub(crate) enum AdapterError {
    NotFound,
    Null,
    NotIndexable,
    BadIndex,
    ReadOnly,
    Invoke(BoxError),
    Forced {
        reason: Cow<'static, str>,
        source: Option<BoxError>,
    },
}

impl AdapterError {
    fn forced(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Forced {
            reason: reason.into(),
            source: None,
        }
    }
}

// -----------------------------------------------------------------------------
// Resolution

/// Strips nullable wrappers, `None` being null.
pub(crate) fn resolve_optional(mut value: PropertyValue<'_>) -> Option<PropertyValue<'_>> {
    loop {
        value = match value {
            PropertyValue::Borrowed(inner) => match inner.reflect_ref() {
                ReflectRef::Optional(optional) => PropertyValue::Borrowed(optional.value()?),
                _ => return Some(PropertyValue::Borrowed(inner)),
            },
            PropertyValue::Owned(inner) => match inner.reflect_owned() {
                ReflectOwned::Optional(optional) => PropertyValue::Owned(optional.take_value()?),
                owned => return Some(PropertyValue::Owned(owned.into_reflect())),
            },
        };
    }
}

/// Resolves a value into the container a step is applied to: nullable
/// wrappers are stripped and a supplier is invoked once.
pub(crate) fn resolve_container(value: PropertyValue<'_>) -> Option<PropertyValue<'_>> {
    let value = resolve_optional(value)?;
    let supplied = match value.reflect_ref() {
        ReflectRef::Supplier(supplier) => {
            log::trace!("unwrapping supplier `{}`", supplier.reflect_type_path());
            supplier.supply()
        }
        _ => return Some(value),
    };
    resolve_optional(PropertyValue::Owned(supplied))
}

pub(crate) fn resolve_optional_mut(mut value: &mut dyn Reflect) -> Option<&mut dyn Reflect> {
    loop {
        match value.reflect_mut() {
            ReflectMut::Optional(optional) => value = optional.value_mut()?,
            other => return Some(other.into_reflect()),
        }
    }
}

pub(crate) fn is_null(mut value: &dyn Reflect) -> bool {
    loop {
        match value.reflect_ref() {
            ReflectRef::Optional(optional) => match optional.value() {
                Some(inner) => value = inner,
                None => return true,
            },
            _ => return false,
        }
    }
}

/// Default-constructs the content of a slot declared as `declared`.
fn construct(declared: &'static TypeInfo) -> Result<Box<dyn Reflect>, AdapterError> {
    let target = declared.unwrap_optional();
    match target.constructor() {
        Some(constructor) => {
            log::trace!("creating a default `{}`", target.type_path());
            Ok(constructor())
        }
        None => Err(AdapterError::forced(alloc::format!(
            "`{}` has no default constructor",
            target.type_path()
        ))),
    }
}

fn record_field<'a>(bean: &'a dyn Reflect, name: &str) -> Option<&'a dyn Reflect> {
    match bean.reflect_ref() {
        ReflectRef::Record(record) => record.field(name),
        _ => None,
    }
}

fn record_field_mut<'a>(bean: &'a mut dyn Reflect, name: &str) -> Option<&'a mut dyn Reflect> {
    match bean.reflect_mut() {
        ReflectMut::Record(record) => record.field_mut(name),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Container

/// A resolved value viewed as one of the navigable container kinds.
///
/// Leaves are records without members.
pub(crate) enum Container<'a> {
    Record(&'a dyn Reflect),
    Dictionary(&'a dyn Dictionary),
    Sequence(&'a dyn Sequence),
    Supplier,
}

impl<'a> Container<'a> {
    pub fn classify(value: &'a dyn Reflect) -> Self {
        match value.reflect_ref() {
            ReflectRef::Dictionary(dictionary) => Self::Dictionary(dictionary),
            ReflectRef::Sequence(sequence) => Self::Sequence(sequence),
            ReflectRef::Supplier(_) => Self::Supplier,
            ReflectRef::Record(_) | ReflectRef::Optional(_) | ReflectRef::Opaque(_) => Self::Record(value),
        }
    }

    /// Reads the child a step designates. `Ok(None)` is a null entry.
    pub fn get(
        &self,
        introspector: &Introspector,
        cursor: &mut BeanProperty<'_>,
        step: Step<'_>,
    ) -> Result<Option<PropertyValue<'a>>, AdapterError> {
        match (self, step) {
            (Self::Record(bean), Step::Member(name)) => {
                let descriptor = introspector.describe(*bean);
                let member = descriptor
                    .member(name, cursor.declared)
                    .ok_or(AdapterError::NotFound)?;
                cursor.resolve(member);
                let getter = member.getter(cursor.declared).ok_or(AdapterError::NotFound)?;
                getter.invoke(*bean).map(Some).map_err(AdapterError::Invoke)
            }
            (Self::Record(_) | Self::Supplier, Step::Index(_)) => Err(AdapterError::NotIndexable),
            (Self::Dictionary(dictionary), Step::Member(key)) => dictionary_get(*dictionary, cursor, key),
            (Self::Dictionary(dictionary), Step::Index(key)) => {
                dictionary_get(*dictionary, cursor, &key.as_key())
            }
            (Self::Sequence(sequence), Step::Index(key)) => {
                let position = key.position().ok_or(AdapterError::BadIndex)?;
                cursor.set_declared_type(sequence.item_info());
                match sequence.get(position) {
                    Some(item) => Ok(Some(PropertyValue::Borrowed(item))),
                    None => Err(AdapterError::NotFound),
                }
            }
            (Self::Sequence(_) | Self::Supplier, Step::Member(_)) => Err(AdapterError::NotFound),
        }
    }
}

fn dictionary_get<'a>(
    dictionary: &'a dyn Dictionary,
    cursor: &mut BeanProperty<'_>,
    key: &str,
) -> Result<Option<PropertyValue<'a>>, AdapterError> {
    cursor.set_declared_type(dictionary.value_info());
    if !dictionary.contains_key(key) {
        return Err(AdapterError::NotFound);
    }
    Ok(dictionary.get(key).map(PropertyValue::Borrowed))
}

// -----------------------------------------------------------------------------
// ContainerMut

/// The mutable counterpart of [`Container`], used by writes.
pub(crate) enum ContainerMut<'a> {
    Record(&'a mut dyn Reflect),
    Dictionary(&'a mut dyn Dictionary),
    Sequence(&'a mut dyn Sequence),
    Supplier,
}

impl<'a> ContainerMut<'a> {
    pub fn classify(value: &'a mut dyn Reflect) -> Self {
        match value.reflect_mut() {
            ReflectMut::Dictionary(dictionary) => Self::Dictionary(dictionary),
            ReflectMut::Sequence(sequence) => Self::Sequence(sequence),
            ReflectMut::Supplier(_) => Self::Supplier,
            other => Self::Record(other.into_reflect()),
        }
    }

    /// Borrows the child a step designates, creating it first when it is
    /// null or missing and the cursor is forced.
    pub fn descend(
        self,
        introspector: &Introspector,
        cursor: &mut BeanProperty<'_>,
        step: Step<'_>,
    ) -> Result<&'a mut dyn Reflect, AdapterError> {
        let slot = match (self, step) {
            (Self::Record(bean), Step::Member(name)) => record_descend(bean, introspector, cursor, name)?,
            (Self::Record(_), Step::Index(_)) => return Err(AdapterError::NotIndexable),
            (Self::Dictionary(dictionary), Step::Member(key)) => dictionary_descend(dictionary, cursor, key)?,
            (Self::Dictionary(dictionary), Step::Index(key)) => {
                dictionary_descend(dictionary, cursor, &key.as_key())?
            }
            (Self::Sequence(sequence), Step::Index(key)) => sequence_descend(sequence, cursor, key)?,
            (Self::Sequence(_), Step::Member(_)) => return Err(AdapterError::NotFound),
            (Self::Supplier, _) => return Err(AdapterError::ReadOnly),
        };
        resolve_optional_mut(slot).ok_or(AdapterError::Null)
    }

    /// Writes `value` into the slot a step designates.
    pub fn assign(
        self,
        introspector: &Introspector,
        cursor: &mut BeanProperty<'_>,
        step: Step<'_>,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), AdapterError> {
        match (self, step) {
            (Self::Record(bean), Step::Member(name)) => {
                let descriptor = introspector.describe(&*bean);
                let member = descriptor
                    .member(name, cursor.declared)
                    .ok_or(AdapterError::NotFound)?;
                cursor.resolve(member);
                let setter = member.setter(cursor.declared).ok_or(AdapterError::NotFound)?;
                setter.invoke(bean, value).map_err(AdapterError::Invoke)
            }
            (Self::Record(_), Step::Index(_)) => Err(AdapterError::NotIndexable),
            (Self::Dictionary(dictionary), Step::Member(key)) => dictionary_insert(dictionary, cursor, key, value),
            (Self::Dictionary(dictionary), Step::Index(key)) => {
                dictionary_insert(dictionary, cursor, &key.as_key(), value)
            }
            (Self::Sequence(sequence), Step::Index(key)) => {
                let position = key.position().ok_or(AdapterError::BadIndex)?;
                cursor.set_declared_type(sequence.item_info());
                if let Some(slot) = sequence.get_mut(position) {
                    return assign(slot, value).map_err(|err| AdapterError::Invoke(err.into()));
                }
                if !cursor.forced {
                    return Err(AdapterError::NotFound);
                }
                let item = detached_item(&*sequence, value)?;
                grow(sequence, cursor, position)?;
                sequence
                    .push(item)
                    .map_err(|err| AdapterError::Invoke(err.into()))
            }
            (Self::Sequence(_), Step::Member(_)) => Err(AdapterError::NotFound),
            (Self::Supplier, _) => Err(AdapterError::ReadOnly),
        }
    }
}

fn record_descend<'a>(
    bean: &'a mut dyn Reflect,
    introspector: &Introspector,
    cursor: &mut BeanProperty<'_>,
    name: &str,
) -> Result<&'a mut dyn Reflect, AdapterError> {
    let descriptor = introspector.describe(&*bean);
    let member = descriptor
        .member(name, cursor.declared)
        .ok_or(AdapterError::NotFound)?;
    cursor.resolve(member);

    // Writes go through the backing field of a readable member.
    if member.getter(cursor.declared).is_none() {
        return Err(AdapterError::NotFound);
    }
    if !member.has_field() {
        return Err(AdapterError::ReadOnly);
    }

    let slot = record_field(&*bean, member.name()).ok_or(AdapterError::NotFound)?;
    if is_null(slot) {
        if !cursor.forced {
            return Err(AdapterError::Null);
        }
        let value = construct(member.declared_type())?;
        let setter = member.setter(cursor.declared).ok_or_else(|| {
            AdapterError::forced(alloc::format!("`{}` has no visible setter", member.name()))
        })?;
        log::trace!("forced creation at {cursor}");
        setter
            .invoke(&mut *bean, Some(value))
            .map_err(|source| AdapterError::Forced {
                reason: Cow::Borrowed("setter failed"),
                source: Some(source),
            })?;
    }

    record_field_mut(bean, member.name()).ok_or(AdapterError::NotFound)
}

fn dictionary_descend<'a>(
    dictionary: &'a mut dyn Dictionary,
    cursor: &mut BeanProperty<'_>,
    key: &str,
) -> Result<&'a mut dyn Reflect, AdapterError> {
    let value_info = dictionary.value_info();
    cursor.set_declared_type(value_info);

    let present = dictionary.contains_key(key);
    if !present && !cursor.forced {
        return Err(AdapterError::NotFound);
    }

    if dictionary.get(key).is_none_or(is_null) {
        if !cursor.forced {
            return Err(AdapterError::Null);
        }
        let value = match value_info {
            Some(info) => construct(info)?,
            None => Box::new(DynamicMap::new()),
        };
        log::trace!("forced creation at {cursor}");
        dictionary
            .insert(key, Some(value))
            .map_err(|err| AdapterError::Forced {
                reason: Cow::Borrowed("insertion failed"),
                source: Some(err.into()),
            })?;
    }

    dictionary.get_mut(key).ok_or(AdapterError::Null)
}

fn sequence_descend<'a>(
    sequence: &'a mut dyn Sequence,
    cursor: &mut BeanProperty<'_>,
    key: IndexKey<'_>,
) -> Result<&'a mut dyn Reflect, AdapterError> {
    let position = key.position().ok_or(AdapterError::BadIndex)?;
    let item_info = sequence.item_info();
    cursor.set_declared_type(item_info);

    if position >= sequence.len() {
        if !cursor.forced {
            return Err(AdapterError::NotFound);
        }
        let info = item_info.ok_or_else(|| AdapterError::forced("unknown item type"))?;
        let value = construct(info)?;
        grow(sequence, cursor, position)?;
        log::trace!("forced creation at {cursor}");
        sequence
            .push(Some(value))
            .map_err(|err| AdapterError::Forced {
                reason: Cow::Borrowed("growth failed"),
                source: Some(err.into()),
            })?;
    } else if sequence.get(position).is_none_or(is_null) {
        if !cursor.forced {
            return Err(AdapterError::Null);
        }
        let info = item_info.ok_or_else(|| AdapterError::forced("unknown item type"))?;
        let value = construct(info)?;
        log::trace!("forced creation at {cursor}");
        let slot = sequence.get_mut(position).ok_or(AdapterError::NotFound)?;
        assign(slot, Some(value)).map_err(|err| AdapterError::Forced {
            reason: Cow::Borrowed("assignment failed"),
            source: Some(err.into()),
        })?;
    }

    sequence.get_mut(position).ok_or(AdapterError::NotFound)
}

fn dictionary_insert(
    dictionary: &mut dyn Dictionary,
    cursor: &mut BeanProperty<'_>,
    key: &str,
    value: Option<Box<dyn Reflect>>,
) -> Result<(), AdapterError> {
    cursor.set_declared_type(dictionary.value_info());
    dictionary
        .insert(key, value)
        .map_err(|err| AdapterError::Invoke(err.into()))
}

/// Stores `value` into a fresh default item, so a rejected value fails
/// before the sequence is padded. Items without a default are passed
/// through as they are.
fn detached_item(
    sequence: &dyn Sequence,
    value: Option<Box<dyn Reflect>>,
) -> Result<Option<Box<dyn Reflect>>, AdapterError> {
    let Some(constructor) = sequence.item_info().and_then(TypeInfo::constructor) else {
        return Ok(value);
    };
    let mut item = constructor();
    assign(&mut *item, value).map_err(|err| AdapterError::Invoke(err.into()))?;
    Ok(Some(item))
}

/// Pads `sequence` with default items up to `len`.
fn grow(sequence: &mut dyn Sequence, cursor: &BeanProperty<'_>, len: usize) -> Result<(), AdapterError> {
    if sequence.is_fixed() {
        return Err(AdapterError::forced(alloc::format!(
            "`{}` has a fixed size",
            sequence.reflect_type_path()
        )));
    }
    let item = sequence
        .item_info()
        .ok_or_else(|| AdapterError::forced("unknown item type"))?;
    let constructor = item.constructor().ok_or_else(|| {
        AdapterError::forced(alloc::format!("`{}` has no default constructor", item.type_path()))
    })?;

    if sequence.len() < len {
        log::trace!("growing `{}` to {len} items at {cursor}", sequence.reflect_type_path());
    }
    while sequence.len() < len {
        sequence
            .push(Some(constructor()))
            .map_err(|err| AdapterError::Forced {
                reason: Cow::Borrowed("growth failed"),
                source: Some(err.into()),
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use super::{is_null, resolve_container, resolve_optional, resolve_optional_mut};
    use crate::ops::Supplier;
    use crate::registry::PropertyValue;

    #[test]
    fn resolves_nested_optionals() {
        let value: Option<Option<u8>> = Some(Some(3));
        let resolved = resolve_optional(PropertyValue::Borrowed(&value)).unwrap();
        assert_eq!(resolved.downcast_ref::<u8>(), Some(&3));

        let null: Option<Option<u8>> = Some(None);
        assert!(is_null(&null));
        assert!(resolve_optional(PropertyValue::Owned(Box::new(null))).is_none());
        assert!(!is_null(&1_u8));
    }

    #[test]
    fn unwraps_supplier_once() {
        let supplier = Supplier::new(|| Some(String::from("lazy")));
        let resolved = resolve_container(PropertyValue::Borrowed(&supplier)).unwrap();
        assert_eq!(resolved.downcast_ref::<String>().map(String::as_str), Some("lazy"));

        let nested = Supplier::new(|| Supplier::new(|| 1_u8));
        let resolved = resolve_container(PropertyValue::Borrowed(&nested)).unwrap();
        assert!(resolved.is::<Supplier<u8>>());
    }

    #[test]
    fn resolves_mutably() {
        let mut value: Option<u8> = Some(1);
        *resolve_optional_mut(&mut value).unwrap().downcast_mut::<u8>().unwrap() = 2;
        assert_eq!(value, Some(2));

        let mut null: Option<u8> = None;
        assert!(resolve_optional_mut(&mut null).is_none());
    }
}
