use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// Type

/// The identity of a reflected type: its [`TypeId`] and its path.
///
/// # Examples
///
/// ```
/// # use vc_bean::info::Type;
/// let ty = Type::of::<Vec<i32>>();
/// assert!(ty.is::<Vec<i32>>());
/// assert_eq!(ty.name(), "Vec<i32>");
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    name: &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    pub fn of<T: Any + ?Sized>() -> Self {
        let path = core::any::type_name::<T>();
        Self {
            id: TypeId::of::<T>(),
            path,
            name: short_name(path),
        }
    }

    /// Returns the [`TypeId`] of the type.
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path, e.g. `alloc::vec::Vec<i32>`.
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the type path without the leading module path, e.g. `Vec<i32>`.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        TypeId::of::<T>() == self.id
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Strips the module path in front of the outermost type name.
fn short_name(path: &'static str) -> &'static str {
    let head = path.find('<').unwrap_or(path.len());
    match path[..head].rfind("::") {
        Some(index) => &path[index + 2..],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::short_name;

    #[test]
    fn short_names() {
        assert_eq!(short_name("i32"), "i32");
        assert_eq!(short_name("alloc::string::String"), "String");
        assert_eq!(
            short_name("std::collections::hash::map::HashMap<alloc::string::String, i32>"),
            "HashMap<alloc::string::String, i32>"
        );
    }
}
