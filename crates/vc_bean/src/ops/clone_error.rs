/// The error outcomes of [`Reflect::reflect_clone`](crate::Reflect::reflect_clone).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReflectCloneError {
    /// The type does not support cloning.
    #[error("`reflect_clone` is not supported for `{type_path}`")]
    NotSupported { type_path: &'static str },
    /// A field could not be cloned.
    #[error("field `{type_path}::{field}` cannot be cloned")]
    FieldNotCloneable {
        type_path: &'static str,
        field: &'static str,
    },
}
