use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::info::BoxError;

// -----------------------------------------------------------------------------
// PropertyContext

/// Where a navigation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyContext {
    /// The whole property path of the call.
    pub path: String,
    /// The text of the failing segment.
    pub segment: String,
    /// Byte position of the failing segment in `path`.
    pub offset: usize,
    /// Type path of the container the segment was applied to, if one was reached.
    pub container: Option<&'static str>,
}

impl PropertyContext {
    /// A context pointing at the whole path.
    pub fn whole(path: &str) -> Self {
        Self {
            path: path.into(),
            segment: path.into(),
            offset: 0,
            container: None,
        }
    }
}

impl fmt::Display for PropertyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.path)?;
        if self.segment != self.path {
            write!(f, " at `{}` (offset {})", self.segment, self.offset)?;
        }
        if let Some(container) = self.container {
            write!(f, " on `{container}`")?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// BeanError

/// The error taxonomy of the navigator.
///
/// Every variant carries the [`PropertyContext`] of the failing segment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BeanError {
    /// Malformed path, or a segment that cannot apply to its container.
    #[error("invalid property {context}: {reason}")]
    InvalidProperty {
        context: PropertyContext,
        reason: Cow<'static, str>,
    },

    /// No member, key or position resolves for a segment.
    #[error("property not found: {context}")]
    PropertyNotFound { context: PropertyContext },

    /// A required intermediate is null and is not created.
    #[error("null property: {context}")]
    NullProperty { context: PropertyContext },

    /// A getter or a setter failed when invoked.
    #[error("failed to invoke property {context}")]
    InvokeProperty {
        context: PropertyContext,
        #[source]
        source: BoxError,
    },

    /// Forced creation of a missing intermediate failed.
    #[error("forced creation failed for {context}: {reason}")]
    Forced {
        context: PropertyContext,
        reason: Cow<'static, str>,
        #[source]
        source: Option<BoxError>,
    },

    /// A typed read found a value of another type.
    #[error("property {context} holds `{found}`, not `{expected}`")]
    InvalidDowncast {
        context: PropertyContext,
        expected: &'static str,
        found: &'static str,
    },
}

impl BeanError {
    #[inline]
    pub fn context(&self) -> &PropertyContext {
        match self {
            Self::InvalidProperty { context, .. }
            | Self::PropertyNotFound { context }
            | Self::NullProperty { context }
            | Self::InvokeProperty { context, .. }
            | Self::Forced { context, .. }
            | Self::InvalidDowncast { context, .. } => context,
        }
    }

    /// Returns `true` for the one error silent mode swallows.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PropertyNotFound { .. })
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::NullProperty { .. })
    }

    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::InvalidProperty { .. })
    }

    #[inline]
    pub fn is_invoke(&self) -> bool {
        matches!(self, Self::InvokeProperty { .. })
    }

    #[inline]
    pub fn is_forced(&self) -> bool {
        matches!(self, Self::Forced { .. })
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;

    use super::{BeanError, PropertyContext};

    #[test]
    fn display_context() {
        let context = PropertyContext {
            path: String::from("a.b[2]"),
            segment: String::from("b[2]"),
            offset: 2,
            container: Some("demo::A"),
        };
        assert_eq!(format!("{context}"), "`a.b[2]` at `b[2]` (offset 2) on `demo::A`");
        assert_eq!(format!("{}", PropertyContext::whole("x")), "`x`");

        let error = BeanError::PropertyNotFound { context };
        assert!(error.is_not_found());
        assert_eq!(error.context().offset, 2);
        assert_eq!(
            format!("{error}"),
            "property not found: `a.b[2]` at `b[2]` (offset 2) on `demo::A`"
        );
    }
}
