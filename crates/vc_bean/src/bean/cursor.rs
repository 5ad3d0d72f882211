use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::ToString;
use core::fmt;

use fastvec::FastVec;

use crate::access::{IndexKey, OffsetSegment, PropertyPath};
use crate::bean::container::AdapterError;
use crate::bean::{BeanError, PropertyContext};
use crate::info::TypeInfo;
use crate::registry::MemberDescriptor;

// -----------------------------------------------------------------------------
// Steps

/// One hop of a traversal. `name[key]` expands into a member step followed
/// by an index step, both pointing at the same segment.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Step<'a> {
    Member(&'a str),
    Index(IndexKey<'a>),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PathStep<'a> {
    pub step: Step<'a>,
    pub segment: OffsetSegment<'a>,
}

pub(crate) fn expand<'a>(path: &PropertyPath<'a>) -> Box<[PathStep<'a>]> {
    let mut vec: FastVec<PathStep<'a>, 8> = FastVec::new();
    let data = vec.data();

    for segment in path.iter() {
        if let Some(name) = segment.segment.name() {
            data.push(PathStep {
                step: Step::Member(name),
                segment: *segment,
            });
        }
        if let Some(index) = segment.segment.index() {
            data.push(PathStep {
                step: Step::Index(index),
                segment: *segment,
            });
        }
    }

    vec.into_boxed_slice()
}

/// Parses `path` and expands it into steps.
pub(crate) fn parse_steps(path: &str) -> Result<Box<[PathStep<'_>]>, BeanError> {
    match PropertyPath::parse(path) {
        Ok(parsed) => Ok(expand(&parsed)),
        Err(err) => Err(BeanError::InvalidProperty {
            context: PropertyContext {
                path: path.into(),
                segment: path[err.offset..].into(),
                offset: err.offset,
                container: None,
            },
            reason: Cow::Owned(err.error.into_owned()),
        }),
    }
}

// -----------------------------------------------------------------------------
// BeanProperty

/// The traversal state of one navigation call.
///
/// Created per call and dropped on completion. It records where the
/// traversal is, so that failures carry their path context.
pub(crate) struct BeanProperty<'a> {
    path: &'a str,
    pub declared: bool,
    pub forced: bool,
    len: usize,
    position: Option<usize>,
    step: Option<PathStep<'a>>,
    previous: Option<PathStep<'a>>,
    container: Option<&'static TypeInfo>,
    previous_container: Option<&'static TypeInfo>,
    /// Declared type of the value the last step resolved to.
    declared_type: Option<&'static TypeInfo>,
    descriptor: Option<MemberDescriptor>,
}

impl<'a> BeanProperty<'a> {
    pub fn new(path: &'a str, steps: &[PathStep<'a>], declared: bool, forced: bool) -> Self {
        Self {
            path,
            declared,
            forced,
            len: steps.len(),
            position: None,
            step: None,
            previous: None,
            container: None,
            previous_container: None,
            declared_type: None,
            descriptor: None,
        }
    }

    /// Moves to the next step, applied to a container of type `container`.
    pub fn enter(&mut self, step: &PathStep<'a>, container: &'static TypeInfo) {
        self.position = Some(self.position.map_or(0, |position| position + 1));
        self.previous = self.step.replace(*step);
        self.previous_container = self.container.replace(container);
        self.descriptor = None;
    }

    #[inline]
    pub fn is_last(&self) -> bool {
        self.position.is_some_and(|position| position + 1 == self.len)
    }

    #[inline]
    pub fn declared_type(&self) -> Option<&'static TypeInfo> {
        self.declared_type
    }

    #[inline]
    pub fn set_declared_type(&mut self, info: Option<&'static TypeInfo>) {
        self.declared_type = info;
    }

    /// Records the member the current step resolved to.
    #[inline]
    pub fn resolve(&mut self, descriptor: MemberDescriptor) {
        self.declared_type = Some(descriptor.declared_type());
        self.descriptor = Some(descriptor);
    }

    pub fn context(&self) -> PropertyContext {
        match self.step {
            Some(step) => self.context_at(&step, self.container),
            None => PropertyContext::whole(self.path),
        }
    }

    pub fn context_at(&self, step: &PathStep<'_>, container: Option<&'static TypeInfo>) -> PropertyContext {
        PropertyContext {
            path: self.path.into(),
            segment: step.segment.segment.to_string(),
            offset: step.segment.offset,
            container: container.map(TypeInfo::type_path),
        }
    }

    pub fn error(&self, error: AdapterError) -> BeanError {
        let context = self.context();
        let container = context.container.unwrap_or("value");
        match error {
            AdapterError::NotFound => BeanError::PropertyNotFound { context },
            AdapterError::Null => BeanError::NullProperty { context },
            AdapterError::NotIndexable => BeanError::InvalidProperty {
                reason: Cow::Owned(alloc::format!("`{container}` is not indexable")),
                context,
            },
            AdapterError::BadIndex => BeanError::InvalidProperty {
                reason: Cow::Borrowed("sequence index must be a non-negative integer"),
                context,
            },
            AdapterError::ReadOnly => BeanError::InvalidProperty {
                reason: Cow::Owned(alloc::format!("`{container}` is read-only")),
                context,
            },
            AdapterError::Invoke(source) => BeanError::InvokeProperty { context, source },
            AdapterError::Forced { reason, source } => BeanError::Forced {
                context,
                reason,
                source,
            },
        }
    }
}

impl fmt::Display for BeanProperty<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.path)?;
        if let Some(step) = &self.step {
            write!(f, " at `{}`", step.segment.segment)?;
            if self.is_last() {
                f.write_str(" (last)")?;
            }
        }
        if let Some(container) = self.container {
            write!(f, " on `{}`", container.type_path())?;
        }
        if let Some(member) = &self.descriptor {
            write!(f, " as `{}`", member.declared_type().type_path())?;
        }
        if let (Some(previous), Some(container)) = (&self.previous, self.previous_container) {
            write!(f, ", after `{}` on `{}`", previous.segment.segment, container.type_path())?;
        }
        Ok(())
    }
}
