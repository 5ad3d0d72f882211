use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;

use fastvec::FastVec;

use crate::access::Parser;

// -----------------------------------------------------------------------------
// ParseError

/// A property path could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid property path `{path}` at offset {offset}: {error}")]
pub struct ParseError<'a> {
    /// Byte position in `path`.
    pub offset: usize,
    /// The whole path.
    pub path: &'a str,
    /// What went wrong.
    pub error: Cow<'a, str>,
}

// -----------------------------------------------------------------------------
// IndexKey

/// The content of a `[...]` index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKey<'a> {
    /// A canonical decimal integer, usable as a sequence position.
    Position(usize),
    /// Any other text, usable as a dictionary key.
    Key(&'a str),
}

impl<'a> IndexKey<'a> {
    /// Classifies the raw text of an index. Only canonical integers without
    /// leading zeros or signs become positions.
    pub fn parse(text: &'a str) -> Self {
        let canonical = !text.is_empty()
            && text.bytes().all(|byte| byte.is_ascii_digit())
            && (text == "0" || !text.starts_with('0'));
        match canonical.then(|| text.parse::<usize>().ok()).flatten() {
            Some(position) => Self::Position(position),
            None => Self::Key(text),
        }
    }

    /// The index as a sequence position. Digit-only keys with leading zeros
    /// still count, so `[01]` addresses item 1.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Position(position) => Some(*position),
            Self::Key(key) if !key.is_empty() && key.bytes().all(|byte| byte.is_ascii_digit()) => {
                key.parse().ok()
            }
            Self::Key(_) => None,
        }
    }

    /// The index as a dictionary key. Positions are rendered in decimal.
    pub fn as_key(&self) -> Cow<'a, str> {
        match self {
            Self::Position(position) => Cow::Owned(alloc::format!("{position}")),
            Self::Key(key) => Cow::Borrowed(key),
        }
    }
}

impl fmt::Display for IndexKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(position) => write!(f, "{position}"),
            Self::Key(key) => f.write_str(key),
        }
    }
}

// -----------------------------------------------------------------------------
// Segment

/// One hop of a property path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment<'a> {
    /// `name`: a member of the current container.
    Name(&'a str),
    /// `name[key]`: a member, then an index into it.
    Indexed(&'a str, IndexKey<'a>),
    /// `[key]`: an index into the current container itself.
    Key(IndexKey<'a>),
}

impl<'a> Segment<'a> {
    /// The member name, if the segment has one.
    #[inline]
    pub const fn name(&self) -> Option<&'a str> {
        match self {
            Self::Name(name) | Self::Indexed(name, _) => Some(name),
            Self::Key(_) => None,
        }
    }

    #[inline]
    pub const fn index(&self) -> Option<IndexKey<'a>> {
        match self {
            Self::Name(_) => None,
            Self::Indexed(_, index) | Self::Key(index) => Some(*index),
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Indexed(name, index) => write!(f, "{name}[{index}]"),
            Self::Key(index) => write!(f, "[{index}]"),
        }
    }
}

/// A [`Segment`] with its byte position in the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetSegment<'a> {
    pub segment: Segment<'a>,
    pub offset: usize,
}

// -----------------------------------------------------------------------------
// PropertyPath

/// A parsed, non-empty property path.
///
/// # Examples
///
/// ```
/// use vc_bean::access::{IndexKey, PropertyPath, Segment};
///
/// let path = PropertyPath::parse("a.b[2].c[key]").unwrap();
/// let segments: Vec<_> = path.iter().map(|s| s.segment).collect();
///
/// assert_eq!(
///     segments,
///     [
///         Segment::Name("a"),
///         Segment::Indexed("b", IndexKey::Position(2)),
///         Segment::Indexed("c", IndexKey::Key("key")),
///     ]
/// );
/// assert_eq!(path.first().segment.name(), Some("a"));
/// assert!(PropertyPath::parse("a..b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath<'a> {
    path: &'a str,
    segments: Box<[OffsetSegment<'a>]>,
}

impl<'a> PropertyPath<'a> {
    pub fn parse(path: &'a str) -> Result<Self, ParseError<'a>> {
        let mut vec: FastVec<OffsetSegment<'a>, 8> = FastVec::new();
        let data = vec.data();

        for res in Parser::new(path) {
            data.push(res?);
        }

        Ok(Self {
            path,
            segments: vec.into_boxed_slice(),
        })
    }

    #[inline]
    pub const fn as_str(&self) -> &'a str {
        self.path
    }

    #[inline]
    pub fn segments(&self) -> &[OffsetSegment<'a>] {
        &self.segments
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, OffsetSegment<'a>> {
        self.segments.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// The first segment. A parsed path is never empty.
    #[inline]
    pub fn first(&self) -> &OffsetSegment<'a> {
        &self.segments[0]
    }

    #[inline]
    pub fn last(&self) -> &OffsetSegment<'a> {
        &self.segments[self.segments.len() - 1]
    }
}

impl fmt::Display for PropertyPath<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

/// Returns the leading member name of `path`: everything before the first
/// `.` or `[`.
///
/// ```
/// # use vc_bean::access::extract_this_reference;
/// assert_eq!(extract_this_reference("foo.bar"), "foo");
/// assert_eq!(extract_this_reference("foo[1].bar"), "foo");
/// assert_eq!(extract_this_reference("foo"), "foo");
/// ```
pub fn extract_this_reference(path: &str) -> &str {
    match path.find(['.', '[']) {
        Some(end) => &path[..end],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::{IndexKey, Segment};

    #[test]
    fn index_keys() {
        assert_eq!(IndexKey::parse("0"), IndexKey::Position(0));
        assert_eq!(IndexKey::parse("12"), IndexKey::Position(12));
        assert_eq!(IndexKey::parse("012"), IndexKey::Key("012"));
        assert_eq!(IndexKey::parse("012").position(), Some(12));
        assert_eq!(IndexKey::parse("-1").position(), None);
        assert_eq!(IndexKey::parse("-1"), IndexKey::Key("-1"));
        assert_eq!(IndexKey::parse("key"), IndexKey::Key("key"));
        assert_eq!(IndexKey::Position(7).as_key(), "7");
    }

    #[test]
    fn display() {
        assert_eq!(alloc::format!("{}", Segment::Indexed("a", IndexKey::Position(1))), "a[1]");
        assert_eq!(alloc::format!("{}", Segment::Key(IndexKey::Key("k"))), "[k]");
    }
}
