use alloc::borrow::Cow;

use crate::access::{IndexKey, OffsetSegment, ParseError, Segment};

/// A streaming parser of the property path grammar.
///
/// ```text
/// path    := segment ('.' segment)*
/// segment := name ('[' key ']')? | '[' key ']'
/// ```
///
/// Yields one [`OffsetSegment`] per segment, and stops after the first error.
pub struct Parser<'a> {
    path: &'a str,
    cursor: usize,
    finished: bool,
}

impl<'a> Parser<'a> {
    #[inline]
    pub const fn new(path: &'a str) -> Self {
        Self {
            path,
            cursor: 0,
            finished: false,
        }
    }

    fn error(&mut self, offset: usize, error: &'static str) -> ParseError<'a> {
        self.finished = true;
        ParseError {
            offset,
            path: self.path,
            error: Cow::Borrowed(error),
        }
    }

    /// Parses the `[key]` starting at `open`, returning the key and the
    /// position right after `]`.
    fn bracket(&mut self, open: usize) -> Result<(IndexKey<'a>, usize), ParseError<'a>> {
        let start = open + 1;
        let Some(close) = self.path[start..].find(['[', ']']).map(|at| start + at) else {
            return Err(self.error(open, "unterminated `[`"));
        };
        if self.path.as_bytes()[close] == b'[' {
            return Err(self.error(close, "nested `[`"));
        }
        if close == start {
            return Err(self.error(open, "empty index"));
        }
        Ok((IndexKey::parse(&self.path[start..close]), close + 1))
    }

    fn segment(&mut self) -> Result<(OffsetSegment<'a>, usize), ParseError<'a>> {
        let offset = self.cursor;
        let rest = &self.path[offset..];

        if rest.starts_with('[') {
            let (key, end) = self.bracket(offset)?;
            let segment = OffsetSegment {
                segment: Segment::Key(key),
                offset,
            };
            return Ok((segment, end));
        }

        let name_end = rest.find(['.', '[', ']']).map_or(self.path.len(), |at| offset + at);
        if name_end == offset {
            return Err(self.error(offset, "empty property name"));
        }
        let name = &self.path[offset..name_end];

        let (segment, end) = match self.path.as_bytes().get(name_end) {
            Some(b']') => return Err(self.error(name_end, "unexpected `]`")),
            Some(b'[') => {
                let (key, end) = self.bracket(name_end)?;
                (Segment::Indexed(name, key), end)
            }
            _ => (Segment::Name(name), name_end),
        };
        Ok((OffsetSegment { segment, offset }, end))
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = Result<OffsetSegment<'a>, ParseError<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.path.is_empty() {
            return Some(Err(self.error(0, "empty path")));
        }

        let (segment, end) = match self.segment() {
            Ok(parsed) => parsed,
            Err(err) => return Some(Err(err)),
        };

        match self.path.as_bytes().get(end) {
            None => self.finished = true,
            Some(b'.') => self.cursor = end + 1,
            Some(_) => return Some(Err(self.error(end, "expected `.` after `]`"))),
        }
        Some(Ok(segment))
    }
}

impl core::iter::FusedIterator for Parser<'_> {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::access::{IndexKey, ParseError, Parser, PropertyPath, Segment};

    fn parse(path: &str) -> Result<Vec<Segment<'_>>, ParseError<'_>> {
        Parser::new(path)
            .map(|res| res.map(|segment| segment.segment))
            .collect()
    }

    #[test]
    fn valid_paths() {
        assert_eq!(parse("a"), Ok(alloc::vec![Segment::Name("a")]));
        assert_eq!(
            parse("a.b[2].c[key]"),
            Ok(alloc::vec![
                Segment::Name("a"),
                Segment::Indexed("b", IndexKey::Position(2)),
                Segment::Indexed("c", IndexKey::Key("key")),
            ])
        );
        assert_eq!(
            parse("[fooint].x"),
            Ok(alloc::vec![Segment::Key(IndexKey::Key("fooint")), Segment::Name("x")])
        );
        assert_eq!(
            parse("map[a.b]"),
            Ok(alloc::vec![Segment::Indexed("map", IndexKey::Key("a.b"))])
        );
    }

    #[test]
    fn offsets() {
        let path = PropertyPath::parse("ab.cd[1].e").unwrap();
        let offsets: Vec<_> = path.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, [0, 3, 9]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.last().segment, Segment::Name("e"));
    }

    #[test]
    fn invalid_paths() {
        let offset = |path| parse(path).unwrap_err().offset;

        assert_eq!(offset(""), 0);
        assert_eq!(offset(".a"), 0);
        assert_eq!(offset("a."), 2);
        assert_eq!(offset("a..b"), 2);
        assert_eq!(offset("a[1"), 1);
        assert_eq!(offset("a[]"), 1);
        assert_eq!(offset("a[[1]]"), 2);
        assert_eq!(offset("a]"), 1);
        assert_eq!(offset("a[1]b"), 4);
        assert_eq!(offset("a[1][2]"), 4);
    }

    #[test]
    fn stops_after_error() {
        let mut parser = Parser::new("a..b");
        assert!(parser.next().unwrap().is_ok());
        assert!(parser.next().unwrap().is_err());
        assert!(parser.next().is_none());
    }
}
