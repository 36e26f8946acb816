use super::{CursorState, SpanCursor, SpanCursors, NO_MORE_DOCS, NO_MORE_POSITIONS};
use crate::core::IndexReadError;
use crate::{DocId, Position};

/// Matches of an inner cursor that end at or before a position limit.
pub struct FirstSpanCursor<'a> {
    inner: Box<SpanCursors<'a>>,
    end_limit: Position,
    state: CursorState,
}

impl<'a> FirstSpanCursor<'a> {
    pub fn new(inner: SpanCursors<'a>, end_limit: Position) -> Self {
        Self { inner: Box::new(inner), end_limit, state: CursorState::Unpositioned }
    }

    fn exhaust(&mut self) -> bool {
        self.state = CursorState::Exhausted;
        false
    }

    fn skip_beyond_limit(&mut self) -> Result<bool, IndexReadError> {
        loop {
            if self.inner.end() <= self.end_limit {
                self.state = CursorState::Positioned;
                return Ok(true);
            }
            // later matches of this doc start at or after this one: none can end in time
            let moved = if self.inner.start() >= self.end_limit {
                match self.inner.doc().checked_add(1) {
                    Some(next_doc) => self.inner.seek(next_doc)?,
                    None => false,
                }
            } else {
                self.inner.advance()?
            };
            if !moved {
                return Ok(self.exhaust());
            }
        }
    }
}

impl<'a> SpanCursor for FirstSpanCursor<'a> {
    fn advance(&mut self) -> Result<bool, IndexReadError> {
        if self.state == CursorState::Exhausted {
            return Ok(false);
        }
        if !self.inner.advance()? {
            return Ok(self.exhaust());
        }
        self.skip_beyond_limit()
    }

    fn seek(&mut self, target: DocId) -> Result<bool, IndexReadError> {
        match self.state {
            CursorState::Exhausted => return Ok(false),
            CursorState::Positioned if self.inner.doc() >= target => return Ok(true),
            _ => {}
        }
        if !self.inner.seek(target)? {
            return Ok(self.exhaust());
        }
        self.skip_beyond_limit()
    }

    fn doc(&self) -> DocId {
        match self.state {
            CursorState::Positioned => self.inner.doc(),
            _ => NO_MORE_DOCS,
        }
    }

    fn start(&self) -> Position {
        match self.state {
            CursorState::Positioned => self.inner.start(),
            _ => NO_MORE_POSITIONS,
        }
    }

    fn end(&self) -> Position {
        match self.state {
            CursorState::Positioned => self.inner.end(),
            _ => NO_MORE_POSITIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FirstSpanCursor;
    use crate::core::spans::test::{build_index, drain, random_index, term_cursor};
    use crate::core::spans::{NearSpanCursor, Span, SpanCursor};

    #[test]
    fn test_first_boundary() {
        // "a" + "b" spans [2, 5) in doc 0 and [2, 6) in doc 1
        let index = build_index(&[(0, "x x a x b"), (1, "x x a x x b")]);
        let near = |limit| {
            let clauses = vec![term_cursor(&index, "a"), term_cursor(&index, "b")];
            let near = NearSpanCursor::new(clauses, 3, true);
            FirstSpanCursor::new(near.into(), limit)
        };
        assert_eq!(drain(&mut near(5)), vec![Span::new(0, 2, 5)]);
        assert_eq!(drain(&mut near(6)), vec![Span::new(0, 2, 5), Span::new(1, 2, 6)]);
    }

    #[test]
    fn test_first_filters_positions() {
        let index = build_index(&[(0, "a x a a"), (1, "x x x a"), (2, "a")]);
        let mut cursor = FirstSpanCursor::new(term_cursor(&index, "a"), 3);
        assert_eq!(
            drain(&mut cursor),
            vec![Span::new(0, 0, 1), Span::new(0, 2, 3), Span::new(2, 0, 1)]
        );
    }

    #[test]
    fn test_first_seek() {
        let index = build_index(&[(0, "a"), (1, "x x a"), (3, "x a")]);
        let mut cursor = FirstSpanCursor::new(term_cursor(&index, "a"), 2);
        // doc 1 only has "a" beyond the limit
        assert!(cursor.seek(1).unwrap());
        assert_eq!(cursor.span(), Span::new(3, 1, 2));
        assert!(cursor.seek(2).unwrap());
        assert!(!cursor.advance().unwrap());
        assert_eq!(cursor.doc(), u32::MAX);
    }

    #[test]
    fn test_first_matches_filtered_sequence() {
        let vocabulary = ["a", "b"];
        for _ in 0..20 {
            let index = random_index(20, 15, &vocabulary);
            let expected: Vec<Span> =
                drain(&mut term_cursor(&index, "a")).into_iter().filter(|s| s.end <= 4).collect();
            assert_eq!(drain(&mut FirstSpanCursor::new(term_cursor(&index, "a"), 4)), expected);
        }
    }
}
