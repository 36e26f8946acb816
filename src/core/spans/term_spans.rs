use log::error;

use super::{CursorState, SpanCursor, NO_MORE_DOCS, NO_MORE_POSITIONS};
use crate::core::common::Term;
use crate::core::posting_list::PostingsEnum;
use crate::core::IndexReadError;
use crate::{DocId, Position};

/// Leaf cursor: one single-position span `[p, p + 1)` per occurrence of a term.
pub struct TermSpanCursor<'a> {
    term: Term,
    postings: Box<dyn PostingsEnum + 'a>,
    doc: DocId,
    position: Position,
    /// Offset of the next unread position in the current doc.
    offset: usize,
    state: CursorState,
}

impl<'a> TermSpanCursor<'a> {
    pub fn new(term: Term, postings: Box<dyn PostingsEnum + 'a>) -> Self {
        Self {
            term,
            postings,
            doc: NO_MORE_DOCS,
            position: NO_MORE_POSITIONS,
            offset: 0,
            state: CursorState::Unpositioned,
        }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    fn exhaust(&mut self) -> bool {
        self.state = CursorState::Exhausted;
        self.doc = NO_MORE_DOCS;
        self.position = NO_MORE_POSITIONS;
        false
    }

    /// Read the next position, pulling further docs while the current one has none left.
    fn next_position(&mut self) -> Result<bool, IndexReadError> {
        loop {
            let positions = self.postings.positions();
            if let Some(&position) = positions.get(self.offset) {
                if position == NO_MORE_POSITIONS {
                    let error_msg = format!(
                        "position {} of term {} in doc {} is out of range",
                        position, self.term, self.doc
                    );
                    error!("[TermSpanCursor] {}", error_msg);
                    return Err(IndexReadError::Corrupted(error_msg));
                }
                self.position = position;
                self.offset += 1;
                self.state = CursorState::Positioned;
                return Ok(true);
            }
            if !self.postings.next_doc()? {
                return Ok(self.exhaust());
            }
            self.doc = self.postings.doc();
            self.offset = 0;
        }
    }
}

impl<'a> SpanCursor for TermSpanCursor<'a> {
    fn advance(&mut self) -> Result<bool, IndexReadError> {
        match self.state {
            CursorState::Exhausted => return Ok(false),
            CursorState::Unpositioned => {
                if !self.postings.next_doc()? {
                    return Ok(self.exhaust());
                }
                self.doc = self.postings.doc();
                self.offset = 0;
            }
            CursorState::Positioned => {}
        }
        self.next_position()
    }

    fn seek(&mut self, target: DocId) -> Result<bool, IndexReadError> {
        match self.state {
            CursorState::Exhausted => return Ok(false),
            CursorState::Positioned if self.doc >= target => return Ok(true),
            _ => {}
        }
        if !self.postings.seek(target)? {
            return Ok(self.exhaust());
        }
        self.doc = self.postings.doc();
        self.offset = 0;
        self.next_position()
    }

    fn doc(&self) -> DocId {
        self.doc
    }

    fn start(&self) -> Position {
        self.position
    }

    fn end(&self) -> Position {
        match self.state {
            CursorState::Positioned => self.position + 1,
            _ => NO_MORE_POSITIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::posting_list::{PositionsElement, PostingsEnum};
    use crate::core::spans::test::{build_index, drain, term_cursor};
    use crate::core::spans::{Span, SpanCursor, NO_MORE_DOCS};
    use crate::core::{IndexReadError, Term, TermSpanCursor};
    use crate::{DocId, Position};

    #[test]
    fn test_advance_yields_every_position() {
        let index = build_index(&[(0, "a b a"), (3, "b"), (5, "a")]);
        let mut cursor = term_cursor(&index, "a");
        assert_eq!(
            drain(&mut cursor),
            vec![Span::new(0, 0, 1), Span::new(0, 2, 3), Span::new(5, 0, 1)]
        );
        assert_eq!(cursor.doc(), NO_MORE_DOCS);
        assert!(!cursor.advance().unwrap());
        assert!(!cursor.seek(0).unwrap());
    }

    #[test]
    fn test_seek_restarts_at_first_position() {
        let index = build_index(&[(0, "a"), (2, "b a a"), (4, "a")]);
        let mut cursor = term_cursor(&index, "a");
        assert!(cursor.seek(1).unwrap());
        assert_eq!(cursor.span(), Span::new(2, 1, 2));
        assert!(cursor.advance().unwrap());
        assert_eq!(cursor.span(), Span::new(2, 2, 3));
        // already on a doc >= target
        assert!(cursor.seek(2).unwrap());
        assert_eq!(cursor.span(), Span::new(2, 2, 3));
        assert!(cursor.seek(3).unwrap());
        assert_eq!(cursor.span(), Span::new(4, 0, 1));
        assert!(!cursor.seek(5).unwrap());
    }

    /// Postings that fail once the first doc is consumed.
    struct FailingPostings {
        element: PositionsElement,
        read: bool,
    }

    impl PostingsEnum for FailingPostings {
        fn next_doc(&mut self) -> Result<bool, IndexReadError> {
            if self.read {
                let error = std::io::Error::other("disk gone");
                return Err(IndexReadError::Io(std::sync::Arc::new(error)));
            }
            self.read = true;
            Ok(true)
        }

        fn seek(&mut self, _target: DocId) -> Result<bool, IndexReadError> {
            self.next_doc()
        }

        fn doc(&self) -> DocId {
            self.element.doc
        }

        fn term_freq(&self) -> u32 {
            self.element.term_freq()
        }

        fn positions(&self) -> &[Position] {
            &self.element.positions
        }
    }

    #[test]
    fn test_read_error_propagates() {
        let postings = FailingPostings { element: PositionsElement::new(1, vec![4]), read: false };
        let mut cursor = TermSpanCursor::new(Term::new("body", "x"), Box::new(postings));
        assert!(cursor.advance().unwrap());
        assert_eq!(cursor.span(), Span::new(1, 4, 5));
        assert!(matches!(cursor.advance(), Err(IndexReadError::Io(_))));
    }
}
