use log::trace;

use super::{
    CursorKey, CursorState, PriorityQueue, SpanCursor, SpanCursors, NO_MORE_DOCS, NO_MORE_POSITIONS,
};
use crate::core::IndexReadError;
use crate::{DocId, Position};

type OrQueue = PriorityQueue<CursorKey, fn(&CursorKey, &CursorKey) -> bool>;

/// `(doc, start, end)` ascending, clause order breaks ties.
fn or_less(a: &CursorKey, b: &CursorKey) -> bool {
    (a.doc, a.start, a.end, a.index) < (b.doc, b.start, b.end, b.index)
}

/// Sorted union of the matches of several cursors.
///
/// The current match is the least queued child; moving on advances that child
/// and re-sifts it, or drops it once exhausted.
pub struct OrSpanCursor<'a> {
    children: Vec<SpanCursors<'a>>,
    queue: OrQueue,
    state: CursorState,
}

impl<'a> OrSpanCursor<'a> {
    pub fn new(children: Vec<SpanCursors<'a>>) -> Self {
        let queue = PriorityQueue::with_capacity(
            children.len(),
            or_less as fn(&CursorKey, &CursorKey) -> bool,
        );
        Self { children, queue, state: CursorState::Unpositioned }
    }

    fn settle(&mut self) -> bool {
        if self.queue.is_empty() {
            self.state = CursorState::Exhausted;
            false
        } else {
            self.state = CursorState::Positioned;
            true
        }
    }

    /// Queue every child that `target` (or a plain advance) leaves positioned.
    fn init_queue(&mut self, target: Option<DocId>) -> Result<bool, IndexReadError> {
        for (index, child) in self.children.iter_mut().enumerate() {
            let positioned = match target {
                Some(target) => child.seek(target)?,
                None => child.advance()?,
            };
            if positioned {
                self.queue.put(child.key(index));
            }
        }
        trace!("[OrSpanCursor] queued {} of {} clauses", self.queue.len(), self.children.len());
        Ok(self.settle())
    }

    fn current(&self) -> Option<&CursorKey> {
        match self.state {
            CursorState::Positioned => self.queue.top(),
            _ => None,
        }
    }
}

impl<'a> SpanCursor for OrSpanCursor<'a> {
    fn advance(&mut self) -> Result<bool, IndexReadError> {
        match self.state {
            CursorState::Exhausted => return Ok(false),
            CursorState::Unpositioned => return self.init_queue(None),
            CursorState::Positioned => {}
        }

        if let Some(index) = self.queue.top().map(|top| top.index) {
            let child = &mut self.children[index];
            if child.advance()? {
                self.queue.replace_top(child.key(index));
            } else {
                self.queue.pop();
            }
        }
        Ok(self.settle())
    }

    fn seek(&mut self, target: DocId) -> Result<bool, IndexReadError> {
        match self.state {
            CursorState::Exhausted => return Ok(false),
            CursorState::Unpositioned => return self.init_queue(Some(target)),
            CursorState::Positioned => {}
        }

        while let Some(top) = self.queue.top().copied() {
            if top.doc >= target {
                break;
            }
            let child = &mut self.children[top.index];
            if child.seek(target)? {
                self.queue.replace_top(child.key(top.index));
            } else {
                self.queue.pop();
            }
        }
        Ok(self.settle())
    }

    fn doc(&self) -> DocId {
        self.current().map(|top| top.doc).unwrap_or(NO_MORE_DOCS)
    }

    fn start(&self) -> Position {
        self.current().map(|top| top.start).unwrap_or(NO_MORE_POSITIONS)
    }

    fn end(&self) -> Position {
        self.current().map(|top| top.end).unwrap_or(NO_MORE_POSITIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::OrSpanCursor;
    use crate::core::spans::test::{
        assert_non_decreasing, build_index, drain, init_test_logger, random_index, term_cursor,
    };
    use crate::core::spans::{Span, SpanCursor, SpanCursors};

    #[test]
    fn test_or_merges_in_order() {
        let index = build_index(&[(0, "a b"), (1, "b"), (2, "b a c")]);
        let mut cursor = OrSpanCursor::new(vec![
            term_cursor(&index, "a"),
            term_cursor(&index, "b"),
            term_cursor(&index, "zzz"),
        ]);
        assert_eq!(
            drain(&mut cursor),
            vec![
                Span::new(0, 0, 1),
                Span::new(0, 1, 2),
                Span::new(1, 0, 1),
                Span::new(2, 0, 1),
                Span::new(2, 1, 2)
            ]
        );
        assert!(!cursor.advance().unwrap());
    }

    #[test]
    fn test_or_keeps_duplicates() {
        let index = build_index(&[(4, "a x a")]);
        let children = vec![term_cursor(&index, "a"), term_cursor(&index, "a")];
        let mut cursor = OrSpanCursor::new(children);
        assert_eq!(
            drain(&mut cursor),
            vec![Span::new(4, 0, 1), Span::new(4, 0, 1), Span::new(4, 2, 3), Span::new(4, 2, 3)]
        );
    }

    #[test]
    fn test_or_seek() {
        let index = build_index(&[(0, "a"), (3, "b"), (5, "a b"), (9, "b")]);
        let children = vec![term_cursor(&index, "a"), term_cursor(&index, "b")];
        let mut cursor = OrSpanCursor::new(children);
        assert!(cursor.seek(4).unwrap());
        assert_eq!(cursor.span(), Span::new(5, 0, 1));
        assert!(cursor.seek(5).unwrap());
        assert_eq!(cursor.span(), Span::new(5, 0, 1));
        assert!(cursor.advance().unwrap());
        assert_eq!(cursor.span(), Span::new(5, 1, 2));
        assert!(cursor.seek(6).unwrap());
        assert_eq!(cursor.span(), Span::new(9, 0, 1));
        assert!(!cursor.seek(10).unwrap());
        assert!(!cursor.advance().unwrap());
    }

    #[test]
    fn test_or_completeness() {
        init_test_logger();
        let vocabulary = ["a", "b", "c", "d"];
        for _ in 0..20 {
            let index = random_index(30, 12, &vocabulary);
            let clauses = ["a", "c", "d"];
            let mut expected: Vec<Span> =
                clauses.iter().flat_map(|text| drain(&mut term_cursor(&index, text))).collect();
            expected.sort();

            let children: Vec<SpanCursors> =
                clauses.iter().map(|text| term_cursor(&index, text)).collect();
            let spans = drain(&mut OrSpanCursor::new(children));
            assert_non_decreasing(&spans);
            assert_eq!(spans, expected);
        }
    }

    #[test]
    fn test_or_without_children() {
        let mut cursor = OrSpanCursor::new(vec![]);
        assert!(!cursor.advance().unwrap());
    }
}
