//! Span cursors: lazily evaluated, forward-only streams of positional matches.
//!
//! Every cursor yields spans in non-decreasing `(doc, start, end)` order. A
//! cursor is unpositioned until its first successful `advance` or `seek`, and
//! exhausted for good after either returns `false`.

mod empty_spans;
mod first_spans;
mod near_spans;
mod not_spans;
mod or_spans;
mod priority_queue;
mod term_spans;

use std::fmt;

use enum_dispatch::enum_dispatch;

use crate::core::IndexReadError;
use crate::{DocId, Position};

pub use empty_spans::EmptySpanCursor;
pub use first_spans::FirstSpanCursor;
pub use near_spans::NearSpanCursor;
pub use not_spans::NotSpanCursor;
pub use or_spans::OrSpanCursor;
pub use priority_queue::{CursorKey, PriorityQueue};
pub use term_spans::TermSpanCursor;

/// `doc()` of a cursor that is not positioned on a match.
pub const NO_MORE_DOCS: DocId = DocId::MAX;
/// `start()`/`end()` of a cursor that is not positioned on a match.
pub const NO_MORE_POSITIONS: Position = Position::MAX;

/// Match occupying positions `[start, end)` of `doc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub doc: DocId,
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(doc: DocId, start: Position, end: Position) -> Self {
        debug_assert!(start < end, "span [{}, {}) is empty", start, end);
        Self { doc, start, end }
    }

    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// Same doc and the intervals intersect.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.doc == other.doc && !(self.end <= other.start || other.end <= self.start)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:[{}, {})", self.doc, self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CursorState {
    Unpositioned,
    Positioned,
    Exhausted,
}

#[enum_dispatch]
pub trait SpanCursor {
    /// Move to the next match. `Ok(false)` means the cursor is exhausted.
    fn advance(&mut self) -> Result<bool, IndexReadError>;

    /// Move to the first match whose doc is `>= target`.
    ///
    /// Never moves backwards: a cursor already positioned on a doc `>= target`
    /// stays where it is and returns `Ok(true)`.
    fn seek(&mut self, target: DocId) -> Result<bool, IndexReadError>;

    /// Doc of the current match, [`NO_MORE_DOCS`] when not positioned.
    fn doc(&self) -> DocId;

    fn start(&self) -> Position;

    fn end(&self) -> Position;

    fn span(&self) -> Span {
        Span::new(self.doc(), self.start(), self.end())
    }

    fn width(&self) -> u32 {
        self.end() - self.start()
    }
}

/// Closed set of cursor kinds produced by opening a span query.
#[enum_dispatch(SpanCursor)]
pub enum SpanCursors<'a> {
    Empty(EmptySpanCursor),
    Term(TermSpanCursor<'a>),
    Or(OrSpanCursor<'a>),
    Not(NotSpanCursor<'a>),
    First(FirstSpanCursor<'a>),
    Near(NearSpanCursor<'a>),
}

impl<'a> SpanCursors<'a> {
    pub(crate) fn key(&self, index: usize) -> CursorKey {
        CursorKey { doc: self.doc(), start: self.start(), end: self.end(), index }
    }
}
