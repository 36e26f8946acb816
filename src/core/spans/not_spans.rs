use log::trace;

use super::{CursorState, SpanCursor, SpanCursors, NO_MORE_DOCS, NO_MORE_POSITIONS};
use crate::core::IndexReadError;
use crate::{DocId, Position};

/// Matches of `include` that overlap no match of `exclude`.
pub struct NotSpanCursor<'a> {
    include: Box<SpanCursors<'a>>,
    exclude: Box<SpanCursors<'a>>,
    /// `exclude` has not been moved yet.
    exclude_unprimed: bool,
    more_exclude: bool,
    state: CursorState,
}

impl<'a> NotSpanCursor<'a> {
    pub fn new(include: SpanCursors<'a>, exclude: SpanCursors<'a>) -> Self {
        Self {
            include: Box::new(include),
            exclude: Box::new(exclude),
            exclude_unprimed: true,
            more_exclude: true,
            state: CursorState::Unpositioned,
        }
    }

    fn exhaust(&mut self) -> bool {
        self.state = CursorState::Exhausted;
        false
    }

    /// Starting from the current include match, find the first one no exclude match overlaps.
    fn skip_excluded(&mut self) -> Result<bool, IndexReadError> {
        loop {
            let (doc, start, end) = (self.include.doc(), self.include.start(), self.include.end());

            if self.exclude_unprimed {
                self.exclude_unprimed = false;
                self.more_exclude = self.exclude.seek(doc)?;
            }
            if self.more_exclude && self.exclude.doc() < doc {
                self.more_exclude = self.exclude.seek(doc)?;
            }
            // exclude matches ending before `start` cannot overlap this or any later include match
            while self.more_exclude && self.exclude.doc() == doc && self.exclude.end() <= start {
                self.more_exclude = self.exclude.advance()?;
            }

            if !self.more_exclude || self.exclude.doc() != doc || end <= self.exclude.start() {
                self.state = CursorState::Positioned;
                return Ok(true);
            }

            trace!("[NotSpanCursor] {}:[{}, {}) overlaps an excluded match", doc, start, end);
            if !self.include.advance()? {
                return Ok(self.exhaust());
            }
        }
    }
}

impl<'a> SpanCursor for NotSpanCursor<'a> {
    fn advance(&mut self) -> Result<bool, IndexReadError> {
        if self.state == CursorState::Exhausted {
            return Ok(false);
        }
        if !self.include.advance()? {
            return Ok(self.exhaust());
        }
        self.skip_excluded()
    }

    fn seek(&mut self, target: DocId) -> Result<bool, IndexReadError> {
        match self.state {
            CursorState::Exhausted => return Ok(false),
            CursorState::Positioned if self.include.doc() >= target => return Ok(true),
            _ => {}
        }
        if !self.include.seek(target)? {
            return Ok(self.exhaust());
        }
        self.skip_excluded()
    }

    fn doc(&self) -> DocId {
        match self.state {
            CursorState::Positioned => self.include.doc(),
            _ => NO_MORE_DOCS,
        }
    }

    fn start(&self) -> Position {
        match self.state {
            CursorState::Positioned => self.include.start(),
            _ => NO_MORE_POSITIONS,
        }
    }

    fn end(&self) -> Position {
        match self.state {
            CursorState::Positioned => self.include.end(),
            _ => NO_MORE_POSITIONS,
        }
    }
}
