use super::{SpanCursor, NO_MORE_DOCS, NO_MORE_POSITIONS};
use crate::core::IndexReadError;
use crate::{DocId, Position};

/// Cursor without matches, opened for terms absent from the index.
#[derive(Debug, Clone, Default)]
pub struct EmptySpanCursor;

impl EmptySpanCursor {
    pub fn new() -> Self {
        EmptySpanCursor
    }
}

impl SpanCursor for EmptySpanCursor {
    fn advance(&mut self) -> Result<bool, IndexReadError> {
        Ok(false)
    }

    fn seek(&mut self, _target: DocId) -> Result<bool, IndexReadError> {
        Ok(false)
    }

    fn doc(&self) -> DocId {
        NO_MORE_DOCS
    }

    fn start(&self) -> Position {
        NO_MORE_POSITIONS
    }

    fn end(&self) -> Position {
        NO_MORE_POSITIONS
    }
}
