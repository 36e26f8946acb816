use std::collections::BTreeSet;
use std::fmt;

use log::debug;

use super::{SpanQuery, SpanQueryError, SpanQueryOps};
use crate::core::common::Term;
use crate::core::inverted_index::IndexReader;
use crate::core::spans::{FirstSpanCursor, SpanCursors};
use crate::Position;

/// Matches of the inner query ending at or before `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanFirstQuery {
    inner: Box<SpanQuery>,
    end: Position,
}

impl SpanFirstQuery {
    pub fn new(inner: SpanQuery, end: Position) -> Self {
        Self { inner: Box::new(inner), end }
    }

    pub fn inner(&self) -> &SpanQuery {
        &self.inner
    }

    pub fn end(&self) -> Position {
        self.end
    }
}

impl SpanQueryOps for SpanFirstQuery {
    fn field(&self) -> &str {
        self.inner.field()
    }

    fn extract_terms(&self, terms: &mut BTreeSet<Term>) {
        self.inner.extract_terms(terms);
    }

    fn open<'a>(&self, reader: &'a dyn IndexReader) -> Result<SpanCursors<'a>, SpanQueryError> {
        debug!("[SpanFirstQuery] open {}", self);
        Ok(FirstSpanCursor::new(self.inner.open(reader)?, self.end).into())
    }
}

impl fmt::Display for SpanFirstQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spanFirst({}, {})", self.inner, self.end)
    }
}
