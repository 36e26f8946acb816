use std::collections::BTreeSet;
use std::fmt;

use log::debug;

use super::{check_same_field, SpanQuery, SpanQueryError, SpanQueryOps};
use crate::core::common::Term;
use crate::core::inverted_index::IndexReader;
use crate::core::spans::{NotSpanCursor, SpanCursors};

/// Matches of `include` overlapping no match of `exclude`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanNotQuery {
    include: Box<SpanQuery>,
    exclude: Box<SpanQuery>,
}

impl SpanNotQuery {
    pub fn new(include: SpanQuery, exclude: SpanQuery) -> Result<Self, SpanQueryError> {
        let clauses = [include, exclude];
        check_same_field("SpanNotQuery", &clauses)?;
        let [include, exclude] = clauses;
        Ok(Self { include: Box::new(include), exclude: Box::new(exclude) })
    }

    pub(super) fn new_unchecked(include: SpanQuery, exclude: SpanQuery) -> Self {
        Self { include: Box::new(include), exclude: Box::new(exclude) }
    }

    pub fn include(&self) -> &SpanQuery {
        &self.include
    }

    pub fn exclude(&self) -> &SpanQuery {
        &self.exclude
    }
}

impl SpanQueryOps for SpanNotQuery {
    fn field(&self) -> &str {
        match self.include.field() {
            "" => self.exclude.field(),
            field => field,
        }
    }

    /// Terms of the include side only.
    fn extract_terms(&self, terms: &mut BTreeSet<Term>) {
        self.include.extract_terms(terms);
    }

    fn open<'a>(&self, reader: &'a dyn IndexReader) -> Result<SpanCursors<'a>, SpanQueryError> {
        debug!("[SpanNotQuery] open {}", self);
        let include = self.include.open(reader)?;
        let exclude = self.exclude.open(reader)?;
        Ok(NotSpanCursor::new(include, exclude).into())
    }
}

impl fmt::Display for SpanNotQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spanNot({}, {})", self.include, self.exclude)
    }
}
