use std::collections::BTreeSet;
use std::fmt;

use log::trace;

use super::{SpanQueryError, SpanQueryOps};
use crate::core::common::Term;
use crate::core::inverted_index::IndexReader;
use crate::core::spans::{EmptySpanCursor, SpanCursors, TermSpanCursor};

/// Every occurrence of one term.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanTermQuery {
    term: Term,
}

impl SpanTermQuery {
    pub fn new(term: Term) -> Self {
        Self { term }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }
}

impl SpanQueryOps for SpanTermQuery {
    fn field(&self) -> &str {
        self.term.field()
    }

    fn extract_terms(&self, terms: &mut BTreeSet<Term>) {
        terms.insert(self.term.clone());
    }

    fn open<'a>(&self, reader: &'a dyn IndexReader) -> Result<SpanCursors<'a>, SpanQueryError> {
        match reader.postings(&self.term)? {
            Some(postings) => Ok(TermSpanCursor::new(self.term.clone(), postings).into()),
            None => {
                trace!("[SpanTermQuery] term {} not indexed", self.term);
                Ok(EmptySpanCursor::new().into())
            }
        }
    }
}

impl fmt::Display for SpanTermQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)
    }
}
