use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use log::{debug, error};

use super::{check_same_field, first_field, SpanQuery, SpanQueryError, SpanQueryOps};
use crate::core::common::Term;
use crate::core::inverted_index::IndexReader;
use crate::core::spans::{OrSpanCursor, SpanCursors};

/// Union of the matches of its clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanOrQuery {
    clauses: Vec<SpanQuery>,
}

impl SpanOrQuery {
    /// At least one clause, all on the same field.
    pub fn new(clauses: Vec<SpanQuery>) -> Result<Self, SpanQueryError> {
        if clauses.is_empty() {
            let error_msg = "spanOr needs at least one clause";
            error!("[SpanOrQuery] {}", error_msg);
            return Err(SpanQueryError::InvalidQuery(error_msg.to_string()));
        }
        check_same_field("SpanOrQuery", &clauses)?;
        Ok(Self { clauses })
    }

    pub(super) fn new_unchecked(clauses: Vec<SpanQuery>) -> Self {
        Self { clauses }
    }

    pub fn clauses(&self) -> &[SpanQuery] {
        &self.clauses
    }

    pub fn into_clauses(self) -> Vec<SpanQuery> {
        self.clauses
    }
}

impl SpanQueryOps for SpanOrQuery {
    fn field(&self) -> &str {
        first_field(&self.clauses)
    }

    fn extract_terms(&self, terms: &mut BTreeSet<Term>) {
        for clause in self.clauses.iter() {
            clause.extract_terms(terms);
        }
    }

    fn open<'a>(&self, reader: &'a dyn IndexReader) -> Result<SpanCursors<'a>, SpanQueryError> {
        if self.clauses.len() == 1 {
            return self.clauses[0].open(reader);
        }
        debug!("[SpanOrQuery] open {}", self);
        let children = self
            .clauses
            .iter()
            .map(|clause| clause.open(reader))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OrSpanCursor::new(children).into())
    }
}

impl fmt::Display for SpanOrQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spanOr([{}])", self.clauses.iter().join(", "))
    }
}
