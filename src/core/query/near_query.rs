use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use log::debug;

use super::{check_same_field, first_field, SpanQuery, SpanQueryError, SpanQueryOps};
use crate::core::common::Term;
use crate::core::inverted_index::IndexReader;
use crate::core::spans::{EmptySpanCursor, NearSpanCursor, SpanCursors};

/// Matches where all clauses occur within `slop` extra positions of each other,
/// in clause order when `in_order` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanNearQuery {
    clauses: Vec<SpanQuery>,
    slop: u32,
    in_order: bool,
}

impl SpanNearQuery {
    pub fn new(clauses: Vec<SpanQuery>, slop: u32, in_order: bool) -> Result<Self, SpanQueryError> {
        check_same_field("SpanNearQuery", &clauses)?;
        Ok(Self { clauses, slop, in_order })
    }

    pub(super) fn new_unchecked(clauses: Vec<SpanQuery>, slop: u32, in_order: bool) -> Self {
        Self { clauses, slop, in_order }
    }

    pub fn clauses(&self) -> &[SpanQuery] {
        &self.clauses
    }

    pub fn slop(&self) -> u32 {
        self.slop
    }

    pub fn is_in_order(&self) -> bool {
        self.in_order
    }
}

impl SpanQueryOps for SpanNearQuery {
    /// Field of the clauses, empty without clauses.
    fn field(&self) -> &str {
        first_field(&self.clauses)
    }

    fn extract_terms(&self, terms: &mut BTreeSet<Term>) {
        for clause in self.clauses.iter() {
            clause.extract_terms(terms);
        }
    }

    fn open<'a>(&self, reader: &'a dyn IndexReader) -> Result<SpanCursors<'a>, SpanQueryError> {
        match self.clauses.len() {
            0 => Ok(EmptySpanCursor::new().into()),
            1 => self.clauses[0].open(reader),
            _ => {
                debug!("[SpanNearQuery] open {}", self);
                let cells = self
                    .clauses
                    .iter()
                    .map(|clause| clause.open(reader))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(NearSpanCursor::new(cells, self.slop, self.in_order).into())
            }
        }
    }
}

impl fmt::Display for SpanNearQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "spanNear([{}], {}, {})",
            self.clauses.iter().join(", "),
            self.slop,
            self.in_order
        )
    }
}
