use log::error;

use super::{SpanQuery, SpanQueryError};
use crate::config::SpanSearchConfig;
use crate::Position;

/// Builds span queries over one field, enforcing the clause limit of a
/// [`SpanSearchConfig`].
#[derive(Debug, Clone)]
pub struct SpanQueryBuilder {
    field: String,
    max_clause_count: usize,
}

impl SpanQueryBuilder {
    pub fn new(field: &str, config: &SpanSearchConfig) -> Self {
        Self { field: field.to_string(), max_clause_count: config.max_clause_count }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    fn check_clause_count(&self, query_name: &str, count: usize) -> Result<(), SpanQueryError> {
        if count > self.max_clause_count {
            let error_msg =
                format!("{} clauses exceed the limit of {}", count, self.max_clause_count);
            error!("[SpanQueryBuilder] {}: {}", query_name, error_msg);
            return Err(SpanQueryError::InvalidQuery(error_msg));
        }
        Ok(())
    }

    pub fn term(&self, text: &str) -> SpanQuery {
        SpanQuery::term(&self.field, text)
    }

    pub fn or(&self, clauses: Vec<SpanQuery>) -> Result<SpanQuery, SpanQueryError> {
        self.check_clause_count("spanOr", clauses.len())?;
        SpanQuery::or(clauses)
    }

    pub fn near(
        &self,
        clauses: Vec<SpanQuery>,
        slop: u32,
        in_order: bool,
    ) -> Result<SpanQuery, SpanQueryError> {
        self.check_clause_count("spanNear", clauses.len())?;
        SpanQuery::near(clauses, slop, in_order)
    }

    pub fn not(
        &self,
        include: SpanQuery,
        exclude: SpanQuery,
    ) -> Result<SpanQuery, SpanQueryError> {
        SpanQuery::not(include, exclude)
    }

    pub fn first(&self, inner: SpanQuery, end: Position) -> SpanQuery {
        SpanQuery::first(inner, end)
    }

    /// Exact phrase: an in-order near query of the given words with no slop.
    pub fn phrase(&self, words: &[&str]) -> Result<SpanQuery, SpanQueryError> {
        let clauses = words.iter().map(|word| self.term(word)).collect();
        self.near(clauses, 0, true)
    }
}
