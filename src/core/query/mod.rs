//! Span queries: immutable trees that open into [`SpanCursors`] against an index reader.

mod builder;
mod errors;
mod first_query;
mod near_query;
mod not_query;
mod or_query;
mod term_query;

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use enum_dispatch::enum_dispatch;
use log::{debug, error};

use crate::core::common::Term;
use crate::core::inverted_index::IndexReader;
use crate::core::spans::SpanCursors;
use crate::Position;

pub use builder::SpanQueryBuilder;
pub use errors::SpanQueryError;
pub use first_query::SpanFirstQuery;
pub use near_query::SpanNearQuery;
pub use not_query::SpanNotQuery;
pub use or_query::SpanOrQuery;
pub use term_query::SpanTermQuery;

#[enum_dispatch]
pub trait SpanQueryOps {
    /// Field every term of the query belongs to.
    fn field(&self) -> &str;

    /// Add the terms the query scores on to `terms`.
    fn extract_terms(&self, terms: &mut BTreeSet<Term>);

    /// Allocate a fresh cursor tree over `reader`.
    fn open<'a>(&self, reader: &'a dyn IndexReader) -> Result<SpanCursors<'a>, SpanQueryError>;
}

#[enum_dispatch(SpanQueryOps)]
#[derive(Debug, Clone, PartialEq)]
pub enum SpanQuery {
    Term(SpanTermQuery),
    Or(SpanOrQuery),
    Not(SpanNotQuery),
    First(SpanFirstQuery),
    Near(SpanNearQuery),
}

/// Field of the first clause that has one. Clauses without terms, such as an
/// empty near query, report `""`.
pub(crate) fn first_field(clauses: &[SpanQuery]) -> &str {
    clauses.iter().map(|clause| clause.field()).find(|field| !field.is_empty()).unwrap_or("")
}

/// All clauses that have a field report the same one.
pub(crate) fn check_same_field(
    query_name: &str,
    clauses: &[SpanQuery],
) -> Result<(), SpanQueryError> {
    let field = first_field(clauses);
    let mut fields = clauses.iter().map(|clause| clause.field());
    if let Some(other) = fields.find(|f| !f.is_empty() && *f != field) {
        let error_msg = format!("clauses must share one field, found '{}' and '{}'", field, other);
        error!("[{}] {}", query_name, error_msg);
        return Err(SpanQueryError::InvalidQuery(error_msg));
    }
    Ok(())
}

impl SpanQuery {
    pub fn term(field: &str, text: &str) -> SpanQuery {
        SpanTermQuery::new(Term::new(field, text)).into()
    }

    pub fn or(clauses: Vec<SpanQuery>) -> Result<SpanQuery, SpanQueryError> {
        Ok(SpanOrQuery::new(clauses)?.into())
    }

    pub fn not(include: SpanQuery, exclude: SpanQuery) -> Result<SpanQuery, SpanQueryError> {
        Ok(SpanNotQuery::new(include, exclude)?.into())
    }

    pub fn first(inner: SpanQuery, end: Position) -> SpanQuery {
        SpanFirstQuery::new(inner, end).into()
    }

    pub fn near(
        clauses: Vec<SpanQuery>,
        slop: u32,
        in_order: bool,
    ) -> Result<SpanQuery, SpanQueryError> {
        Ok(SpanNearQuery::new(clauses, slop, in_order)?.into())
    }

    /// Every term the query scores on.
    pub fn terms(&self) -> BTreeSet<Term> {
        let mut terms = BTreeSet::new();
        self.extract_terms(&mut terms);
        terms
    }

    /// Simplified equivalent of this query, borrowed when nothing changes.
    ///
    /// Single-clause unions and near queries collapse to their clause, and
    /// nested unions are flattened into their parent.
    pub fn rewrite(&self) -> Cow<'_, SpanQuery> {
        let rewritten = match self {
            SpanQuery::Term(_) => return Cow::Borrowed(self),
            SpanQuery::Or(or) => {
                let clauses: Vec<Cow<SpanQuery>> =
                    or.clauses().iter().map(|clause| clause.rewrite()).collect();
                let changed = clauses.len() == 1
                    || clauses.iter().any(|clause| {
                        matches!(clause, Cow::Owned(_))
                            || matches!(clause.as_ref(), SpanQuery::Or(_))
                    });
                if !changed {
                    return Cow::Borrowed(self);
                }
                let mut flattened = Vec::with_capacity(clauses.len());
                for clause in clauses {
                    match clause.into_owned() {
                        SpanQuery::Or(nested) => flattened.extend(nested.into_clauses()),
                        other => flattened.push(other),
                    }
                }
                match flattened.len() {
                    1 => flattened.remove(0),
                    _ => SpanOrQuery::new_unchecked(flattened).into(),
                }
            }
            SpanQuery::Near(near) => {
                let mut clauses: Vec<Cow<SpanQuery>> =
                    near.clauses().iter().map(|clause| clause.rewrite()).collect();
                if clauses.len() == 1 {
                    return Cow::Owned(clauses.remove(0).into_owned());
                }
                if clauses.iter().all(|clause| matches!(clause, Cow::Borrowed(_))) {
                    return Cow::Borrowed(self);
                }
                let clauses = clauses.into_iter().map(Cow::into_owned).collect();
                SpanNearQuery::new_unchecked(clauses, near.slop(), near.is_in_order()).into()
            }
            SpanQuery::Not(not) => match (not.include().rewrite(), not.exclude().rewrite()) {
                (Cow::Borrowed(_), Cow::Borrowed(_)) => return Cow::Borrowed(self),
                (include, exclude) => {
                    SpanNotQuery::new_unchecked(include.into_owned(), exclude.into_owned()).into()
                }
            },
            SpanQuery::First(first) => match first.inner().rewrite() {
                Cow::Borrowed(_) => return Cow::Borrowed(self),
                Cow::Owned(inner) => SpanFirstQuery::new(inner, first.end()).into(),
            },
        };
        debug!("[SpanQuery] rewrote {} into {}", self, rewritten);
        Cow::Owned(rewritten)
    }
}

impl fmt::Display for SpanQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanQuery::Term(q) => q.fmt(f),
            SpanQuery::Or(q) => q.fmt(f),
            SpanQuery::Not(q) => q.fmt(f),
            SpanQuery::First(q) => q.fmt(f),
            SpanQuery::Near(q) => q.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{SpanQuery, SpanQueryError, SpanQueryOps};
    use crate::core::common::Term;
    use crate::core::spans::test::{build_index, drain, FIELD};
    use crate::core::spans::{Span, SpanCursors};

    fn t(text: &str) -> SpanQuery {
        SpanQuery::term(FIELD, text)
    }

    #[test]
    fn test_display() {
        let near = SpanQuery::near(vec![t("quick"), t("fox")], 0, true).unwrap();
        assert_eq!(near.to_string(), "spanNear([body:quick, body:fox], 0, true)");
        let or = SpanQuery::or(vec![t("a"), t("b")]).unwrap();
        assert_eq!(or.to_string(), "spanOr([body:a, body:b])");
        let not = SpanQuery::not(or.clone(), t("c")).unwrap();
        assert_eq!(not.to_string(), "spanNot(spanOr([body:a, body:b]), body:c)");
        assert_eq!(
            SpanQuery::first(near, 5).to_string(),
            "spanFirst(spanNear([body:quick, body:fox], 0, true), 5)"
        );
    }

    #[test]
    fn test_field_mismatch_rejected() {
        let other = SpanQuery::term("title", "a");
        assert!(matches!(
            SpanQuery::or(vec![t("a"), other.clone()]),
            Err(SpanQueryError::InvalidQuery(_))
        ));
        assert!(matches!(
            SpanQuery::near(vec![t("a"), other.clone()], 1, false),
            Err(SpanQueryError::InvalidQuery(_))
        ));
        assert!(matches!(SpanQuery::not(t("a"), other), Err(SpanQueryError::InvalidQuery(_))));
        assert!(matches!(SpanQuery::or(vec![]), Err(SpanQueryError::InvalidQuery(_))));
    }

    #[test]
    fn test_field_and_terms() {
        let near = SpanQuery::near(vec![t("b"), t("a"), t("b")], 2, false).unwrap();
        let query = SpanQuery::not(near, t("c")).unwrap();
        assert_eq!(query.field(), FIELD);
        assert_eq!(
            query.terms().into_iter().collect::<Vec<_>>(),
            vec![Term::new(FIELD, "a"), Term::new(FIELD, "b")]
        );
        let empty = SpanQuery::near(vec![], 0, true).unwrap();
        assert_eq!(empty.field(), "");
        assert!(empty.terms().is_empty());
    }

    #[test]
    fn test_fieldless_clause_accepted() {
        let empty = SpanQuery::near(vec![], 0, true).unwrap();
        let or = SpanQuery::or(vec![empty.clone(), t("a")]).unwrap();
        assert_eq!(or.field(), FIELD);
        let not = SpanQuery::not(empty.clone(), t("a")).unwrap();
        assert_eq!(not.field(), FIELD);
        let near = SpanQuery::near(vec![empty.clone(), t("a"), t("b")], 1, false).unwrap();
        assert_eq!(near.field(), FIELD);
        assert!(matches!(
            SpanQuery::or(vec![empty, t("a"), SpanQuery::term("title", "b")]),
            Err(SpanQueryError::InvalidQuery(_))
        ));

        let index = build_index(&[(0, "b a"), (2, "a")]);
        assert_eq!(
            drain(&mut or.open(&index).unwrap()),
            vec![Span::new(0, 1, 2), Span::new(2, 0, 1)]
        );
    }

    #[test]
    fn test_open_degenerate_shapes() {
        let index = build_index(&[(0, "a b")]);
        let single_or = SpanQuery::or(vec![t("a")]).unwrap();
        assert!(matches!(single_or.open(&index).unwrap(), SpanCursors::Term(_)));
        let single_near = SpanQuery::near(vec![t("b")], 3, true).unwrap();
        assert!(matches!(single_near.open(&index).unwrap(), SpanCursors::Term(_)));
        let empty_near = SpanQuery::near(vec![], 3, true).unwrap();
        let mut cursor = empty_near.open(&index).unwrap();
        assert!(matches!(cursor, SpanCursors::Empty(_)));
        assert!(drain(&mut cursor).is_empty());
        assert!(matches!(t("missing").open(&index).unwrap(), SpanCursors::Empty(_)));
    }

    #[test]
    fn test_end_to_end_quick_fox() {
        let index = build_index(&[
            (0, "quick fox"),
            (1, "fox quick"),
            (2, "x x x quick fox x x x x quick"),
        ]);
        let query = SpanQuery::near(vec![t("quick"), t("fox")], 0, true).unwrap();
        let mut cursor = query.open(&index).unwrap();
        assert_eq!(drain(&mut cursor), vec![Span::new(0, 0, 2), Span::new(2, 3, 5)]);
    }

    #[test]
    fn test_rewrite_unchanged_is_borrowed() {
        let query = SpanQuery::first(SpanQuery::near(vec![t("a"), t("b")], 1, true).unwrap(), 4);
        assert!(matches!(query.rewrite(), Cow::Borrowed(_)));
        assert!(matches!(t("a").rewrite(), Cow::Borrowed(_)));
        let not = SpanQuery::not(t("a"), SpanQuery::or(vec![t("b"), t("c")]).unwrap()).unwrap();
        assert!(matches!(not.rewrite(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_rewrite_collapses_and_flattens() {
        let single = SpanQuery::or(vec![SpanQuery::near(vec![t("a")], 0, true).unwrap()]).unwrap();
        assert_eq!(single.rewrite().into_owned(), t("a"));

        let inner = SpanQuery::or(vec![t("b"), t("c")]).unwrap();
        let nested = SpanQuery::or(vec![t("a"), inner]).unwrap();
        let flat = SpanQuery::or(vec![t("a"), t("b"), t("c")]).unwrap();
        assert_eq!(nested.rewrite().into_owned(), flat);

        let first = SpanQuery::first(SpanQuery::or(vec![t("a")]).unwrap(), 3);
        assert_eq!(first.rewrite().into_owned(), SpanQuery::first(t("a"), 3));

        let not = SpanQuery::not(SpanQuery::near(vec![t("a")], 2, false).unwrap(), t("b")).unwrap();
        assert_eq!(not.rewrite().into_owned(), SpanQuery::not(t("a"), t("b")).unwrap());

        let single = SpanQuery::or(vec![t("a")]).unwrap();
        let near = SpanQuery::near(vec![single, t("b")], 1, true).unwrap();
        let expected = SpanQuery::near(vec![t("a"), t("b")], 1, true).unwrap();
        assert_eq!(near.rewrite().into_owned(), expected);
    }

    #[test]
    fn test_rewrite_keeps_matches() {
        let index = build_index(&[(0, "a b c a"), (3, "c c b a"), (4, "b")]);
        let query = SpanQuery::or(vec![
            SpanQuery::or(vec![t("a"), SpanQuery::near(vec![t("b")], 0, true).unwrap()]).unwrap(),
            SpanQuery::first(t("c"), 2),
        ])
        .unwrap();
        let rewritten = query.rewrite();
        assert!(matches!(rewritten, Cow::Owned(_)));
        assert_eq!(
            drain(&mut rewritten.open(&index).unwrap()),
            drain(&mut query.open(&index).unwrap())
        );
    }
}
