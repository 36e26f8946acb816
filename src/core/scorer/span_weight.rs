use std::collections::BTreeSet;
use std::sync::Arc;

use itertools::Itertools;
use log::debug;

use super::{Explanation, SpanScorer, Similarity};
use crate::common::ScoreType;
use crate::core::common::Term;
use crate::core::inverted_index::IndexReader;
use crate::core::query::{SpanQuery, SpanQueryError, SpanQueryOps};
use crate::DocId;

/// Query-level statistics of a span query against one index.
///
/// The weight value is `idf * boost * query_norm * idf`: the query weight
/// `idf * boost`, normalized, times idf again.
pub struct SpanWeight {
    query: SpanQuery,
    similarity: Arc<dyn Similarity>,
    terms: BTreeSet<Term>,
    idf: ScoreType,
    boost: ScoreType,
    query_norm: ScoreType,
    query_weight: ScoreType,
    value: ScoreType,
}

impl SpanWeight {
    pub fn new(
        query: &SpanQuery,
        reader: &dyn IndexReader,
        similarity: Arc<dyn Similarity>,
        boost: ScoreType,
    ) -> Self {
        let query = query.rewrite().into_owned();
        let terms = query.terms();
        let max_doc = reader.max_doc();
        let idf: ScoreType =
            terms.iter().map(|term| similarity.idf(reader.doc_freq(term), max_doc)).sum();
        debug!("[SpanWeight] {} over terms [{}] has idf {}", query, terms.iter().join(", "), idf);
        let mut weight = Self {
            query,
            similarity,
            terms,
            idf,
            boost,
            query_norm: 1.0,
            query_weight: idf * boost,
            value: 0.0,
        };
        weight.normalize(1.0);
        weight
    }

    pub fn query(&self) -> &SpanQuery {
        &self.query
    }

    pub fn terms(&self) -> &BTreeSet<Term> {
        &self.terms
    }

    pub fn idf(&self) -> ScoreType {
        self.idf
    }

    pub fn value(&self) -> ScoreType {
        self.value
    }

    pub fn value_for_normalization(&self) -> ScoreType {
        let query_weight = self.idf * self.boost;
        query_weight * query_weight
    }

    /// Fold the query norm into the weight value.
    pub fn normalize(&mut self, query_norm: ScoreType) {
        self.query_norm = query_norm;
        self.query_weight = self.idf * self.boost * query_norm;
        self.value = self.query_weight * self.idf;
    }

    pub fn scorer<'a>(
        &self,
        reader: &'a dyn IndexReader,
    ) -> Result<SpanScorer<'a>, SpanQueryError> {
        let spans = self.query.open(reader)?;
        Ok(SpanScorer::new(spans, reader, self.similarity.clone(), self.query.field(), self.value))
    }

    fn idf_explanation(&self, reader: &dyn IndexReader) -> Explanation {
        let doc_freqs = self
            .terms
            .iter()
            .map(|term| format!("{}={}", term, reader.doc_freq(term)))
            .join(" ");
        Explanation::new(self.idf, format!("idf({}: {})", self.query.field(), doc_freqs))
    }

    /// How `doc` is scored, or a zero-valued explanation when it does not match.
    pub fn explain(
        &self,
        reader: &dyn IndexReader,
        doc: DocId,
    ) -> Result<Explanation, SpanQueryError> {
        let mut scorer = self.scorer(reader)?;
        if !scorer.seek_doc(doc)? || scorer.doc() != doc {
            let description = format!("no matching spans for {} in doc {}", self.query, doc);
            return Ok(Explanation::new(0.0, description));
        }

        let mut query_details = vec![];
        if self.boost != 1.0 {
            query_details.push(Explanation::new(self.boost, "boost"));
        }
        query_details.push(self.idf_explanation(reader));
        query_details.push(Explanation::new(self.query_norm, "queryNorm"));
        let query_expl = Explanation::with_details(
            self.query_weight,
            format!("queryWeight({}), product of:", self.query),
            query_details,
        );

        let tf = self.similarity.tf(scorer.freq());
        let field_norm = scorer.field_norm();
        let field_expl = Explanation::with_details(
            tf * self.idf * field_norm,
            format!("fieldWeight({} in {}), product of:", self.query, doc),
            vec![
                Explanation::new(tf, format!("tf(phraseFreq={})", scorer.freq())),
                self.idf_explanation(reader),
                Explanation::new(
                    field_norm,
                    format!("fieldNorm(field={}, doc={})", self.query.field(), doc),
                ),
            ],
        );

        if query_expl.value == 1.0 {
            return Ok(field_expl);
        }
        Ok(Explanation::with_details(
            query_expl.value * field_expl.value,
            format!("weight({} in {}), product of:", self.query, doc),
            vec![query_expl, field_expl],
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::SpanWeight;
    use crate::core::scorer::{DefaultSimilarity, Similarity};
    use crate::core::spans::test::{build_index, FIELD};
    use crate::core::SpanQuery;

    fn phrase() -> SpanQuery {
        let clauses = vec![SpanQuery::term(FIELD, "quick"), SpanQuery::term(FIELD, "fox")];
        SpanQuery::near(clauses, 0, true).unwrap()
    }

    #[test]
    fn test_idf_sums_terms() {
        let index = build_index(&[(0, "quick fox"), (1, "quick"), (2, "slow dog"), (3, "fox")]);
        let sim = DefaultSimilarity;
        let weight = SpanWeight::new(&phrase(), &index, Arc::new(DefaultSimilarity), 2.0);
        let expected = sim.idf(2, 4) + sim.idf(2, 4);
        assert!((weight.idf() - expected).abs() < 1e-6);
        assert!((weight.value_for_normalization() - (2.0 * expected).powi(2)).abs() < 1e-4);
        assert!((weight.value() - 2.0 * expected * expected).abs() < 1e-4);
    }

    #[test]
    fn test_normalize() {
        let index = build_index(&[(0, "quick fox"), (1, "dog"), (2, "cat")]);
        let mut weight = SpanWeight::new(&phrase(), &index, Arc::new(DefaultSimilarity), 1.0);
        let norm = DefaultSimilarity.query_norm(weight.value_for_normalization());
        weight.normalize(norm);
        // normalized query weight is 1, so the value is idf
        assert!((weight.value() - weight.idf()).abs() < 1e-5);
    }

    #[test]
    fn test_explain_matches_score() {
        let docs = [(0, "quick fox jumps"), (1, "dog"), (2, "the quick fox"), (3, "fox quick")];
        let index = build_index(&docs);
        let mut weight = SpanWeight::new(&phrase(), &index, Arc::new(DefaultSimilarity), 1.5);
        weight.normalize(0.3);
        let mut scorer = weight.scorer(&index).unwrap();
        while scorer.next_doc().unwrap() {
            let explanation = weight.explain(&index, scorer.doc()).unwrap();
            assert!(explanation.is_match());
            assert!((explanation.value - scorer.score()).abs() < 1e-5, "{}", explanation);
            assert_eq!(explanation.details.len(), 2);
        }
        let miss = weight.explain(&index, 3).unwrap();
        assert!(!miss.is_match());
        assert!(miss.details.is_empty());
    }
}
