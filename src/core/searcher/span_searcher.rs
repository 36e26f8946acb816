use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::Relaxed;
use std::sync::Arc;

use log::{debug, warn};

use crate::common::{ScoredDoc, TopK};
use crate::config::SpanSearchConfig;
use crate::core::inverted_index::IndexReader;
use crate::core::query::{SpanQuery, SpanQueryError};
use crate::core::scorer::{DefaultSimilarity, Explanation, Similarity, SpanWeight};
use crate::DocId;

/// Runs span queries against one index reader, keeping the best scored docs.
pub struct SpanSearcher<'a> {
    reader: &'a dyn IndexReader,
    similarity: Arc<dyn Similarity>,
    config: SpanSearchConfig,
}

impl<'a> SpanSearcher<'a> {
    pub fn new(reader: &'a dyn IndexReader, config: SpanSearchConfig) -> Self {
        Self { reader, similarity: Arc::new(DefaultSimilarity), config }
    }

    pub fn with_similarity(mut self, similarity: Arc<dyn Similarity>) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn config(&self) -> &SpanSearchConfig {
        &self.config
    }

    /// Weight of `query`, already normalized.
    pub fn create_weight(&self, query: &SpanQuery) -> SpanWeight {
        let mut weight =
            SpanWeight::new(query, self.reader, self.similarity.clone(), self.config.boost);
        let query_norm = self.similarity.query_norm(weight.value_for_normalization());
        weight.normalize(query_norm);
        weight
    }

    /// Best `top_k` docs of the config, best first.
    pub fn search(&self, query: &SpanQuery) -> Result<Vec<ScoredDoc>, SpanQueryError> {
        let is_stopped = AtomicBool::new(false);
        self.search_with_stop(query, self.config.top_k, &is_stopped)
    }

    /// Best `top` docs, best first. Setting `is_stopped` ends the search
    /// between two docs, returning what was collected so far.
    pub fn search_with_stop(
        &self,
        query: &SpanQuery,
        top: usize,
        is_stopped: &AtomicBool,
    ) -> Result<Vec<ScoredDoc>, SpanQueryError> {
        let weight = self.create_weight(query);
        let mut scorer = weight.scorer(self.reader)?;
        let mut top_results = TopK::new(top);
        let mut matched = 0usize;
        while scorer.next_doc()? {
            if is_stopped.load(Relaxed) {
                warn!("[SpanSearcher] search of {} stopped after {} docs", weight.query(), matched);
                break;
            }
            matched += 1;
            top_results.push(ScoredDoc::new(scorer.doc(), scorer.score()));
        }
        debug!("[SpanSearcher] {} matched {} docs", weight.query(), matched);
        Ok(top_results.into_vec())
    }

    /// Number of docs with at least one match.
    pub fn count(&self, query: &SpanQuery) -> Result<usize, SpanQueryError> {
        let weight = self.create_weight(query);
        let mut scorer = weight.scorer(self.reader)?;
        let mut count = 0;
        while scorer.next_doc()? {
            count += 1;
        }
        Ok(count)
    }

    pub fn explain(&self, query: &SpanQuery, doc: DocId) -> Result<Explanation, SpanQueryError> {
        self.create_weight(query).explain(self.reader, doc)
    }
}
