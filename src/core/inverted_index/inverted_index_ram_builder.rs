use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::{debug, error};

use crate::core::common::Term;
use crate::core::inverted_index::{InvertedIndexError, InvertedIndexRam};
use crate::core::posting_list::PostingListBuilder;
use crate::core::scorer::{DefaultSimilarity, Similarity};
use crate::{DocId, Position};

/// Builder for InvertedIndexRam
pub struct InvertedIndexRamBuilder {
    pub posting_builders: BTreeMap<Term, PostingListBuilder>,
    /// Per field, number of tokens indexed for each doc.
    pub field_lengths: HashMap<String, HashMap<DocId, u32>>,
    pub memory: usize,
    similarity: Arc<dyn Similarity>,
}

impl Default for InvertedIndexRamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvertedIndexRamBuilder {
    pub fn new() -> InvertedIndexRamBuilder {
        InvertedIndexRamBuilder {
            posting_builders: BTreeMap::new(),
            field_lengths: HashMap::new(),
            memory: 0,
            similarity: Arc::new(DefaultSimilarity),
        }
    }

    /// Norms are computed with `similarity` instead of [`DefaultSimilarity`].
    pub fn with_similarity(mut self, similarity: Arc<dyn Similarity>) -> Self {
        self.similarity = similarity;
        self
    }

    /// Returns the total memory usage of the postings held by the builder in bytes.
    pub fn memory_usage(&self) -> usize {
        self.memory
    }

    /// Index pre-tokenized text of `field` for `doc`.
    ///
    /// Tokens get consecutive positions. Adding to a `(doc, field)` pair twice
    /// continues after the positions it already holds. Returns the number of tokens indexed.
    pub fn add_document<I, S>(
        &mut self,
        doc: DocId,
        field: &str,
        tokens: I,
    ) -> Result<usize, InvertedIndexError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if doc == DocId::MAX {
            let error_msg = format!("doc id {} is reserved as the exhausted sentinel", doc);
            error!("[InvertedIndexRamBuilder] {}", error_msg);
            return Err(InvertedIndexError::InvalidDocument(error_msg));
        }

        let field_length =
            self.field_lengths.entry(field.to_string()).or_default().entry(doc).or_insert(0);
        let mut position: Position = *field_length;
        let mut indexed = 0;
        for token in tokens {
            let term = Term::new(field, token.as_ref());
            let builder = self
                .posting_builders
                .entry(term)
                .or_insert_with(|| PostingListBuilder::new().with_finally_sort(true));
            let memory_before = builder.memory_usage();
            builder.add(doc, position);
            self.memory += builder.memory_usage() - memory_before;

            position = match position.checked_add(1) {
                Some(next) => next,
                None => {
                    let error_msg = format!("doc {} field {} has too many tokens", doc, field);
                    error!("[InvertedIndexRamBuilder] {}", error_msg);
                    return Err(InvertedIndexError::InvalidDocument(error_msg));
                }
            };
            indexed += 1;
        }
        *field_length = position;
        Ok(indexed)
    }

    /// Consumes the builder and returns an InvertedIndexRam
    pub fn build(self) -> Result<InvertedIndexRam, InvertedIndexError> {
        let mut postings = BTreeMap::new();
        for (term, posting_builder) in self.posting_builders {
            postings.insert(term, posting_builder.build()?);
        }

        let mut docs: Vec<DocId> =
            self.field_lengths.values().flat_map(|lengths| lengths.keys().copied()).collect();
        docs.sort_unstable();
        docs.dedup();
        let max_doc = docs.last().map(|&doc| doc + 1).unwrap_or(0);

        let norms: HashMap<String, HashMap<DocId, f32>> = self
            .field_lengths
            .into_iter()
            .map(|(field, lengths)| {
                let field_norms: HashMap<DocId, f32> = lengths
                    .into_iter()
                    .map(|(doc, len)| (doc, self.similarity.length_norm(len)))
                    .collect();
                (field, field_norms)
            })
            .collect();

        debug!("[InvertedIndexRamBuilder] built {} terms over {} docs", postings.len(), docs.len());
        Ok(InvertedIndexRam { postings, norms, doc_count: docs.len(), max_doc })
    }
}
