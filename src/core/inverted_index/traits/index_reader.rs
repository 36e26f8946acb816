use crate::core::common::Term;
use crate::core::inverted_index::IndexReadError;
use crate::core::posting_list::PostingsEnum;
use crate::DocId;

/// Read-only view of a positional index, as consumed by span queries and scorers.
pub trait IndexReader {
    /// Enumerator over `term`'s postings, `None` when the term never occurs.
    fn postings(&self, term: &Term) -> Result<Option<Box<dyn PostingsEnum + '_>>, IndexReadError>;

    /// Number of docs containing `term`.
    fn doc_freq(&self, term: &Term) -> u32;

    /// One more than the largest doc id.
    fn max_doc(&self) -> DocId;

    /// Field-length normalization factor of `doc` for `field`.
    fn norm(&self, field: &str, doc: DocId) -> f32;
}
