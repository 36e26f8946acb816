use crate::common::ScoreType;
use crate::DocId;

/// Relevance hooks combined with the positional contribution of span matches.
///
/// Every method has the classic tf-idf default, so an implementation only
/// overrides what it tunes.
pub trait Similarity: Send + Sync {
    /// Inverse document frequency of a term occurring in `doc_freq` of `max_doc` docs.
    fn idf(&self, doc_freq: u32, max_doc: DocId) -> ScoreType {
        1.0 + (max_doc as f64 / (doc_freq as f64 + 1.0)).ln() as ScoreType
    }

    /// Score factor of a (possibly fractional) within-doc frequency.
    fn tf(&self, freq: ScoreType) -> ScoreType {
        freq.sqrt()
    }

    /// Contribution of one match whose width exceeds its minimum by `distance`.
    /// Decreases as `distance` grows.
    fn sloppy_freq(&self, distance: u32) -> ScoreType {
        1.0 / (distance as ScoreType + 1.0)
    }

    fn query_norm(&self, sum_of_squared_weights: ScoreType) -> ScoreType {
        if sum_of_squared_weights <= 0.0 {
            return 1.0;
        }
        1.0 / sum_of_squared_weights.sqrt()
    }

    /// Field-length normalization of a field holding `num_terms` tokens.
    fn length_norm(&self, num_terms: u32) -> ScoreType {
        if num_terms == 0 {
            return 1.0;
        }
        1.0 / (num_terms as ScoreType).sqrt()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSimilarity;

impl Similarity for DefaultSimilarity {}
