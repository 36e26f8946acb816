mod explanation;
mod similarity;
mod span_scorer;
mod span_weight;

pub use explanation::Explanation;
pub use similarity::{DefaultSimilarity, Similarity};
pub use span_scorer::SpanScorer;
pub use span_weight::SpanWeight;
