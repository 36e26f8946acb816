use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::DocId;

pub type ScoreType = f32;

/// A document together with the score a query gave it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoredDoc {
    pub doc: DocId,
    pub score: ScoreType,
}

impl ScoredDoc {
    pub fn new(doc: DocId, score: ScoreType) -> Self {
        Self { doc, score }
    }
}

impl Eq for ScoredDoc {}

impl PartialEq<Self> for ScoredDoc {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

// Higher score wins; on equal scores the smaller doc id wins.
impl Ord for ScoredDoc {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.score)
            .cmp(&OrderedFloat(other.score))
            .then_with(|| other.doc.cmp(&self.doc))
    }
}

impl PartialOrd for ScoredDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
