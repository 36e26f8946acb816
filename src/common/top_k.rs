use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::types::{ScoreType, ScoredDoc};

/// Keeps the `k` best scored documents seen so far.
#[derive(Debug, Clone, Default)]
pub struct TopK {
    max_size: usize,
    heap: BinaryHeap<Reverse<ScoredDoc>>,
}

impl TopK {
    pub fn new(max_size: usize) -> Self {
        Self { max_size, heap: BinaryHeap::with_capacity(max_size.saturating_add(1)) }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Minimum score a document needs to enter the queue once it is full.
    pub fn threshold(&self) -> ScoreType {
        if self.heap.len() == self.max_size {
            self.heap.peek().map(|e| e.0.score).unwrap_or(ScoreType::MIN)
        } else {
            ScoreType::MIN
        }
    }

    pub fn push(&mut self, element: ScoredDoc) {
        if self.max_size == 0 {
            return;
        }
        if self.heap.len() < self.max_size {
            self.heap.push(Reverse(element));
        } else if let Some(mut worst) = self.heap.peek_mut() {
            if element > worst.0 {
                *worst = Reverse(element);
            }
        }
    }

    /// Best first.
    pub fn into_vec(self) -> Vec<ScoredDoc> {
        let mut result: Vec<ScoredDoc> = self.heap.into_iter().map(|e| e.0).collect();
        result.sort_unstable_by(|a, b| b.cmp(a));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_best() {
        let mut top_k = TopK::new(2);
        top_k.push(ScoredDoc::new(0, 0.5));
        top_k.push(ScoredDoc::new(1, 2.0));
        assert_eq!(top_k.threshold(), 0.5);
        top_k.push(ScoredDoc::new(2, 1.0));
        top_k.push(ScoredDoc::new(3, 0.1));
        assert_eq!(top_k.len(), 2);
        let result = top_k.into_vec();
        assert_eq!(result.iter().map(|e| e.doc).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_not_full_threshold() {
        let mut top_k = TopK::new(3);
        top_k.push(ScoredDoc::new(7, 3.0));
        assert_eq!(top_k.threshold(), ScoreType::MIN);
    }

    #[test]
    fn test_zero_capacity() {
        let mut top_k = TopK::new(0);
        top_k.push(ScoredDoc::new(7, 3.0));
        assert!(top_k.is_empty());
    }

    #[test]
    fn test_equal_scores_keep_smaller_doc() {
        let mut top_k = TopK::new(1);
        top_k.push(ScoredDoc::new(5, 1.0));
        top_k.push(ScoredDoc::new(2, 1.0));
        assert_eq!(top_k.into_vec()[0].doc, 2);
    }
}
