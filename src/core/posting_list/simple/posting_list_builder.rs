use log::error;

use super::{PositionsElement, PostingList};
use crate::core::posting_list::PostingListError;
use crate::{DocId, Position};

/// Accumulates `(doc, position)` pairs of a single term.
#[derive(Default)]
pub struct PostingListBuilder {
    posting: PostingList,
    finally_sort: bool,
}

// Builder pattern
impl PostingListBuilder {
    pub fn new() -> Self {
        Self { posting: PostingList::new(), finally_sort: false }
    }

    pub fn with_finally_sort(mut self, sort: bool) -> Self {
        self.finally_sort = sort;
        self
    }
}

impl PostingListBuilder {
    /// ## brief
    /// record one occurrence of the term.
    /// ## return
    /// bool: `true` when the position is new for this doc.
    pub fn add(&mut self, doc: DocId, position: Position) -> bool {
        if self.finally_sort {
            match self.posting.elements.iter_mut().rev().find(|e| e.doc == doc) {
                Some(element) => {
                    if element.positions.contains(&position) {
                        return false;
                    }
                    element.positions.push(position);
                    true
                }
                None => {
                    self.posting.elements.push(PositionsElement::new(doc, vec![position]));
                    true
                }
            }
        } else {
            self.posting.upsert(doc, position).1
        }
    }

    /// Record a whole positions list for `doc` at once.
    pub fn add_positions(&mut self, doc: DocId, positions: &[Position]) -> usize {
        positions.iter().filter(|&&p| self.add(doc, p)).count()
    }

    pub fn memory_usage(&self) -> usize {
        self.posting
            .elements
            .iter()
            .map(|e| {
                std::mem::size_of::<PositionsElement>()
                    + e.positions.len() * std::mem::size_of::<Position>()
            })
            .sum()
    }

    pub fn build(mut self) -> Result<PostingList, PostingListError> {
        if self.finally_sort {
            self.posting.elements.sort_unstable_by_key(|e| e.doc);
            for element in self.posting.elements.iter_mut() {
                element.positions.sort_unstable();
            }
        }

        if let Some(res) = self.posting.elements.windows(2).find(|e| e[0].doc >= e[1].doc) {
            let error_msg = format!("left doc: {}, right doc: {}", res[0].doc, res[1].doc);
            error!("[PostingListBuilder] Duplicated or unsorted doc, {}", error_msg);
            return Err(PostingListError::UnsortedDocs(error_msg));
        }
        for element in self.posting.elements.iter() {
            if element.positions.is_empty() {
                let error_msg = format!("doc {} carries no position", element.doc);
                error!("[PostingListBuilder] {}", error_msg);
                return Err(PostingListError::InvalidPositions(error_msg));
            }
            if element.positions.windows(2).any(|p| p[0] >= p[1]) {
                let error_msg = format!(
                    "positions of doc {} are not strictly ascending: {:?}",
                    element.doc, element.positions
                );
                error!("[PostingListBuilder] {}", error_msg);
                return Err(PostingListError::InvalidPositions(error_msg));
            }
        }

        Ok(self.posting)
    }
}

#[cfg(test)]
mod tests {
    use super::PostingListBuilder;
    use crate::core::posting_list::{PositionsElement, PostingListError};

    #[test]
    fn test_build_unsorted_input() {
        let mut builder = PostingListBuilder::new().with_finally_sort(true);
        builder.add(7, 3);
        builder.add(2, 9);
        builder.add(7, 1);
        assert!(!builder.add(7, 3));
        let posting = builder.build().expect("build should succeed");
        assert_eq!(
            posting.elements,
            vec![PositionsElement::new(2, vec![9]), PositionsElement::new(7, vec![1, 3])]
        );
    }

    #[test]
    fn test_build_sequential_input() {
        let mut builder = PostingListBuilder::new();
        assert_eq!(builder.add_positions(1, &[0, 2, 2, 5]), 3);
        builder.add(4, 1);
        assert!(builder.memory_usage() > 0);
        let posting = builder.build().expect("build should succeed");
        assert_eq!(posting.len(), 2);
        assert_eq!(posting.get(1).map(|e| e.positions.clone()), Some(vec![0, 2, 5]));
    }

    #[test]
    fn test_build_rejects_empty_positions() {
        let mut builder = PostingListBuilder::new();
        builder.add(1, 0);
        builder.posting.elements.push(PositionsElement::new(3, vec![]));
        assert!(matches!(builder.build(), Err(PostingListError::InvalidPositions(_))));
    }

    #[test]
    fn test_build_rejects_unsorted_docs() {
        let mut builder = PostingListBuilder::new();
        builder.add(1, 0);
        builder.posting.elements.push(PositionsElement::new(1, vec![4]));
        assert!(matches!(builder.build(), Err(PostingListError::UnsortedDocs(_))));
    }
}
