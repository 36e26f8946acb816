use std::collections::{BTreeMap, HashMap};

use crate::core::common::Term;
use crate::core::inverted_index::{IndexReadError, IndexReader};
use crate::core::posting_list::{PostingList, PostingsEnum};
use crate::DocId;

/// In-memory positional inverted index: term -> doc-sorted positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InvertedIndexRam {
    /// Posting lists of each term, ordered by `(field, text)`.
    pub postings: BTreeMap<Term, PostingList>,
    /// Per field, the length norm of each doc, computed on build.
    pub norms: HashMap<String, HashMap<DocId, f32>>,
    /// Number of unique docs, pre-computed on build.
    pub doc_count: usize,
    /// One more than the largest doc id.
    pub max_doc: DocId,
}

impl InvertedIndexRam {
    /// Get posting list for a term
    pub fn get(&self, term: &Term) -> Option<&PostingList> {
        self.postings.get(term)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    /// Terms of `field` in ascending text order.
    pub fn terms<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Term> + 'a {
        self.postings.keys().filter(move |t| t.field() == field)
    }
}

impl IndexReader for InvertedIndexRam {
    fn postings(&self, term: &Term) -> Result<Option<Box<dyn PostingsEnum + '_>>, IndexReadError> {
        Ok(self.get(term).map(|posting| Box::new(posting.iter()) as Box<dyn PostingsEnum + '_>))
    }

    fn doc_freq(&self, term: &Term) -> u32 {
        self.get(term).map(|posting| posting.len() as u32).unwrap_or(0)
    }

    fn max_doc(&self) -> DocId {
        self.max_doc
    }

    fn norm(&self, field: &str, doc: DocId) -> f32 {
        self.norms.get(field).and_then(|docs| docs.get(&doc)).copied().unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::common::Term;
    use crate::core::inverted_index::{IndexReader, InvertedIndexRamBuilder};

    #[test]
    fn test_reader_over_built_index() {
        let mut builder = InvertedIndexRamBuilder::new();
        document!(builder, 3, "body" => "a b a").unwrap();
        assert_eq!(document!(builder, 0, "body" => "b c", "title" => "a").unwrap(), 3);
        let index = builder.build().expect("build index");

        assert_eq!(index.max_doc(), 4);
        assert_eq!(index.doc_count(), 2);
        assert_eq!(index.doc_freq(&Term::new("body", "b")), 2);
        assert_eq!(index.doc_freq(&Term::new("body", "z")), 0);
        assert_eq!(index.terms("body").map(|t| t.text()).collect::<Vec<_>>(), vec!["a", "b", "c"]);

        let mut postings = index.postings(&Term::new("body", "a")).unwrap().unwrap();
        assert!(postings.next_doc().unwrap());
        assert_eq!((postings.doc(), postings.positions()), (3, &[0, 2][..]));
        assert!(!postings.next_doc().unwrap());
        assert!(index.postings(&Term::new("title", "b")).unwrap().is_none());
    }

    #[test]
    fn test_norms() {
        let mut builder = InvertedIndexRamBuilder::new();
        document!(builder, 1, "body" => "a b c d").unwrap();
        let index = builder.build().expect("build index");
        assert!((index.norm("body", 1) - 0.5).abs() < 1e-6);
        assert_eq!(index.norm("body", 7), 1.0);
        assert_eq!(index.norm("title", 1), 1.0);
    }
}
