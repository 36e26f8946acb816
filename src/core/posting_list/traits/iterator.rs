use crate::core::IndexReadError;
use crate::{DocId, Position};

/// Forward-only enumerator over one term's postings: docs ascending, each
/// carrying its sorted positions.
///
/// The enumerator starts unpositioned; `doc`, `term_freq` and `positions`
/// are only meaningful after `next_doc` or `seek` returned `true`.
pub trait PostingsEnum {
    /// Move to the next doc. Returns `false` once the postings are exhausted.
    fn next_doc(&mut self) -> Result<bool, IndexReadError>;

    /// Move to the first doc `>= target`. Never moves backwards: when already
    /// positioned on a doc `>= target` this is a no-op returning `true`.
    fn seek(&mut self, target: DocId) -> Result<bool, IndexReadError>;

    fn doc(&self) -> DocId;

    fn term_freq(&self) -> u32;

    /// Positions of the term inside the current doc, ascending.
    fn positions(&self) -> &[Position];
}
