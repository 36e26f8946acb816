use std::sync::Arc;

use thiserror::Error;

use crate::core::posting_list::PostingListError;

/// Failure of a positions source. Surfaces unchanged through every cursor call.
#[derive(Debug, Clone, Error)]
pub enum IndexReadError {
    #[error("IO error while reading postings: {0}")]
    Io(Arc<std::io::Error>),

    #[error("Corrupted postings: '{0}'")]
    Corrupted(String),
}

impl From<std::io::Error> for IndexReadError {
    fn from(err: std::io::Error) -> Self {
        IndexReadError::Io(Arc::new(err))
    }
}

#[derive(Debug, Error)]
pub enum InvertedIndexError {
    #[error("Invalid document: '{0}'")]
    InvalidDocument(String),

    #[error(transparent)]
    PostingListError(#[from] PostingListError),
}
