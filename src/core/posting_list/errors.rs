use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PostingListError {
    #[error("Invalid positions: '{0}'")]
    InvalidPositions(String),

    #[error("Duplicated doc or posting is not sorted by doc: '{0}'")]
    UnsortedDocs(String),
}
