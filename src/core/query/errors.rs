use thiserror::Error;

use crate::core::IndexReadError;

#[derive(Debug, Clone, Error)]
pub enum SpanQueryError {
    #[error("Invalid span query: '{0}'")]
    InvalidQuery(String),

    #[error(transparent)]
    IndexReadError(#[from] IndexReadError),
}
