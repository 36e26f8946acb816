use std::{io, sync::Arc};
use thiserror::Error;
use validator::ValidationErrors;

use crate::common::file_operations::FileOperationError;
use crate::core::{IndexReadError, SpanQueryError};

/// The library's error enum
#[derive(Debug, Error)]
pub enum SpanIndexError {
    /// IO Error.
    #[error("An IO error occurred: '{0}'")]
    IoError(Arc<io::Error>),

    /// A span query was rejected while it was being built or opened.
    #[error("'{0:?}'")]
    SpanQueryError(#[from] SpanQueryError),

    /// The index failed while a cursor was pulling postings.
    #[error("'{0:?}'")]
    IndexReadError(#[from] IndexReadError),

    #[error("'{0:?}'")]
    FileOperationError(#[from] FileOperationError),

    /// Invalid argument was passed by the user.
    #[error("An invalid argument was passed: '{0}'")]
    InvalidArgument(String),

    /// A config or query parameter failed validation.
    #[error("Validation failed: '{0}'")]
    ValidationError(#[from] ValidationErrors),

    /// Logger could not be installed.
    #[error("Failed to initialize logger: '{0}'")]
    LoggerError(String),
}

impl From<io::Error> for SpanIndexError {
    fn from(io_err: io::Error) -> SpanIndexError {
        SpanIndexError::IoError(Arc::new(io_err))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::SpanIndexError;
    use crate::core::SpanQueryError;

    #[test]
    fn test_query_error_converts() {
        let err: SpanIndexError = SpanQueryError::InvalidQuery("fields differ".to_string()).into();
        assert!(matches!(err, SpanIndexError::SpanQueryError(SpanQueryError::InvalidQuery(_))));
        assert!(err.to_string().contains("fields differ"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: SpanIndexError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        match err {
            SpanIndexError::IoError(inner) => assert_eq!(inner.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
