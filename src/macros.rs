/// Index whitespace-separated text into an
/// [`InvertedIndexRamBuilder`](crate::core::InvertedIndexRamBuilder).
///
/// `document!(builder, doc, "field" => "text", ...)` evaluates to
/// `Result<usize, InvertedIndexError>` holding the number of tokens indexed.
#[macro_export]
macro_rules! document(
    ($builder:expr, $doc:expr) => {
        {
            let indexed: Result<usize, $crate::core::InvertedIndexError> = Ok(0);
            indexed
        }
    };
    ($builder:expr, $doc:expr, $($field:expr => $text:expr),+ $(,)?) => {
        {
            let mut indexed: Result<usize, $crate::core::InvertedIndexError> = Ok(0);
            $(
                if let Ok(count) = indexed {
                    indexed = $builder
                        .add_document($doc, $field, $text.split_whitespace())
                        .map(|n| n + count);
                }
            )+
            indexed
        }
    };
);
