use thiserror::Error;

/// Errors surfaced while constructing expression components.
///
/// Every variant is a programmer or input error detected synchronously at
/// construction or assembly time; none of them is retryable. Malformed wire
/// payloads are reported through `serde`'s own error type instead.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// The attribute path string was empty.
    #[error("attribute path must contain at least one segment")]
    EmptyPath,

    /// The attribute path contained an empty segment (e.g. `a..b`).
    #[error("attribute path `{path}` contains an empty segment")]
    EmptySegment {
        /// The offending path string.
        path: String,
    },

    /// The projection contained no attribute paths.
    #[error("projection must select at least one attribute path")]
    EmptyProjection,

    /// The update expression contained no clauses.
    #[error("update expression must contain at least one clause")]
    EmptyUpdate,
}

/// Result alias for expression-building operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
