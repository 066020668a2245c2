/// Alias for `Result<T, ContentError>`.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors that can occur when loading the content library.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The content file could not be read.
    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),

    /// The content file is not valid JSON or does not match the schema.
    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),

    /// An oracle node has an impossible shape.
    #[error("invalid item \"{id}\": {reason}")]
    InvalidItem {
        /// The offending item's identifier.
        id: String,
        /// What is wrong with it.
        reason: String,
    },
}
