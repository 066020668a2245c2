//! Error types for the mechanics engine.

/// Errors that can occur while resolving rolls.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A row-specific roll was requested on an item without a table.
    #[error("'{0}' does not have a rollable table")]
    NotATable(String),

    /// A row index outside the table was requested.
    #[error("row {index} is out of bounds for '{id}' ({len} rows)")]
    RowOutOfBounds {
        /// The table's identifier.
        id: String,
        /// The requested index.
        index: usize,
        /// Number of rows in the table.
        len: usize,
    },

    /// A roll landed outside every row of a table.
    #[error("no row of '{id}' matches roll {roll}")]
    NoMatchingRow {
        /// The table's identifier.
        id: String,
        /// The value rolled.
        roll: u32,
    },

    /// Chained rolls nested deeper than the configured limit.
    #[error("chained rolls from '{id}' exceed the maximum depth of {max_depth}")]
    ChainTooDeep {
        /// The item whose chain overflowed.
        id: String,
        /// The configured limit.
        max_depth: usize,
    },

    /// A dice pool configuration is invalid.
    #[error("invalid pool: {0}")]
    InvalidPool(String),
}

impl MechError {
    /// Returns true for errors caused by malformed content rather than
    /// by a bad request.
    pub fn is_content_error(&self) -> bool {
        matches!(self, Self::NoMatchingRow { .. } | Self::ChainTooDeep { .. })
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
