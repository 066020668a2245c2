//! Error types for interactions.
//!
//! Errors are typed where they are detected and turned into a
//! user-facing message only at the transport boundary
//! ([`InteractError::user_message`]).

use thiserror::Error;
use wf_mechanics::MechError;

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

/// Result type for interaction handling.
pub type InteractResult<T> = Result<T, InteractError>;

/// Errors raised while decoding or building a token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token belongs to a different schema.
    #[error("expected a '{expected}' token, found '{found}'")]
    WrongSchema {
        /// The schema the caller asked for.
        expected: &'static str,
        /// The schema name found in the token.
        found: String,
    },

    /// The token has a schema name but no data.
    #[error("missing data in '{0}' token")]
    MissingData(&'static str),

    /// The token has the wrong number of fields.
    #[error("'{schema}' token has {found} fields, expected {expected}")]
    FieldCount {
        /// The schema being decoded.
        schema: &'static str,
        /// Number of fields the schema declares.
        expected: usize,
        /// Number of fields found.
        found: usize,
    },

    /// A field is not valid base64 or not valid UTF-8.
    #[error("field {index} is not valid base64 text")]
    InvalidEncoding {
        /// Zero-based field position.
        index: usize,
    },

    /// A field decoded but could not be parsed.
    #[error("invalid {field}: '{value}'")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// The raw decoded value.
        value: String,
    },

    /// The encoded token exceeds the transport's length limit.
    #[error("token is {len} characters long, limit is {limit}")]
    TooLong {
        /// Length of the encoded token.
        len: usize,
        /// The configured limit.
        limit: usize,
    },
}

/// Errors raised while handling a command or interaction.
#[derive(Debug, Error)]
pub enum InteractError {
    /// An id does not resolve to any content item.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was looked up ("oracle", "move", "truth", ...).
        kind: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// A container has nothing rollable below it.
    #[error("nothing to roll in '{0}'")]
    NotRollable(String),

    /// Roll resolution failed.
    #[error(transparent)]
    Mechanics(#[from] MechError),

    /// A token could not be decoded.
    #[error("invalid interaction: {0}")]
    Token(#[from] TokenError),

    /// No registered handler accepts the token.
    #[error("no handler found for '{0}'")]
    NoHandler(String),

    /// The user supplied invalid input.
    #[error("{0}")]
    InvalidInput(String),
}

impl InteractError {
    /// Returns true for errors caused by malformed content or a bug,
    /// as opposed to a bad or stale request.
    pub fn is_internal(&self) -> bool {
        match self {
            Self::Mechanics(e) => e.is_content_error() || matches!(e, MechError::InvalidPool(_)),
            _ => false,
        }
    }

    /// The message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { kind, id } => format!("Could not find {kind} \"{id}\"."),
            Self::NotRollable(_) => "Nothing to roll here.".to_string(),
            Self::Mechanics(MechError::RowOutOfBounds { .. }) => {
                "That row does not exist in this table.".to_string()
            }
            Self::Mechanics(MechError::NotATable(_)) => {
                "This item has no table to navigate.".to_string()
            }
            Self::Mechanics(_) => {
                "The content for this roll is malformed. The problem has been logged.".to_string()
            }
            Self::Token(_) | Self::NoHandler(_) => {
                "This interaction is invalid or has expired.".to_string()
            }
            Self::InvalidInput(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let err = InteractError::NotFound {
            kind: "oracle",
            id: "nonexistent".to_string(),
        };
        assert_eq!(err.user_message(), "Could not find oracle \"nonexistent\".");
        assert!(!err.is_internal());
    }

    #[test]
    fn token_errors_read_as_expired() {
        let err = InteractError::from(TokenError::MissingData("oracle_new"));
        assert_eq!(err.user_message(), "This interaction is invalid or has expired.");
        let err = InteractError::NoHandler("bogus".to_string());
        assert_eq!(err.user_message(), "This interaction is invalid or has expired.");
    }

    #[test]
    fn malformed_table_is_internal() {
        let err = InteractError::from(MechError::NoMatchingRow {
            id: "T".to_string(),
            roll: 50,
        });
        assert!(err.is_internal());
        assert!(err.user_message().contains("malformed"));
    }

    #[test]
    fn bounds_error_is_user_error() {
        let err = InteractError::from(MechError::RowOutOfBounds {
            id: "T".to_string(),
            index: 9,
            len: 3,
        });
        assert!(!err.is_internal());
        assert_eq!(err.user_message(), "That row does not exist in this table.");
    }

    #[test]
    fn invalid_input_passes_message_through() {
        let err = InteractError::InvalidInput("Invalid stat value: \"x\".".to_string());
        assert_eq!(err.user_message(), "Invalid stat value: \"x\".");
    }
}
