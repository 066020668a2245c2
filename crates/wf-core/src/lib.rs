//! Core content model for Wayfinder: oracle trees, moves, and setting truths.
//!
//! The content library is read-only reference data loaded once at startup.
//! This crate defines its shape, loads it from JSON, and provides the
//! read-only traversals everything else is built on: find-by-id, the
//! rollability test, and the flattened autocomplete index.

/// Error types used throughout the crate.
pub mod error;
/// Oracle tree nodes: table items, container items, and rows.
pub mod item;
/// The loaded content library and lookups into it.
pub mod library;
/// Move definitions and their outcome bands.
pub mod moves;
/// Flattened autocomplete entries and the search query builder.
pub mod search;
/// Setting truths and their options.
pub mod truth;
/// Content validation (table coverage, dangling references).
pub mod validate;

/// Re-export error types.
pub use error::{ContentError, ContentResult};
/// Re-export oracle tree types.
pub use item::{DisplayInfo, ItemId, ItemKind, RollableItem, Row, Usage};
/// Re-export the library.
pub use library::Library;
/// Re-export move types.
pub use moves::{ActionOutcome, Move, MoveCategory, MoveOutcomes, OutcomeText};
/// Re-export search types.
pub use search::{SearchEntry, SearchQuery};
/// Re-export truth types.
pub use truth::{Truth, TruthOption};
/// Re-export validation types.
pub use validate::{ValidationIssue, validate_library};
