//! Text rendering of results.
//!
//! Everything here is pure: a result goes in, markdown comes out.
//! Sanitization is applied to content text after resolution.

pub mod moves;
pub mod oracle;
pub mod progress;
pub mod sanitize;
pub mod truth;

pub use moves::{format_action_roll, format_move};
pub use oracle::{format, format_as_list};
pub use progress::format_progress;
pub use sanitize::{remove_links, remove_tables, sanitize_text};
pub use truth::{TruthContent, format_truth};

/// The small "source" line under a roll: the value and where it came from.
pub(crate) fn source_line(value: impl std::fmt::Display, source: &str) -> String {
    format!("-# `→ {value}` ◇ {source}")
}
