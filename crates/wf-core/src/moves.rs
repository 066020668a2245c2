use std::fmt;

use serde::{Deserialize, Serialize};

use crate::item::ItemId;

/// A named group of moves (e.g. "Adventure", "Combat").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveCategory {
    /// Category name, shown in autocomplete labels.
    pub name: String,
    /// Moves in this category.
    #[serde(default)]
    pub moves: Vec<Move>,
}

/// A move: a rules procedure the player can trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// Stable identifier.
    pub id: ItemId,
    /// Short name.
    pub name: String,
    /// Display title; empty means "same as name".
    #[serde(default)]
    pub title: String,
    /// Rules text, possibly containing links and tables.
    #[serde(default)]
    pub text: String,
    /// Outcome texts, present for moves that call for an action roll.
    #[serde(default)]
    pub outcomes: Option<MoveOutcomes>,
    /// Oracles the move refers to.
    #[serde(default)]
    pub oracles: Vec<ItemId>,
}

impl Move {
    /// Create a move with no outcomes and no oracles.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: String::new(),
            text: text.into(),
            outcomes: None,
            oracles: Vec::new(),
        }
    }

    /// The title to display.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

/// Result class of an action roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// Action score beats both challenge dice.
    StrongHit,
    /// Action score beats exactly one challenge die.
    WeakHit,
    /// Action score beats neither challenge die.
    Miss,
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrongHit => write!(f, "Strong Hit"),
            Self::WeakHit => write!(f, "Weak Hit"),
            Self::Miss => write!(f, "Miss"),
        }
    }
}

/// The text of one outcome band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeText {
    /// Regular outcome text.
    pub text: String,
    /// Replacement text used when the challenge dice match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_a_match: Option<String>,
}

impl OutcomeText {
    /// Create an outcome text without a match variant.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            with_a_match: None,
        }
    }

    /// The text to show, taking a match into account.
    pub fn resolve(&self, has_match: bool) -> &str {
        match (&self.with_a_match, has_match) {
            (Some(text), true) => text,
            _ => &self.text,
        }
    }
}

/// Outcome texts for all three outcome bands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcomes {
    /// Text for a strong hit.
    pub strong_hit: OutcomeText,
    /// Text for a weak hit.
    pub weak_hit: OutcomeText,
    /// Text for a miss.
    pub miss: OutcomeText,
}

impl MoveOutcomes {
    /// Look up the outcome text for an action outcome.
    pub fn get(&self, outcome: ActionOutcome) -> &OutcomeText {
        match outcome {
            ActionOutcome::StrongHit => &self.strong_hit,
            ActionOutcome::WeakHit => &self.weak_hit,
            ActionOutcome::Miss => &self.miss,
        }
    }
}
