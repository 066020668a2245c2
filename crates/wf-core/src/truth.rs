use serde::{Deserialize, Serialize};

use crate::item::{DICE_MAX, DICE_MIN, ItemId, Row};

/// Descriptions at least this long are shortened when used as a label.
const LONG_DESCRIPTION: usize = 100;
/// Number of characters kept when shortening a description.
const SHORT_DESCRIPTION: usize = 50;

/// A setting truth: a question about the setting with a table of answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truth {
    /// Stable identifier.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// A short in-character quote shown under the truth.
    #[serde(default)]
    pub character: String,
    /// Optional icon reference.
    #[serde(default)]
    pub icon: Option<String>,
    /// Possible answers.
    #[serde(default)]
    pub options: Vec<TruthOption>,
}

impl Truth {
    /// Find an option by identifier.
    pub fn find_option(&self, id: &str) -> Option<&TruthOption> {
        self.options.iter().find(|o| o.id == *id)
    }
}

/// One possible answer to a setting truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruthOption {
    /// Stable identifier, prefixed with the truth's identifier.
    pub id: ItemId,
    /// Lowest roll value selecting this option.
    #[serde(default)]
    pub floor: Option<u32>,
    /// Highest roll value selecting this option.
    #[serde(default)]
    pub ceiling: Option<u32>,
    /// Optional short title.
    #[serde(default)]
    pub title: Option<String>,
    /// Full description.
    pub description: String,
    /// Optional table rolled when this option is chosen.
    #[serde(default)]
    pub subtable: Vec<Row>,
}

impl TruthOption {
    /// Returns true if choosing this option rolls on a subtable.
    pub fn has_subtable(&self) -> bool {
        !self.subtable.is_empty()
    }

    /// Returns true if `value` selects this option. Missing bounds
    /// default to 1 and 100.
    pub fn contains(&self, value: u32) -> bool {
        let floor = self.floor.unwrap_or(DICE_MIN);
        let ceiling = self.ceiling.unwrap_or(DICE_MAX);
        (floor..=ceiling).contains(&value)
    }

    /// A short label for select menus: the title, or the description
    /// shortened when it is long.
    pub fn label(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        if self.description.chars().count() >= LONG_DESCRIPTION {
            let short: String = self.description.chars().take(SHORT_DESCRIPTION).collect();
            format!("{short}...")
        } else {
            self.description.clone()
        }
    }
}
