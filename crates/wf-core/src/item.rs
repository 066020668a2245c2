use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Lowest value on the percentile die; a row without a floor starts here.
pub const DICE_MIN: u32 = 1;
/// Highest value on the percentile die; a row without a ceiling ends here.
pub const DICE_MAX: u32 = 100;

/// Stable, globally unique identifier of a content item
/// (e.g. `Starforged/Oracles/Core/Action`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Advisory usage policy of an oracle. Only presentation consumes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    /// Upper bound of how many times the table may be rolled at once.
    pub max_rolls: Option<u32>,
    /// Whether the table is meant to be rolled repeatedly.
    pub repeatable: bool,
}

impl Usage {
    /// Returns true if the oracle invites rolling it more than once.
    pub fn allows_more_rolls(&self) -> bool {
        self.max_rolls.is_some() || self.repeatable
    }
}

/// Icon and image references of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayInfo {
    /// Path or URL of a vector icon.
    pub icon: Option<String>,
    /// Paths or URLs of raster images.
    pub images: Vec<String>,
}

impl DisplayInfo {
    /// The first available image reference, preferring raster images.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .or(self.icon.as_deref())
    }
}

/// One entry of a table: an inclusive range on the percentile die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Lowest value covered by this row (defaults to 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<u32>,
    /// Highest value covered by this row (defaults to 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<u32>,
    /// The result text, possibly containing link markup.
    pub result: String,
    /// Optional longer explanation of the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Other items to roll automatically when this row is hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_rolls: Option<Vec<ItemId>>,
}

impl Row {
    /// Create a row covering `floor..=ceiling`.
    pub fn new(floor: u32, ceiling: u32, result: impl Into<String>) -> Self {
        Self {
            floor: Some(floor),
            ceiling: Some(ceiling),
            result: result.into(),
            summary: None,
            oracle_rolls: None,
        }
    }

    /// Attach a summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Attach chained oracle ids.
    pub fn with_chain<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        self.oracle_rolls = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Effective lower bound.
    pub fn floor(&self) -> u32 {
        self.floor.unwrap_or(DICE_MIN)
    }

    /// Effective upper bound.
    pub fn ceiling(&self) -> u32 {
        self.ceiling.unwrap_or(DICE_MAX)
    }

    /// Returns true if `value` falls inside this row's range.
    pub fn contains(&self, value: u32) -> bool {
        self.floor() <= value && value <= self.ceiling()
    }
}

/// The two shapes an oracle node can take.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// A directly rollable table.
    Table(Vec<Row>),
    /// A node whose rollability derives from its descendants.
    Container {
        /// Nested oracles, resolved before sub-categories.
        oracles: Vec<RollableItem>,
        /// Nested sub-categories.
        categories: Vec<RollableItem>,
    },
}

/// A node of the oracle tree: either a table or a container of other nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawItem")]
pub struct RollableItem {
    /// Stable identifier.
    pub id: ItemId,
    /// Short name, used in source lines.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Alternate search strings.
    pub aliases: Vec<String>,
    /// Advisory usage policy.
    pub usage: Option<Usage>,
    /// Icon references.
    pub display: DisplayInfo,
    /// Table or container.
    pub kind: ItemKind,
}

impl RollableItem {
    /// Create a table item.
    pub fn table(id: impl Into<ItemId>, name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self::with_kind(id.into(), name.into(), ItemKind::Table(rows))
    }

    /// Create a container item.
    pub fn container(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        oracles: Vec<RollableItem>,
        categories: Vec<RollableItem>,
    ) -> Self {
        Self::with_kind(
            id.into(),
            name.into(),
            ItemKind::Container {
                oracles,
                categories,
            },
        )
    }

    fn with_kind(id: ItemId, name: String, kind: ItemKind) -> Self {
        Self {
            id,
            title: name.clone(),
            name,
            aliases: Vec::new(),
            usage: None,
            display: DisplayInfo::default(),
            kind,
        }
    }

    /// Set alternate search strings.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Set the usage policy.
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// The rows of a table item, `None` for containers.
    pub fn rows(&self) -> Option<&[Row]> {
        match &self.kind {
            ItemKind::Table(rows) => Some(rows),
            ItemKind::Container { .. } => None,
        }
    }

    /// Child nodes in resolution order: oracles first, then sub-categories.
    pub fn children(&self) -> impl Iterator<Item = &RollableItem> {
        let (oracles, categories): (&[RollableItem], &[RollableItem]) = match &self.kind {
            ItemKind::Table(_) => (&[], &[]),
            ItemKind::Container {
                oracles,
                categories,
            } => (oracles, categories),
        };
        oracles.iter().chain(categories.iter())
    }

    /// Returns true if this is a table with at least one row, or a container
    /// with at least one rollable descendant.
    pub fn is_rollable(&self) -> bool {
        match &self.kind {
            ItemKind::Table(rows) => !rows.is_empty(),
            ItemKind::Container { .. } => self.children().any(RollableItem::is_rollable),
        }
    }

    /// Returns true if the usage policy invites rolling again.
    pub fn allows_more_rolls(&self) -> bool {
        self.usage.is_some_and(|u| u.allows_more_rolls())
    }
}

/// On-disk shape of an oracle node, before the table/container split.
#[derive(Deserialize)]
struct RawItem {
    id: ItemId,
    name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    usage: Option<Usage>,
    #[serde(default)]
    display: DisplayInfo,
    #[serde(default)]
    table: Option<Vec<Row>>,
    #[serde(default)]
    oracles: Vec<RollableItem>,
    #[serde(default)]
    categories: Vec<RollableItem>,
}

impl TryFrom<RawItem> for RollableItem {
    type Error = ContentError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let has_children = !raw.oracles.is_empty() || !raw.categories.is_empty();
        let kind = match raw.table {
            Some(rows) if has_children => {
                return Err(ContentError::InvalidItem {
                    id: raw.id.0,
                    reason: format!(
                        "has a table of {} rows and {} child items",
                        rows.len(),
                        raw.oracles.len() + raw.categories.len()
                    ),
                });
            }
            Some(rows) => ItemKind::Table(rows),
            None => ItemKind::Container {
                oracles: raw.oracles,
                categories: raw.categories,
            },
        };

        Ok(Self {
            title: raw.title.unwrap_or_else(|| raw.name.clone()),
            id: raw.id,
            name: raw.name,
            aliases: raw.aliases,
            usage: raw.usage,
            display: raw.display,
            kind,
        })
    }
}
