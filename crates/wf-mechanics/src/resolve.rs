//! Oracle roll resolution.
//!
//! Turns a node of the oracle tree into a [`RollResult`] tree. Table
//! nodes draw a percentile roll and look up the matching row; container
//! nodes resolve every rollable child. Rows may chain further rolls,
//! which are resolved eagerly up to a configurable depth.

use tracing::{debug, warn};
use wf_core::item::{DICE_MAX, DICE_MIN};
use wf_core::{ItemKind, Library, RollableItem, Row};

use crate::dice::RandomSource;
use crate::error::{MechError, MechResult};
use crate::rows;

/// Default limit for nested chained rolls.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 8;

/// The outcome of resolving one oracle node.
#[derive(Debug, Clone, PartialEq)]
pub enum RollResult<'a> {
    /// A roll on a table.
    Table {
        /// The table that was rolled.
        item: &'a RollableItem,
        /// The value rolled, or the row's floor for row-specific rolls.
        roll: u32,
        /// Index of the matched row.
        row_index: usize,
        /// The matched row.
        row: &'a Row,
        /// Results of the row's chained rolls; `None` if it chains nothing.
        nested: Option<Vec<RollResult<'a>>>,
    },
    /// The combined rolls of a container's children.
    Container {
        /// The container that was rolled.
        item: &'a RollableItem,
        /// One result per rollable descendant table, flattened.
        nested: Vec<RollResult<'a>>,
    },
}

impl<'a> RollResult<'a> {
    /// The node that was resolved.
    pub fn item(&self) -> &'a RollableItem {
        match self {
            Self::Table { item, .. } | Self::Container { item, .. } => *item,
        }
    }

    /// The value rolled; containers have none.
    pub fn roll(&self) -> Option<u32> {
        match self {
            Self::Table { roll, .. } => Some(*roll),
            Self::Container { .. } => None,
        }
    }

    /// The matched row; containers have none.
    pub fn row(&self) -> Option<&'a Row> {
        match self {
            Self::Table { row, .. } => Some(*row),
            Self::Container { .. } => None,
        }
    }

    /// Nested results: chained rolls for tables, children for containers.
    pub fn nested(&self) -> &[RollResult<'a>] {
        match self {
            Self::Table { nested, .. } => nested.as_deref().unwrap_or_default(),
            Self::Container { nested, .. } => nested,
        }
    }

    /// Returns true if resolution produced no table roll at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Container { nested, .. } if nested.is_empty())
    }
}

/// Resolves oracle nodes against a content library.
///
/// The library is only used to look up chained oracle ids. All
/// randomness comes from the `RandomSource` passed to each call.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    library: &'a Library,
    max_depth: usize,
}

impl<'a> Resolver<'a> {
    /// Create a resolver with the default chain depth limit.
    pub fn new(library: &'a Library) -> Self {
        Self {
            library,
            max_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }

    /// Set the maximum depth of chained rolls.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Roll on an item: a single table roll, or every rollable child of a
    /// container.
    ///
    /// Callers should check [`RollableItem::is_rollable`] first; an empty
    /// container resolves to a result with no nested entries.
    pub fn resolve(
        &self,
        item: &'a RollableItem,
        rng: &mut dyn RandomSource,
    ) -> MechResult<RollResult<'a>> {
        self.resolve_at_depth(item, rng, 0)
    }

    /// Resolve a table at a specific row, without drawing the top-level
    /// roll. Chained rolls on that row are still drawn from `rng`.
    pub fn resolve_at_row(
        &self,
        item: &'a RollableItem,
        row_index: usize,
        rng: &mut dyn RandomSource,
    ) -> MechResult<RollResult<'a>> {
        let rows = match item.rows() {
            Some(rows) if !rows.is_empty() => rows,
            _ => return Err(MechError::NotATable(item.id.to_string())),
        };
        let row = rows.get(row_index).ok_or_else(|| MechError::RowOutOfBounds {
            id: item.id.to_string(),
            index: row_index,
            len: rows.len(),
        })?;

        debug!(item = %item.id, row_index, "resolving at row");
        let nested = self.resolve_chain(item, row, rng, 0)?;
        Ok(RollResult::Table {
            item,
            roll: row.floor(),
            row_index,
            row,
            nested,
        })
    }

    fn resolve_at_depth(
        &self,
        item: &'a RollableItem,
        rng: &mut dyn RandomSource,
        depth: usize,
    ) -> MechResult<RollResult<'a>> {
        match &item.kind {
            ItemKind::Table(rows) => {
                let roll = rng.uniform_int(DICE_MIN, DICE_MAX);
                let Some(row_index) = rows::locate(rows, roll) else {
                    debug!(item = %item.id, roll, "roll matches no row");
                    return Err(MechError::NoMatchingRow {
                        id: item.id.to_string(),
                        roll,
                    });
                };
                let row = &rows[row_index];
                debug!(item = %item.id, roll, row_index, "rolled table");
                let nested = self.resolve_chain(item, row, rng, depth)?;
                Ok(RollResult::Table {
                    item,
                    roll,
                    row_index,
                    row,
                    nested,
                })
            }
            ItemKind::Container { .. } => {
                let mut nested = Vec::new();
                for child in item.children().filter(|c| c.is_rollable()) {
                    splice(&mut nested, self.resolve_at_depth(child, rng, depth)?);
                }
                Ok(RollResult::Container { item, nested })
            }
        }
    }

    fn resolve_chain(
        &self,
        item: &'a RollableItem,
        row: &'a Row,
        rng: &mut dyn RandomSource,
        depth: usize,
    ) -> MechResult<Option<Vec<RollResult<'a>>>> {
        let Some(ids) = row.oracle_rolls.as_deref() else {
            return Ok(None);
        };
        if ids.is_empty() {
            return Ok(None);
        }
        if depth >= self.max_depth {
            debug!(item = %item.id, max_depth = self.max_depth, "chained rolls too deep");
            return Err(MechError::ChainTooDeep {
                id: item.id.to_string(),
                max_depth: self.max_depth,
            });
        }

        let mut nested = Vec::new();
        for id in ids {
            match self.library.find_item(id.as_str()) {
                Some(chained) => {
                    splice(&mut nested, self.resolve_at_depth(chained, rng, depth + 1)?);
                }
                None => warn!(item = %item.id, chained = %id, "chained oracle not found"),
            }
        }
        Ok((!nested.is_empty()).then_some(nested))
    }
}

/// Append a result, splicing a container's entries in place of the container.
fn splice<'a>(into: &mut Vec<RollResult<'a>>, result: RollResult<'a>) {
    match result {
        RollResult::Container { nested, .. } => into.extend(nested),
        table => into.push(table),
    }
}
