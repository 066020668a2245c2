//! Validation of the loaded content library.
//!
//! The resolver trusts the content: it takes the first matching row and
//! silently skips chained ids it cannot find. This module reports the
//! places where that trust is misplaced, so content authors can fix
//! tables before players hit them.

use std::collections::HashSet;

use crate::item::{DICE_MAX, DICE_MIN, ItemKind, RollableItem, Row};
use crate::library::Library;

/// A warning or error found during content validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// The identifier of the item where the issue was found.
    pub entity: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.entity, self.message)
    }
}

/// Validate the whole library.
///
/// Errors are conditions that make a roll fail or silently lose a
/// result; warnings are conditions the resolver tolerates.
pub fn validate_library(library: &Library) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for root in library.oracles() {
        validate_item(root, library, &mut seen, &mut issues);
    }

    for mv in library.move_categories().iter().flat_map(|c| c.moves.iter()) {
        for oracle in &mv.oracles {
            if library.find_item(oracle.as_str()).is_none() {
                issues.push(ValidationIssue {
                    entity: mv.id.to_string(),
                    message: format!("references unknown oracle '{oracle}'"),
                    is_error: false,
                });
            }
        }
    }

    for truth in library.truths() {
        for option in truth.options.iter().filter(|o| o.has_subtable()) {
            validate_rows(option.id.as_str(), &option.subtable, &mut issues);
        }
    }

    issues
}

fn validate_item(
    item: &RollableItem,
    library: &Library,
    seen: &mut HashSet<String>,
    issues: &mut Vec<ValidationIssue>,
) {
    if !seen.insert(item.id.to_string()) {
        issues.push(ValidationIssue {
            entity: item.id.to_string(),
            message: "duplicate id".to_string(),
            is_error: true,
        });
    }

    match &item.kind {
        ItemKind::Table(rows) => {
            if rows.is_empty() {
                issues.push(ValidationIssue {
                    entity: item.id.to_string(),
                    message: "table has no rows".to_string(),
                    is_error: false,
                });
                return;
            }
            validate_rows(item.id.as_str(), rows, issues);
            for chained in rows.iter().filter_map(|r| r.oracle_rolls.as_ref()).flatten() {
                if library.find_item(chained.as_str()).is_none() {
                    issues.push(ValidationIssue {
                        entity: item.id.to_string(),
                        message: format!("row chains unknown oracle '{chained}'"),
                        is_error: true,
                    });
                }
            }
        }
        ItemKind::Container { .. } => {
            if !item.is_rollable() {
                issues.push(ValidationIssue {
                    entity: item.id.to_string(),
                    message: "container has nothing to roll".to_string(),
                    is_error: false,
                });
            }
            for child in item.children() {
                validate_item(child, library, seen, issues);
            }
        }
    }
}

/// Check that rows partition 1..=100.
fn validate_rows(entity: &str, rows: &[Row], issues: &mut Vec<ValidationIssue>) {
    for (index, row) in rows.iter().enumerate() {
        if row.floor() > row.ceiling() {
            issues.push(ValidationIssue {
                entity: entity.to_string(),
                message: format!(
                    "row {index} has floor ({}) > ceiling ({})",
                    row.floor(),
                    row.ceiling()
                ),
                is_error: true,
            });
        }
    }

    let mut gaps = Vec::new();
    let mut overlaps = Vec::new();
    for value in DICE_MIN..=DICE_MAX {
        match rows.iter().filter(|r| r.contains(value)).count() {
            0 => gaps.push(value),
            1 => {}
            _ => overlaps.push(value),
        }
    }

    if !gaps.is_empty() {
        issues.push(ValidationIssue {
            entity: entity.to_string(),
            message: format!("no row covers {}", compress(&gaps)),
            is_error: true,
        });
    }
    if !overlaps.is_empty() {
        issues.push(ValidationIssue {
            entity: entity.to_string(),
            message: format!("rows overlap on {}", compress(&overlaps)),
            is_error: false,
        });
    }
}

/// Render sorted values as ranges: `[1, 2, 3, 7]` becomes `1-3, 7`.
fn compress(values: &[u32]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut iter = values.iter().copied().peekable();
    while let Some(start) = iter.next() {
        let mut end = start;
        while iter.peek() == Some(&(end + 1)) {
            end += 1;
            iter.next();
        }
        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{start}-{end}"));
        }
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{Move, MoveCategory};

    fn library(oracles: Vec<RollableItem>) -> Library {
        Library::new(oracles, vec![], vec![])
    }

    fn full_table(id: &str) -> RollableItem {
        RollableItem::table(id, id, vec![Row::new(1, 50, "A"), Row::new(51, 100, "B")])
    }

    #[test]
    fn well_formed_library_is_clean() {
        let lib = library(vec![RollableItem::container(
            "Root",
            "Root",
            vec![full_table("A"), full_table("B")],
            vec![],
        )]);
        assert!(lib.validate().is_empty());
    }

    #[test]
    fn gap_is_error() {
        let lib = library(vec![RollableItem::table(
            "T",
            "T",
            vec![Row::new(1, 40, "A"), Row::new(51, 100, "B")],
        )]);
        let issues = lib.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error);
        assert_eq!(issues[0].message, "no row covers 41-50");
    }

    #[test]
    fn overlap_is_warning() {
        let lib = library(vec![RollableItem::table(
            "T",
            "T",
            vec![Row::new(1, 60, "A"), Row::new(51, 100, "B")],
        )]);
        let issues = lib.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error);
        assert_eq!(issues[0].message, "rows overlap on 51-60");
    }

    #[test]
    fn inverted_row_is_error() {
        let lib = library(vec![RollableItem::table(
            "T",
            "T",
            vec![Row::new(1, 100, "A"), Row::new(60, 50, "B")],
        )]);
        let issues = lib.validate();
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message == "row 1 has floor (60) > ceiling (50)")
        );
    }

    #[test]
    fn dangling_chain_is_error() {
        let lib = library(vec![RollableItem::table(
            "T",
            "T",
            vec![Row::new(1, 100, "A").with_chain(["Missing"])],
        )]);
        let issues = lib.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error);
        assert_eq!(issues[0].to_string(), "error: T: row chains unknown oracle 'Missing'");
    }

    #[test]
    fn duplicate_id_is_error() {
        let lib = library(vec![full_table("Same"), full_table("Same")]);
        let issues = lib.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "duplicate id");
    }

    #[test]
    fn empty_container_is_warning() {
        let lib = library(vec![RollableItem::container("Empty", "Empty", vec![], vec![])]);
        let issues = lib.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error);
        assert_eq!(issues[0].to_string(), "warning: Empty: container has nothing to roll");
    }

    #[test]
    fn move_with_unknown_oracle_warns() {
        let mut mv = Move::new("Moves/M", "M", "");
        mv.oracles.push("Nowhere".into());
        let lib = Library::new(
            vec![full_table("A")],
            vec![MoveCategory {
                name: "C".to_string(),
                moves: vec![mv],
            }],
            vec![],
        );
        let issues = lib.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].entity, "Moves/M");
        assert!(!issues[0].is_error);
    }

    #[test]
    fn compress_ranges() {
        assert_eq!(compress(&[1, 2, 3, 7]), "1-3, 7");
        assert_eq!(compress(&[5]), "5");
        assert_eq!(compress(&[]), "");
    }
}
