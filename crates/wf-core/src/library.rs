use std::path::Path;

use serde::Deserialize;

use crate::error::ContentResult;
use crate::item::RollableItem;
use crate::moves::{Move, MoveCategory};
use crate::search::{SearchEntry, SearchQuery, collect_move_entries, collect_searchable};
use crate::truth::Truth;
use crate::validate::{ValidationIssue, validate_library};

/// On-disk shape of the content file.
#[derive(Deserialize)]
struct RawLibrary {
    #[serde(default)]
    oracles: Vec<RollableItem>,
    #[serde(default)]
    moves: Vec<MoveCategory>,
    #[serde(default)]
    truths: Vec<Truth>,
}

/// The read-only content library: oracle trees, moves, and truths.
///
/// Built once at startup and shared by reference afterwards. The
/// autocomplete indexes are computed on construction.
#[derive(Debug, Clone, Default)]
pub struct Library {
    oracles: Vec<RollableItem>,
    moves: Vec<MoveCategory>,
    truths: Vec<Truth>,

    // Indexes
    oracle_index: Vec<SearchEntry>,
    move_index: Vec<SearchEntry>,
}

impl Library {
    /// Build a library from already parsed content.
    pub fn new(oracles: Vec<RollableItem>, moves: Vec<MoveCategory>, truths: Vec<Truth>) -> Self {
        let oracle_index = collect_searchable(&oracles);
        let move_index = collect_move_entries(&moves);
        Self {
            oracles,
            moves,
            truths,
            oracle_index,
            move_index,
        }
    }

    /// Parse a library from a JSON document.
    pub fn from_json_str(json: &str) -> ContentResult<Self> {
        let raw: RawLibrary = serde_json::from_str(json)?;
        Ok(Self::new(raw.oracles, raw.moves, raw.truths))
    }

    /// Read and parse a library from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ContentResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Top-level oracle categories.
    pub fn oracles(&self) -> &[RollableItem] {
        &self.oracles
    }

    /// Move categories.
    pub fn move_categories(&self) -> &[MoveCategory] {
        &self.moves
    }

    /// Setting truths in display order.
    pub fn truths(&self) -> &[Truth] {
        &self.truths
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Find an oracle node anywhere in the tree. Depth-first: a node is
    /// checked before its oracles, which are checked before its
    /// sub-categories. The first match wins.
    pub fn find_item(&self, id: &str) -> Option<&RollableItem> {
        self.oracles.iter().find_map(|root| find_in_tree(root, id))
    }

    /// Find a move by identifier.
    pub fn find_move(&self, id: &str) -> Option<&Move> {
        self.moves
            .iter()
            .flat_map(|c| c.moves.iter())
            .find(|m| m.id == *id)
    }

    /// Find a setting truth by identifier.
    pub fn find_truth(&self, id: &str) -> Option<&Truth> {
        self.truths.iter().find(|t| t.id == *id)
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// All autocomplete entries for rollable oracle nodes.
    pub fn searchable(&self) -> &[SearchEntry] {
        &self.oracle_index
    }

    /// All autocomplete entries for moves.
    pub fn move_entries(&self) -> &[SearchEntry] {
        &self.move_index
    }

    /// Start a query over the oracle autocomplete entries.
    pub fn search_oracles(&self) -> SearchQuery<'_> {
        SearchQuery::new(&self.oracle_index)
    }

    /// Start a query over the move autocomplete entries.
    pub fn search_moves(&self) -> SearchQuery<'_> {
        SearchQuery::new(&self.move_index)
    }

    /// Check the content for malformed tables and dangling references.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_library(self)
    }
}

fn find_in_tree<'a>(item: &'a RollableItem, id: &str) -> Option<&'a RollableItem> {
    if item.id == *id {
        return Some(item);
    }
    item.children().find_map(|child| find_in_tree(child, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = r#"{
        "oracles": [
            {
                "id": "Oracles/Core",
                "name": "Core",
                "oracles": [
                    {
                        "id": "Oracles/Core/Action",
                        "name": "Action",
                        "table": [{"floor": 1, "ceiling": 100, "result": "Scheme"}]
                    },
                    {
                        "id": "Oracles/Core/Theme",
                        "name": "Theme",
                        "table": [{"floor": 1, "ceiling": 100, "result": "Risk"}]
                    }
                ],
                "categories": [
                    {
                        "id": "Oracles/Core/Deep",
                        "name": "Deep",
                        "oracles": [
                            {
                                "id": "Oracles/Core/Deep/Leaf",
                                "name": "Leaf",
                                "table": [{"result": "Bottom"}]
                            }
                        ]
                    }
                ]
            }
        ],
        "moves": [
            {
                "name": "Adventure",
                "moves": [{"id": "Moves/Adventure/Face_Danger", "name": "Face Danger"}]
            }
        ],
        "truths": [
            {"id": "Truths/Cataclysm", "title": "Cataclysm", "options": []}
        ]
    }"#;

    #[test]
    fn load_from_json() {
        let lib = Library::from_json_str(CONTENT).unwrap();
        assert_eq!(lib.oracles().len(), 1);
        assert_eq!(lib.move_categories().len(), 1);
        assert_eq!(lib.truths().len(), 1);
    }

    #[test]
    fn find_item_at_any_depth() {
        let lib = Library::from_json_str(CONTENT).unwrap();
        assert_eq!(lib.find_item("Oracles/Core").unwrap().name, "Core");
        assert_eq!(lib.find_item("Oracles/Core/Theme").unwrap().name, "Theme");
        assert_eq!(lib.find_item("Oracles/Core/Deep/Leaf").unwrap().name, "Leaf");
    }

    #[test]
    fn find_item_missing_is_none() {
        let lib = Library::from_json_str(CONTENT).unwrap();
        assert!(lib.find_item("nonexistent").is_none());
    }

    #[test]
    fn find_item_first_match_wins() {
        let first = RollableItem::table("Dup", "First", vec![]);
        let second = RollableItem::table("Dup", "Second", vec![]);
        let lib = Library::new(
            vec![RollableItem::container("Root", "Root", vec![first], vec![
                RollableItem::container("Sub", "Sub", vec![second], vec![]),
            ])],
            vec![],
            vec![],
        );
        assert_eq!(lib.find_item("Dup").unwrap().name, "First");
    }

    #[test]
    fn find_move_and_truth() {
        let lib = Library::from_json_str(CONTENT).unwrap();
        assert_eq!(
            lib.find_move("Moves/Adventure/Face_Danger").unwrap().name,
            "Face Danger"
        );
        assert!(lib.find_move("Moves/Nope").is_none());
        assert_eq!(lib.find_truth("Truths/Cataclysm").unwrap().title, "Cataclysm");
        assert!(lib.find_truth("Truths/Nope").is_none());
    }

    #[test]
    fn indexes_are_built_on_load() {
        let lib = Library::from_json_str(CONTENT).unwrap();
        assert!(lib.searchable().iter().any(|e| e.id == *"Oracles/Core/Deep/Leaf"));
        assert_eq!(lib.move_entries().len(), 1);
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = Library::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, crate::ContentError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Library::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, crate::ContentError::Io(_)));
    }
}
