use crate::item::{ItemId, RollableItem};
use crate::moves::MoveCategory;

/// Separator between path segments in autocomplete labels.
pub const PATH_SEPARATOR: &str = "／";

/// One flattened autocomplete entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    /// The item this entry resolves to.
    pub id: ItemId,
    /// The item's title, or one of its aliases.
    pub title: String,
    /// Titles of the item's ancestors, outermost first.
    pub path: Vec<String>,
    /// Whether `title` is an alias rather than the item's own title.
    pub is_alias: bool,
}

impl SearchEntry {
    /// The full label: path and title joined with `／`.
    pub fn label(&self) -> String {
        let mut label = String::new();
        for segment in &self.path {
            label.push_str(segment);
            label.push_str(PATH_SEPARATOR);
        }
        label.push_str(&self.title);
        label
    }

    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.path.iter().any(|p| p.to_lowercase().contains(needle))
            || self.label().to_lowercase().contains(needle)
    }
}

/// Flatten oracle trees into autocomplete entries.
///
/// Every rollable node gets an entry (containers included), plus one
/// extra entry per alias sharing the same id.
pub fn collect_searchable(roots: &[RollableItem]) -> Vec<SearchEntry> {
    let mut entries = Vec::new();
    for root in roots {
        collect_into(root, &[], &mut entries);
    }
    entries
}

fn collect_into(item: &RollableItem, path: &[String], entries: &mut Vec<SearchEntry>) {
    if item.is_rollable() {
        entries.push(SearchEntry {
            id: item.id.clone(),
            title: item.title.clone(),
            path: path.to_vec(),
            is_alias: false,
        });
        for alias in &item.aliases {
            entries.push(SearchEntry {
                id: item.id.clone(),
                title: alias.clone(),
                path: path.to_vec(),
                is_alias: true,
            });
        }
    }

    let mut child_path = path.to_vec();
    child_path.push(item.title.clone());
    for child in item.children() {
        collect_into(child, &child_path, entries);
    }
}

/// Flatten move categories into autocomplete entries with the category
/// name as the only path segment.
pub fn collect_move_entries(categories: &[MoveCategory]) -> Vec<SearchEntry> {
    categories
        .iter()
        .flat_map(|category| {
            category.moves.iter().map(|mv| SearchEntry {
                id: mv.id.clone(),
                title: mv.display_title().to_string(),
                path: vec![category.name.clone()],
                is_alias: false,
            })
        })
        .collect()
}

/// A builder for filtering autocomplete entries.
pub struct SearchQuery<'a> {
    entries: &'a [SearchEntry],
    text: Option<String>,
    limit: Option<usize>,
    offset: usize,
}

impl<'a> SearchQuery<'a> {
    /// Start a query over the given entries.
    pub fn new(entries: &'a [SearchEntry]) -> Self {
        Self {
            entries,
            text: None,
            limit: None,
            offset: 0,
        }
    }

    /// Filter to entries whose title or path contains the text (case-insensitive).
    pub fn text(mut self, s: impl Into<String>) -> Self {
        let s = s.into().trim().to_lowercase();
        self.text = if s.is_empty() { None } else { Some(s) };
        self
    }

    /// Limit the number of results.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Skip the first N results.
    pub fn offset(mut self, n: usize) -> Self {
        self.offset = n;
        self
    }

    /// Execute the query and return matching entries in index order.
    pub fn execute(self) -> Vec<&'a SearchEntry> {
        let matching = self
            .entries
            .iter()
            .filter(|e| self.matches(e))
            .skip(self.offset);
        match self.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }

    /// Count matching entries without collecting them.
    pub fn count(self) -> usize {
        self.entries.iter().filter(|e| self.matches(e)).count()
    }

    fn matches(&self, entry: &SearchEntry) -> bool {
        match &self.text {
            Some(needle) => entry.matches(needle),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Row;
    use crate::moves::Move;

    fn tree() -> Vec<RollableItem> {
        let action = RollableItem::table("Core/Action", "Action", vec![Row::new(1, 100, "X")])
            .with_aliases(["Verb"]);
        let theme = RollableItem::table("Core/Theme", "Theme", vec![Row::new(1, 100, "Y")]);
        let empty = RollableItem::table("Core/Empty", "Empty", vec![]);
        let planet = RollableItem::table("Space/Planet/Type", "Type", vec![Row::new(1, 100, "Z")]);
        vec![
            RollableItem::container("Core", "Core", vec![action, theme, empty], vec![]),
            RollableItem::container(
                "Space",
                "Space",
                vec![],
                vec![RollableItem::container("Space/Planet", "Planet", vec![planet], vec![])],
            ),
        ]
    }

    #[test]
    fn collect_includes_rollable_nodes_only() {
        let entries = collect_searchable(&tree());
        assert!(entries.iter().any(|e| e.id == *"Core"));
        assert!(entries.iter().any(|e| e.id == *"Core/Action" && !e.is_alias));
        assert!(!entries.iter().any(|e| e.id == *"Core/Empty"));
    }

    #[test]
    fn path_excludes_the_item_itself() {
        let entries = collect_searchable(&tree());
        let root = entries.iter().find(|e| e.id == *"Core").unwrap();
        assert!(root.path.is_empty());
        let planet = entries.iter().find(|e| e.id == *"Space/Planet/Type").unwrap();
        assert_eq!(planet.path, vec!["Space", "Planet"]);
        assert_eq!(planet.label(), "Space／Planet／Type");
    }

    #[test]
    fn aliases_become_separate_entries() {
        let entries = collect_searchable(&tree());
        let alias = entries.iter().find(|e| e.is_alias).unwrap();
        assert_eq!(alias.id, ItemId::from("Core/Action"));
        assert_eq!(alias.title, "Verb");
        assert_eq!(alias.path, vec!["Core"]);
    }

    #[test]
    fn query_matches_title_path_and_alias() {
        let entries = collect_searchable(&tree());
        let by_title = SearchQuery::new(&entries).text("THEME").execute();
        assert_eq!(by_title.len(), 1);

        let by_path = SearchQuery::new(&entries).text("planet").execute();
        assert!(by_path.iter().any(|e| e.id == *"Space/Planet/Type"));

        let by_alias = SearchQuery::new(&entries).text("verb").execute();
        assert_eq!(by_alias.len(), 1);
        assert_eq!(by_alias[0].id, ItemId::from("Core/Action"));
    }

    #[test]
    fn empty_text_matches_everything() {
        let entries = collect_searchable(&tree());
        assert_eq!(SearchQuery::new(&entries).text("  ").count(), entries.len());
    }

    #[test]
    fn query_with_limit_and_offset() {
        let entries = collect_searchable(&tree());
        let all = SearchQuery::new(&entries).execute();
        assert_eq!(all.len(), entries.len());

        let limited = SearchQuery::new(&entries).limit(2).execute();
        assert_eq!(limited.len(), 2);

        let offset = SearchQuery::new(&entries).offset(1).limit(1).execute();
        assert_eq!(offset.len(), 1);
        assert_eq!(offset[0], &entries[1]);
    }

    #[test]
    fn move_entries_use_category_path() {
        let categories = vec![MoveCategory {
            name: "Adventure".to_string(),
            moves: vec![Move::new("Moves/Adventure/Face_Danger", "Face Danger", "")],
        }];
        let entries = collect_move_entries(&categories);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label(), "Adventure／Face Danger");
    }
}
