//! Removal of content markup that does not render in chat.

use std::sync::LazyLock;

use regex::Regex;

/// `[Label](Ruleset/Path/To/Item)`, optionally with a `⏵` marker.
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?:⏵)?([^\]]+)\]\([^/)]+/([^)]+)\)").expect("link pattern must compile")
});

/// A markdown table separator row such as `---|:---:`.
static TABLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\-|:]+$").expect("separator pattern must compile"));

/// Replace cross-references to other content items with their label in
/// italics.
pub fn remove_links(text: &str) -> String {
    LINK.replace_all(text, "*${1}*").into_owned()
}

/// Drop markdown tables and blank lines.
///
/// A table starts at a line containing `|` that is followed by a
/// separator row, and runs until the first line without `|`.
pub fn remove_tables(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut kept = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.is_empty() {
            i += 1;
            continue;
        }
        let starts_table = line.contains('|')
            && lines
                .get(i + 1)
                .is_some_and(|next| next.contains('|') && TABLE_SEPARATOR.is_match(next));
        if starts_table {
            i += 2;
            while i < lines.len() && !lines[i].is_empty() && lines[i].contains('|') {
                i += 1;
            }
            continue;
        }
        kept.push(line);
        i += 1;
    }
    kept.join("\n")
}

/// Both passes, links first.
pub fn sanitize_text(text: &str) -> String {
    remove_tables(&remove_links(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_becomes_italic_label() {
        assert_eq!(remove_links("[Action](Starforged/Oracles/Action)"), "*Action*");
        assert_eq!(
            remove_links("Roll [⏵Theme](Starforged/Oracles/Core/Theme) twice"),
            "Roll *Theme* twice"
        );
    }

    #[test]
    fn several_links() {
        assert_eq!(
            remove_links("[A](X/a) and [B](X/b/c)"),
            "*A* and *B*"
        );
    }

    #[test]
    fn plain_brackets_are_kept() {
        assert_eq!(remove_links("[note] (aside)"), "[note] (aside)");
        assert_eq!(remove_links("[Label](nopath)"), "[Label](nopath)");
    }

    #[test]
    fn table_is_removed() {
        let text = "Before\nRoll | Result\n---|---\n1-50 | A\n51-100 | B\nAfter";
        assert_eq!(remove_tables(text), "Before\nAfter");
    }

    #[test]
    fn pipe_without_separator_is_kept() {
        let text = "a | b\nnot a separator";
        assert_eq!(remove_tables(text), text);
    }

    #[test]
    fn blank_lines_are_dropped() {
        assert_eq!(remove_tables("one\n\ntwo"), "one\ntwo");
    }

    #[test]
    fn sanitize_runs_both() {
        let text = "See [Pay the Price](Starforged/Moves/Fate/Pay_the_Price)\nA | B\n:-|-:\n1 | 2";
        assert_eq!(sanitize_text(text), "See *Pay the Price*");
    }
}
