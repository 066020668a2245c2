//! Setting truth rendering.

use wf_core::{Row, Truth, TruthOption};

use super::sanitize::remove_links;
use super::source_line;

/// Shown until an option is chosen.
pub const PLACEHOLDER: &str = "*No Option selected yet.*";

/// What a truth currently says.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TruthContent<'a> {
    /// Nothing chosen yet.
    Placeholder,
    /// Free text entered by the user.
    Custom(&'a str),
    /// A predefined option, with its subtable roll if it has a subtable.
    Option {
        /// The chosen option.
        option: &'a TruthOption,
        /// The subtable value and row, if one was rolled.
        roll: Option<(u32, &'a Row)>,
    },
}

/// Render a truth with its current content.
pub fn format_truth(truth: &Truth, content: &TruthContent<'_>) -> String {
    let mut lines = vec![format!("## {}", truth.title)];
    match content {
        TruthContent::Placeholder => lines.push(PLACEHOLDER.to_string()),
        TruthContent::Custom(text) => lines.push((*text).to_string()),
        TruthContent::Option { option, roll } => {
            lines.push(remove_links(&option.description));
            if let Some((value, row)) = roll {
                lines.push(format!("- **{}**", remove_links(&row.result)));
                if let Some(summary) = &row.summary {
                    lines.push(remove_links(summary));
                }
                lines.push(format!("  {}", source_line(value, &truth.title)));
            }
        }
    }
    lines.push(format!("-# > {}", truth.character));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use wf_core::ItemId;

    fn cataclysm() -> Truth {
        Truth {
            id: ItemId::from("Truths/Cataclysm"),
            title: "Cataclysm".to_string(),
            character: "We called it the Sundering.".to_string(),
            icon: None,
            options: vec![TruthOption {
                id: ItemId::from("Truths/Cataclysm/1-33"),
                floor: Some(1),
                ceiling: Some(33),
                title: None,
                description: "The sun plague extinguished the stars.".to_string(),
                subtable: vec![
                    Row::new(1, 50, "A rogue AI").with_summary("It still hunts us."),
                    Row::new(51, 100, "Nobody knows"),
                ],
            }],
        }
    }

    #[test]
    fn placeholder() {
        assert_snapshot!(format_truth(&cataclysm(), &TruthContent::Placeholder), @r"
## Cataclysm
*No Option selected yet.*
-# > We called it the Sundering.
");
    }

    #[test]
    fn custom_text() {
        let text = format_truth(&cataclysm(), &TruthContent::Custom("Our own story."));
        assert_eq!(text, "## Cataclysm\nOur own story.\n-# > We called it the Sundering.");
    }

    #[test]
    fn option_with_subtable_roll() {
        let truth = cataclysm();
        let option = &truth.options[0];
        let content = TruthContent::Option {
            option,
            roll: Some((12, &option.subtable[0])),
        };
        assert_snapshot!(format_truth(&truth, &content), @r"
## Cataclysm
The sun plague extinguished the stars.
- **A rogue AI**
It still hunts us.
  -# `→ 12` ◇ Cataclysm
-# > We called it the Sundering.
");
    }
}
