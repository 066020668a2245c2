//! Oracle roll rendering.

use wf_core::RollableItem;
use wf_mechanics::RollResult;

use super::sanitize::sanitize_text;
use super::source_line;

/// The "roll up to N times" marker of an item, if it has one.
pub fn usage_suffix(item: &RollableItem) -> Option<String> {
    let max_rolls = item.usage.and_then(|u| u.max_rolls)?;
    Some(format!("**(🗘 1 - {max_rolls})**"))
}

fn with_usage(text: &str, item: &RollableItem) -> String {
    match usage_suffix(item) {
        Some(usage) => format!("{text} {usage}"),
        None => text.to_string(),
    }
}

/// Render a roll result as a message.
///
/// A table roll shows its result as a heading, followed by its chained
/// rolls as a list. A container roll lists every table result and ends
/// with the container's title.
pub fn format(result: &RollResult<'_>) -> String {
    let mut lines = Vec::new();
    match result {
        RollResult::Table { item, roll, row, .. } => {
            lines.push(format!("## 🔮 {}", sanitize_text(&row.result)));
            if let Some(summary) = &row.summary {
                lines.push(sanitize_text(summary));
            }
            lines.push(source_line(roll, &with_usage(&item.name, item)));
            lines.extend(result.nested().iter().map(|chained| format_as_list(chained, 0)));
        }
        RollResult::Container { item, nested } => {
            lines.extend(nested.iter().map(|entry| format_as_list(entry, 0)));
            lines.push(format!("-# ◇ {}", with_usage(&item.title, item)));
        }
    }
    lines.join("\n")
}

/// Render a roll result as a markdown list item, nested `indent` levels
/// deep. Chained rolls and container entries are indented one more level.
pub fn format_as_list(result: &RollResult<'_>, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let mut lines = Vec::new();
    match result {
        RollResult::Table { item, roll, row, .. } => {
            lines.push(format!("{pad}- **{}**: {}", item.title, sanitize_text(&row.result)));
            if let Some(summary) = &row.summary {
                lines.push(format!("{pad}  -# {}", sanitize_text(summary)));
            }
            lines.push(format!("{pad}  {}", source_line(roll, &with_usage(&item.name, item))));
        }
        RollResult::Container { item, .. } => {
            lines.push(format!("{pad}- {}", with_usage(&item.title, item)));
        }
    }
    lines.extend(result.nested().iter().map(|n| format_as_list(n, indent + 1)));
    lines.join("\n")
}
