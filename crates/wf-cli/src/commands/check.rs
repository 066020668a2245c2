use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(content: &Path) -> Result<(), String> {
    let library = super::load_library(content)?;
    let issues = library.validate();
    let summary = format!(
        "{} oracles, {} moves, {} truths",
        library.searchable().iter().filter(|e| !e.is_alias).count(),
        library.move_entries().len(),
        library.truths().len()
    );

    if issues.is_empty() {
        println!("  All checks passed for '{}'.", content.display());
        println!("  {summary}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Level", "Item", "Issue"]);
    for issue in &issues {
        let level = if issue.is_error {
            "error".red().to_string()
        } else {
            "warning".yellow().to_string()
        };
        table.add_row(vec![level, issue.entity.clone(), issue.message.clone()]);
    }
    println!("{table}");
    println!();

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;
    println!(
        "  {} error{}, {} warning{}",
        errors,
        if errors == 1 { "" } else { "s" },
        warnings,
        if warnings == 1 { "" } else { "s" },
    );
    println!("  {summary}");

    if errors > 0 {
        Err("content check failed with errors".into())
    } else {
        Ok(())
    }
}
