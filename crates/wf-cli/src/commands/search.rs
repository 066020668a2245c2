use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use wf_interact::{AppConfig, Choice};

pub fn oracles(content: &Path, config: AppConfig, query: &str) -> Result<(), String> {
    let app = super::load_app(content, config)?;
    print_choices(&app.oracle_autocomplete(query), query);
    Ok(())
}

pub fn moves(content: &Path, config: AppConfig, query: &str) -> Result<(), String> {
    let app = super::load_app(content, config)?;
    print_choices(&app.move_autocomplete(query), query);
    Ok(())
}

pub(super) fn print_choices(choices: &[Choice], query: &str) {
    if choices.is_empty() {
        println!("  No results for \"{query}\".");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Id"]);
    for choice in choices {
        table.add_row(vec![&choice.label, &choice.value]);
    }

    println!("{table}");
    println!();
    println!("  {} results", choices.len());
}
