pub mod check;
pub mod moves;
pub mod oracle;
pub mod play;
pub mod press;
pub mod progress;
pub mod search;
pub mod truths;

use std::path::Path;

use colored::Colorize;
use tracing::info;
use wf_core::Library;
use wf_interact::{App, AppConfig, Button, Modal, ModalInput, Reply, ReplyMode};

/// Load the content library.
fn load_library(path: &Path) -> Result<Library, String> {
    let library =
        Library::from_path(path).map_err(|e| format!("failed to load '{}': {e}", path.display()))?;
    info!(
        path = %path.display(),
        oracles = library.searchable().len(),
        moves = library.move_entries().len(),
        truths = library.truths().len(),
        "content loaded"
    );
    Ok(library)
}

/// Load the content library and start an app over it.
fn load_app(path: &Path, config: AppConfig) -> Result<App, String> {
    Ok(App::new(load_library(path)?, config))
}

/// Print a one-shot reply. Error replies become the command's error.
fn show(reply: &Reply) -> Result<(), String> {
    if reply.ephemeral {
        return Err(reply.content.clone());
    }
    print_reply(reply, 1);
    Ok(())
}

/// Print a reply with its controls, numbering buttons from `first`.
fn print_reply(reply: &Reply, first: usize) {
    if reply.ephemeral {
        println!("  {}", reply.content.yellow());
        println!();
        return;
    }

    match reply.mode {
        ReplyMode::New => {}
        ReplyMode::Update => println!("  {}", "(updated)".dimmed()),
        ReplyMode::FollowUp => println!("  {}", "(follow-up)".dimmed()),
    }
    for line in reply.content.lines() {
        println!("  {line}");
    }
    if let Some(thumbnail) = &reply.thumbnail {
        println!("  {}", format!("image: {thumbnail}").dimmed());
    }
    if !reply.buttons.is_empty() {
        println!();
        for (i, button) in reply.buttons.iter().enumerate() {
            print_button(first + i, button);
        }
    }
    if let Some(modal) = &reply.modal {
        print_modal(modal);
    }
    println!();
}

fn button_caption(button: &Button) -> String {
    let mut caption = button.emoji.clone().unwrap_or_default();
    if let Some(label) = &button.label {
        if !caption.is_empty() {
            caption.push(' ');
        }
        caption.push_str(label);
    }
    caption
}

fn print_button(number: usize, button: &Button) {
    let caption = button_caption(button);
    if button.disabled {
        println!("  [{number}] {caption} {}", "(disabled)".dimmed());
    } else {
        println!("  [{number}] {caption}  {}", button.token.dimmed());
    }
}

fn print_modal(modal: &Modal) {
    println!("  {} {}", "▸".bold(), modal.title.bold());
    for input in &modal.inputs {
        match input {
            ModalInput::Text {
                id,
                label,
                value,
                required,
                ..
            } => {
                let default = value
                    .as_deref()
                    .map(|v| format!(" [{v}]"))
                    .unwrap_or_default();
                let required = if *required { " (required)" } else { "" };
                println!("    {id}: {label}{default}{required}");
            }
            ModalInput::Select { id, label, options, .. } => {
                println!("    {id}: {label}");
                for option in options {
                    println!("      {} = {}", option.value, option.label);
                }
            }
        }
    }
    println!("  submit: {}", modal.token.dimmed());
}
