//! Move and action roll rendering.

use wf_core::Move;
use wf_mechanics::ActionRoll;

use super::sanitize::{remove_links, sanitize_text};

/// Render a move: its title and its text, without links or tables.
pub fn format_move(mv: &Move) -> String {
    let text = sanitize_text(&mv.text.replace("\n\n", "\n"));
    if text.is_empty() {
        format!("## {}", mv.display_title())
    } else {
        format!("## {}\n\n{text}", mv.display_title())
    }
}

/// Render an action roll made for a move, followed by the move's text
/// for the outcome.
pub fn format_action_roll(mv: &Move, roll: &ActionRoll) -> String {
    let [first, second] = roll.challenge_dice;
    let bonus = if roll.bonus == 0 {
        String::new()
    } else {
        format!(" + **{}** (+bonus)", roll.bonus)
    };

    let mut lines = vec![
        format!("## **{}**", roll.outcome),
        format!(
            "**{}** (+ 🎲) + **{}** (+stat){bonus} → **{}** vs {first}, {second}",
            roll.action_die, roll.stat, roll.action_score
        ),
    ];
    if roll.has_match {
        lines.push("**MATCH!**".to_string());
    }
    lines.push(format!(
        "-# `→ {} vs {first}, {second}` ◇ {}",
        roll.action_score,
        mv.display_title()
    ));

    let outcome_text = mv
        .outcomes
        .as_ref()
        .map(|o| remove_links(o.get(roll.outcome).resolve(roll.has_match)).replace("\n\n", "\n"))
        .unwrap_or_default();
    if !outcome_text.is_empty() {
        lines.push(String::new());
        lines.push(outcome_text);
    }
    lines.join("\n")
}
