//! Slash-command entry points.
//!
//! Each command takes the already parsed options of the chat command and
//! returns the reply to post. Autocomplete takes the partial input and
//! returns suggestions.

use wf_core::{Library, SearchEntry};
use wf_mechanics::ProgressTrack;

use crate::config::AppConfig;
use crate::dispatch::Context;
use crate::error::InteractResult;
use crate::handlers::progress::{parse_rank, parse_title};
use crate::handlers::{find_item, find_move, move_reply, oracle_reply, progress_reply, truth_reply};
use crate::render::TruthContent;
use crate::reply::{Choice, Reply, ReplyMode};

/// `/oracle`: roll an oracle node, or show a table at a given row.
pub fn oracle(ctx: &mut Context<'_>, id: &str, row: Option<usize>) -> InteractResult<Reply> {
    let item = find_item(ctx.library, id)?;
    oracle_reply(ctx, item, row, ReplyMode::New)
}

/// Autocomplete for `/oracle`.
pub fn oracle_autocomplete(library: &Library, config: &AppConfig, query: &str) -> Vec<Choice> {
    choices(library.search_oracles().text(query).limit(config.autocomplete_limit).execute())
}

/// `/move`: show a move.
pub fn move_(ctx: &mut Context<'_>, id: &str) -> InteractResult<Reply> {
    let mv = find_move(ctx.library, id)?;
    Ok(move_reply(ctx, mv))
}

/// Autocomplete for `/move`.
pub fn move_autocomplete(library: &Library, config: &AppConfig, query: &str) -> Vec<Choice> {
    choices(library.search_moves().text(query).limit(config.autocomplete_limit).execute())
}

/// `/truths`: one widget per setting truth, nothing chosen yet.
pub fn truths(ctx: &mut Context<'_>) -> InteractResult<Vec<Reply>> {
    let ctx: &Context<'_> = ctx;
    Ok(ctx
        .library
        .truths()
        .iter()
        .map(|truth| truth_reply(ctx, truth, &TruthContent::Placeholder, ReplyMode::New))
        .collect())
}

/// `/progress`: a new, empty progress track.
pub fn progress(ctx: &mut Context<'_>, title: &str, rank: &str) -> InteractResult<Reply> {
    let title = parse_title(Some(title))?;
    let rank = parse_rank(rank)?;
    Ok(progress_reply(ctx, &ProgressTrack::new(title, rank, 0), ReplyMode::New))
}

fn choices(entries: Vec<&SearchEntry>) -> Vec<Choice> {
    entries
        .into_iter()
        .map(|entry| Choice {
            label: entry.label(),
            value: entry.id.to_string(),
        })
        .collect()
}
