//! Progress track widget: mark, clear, and edit.

use wf_mechanics::{ChallengeRank, ProgressTrack};

use crate::dispatch::{Context, CustomId, Interaction, InteractionHandler};
use crate::error::{InteractError, InteractResult};
use crate::render::format_progress;
use crate::reply::{Modal, ModalInput, Reply, ReplyMode, SelectOption};
use crate::schemas::{
    ProgressEdit, ProgressOpenEdit, ProgressSet, ProgressState, fit_progress_title,
};
use crate::token::decode_token;

/// Field id of the title input.
pub const TITLE_FIELD: &str = "title";
/// Field id of the rank select.
pub const RANK_FIELD: &str = "rank";

/// Look up a rank by (partial) name.
pub fn parse_rank(input: &str) -> InteractResult<ChallengeRank> {
    ChallengeRank::find(input).ok_or_else(|| {
        let valid: Vec<&str> = ChallengeRank::ALL.iter().map(|r| r.name()).collect();
        InteractError::InvalidInput(format!(
            "Invalid challenge rank: {input}. Valid ranks are: {}",
            valid.join(", ")
        ))
    })
}

/// Reject blank titles.
pub fn parse_title(input: Option<&str>) -> InteractResult<&str> {
    input
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| InteractError::InvalidInput("The title must not be empty.".to_string()))
}

/// Build the widget of a progress track.
///
/// The buttons carry the tick count the track will have once pressed.
pub fn progress_reply(ctx: &Context<'_>, track: &ProgressTrack, mode: ReplyMode) -> Reply {
    let title = fit_progress_title(&track.title, ctx.config.token_limit);
    let state = |ticks| ProgressState {
        title: title.to_string(),
        rank: track.rank,
        ticks,
    };

    let text = format_progress(track);
    let reply = match mode {
        ReplyMode::New => Reply::new(text),
        ReplyMode::Update => Reply::update(text),
        ReplyMode::FollowUp => Reply::follow_up(text),
    };
    reply.with_buttons(vec![
        ctx.button::<ProgressSet>(&state(track.cleared()), "➖")
            .disable_if(track.is_empty()),
        ctx.button::<ProgressSet>(&state(track.marked()), "➕")
            .disable_if(track.is_full()),
        ctx.button::<ProgressOpenEdit>(&state(track.ticks()), "✏️")
            .with_label("Edit"),
    ])
}

/// Sets the track to the tick count carried by the button.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressSetHandler;

impl InteractionHandler for ProgressSetHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<ProgressSet>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        let state = decode_token::<ProgressSet>(&interaction.token)?;
        let track = ProgressTrack::new(state.title, state.rank, state.ticks);
        Ok(progress_reply(ctx, &track, ReplyMode::Update))
    }
}

/// Opens the title and rank modal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressOpenEditHandler;

impl InteractionHandler for ProgressOpenEditHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<ProgressOpenEdit>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        let state = decode_token::<ProgressOpenEdit>(&interaction.token)?;
        let (token, _) = ctx.token::<ProgressEdit>(&state);
        Ok(Reply::with_modal(Modal {
            token,
            title: "Edit Progress Track".to_string(),
            inputs: vec![
                ModalInput::Text {
                    id: TITLE_FIELD.to_string(),
                    label: "Title".to_string(),
                    placeholder: None,
                    value: Some(state.title),
                    required: true,
                },
                ModalInput::Select {
                    id: RANK_FIELD.to_string(),
                    label: "Challenge Rank".to_string(),
                    options: ChallengeRank::ALL
                        .iter()
                        .map(|r| SelectOption::new(r.name(), r.name()))
                        .collect(),
                    required: true,
                },
            ],
        }))
    }
}

/// Applies the edit modal, keeping the tick count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressEditHandler;

impl InteractionHandler for ProgressEditHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<ProgressEdit>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        let state = decode_token::<ProgressEdit>(&interaction.token)?;
        let title = parse_title(interaction.field(TITLE_FIELD))?;
        let rank = parse_rank(interaction.field(RANK_FIELD).unwrap_or_default())?;
        let track = ProgressTrack::new(title, rank, state.ticks);
        Ok(progress_reply(ctx, &track, ReplyMode::Update))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::AppConfig;
    use crate::token::encode_token;
    use wf_core::Library;
    use wf_mechanics::FixedRolls;

    fn state(ticks: u32) -> ProgressState {
        ProgressState {
            title: "Escape".to_string(),
            rank: ChallengeRank::Dangerous,
            ticks,
        }
    }

    #[test]
    fn buttons_carry_target_ticks() {
        let lib = Library::default();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([1]);
        let ctx = Context::new(&lib, &config, &mut rng);
        let track = ProgressTrack::new("Escape", ChallengeRank::Dangerous, 10);
        let reply = progress_reply(&ctx, &track, ReplyMode::New);

        let clear = decode_token::<ProgressSet>(&reply.buttons[0].token).unwrap();
        let mark = decode_token::<ProgressSet>(&reply.buttons[1].token).unwrap();
        let edit = decode_token::<ProgressOpenEdit>(&reply.buttons[2].token).unwrap();
        assert_eq!(clear, state(2));
        assert_eq!(mark, state(18));
        assert_eq!(edit, state(10));
    }

    #[test]
    fn buttons_disabled_at_bounds() {
        let lib = Library::default();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([1]);
        let ctx = Context::new(&lib, &config, &mut rng);

        let empty = ProgressTrack::new("T", ChallengeRank::Epic, 0);
        let empty = progress_reply(&ctx, &empty, ReplyMode::New);
        assert!(empty.buttons[0].disabled);
        assert!(!empty.buttons[1].disabled);

        let full = ProgressTrack::new("T", ChallengeRank::Epic, 40);
        let full = progress_reply(&ctx, &full, ReplyMode::New);
        assert!(!full.buttons[0].disabled);
        assert!(full.buttons[1].disabled);
    }

    #[test]
    fn long_title_still_fits() {
        let lib = Library::default();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([1]);
        let ctx = Context::new(&lib, &config, &mut rng);
        let track = ProgressTrack::new("T".repeat(100), ChallengeRank::Troublesome, 39);
        let reply = progress_reply(&ctx, &track, ReplyMode::New);
        assert!(reply.buttons.iter().all(|b| b.token.len() <= 100 && !b.disabled));
        assert!(reply.content.starts_with(&format!("## {}", "T".repeat(100))));
    }

    #[test]
    fn set_handler_updates() {
        let lib = Library::default();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([1]);
        let mut ctx = Context::new(&lib, &config, &mut rng);
        let token = encode_token::<ProgressSet>(&state(18));
        let reply = ProgressSetHandler.execute(&mut ctx, &Interaction::button(token)).unwrap();
        assert_eq!(reply.mode, ReplyMode::Update);
        assert!(reply.content.contains("18/40 ticks"));
    }

    #[test]
    fn edit_keeps_ticks() {
        let lib = Library::default();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([1]);
        let mut ctx = Context::new(&lib, &config, &mut rng);

        let open = encode_token::<ProgressOpenEdit>(&state(7));
        let modal = ProgressOpenEditHandler
            .execute(&mut ctx, &Interaction::button(open))
            .unwrap()
            .modal
            .unwrap();
        assert_eq!(modal.inputs.len(), 2);

        let mut fields = BTreeMap::new();
        fields.insert(TITLE_FIELD.to_string(), "Reach the Station".to_string());
        fields.insert(RANK_FIELD.to_string(), "epic".to_string());
        let reply = ProgressEditHandler
            .execute(&mut ctx, &Interaction::modal_submit(modal.token, fields))
            .unwrap();
        assert!(reply.content.starts_with("## Reach the Station"));
        assert!(reply.content.contains("**Rank**: Epic ◇ 7/40 ticks"));
    }

    #[test]
    fn edit_rejects_unknown_rank() {
        let lib = Library::default();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([1]);
        let mut ctx = Context::new(&lib, &config, &mut rng);
        let mut fields = BTreeMap::new();
        fields.insert(TITLE_FIELD.to_string(), "T".to_string());
        fields.insert(RANK_FIELD.to_string(), "impossible".to_string());
        let token = encode_token::<ProgressEdit>(&state(0));
        let err = ProgressEditHandler
            .execute(&mut ctx, &Interaction::modal_submit(token, fields))
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Invalid challenge rank: impossible. \
             Valid ranks are: Troublesome, Dangerous, Formidable, Extreme, Epic"
        );
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(parse_title(Some("  ")).is_err());
        assert!(parse_title(None).is_err());
        assert_eq!(parse_title(Some(" Vault ")).unwrap(), "Vault");
    }
}
