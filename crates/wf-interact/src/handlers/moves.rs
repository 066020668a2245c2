//! Move widget, action roll modal, and oracle shortcuts of a move.

use wf_core::Move;
use wf_mechanics::ActionRoll;

use super::oracle::oracle_reply;
use super::{find_item, find_move};
use crate::dispatch::{Context, CustomId, Interaction, InteractionHandler};
use crate::error::{InteractError, InteractResult};
use crate::render;
use crate::reply::{Modal, ModalInput, Reply, ReplyMode, SelectOption};
use crate::schemas::{MoveOracleRoll, MoveOracleSelect, MoveRef, MoveRoll, MoveRollSelect};
use crate::token::decode_token;

/// Field id of the stat input.
pub const STAT_FIELD: &str = "stat";
/// Field id of the bonus input.
pub const BONUS_FIELD: &str = "bonus";
/// Field id of the oracle select.
pub const ORACLE_FIELD: &str = "oracle_select";

fn move_ref(mv: &Move) -> MoveRef {
    MoveRef {
        move_id: mv.id.to_string(),
    }
}

/// Build the widget of a move.
pub fn move_reply(ctx: &Context<'_>, mv: &Move) -> Reply {
    let value = move_ref(mv);
    Reply::new(render::format_move(mv)).with_buttons(vec![
        ctx.button::<MoveRoll>(&value, "🎲")
            .with_label("Roll")
            .disable_if(mv.outcomes.is_none()),
        ctx.button::<MoveOracleRoll>(&value, "🔮")
            .with_label("Roll on table")
            .disable_if(mv.oracles.is_empty()),
    ])
}

/// Largest stat or bonus a player can enter, either sign.
pub const MAX_ADDS: i32 = 99;

fn parse_number(input: Option<&str>, what: &str) -> InteractResult<i32> {
    let raw = input.unwrap_or_default();
    let value: i32 = raw.parse().map_err(|_| {
        InteractError::InvalidInput(format!(
            "Invalid {what} value: \"{raw}\". Please enter a number."
        ))
    })?;
    if !(-MAX_ADDS..=MAX_ADDS).contains(&value) {
        return Err(InteractError::InvalidInput(format!(
            "Invalid {what} value: \"{raw}\". \
             Please enter a number between -{MAX_ADDS} and {MAX_ADDS}."
        )));
    }
    Ok(value)
}

/// Opens the stat and bonus modal.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveRollHandler;

impl InteractionHandler for MoveRollHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<MoveRoll>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        let value = decode_token::<MoveRoll>(&interaction.token)?;
        let mv = find_move(ctx.library, &value.move_id)?;
        let (token, _) = ctx.token::<MoveRollSelect>(&value);
        Ok(Reply::with_modal(Modal {
            token,
            title: format!("Roll: {}", mv.display_title()),
            inputs: vec![
                ModalInput::Text {
                    id: STAT_FIELD.to_string(),
                    label: "Stat Value".to_string(),
                    placeholder: Some("Enter your stat value (e.g., 3)".to_string()),
                    value: None,
                    required: true,
                },
                ModalInput::Text {
                    id: BONUS_FIELD.to_string(),
                    label: "Bonus/Penalty (optional)".to_string(),
                    placeholder: Some("Enter any adds or penalties (e.g., +2 or -1)".to_string()),
                    value: Some("0".to_string()),
                    required: false,
                },
            ],
        }))
    }
}

/// Makes the action roll once stat and bonus are submitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveRollSelectHandler;

impl InteractionHandler for MoveRollSelectHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<MoveRollSelect>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        let MoveRef { move_id } = decode_token::<MoveRollSelect>(&interaction.token)?;
        let mv = find_move(ctx.library, &move_id)?;
        if mv.outcomes.is_none() {
            return Err(InteractError::InvalidInput(format!(
                "Move \"{}\" does not have outcomes defined.",
                mv.display_title()
            )));
        }

        let stat = parse_number(interaction.field(STAT_FIELD), "stat")?;
        let bonus = match interaction.field(BONUS_FIELD) {
            Some(raw) => parse_number(Some(raw), "bonus")?,
            None => 0,
        };
        let roll = ActionRoll::roll(stat, bonus, ctx.rng)?;
        Ok(Reply::new(render::format_action_roll(mv, &roll)))
    }
}

/// Rolls the oracle of a move, or asks which one when there are several.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOracleRollHandler;

impl InteractionHandler for MoveOracleRollHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<MoveOracleRoll>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        let value = decode_token::<MoveOracleRoll>(&interaction.token)?;
        let library = ctx.library;
        let mv = find_move(library, &value.move_id)?;

        match mv.oracles.as_slice() {
            [] => Err(InteractError::InvalidInput(
                "This move has no oracles to roll.".to_string(),
            )),
            [only] => {
                let item = find_item(library, only.as_str())?;
                oracle_reply(ctx, item, None, ReplyMode::FollowUp)
            }
            several => {
                let options: Vec<SelectOption> = several
                    .iter()
                    .filter_map(|id| library.find_item(id.as_str()))
                    .map(|item| SelectOption::new(item.id.as_str(), item.title.as_str()))
                    .collect();
                if options.is_empty() {
                    return Err(InteractError::NotFound {
                        kind: "oracle",
                        id: several[0].to_string(),
                    });
                }
                let (token, _) = ctx.token::<MoveOracleSelect>(&value);
                Ok(Reply::with_modal(Modal {
                    token,
                    title: format!("Select Oracle for {}", mv.display_title()),
                    inputs: vec![ModalInput::Select {
                        id: ORACLE_FIELD.to_string(),
                        label: "Select an oracle to roll".to_string(),
                        options,
                        required: true,
                    }],
                }))
            }
        }
    }
}

/// Rolls the oracle picked in the selection modal.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOracleSelectHandler;

impl InteractionHandler for MoveOracleSelectHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<MoveOracleSelect>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        decode_token::<MoveOracleSelect>(&interaction.token)?;
        let selected = interaction
            .field(ORACLE_FIELD)
            .ok_or_else(|| InteractError::InvalidInput("No oracle selected.".to_string()))?;
        let item = find_item(ctx.library, selected)?;
        oracle_reply(ctx, item, None, ReplyMode::FollowUp)
    }
}
