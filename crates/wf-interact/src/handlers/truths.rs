//! Setting truth widget: edit modal and subtable re-rolls.

use tracing::debug;
use wf_core::item::{DICE_MAX, DICE_MIN};
use wf_core::{Truth, TruthOption};
use wf_mechanics::{MechError, rows};

use super::find_truth;
use crate::dispatch::{Context, CustomId, Interaction, InteractionHandler};
use crate::error::{InteractError, InteractResult};
use crate::render::{TruthContent, format_truth};
use crate::reply::{Modal, ModalInput, Reply, ReplyMode, SelectOption};
use crate::schemas::{TruthOptionRef, TruthRef, TruthsEdit, TruthsOpenEdit, TruthsReroll};
use crate::token::decode_token;

/// Field id of the free text input.
pub const CUSTOM_FIELD: &str = "truth_custom";
/// Field id of the option select.
pub const TABLE_FIELD: &str = "truth_table";
/// Select value asking for a random option.
pub const RANDOM_OPTION: &str = "random";

/// Build the widget of a truth.
pub fn truth_reply(
    ctx: &Context<'_>,
    truth: &Truth,
    content: &TruthContent<'_>,
    mode: ReplyMode,
) -> Reply {
    let text = format_truth(truth, content);
    let reply = match mode {
        ReplyMode::New => Reply::new(text),
        ReplyMode::Update => Reply::update(text),
        ReplyMode::FollowUp => Reply::follow_up(text),
    };

    let mut buttons = vec![
        ctx.button::<TruthsOpenEdit>(
            &TruthRef {
                truth_id: truth.id.to_string(),
            },
            "✏️",
        )
        .with_label("Edit"),
    ];
    if let TruthContent::Option { option, .. } = content
        && option.has_subtable()
    {
        buttons.push(ctx.button::<TruthsReroll>(
            &TruthOptionRef {
                truth_id: truth.id.to_string(),
                option_id: option.id.to_string(),
            },
            "🔄",
        ));
    }
    reply
        .with_thumbnail(truth.icon.as_deref())
        .with_buttons(buttons)
}

/// Choose an option, rolling on its subtable when it has one.
pub fn choose_option<'a>(
    rng: &mut dyn wf_mechanics::RandomSource,
    option: &'a TruthOption,
) -> InteractResult<TruthContent<'a>> {
    if !option.has_subtable() {
        return Ok(TruthContent::Option { option, roll: None });
    }
    let value = rng.uniform_int(DICE_MIN, DICE_MAX);
    let Some(row) = rows::row_for(&option.subtable, value) else {
        debug!(option = %option.id, roll = value, "subtable roll matches no row");
        return Err(MechError::NoMatchingRow {
            id: option.id.to_string(),
            roll: value,
        }
        .into());
    };
    Ok(TruthContent::Option {
        option,
        roll: Some((value, row)),
    })
}

/// Opens the edit modal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruthsOpenEditHandler;

impl InteractionHandler for TruthsOpenEditHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<TruthsOpenEdit>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        let value = decode_token::<TruthsOpenEdit>(&interaction.token)?;
        let truth = find_truth(ctx.library, &value.truth_id)?;

        let mut options = vec![SelectOption {
            value: RANDOM_OPTION.to_string(),
            label: "Random Option".to_string(),
            description: Some("Select randomly from the table.".to_string()),
        }];
        options.extend(truth.options.iter().enumerate().map(|(index, option)| SelectOption {
            value: index.to_string(),
            label: format!("Option {}", index + 1),
            description: Some(option.label()),
        }));

        let (token, _) = ctx.token::<TruthsEdit>(&value);
        Ok(Reply::with_modal(Modal {
            token,
            title: format!("Edit {}", truth.title),
            inputs: vec![
                ModalInput::Text {
                    id: CUSTOM_FIELD.to_string(),
                    label: "Write your own truth...".to_string(),
                    placeholder: Some("Enter your custom truth text here...".to_string()),
                    value: None,
                    required: false,
                },
                ModalInput::Select {
                    id: TABLE_FIELD.to_string(),
                    label: "...or select from table".to_string(),
                    options,
                    required: false,
                },
            ],
        }))
    }
}

/// Applies the edit modal: custom text wins over a selected option.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruthsEditHandler;

impl InteractionHandler for TruthsEditHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<TruthsEdit>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        let TruthRef { truth_id } = decode_token::<TruthsEdit>(&interaction.token)?;
        let truth = find_truth(ctx.library, &truth_id)?;

        let content = if let Some(text) = interaction.field(CUSTOM_FIELD) {
            TruthContent::Custom(text)
        } else if let Some(selected) = interaction.field(TABLE_FIELD) {
            let option = if selected == RANDOM_OPTION {
                let value = ctx.rng.uniform_int(DICE_MIN, DICE_MAX);
                truth.options.iter().find(|o| o.contains(value)).ok_or_else(|| {
                    debug!(truth = %truth.id, roll = value, "truth roll matches no option");
                    MechError::NoMatchingRow {
                        id: truth.id.to_string(),
                        roll: value,
                    }
                })?
            } else {
                selected
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| truth.options.get(index))
                    .ok_or_else(|| {
                        InteractError::InvalidInput(format!(
                            "Invalid table option index: {selected}"
                        ))
                    })?
            };
            choose_option(ctx.rng, option)?
        } else {
            TruthContent::Placeholder
        };
        Ok(truth_reply(ctx, truth, &content, ReplyMode::Update))
    }
}

/// Re-rolls the subtable of the chosen option.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruthsRerollHandler;

impl InteractionHandler for TruthsRerollHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<TruthsReroll>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        let TruthOptionRef {
            truth_id,
            option_id,
        } = decode_token::<TruthsReroll>(&interaction.token)?;
        let truth = find_truth(ctx.library, &truth_id)?;
        let option = truth
            .find_option(&option_id)
            .ok_or_else(|| InteractError::NotFound {
                kind: "truth option",
                id: option_id.clone(),
            })?;
        let content = choose_option(ctx.rng, option)?;
        Ok(truth_reply(ctx, truth, &content, ReplyMode::Update))
    }
}
