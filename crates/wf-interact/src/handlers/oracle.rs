//! Oracle widget and its buttons: roll again, nudge up or down, re-roll.

use wf_core::RollableItem;
use wf_mechanics::{RollResult, rows};

use super::find_item;
use crate::dispatch::{Context, CustomId, Interaction, InteractionHandler};
use crate::error::{InteractError, InteractResult};
use crate::render;
use crate::reply::{Reply, ReplyMode};
use crate::schemas::{ItemRef, NudgeTarget, OracleNew, OracleNudge, OracleReroll};
use crate::token::decode_token;

/// Roll an oracle node and build its widget.
///
/// With `row`, the table is shown at that row instead of rolled. The
/// nudge buttons are only offered for tables.
pub fn oracle_reply<'a>(
    ctx: &mut Context<'a>,
    item: &'a RollableItem,
    row: Option<usize>,
    mode: ReplyMode,
) -> InteractResult<Reply> {
    if !item.is_rollable() {
        return Err(InteractError::NotRollable(item.id.to_string()));
    }
    let resolver = ctx.resolver();
    let result = match row {
        Some(index) => resolver.resolve_at_row(item, index, ctx.rng)?,
        None => resolver.resolve(item, ctx.rng)?,
    };
    if result.is_empty() {
        return Err(InteractError::NotRollable(item.id.to_string()));
    }

    let item_ref = ItemRef {
        item_id: item.id.to_string(),
    };
    let mut buttons = vec![
        ctx.button::<OracleNew>(&item_ref, "➕")
            .disable_if(!item.allows_more_rolls()),
    ];
    if let (RollResult::Table { row_index, .. }, Some(table)) = (&result, item.rows()) {
        let previous = rows::index_before(*row_index);
        let next = rows::index_after(table, *row_index);
        let nudge = |index: Option<usize>| NudgeTarget {
            item_id: item.id.to_string(),
            row_index: index.unwrap_or_default(),
        };
        buttons.push(
            ctx.button::<OracleNudge>(&nudge(previous), "⬆️")
                .disable_if(previous.is_none()),
        );
        buttons.push(
            ctx.button::<OracleNudge>(&nudge(next), "⬇️")
                .disable_if(next.is_none()),
        );
    }
    buttons.push(ctx.button::<OracleReroll>(&item_ref, "🔄"));

    let reply = match mode {
        ReplyMode::New => Reply::new(render::format(&result)),
        ReplyMode::Update => Reply::update(render::format(&result)),
        ReplyMode::FollowUp => Reply::follow_up(render::format(&result)),
    };
    Ok(reply
        .with_thumbnail(item.display.thumbnail())
        .with_buttons(buttons))
}

/// "Roll again": a fresh roll in a new message.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleNewHandler;

impl InteractionHandler for OracleNewHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<OracleNew>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        let ItemRef { item_id } = decode_token::<OracleNew>(&interaction.token)?;
        let item = find_item(ctx.library, &item_id)?;
        oracle_reply(ctx, item, None, ReplyMode::FollowUp)
    }
}

/// Move the shown row without re-rolling.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleNudgeHandler;

impl InteractionHandler for OracleNudgeHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<OracleNudge>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        let NudgeTarget { item_id, row_index } = decode_token::<OracleNudge>(&interaction.token)?;
        let item = find_item(ctx.library, &item_id)?;
        oracle_reply(ctx, item, Some(row_index), ReplyMode::Update)
    }
}

/// Re-roll in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleRerollHandler;

impl InteractionHandler for OracleRerollHandler {
    fn custom_id(&self) -> CustomId {
        CustomId::schema::<OracleReroll>()
    }

    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply> {
        let ItemRef { item_id } = decode_token::<OracleReroll>(&interaction.token)?;
        let item = find_item(ctx.library, &item_id)?;
        oracle_reply(ctx, item, None, ReplyMode::Update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::token::encode_token;
    use wf_core::{Library, Row, Usage};
    use wf_mechanics::{FixedRolls, MechError};

    fn library() -> Library {
        let three = RollableItem::table(
            "Oracles/Three",
            "Three",
            vec![
                Row::new(1, 33, "Low"),
                Row::new(34, 66, "Mid"),
                Row::new(67, 100, "High"),
            ],
        )
        .with_usage(Usage {
            max_rolls: None,
            repeatable: true,
        });
        let group = RollableItem::container(
            "Oracles/Group",
            "Group",
            vec![RollableItem::table("Oracles/Group/One", "One", vec![Row::new(1, 100, "Only")])],
            vec![],
        );
        let empty = RollableItem::container("Oracles/Empty", "Empty", vec![], vec![]);
        let mut bare = Row::new(1, 100, "Bare");
        bare.floor = None;
        bare.ceiling = None;
        let loose = RollableItem::table(
            "Oracles/Loose",
            "Loose",
            vec![Row::new(1, 100, "Wide"), bare, Row::new(1, 50, "Late")],
        );
        Library::new(vec![three, group, empty, loose], vec![], vec![])
    }

    fn nudge_token(index: usize) -> String {
        encode_token::<OracleNudge>(&NudgeTarget {
            item_id: "Oracles/Three".to_string(),
            row_index: index,
        })
    }

    #[test]
    fn table_widget_has_four_buttons() {
        let lib = library();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([50]);
        let mut ctx = Context::new(&lib, &config, &mut rng);
        let item = lib.find_item("Oracles/Three").unwrap();
        let reply = oracle_reply(&mut ctx, item, None, ReplyMode::New).unwrap();

        assert!(reply.content.starts_with("## 🔮 Mid"));
        let emojis: Vec<_> = reply.buttons.iter().filter_map(|b| b.emoji.as_deref()).collect();
        assert_eq!(emojis, ["➕", "⬆️", "⬇️", "🔄"]);
        assert!(reply.buttons.iter().all(|b| !b.disabled));
        assert_eq!(reply.buttons[1].token, nudge_token(0));
        assert_eq!(reply.buttons[2].token, nudge_token(2));
    }

    #[test]
    fn nudge_buttons_disabled_at_the_edges() {
        let lib = library();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([1]);
        let mut ctx = Context::new(&lib, &config, &mut rng);
        let item = lib.find_item("Oracles/Three").unwrap();

        let first = oracle_reply(&mut ctx, item, Some(0), ReplyMode::Update).unwrap();
        assert!(first.buttons[1].disabled);
        assert!(!first.buttons[2].disabled);

        let last = oracle_reply(&mut ctx, item, Some(2), ReplyMode::Update).unwrap();
        assert!(!last.buttons[1].disabled);
        assert!(last.buttons[2].disabled);
    }

    #[test]
    fn nudge_targets_follow_the_shown_row() {
        let lib = library();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([1]);
        let mut ctx = Context::new(&lib, &config, &mut rng);
        let item = lib.find_item("Oracles/Loose").unwrap();
        let token = |index: usize| {
            encode_token::<OracleNudge>(&NudgeTarget {
                item_id: "Oracles/Loose".to_string(),
                row_index: index,
            })
        };

        // Every row here contains 1, yet the targets come from the row index.
        let middle = oracle_reply(&mut ctx, item, Some(1), ReplyMode::Update).unwrap();
        assert!(middle.content.starts_with("## 🔮 Bare"));
        assert_eq!(middle.buttons[1].token, token(0));
        assert_eq!(middle.buttons[2].token, token(2));
        assert!(!middle.buttons[1].disabled && !middle.buttons[2].disabled);

        let last = oracle_reply(&mut ctx, item, Some(2), ReplyMode::Update).unwrap();
        assert!(last.content.starts_with("## 🔮 Late"));
        assert_eq!(last.buttons[1].token, token(1));
        assert!(last.buttons[2].disabled);
    }

    #[test]
    fn container_widget_has_no_nudge() {
        let lib = library();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([10]);
        let mut ctx = Context::new(&lib, &config, &mut rng);
        let item = lib.find_item("Oracles/Group").unwrap();
        let reply = oracle_reply(&mut ctx, item, None, ReplyMode::New).unwrap();
        assert_eq!(reply.buttons.len(), 2);
        // No usage policy, so rolling again is not offered.
        assert!(reply.buttons[0].disabled);
    }

    #[test]
    fn empty_container_is_not_rollable() {
        let lib = library();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([10]);
        let mut ctx = Context::new(&lib, &config, &mut rng);
        let item = lib.find_item("Oracles/Empty").unwrap();
        let err = oracle_reply(&mut ctx, item, None, ReplyMode::New).unwrap_err();
        assert_eq!(err.user_message(), "Nothing to roll here.");
    }

    #[test]
    fn nudge_handler_shows_requested_row() {
        let lib = library();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([99]);
        let mut ctx = Context::new(&lib, &config, &mut rng);
        let reply = OracleNudgeHandler
            .execute(&mut ctx, &Interaction::button(nudge_token(0)))
            .unwrap();
        assert_eq!(reply.mode, ReplyMode::Update);
        assert!(reply.content.starts_with("## 🔮 Low"));
        assert!(reply.content.contains("`→ 1`"));
    }

    #[test]
    fn nudge_out_of_bounds_is_user_error() {
        let lib = library();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([1]);
        let mut ctx = Context::new(&lib, &config, &mut rng);
        let err = OracleNudgeHandler
            .execute(&mut ctx, &Interaction::button(nudge_token(7)))
            .unwrap_err();
        assert!(matches!(err, InteractError::Mechanics(MechError::RowOutOfBounds { .. })));
        assert!(!err.is_internal());
    }

    #[test]
    fn new_and_reroll_modes() {
        let lib = library();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([80]);
        let mut ctx = Context::new(&lib, &config, &mut rng);
        let item_ref = ItemRef {
            item_id: "Oracles/Three".to_string(),
        };

        let token = encode_token::<OracleNew>(&item_ref);
        let reply = OracleNewHandler.execute(&mut ctx, &Interaction::button(token)).unwrap();
        assert_eq!(reply.mode, ReplyMode::FollowUp);

        let token = encode_token::<OracleReroll>(&item_ref);
        let reply = OracleRerollHandler.execute(&mut ctx, &Interaction::button(token)).unwrap();
        assert_eq!(reply.mode, ReplyMode::Update);
        assert!(reply.content.starts_with("## 🔮 High"));
    }

    #[test]
    fn unknown_item_is_not_found() {
        let lib = library();
        let config = AppConfig::default();
        let mut rng = FixedRolls::new([1]);
        let mut ctx = Context::new(&lib, &config, &mut rng);
        let token = encode_token::<OracleReroll>(&ItemRef {
            item_id: "Oracles/Gone".to_string(),
        });
        let err = OracleRerollHandler.execute(&mut ctx, &Interaction::button(token)).unwrap_err();
        assert_eq!(err.user_message(), "Could not find oracle \"Oracles/Gone\".");
    }
}
