//! Token schemas for every interactive control.
//!
//! Schema names must be unique; matching compares the whole name, so a
//! name may be a prefix of another.

use wf_mechanics::ChallengeRank;
use wf_mechanics::progress::MAX_TICKS;

use crate::error::{TokenError, TokenResult};
use crate::token::{TokenSchema, encode_token, expect_fields, parse_field, truncate_to_budget};

/// A token referring to an oracle node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    /// The oracle node's id.
    pub item_id: String,
}

/// A token referring to one row of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NudgeTarget {
    /// The table's id.
    pub item_id: String,
    /// Index of the row to show.
    pub row_index: usize,
}

/// A token referring to a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRef {
    /// The move's id.
    pub move_id: String,
}

/// A token referring to a setting truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthRef {
    /// The truth's id.
    pub truth_id: String,
}

/// A token referring to one option of a setting truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthOptionRef {
    /// The truth's id.
    pub truth_id: String,
    /// The option's full id.
    pub option_id: String,
}

/// The full state of a progress track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    /// Track title, possibly truncated to fit the token.
    pub title: String,
    /// Challenge rank.
    pub rank: ChallengeRank,
    /// Tick count.
    pub ticks: u32,
}

/// Declares a schema whose only field is one id.
macro_rules! single_id_schema {
    ($(#[$doc:meta])* $schema:ident, $name:literal, $value:ident, $field:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $schema;

        impl TokenSchema for $schema {
            type Value = $value;
            const NAME: &'static str = $name;

            fn encode(value: &Self::Value) -> Vec<String> {
                vec![value.$field.clone()]
            }

            fn decode(fields: &[String]) -> TokenResult<Self::Value> {
                expect_fields(Self::NAME, fields, 1)?;
                Ok($value {
                    $field: fields[0].clone(),
                })
            }
        }
    };
}

single_id_schema!(
    /// "Roll again" on an oracle, as a new message.
    OracleNew, "oracle_new", ItemRef, item_id
);
single_id_schema!(
    /// Re-roll an oracle in place.
    OracleReroll, "oracle_reroll", ItemRef, item_id
);
single_id_schema!(
    /// Open the action roll modal of a move.
    MoveRoll, "move_roll", MoveRef, move_id
);
single_id_schema!(
    /// Submit the action roll modal of a move.
    MoveRollSelect, "move_roll_select", MoveRef, move_id
);
single_id_schema!(
    /// Roll the oracle a move refers to.
    MoveOracleRoll, "move_oracle_roll", MoveRef, move_id
);
single_id_schema!(
    /// Submit the oracle selection modal of a move.
    MoveOracleSelect, "move_oracle_select", MoveRef, move_id
);
single_id_schema!(
    /// Open the edit modal of a setting truth.
    TruthsOpenEdit, "truths_open_edit", TruthRef, truth_id
);
single_id_schema!(
    /// Submit the edit modal of a setting truth.
    TruthsEdit, "truths_edit", TruthRef, truth_id
);

/// Show an adjacent row of a table without re-rolling.
#[derive(Debug, Clone, Copy)]
pub struct OracleNudge;

impl TokenSchema for OracleNudge {
    type Value = NudgeTarget;
    const NAME: &'static str = "oracle_nudge";

    fn encode(value: &Self::Value) -> Vec<String> {
        vec![value.item_id.clone(), value.row_index.to_string()]
    }

    fn decode(fields: &[String]) -> TokenResult<Self::Value> {
        expect_fields(Self::NAME, fields, 2)?;
        Ok(NudgeTarget {
            item_id: fields[0].clone(),
            row_index: parse_field("row index", &fields[1])?,
        })
    }
}

/// Re-roll the subtable of a chosen truth option.
///
/// The option id is carried without the truth id prefix it normally
/// starts with. An option id lacking that prefix travels whole, flagged
/// by a third field.
#[derive(Debug, Clone, Copy)]
pub struct TruthsReroll;

/// Third field of a [`TruthsReroll`] token whose option id is whole.
const WHOLE_OPTION_ID: &str = "=";

impl TokenSchema for TruthsReroll {
    type Value = TruthOptionRef;
    const NAME: &'static str = "truths_reroll";

    fn encode(value: &Self::Value) -> Vec<String> {
        match value.option_id.strip_prefix(value.truth_id.as_str()) {
            Some(suffix) => vec![value.truth_id.clone(), suffix.to_string()],
            None => vec![
                value.truth_id.clone(),
                value.option_id.clone(),
                WHOLE_OPTION_ID.to_string(),
            ],
        }
    }

    fn decode(fields: &[String]) -> TokenResult<Self::Value> {
        let option_id = match fields {
            [truth_id, suffix] => format!("{truth_id}{suffix}"),
            [_, whole, flag] if flag == WHOLE_OPTION_ID => whole.clone(),
            [_, _, flag] => {
                return Err(TokenError::InvalidField {
                    field: "option id form",
                    value: flag.clone(),
                });
            }
            _ => {
                return Err(TokenError::FieldCount {
                    schema: Self::NAME,
                    expected: 2,
                    found: fields.len(),
                });
            }
        };
        Ok(TruthOptionRef {
            truth_id: fields[0].clone(),
            option_id,
        })
    }
}

/// Encode and decode the three progress track fields.
fn encode_progress(value: &ProgressState) -> Vec<String> {
    vec![
        value.title.clone(),
        value.rank.index().to_string(),
        value.ticks.to_string(),
    ]
}

fn decode_progress(schema: &'static str, fields: &[String]) -> TokenResult<ProgressState> {
    expect_fields(schema, fields, 3)?;
    let index: usize = parse_field("rank", &fields[1])?;
    let rank = ChallengeRank::from_index(index).ok_or_else(|| TokenError::InvalidField {
        field: "rank",
        value: fields[1].clone(),
    })?;
    Ok(ProgressState {
        title: fields[0].clone(),
        rank,
        ticks: parse_field("ticks", &fields[2])?,
    })
}

/// Declares a schema carrying a full progress track.
macro_rules! progress_schema {
    ($(#[$doc:meta])* $schema:ident, $name:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $schema;

        impl TokenSchema for $schema {
            type Value = ProgressState;
            const NAME: &'static str = $name;

            fn encode(value: &Self::Value) -> Vec<String> {
                encode_progress(value)
            }

            fn decode(fields: &[String]) -> TokenResult<Self::Value> {
                decode_progress(Self::NAME, fields)
            }
        }
    };
}

progress_schema!(
    /// Set a progress track to a new tick count.
    ProgressSet, "progress_set"
);
progress_schema!(
    /// Open the edit modal of a progress track.
    ProgressOpenEdit, "progress_open_edit"
);
progress_schema!(
    /// Submit the edit modal of a progress track.
    ProgressEdit, "progress_edit"
);

/// Shorten a progress title so every progress token built from it fits
/// within `limit` characters.
pub fn fit_progress_title(title: &str, limit: usize) -> &str {
    let widest = ProgressState {
        title: String::new(),
        rank: ChallengeRank::Troublesome,
        ticks: MAX_TICKS,
    };
    let overhead = [
        encode_token::<ProgressSet>(&widest).len(),
        encode_token::<ProgressOpenEdit>(&widest).len(),
        encode_token::<ProgressEdit>(&widest).len(),
    ]
    .into_iter()
    .max()
    .unwrap_or_default();
    truncate_to_budget(title, limit.saturating_sub(overhead))
}

/// Names of every schema, for uniqueness checks.
pub const ALL_NAMES: [&str; 13] = [
    OracleNew::NAME,
    OracleNudge::NAME,
    OracleReroll::NAME,
    MoveRoll::NAME,
    MoveRollSelect::NAME,
    MoveOracleRoll::NAME,
    MoveOracleSelect::NAME,
    TruthsOpenEdit::NAME,
    TruthsEdit::NAME,
    TruthsReroll::NAME,
    ProgressSet::NAME,
    ProgressOpenEdit::NAME,
    ProgressEdit::NAME,
];
