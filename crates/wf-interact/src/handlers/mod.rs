//! Handlers for every interactive control, and the widgets that carry
//! those controls.

pub mod moves;
pub mod oracle;
pub mod progress;
pub mod truths;

use wf_core::{Library, Move, RollableItem, Truth};

use crate::dispatch::InteractionRegistry;
use crate::error::{InteractError, InteractResult};

pub use moves::{
    MoveOracleRollHandler, MoveOracleSelectHandler, MoveRollHandler, MoveRollSelectHandler,
    move_reply,
};
pub use oracle::{OracleNewHandler, OracleNudgeHandler, OracleRerollHandler, oracle_reply};
pub use progress::{
    ProgressEditHandler, ProgressOpenEditHandler, ProgressSetHandler, progress_reply,
};
pub use truths::{TruthsEditHandler, TruthsOpenEditHandler, TruthsRerollHandler, truth_reply};

/// A registry with every handler of this crate.
pub fn registry() -> InteractionRegistry {
    let mut registry = InteractionRegistry::new();
    registry.register(OracleNewHandler);
    registry.register(OracleNudgeHandler);
    registry.register(OracleRerollHandler);
    registry.register(MoveRollHandler);
    registry.register(MoveRollSelectHandler);
    registry.register(MoveOracleRollHandler);
    registry.register(MoveOracleSelectHandler);
    registry.register(TruthsOpenEditHandler);
    registry.register(TruthsEditHandler);
    registry.register(TruthsRerollHandler);
    registry.register(ProgressSetHandler);
    registry.register(ProgressOpenEditHandler);
    registry.register(ProgressEditHandler);
    registry
}

pub(crate) fn find_item<'a>(library: &'a Library, id: &str) -> InteractResult<&'a RollableItem> {
    library.find_item(id).ok_or_else(|| InteractError::NotFound {
        kind: "oracle",
        id: id.to_string(),
    })
}

pub(crate) fn find_move<'a>(library: &'a Library, id: &str) -> InteractResult<&'a Move> {
    library.find_move(id).ok_or_else(|| InteractError::NotFound {
        kind: "move",
        id: id.to_string(),
    })
}

pub(crate) fn find_truth<'a>(library: &'a Library, id: &str) -> InteractResult<&'a Truth> {
    library.find_truth(id).ok_or_else(|| InteractError::NotFound {
        kind: "truth",
        id: id.to_string(),
    })
}
