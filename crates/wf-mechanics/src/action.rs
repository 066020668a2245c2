//! Action rolls: 1d6 + stat + bonus against two challenge dice (2d10).

use wf_core::ActionOutcome;

use crate::dice::{DicePool, Die, RandomSource};
use crate::error::MechResult;

/// The result of one action roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRoll {
    /// The action die (1d6).
    pub action_die: u32,
    /// Stat value supplied by the player.
    pub stat: i32,
    /// Additional adds or penalties.
    pub bonus: i32,
    /// `action_die + stat + bonus`.
    pub action_score: i32,
    /// The two challenge dice (2d10).
    pub challenge_dice: [u32; 2],
    /// How the score compares against the challenge dice.
    pub outcome: ActionOutcome,
    /// Both challenge dice show the same number.
    pub has_match: bool,
}

impl ActionRoll {
    /// Roll the action die and both challenge dice.
    pub fn roll(stat: i32, bonus: i32, rng: &mut dyn RandomSource) -> MechResult<Self> {
        let action_die = rng.roll_die(Die::D6);
        let challenge = DicePool::new().add(Die::D10, 2).roll(rng)?;
        Ok(Self::from_dice(action_die, stat, bonus, [challenge[0], challenge[1]]))
    }

    /// Build a result from known dice values. The score saturates
    /// instead of overflowing.
    pub fn from_dice(action_die: u32, stat: i32, bonus: i32, challenge_dice: [u32; 2]) -> Self {
        let action_score = i32::try_from(action_die)
            .unwrap_or(i32::MAX)
            .saturating_add(stat)
            .saturating_add(bonus);
        Self {
            action_die,
            stat,
            bonus,
            action_score,
            challenge_dice,
            outcome: classify(action_score, challenge_dice),
            has_match: challenge_dice[0] == challenge_dice[1],
        }
    }
}

/// Strong hit if the score beats both challenge dice, weak hit if it
/// beats one, miss otherwise. Ties do not beat a die.
pub fn classify(action_score: i32, challenge_dice: [u32; 2]) -> ActionOutcome {
    let beats = challenge_dice
        .iter()
        .filter(|&&die| i64::from(action_score) > i64::from(die))
        .count();
    match beats {
        2 => ActionOutcome::StrongHit,
        1 => ActionOutcome::WeakHit,
        _ => ActionOutcome::Miss,
    }
}
