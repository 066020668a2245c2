//! Dice pool construction and rolling.

use super::{Die, RandomSource};
use crate::error::{MechError, MechResult};

/// A collection of dice to be rolled together.
#[derive(Debug, Clone, Default)]
pub struct DicePool {
    /// The dice in this pool.
    pub dice: Vec<Die>,
}

impl DicePool {
    /// Create an empty dice pool.
    pub fn new() -> Self {
        Self { dice: Vec::new() }
    }

    /// Add `count` dice of the given type.
    pub fn add(mut self, die: Die, count: u32) -> Self {
        for _ in 0..count {
            self.dice.push(die);
        }
        self
    }

    /// Returns how many dice are in the pool.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Roll all dice in the pool, in insertion order.
    pub fn roll(&self, rng: &mut dyn RandomSource) -> MechResult<Vec<u32>> {
        if self.is_empty() {
            return Err(MechError::InvalidPool("pool has no dice".to_string()));
        }
        Ok(self.dice.iter().map(|die| rng.roll_die(*die)).collect())
    }
}
