//! Dice types and the random source.
//!
//! Every draw in the engine goes through [`RandomSource`], which is
//! passed explicitly as `&mut dyn RandomSource`. [`Dice`] is the real
//! generator; [`FixedRolls`] replays scripted values.

pub mod pool;

pub use pool::DicePool;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use wf_core::Row;

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Six-sided die (the action die).
    D6,
    /// Ten-sided die (a challenge die).
    D10,
    /// Percentile die (1-100), used for oracle tables.
    D100,
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D6 => 6,
            Self::D10 => 10,
            Self::D100 => 100,
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// Uniform integer generation over inclusive bounds.
pub trait RandomSource {
    /// A uniformly distributed integer in `min..=max`.
    fn uniform_int(&mut self, min: u32, max: u32) -> u32;

    /// A value inside a row's range, with missing bounds defaulting to 1 and 100.
    fn uniform_in_range(&mut self, row: &Row) -> u32 {
        self.uniform_int(row.floor(), row.ceiling())
    }

    /// Roll a single die.
    fn roll_die(&mut self, die: Die) -> u32 {
        self.uniform_int(1, die.sides())
    }
}

/// The real random source, backed by a standard RNG.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
}

impl Dice {
    /// Dice seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Dice with a fixed seed. The same seed yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded dice when a seed is given, entropy-seeded dice otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl RandomSource for Dice {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.random_range(lo..=hi)
    }
}

/// A random source that replays a fixed list of values, cycling when
/// exhausted. Values are clamped to the requested bounds.
#[derive(Debug, Clone, Default)]
pub struct FixedRolls {
    values: Vec<u32>,
    next: usize,
}

impl FixedRolls {
    /// Replay the given values in order.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }

    /// How many values have been drawn so far.
    pub fn draws(&self) -> usize {
        self.next
    }
}

impl RandomSource for FixedRolls {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        if self.values.is_empty() {
            return lo;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_sides() {
        assert_eq!(Die::D6.sides(), 6);
        assert_eq!(Die::D10.sides(), 10);
        assert_eq!(Die::D100.sides(), 100);
    }

    #[test]
    fn die_display() {
        assert_eq!(Die::D6.to_string(), "d6");
        assert_eq!(Die::D100.to_string(), "d100");
    }

    #[test]
    fn dice_stay_in_bounds() {
        let mut dice = Dice::seeded(42);
        for _ in 0..1000 {
            let v = dice.uniform_int(3, 7);
            assert!((3..=7).contains(&v));
        }
    }

    #[test]
    fn dice_single_value_range() {
        let mut dice = Dice::seeded(1);
        assert_eq!(dice.uniform_int(5, 5), 5);
    }

    #[test]
    fn dice_deterministic_with_seed() {
        let mut a = Dice::seeded(99);
        let mut b = Dice::seeded(99);
        for _ in 0..20 {
            assert_eq!(a.uniform_int(1, 100), b.uniform_int(1, 100));
        }
    }

    #[test]
    fn uniform_in_range_defaults_bounds() {
        let row = unbounded_row();
        let mut rolls = FixedRolls::new([250]);
        assert_eq!(rolls.uniform_in_range(&row), 100);
    }

    fn unbounded_row() -> Row {
        Row {
            floor: None,
            ceiling: None,
            result: "Anything".to_string(),
            summary: None,
            oracle_rolls: None,
        }
    }

    #[test]
    fn uniform_in_range_uses_row_bounds() {
        let mut dice = Dice::seeded(7);
        let row = Row::new(40, 45, "X");
        for _ in 0..100 {
            assert!(row.contains(dice.uniform_in_range(&row)));
        }
    }

    #[test]
    fn fixed_rolls_cycle() {
        let mut rolls = FixedRolls::new([30, 75]);
        assert_eq!(rolls.uniform_int(1, 100), 30);
        assert_eq!(rolls.uniform_int(1, 100), 75);
        assert_eq!(rolls.uniform_int(1, 100), 30);
        assert_eq!(rolls.draws(), 3);
    }

    #[test]
    fn fixed_rolls_clamp_to_bounds() {
        let mut rolls = FixedRolls::new([9]);
        assert_eq!(rolls.roll_die(Die::D6), 6);
        assert_eq!(rolls.uniform_int(10, 20), 10);
    }

    #[test]
    fn empty_fixed_rolls_return_minimum() {
        let mut rolls = FixedRolls::default();
        assert_eq!(rolls.uniform_int(4, 8), 4);
    }
}
