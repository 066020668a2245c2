//! Roll mechanics for Wayfinder.
//!
//! Provides the random source, the row index used to look up and
//! navigate table rows, the oracle roll resolution engine, action rolls
//! (1d6 + stat + bonus vs 2d10), and progress tracks.

pub mod action;
pub mod dice;
pub mod error;
pub mod progress;
pub mod resolve;
pub mod rows;

pub use action::ActionRoll;
pub use dice::{DicePool, Dice, Die, FixedRolls, RandomSource};
pub use error::{MechError, MechResult};
pub use progress::{ChallengeRank, ProgressTrack};
pub use resolve::{DEFAULT_MAX_CHAIN_DEPTH, Resolver, RollResult};
