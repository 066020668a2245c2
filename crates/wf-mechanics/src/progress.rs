//! Progress tracks.
//!
//! A track has ten boxes of four ticks each. Marking progress adds a
//! number of ticks that depends on the challenge rank.

use serde::{Deserialize, Serialize};

/// Ticks in one box.
pub const TICKS_PER_BOX: u32 = 4;
/// Boxes on a track.
pub const BOXES: usize = 10;
/// A full track.
pub const MAX_TICKS: u32 = TICKS_PER_BOX * BOXES as u32;

/// How hard a challenge is, and so how fast its track fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeRank {
    /// Three boxes per mark.
    Troublesome,
    /// Two boxes per mark.
    Dangerous,
    /// One box per mark.
    Formidable,
    /// Two ticks per mark.
    Extreme,
    /// One tick per mark.
    Epic,
}

impl ChallengeRank {
    /// All ranks, easiest first.
    pub const ALL: [ChallengeRank; 5] = [
        Self::Troublesome,
        Self::Dangerous,
        Self::Formidable,
        Self::Extreme,
        Self::Epic,
    ];

    /// Ticks added or removed by one mark.
    pub fn ticks_per_mark(self) -> u32 {
        match self {
            Self::Troublesome => 12,
            Self::Dangerous => 8,
            Self::Formidable => 4,
            Self::Extreme => 2,
            Self::Epic => 1,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Troublesome => "Troublesome",
            Self::Dangerous => "Dangerous",
            Self::Formidable => "Formidable",
            Self::Extreme => "Extreme",
            Self::Epic => "Epic",
        }
    }

    /// Position in [`ChallengeRank::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Troublesome => 0,
            Self::Dangerous => 1,
            Self::Formidable => 2,
            Self::Extreme => 3,
            Self::Epic => 4,
        }
    }

    /// The rank at a position in [`ChallengeRank::ALL`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Find a rank by name. Exact matches (ignoring case) win; otherwise
    /// the first rank whose name contains the input.
    pub fn find(input: &str) -> Option<Self> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        Self::ALL
            .iter()
            .find(|r| r.name().to_lowercase() == needle)
            .or_else(|| Self::ALL.iter().find(|r| r.name().to_lowercase().contains(&needle)))
            .copied()
    }
}

impl std::fmt::Display for ChallengeRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A titled progress track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressTrack {
    /// What the track measures.
    pub title: String,
    /// Challenge rank.
    pub rank: ChallengeRank,
    ticks: u32,
}

impl ProgressTrack {
    /// Create a track, clamping `ticks` to the track.
    pub fn new(title: impl Into<String>, rank: ChallengeRank, ticks: u32) -> Self {
        Self {
            title: title.into(),
            rank,
            ticks: ticks.min(MAX_TICKS),
        }
    }

    /// Current ticks.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Tick count after one more mark.
    pub fn marked(&self) -> u32 {
        (self.ticks + self.rank.ticks_per_mark()).min(MAX_TICKS)
    }

    /// Tick count after removing one mark.
    pub fn cleared(&self) -> u32 {
        self.ticks.saturating_sub(self.rank.ticks_per_mark())
    }

    /// Mark progress once. Returns the new tick count.
    pub fn mark(&mut self) -> u32 {
        self.ticks = self.marked();
        self.ticks
    }

    /// Remove one mark of progress. Returns the new tick count.
    pub fn clear(&mut self) -> u32 {
        self.ticks = self.cleared();
        self.ticks
    }

    /// Returns true if no progress is marked.
    pub fn is_empty(&self) -> bool {
        self.ticks == 0
    }

    /// Returns true if the track is full.
    pub fn is_full(&self) -> bool {
        self.ticks >= MAX_TICKS
    }

    /// Ticks in each box, first box first.
    pub fn boxes(&self) -> [u32; BOXES] {
        let mut boxes = [0; BOXES];
        let mut remaining = self.ticks;
        for b in &mut boxes {
            *b = remaining.min(TICKS_PER_BOX);
            remaining -= *b;
        }
        boxes
    }

    /// Fully filled boxes; this is the progress score.
    pub fn filled_boxes(&self) -> u32 {
        self.ticks / TICKS_PER_BOX
    }
}

impl std::fmt::Display for ProgressTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}/{}", self.title, self.rank, self.ticks, MAX_TICKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_per_mark() {
        let ticks: Vec<u32> = ChallengeRank::ALL.iter().map(|r| r.ticks_per_mark()).collect();
        assert_eq!(ticks, vec![12, 8, 4, 2, 1]);
    }

    #[test]
    fn index_round_trip() {
        for rank in ChallengeRank::ALL {
            assert_eq!(ChallengeRank::from_index(rank.index()), Some(rank));
        }
        assert_eq!(ChallengeRank::from_index(5), None);
    }

    #[test]
    fn find_rank() {
        assert_eq!(ChallengeRank::find("epic"), Some(ChallengeRank::Epic));
        assert_eq!(ChallengeRank::find("Dangerous"), Some(ChallengeRank::Dangerous));
        assert_eq!(ChallengeRank::find("form"), Some(ChallengeRank::Formidable));
        assert_eq!(ChallengeRank::find("legendary"), None);
        assert_eq!(ChallengeRank::find(""), None);
    }

    #[test]
    fn new_clamps_ticks() {
        let track = ProgressTrack::new("Escape", ChallengeRank::Epic, 99);
        assert_eq!(track.ticks(), 40);
        assert!(track.is_full());
    }

    #[test]
    fn mark_clamps_to_max() {
        let mut track = ProgressTrack::new("Escape", ChallengeRank::Troublesome, 36);
        assert_eq!(track.mark(), 40);
        assert_eq!(track.mark(), 40);
    }

    #[test]
    fn clear_clamps_to_zero() {
        let mut track = ProgressTrack::new("Escape", ChallengeRank::Dangerous, 5);
        assert_eq!(track.clear(), 0);
        assert!(track.is_empty());
        assert_eq!(track.clear(), 0);
    }

    #[test]
    fn marked_and_cleared_do_not_mutate() {
        let track = ProgressTrack::new("Escape", ChallengeRank::Formidable, 8);
        assert_eq!(track.marked(), 12);
        assert_eq!(track.cleared(), 4);
        assert_eq!(track.ticks(), 8);
    }

    #[test]
    fn boxes_fill_in_order() {
        let track = ProgressTrack::new("Escape", ChallengeRank::Epic, 10);
        assert_eq!(track.boxes(), [4, 4, 2, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(track.filled_boxes(), 2);
    }

    #[test]
    fn display() {
        let track = ProgressTrack::new("Escape", ChallengeRank::Extreme, 6);
        assert_eq!(track.to_string(), "Escape (Extreme): 6/40");
    }
}
