//! Progress track rendering.

use wf_mechanics::ProgressTrack;
use wf_mechanics::progress::MAX_TICKS;

/// One box of the track, by number of ticks in it.
fn box_glyph(ticks: u32) -> &'static str {
    match ticks {
        0 => "[ ]",
        1 => "[/]",
        2 => "[X]",
        3 => "[*]",
        _ => "[#]",
    }
}

/// Render a progress track: title, the ten boxes, rank and tick count.
pub fn format_progress(track: &ProgressTrack) -> String {
    let boxes: Vec<&str> = track.boxes().iter().map(|&t| box_glyph(t)).collect();
    format!(
        "## {}\n{}\n-# **Rank**: {} ◇ {}/{MAX_TICKS} ticks",
        track.title,
        boxes.join(""),
        track.rank,
        track.ticks()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use wf_mechanics::ChallengeRank;

    #[test]
    fn partially_marked_track() {
        let track = ProgressTrack::new("Escape the Vault", ChallengeRank::Dangerous, 9);
        assert_snapshot!(format_progress(&track), @r"
## Escape the Vault
[#][#][/][ ][ ][ ][ ][ ][ ][ ]
-# **Rank**: Dangerous ◇ 9/40 ticks
");
    }

    #[test]
    fn full_track() {
        let track = ProgressTrack::new("Done", ChallengeRank::Epic, 40);
        assert!(format_progress(&track).contains(&"[#]".repeat(10)));
    }
}
