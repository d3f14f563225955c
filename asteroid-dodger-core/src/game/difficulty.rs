//! Difficulty Scaling
//!
//! Difficulty follows score milestones: each milestone reached adds 0.1 to
//! the level, capped at 3.0. The level drives asteroid speed, spawn rate
//! and boss health.

use serde::{Serialize, Deserialize};

use crate::core::constants::{
    SCORE_MILESTONES, DIFFICULTY_STEP, MAX_DIFFICULTY,
    ASTEROID_SPAWN_FREQUENCY, ASTEROID_MIN_SPAWN_INTERVAL,
    THEME_BLUE_MAX, THEME_PURPLE_MAX,
};

/// Index of the highest milestone reached.
pub fn milestone_index(score: u32) -> usize {
    // Milestones are sorted, so this is the count of reached ones minus one
    SCORE_MILESTONES
        .iter()
        .rposition(|&m| score >= m)
        .unwrap_or(0)
}

/// Difficulty level for a score.
pub fn level_for_score(score: u32) -> f32 {
    // Built from whole tenths so each level is the nearest f32 to its exact value
    let steps = (1.0 / DIFFICULTY_STEP).round() as u32;
    let tenths = (steps + milestone_index(score) as u32).min(level_tenths(MAX_DIFFICULTY));
    tenths as f32 / steps as f32
}

/// Level expressed in whole tenths, so 1.2 is 12.
pub fn level_tenths(level: f32) -> u32 {
    (level * 10.0).round().max(1.0) as u32
}

/// Frames between asteroid spawns at a level, `max(30, floor(60 / level))`.
pub fn spawn_interval(level: f32) -> u32 {
    (ASTEROID_SPAWN_FREQUENCY * 10 / level_tenths(level)).max(ASTEROID_MIN_SPAWN_INTERVAL)
}

/// HUD colour band for a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTheme {
    Blue,
    Purple,
    Red,
}

impl ScoreTheme {
    pub fn for_score(score: u32) -> Self {
        if score < THEME_BLUE_MAX {
            ScoreTheme::Blue
        } else if score < THEME_PURPLE_MAX {
            ScoreTheme::Purple
        } else {
            ScoreTheme::Red
        }
    }

    /// 8-bit RGB.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            ScoreTheme::Blue => [100, 200, 255],
            ScoreTheme::Purple => [150, 100, 255],
            ScoreTheme::Red => [255, 100, 150],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_levels() {
        assert!(approx(level_for_score(0), 1.0));
        assert!(approx(level_for_score(399), 1.0));
        assert!(approx(level_for_score(400), 1.1));
        assert!(approx(level_for_score(1000), 1.2));
        assert!(approx(level_for_score(19_999), 1.8));
        assert!(approx(level_for_score(100_000), 3.0));
        assert!(approx(level_for_score(u32::MAX), 3.0));
    }

    #[test]
    fn test_spawn_interval() {
        assert_eq!(spawn_interval(1.0), 60);
        assert_eq!(spawn_interval(1.5), 40);
        assert_eq!(spawn_interval(2.5), 30);
        assert_eq!(spawn_interval(3.0), 30);
    }

    #[test]
    fn test_spawn_interval_at_each_milestone() {
        // floor(60 / level) for levels 1.0 through 1.9
        let expected = [60, 54, 50, 46, 42, 40, 37, 35, 33, 31];
        for (idx, &frames) in expected.iter().enumerate() {
            let level = level_for_score(SCORE_MILESTONES[idx]);
            assert_eq!(level_tenths(level), 10 + idx as u32);
            assert_eq!(spawn_interval(level), frames, "milestone {}", idx);
        }
        assert_eq!(spawn_interval(level_for_score(SCORE_MILESTONES[10])), 30);
    }

    #[test]
    fn test_theme() {
        assert_eq!(ScoreTheme::for_score(999), ScoreTheme::Blue);
        assert_eq!(ScoreTheme::for_score(1000), ScoreTheme::Purple);
        assert_eq!(ScoreTheme::for_score(4999), ScoreTheme::Purple);
        assert_eq!(ScoreTheme::for_score(5000), ScoreTheme::Red);
    }

    proptest! {
        #[test]
        fn prop_level_monotone_and_capped(a in 0u32..200_000, b in 0u32..200_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(level_for_score(lo) <= level_for_score(hi));
            prop_assert!(level_for_score(hi) <= MAX_DIFFICULTY);
            prop_assert!(level_for_score(lo) >= 1.0);
        }
    }
}
