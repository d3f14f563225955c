//! Combo Tracking
//!
//! Consecutive hits inside the timeout window raise the score multiplier.

use serde::{Serialize, Deserialize};

use crate::core::constants::{COMBO_TIMEOUT, COMBO_MULTIPLIERS};

/// Multiplier for a combo count (1 when no combo is running).
#[inline]
pub fn multiplier_for(combo: u32) -> u32 {
    if combo == 0 {
        return 1;
    }
    let idx = ((combo - 1) as usize).min(COMBO_MULTIPLIERS.len() - 1);
    COMBO_MULTIPLIERS[idx]
}

/// Hit counter with a decaying timer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboTracker {
    pub count: u32,
    pub timer: u32,
}

impl ComboTracker {
    /// Count a hit and refresh the window.
    pub fn register_hit(&mut self) {
        self.count += 1;
        self.timer = COMBO_TIMEOUT;
    }

    /// One frame of decay. The combo ends when the window closes.
    pub fn tick(&mut self) {
        if self.timer > 0 {
            self.timer -= 1;
            if self.timer == 0 {
                self.count = 0;
            }
        }
    }

    /// Ship got hit.
    pub fn reset(&mut self) {
        self.count = 0;
        self.timer = 0;
    }

    #[inline]
    pub fn multiplier(&self) -> u32 {
        multiplier_for(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_multiplier_table() {
        assert_eq!(multiplier_for(0), 1);
        assert_eq!(multiplier_for(1), 1);
        assert_eq!(multiplier_for(2), 2);
        assert_eq!(multiplier_for(3), 3);
        assert_eq!(multiplier_for(4), 5);
        assert_eq!(multiplier_for(5), 8);
        assert_eq!(multiplier_for(6), 10);
        assert_eq!(multiplier_for(50), 10);
    }

    #[test]
    fn test_timeout_resets() {
        let mut combo = ComboTracker::default();
        combo.register_hit();
        combo.register_hit();
        assert_eq!(combo.multiplier(), 2);

        for _ in 0..COMBO_TIMEOUT - 1 {
            combo.tick();
        }
        assert_eq!(combo.count, 2);
        combo.tick();
        assert_eq!(combo.count, 0);
        assert_eq!(combo.multiplier(), 1);
    }

    #[test]
    fn test_hit_refreshes_window() {
        let mut combo = ComboTracker::default();
        combo.register_hit();
        for _ in 0..100 {
            combo.tick();
        }
        combo.register_hit();
        assert_eq!(combo.timer, COMBO_TIMEOUT);
        assert_eq!(combo.count, 2);

        combo.reset();
        assert_eq!(combo, ComboTracker::default());
    }

    proptest! {
        #[test]
        fn prop_multiplier_bounded(combo in any::<u32>()) {
            let m = multiplier_for(combo);
            prop_assert!((1..=10).contains(&m));
        }
    }
}
