//! Player Ship
//!
//! Movement inside the playfield, lives, post-hit invulnerability and the
//! shield flag raised by the shield power-up.

use serde::{Serialize, Deserialize};

use crate::core::constants::{
    SHIP_WIDTH, SHIP_HEIGHT, SHIP_SPEED, SHIP_START_X, SHIP_START_Y,
    MAX_LIVES, INVULNERABILITY_FRAMES, DAMAGE_FLASH_FRAMES,
    SCREEN_WIDTH, SCREEN_HEIGHT,
};
use crate::core::vec2::Vec2;
use crate::game::input::InputFrame;

/// Result of a hit on the ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Ship was invulnerable; nothing changed
    Ignored,
    /// Shield took the hit and is gone
    ShieldAbsorbed,
    /// Lost a life, now invulnerable for a while
    Damaged,
    /// Last life lost
    Destroyed,
}

impl DamageOutcome {
    /// True when the hit ended the session.
    #[inline]
    pub fn is_fatal(self) -> bool {
        self == DamageOutcome::Destroyed
    }
}

/// The player ship.
///
/// `x` is the rear edge and `y` the vertical centre line, so the hull
/// spans `[x, x + 40]` horizontally and the nose sits at `(x + 40, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub lives: u32,
    pub invulnerable: bool,
    pub invulnerability_timer: u32,
    pub damage_flash_timer: u32,
    /// Raised by the shield power-up; its timer lives in `PowerUpTimers`
    pub shielded: bool,
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

impl Ship {
    /// Fresh ship at the start position with full lives.
    pub fn new() -> Self {
        Self {
            x: SHIP_START_X,
            y: SHIP_START_Y,
            lives: MAX_LIVES,
            invulnerable: false,
            invulnerability_timer: 0,
            damage_flash_timer: 0,
            shielded: false,
        }
    }

    /// Collision centre.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + SHIP_WIDTH / 2.0, self.y)
    }

    /// Collision radius (half the hull width).
    #[inline]
    pub fn radius(&self) -> f32 {
        SHIP_WIDTH / 2.0
    }

    /// Where lasers leave the ship.
    #[inline]
    pub fn nose(&self) -> Vec2 {
        Vec2::new(self.x + SHIP_WIDTH, self.y)
    }

    /// Red flash after losing a life.
    #[inline]
    pub fn is_flashing(&self) -> bool {
        self.damage_flash_timer > 0
    }

    /// Apply one frame of movement and tick the hit timers.
    pub fn update(&mut self, input: InputFrame) {
        if input.up() && self.y > 0.0 {
            self.y -= SHIP_SPEED;
        }
        if input.down() && self.y < SCREEN_HEIGHT - SHIP_HEIGHT {
            self.y += SHIP_SPEED;
        }
        if input.left() && self.x > 0.0 {
            self.x -= SHIP_SPEED;
        }
        if input.right() && self.x < SCREEN_WIDTH - SHIP_WIDTH {
            self.x += SHIP_SPEED;
        }

        if self.invulnerability_timer > 0 {
            self.invulnerability_timer -= 1;
            if self.invulnerability_timer == 0 {
                self.invulnerable = false;
            }
        }

        self.damage_flash_timer = self.damage_flash_timer.saturating_sub(1);
    }

    /// Resolve a hit.
    ///
    /// The caller clears the shield timer on `ShieldAbsorbed`.
    pub fn take_damage(&mut self) -> DamageOutcome {
        if self.invulnerable {
            return DamageOutcome::Ignored;
        }

        if self.shielded {
            self.shielded = false;
            return DamageOutcome::ShieldAbsorbed;
        }

        self.lives = self.lives.saturating_sub(1);
        self.damage_flash_timer = DAMAGE_FLASH_FRAMES;

        if self.lives == 0 {
            return DamageOutcome::Destroyed;
        }

        self.invulnerable = true;
        self.invulnerability_timer = INVULNERABILITY_FRAMES;
        DamageOutcome::Damaged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(flag: u8) -> InputFrame {
        InputFrame::new().with(flag)
    }

    #[test]
    fn test_moves_five_units_per_direction() {
        let mut ship = Ship::new();
        ship.update(held(InputFrame::RIGHT).with(InputFrame::UP));
        assert_eq!(ship.x, SHIP_START_X + 5.0);
        assert_eq!(ship.y, SHIP_START_Y - 5.0);
    }

    #[test]
    fn test_cannot_leave_playfield() {
        let mut ship = Ship::new();
        for _ in 0..500 {
            ship.update(held(InputFrame::UP).with(InputFrame::LEFT));
        }
        // Guard is checked before the step, so it stops exactly at the edge
        assert_eq!(ship.y, 0.0);
        assert_eq!(ship.x, 0.0);

        for _ in 0..500 {
            ship.update(held(InputFrame::DOWN).with(InputFrame::RIGHT));
        }
        assert_eq!(ship.y, SCREEN_HEIGHT - SHIP_HEIGHT);
        assert_eq!(ship.x, SCREEN_WIDTH - SHIP_WIDTH);
    }

    #[test]
    fn test_damage_sequence() {
        let mut ship = Ship::new();

        assert_eq!(ship.take_damage(), DamageOutcome::Damaged);
        assert_eq!(ship.lives, 2);
        assert!(ship.invulnerable);
        assert!(ship.is_flashing());

        // Invulnerable: ignored
        assert_eq!(ship.take_damage(), DamageOutcome::Ignored);
        assert_eq!(ship.lives, 2);

        for _ in 0..INVULNERABILITY_FRAMES {
            ship.update(InputFrame::new());
        }
        assert!(!ship.invulnerable);
        assert!(!ship.is_flashing());

        assert_eq!(ship.take_damage(), DamageOutcome::Damaged);
        for _ in 0..INVULNERABILITY_FRAMES {
            ship.update(InputFrame::new());
        }
        assert_eq!(ship.take_damage(), DamageOutcome::Destroyed);
        assert_eq!(ship.lives, 0);
        assert!(!ship.invulnerable);
    }

    #[test]
    fn test_shield_absorbs() {
        let mut ship = Ship::new();
        ship.shielded = true;

        let outcome = ship.take_damage();
        assert_eq!(outcome, DamageOutcome::ShieldAbsorbed);
        assert!(!outcome.is_fatal());
        assert!(!ship.shielded);
        assert_eq!(ship.lives, MAX_LIVES);
        assert!(!ship.invulnerable);
    }

    #[test]
    fn test_center_and_nose() {
        let ship = Ship::new();
        assert_eq!(ship.center(), Vec2::new(SHIP_START_X + 20.0, SHIP_START_Y));
        assert_eq!(ship.nose(), Vec2::new(SHIP_START_X + 40.0, SHIP_START_Y));
        assert_eq!(ship.radius(), 20.0);
    }
}
