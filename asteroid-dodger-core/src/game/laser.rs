//! Lasers fired from the ship's nose.

use serde::{Serialize, Deserialize};

use crate::core::constants::{
    LASER_SPEED, LASER_TRAIL_LENGTH, SPREAD_SHOT_ANGLE, SCREEN_WIDTH, SCREEN_HEIGHT,
};
use crate::core::vec2::Vec2;

/// A laser bolt.
///
/// `position` is the top-left corner of its 20 × 6 hit box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Heading in degrees (0 = right)
    pub angle: f32,
    /// Oldest first, at most 5 entries
    pub trail: Vec<Vec2>,
}

impl Laser {
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self {
            position,
            velocity: Vec2::from_polar(LASER_SPEED, angle),
            angle,
            trail: Vec::with_capacity(LASER_TRAIL_LENGTH + 1),
        }
    }

    pub fn update(&mut self) {
        self.trail.push(self.position);
        if self.trail.len() > LASER_TRAIL_LENGTH {
            self.trail.remove(0);
        }
        self.position += self.velocity;
    }

    #[inline]
    pub fn is_off_screen(&self) -> bool {
        !self.position.is_on_screen()
    }
}

/// Lasers for one trigger pull from `origin`.
pub fn fire_pattern(origin: Vec2, spread: bool) -> Vec<Laser> {
    if spread {
        [-SPREAD_SHOT_ANGLE, 0.0, SPREAD_SHOT_ANGLE]
            .into_iter()
            .map(|angle| Laser::new(origin, angle))
            .collect()
    } else {
        vec![Laser::new(origin, 0.0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_shot() {
        let mut laser = Laser::new(Vec2::new(240.0, 300.0), 0.0);
        laser.update();
        assert_eq!(laser.position, Vec2::new(250.0, 300.0));
        assert_eq!(laser.trail, vec![Vec2::new(240.0, 300.0)]);
    }

    #[test]
    fn test_trail_capped() {
        let mut laser = Laser::new(Vec2::new(0.0, 300.0), 0.0);
        for _ in 0..20 {
            laser.update();
        }
        assert_eq!(laser.trail.len(), LASER_TRAIL_LENGTH);
        // Newest trail entry is the previous position
        assert_eq!(laser.trail[LASER_TRAIL_LENGTH - 1], Vec2::new(190.0, 300.0));
    }

    #[test]
    fn test_off_screen() {
        let mut laser = Laser::new(Vec2::new(795.0, 300.0), 0.0);
        assert!(!laser.is_off_screen());
        laser.update();
        assert!(laser.is_off_screen());

        let up = Laser::new(Vec2::new(100.0, -0.1), 0.0);
        assert!(up.is_off_screen());
    }

    #[test]
    fn test_fire_pattern() {
        let origin = Vec2::new(240.0, 300.0);
        assert_eq!(fire_pattern(origin, false).len(), 1);

        let spread = fire_pattern(origin, true);
        let angles: Vec<f32> = spread.iter().map(|l| l.angle).collect();
        assert_eq!(angles, vec![-15.0, 0.0, 15.0]);
        // Upper bolt climbs (negative y), lower bolt descends
        assert!(spread[0].velocity.y < 0.0);
        assert!(spread[2].velocity.y > 0.0);
        assert!(spread.iter().all(|l| l.position == origin));
    }
}
