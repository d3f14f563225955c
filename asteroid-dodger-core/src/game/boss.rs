//! Boss Encounters
//!
//! A boss anchors on the right side of the playfield and traces one of
//! five parametric paths until its health runs out. It never leaves the
//! screen on its own.

use serde::{Serialize, Deserialize};

use crate::core::constants::{
    BOSS_RADIUS, BOSS_HEALTH, BOSS_POINTS, BOSS_ANCHOR_X, BOSS_ANCHOR_Y,
    SCREEN_WIDTH, SCREEN_HEIGHT,
};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;
use crate::game::difficulty::level_tenths;

/// Motion path of a boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPattern {
    Sine,
    Circle,
    Figure8,
    Zigzag,
    Spiral,
}

impl BossPattern {
    pub const ALL: [BossPattern; 5] = [
        BossPattern::Sine,
        BossPattern::Circle,
        BossPattern::Figure8,
        BossPattern::Zigzag,
        BossPattern::Spiral,
    ];

    /// Uniform pick.
    pub fn random(rng: &mut DeterministicRng) -> Self {
        *rng.choose(&Self::ALL).unwrap_or(&BossPattern::Sine)
    }

    /// Unclamped offset from the anchor at frame `t`.
    pub fn offset(self, frame: u32) -> Vec2 {
        let t = frame as f32;
        match self {
            BossPattern::Sine => Vec2::new(80.0 * (t * 0.01).cos(), 150.0 * (t * 0.02).sin()),
            BossPattern::Circle => Vec2::new(120.0 * (t * 0.03).cos(), 120.0 * (t * 0.03).sin()),
            BossPattern::Figure8 => Vec2::new(
                100.0 * (t * 0.02).cos(),
                100.0 * (t * 0.04).sin() * (t * 0.02).cos(),
            ),
            BossPattern::Zigzag => {
                const PERIOD: u32 = 40;
                let direction = if (frame / PERIOD) % 2 == 0 { 1.0 } else { -1.0 };
                let progress = (frame % PERIOD) as f32 / PERIOD as f32;
                Vec2::new(0.0, 120.0 * direction * progress)
            }
            BossPattern::Spiral => {
                let radius = 80.0 + 40.0 * (t * 0.01).sin();
                let angle = t * 0.05;
                Vec2::new(radius * angle.cos(), radius * angle.sin())
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BossPattern::Sine => "sine",
            BossPattern::Circle => "circle",
            BossPattern::Figure8 => "figure8",
            BossPattern::Zigzag => "zigzag",
            BossPattern::Spiral => "spiral",
        }
    }
}

/// The boss enemy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub anchor: Vec2,
    pub position: Vec2,
    pub radius: f32,
    pub max_health: i32,
    pub health: i32,
    pub points: u32,
    pub pattern: BossPattern,
    /// Frames alive
    pub time: u32,
    /// Rotation of the orbiting details (degrees)
    pub detail_angle: f32,
    /// Glow pulse phase (degrees, 0..360)
    pub glow_phase: f32,
}

impl Boss {
    /// Spawn at the anchor with health scaled by difficulty.
    pub fn new(pattern: BossPattern, difficulty: f32) -> Self {
        let anchor = Vec2::new(BOSS_ANCHOR_X, BOSS_ANCHOR_Y);
        let max_health = (BOSS_HEALTH as u32 * level_tenths(difficulty) / 10) as i32;
        Self {
            anchor,
            position: anchor,
            radius: BOSS_RADIUS,
            max_health,
            health: max_health,
            points: BOSS_POINTS,
            pattern,
            time: 0,
            detail_angle: 0.0,
            glow_phase: 0.0,
        }
    }

    pub fn update(&mut self) {
        self.time += 1;
        self.detail_angle += 1.0;
        self.glow_phase = (self.glow_phase + 5.0) % 360.0;

        let r = self.radius;
        let target = self.anchor + self.pattern.offset(self.time);
        self.position = target.clamp(
            Vec2::new(r, r),
            Vec2::new(SCREEN_WIDTH - r, SCREEN_HEIGHT - r),
        );
    }

    /// Apply damage. Returns true when the boss is defeated.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.health -= damage;
        self.is_defeated()
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Remaining health as a fraction for the health bar.
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::difficulty::level_for_score;

    #[test]
    fn test_health_scales_with_difficulty() {
        assert_eq!(Boss::new(BossPattern::Sine, 1.0).max_health, 15);
        assert_eq!(Boss::new(BossPattern::Sine, 1.5).max_health, 22);
        assert_eq!(Boss::new(BossPattern::Sine, 3.0).max_health, 45);
        assert_eq!(Boss::new(BossPattern::Sine, level_for_score(3500)).max_health, 21);
        assert_eq!(Boss::new(BossPattern::Sine, level_for_score(2000)).max_health, 19);
    }

    #[test]
    fn test_take_damage() {
        let mut boss = Boss::new(BossPattern::Circle, 1.0);
        assert!(!boss.take_damage(14));
        assert_eq!(boss.health, 1);
        assert!(boss.take_damage(2));
        assert_eq!(boss.health_fraction(), 0.0);
    }

    #[test]
    fn test_stays_on_screen() {
        for pattern in BossPattern::ALL {
            let mut boss = Boss::new(pattern, 1.0);
            for _ in 0..2000 {
                boss.update();
                let p = boss.position;
                assert!(p.x >= boss.radius && p.x <= SCREEN_WIDTH - boss.radius, "{:?} {:?}", pattern, p);
                assert!(p.y >= boss.radius && p.y <= SCREEN_HEIGHT - boss.radius, "{:?} {:?}", pattern, p);
            }
        }
    }

    #[test]
    fn test_sine_clamped_at_anchor_right() {
        let mut boss = Boss::new(BossPattern::Sine, 1.0);
        boss.update();
        // 650 + 80·cos(0.01) exceeds 720, so x is clamped
        assert_eq!(boss.position.x, SCREEN_WIDTH - BOSS_RADIUS);
    }

    #[test]
    fn test_zigzag_shape() {
        assert_eq!(BossPattern::Zigzag.offset(20), Vec2::new(0.0, 60.0));
        assert_eq!(BossPattern::Zigzag.offset(60), Vec2::new(0.0, -60.0));
        assert_eq!(BossPattern::Zigzag.offset(80), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_phases_advance() {
        let mut boss = Boss::new(BossPattern::Spiral, 1.0);
        for _ in 0..73 {
            boss.update();
        }
        assert_eq!(boss.time, 73);
        assert_eq!(boss.detail_angle, 73.0);
        assert_eq!(boss.glow_phase, 5.0);
    }
}
