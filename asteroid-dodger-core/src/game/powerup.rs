//! Power-Ups
//!
//! Pickups dropped by destroyed asteroids and bosses, and the timers of
//! the effects they grant. Timers stack up to twice one pickup's duration.

use serde::{Serialize, Deserialize};

use crate::core::constants::{
    POWERUP_DURATION, SHIELD_DURATION, POWERUP_STACK_LIMIT, POWERUP_SIZE,
    POWERUP_SPEED, POWERUP_SPAWN_CHANCE, MAGNET_PULL_SPEED,
};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;
use crate::game::ship::Ship;

// =============================================================================
// KINDS
// =============================================================================

/// Power-up type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    RapidFire,
    SpreadShot,
    DoubleDamage,
    Magnet,
    TimeSlow,
    /// Instant: clears every asteroid and hurts the boss
    Nuke,
}

/// Drop table for asteroid kills (nuke is rare).
pub const DROP_WEIGHTS: [(PowerUpKind, f32); 7] = [
    (PowerUpKind::Shield, 1.5),
    (PowerUpKind::RapidFire, 1.5),
    (PowerUpKind::SpreadShot, 1.5),
    (PowerUpKind::DoubleDamage, 1.2),
    (PowerUpKind::Magnet, 1.2),
    (PowerUpKind::TimeSlow, 1.0),
    (PowerUpKind::Nuke, 0.3),
];

impl PowerUpKind {
    /// Every kind with a timer, in HUD order.
    pub const TIMED: [PowerUpKind; 6] = [
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::SpreadShot,
        PowerUpKind::DoubleDamage,
        PowerUpKind::Magnet,
        PowerUpKind::TimeSlow,
    ];

    /// Frames granted by one pickup (0 for instant kinds).
    pub fn duration(self) -> u32 {
        match self {
            PowerUpKind::Shield => SHIELD_DURATION,
            PowerUpKind::Nuke => 0,
            _ => POWERUP_DURATION,
        }
    }

    /// Timer ceiling when stacking.
    pub fn max_timer(self) -> u32 {
        self.duration() * POWERUP_STACK_LIMIT
    }

    pub fn is_timed(self) -> bool {
        self != PowerUpKind::Nuke
    }

    /// HUD label.
    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::RapidFire => "Rapid Fire",
            PowerUpKind::SpreadShot => "Spread Shot",
            PowerUpKind::DoubleDamage => "Double Damage",
            PowerUpKind::Magnet => "Magnet",
            PowerUpKind::TimeSlow => "Time Slow",
            PowerUpKind::Nuke => "Nuke",
        }
    }

    /// Letter stamped on the pickup.
    pub fn letter(self) -> char {
        match self {
            PowerUpKind::Shield | PowerUpKind::SpreadShot => 'S',
            PowerUpKind::RapidFire => 'R',
            PowerUpKind::DoubleDamage => 'D',
            PowerUpKind::Magnet => 'M',
            PowerUpKind::TimeSlow => 'T',
            PowerUpKind::Nuke => 'N',
        }
    }

    /// Pickup colour as 8-bit RGB.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            PowerUpKind::Shield => [100, 255, 100],
            PowerUpKind::RapidFire => [255, 255, 100],
            PowerUpKind::SpreadShot => [255, 150, 255],
            PowerUpKind::DoubleDamage => [255, 100, 200],
            PowerUpKind::Magnet => [200, 100, 255],
            PowerUpKind::TimeSlow => [100, 200, 255],
            PowerUpKind::Nuke => [255, 50, 50],
        }
    }
}

/// Roll the 10 % drop for a laser kill.
pub fn roll_asteroid_drop(rng: &mut DeterministicRng) -> Option<PowerUpKind> {
    if !rng.chance(POWERUP_SPAWN_CHANCE) {
        return None;
    }
    rng.choose_weighted(&DROP_WEIGHTS).copied()
}

/// Guaranteed boss drop, uniform over the timed kinds.
pub fn roll_boss_drop(rng: &mut DeterministicRng) -> PowerUpKind {
    *rng.choose(&PowerUpKind::TIMED).unwrap_or(&PowerUpKind::Shield)
}

// =============================================================================
// TIMERS
// =============================================================================

/// Remaining frames of every timed effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpTimers {
    pub shield: u32,
    pub rapid_fire: u32,
    pub spread_shot: u32,
    pub double_damage: u32,
    pub magnet: u32,
    pub time_slow: u32,
}

impl PowerUpTimers {
    fn slot_mut(&mut self, kind: PowerUpKind) -> Option<&mut u32> {
        match kind {
            PowerUpKind::Shield => Some(&mut self.shield),
            PowerUpKind::RapidFire => Some(&mut self.rapid_fire),
            PowerUpKind::SpreadShot => Some(&mut self.spread_shot),
            PowerUpKind::DoubleDamage => Some(&mut self.double_damage),
            PowerUpKind::Magnet => Some(&mut self.magnet),
            PowerUpKind::TimeSlow => Some(&mut self.time_slow),
            PowerUpKind::Nuke => None,
        }
    }

    /// Remaining frames (0 when inactive or instant).
    pub fn get(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Shield => self.shield,
            PowerUpKind::RapidFire => self.rapid_fire,
            PowerUpKind::SpreadShot => self.spread_shot,
            PowerUpKind::DoubleDamage => self.double_damage,
            PowerUpKind::Magnet => self.magnet,
            PowerUpKind::TimeSlow => self.time_slow,
            PowerUpKind::Nuke => 0,
        }
    }

    #[inline]
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.get(kind) > 0
    }

    /// Stack one pickup's duration onto a timed effect.
    ///
    /// Returns false for instant kinds, which the caller resolves itself.
    pub fn activate(&mut self, kind: PowerUpKind, ship: &mut Ship) -> bool {
        let Some(slot) = self.slot_mut(kind) else {
            return false;
        };
        *slot = (*slot + kind.duration()).min(kind.max_timer());

        if kind == PowerUpKind::Shield {
            ship.shielded = true;
        }
        true
    }

    /// Drop an effect immediately.
    pub fn clear(&mut self, kind: PowerUpKind) {
        if let Some(slot) = self.slot_mut(kind) {
            *slot = 0;
        }
    }

    /// One frame of countdown. The ship loses its shield when that timer ends.
    pub fn tick(&mut self, ship: &mut Ship) {
        for kind in PowerUpKind::TIMED {
            if let Some(slot) = self.slot_mut(kind) {
                *slot = slot.saturating_sub(1);
            }
        }

        if self.shield == 0 {
            ship.shielded = false;
        }
    }
}

// =============================================================================
// PICKUPS
// =============================================================================

/// A collectible drifting left across the playfield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub position: Vec2,
    pub kind: PowerUpKind,
    pub size: f32,
}

impl PowerUp {
    pub fn new(position: Vec2, kind: PowerUpKind) -> Self {
        Self {
            position,
            kind,
            size: POWERUP_SIZE,
        }
    }

    /// Drift left; under magnet also slide towards `attractor`.
    pub fn update(&mut self, attractor: Option<Vec2>) {
        self.position.x -= POWERUP_SPEED;

        if let Some(target) = attractor {
            let pull = (target - self.position).normalize();
            self.position += pull * MAGNET_PULL_SPEED;
        }
    }

    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.position.x < -self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_activate_stacks_and_caps() {
        let mut timers = PowerUpTimers::default();
        let mut ship = Ship::new();

        assert!(timers.activate(PowerUpKind::RapidFire, &mut ship));
        assert_eq!(timers.rapid_fire, 420);
        timers.activate(PowerUpKind::RapidFire, &mut ship);
        assert_eq!(timers.rapid_fire, 840);
        timers.activate(PowerUpKind::RapidFire, &mut ship);
        assert_eq!(timers.rapid_fire, 840);
    }

    #[test]
    fn test_shield_raises_flag_and_expires() {
        let mut timers = PowerUpTimers::default();
        let mut ship = Ship::new();

        timers.activate(PowerUpKind::Shield, &mut ship);
        assert!(ship.shielded);
        assert_eq!(timers.shield, SHIELD_DURATION);

        for _ in 0..SHIELD_DURATION - 1 {
            timers.tick(&mut ship);
        }
        assert!(ship.shielded);
        timers.tick(&mut ship);
        assert!(!ship.shielded);
        assert!(!timers.is_active(PowerUpKind::Shield));
    }

    #[test]
    fn test_nuke_is_not_timed() {
        let mut timers = PowerUpTimers::default();
        let mut ship = Ship::new();
        assert!(!timers.activate(PowerUpKind::Nuke, &mut ship));
        assert_eq!(timers, PowerUpTimers::default());
        assert!(!timers.is_active(PowerUpKind::Nuke));
    }

    #[test]
    fn test_clear() {
        let mut timers = PowerUpTimers::default();
        let mut ship = Ship::new();
        timers.activate(PowerUpKind::Magnet, &mut ship);
        timers.clear(PowerUpKind::Magnet);
        assert_eq!(timers.get(PowerUpKind::Magnet), 0);
    }

    #[test]
    fn test_pickup_drift_and_magnet() {
        let mut p = PowerUp::new(Vec2::new(400.0, 300.0), PowerUpKind::Magnet);
        p.update(None);
        assert_eq!(p.position, Vec2::new(397.0, 300.0));

        // Ship straight below: pull is purely vertical
        p.update(Some(Vec2::new(394.0, 400.0)));
        assert_eq!(p.position, Vec2::new(394.0, 303.0));

        p.position.x = -20.0;
        assert!(!p.is_off_screen());
        p.position.x = -20.5;
        assert!(p.is_off_screen());
    }

    #[test]
    fn test_boss_drop_never_nuke() {
        let mut rng = DeterministicRng::new(11);
        for _ in 0..500 {
            assert!(roll_boss_drop(&mut rng).is_timed());
        }
    }

    #[test]
    fn test_asteroid_drop_rate() {
        let mut rng = DeterministicRng::new(12);
        let drops = (0..10_000)
            .filter(|_| roll_asteroid_drop(&mut rng).is_some())
            .count();
        // 10 % nominal
        assert!(drops > 800 && drops < 1200, "drops: {}", drops);
    }

    proptest! {
        #[test]
        fn prop_timers_never_exceed_cap(picks in proptest::collection::vec(0usize..7, 0..40), ticks in 0u32..100) {
            let mut timers = PowerUpTimers::default();
            let mut ship = Ship::new();
            for (i, pick) in picks.iter().enumerate() {
                timers.activate(DROP_WEIGHTS[*pick].0, &mut ship);
                if i as u32 % 3 == 0 {
                    for _ in 0..ticks {
                        timers.tick(&mut ship);
                    }
                }
                for kind in PowerUpKind::TIMED {
                    prop_assert!(timers.get(kind) <= kind.max_timer());
                }
            }
        }
    }
}
