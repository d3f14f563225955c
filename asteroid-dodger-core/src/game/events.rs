//! Game Events
//!
//! Everything noteworthy the tick did, in the order it happened.
//! Front ends turn these into explosions, sounds and screen shake; the
//! simulation itself never reads them back.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::game::boss::BossPattern;
use crate::game::powerup::PowerUpKind;
use crate::game::ship::DamageOutcome;

/// What removed an asteroid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestroyCause {
    Laser,
    /// Rammed by the ship; no points
    Ship,
    Nuke,
}

/// What hit the ship.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum HitSource {
    Asteroid { radius: f32 },
    Boss,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ship fired one or more bolts
    LaserFired {
        origin: Vec2,
        count: u8,
    },

    /// Asteroid removed
    AsteroidDestroyed {
        position: Vec2,
        radius: f32,
        /// Points awarded, multipliers included
        points: u32,
        cause: DestroyCause,
    },

    /// Pickup appeared
    PowerUpDropped {
        position: Vec2,
        kind: PowerUpKind,
    },

    /// Ship collected a pickup
    PowerUpCollected {
        position: Vec2,
        kind: PowerUpKind,
    },

    /// Something touched the ship
    ShipHit {
        position: Vec2,
        outcome: DamageOutcome,
        source: HitSource,
    },

    /// Boss countdown started
    BossWarning {
        frames: u32,
    },

    /// Boss entered the field
    BossSpawned {
        position: Vec2,
        pattern: BossPattern,
        health: i32,
    },

    /// Boss took damage and survived, or took the killing blow
    BossHit {
        position: Vec2,
        damage: i32,
        remaining: i32,
    },

    /// Boss destroyed
    BossDefeated {
        position: Vec2,
        points: u32,
    },

    /// Nuke went off at the ship
    NukeDetonated {
        origin: Vec2,
    },

    /// Difficulty level went up
    DifficultyRaised {
        level: f32,
    },

    /// Last life lost
    GameOver {
        score: u32,
    },
}

impl GameEvent {
    /// Create asteroid destroyed event.
    pub fn asteroid_destroyed(position: Vec2, radius: f32, points: u32, cause: DestroyCause) -> Self {
        GameEvent::AsteroidDestroyed {
            position,
            radius,
            points,
            cause,
        }
    }

    /// Create ship hit event.
    pub fn ship_hit(position: Vec2, outcome: DamageOutcome, source: HitSource) -> Self {
        GameEvent::ShipHit {
            position,
            outcome,
            source,
        }
    }

    /// Where the event happened, if it has a place.
    pub fn position(&self) -> Option<Vec2> {
        match self {
            GameEvent::LaserFired { origin, .. } | GameEvent::NukeDetonated { origin } => Some(*origin),
            GameEvent::AsteroidDestroyed { position, .. }
            | GameEvent::PowerUpDropped { position, .. }
            | GameEvent::PowerUpCollected { position, .. }
            | GameEvent::ShipHit { position, .. }
            | GameEvent::BossSpawned { position, .. }
            | GameEvent::BossHit { position, .. }
            | GameEvent::BossDefeated { position, .. } => Some(*position),
            GameEvent::BossWarning { .. }
            | GameEvent::DifficultyRaised { .. }
            | GameEvent::GameOver { .. } => None,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::LaserFired { .. } => "laser_fired",
            GameEvent::AsteroidDestroyed { .. } => "asteroid_destroyed",
            GameEvent::PowerUpDropped { .. } => "powerup_dropped",
            GameEvent::PowerUpCollected { .. } => "powerup_collected",
            GameEvent::ShipHit { .. } => "ship_hit",
            GameEvent::BossWarning { .. } => "boss_warning",
            GameEvent::BossSpawned { .. } => "boss_spawned",
            GameEvent::BossHit { .. } => "boss_hit",
            GameEvent::BossDefeated { .. } => "boss_defeated",
            GameEvent::NukeDetonated { .. } => "nuke_detonated",
            GameEvent::DifficultyRaised { .. } => "difficulty_raised",
            GameEvent::GameOver { .. } => "game_over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        let at = Vec2::new(10.0, 20.0);
        let hit = GameEvent::ship_hit(at, DamageOutcome::Damaged, HitSource::Boss);
        assert_eq!(hit.position(), Some(at));
        assert_eq!(hit.name(), "ship_hit");
        assert_eq!(GameEvent::GameOver { score: 5 }.position(), None);
    }

    #[test]
    fn test_bincode_round_trip() {
        let event = GameEvent::asteroid_destroyed(Vec2::new(1.0, 2.0), 30.0, 45, DestroyCause::Nuke);
        let bytes = bincode::serialize(&event).unwrap();
        let back: GameEvent = bincode::deserialize(&bytes).unwrap();
        assert_eq!(event, back);
    }
}
