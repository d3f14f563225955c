//! Game State Definitions
//!
//! Everything one play session owns. Entity lists are plain `Vec`s in
//! insertion order, so iteration is deterministic.

use serde::{Serialize, Deserialize};

use crate::core::constants::{
    SCREEN_WIDTH, INITIAL_ASTEROIDS, INITIAL_ASTEROID_SPACING, MAX_ASTEROIDS,
    ASTEROID_MIN_RADIUS, ASTEROID_MAX_RADIUS, ASTEROID_SPAWN_BOTTOM_MARGIN, SCREEN_HEIGHT,
};
use crate::core::hash::{StateHash, compute_state_hash};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;
use crate::game::asteroid::Asteroid;
use crate::game::boss::Boss;
use crate::game::combo::ComboTracker;
use crate::game::events::GameEvent;
use crate::game::laser::Laser;
use crate::game::powerup::{PowerUp, PowerUpKind, PowerUpTimers};
use crate::game::ship::{DamageOutcome, Ship};

/// Complete state of one play session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the session was created with
    pub seed: u64,

    /// Frames simulated so far
    pub frame: u64,

    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub lasers: Vec<Laser>,
    pub powerups: Vec<PowerUp>,
    pub boss: Option<Boss>,

    /// Frames left before the announced boss arrives
    pub boss_warning: Option<u32>,

    pub score: u32,

    /// In [1.0, 3.0], never decreases
    pub difficulty: f32,

    pub combo: ComboTracker,
    pub laser_cooldown: u32,
    pub asteroid_spawn_timer: u32,
    pub last_boss_spawn_score: u32,
    pub timers: PowerUpTimers,
    pub game_over: bool,

    /// Deterministic RNG state (hashed with the rest)
    pub rng: DeterministicRng,

    /// Events generated this tick (cleared each tick)
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session.
    pub fn new(seed: u64) -> Self {
        let mut state = Self::blank(seed, DeterministicRng::new(seed));
        state.spawn_initial_asteroids();
        state
    }

    fn blank(seed: u64, rng: DeterministicRng) -> Self {
        Self {
            seed,
            frame: 0,
            ship: Ship::new(),
            asteroids: Vec::with_capacity(MAX_ASTEROIDS),
            lasers: Vec::new(),
            powerups: Vec::new(),
            boss: None,
            boss_warning: None,
            score: 0,
            difficulty: 1.0,
            combo: ComboTracker::default(),
            laser_cooldown: 0,
            asteroid_spawn_timer: 0,
            last_boss_spawn_score: 0,
            timers: PowerUpTimers::default(),
            game_over: false,
            rng,
            pending_events: Vec::new(),
        }
    }

    /// Start over, continuing the current RNG stream.
    pub fn reset(&mut self) {
        let rng = std::mem::take(&mut self.rng);
        *self = Self::blank(self.seed, rng);
        self.spawn_initial_asteroids();
    }

    /// Opening wave: rocks lined up off the right edge, 300 apart.
    fn spawn_initial_asteroids(&mut self) {
        for i in 0..INITIAL_ASTEROIDS {
            let x = SCREEN_WIDTH + INITIAL_ASTEROID_SPACING * i as f32;
            self.spawn_asteroid(x);
        }
    }

    /// Random rock entering at `x`.
    pub(crate) fn spawn_asteroid(&mut self, x: f32) {
        let y = self
            .rng
            .next_int_range(0, SCREEN_HEIGHT as i32 - ASTEROID_SPAWN_BOTTOM_MARGIN) as f32;
        let radius = self
            .rng
            .next_int_range(ASTEROID_MIN_RADIUS, ASTEROID_MAX_RADIUS) as f32;
        let asteroid = Asteroid::spawn(&mut self.rng, Vec2::new(x, y), radius, self.difficulty, None);
        self.asteroids.push(asteroid);
    }

    /// Hit the ship, keeping the shield timer in step with the shield flag.
    pub fn damage_ship(&mut self) -> DamageOutcome {
        let outcome = self.ship.take_damage();
        if outcome == DamageOutcome::ShieldAbsorbed {
            self.timers.clear(PowerUpKind::Shield);
        }
        outcome
    }

    /// Current score multiplier.
    #[inline]
    pub fn combo_multiplier(&self) -> u32 {
        self.combo.multiplier()
    }

    #[inline]
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.timers.is_active(kind)
    }

    /// Remaining frames of a power-up.
    #[inline]
    pub fn timer(&self, kind: PowerUpKind) -> u32 {
        self.timers.get(kind)
    }

    /// A boss fight (or its warning) is in progress.
    pub fn boss_phase(&self) -> bool {
        self.boss.is_some() || self.boss_warning.is_some()
    }

    /// Compute state hash for replay verification.
    pub fn compute_hash(&self) -> Result<StateHash, bincode::Error> {
        compute_state_hash(self)
    }

    /// Take all pending events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        #[cfg(feature = "debug-tracing")]
        tracing::debug!(frame = self.frame, event = event.name(), ?event, "game event");

        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{MAX_LIVES, SHIP_START_X, SHIP_START_Y};

    #[test]
    fn test_new_session() {
        let state = GameState::new(42);

        assert_eq!(state.ship.lives, MAX_LIVES);
        assert_eq!(state.ship.x, SHIP_START_X);
        assert_eq!(state.ship.y, SHIP_START_Y);
        assert_eq!(state.score, 0);
        assert_eq!(state.difficulty, 1.0);
        assert!(state.boss.is_none());
        assert!(!state.game_over);

        assert_eq!(state.asteroids.len(), INITIAL_ASTEROIDS);
        for (i, a) in state.asteroids.iter().enumerate() {
            assert_eq!(a.position.x, 800.0 + 300.0 * i as f32);
            assert!(a.position.y >= 0.0 && a.position.y <= 500.0);
            assert!(a.radius >= 20.0 && a.radius <= 50.0);
        }
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = GameState::new(7);
        let b = GameState::new(7);
        assert_eq!(a.compute_hash().unwrap(), b.compute_hash().unwrap());

        let c = GameState::new(8);
        assert_ne!(a.compute_hash().unwrap(), c.compute_hash().unwrap());
    }

    #[test]
    fn test_reset_continues_rng() {
        let mut state = GameState::new(3);
        let first_wave: Vec<f32> = state.asteroids.iter().map(|a| a.position.y).collect();

        state.score = 1234;
        state.ship.lives = 1;
        state.reset();

        assert_eq!(state.score, 0);
        assert_eq!(state.ship.lives, MAX_LIVES);
        assert_eq!(state.seed, 3);
        assert_eq!(state.asteroids.len(), INITIAL_ASTEROIDS);

        // New wave comes from further down the stream
        let second_wave: Vec<f32> = state.asteroids.iter().map(|a| a.position.y).collect();
        assert_ne!(first_wave, second_wave);
    }

    #[test]
    fn test_shield_absorb_clears_timer() {
        let mut state = GameState::new(1);
        state.timers.activate(PowerUpKind::Shield, &mut state.ship);
        assert!(state.is_active(PowerUpKind::Shield));

        assert_eq!(state.damage_ship(), DamageOutcome::ShieldAbsorbed);
        assert!(!state.is_active(PowerUpKind::Shield));
        assert!(!state.ship.shielded);
    }

    #[test]
    fn test_events_drain() {
        let mut state = GameState::new(1);
        state.push_event(GameEvent::GameOver { score: 1 });
        assert_eq!(state.take_events().len(), 1);
        assert!(state.take_events().is_empty());
    }
}
