//! # Asteroid Dodger Core
//!
//! Deterministic simulation for the Asteroid Dodger arcade game.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   ASTEROID DODGER CORE                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── constants.rs- Tuning numbers                            │
//! │  ├── vec2.rs     - 2D screen-space vector                    │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │  └── hash.rs     - State hashing for replay checks           │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── input.rs    - Input bits and recordings                 │
//! │  ├── state.rs    - Session state                             │
//! │  ├── tick.rs     - Authoritative simulation loop             │
//! │  ├── collision.rs- Collision detection                       │
//! │  ├── ship.rs, asteroid.rs, laser.rs, boss.rs, powerup.rs     │
//! │  ├── combo.rs    - Combo multiplier                          │
//! │  ├── difficulty.rs - Score milestones                        │
//! │  └── events.rs   - Events for front ends                     │
//! │                                                              │
//! │  storage/        - Flat files (non-deterministic)            │
//! │  ├── highscores.rs - Top 10 table                            │
//! │  └── settings.rs - Volume and mute                           │
//! │                                                              │
//! │  config.rs       - Environment configuration                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are deterministic:
//! - No system time or global RNG
//! - All randomness from the seeded Xorshift128+ carried in the state
//! - Entity lists are `Vec`s walked in insertion order
//!
//! Given the same seed and input stream, a session produces the same
//! events and the same state hash on every run.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod storage;
pub mod config;

// Re-export commonly used types
pub use crate::core::vec2::Vec2;
pub use crate::core::rng::DeterministicRng;
pub use crate::core::hash::StateHash;
pub use crate::game::input::{InputFrame, InputRecording};
pub use crate::game::state::GameState;
pub use crate::game::tick::{tick, replay_session, TickResult};
pub use crate::game::events::GameEvent;
pub use crate::storage::{AudioSettings, HighScoreTable, StorageError};
pub use crate::config::GameConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = crate::core::constants::FPS;
