//! Game Logic Module
//!
//! All game simulation code. Deterministic for a given seed and input stream.
//!
//! ## Module Structure
//!
//! - `input`: Input bitflags and replay recordings
//! - `state`: Session state and entity lists
//! - `tick`: Authoritative simulation loop
//! - `ship`, `asteroid`, `laser`, `boss`, `powerup`: Entities
//! - `collision`: Collision tests
//! - `combo`, `difficulty`: Scoring rules
//! - `events`: Game events for front ends and replays

pub mod input;
pub mod state;
pub mod tick;
pub mod ship;
pub mod asteroid;
pub mod laser;
pub mod boss;
pub mod powerup;
pub mod collision;
pub mod combo;
pub mod difficulty;
pub mod events;

// Re-export key types
pub use input::{InputFrame, InputDelta, InputRecording};
pub use state::GameState;
pub use tick::{tick, replay_session, TickResult};
pub use ship::{Ship, DamageOutcome};
pub use asteroid::{Asteroid, AsteroidSize};
pub use laser::Laser;
pub use boss::{Boss, BossPattern};
pub use powerup::{PowerUp, PowerUpKind, PowerUpTimers};
pub use combo::ComboTracker;
pub use difficulty::ScoreTheme;
pub use events::{GameEvent, DestroyCause, HitSource};
