//! Core deterministic primitives.
//!
//! Everything the simulation builds on: tuning constants, the vector type,
//! the seeded RNG and state digests.

pub mod constants;
pub mod vec2;
pub mod rng;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use rng::DeterministicRng;
pub use hash::{compute_state_hash, StateHash};
