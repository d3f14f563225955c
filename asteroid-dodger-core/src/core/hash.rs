//! State Hashing for Verification
//!
//! Provides deterministic hashing of game state for:
//! - Replay validation (same seed + same inputs => same digest)
//! - Regression checks in the headless simulator

use serde::Serialize;
use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Domain separator for full session state digests.
pub const STATE_DOMAIN: &[u8] = b"ASTEROID_DODGER_STATE_V1";

/// Domain separator for recorded input logs.
pub const INPUT_DOMAIN: &[u8] = b"ASTEROID_DODGER_INPUTS_V1";

/// Incremental hasher with a domain separator.
///
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for an input log.
    pub fn for_input_log() -> Self {
        Self::new(INPUT_DOMAIN)
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute a simple hash of arbitrary data.
pub fn hash_bytes(data: &[u8]) -> StateHash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute hash with domain separator.
pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> StateHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    hasher.finalize().into()
}

/// Digest any serializable state.
///
/// The value is encoded with bincode (fixed field order, little-endian),
/// so equal states always produce equal digests.
pub fn compute_state_hash<T: Serialize + ?Sized>(state: &T) -> Result<StateHash, bincode::Error> {
    let bytes = bincode::serialize(state)?;
    Ok(hash_with_domain(STATE_DOMAIN, &bytes))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;

    #[test]
    fn test_state_hasher_determinism() {
        let make_hash = || {
            let mut hasher = StateHasher::for_input_log();
            hasher.update_u32(100);
            hasher.update_u64(12345);
            hasher.update_u8(0b1_0001);
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(1);
            h.update_u32(2);
            h.finalize()
        };

        let hash2 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(2);
            h.update_u32(1);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_domain_separation() {
        let data = [1u8, 2, 3, 4];

        let hash1 = hash_with_domain(b"DOMAIN_A", &data);
        let hash2 = hash_with_domain(b"DOMAIN_B", &data);

        assert_ne!(hash1, hash2);
        assert_ne!(hash1, hash_bytes(&data));
    }

    #[test]
    fn test_compute_state_hash() {
        let a = vec![Vec2::new(1.0, 2.0), Vec2::new(3.5, -4.0)];
        let b = a.clone();
        let c = vec![Vec2::new(1.0, 2.0), Vec2::new(3.5, -4.5)];

        let hash_a = compute_state_hash(&a).unwrap();
        assert_eq!(hash_a, compute_state_hash(&b).unwrap());
        assert_ne!(hash_a, compute_state_hash(&c).unwrap());
    }
}
