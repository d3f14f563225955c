//! Runtime configuration from the environment.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::core::constants::{HIGH_SCORE_FILE, SETTINGS_FILE};

/// Environment variable naming the data directory.
pub const DATA_DIR_VAR: &str = "ASTEROID_DODGER_DATA_DIR";
/// Environment variable naming the asset directory.
pub const ASSET_DIR_VAR: &str = "ASTEROID_DODGER_ASSET_DIR";
/// Environment variable fixing the session seed.
pub const SEED_VAR: &str = "ASTEROID_DODGER_SEED";

/// Where files live and how sessions are seeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// High scores and settings
    pub data_dir: PathBuf,
    /// Sounds
    pub asset_dir: PathBuf,
    /// Fixed seed for every session. If None, seeds come from the clock.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            asset_dir: PathBuf::from("assets"),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Invalid values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let dir = |key: &str, fallback: PathBuf| match lookup(key) {
            Some(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
            Some(_) => {
                warn!(var = key, "empty directory, using default");
                fallback
            }
            None => fallback,
        };

        let seed = lookup(SEED_VAR).and_then(|v| match v.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                warn!(var = SEED_VAR, value = %v, error = %e, "invalid seed, using clock");
                None
            }
        });

        Self {
            data_dir: dir(DATA_DIR_VAR, defaults.data_dir),
            asset_dir: dir(ASSET_DIR_VAR, defaults.asset_dir),
            seed,
        }
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.data_dir.join(HIGH_SCORE_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    pub fn sounds_dir(&self) -> PathBuf {
        self.asset_dir.join("sounds")
    }

    /// Create the data directory. Failure is logged, not fatal.
    pub fn ensure_data_dir(&self) -> bool {
        ensure_dir(&self.data_dir)
    }

    /// Seed for the next session.
    pub fn session_seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn ensure_dir(dir: &Path) -> bool {
    match std::fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "could not create data directory");
            false
        }
    }
}

/// Nanoseconds since the epoch, folded to 64 bits.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GameConfig::from_lookup(lookup(&[]));
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.high_score_path(), PathBuf::from("data").join("high_score.txt"));
        assert_eq!(config.sounds_dir(), PathBuf::from("assets").join("sounds"));
    }

    #[test]
    fn test_overrides() {
        let config = GameConfig::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/tmp/ad"),
            (ASSET_DIR_VAR, "res"),
            (SEED_VAR, " 42 "),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/ad"));
        assert_eq!(config.asset_dir, PathBuf::from("res"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.session_seed(), 42);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = GameConfig::from_lookup(lookup(&[(DATA_DIR_VAR, "  "), (SEED_VAR, "lots")]));
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_ensure_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GameConfig {
            data_dir: tmp.path().join("a").join("b"),
            ..GameConfig::default()
        };
        assert!(config.ensure_data_dir());
        assert!(config.data_dir.is_dir());
    }
}
