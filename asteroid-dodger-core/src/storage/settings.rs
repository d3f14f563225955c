//! Audio settings: master volume and mute.

use std::path::Path;

use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::core::constants::VOLUME_STEP;
use super::{StorageError, content_lines, read_optional, write_file};

/// Persisted audio preferences.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// In [0.0, 1.0]
    pub volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
        }
    }
}

impl AudioSettings {
    /// Apply `key:value` lines over the defaults.
    ///
    /// Unknown keys and unparsable values are ignored.
    pub fn parse(contents: &str) -> Self {
        let mut settings = Self::default();
        for (number, line) in content_lines(contents) {
            if let Err(reason) = settings.apply_line(line) {
                let err = StorageError::InvalidLine { line: number, reason };
                warn!(error = %err, "ignoring settings line");
            }
        }
        settings
    }

    fn apply_line(&mut self, line: &str) -> Result<(), String> {
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| "missing ':' separator".to_string())?;
        let value = value.trim();

        match key.trim() {
            "volume" => {
                let volume = value
                    .parse::<f32>()
                    .map_err(|e| format!("bad volume {value:?}: {e}"))?;
                self.set_volume(volume);
            }
            "muted" => self.muted = value.eq_ignore_ascii_case("true"),
            _ => {}
        }
        Ok(())
    }

    /// Load from disk. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let settings = match read_optional(path)? {
            Some(contents) => Self::parse(&contents),
            None => Self::default(),
        };
        debug!(volume = settings.volume, muted = settings.muted, "settings loaded");
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        write_file(path, &self.to_file_string())
    }

    pub fn to_file_string(&self) -> String {
        format!("volume:{}\nmuted:{}\n", self.volume, self.muted)
    }

    /// Set the volume, clamped and rounded to one decimal.
    pub fn set_volume(&mut self, volume: f32) {
        if !volume.is_finite() {
            return;
        }
        self.volume = ((volume * 10.0).round() / 10.0).clamp(0.0, 1.0);
    }

    pub fn increase_volume(&mut self) {
        self.set_volume(self.volume + VOLUME_STEP);
    }

    pub fn decrease_volume(&mut self) {
        self.set_volume(self.volume - VOLUME_STEP);
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Volume actually applied to sounds.
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Volume as a whole percentage for display.
    pub fn percent(&self) -> u32 {
        (self.volume * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let s = AudioSettings::default();
        assert_eq!(s.volume, 1.0);
        assert!(!s.muted);
        assert_eq!(s.effective_volume(), 1.0);
    }

    #[test]
    fn test_parse() {
        let s = AudioSettings::parse("volume:0.4\nmuted:True\ncolour:blue\n");
        assert_eq!(s.volume, 0.4);
        assert!(s.muted);
        assert_eq!(s.effective_volume(), 0.0);
    }

    #[test]
    fn test_parse_bad_values_ignored() {
        let s = AudioSettings::parse("volume:loud\nmuted:yes\nnonsense\n");
        assert_eq!(s, AudioSettings::default());
    }

    #[test]
    fn test_steps_round_and_clamp() {
        let mut s = AudioSettings::default();
        s.increase_volume();
        assert_eq!(s.volume, 1.0);

        for _ in 0..3 {
            s.decrease_volume();
        }
        assert_eq!(s.volume, 0.7);
        assert_eq!(s.percent(), 70);

        for _ in 0..20 {
            s.decrease_volume();
        }
        assert_eq!(s.volume, 0.0);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.txt");

        let mut s = AudioSettings::default();
        s.set_volume(0.3);
        s.toggle_mute();
        s.save(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "volume:0.3\nmuted:true\n");
        assert_eq!(AudioSettings::load(&path).unwrap(), s);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let s = AudioSettings::load(&dir.path().join("settings.txt")).unwrap();
        assert_eq!(s, AudioSettings::default());
    }

    proptest! {
        #[test]
        fn prop_volume_stays_in_range(start in -5.0f32..5.0, steps in proptest::collection::vec(any::<bool>(), 0..40)) {
            let mut s = AudioSettings::default();
            s.set_volume(start);
            for up in steps {
                if up { s.increase_volume() } else { s.decrease_volume() }
                prop_assert!((0.0..=1.0).contains(&s.volume));
            }
        }
    }
}
