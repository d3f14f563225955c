//! High scores and settings kept for the life of the app.
//!
//! Storage failures are logged and play goes on.

use bevy::prelude::*;

use asteroid_dodger::{AudioSettings, GameConfig, HighScoreTable};

/// Persistent player records.
#[derive(Resource)]
pub struct Records {
    pub config: GameConfig,
    pub high_scores: HighScoreTable,
    pub settings: AudioSettings,
}

impl Records {
    /// Load both files from the data directory.
    pub fn load(config: GameConfig) -> Self {
        let high_scores = HighScoreTable::load(&config.high_score_path()).unwrap_or_else(|e| {
            warn!("Could not load high scores: {}", e);
            HighScoreTable::new()
        });
        let settings = AudioSettings::load(&config.settings_path()).unwrap_or_else(|e| {
            warn!("Could not load settings: {}", e);
            AudioSettings::default()
        });

        info!(
            "Loaded {} high scores, volume {}%{}",
            high_scores.len(),
            settings.percent(),
            if settings.muted { " (muted)" } else { "" }
        );

        Self {
            config,
            high_scores,
            settings,
        }
    }

    /// Best score and its holder for the HUD.
    pub fn best(&self) -> Option<(u32, &str)> {
        self.high_scores.best().map(|e| (e.score, e.name.as_str()))
    }

    /// Add a finished session to the table and write it out.
    pub fn submit_score(&mut self, score: u32, name: &str) -> Option<usize> {
        let rank = self.high_scores.insert(score, name);
        if let Some(rank) = rank {
            info!("New high score #{}: {} by {:?}", rank + 1, score, name);
            self.save_high_scores();
        }
        rank
    }

    pub fn save_high_scores(&self) {
        if let Err(e) = self.high_scores.save(&self.config.high_score_path()) {
            warn!("Could not save high scores: {}", e);
        }
    }

    pub fn save_settings(&self) {
        if let Err(e) = self.settings.save(&self.config.settings_path()) {
            warn!("Could not save settings: {}", e);
        }
    }
}
