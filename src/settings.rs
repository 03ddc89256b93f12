//! Game settings and preferences
//!
//! Persisted as JSON next to progress in the key-value store.

use serde::{Deserialize, Serialize};

use crate::consts::{PASS_THRESHOLD, QUESTIONS_PER_LEVEL};
use crate::persistence::{self, KeyValueStore};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Rules ===
    /// Correct answers needed to finish a level
    pub questions_per_level: u32,
    /// First-attempt answers needed to pass
    pub pass_threshold: u32,

    // === Timing ===
    /// Tongue reaching the bug (seconds)
    pub tongue_secs: f32,
    /// Bug disappearing before the next question (seconds)
    pub swallow_secs: f32,

    // === Accessibility ===
    /// Skip the eat animation entirely
    pub reduced_motion: bool,

    // === Debug ===
    /// Fixed RNG seed for reproducible question sequences
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            questions_per_level: QUESTIONS_PER_LEVEL,
            pass_threshold: PASS_THRESHOLD,

            tongue_secs: 0.2,
            swallow_secs: 0.3,

            reduced_motion: false,

            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "chameleon_settings";

    /// Copy with out-of-range values pulled back into range
    pub fn sanitized(&self) -> Self {
        let questions_per_level = self.questions_per_level.max(1);
        let secs = |s: f32| if s.is_finite() { s.max(0.0) } else { 0.0 };
        Self {
            questions_per_level,
            pass_threshold: self.pass_threshold.min(questions_per_level),
            tongue_secs: secs(self.tongue_secs),
            swallow_secs: secs(self.swallow_secs),
            reduced_motion: self.reduced_motion,
            seed: self.seed,
        }
    }

    /// Effective tongue duration (respects reduced_motion)
    pub fn effective_tongue_secs(&self) -> f32 {
        if self.reduced_motion { 0.0 } else { self.tongue_secs }
    }

    /// Effective swallow duration (respects reduced_motion)
    pub fn effective_swallow_secs(&self) -> f32 {
        if self.reduced_motion { 0.0 } else { self.swallow_secs }
    }

    /// Load settings, falling back to defaults when absent or unreadable
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match persistence::load_json::<Settings, _>(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings.sanitized()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> persistence::Result<()> {
        persistence::save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
