//! Difficulty presets and game settings
//!
//! A difficulty is just a bundle of tuning numbers; the simulation reads the
//! active `DifficultyProfile` and never looks at the preset name.
//! Settings persist separately from the best score.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parse a preset name. Accepts the Portuguese names too, with or without accents.
    pub fn from_str(s: &str) -> Option<Self> {
        let folded: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'á' | 'à' | 'â' | 'ã' => 'a',
                'é' | 'ê' => 'e',
                'í' => 'i',
                'ó' | 'ô' | 'õ' => 'o',
                'ú' => 'u',
                c => c,
            })
            .collect();

        match folded.as_str() {
            "easy" | "facil" => Some(Difficulty::Easy),
            "medium" | "med" | "medio" => Some(Difficulty::Medium),
            "hard" | "dificil" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Tuning numbers for this preset
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            // Very sensitive aim, bouncy walls, no error
            Difficulty::Easy => DifficultyProfile {
                aim_factor: 3.0,
                max_force: 50.0,
                launch_error: 0.0,
                map_restitution: 0.95,
            },
            Difficulty::Medium => DifficultyProfile {
                aim_factor: 1.5,
                max_force: 35.0,
                launch_error: 0.0,
                map_restitution: 0.7,
            },
            // Sluggish aim, dead walls, up to 20% launch error
            Difficulty::Hard => DifficultyProfile {
                aim_factor: 0.5,
                max_force: 20.0,
                launch_error: 0.2,
                map_restitution: 0.4,
            },
        }
    }
}

/// Tuning record consumed by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Drag distance to aim distance multiplier
    pub aim_factor: f32,
    /// Launch speed cap (pixels/tick)
    pub max_force: f32,
    /// Launch error magnitude; 0 disables it
    pub launch_error: f32,
    /// Restitution for walls, ceiling, backboard and the ball's floor bounce
    pub map_restitution: f32,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}

impl DifficultyProfile {
    /// Reject out-of-range values. A bad profile is a data bug, so nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("aim_factor", self.aim_factor, self.aim_factor > 0.0),
            ("max_force", self.max_force, self.max_force > 0.0),
            ("launch_error", self.launch_error, self.launch_error >= 0.0),
            (
                "map_restitution",
                self.map_restitution,
                self.map_restitution > 0.0 && self.map_restitution <= 1.0,
            ),
        ];

        for (field, value, ok) in checks {
            if !ok || !value.is_finite() {
                return Err(Error::InvalidProfile { field, value });
            }
        }
        Ok(())
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Selected preset
    pub difficulty: Difficulty,
    /// Overrides the preset's numbers when present
    pub custom_profile: Option<DifficultyProfile>,
    /// Draw the predicted arc while aiming
    pub show_aim_preview: bool,
    /// Fixed seed for launch error (None = pick one at startup)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            custom_profile: None,
            show_aim_preview: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings for a preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Same settings with another preset selected
    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        Self { difficulty, ..self }
    }

    /// The profile the simulation should run with
    pub fn profile(&self) -> DifficultyProfile {
        self.custom_profile
            .unwrap_or_else(|| self.difficulty.profile())
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.profile().validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({})",
            path.as_ref().display(),
            settings.difficulty.as_str()
        );
        Ok(settings)
    }

    /// Write settings to a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "hoop_shot_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                match storage.set_item(Self::STORAGE_KEY, &json) {
                    Ok(()) => log::info!("Settings saved"),
                    Err(e) => log::warn!("Could not save settings: {:?}", e),
                }
            }
        }
    }
}
