//! Game settings and preferences
//!
//! Persisted separately from the leaderboard in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::platform::storage;

/// Zoom change per wheel unit at sensitivity 1.0
const WHEEL_ZOOM_STEP: f32 = 0.001;
const MIN_ZOOM: f32 = 0.5;
const MAX_ZOOM: f32 = 3.0;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 32,
            QualityPreset::Medium => 96,
            QualityPreset::High => 256,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (absorb bursts)
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Controls ===
    /// Scale applied to wheel zoom
    pub pointer_sensitivity: f32,

    // === Accessibility ===
    /// Reduced motion (fewer particles)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,

            pointer_sensitivity: 1.0,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "gravity_garden_settings";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle cap (respects the particles toggle and reduced motion)
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else if self.reduced_motion {
            self.quality.max_particles() / 4
        } else {
            self.quality.max_particles()
        }
    }

    /// Canvas zoom after a wheel movement, scaled by pointer sensitivity
    pub fn apply_wheel(&self, zoom: f32, wheel: f32) -> f32 {
        if !wheel.is_finite() || wheel == 0.0 {
            return zoom;
        }
        let step = wheel * WHEEL_ZOOM_STEP * self.pointer_sensitivity;
        (zoom + step).clamp(MIN_ZOOM, MAX_ZOOM)
    }

    /// Pull every field back into its valid range
    pub fn sanitize(&mut self) {
        let unit = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 };
        self.master_volume = unit(self.master_volume);
        self.sfx_volume = unit(self.sfx_volume);
        self.music_volume = unit(self.music_volume);
        self.pointer_sensitivity = if self.pointer_sensitivity.is_finite() {
            self.pointer_sensitivity.clamp(0.1, 5.0)
        } else {
            1.0
        };
    }

    /// Load settings; missing or unreadable data yields defaults
    pub fn load() -> Self {
        let stored = match storage::get(Self::STORAGE_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("Settings unavailable: {}", e);
                None
            }
        };
        let Some(json) = stored else {
            log::info!("Using default settings");
            return Self::default();
        };
        match serde_json::from_str::<Settings>(&json) {
            Ok(mut settings) => {
                settings.sanitize();
                log::info!("Loaded settings ({} quality)", settings.quality.as_str());
                settings
            }
            Err(e) => {
                log::warn!("Discarding stored settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage::set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
