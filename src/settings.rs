//! Player presentation preferences
//!
//! Unlike [`crate::Tuning`], settings only change how much is drawn, never
//! the rewards. The host picks a quality preset and optional JSON overrides
//! once at startup; they are not persisted.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;
use crate::tuning::overlay_json;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    /// Half the particle budget, no hearts or callouts
    Low,
    #[default]
    Standard,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Standard => "Standard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "standard" | "std" | "high" => Some(QualityPreset::Standard),
            _ => None,
        }
    }

    /// Particle budget for this preset given the tuned hard cap
    pub fn max_particles(&self, cap: usize) -> usize {
        match self {
            QualityPreset::Low => cap / 2,
            QualityPreset::Standard => cap,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Sprite shake and tilt at high intensity
    pub screen_shake: bool,
    /// Tap particle bursts
    pub particles: bool,
    /// Hearts and comic callouts
    pub decorations: bool,
    /// Reduced motion (no shake, no tilt)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Standard,
            screen_shake: true,
            particles: true,
            decorations: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Resolve a quality preset by name, then apply optional JSON overrides
    pub fn load(quality: Option<&str>, overrides: Option<&str>) -> Result<Self, TuningError> {
        let preset = match quality {
            Some(name) => QualityPreset::from_str(name.trim())
                .ok_or_else(|| TuningError::UnknownQuality(name.to_string()))?,
            None => QualityPreset::default(),
        };
        let settings = Self::from_preset(preset);
        match overrides {
            Some(json) if !json.trim().is_empty() => overlay_json(&settings, json),
            _ => Ok(settings),
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Hearts and callouts enabled
    pub fn effective_decorations(&self) -> bool {
        self.decorations && self.quality != QualityPreset::Low
    }

    /// Effective particle count cap
    pub fn max_particles(&self, cap: usize) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles(cap)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_full_cap() {
        let settings = Settings::default();
        assert_eq!(settings.max_particles(35), 35);
        assert!(settings.effective_screen_shake());
        assert!(settings.effective_decorations());
    }

    #[test]
    fn test_low_quality_trims_effects() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert_eq!(settings.max_particles(35), 17);
        assert!(!settings.effective_decorations());
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_particles_off_means_zero_cap() {
        let settings = Settings {
            particles: false,
            ..Settings::default()
        };
        assert_eq!(settings.max_particles(35), 0);
    }

    #[test]
    fn test_load_quality_and_overrides() {
        let settings = Settings::load(Some("low"), None).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert_eq!(settings.max_particles(35), 17);

        let settings =
            Settings::load(None, Some(r#"{"particles": false, "screen_shake": false}"#)).unwrap();
        assert_eq!(settings.quality, QualityPreset::Standard);
        assert_eq!(settings.max_particles(35), 0);
        assert!(!settings.effective_screen_shake());
        assert!(settings.effective_decorations());

        let settings = Settings::load(Some("Low"), Some(r#"{"decorations": true}"#)).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(!settings.effective_decorations());
    }

    #[test]
    fn test_load_rejects_bad_input() {
        assert!(matches!(
            Settings::load(Some("ultra"), None),
            Err(TuningError::UnknownQuality(_))
        ));
        assert!(matches!(
            Settings::load(None, Some(r#"{"sparkles": true}"#)),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Settings::load(None, Some("true")),
            Err(TuningError::NotAnObject)
        ));
        assert_eq!(Settings::load(None, Some(" ")).unwrap(), Settings::default());
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!(QualityPreset::from_str("LOW"), Some(QualityPreset::Low));
        assert_eq!(QualityPreset::from_str("high"), Some(QualityPreset::Standard));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }
}
