//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. The named presets
//! capture the shipped game variants; a host may layer a partial JSON object
//! on top of a preset once at startup. Values never change afterwards.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Replace the top-level fields of `base` named in the JSON object `json`
pub(crate) fn overlay_json<T>(base: &T, json: &str) -> Result<T, TuningError>
where
    T: Serialize + DeserializeOwned,
{
    let overrides: serde_json::Value = serde_json::from_str(json)?;
    let Some(overrides) = overrides.as_object() else {
        return Err(TuningError::NotAnObject);
    };

    let mut merged = serde_json::to_value(base)?;
    if let Some(fields) = merged.as_object_mut() {
        for (key, value) in overrides {
            fields.insert(key.clone(), value.clone());
        }
    }
    Ok(serde_json::from_value(merged)?)
}

/// How the visual intensity target is derived each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntensityModel {
    /// Target follows the combo count up to `combo_intensity_cap`
    #[default]
    Combo,
    /// Target climbs with taps to `cycle_limit`, then rests at zero
    Cycle,
}

/// XP granted per tap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum XpFormula {
    /// Always 5 XP
    Flat,
    /// 10 XP plus one per five combo
    #[default]
    ComboScaled,
}

impl XpFormula {
    /// XP awarded for a tap that brought the combo to `combo`
    pub fn xp_for(&self, combo: u32) -> u64 {
        match self {
            XpFormula::Flat => 5,
            XpFormula::ComboScaled => 10 + u64::from(combo / 5),
        }
    }
}

/// Named variants of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    /// Combo-driven intensity, scaled XP, 2 s combo window
    #[default]
    Turbo,
    /// Climb-then-rest intensity cycle
    Breathing,
    /// Flat XP and a shorter combo window
    Classic,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Turbo => "turbo",
            TuningPreset::Breathing => "breathing",
            TuningPreset::Classic => "classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "turbo" => Some(TuningPreset::Turbo),
            "breathing" | "cycle" => Some(TuningPreset::Breathing),
            "classic" => Some(TuningPreset::Classic),
            _ => None,
        }
    }
}

/// Complete set of game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    // === Sprite sheet ===
    pub frame_width: f32,
    pub frame_height: f32,
    pub total_frames: u32,

    // === Motion ===
    pub base_speed: f32,
    pub drag: f32,
    pub acceleration: f32,
    pub max_velocity: f32,
    /// Extra frames per tick at full intensity
    pub intensity_speed_gain: f32,

    // === Intensity ===
    pub intensity_model: IntensityModel,
    /// Exponential smoothing factor toward the target (0, 1]
    pub intensity_smoothing: f32,
    /// Combo at which the combo model saturates
    pub combo_intensity_cap: u32,
    pub cycle_limit: u32,
    pub rest_duration_ms: f64,

    // === Rewards ===
    pub combo_decay_ms: f64,
    pub xp_formula: XpFormula,

    // === Particles ===
    pub max_particles: usize,
    pub particle_base: usize,
    /// Extra particles per tap at full intensity
    pub particle_intensity_gain: f32,
    pub gravity: f32,
    /// Horizontal velocity multiplier per tick
    pub particle_drag: f32,
    pub particle_fade_step: f32,
    pub particle_speed_min: f32,
    pub particle_speed_max: f32,

    // === Transient effects ===
    pub fx_layer_guard: usize,
    pub floating_text_ttl_ms: f64,
    pub crit_chance: f64,
    pub heart_combo_threshold: u32,
    pub heart_chance: f64,
    pub heart_ttl_ms: f64,
    pub callout_intensity_threshold: f32,
    pub callout_chance: f64,
    pub callout_ttl_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            frame_width: FRAME_WIDTH,
            frame_height: FRAME_HEIGHT,
            total_frames: TOTAL_FRAMES,

            base_speed: BASE_SPEED,
            drag: DRAG,
            acceleration: ACCELERATION,
            max_velocity: MAX_VELOCITY,
            intensity_speed_gain: 0.2,

            intensity_model: IntensityModel::Combo,
            intensity_smoothing: 0.1,
            combo_intensity_cap: 50,
            cycle_limit: CYCLE_LIMIT,
            rest_duration_ms: REST_DURATION_MS,

            combo_decay_ms: COMBO_DECAY_MS,
            xp_formula: XpFormula::ComboScaled,

            max_particles: MAX_PARTICLES,
            particle_base: PARTICLE_BASE,
            particle_intensity_gain: 2.0,
            gravity: GRAVITY,
            particle_drag: 0.95,
            particle_fade_step: PARTICLE_FADE_STEP,
            particle_speed_min: 5.0,
            particle_speed_max: 15.0,

            fx_layer_guard: FX_LAYER_GUARD,
            floating_text_ttl_ms: 600.0,
            crit_chance: 0.1,
            heart_combo_threshold: 15,
            heart_chance: 0.3,
            heart_ttl_ms: 800.0,
            callout_intensity_threshold: 0.5,
            callout_chance: 0.3,
            callout_ttl_ms: 900.0,
        }
    }
}

impl Tuning {
    /// Constants for a named variant
    pub fn from_preset(preset: TuningPreset) -> Self {
        let base = Self::default();
        match preset {
            TuningPreset::Turbo => base,
            TuningPreset::Breathing => Self {
                intensity_model: IntensityModel::Cycle,
                intensity_smoothing: 0.05,
                floating_text_ttl_ms: 800.0,
                ..base
            },
            TuningPreset::Classic => Self {
                xp_formula: XpFormula::Flat,
                combo_decay_ms: 1500.0,
                floating_text_ttl_ms: 1000.0,
                ..base
            },
        }
    }

    /// Parse a complete tuning document (missing fields take the default preset)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Overlay a partial JSON object onto these values
    pub fn with_overrides(self, json: &str) -> Result<Self, TuningError> {
        let tuning = overlay_json(&self, json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Resolve a preset by name, then apply optional overrides
    pub fn load(preset: Option<&str>, overrides: Option<&str>) -> Result<Self, TuningError> {
        let preset = match preset {
            Some(name) => TuningPreset::from_str(name)
                .ok_or_else(|| TuningError::UnknownPreset(name.to_string()))?,
            None => TuningPreset::default(),
        };
        let tuning = Self::from_preset(preset);
        match overrides {
            Some(json) if !json.trim().is_empty() => tuning.with_overrides(json),
            _ => Ok(tuning),
        }
    }

    /// Reject constants that break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(
            name: &'static str,
            value: f64,
            ok: bool,
            safe_range: &'static str,
        ) -> Result<(), TuningError> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::UnsafeConstant {
                    name,
                    value,
                    safe_range,
                })
            }
        }

        let f = |v: f32| v as f64;
        check("frame_width", f(self.frame_width), self.frame_width > 0.0, "> 0")?;
        check("frame_height", f(self.frame_height), self.frame_height > 0.0, "> 0")?;
        check("total_frames", self.total_frames as f64, self.total_frames >= 1, ">= 1")?;
        check("base_speed", f(self.base_speed), self.base_speed >= 0.0, ">= 0")?;
        check("drag", f(self.drag), self.drag > 0.0 && self.drag < 1.0, "(0, 1)")?;
        check("acceleration", f(self.acceleration), self.acceleration >= 0.0, ">= 0")?;
        check("max_velocity", f(self.max_velocity), self.max_velocity > 0.0, "> 0")?;
        check(
            "intensity_speed_gain",
            f(self.intensity_speed_gain),
            self.intensity_speed_gain >= 0.0,
            ">= 0",
        )?;
        check(
            "intensity_smoothing",
            f(self.intensity_smoothing),
            self.intensity_smoothing > 0.0 && self.intensity_smoothing <= 1.0,
            "(0, 1]",
        )?;
        check(
            "combo_intensity_cap",
            self.combo_intensity_cap as f64,
            self.combo_intensity_cap >= 1,
            ">= 1",
        )?;
        check("cycle_limit", self.cycle_limit as f64, self.cycle_limit >= 1, ">= 1")?;
        check(
            "rest_duration_ms",
            self.rest_duration_ms,
            self.rest_duration_ms > 0.0,
            "> 0",
        )?;
        check("combo_decay_ms", self.combo_decay_ms, self.combo_decay_ms > 0.0, "> 0")?;
        check(
            "particle_base",
            self.particle_base as f64,
            self.particle_base <= self.max_particles,
            "[0, max_particles]",
        )?;
        check(
            "particle_intensity_gain",
            f(self.particle_intensity_gain),
            self.particle_intensity_gain >= 0.0
                && f(self.particle_intensity_gain) <= self.max_particles as f64,
            "[0, max_particles]",
        )?;
        check(
            "particle_drag",
            f(self.particle_drag),
            self.particle_drag >= 0.0 && self.particle_drag <= 1.0,
            "[0, 1]",
        )?;
        check(
            "particle_fade_step",
            f(self.particle_fade_step),
            self.particle_fade_step >= MIN_FADE_STEP && self.particle_fade_step <= 1.0,
            "[0.001, 1]",
        )?;
        check(
            "particle_speed_min",
            f(self.particle_speed_min),
            self.particle_speed_min >= 0.0 && self.particle_speed_min <= self.particle_speed_max,
            "[0, particle_speed_max]",
        )?;
        check(
            "particle_speed_max",
            f(self.particle_speed_max),
            self.particle_speed_max >= self.particle_speed_min,
            ">= particle_speed_min",
        )?;
        check("gravity", f(self.gravity), true, "finite")?;
        check(
            "floating_text_ttl_ms",
            self.floating_text_ttl_ms,
            self.floating_text_ttl_ms > 0.0,
            "> 0",
        )?;
        check("heart_ttl_ms", self.heart_ttl_ms, self.heart_ttl_ms > 0.0, "> 0")?;
        check("callout_ttl_ms", self.callout_ttl_ms, self.callout_ttl_ms > 0.0, "> 0")?;
        for (name, chance) in [
            ("crit_chance", self.crit_chance),
            ("heart_chance", self.heart_chance),
            ("callout_chance", self.callout_chance),
        ] {
            check(name, chance, (0.0..=1.0).contains(&chance), "[0, 1]")?;
        }
        Ok(())
    }

    /// Sprite sheet width covering every frame
    pub fn sheet_width(&self) -> f32 {
        self.frame_width * self.total_frames as f32
    }
}
