//! Turbo Tap - a tap-to-earn sprite game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rewards, motion, effect pool)
//! - `renderer`: Maps simulation state to presentation transforms
//! - `ui`: HUD text derived from the reward ledger
//! - `tuning`: Data-driven game balance
//! - `settings`: Player presentation preferences
//! - `platform`: Browser glue (DOM cache, effect elements)

pub mod error;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::TuningError;
pub use settings::{QualityPreset, Settings};
pub use tuning::{IntensityModel, Tuning, TuningPreset, XpFormula};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Sprite sheet frame dimensions (pixels)
    pub const FRAME_WIDTH: f32 = 480.0;
    pub const FRAME_HEIGHT: f32 = 690.0;
    /// Frames laid out horizontally in the sprite sheet
    pub const TOTAL_FRAMES: u32 = 9;
    /// Wrapper scale that fits a full frame on mobile screens
    pub const BASE_WRAPPER_SCALE: f32 = 0.6;

    /// Animation cursor advance per tick at rest (frames)
    pub const BASE_SPEED: f32 = 0.1;
    /// Velocity multiplier applied every tick
    pub const DRAG: f32 = 0.94;
    /// Velocity impulse per tap
    pub const ACCELERATION: f32 = 0.6;
    pub const MAX_VELOCITY: f32 = 4.0;
    /// Velocity below this snaps to zero
    pub const VELOCITY_EPSILON: f32 = 0.01;

    /// Hard cap on live particles
    pub const MAX_PARTICLES: usize = 35;
    /// Particles per tap before the intensity bonus
    pub const PARTICLE_BASE: usize = 4;
    /// Downward acceleration on particles (pixels/tick²)
    pub const GRAVITY: f32 = 0.8;
    /// Opacity lost per tick by each particle
    pub const PARTICLE_FADE_STEP: f32 = 0.04;
    /// Smallest accepted fade step; a particle that never fades never frees its slot
    pub const MIN_FADE_STEP: f32 = 0.001;
    /// Floating text is skipped while the effects layer holds more than this
    pub const FX_LAYER_GUARD: usize = 40;

    /// Combo resets after this long without a tap (ms)
    pub const COMBO_DECAY_MS: f64 = 2000.0;
    /// Taps per climb before the cycle model rests
    pub const CYCLE_LIMIT: u32 = 30;
    /// Cycle model rest period (ms)
    pub const REST_DURATION_MS: f64 = 3000.0;

    /// XP needed for the first level-up
    pub const STARTING_XP_TO_NEXT: u64 = 100;
}

/// Wrap a value into [0, modulus)
#[inline]
pub fn wrap(value: f32, modulus: f32) -> f32 {
    let wrapped = value.rem_euclid(modulus);
    // rem_euclid can round up to `modulus` for tiny negative inputs
    if wrapped >= modulus { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_stays_in_range() {
        assert_eq!(wrap(9.0, 9.0), 0.0);
        assert!((wrap(9.5, 9.0) - 0.5).abs() < 1e-6);
        assert!((wrap(-0.5, 9.0) - 8.5).abs() < 1e-6);
        let tiny = wrap(-1e-9, 9.0);
        assert!((0.0..9.0).contains(&tiny));
    }

    #[test]
    fn test_polar_to_cartesian() {
        let v = polar_to_cartesian(2.0, 0.0);
        assert!((v.x - 2.0).abs() < 1e-6 && v.y.abs() < 1e-6);
        let v = polar_to_cartesian(1.0, std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6 && (v.y - 1.0).abs() < 1e-6);
    }
}
