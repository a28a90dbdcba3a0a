//! Sprite presentation transform
//!
//! A pure mapping from [`MotionState`] to the transform written onto the
//! sprite wrapper each frame: breathing scale, jitter, tilt, brightness and
//! the sprite-sheet offset.

use glam::Vec2;
use rand::Rng;

use crate::consts::BASE_WRAPPER_SCALE;
use crate::settings::Settings;
use crate::sim::MotionState;
use crate::tuning::Tuning;

/// Extra wrapper scale at full intensity
pub const INTENSITY_SCALE_GAIN: f32 = 0.2;
/// Breathing amplitude at rest
pub const WAVE_BASE: f32 = 0.05;
/// Additional breathing amplitude at full intensity
pub const WAVE_INTENSITY_GAIN: f32 = 0.1;
/// Jitter and tilt are off at or below this intensity
pub const SHAKE_DEAD_ZONE: f32 = 0.1;
/// Peak-to-peak shake at full intensity (pixels)
pub const MAX_SHAKE: f32 = 10.0;
/// Peak-to-peak tilt at full intensity (degrees)
pub const ROTATION_GAIN: f32 = 15.0;
pub const BRIGHTNESS_GAIN: f32 = 0.5;
/// Above this intensity the sprite counts as active even when not moving
pub const ACTIVE_INTENSITY: f32 = 0.02;

/// Everything the host writes to the sprite in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    pub scale: f32,
    /// Jitter offset (pixels)
    pub shake: Vec2,
    /// Degrees
    pub rotation: f32,
    /// CSS brightness multiplier
    pub brightness: f32,
    pub frame_index: u32,
    /// Sprite sheet background position (pixels)
    pub background_offset: Vec2,
    /// Wrapper shows the active presentation
    pub active: bool,
}

/// Idle breathing scale plus combo-driven growth
pub fn base_scale(intensity: f32) -> f32 {
    BASE_WRAPPER_SCALE + intensity * INTENSITY_SCALE_GAIN
}

pub fn wave_amplitude(intensity: f32) -> f32 {
    WAVE_BASE + intensity * WAVE_INTENSITY_GAIN
}

/// Compute this frame's sprite transform
pub fn frame_transform<R: Rng>(
    motion: &MotionState,
    tuning: &Tuning,
    settings: &Settings,
    rng: &mut R,
) -> FrameTransform {
    let intensity = motion.intensity;
    let scale = base_scale(intensity) + motion.pulse_phase.sin() * wave_amplitude(intensity);

    let (shake, rotation) = if intensity > SHAKE_DEAD_ZONE && settings.effective_screen_shake() {
        let power = intensity * MAX_SHAKE;
        let shake = Vec2::new(
            (rng.random::<f32>() - 0.5) * power,
            (rng.random::<f32>() - 0.5) * power,
        );
        let rotation = (rng.random::<f32>() - 0.5) * intensity * ROTATION_GAIN;
        (shake, rotation)
    } else {
        (Vec2::ZERO, 0.0)
    };

    let frame_index = motion.frame_index().min(tuning.total_frames.saturating_sub(1));

    FrameTransform {
        scale,
        shake,
        rotation,
        brightness: 1.0 + intensity * BRIGHTNESS_GAIN,
        frame_index,
        background_offset: Vec2::new(-(frame_index as f32) * tuning.frame_width, 0.0),
        active: motion.velocity > 0.0 || intensity > ACTIVE_INTENSITY,
    }
}

impl FrameTransform {
    /// Wrapper `transform` property
    pub fn transform_css(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) rotate({:.2}deg) scale({:.4})",
            self.shake.x, self.shake.y, self.rotation, self.scale
        )
    }

    /// Wrapper `filter` property
    pub fn filter_css(&self) -> String {
        format!("brightness({:.3})", self.brightness)
    }

    /// Sprite `background-position` property
    pub fn background_position_css(&self) -> String {
        // Adding zero turns -0.0 into 0.0
        format!(
            "{}px {}px",
            self.background_offset.x + 0.0,
            self.background_offset.y + 0.0
        )
    }
}

/// Sprite `background-size` covering the whole sheet
pub fn sheet_size_css(tuning: &Tuning) -> String {
    format!("{}px {}px", tuning.sheet_width(), tuning.frame_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn motion(intensity: f32, frame: f32) -> MotionState {
        MotionState {
            intensity,
            current_frame: frame,
            ..MotionState::default()
        }
    }

    #[test]
    fn test_rest_pose() {
        let mut rng = Pcg32::seed_from_u64(1);
        let t = frame_transform(
            &motion(0.0, 0.0),
            &Tuning::default(),
            &Settings::default(),
            &mut rng,
        );
        assert!((t.scale - 0.6).abs() < 1e-6);
        assert_eq!(t.shake, Vec2::ZERO);
        assert_eq!(t.rotation, 0.0);
        assert_eq!(t.brightness, 1.0);
        assert!(!t.active);
        assert_eq!(t.transform_css(), "translate(0.00px, 0.00px) rotate(0.00deg) scale(0.6000)");
    }

    #[test]
    fn test_dead_zone_suppresses_jitter() {
        let mut rng = Pcg32::seed_from_u64(1);
        let t = frame_transform(
            &motion(0.1, 0.0),
            &Tuning::default(),
            &Settings::default(),
            &mut rng,
        );
        assert_eq!(t.shake, Vec2::ZERO);
        assert_eq!(t.rotation, 0.0);
        assert!(t.active);
    }

    #[test]
    fn test_jitter_bounded_by_intensity() {
        let mut rng = Pcg32::seed_from_u64(2);
        let tuning = Tuning::default();
        let settings = Settings::default();
        for _ in 0..200 {
            let t = frame_transform(&motion(0.8, 0.0), &tuning, &settings, &mut rng);
            assert!(t.shake.x.abs() <= 0.5 * 0.8 * MAX_SHAKE);
            assert!(t.shake.y.abs() <= 0.5 * 0.8 * MAX_SHAKE);
            assert!(t.rotation.abs() <= 0.5 * 0.8 * ROTATION_GAIN);
            assert!((t.brightness - 1.4).abs() < 1e-6);
        }
    }

    #[test]
    fn test_reduced_motion_holds_still() {
        let mut rng = Pcg32::seed_from_u64(3);
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let t = frame_transform(&motion(1.0, 0.0), &Tuning::default(), &settings, &mut rng);
        assert_eq!(t.shake, Vec2::ZERO);
        assert_eq!(t.rotation, 0.0);
        assert!((t.brightness - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_background_offset_tracks_frame() {
        let mut rng = Pcg32::seed_from_u64(4);
        let t = frame_transform(
            &motion(0.0, 3.7),
            &Tuning::default(),
            &Settings::default(),
            &mut rng,
        );
        assert_eq!(t.frame_index, 3);
        assert_eq!(t.background_offset, Vec2::new(-1440.0, 0.0));
        assert_eq!(t.background_position_css(), "-1440px 0px");
    }

    #[test]
    fn test_breathing_wave() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut m = motion(0.0, 0.0);
        m.pulse_phase = std::f32::consts::FRAC_PI_2;
        let t = frame_transform(&m, &Tuning::default(), &Settings::default(), &mut rng);
        assert!((t.scale - 0.65).abs() < 1e-6);
    }

    #[test]
    fn test_sheet_size_css() {
        assert_eq!(sheet_size_css(&Tuning::default()), "4320px 690px");
        assert_eq!(
            FrameTransform {
                brightness: 1.25,
                ..frame_transform(
                    &motion(0.0, 0.0),
                    &Tuning::default(),
                    &Settings::default(),
                    &mut Pcg32::seed_from_u64(6)
                )
            }
            .filter_css(),
            "brightness(1.250)"
        );
    }
}
