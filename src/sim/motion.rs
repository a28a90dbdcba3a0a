//! Sprite motion: velocity, animation cursor and intensity
//!
//! Integration runs once per display frame and is not scaled by elapsed
//! time. Taps add a velocity impulse; the intensity signal chases a target
//! derived from the combo or from the climb/rest cycle.

use std::f32::consts::TAU;

use super::timer::Deadline;
use crate::consts::VELOCITY_EPSILON;
use crate::tuning::{IntensityModel, Tuning};
use crate::wrap;

/// Phase of the climb/rest intensity cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePhase {
    /// Taps raise the count and the intensity target
    #[default]
    Climbing,
    /// Intensity target is zero and taps do not count
    Cooling,
}

/// Transitions reported by the cycle state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleTransition {
    CooldownStarted,
    CooldownEnded,
}

/// Bounded climb-then-rest cycle
#[derive(Debug, Clone, Default)]
pub struct CycleState {
    pub count: u32,
    pub phase: CyclePhase,
    wake: Deadline,
}

impl CycleState {
    pub fn is_cooling_down(&self) -> bool {
        self.phase == CyclePhase::Cooling
    }

    /// Count a tap while climbing; starts the rest when the limit is reached
    pub fn on_tap(&mut self, now_ms: f64, tuning: &Tuning) -> Option<CycleTransition> {
        if self.phase == CyclePhase::Cooling {
            return None;
        }
        self.count = (self.count + 1).min(tuning.cycle_limit);
        if self.count >= tuning.cycle_limit {
            self.phase = CyclePhase::Cooling;
            self.wake.arm(now_ms, tuning.rest_duration_ms);
            log::debug!("Intensity cycle cooling down for {} ms", tuning.rest_duration_ms);
            return Some(CycleTransition::CooldownStarted);
        }
        None
    }

    /// End the rest once its wake-up time is reached
    pub fn poll(&mut self, now_ms: f64) -> Option<CycleTransition> {
        if self.wake.take_if_due(now_ms) {
            self.count = 0;
            self.phase = CyclePhase::Climbing;
            log::debug!("Intensity cycle rested");
            return Some(CycleTransition::CooldownEnded);
        }
        None
    }

    /// Back to an empty climb, dropping any pending wake-up
    pub fn reset(&mut self) {
        self.count = 0;
        self.phase = CyclePhase::Climbing;
        self.wake.cancel();
    }

    pub fn target(&self, cycle_limit: u32) -> f32 {
        match self.phase {
            CyclePhase::Cooling => 0.0,
            CyclePhase::Climbing => self.count as f32 / cycle_limit.max(1) as f32,
        }
    }
}

/// Per-frame motion state of the sprite
#[derive(Debug, Clone, Default)]
pub struct MotionState {
    /// Extra frames per tick from taps, in [0, max_velocity]
    pub velocity: f32,
    /// Animation cursor in [0, total_frames)
    pub current_frame: f32,
    /// Smoothed visual intensity in [0, 1]
    pub intensity: f32,
    /// Breathing wave phase, kept in [0, TAU)
    pub pulse_phase: f32,
    pub cycle: CycleState,
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Velocity kick from a tap
    pub fn impulse(&mut self, tuning: &Tuning) {
        self.velocity = (self.velocity + tuning.acceleration).min(tuning.max_velocity);
    }

    /// Full tap response: impulse plus cycle bookkeeping under the cycle model
    pub fn on_tap(&mut self, now_ms: f64, tuning: &Tuning) -> Option<CycleTransition> {
        self.impulse(tuning);
        match tuning.intensity_model {
            IntensityModel::Cycle => self.cycle.on_tap(now_ms, tuning),
            IntensityModel::Combo => None,
        }
    }

    /// Intensity the smoothing chases this tick
    pub fn target_intensity(&self, combo: u32, tuning: &Tuning) -> f32 {
        match tuning.intensity_model {
            IntensityModel::Combo => {
                let cap = tuning.combo_intensity_cap.max(1);
                combo.min(cap) as f32 / cap as f32
            }
            IntensityModel::Cycle => self.cycle.target(tuning.cycle_limit),
        }
    }

    /// Advance one display frame
    pub fn tick(&mut self, combo: u32, tuning: &Tuning) {
        self.velocity *= tuning.drag;
        if self.velocity < VELOCITY_EPSILON {
            self.velocity = 0.0;
        }

        let target = self.target_intensity(combo, tuning);
        self.intensity += (target - self.intensity) * tuning.intensity_smoothing;
        self.intensity = self.intensity.clamp(0.0, 1.0);

        let effective_speed =
            tuning.base_speed + self.velocity + self.intensity * tuning.intensity_speed_gain;
        self.current_frame = wrap(
            self.current_frame + effective_speed,
            tuning.total_frames.max(1) as f32,
        );

        let pulse_speed = 0.1 + self.intensity * 0.4;
        self.pulse_phase = wrap(self.pulse_phase + pulse_speed, TAU);
    }

    /// Poll the cooldown wake-up
    pub fn poll_cooldown(&mut self, now_ms: f64) -> Option<CycleTransition> {
        self.cycle.poll(now_ms)
    }

    /// Combo decayed: restart the climb
    pub fn on_combo_reset(&mut self) {
        self.cycle.reset();
    }

    /// Sprite sheet frame currently shown
    pub fn frame_index(&self) -> u32 {
        self.current_frame.floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TuningPreset;

    #[test]
    fn test_impulse_clamps_to_max() {
        let tuning = Tuning::default();
        let mut motion = MotionState::new();
        for _ in 0..20 {
            motion.impulse(&tuning);
        }
        assert_eq!(motion.velocity, tuning.max_velocity);
    }

    #[test]
    fn test_velocity_snaps_to_zero() {
        let tuning = Tuning::default();
        let mut motion = MotionState::new();
        motion.impulse(&tuning);
        for _ in 0..200 {
            motion.tick(0, &tuning);
        }
        assert_eq!(motion.velocity, 0.0);
    }

    #[test]
    fn test_idle_advances_at_base_speed() {
        let tuning = Tuning::default();
        let mut motion = MotionState::new();
        for _ in 0..10 {
            motion.tick(0, &tuning);
        }
        assert!((motion.current_frame - 1.0).abs() < 1e-4);
        for _ in 0..5 {
            motion.tick(0, &tuning);
        }
        assert_eq!(motion.frame_index(), 1);
    }

    #[test]
    fn test_intensity_follows_combo() {
        let tuning = Tuning::default();
        let mut motion = MotionState::new();
        assert_eq!(motion.target_intensity(25, &tuning), 0.5);
        assert_eq!(motion.target_intensity(80, &tuning), 1.0);
        motion.tick(50, &tuning);
        assert!((motion.intensity - 0.1).abs() < 1e-6);
        for _ in 0..300 {
            motion.tick(50, &tuning);
        }
        assert!(motion.intensity > 0.99);
    }

    #[test]
    fn test_cycle_climbs_then_cools() {
        let tuning = Tuning::from_preset(TuningPreset::Breathing);
        let mut motion = MotionState::new();
        for i in 0..tuning.cycle_limit - 1 {
            assert_eq!(motion.on_tap(i as f64, &tuning), None);
        }
        assert_eq!(motion.cycle.count, tuning.cycle_limit - 1);
        let started = motion.on_tap(100.0, &tuning);
        assert_eq!(started, Some(CycleTransition::CooldownStarted));
        assert!(motion.cycle.is_cooling_down());
        assert_eq!(motion.target_intensity(100, &tuning), 0.0);

        // Taps while cooling are ignored
        motion.on_tap(200.0, &tuning);
        assert_eq!(motion.cycle.count, tuning.cycle_limit);

        assert_eq!(motion.poll_cooldown(100.0 + tuning.rest_duration_ms - 1.0), None);
        assert_eq!(
            motion.poll_cooldown(100.0 + tuning.rest_duration_ms),
            Some(CycleTransition::CooldownEnded)
        );
        assert_eq!(motion.cycle.count, 0);
        assert_eq!(motion.cycle.phase, CyclePhase::Climbing);
    }

    #[test]
    fn test_combo_reset_cancels_cooldown() {
        let tuning = Tuning::from_preset(TuningPreset::Breathing);
        let mut motion = MotionState::new();
        for _ in 0..tuning.cycle_limit {
            motion.on_tap(0.0, &tuning);
        }
        assert!(motion.cycle.is_cooling_down());
        motion.on_combo_reset();
        assert!(!motion.cycle.is_cooling_down());
        assert_eq!(motion.cycle.wake.at(), None);
        assert_eq!(motion.poll_cooldown(1e9), None);
    }

    #[test]
    fn test_combo_model_ignores_cycle() {
        let tuning = Tuning::default();
        let mut motion = MotionState::new();
        for _ in 0..100 {
            assert_eq!(motion.on_tap(0.0, &tuning), None);
        }
        assert_eq!(motion.cycle.count, 0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_motion_stays_bounded(
            script in prop::collection::vec((any::<bool>(), 0u32..120), 1..400),
        ) {
            let tuning = Tuning::default();
            let mut motion = MotionState::new();
            for (tapped, combo) in script {
                if tapped {
                    motion.impulse(&tuning);
                }
                motion.tick(combo, &tuning);
                prop_assert!(motion.velocity >= 0.0);
                prop_assert!(motion.velocity <= tuning.max_velocity);
                prop_assert!(motion.current_frame >= 0.0);
                prop_assert!(motion.current_frame < tuning.total_frames as f32);
                prop_assert!((0.0..=1.0).contains(&motion.intensity));
            }
        }
    }
}
