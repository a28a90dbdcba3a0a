//! Game state
//!
//! One explicit context owns everything the simulation mutates. It is built
//! once at startup and passed to [`super::tap`] and [`super::tick`].

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::effects::EffectPool;
use super::ledger::RewardLedger;
use super::motion::MotionState;
use crate::renderer::{self, FrameTransform};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub settings: Settings,
    pub ledger: RewardLedger,
    pub motion: MotionState,
    pub effects: EffectPool,
    /// Frames simulated so far
    pub time_ticks: u64,
    /// Latest host clock reading (ms)
    pub now_ms: f64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default(), Settings::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        Self {
            seed,
            tuning,
            settings,
            ledger: RewardLedger::new(),
            motion: MotionState::new(),
            effects: EffectPool::new(),
            time_ticks: 0,
            now_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Particle cap after presentation settings
    pub fn particle_cap(&self) -> usize {
        self.settings.max_particles(self.tuning.max_particles)
    }

    pub fn combo(&self) -> u32 {
        self.ledger.combo()
    }

    /// Sprite transform for the current frame
    pub fn frame_transform(&mut self) -> FrameTransform {
        renderer::frame_transform(&self.motion, &self.tuning, &self.settings, &mut self.rng)
    }
}
