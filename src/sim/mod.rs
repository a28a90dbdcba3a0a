//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host clock passed in explicitly (milliseconds)
//! - Seeded RNG only
//! - No DOM or platform dependencies

pub mod effects;
pub mod input;
pub mod ledger;
pub mod motion;
pub mod state;
pub mod tick;
pub mod timer;

pub use effects::{Effect, EffectBody, EffectKind, EffectPool};
pub use input::{PointerSignal, TapEvent};
pub use ledger::{ComboState, ComboTier, ProgressState, RewardLedger, TapReward, gold_for_combo};
pub use motion::{CyclePhase, CycleState, CycleTransition, MotionState};
pub use state::GameState;
pub use tick::{GameEvent, tap, tick};
pub use timer::Deadline;
