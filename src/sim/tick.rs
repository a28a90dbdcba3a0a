//! Tap handling and per-frame simulation step
//!
//! `tap` applies one input; `tick` advances one display frame. Both first
//! fire any deadline that has passed on the host clock, so a reset is
//! observed at the same moment whether a tap or a frame arrives first.

use super::input::TapEvent;
use super::ledger::ComboTier;
use super::motion::CycleTransition;
use super::state::GameState;

/// Display and FX signals produced by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Combo counter or label changed
    ComboChanged { combo: u32, tier: ComboTier },
    /// Combo decayed to zero
    ComboReset,
    /// Gold total changed
    GoldChanged { gold: u64 },
    /// XP bar changed
    XpChanged { xp: u64, xp_to_next: u64 },
    LevelUp { level: u32 },
    /// Cycle model started resting
    CooldownStarted,
    /// Cycle model finished resting
    CooldownEnded,
}

impl From<CycleTransition> for GameEvent {
    fn from(transition: CycleTransition) -> Self {
        match transition {
            CycleTransition::CooldownStarted => GameEvent::CooldownStarted,
            CycleTransition::CooldownEnded => GameEvent::CooldownEnded,
        }
    }
}

/// Fire due combo-reset and cooldown deadlines
fn fire_deadlines(state: &mut GameState, now_ms: f64, events: &mut Vec<GameEvent>) {
    state.now_ms = state.now_ms.max(now_ms);
    if state.ledger.expire(now_ms) {
        state.motion.on_combo_reset();
        events.push(GameEvent::ComboReset);
    }
    if let Some(transition) = state.motion.poll_cooldown(now_ms) {
        events.push(transition.into());
    }
}

/// Apply a tap: rewards, motion impulse, and effects at the tap position
pub fn tap(state: &mut GameState, event: &TapEvent) -> Vec<GameEvent> {
    let now = event.time_ms;
    let mut events = Vec::new();
    fire_deadlines(state, now, &mut events);

    let reward = state.ledger.on_tap(now, &state.tuning);
    if let Some(transition) = state.motion.on_tap(now, &state.tuning) {
        events.push(transition.into());
    }

    events.push(GameEvent::ComboChanged {
        combo: reward.combo,
        tier: reward.tier,
    });
    events.push(GameEvent::GoldChanged {
        gold: state.ledger.progress.gold,
    });
    events.push(GameEvent::XpChanged {
        xp: state.ledger.progress.xp,
        xp_to_next: state.ledger.progress.xp_to_next,
    });
    if let Some(level) = reward.leveled_up {
        log::info!("Level up! Now level {}", level);
        state.effects.spawn_flash(now);
        events.push(GameEvent::LevelUp { level });
    }

    spawn_tap_effects(state, event, reward.combo);
    events
}

fn spawn_tap_effects(state: &mut GameState, event: &TapEvent, combo: u32) {
    let cap = state.particle_cap();
    let decorations = state.settings.effective_decorations();
    let intensity = state.motion.intensity;
    let now = event.time_ms;
    let GameState {
        tuning,
        effects,
        rng,
        ..
    } = state;

    effects.spawn_floating_text(event.pos, combo, now, tuning, rng);
    effects.spawn_particles(event.pos, intensity, cap, now, tuning, rng);
    if decorations {
        effects.spawn_heart(event.pos, combo, now, tuning, rng);
        effects.spawn_comic_callout(event.pos, intensity, now, tuning, rng);
    }
}

/// Advance one display frame at host time `now_ms`
pub fn tick(state: &mut GameState, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    fire_deadlines(state, now_ms, &mut events);

    state.time_ticks += 1;
    let combo = state.ledger.combo();
    state.motion.tick(combo, &state.tuning);
    state.effects.tick(now_ms, &state.tuning);

    events
}
