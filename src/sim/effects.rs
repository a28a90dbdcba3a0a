//! Transient visual effects
//!
//! One pool owns every short-lived entity in the effects layer and advances
//! them together once per frame. Particles count against a hard cap and
//! expire when they have faded out; text, hearts, callouts and the level-up
//! flash expire on a wall-clock TTL and ignore the cap. Spawning at capacity
//! is a silent no-op.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::ledger::gold_for_combo;
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// Particle colors
pub const PARTICLE_COLORS: [&str; 4] = ["#fff", "#00e5ff", "#ff0055", "#ffeb3b"];
/// Particle diameter range (pixels)
pub const PARTICLE_SIZE_MIN: f32 = 4.0;
pub const PARTICLE_SIZE_MAX: f32 = 10.0;

/// Floating text starts this far above the tap
pub const FLOAT_TEXT_OFFSET: f32 = 50.0;
/// Floating text rise over its lifetime
pub const FLOAT_TEXT_RISE: f32 = 60.0;
pub const FLOAT_TEXT_COLOR: &str = "#fff";
pub const CRIT_TEXT_COLOR: &str = "#ffeb3b";

pub const HEART_GLYPH: &str = "\u{1F496}";
pub const HEART_RISE: f32 = 100.0;
pub const HEART_GROWTH: f32 = 0.5;

pub const CALLOUT_WORDS: [&str; 5] = ["POW!", "BAM!", "WOW!", "ZAP!", "BOOM!"];
/// Max callout tilt either way (degrees)
pub const CALLOUT_TILT: f32 = 15.0;

pub const FLASH_OPACITY: f32 = 0.5;
pub const FLASH_HOLD_MS: f64 = 50.0;
pub const FLASH_FADE_MS: f64 = 500.0;

/// Effect category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Particle,
    FloatingText,
    Heart,
    ComicCallout,
    Flash,
}

/// Kind-specific payload
#[derive(Debug, Clone, PartialEq)]
pub enum EffectBody {
    Particle {
        vel: Vec2,
        size: f32,
        color: &'static str,
    },
    FloatingText {
        text: String,
        color: &'static str,
        critical: bool,
    },
    Heart,
    ComicCallout {
        word: &'static str,
        /// Degrees
        tilt: f32,
    },
    /// Full-screen level-up flash
    Flash,
}

/// A live effect entity
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub id: u32,
    /// Spawn position (screen pixels)
    pub origin: Vec2,
    /// Current position (screen pixels)
    pub pos: Vec2,
    pub opacity: f32,
    pub scale: f32,
    pub spawn_ms: f64,
    /// Wall-clock lifetime; particles expire by fading instead
    pub ttl_ms: Option<f64>,
    pub body: EffectBody,
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self.body {
            EffectBody::Particle { .. } => EffectKind::Particle,
            EffectBody::FloatingText { .. } => EffectKind::FloatingText,
            EffectBody::Heart => EffectKind::Heart,
            EffectBody::ComicCallout { .. } => EffectKind::ComicCallout,
            EffectBody::Flash => EffectKind::Flash,
        }
    }

    /// Lifetime progress in [0, 1] for timed effects
    pub fn progress(&self, now_ms: f64) -> f32 {
        match self.ttl_ms {
            Some(ttl) if ttl > 0.0 => ((now_ms - self.spawn_ms) / ttl).clamp(0.0, 1.0) as f32,
            _ => 0.0,
        }
    }

    /// Advance one frame. Returns false once the effect has expired.
    fn advance(&mut self, now_ms: f64, tuning: &Tuning) -> bool {
        let t = self.progress(now_ms);
        let eased = ease_out(t);
        match &mut self.body {
            EffectBody::Particle { vel, .. } => {
                vel.y += tuning.gravity;
                vel.x *= tuning.particle_drag;
                self.pos += *vel;
                self.opacity -= tuning.particle_fade_step;
                self.scale = self.opacity.max(0.0);
                return self.opacity > 0.0;
            }
            EffectBody::FloatingText { .. } => {
                self.pos = self.origin - Vec2::new(0.0, FLOAT_TEXT_RISE * eased);
                self.opacity = 1.0 - t;
            }
            EffectBody::Heart => {
                self.pos = self.origin - Vec2::new(0.0, HEART_RISE * eased);
                self.scale = 1.0 + HEART_GROWTH * eased;
                self.opacity = 1.0 - eased;
            }
            EffectBody::ComicCallout { .. } => {
                // Pop in over the first fifth, fade over the last two fifths
                self.scale = if t < 0.2 { 0.5 + 0.7 * (t / 0.2) } else { 1.2 };
                self.opacity = if t < 0.6 { 1.0 } else { 1.0 - (t - 0.6) / 0.4 };
            }
            EffectBody::Flash => {
                let age = now_ms - self.spawn_ms;
                self.opacity = if age < FLASH_HOLD_MS {
                    FLASH_OPACITY
                } else {
                    let fade = ((age - FLASH_HOLD_MS) / FLASH_FADE_MS).clamp(0.0, 1.0) as f32;
                    FLASH_OPACITY * (1.0 - fade)
                };
            }
        }
        match self.ttl_ms {
            Some(ttl) => now_ms - self.spawn_ms < ttl,
            None => true,
        }
    }
}

#[inline]
fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Pool of live effects
#[derive(Debug, Clone, Default)]
pub struct EffectPool {
    effects: Vec<Effect>,
    /// Live particle count; changes only on spawn and on expiry
    active_particles: usize,
    /// Ids removed since the last drain (host deletes their elements)
    despawned: Vec<u32>,
    next_id: u32,
}

impl EffectPool {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    fn push(&mut self, origin: Vec2, ttl_ms: Option<f64>, now_ms: f64, body: EffectBody) -> u32 {
        let id = self.next_id();
        self.effects.push(Effect {
            id,
            origin,
            pos: origin,
            opacity: 1.0,
            scale: 1.0,
            spawn_ms: now_ms,
            ttl_ms,
            body,
        });
        id
    }

    /// Burst of particles at `origin`, clamped to `cap`. Returns how many spawned.
    pub fn spawn_particles<R: Rng>(
        &mut self,
        origin: Vec2,
        intensity: f32,
        cap: usize,
        now_ms: f64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> usize {
        if self.active_particles >= cap {
            log::trace!("Particle cap reached ({})", cap);
            return 0;
        }
        let bonus = (intensity.clamp(0.0, 1.0) * tuning.particle_intensity_gain).floor() as usize;
        let batch = tuning
            .particle_base
            .saturating_add(bonus)
            .min(cap - self.active_particles);

        for _ in 0..batch {
            let angle = rng.random_range(0.0..TAU);
            let speed = rng.random_range(tuning.particle_speed_min..=tuning.particle_speed_max);
            let size = rng.random_range(PARTICLE_SIZE_MIN..PARTICLE_SIZE_MAX);
            let color = PARTICLE_COLORS[rng.random_range(0..PARTICLE_COLORS.len())];
            self.push(
                origin,
                None,
                now_ms,
                EffectBody::Particle {
                    vel: polar_to_cartesian(speed, angle),
                    size,
                    color,
                },
            );
            self.active_particles += 1;
        }
        batch
    }

    /// Reward popup above the tap; skipped while the effects layer is crowded
    pub fn spawn_floating_text<R: Rng>(
        &mut self,
        tap: Vec2,
        combo: u32,
        now_ms: f64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<u32> {
        if self.fx_layer_len() > tuning.fx_layer_guard {
            log::trace!("Floating text skipped, {} effects live", self.fx_layer_len());
            return None;
        }
        let value = gold_for_combo(combo);
        let critical = rng.random::<f64>() < tuning.crit_chance;
        let (text, color) = if critical {
            (format!("CRIT! +{}", value * 2), CRIT_TEXT_COLOR)
        } else {
            (format!("+{}", value), FLOAT_TEXT_COLOR)
        };
        let origin = tap - Vec2::new(0.0, FLOAT_TEXT_OFFSET);
        Some(self.push(
            origin,
            Some(tuning.floating_text_ttl_ms),
            now_ms,
            EffectBody::FloatingText {
                text,
                color,
                critical,
            },
        ))
    }

    /// Heart at a high combo, by chance
    pub fn spawn_heart<R: Rng>(
        &mut self,
        tap: Vec2,
        combo: u32,
        now_ms: f64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<u32> {
        if combo < tuning.heart_combo_threshold || rng.random::<f64>() >= tuning.heart_chance {
            return None;
        }
        Some(self.push(tap, Some(tuning.heart_ttl_ms), now_ms, EffectBody::Heart))
    }

    /// Comic word at high intensity, by chance
    pub fn spawn_comic_callout<R: Rng>(
        &mut self,
        tap: Vec2,
        intensity: f32,
        now_ms: f64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<u32> {
        if intensity < tuning.callout_intensity_threshold
            || rng.random::<f64>() >= tuning.callout_chance
        {
            return None;
        }
        let word = CALLOUT_WORDS[rng.random_range(0..CALLOUT_WORDS.len())];
        let tilt = rng.random_range(-CALLOUT_TILT..CALLOUT_TILT);
        let id = self.push(
            tap,
            Some(tuning.callout_ttl_ms),
            now_ms,
            EffectBody::ComicCallout { word, tilt },
        );
        if let Some(effect) = self.effects.last_mut() {
            effect.scale = 0.5;
        }
        Some(id)
    }

    /// Full-screen level-up flash
    pub fn spawn_flash(&mut self, now_ms: f64) -> u32 {
        let id = self.push(
            Vec2::ZERO,
            Some(FLASH_HOLD_MS + FLASH_FADE_MS),
            now_ms,
            EffectBody::Flash,
        );
        if let Some(effect) = self.effects.last_mut() {
            effect.opacity = FLASH_OPACITY;
        }
        id
    }

    /// Advance every effect one frame and drop the expired ones
    ///
    /// Removed ids queue up until [`EffectPool::drain_despawned`]; hosts
    /// drain once per frame.
    pub fn tick(&mut self, now_ms: f64, tuning: &Tuning) {
        let despawned = &mut self.despawned;
        let mut freed = 0;
        self.effects.retain_mut(|effect| {
            let alive = effect.advance(now_ms, tuning);
            if !alive {
                if effect.kind() == EffectKind::Particle {
                    freed += 1;
                }
                despawned.push(effect.id);
            }
            alive
        });
        self.active_particles -= freed;
        debug_assert_eq!(
            self.active_particles,
            self.count(EffectKind::Particle),
            "particle counter out of sync"
        );
    }

    /// Ids removed since the last call
    pub fn drain_despawned(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.despawned)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn active_particles(&self) -> usize {
        self.active_particles
    }

    /// Entities in the effects layer (the flash sits above the page instead)
    pub fn fx_layer_len(&self) -> usize {
        self.effects
            .iter()
            .filter(|e| e.kind() != EffectKind::Flash)
            .count()
    }

    pub fn count(&self, kind: EffectKind) -> usize {
        self.effects.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    proptest! {
        #[test]
        fn prop_cap_never_exceeded_and_drains(
            seed in any::<u64>(),
            cap in 0usize..60,
            script in prop::collection::vec((0u8..4, 0.0f32..=1.0), 1..200),
        ) {
            let tuning = Tuning::default();
            let mut pool = EffectPool::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut now = 0.0;
            for (spawns, intensity) in script {
                for _ in 0..spawns {
                    pool.spawn_particles(Vec2::ZERO, intensity, cap, now, &tuning, &mut rng);
                }
                prop_assert!(pool.active_particles() <= cap);
                now += 16.0;
                pool.tick(now, &tuning);
                prop_assert!(pool.active_particles() <= cap);
            }
            let max_life = (1.0 / tuning.particle_fade_step).ceil() as usize + 1;
            for _ in 0..max_life {
                now += 16.0;
                pool.tick(now, &tuning);
            }
            prop_assert_eq!(pool.active_particles(), 0);
        }
    }
}
