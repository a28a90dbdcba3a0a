//! Reward ledger: combo, gold, XP and levels
//!
//! Every tap bumps the combo and re-arms its decay deadline. Gold and level
//! only ever grow; XP resets to zero on each level-up.

use super::timer::Deadline;
use crate::consts::STARTING_XP_TO_NEXT;
use crate::tuning::Tuning;

/// Combo label shown next to the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComboTier {
    Combo,
    Super,
    Hyper,
}

impl ComboTier {
    pub fn for_combo(combo: u32) -> Self {
        match combo {
            0..10 => ComboTier::Combo,
            10..30 => ComboTier::Super,
            _ => ComboTier::Hyper,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComboTier::Combo => "COMBO",
            ComboTier::Super => "SUPER!",
            ComboTier::Hyper => "HYPER!!",
        }
    }
}

/// Gold for a tap that brought the combo to `combo`: floor(1 + combo * 0.5)
#[inline]
pub fn gold_for_combo(combo: u32) -> u64 {
    1 + u64::from(combo / 2)
}

/// Live combo and its pending reset
#[derive(Debug, Clone, Default)]
pub struct ComboState {
    pub combo: u32,
    pub reset: Deadline,
}

/// Accumulated rewards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    pub gold: u64,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    /// Highest combo reached this session
    pub max_combo: u32,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            gold: 0,
            level: 1,
            xp: 0,
            xp_to_next: STARTING_XP_TO_NEXT,
            max_combo: 0,
        }
    }
}

impl ProgressState {
    /// Advance one level; leftover XP is discarded
    pub fn level_up(&mut self) {
        self.level += 1;
        self.xp = 0;
        // floor(xp_to_next * 1.5)
        self.xp_to_next += self.xp_to_next / 2;
    }

    /// XP bar fill in [0, 1]
    pub fn xp_fraction(&self) -> f32 {
        if self.xp_to_next == 0 {
            return 0.0;
        }
        (self.xp as f64 / self.xp_to_next as f64).clamp(0.0, 1.0) as f32
    }
}

/// Outcome of a single tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapReward {
    pub combo: u32,
    pub tier: ComboTier,
    pub gold_added: u64,
    pub xp_added: u64,
    /// New level when this tap crossed the threshold
    pub leveled_up: Option<u32>,
}

/// Combo and progress bookkeeping
#[derive(Debug, Clone, Default)]
pub struct RewardLedger {
    pub combo: ComboState,
    pub progress: ProgressState,
}

impl RewardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a tap at `now_ms`
    pub fn on_tap(&mut self, now_ms: f64, tuning: &Tuning) -> TapReward {
        self.combo.combo = self.combo.combo.saturating_add(1);
        let combo = self.combo.combo;
        self.combo.reset.arm(now_ms, tuning.combo_decay_ms);

        let progress = &mut self.progress;
        progress.max_combo = progress.max_combo.max(combo);

        let gold_added = gold_for_combo(combo);
        progress.gold = progress.gold.saturating_add(gold_added);

        let xp_added = tuning.xp_formula.xp_for(combo);
        progress.xp += xp_added;

        let leveled_up = if progress.xp >= progress.xp_to_next {
            progress.level_up();
            Some(progress.level)
        } else {
            None
        };

        TapReward {
            combo,
            tier: ComboTier::for_combo(combo),
            gold_added,
            xp_added,
            leveled_up,
        }
    }

    /// Fire the combo reset if its deadline passed. Returns true if the combo dropped to zero.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        if self.combo.reset.take_if_due(now_ms) {
            self.combo.combo = 0;
            true
        } else {
            false
        }
    }

    pub fn combo(&self) -> u32 {
        self.combo.combo
    }

    pub fn tier(&self) -> ComboTier {
        ComboTier::for_combo(self.combo.combo)
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tap_rewards() {
        let mut ledger = RewardLedger::new();
        let reward = ledger.on_tap(0.0, &Tuning::default());
        assert_eq!(reward.combo, 1);
        assert_eq!(reward.gold_added, 1);
        assert_eq!(reward.xp_added, 10);
        assert_eq!(reward.leveled_up, None);
        assert_eq!(ledger.progress.gold, 1);
        assert_eq!(ledger.progress.xp, 10);
        assert_eq!(ledger.progress.level, 1);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(ComboTier::for_combo(0), ComboTier::Combo);
        assert_eq!(ComboTier::for_combo(9), ComboTier::Combo);
        assert_eq!(ComboTier::for_combo(10), ComboTier::Super);
        assert_eq!(ComboTier::for_combo(29), ComboTier::Super);
        assert_eq!(ComboTier::for_combo(30), ComboTier::Hyper);
        assert_eq!(ComboTier::Super.label(), "SUPER!");
        assert_eq!(ComboTier::Hyper.label(), "HYPER!!");
    }

    #[test]
    fn test_gold_formula() {
        assert_eq!(gold_for_combo(1), 1);
        assert_eq!(gold_for_combo(2), 2);
        assert_eq!(gold_for_combo(3), 2);
        assert_eq!(gold_for_combo(20), 11);
    }

    #[test]
    fn test_level_up_growth() {
        let mut progress = ProgressState::default();
        progress.xp = 120;
        progress.level_up();
        assert_eq!(progress.level, 2);
        assert_eq!(progress.xp, 0);
        assert_eq!(progress.xp_to_next, 150);
        progress.level_up();
        assert_eq!(progress.xp_to_next, 225);
        progress.level_up();
        assert_eq!(progress.xp_to_next, 337);
    }

    #[test]
    fn test_combo_expires_after_decay() {
        let tuning = Tuning::default();
        let mut ledger = RewardLedger::new();
        ledger.on_tap(0.0, &tuning);
        ledger.on_tap(1500.0, &tuning);
        assert!(!ledger.expire(3499.0));
        assert_eq!(ledger.combo(), 2);
        assert!(ledger.expire(3500.0));
        assert_eq!(ledger.combo(), 0);
        // Progress survives the reset
        assert_eq!(ledger.progress.gold, 3);
        assert_eq!(ledger.progress.max_combo, 2);
    }

    #[test]
    fn test_flat_xp_variant() {
        let tuning = Tuning::from_preset(crate::TuningPreset::Classic);
        let mut ledger = RewardLedger::new();
        for i in 0..19 {
            ledger.on_tap(i as f64, &tuning);
        }
        assert_eq!(ledger.progress.xp, 95);
        let reward = ledger.on_tap(19.0, &tuning);
        assert_eq!(reward.leveled_up, Some(2));
        assert_eq!(ledger.progress.xp, 0);
    }
}
