//! HUD text
//!
//! The host compares snapshots between frames and only touches elements
//! whose text changed.

use crate::sim::RewardLedger;

/// Format an integer with comma thousands separators
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Display values for the HUD
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub gold: String,
    pub level: String,
    pub combo_count: String,
    pub combo_label: &'static str,
    /// Combo container drops its `hidden` class
    pub combo_visible: bool,
    /// XP bar width in percent [0, 100]
    pub xp_percent: f32,
}

impl HudSnapshot {
    pub fn from_ledger(ledger: &RewardLedger) -> Self {
        let progress = ledger.progress();
        let combo = ledger.combo();
        Self {
            gold: format_number(progress.gold),
            level: progress.level.to_string(),
            combo_count: combo.to_string(),
            combo_label: ledger.tier().label(),
            combo_visible: combo > 0,
            xp_percent: progress.xp_fraction() * 100.0,
        }
    }

    /// XP bar `width` property
    pub fn xp_width_css(&self) -> String {
        format!("{:.1}%", self.xp_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(123456), "123,456");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_snapshot_tracks_ledger() {
        let tuning = Tuning::default();
        let mut ledger = RewardLedger::new();
        let idle = HudSnapshot::from_ledger(&ledger);
        assert!(!idle.combo_visible);
        assert_eq!(idle.level, "1");
        assert_eq!(idle.xp_width_css(), "0.0%");

        for i in 0..12 {
            ledger.on_tap(i as f64, &tuning);
        }
        let hud = HudSnapshot::from_ledger(&ledger);
        assert!(hud.combo_visible);
        assert_eq!(hud.combo_count, "12");
        assert_eq!(hud.combo_label, "SUPER!");
        assert_eq!(hud.level, "2");
        assert_ne!(hud, idle);

        ledger.expire(1e6);
        assert!(!HudSnapshot::from_ledger(&ledger).combo_visible);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_format_number_strips_to_digits(n in any::<u64>()) {
            let s = format_number(n);
            let stripped: String = s.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(stripped, n.to_string());
        }

        #[test]
        fn prop_format_number_groups_of_three(n in any::<u64>()) {
            let s = format_number(n);
            let groups: Vec<&str> = s.split(',').collect();
            prop_assert!(groups[0].len() <= 3 && !groups[0].is_empty());
            for g in &groups[1..] {
                prop_assert_eq!(g.len(), 3);
            }
        }
    }
}
