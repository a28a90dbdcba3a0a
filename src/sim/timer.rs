//! Re-armable one-shot deadlines
//!
//! Delayed resets (combo decay, cooldown wake-up) are modelled as a single
//! optional timestamp polled against the simulation clock. Arming replaces
//! any pending deadline, so a fresh tap re-arms instead of stacking.

/// A one-shot deadline on a millisecond clock
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Deadline {
    at_ms: Option<f64>,
}

impl Deadline {
    pub const fn new() -> Self {
        Self { at_ms: None }
    }

    /// Schedule to fire at `now_ms + delay_ms`, cancelling any pending deadline
    pub fn arm(&mut self, now_ms: f64, delay_ms: f64) {
        self.at_ms = Some(now_ms + delay_ms);
    }

    pub fn cancel(&mut self) {
        self.at_ms = None;
    }

    /// Scheduled fire time, if armed
    pub fn at(&self) -> Option<f64> {
        self.at_ms
    }

    /// Whether the deadline has been reached
    pub fn due(&self, now_ms: f64) -> bool {
        matches!(self.at_ms, Some(at) if now_ms >= at)
    }

    /// Disarm and report true if the deadline has been reached
    pub fn take_if_due(&mut self, now_ms: f64) -> bool {
        if self.due(now_ms) {
            self.at_ms = None;
            true
        } else {
            false
        }
    }
}
