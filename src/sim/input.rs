//! Tap input normalization
//!
//! Mouse and touch deliveries collapse into a single [`TapEvent`].

use glam::Vec2;

/// Raw pointer signal as delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSignal {
    /// Mouse/pen pointer-down at client coordinates
    Pointer { x: f32, y: f32 },
    /// Touch-start with the current touch points (client coordinates)
    Touch { points: Vec<Vec2> },
}

/// A tap at a screen position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapEvent {
    pub pos: Vec2,
    /// Host clock in milliseconds
    pub time_ms: f64,
}

impl TapEvent {
    pub fn new(x: f32, y: f32, time_ms: f64) -> Self {
        Self {
            pos: Vec2::new(x, y),
            time_ms,
        }
    }
}

impl PointerSignal {
    /// Collapse into a tap; multi-touch uses the first point.
    ///
    /// A touch list with no points falls back to the origin.
    pub fn normalize(&self, time_ms: f64) -> TapEvent {
        let pos = match self {
            PointerSignal::Pointer { x, y } => Vec2::new(*x, *y),
            PointerSignal::Touch { points } => points.first().copied().unwrap_or(Vec2::ZERO),
        };
        TapEvent { pos, time_ms }
    }

    /// Touch taps must cancel the platform's scroll/zoom gesture
    pub fn suppresses_default(&self) -> bool {
        matches!(self, PointerSignal::Touch { .. })
    }
}
