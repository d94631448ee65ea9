//! Judgement outcomes and per-session counters.

use crate::models::engine::LaneId;

/// Outcome of a single keypress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Judgement {
    /// A note was consumed. `distance` is the signed offset from the hit
    /// zone (negative = early).
    Hit { lane: LaneId, note_id: u64, distance: f64 },
    /// Nothing hittable in the lane: the press is ignored.
    Ignored,
}

impl Judgement {
    pub fn is_hit(&self) -> bool {
        matches!(self, Judgement::Hit { .. })
    }
}

/// Accumulated statistics for a play session.
///
/// Expired notes and ignored presses never affect the score; they are only
/// counted for the end-of-session summary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HitStats {
    pub hits: u32,
    pub expired: u32,
    pub ignored_presses: u32,
}

impl HitStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of resolved notes that were hit, as a percentage (0-100).
    pub fn hit_rate(&self) -> f64 {
        let total = (self.hits + self.expired) as f64;
        if total == 0.0 {
            return 0.0;
        }
        self.hits as f64 / total * 100.0
    }
}
