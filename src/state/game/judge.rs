//! Hit detection against the shared note position.

use super::notes::NoteTracker;
use crate::models::engine::{HitWindow, LaneId};
use crate::models::stats::Judgement;

pub struct Judge {
    window: HitWindow,
    reward: u32,
}

impl Judge {
    pub fn new(window: HitWindow, reward: u32) -> Self {
        Self { window, reward }
    }

    pub fn window(&self) -> HitWindow {
        self.window
    }

    /// Points awarded per hit.
    pub fn reward(&self) -> u32 {
        self.reward
    }

    /// Finds the note in `lane` closest to the hit zone at `now`.
    ///
    /// Returns `(note id, signed distance)`. On equal distances the note
    /// inserted first wins. Notes past the expiry threshold are misses and
    /// never considered, even before the tracker drops them.
    pub fn closest(&self, tracker: &NoteTracker, lane: LaneId, now: f64) -> Option<(u64, f64)> {
        let motion = tracker.motion();
        let mut best: Option<(u64, f64)> = None;

        for note in tracker.in_lane(lane) {
            if motion.is_expired(note.target_time, now) {
                continue;
            }
            let distance = motion.distance_from_hit_zone(note.target_time, now);
            if best.is_none_or(|(_, d)| distance.abs() < d.abs()) {
                best = Some((note.id, distance));
            }
        }
        best
    }

    /// Judges a press in `lane` at `now`. A hit consumes the note; anything
    /// else leaves the tracker untouched.
    pub fn judge(&self, tracker: &mut NoteTracker, lane: LaneId, now: f64) -> Judgement {
        let Some((note_id, distance)) = self.closest(tracker, lane, now) else {
            return Judgement::Ignored;
        };

        if !self.window.contains(distance) {
            log::trace!(
                "SESSION: Press in {} ignored (closest note {:.1}px away)",
                lane,
                distance
            );
            return Judgement::Ignored;
        }

        tracker.remove(note_id);
        Judgement::Hit {
            lane,
            note_id,
            distance,
        }
    }
}
