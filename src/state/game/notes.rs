//! Note tracking - live note collection, position math, expiry.

use crate::models::engine::{ChartEvent, LaneId, Note, PlayfieldConfig};

/// Tolerance absorbing float error when comparing progress to the expiry threshold.
const EXPIRY_EPSILON: f64 = 1e-9;

/// Pure note motion: where a note is, given its target time and the timeline.
///
/// Shared by the tracker and the judge so both read the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteMotion {
    pub travel_duration: f64,
    pub expiry_threshold: f64,
    pub playfield: PlayfieldConfig,
}

impl NoteMotion {
    /// Unclamped progress: 0 at spawn, 1 at the hit zone, >1 once past it.
    pub fn raw_progress(&self, target_time: f64, now: f64) -> f64 {
        1.0 - (target_time - now) / self.travel_duration
    }

    /// Progress clamped to `[0, expiry_threshold]`.
    pub fn progress(&self, target_time: f64, now: f64) -> f64 {
        self.raw_progress(target_time, now)
            .min(self.expiry_threshold)
            .max(0.0)
    }

    /// Offset along the lane, in playfield pixels.
    pub fn position(&self, target_time: f64, now: f64) -> f64 {
        self.playfield.offset_at(self.progress(target_time, now))
    }

    /// Signed distance to the hit zone (negative = still above it).
    pub fn distance_from_hit_zone(&self, target_time: f64, now: f64) -> f64 {
        self.position(target_time, now) - self.playfield.hit_zone_offset
    }

    pub fn is_expired(&self, target_time: f64, now: f64) -> bool {
        self.raw_progress(target_time, now) >= self.expiry_threshold - EXPIRY_EPSILON
    }

    /// Note speed in pixels per second.
    pub fn speed(&self) -> f64 {
        self.playfield.travel_distance() / self.travel_duration
    }
}

/// Owns the notes currently travelling down the lanes, in insertion order.
pub struct NoteTracker {
    motion: NoteMotion,
    notes: Vec<Note>,
    next_id: u64,
}

impl NoteTracker {
    pub fn new(motion: NoteMotion) -> Self {
        Self {
            motion,
            notes: Vec::new(),
            next_id: 0,
        }
    }

    pub fn motion(&self) -> &NoteMotion {
        &self.motion
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Live notes in `lane`, oldest first.
    pub fn in_lane(&self, lane: LaneId) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(move |n| n.lane == lane)
    }

    /// Starts a note's descent. Returns its id.
    pub fn spawn(&mut self, event: ChartEvent, now: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notes
            .push(Note::new(id, event.lane, event.target_time, now));
        log::trace!(
            "SESSION: Spawned note {} in {} (target {:.3}s, now {:.3}s)",
            id,
            event.lane,
            event.target_time,
            now
        );
        id
    }

    /// Drops notes that travelled past the expiry threshold. Returns how
    /// many were removed. Misses carry no penalty and raise no feedback.
    pub fn tick(&mut self, now: f64) -> usize {
        let motion = self.motion;
        let before = self.notes.len();
        self.notes.retain(|n| {
            let expired = motion.is_expired(n.target_time, now);
            if expired {
                log::trace!("SESSION: Note {} in {} expired", n.id, n.lane);
            }
            !expired
        });
        before - self.notes.len()
    }

    /// Removes a note by id, keeping the order of the others.
    pub fn remove(&mut self, id: u64) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(index))
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Clears the notes and restarts id numbering.
    pub fn reset(&mut self) {
        self.notes.clear();
        self.next_id = 0;
    }

    /// Per-lane note positions at `now`, for the render sink.
    pub fn lane_positions(&self, lane_count: usize, now: f64) -> Vec<Vec<f64>> {
        let mut lanes = vec![Vec::new(); lane_count];
        for note in &self.notes {
            if let Some(lane) = lanes.get_mut(note.lane.index()) {
                lane.push(self.motion.position(note.target_time, now));
            }
        }
        lanes
    }
}
