//! Chart events and in-flight notes.

use super::lane::LaneId;
use serde::{Deserialize, Serialize};

/// A single chart entry: the moment a note must reach the hit zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEvent {
    /// When the note should be struck (seconds on the timeline).
    pub target_time: f64,
    /// Which lane the note travels in.
    pub lane: LaneId,
}

impl ChartEvent {
    pub fn new(target_time: f64, lane: LaneId) -> Self {
        Self { target_time, lane }
    }

    /// Timeline position at which the note has to start its descent.
    pub fn spawn_time(&self, travel_duration: f64) -> f64 {
        self.target_time - travel_duration
    }
}

/// A note currently travelling down its lane.
///
/// Position is never stored: it is derived from `target_time` and the
/// timeline position every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Insertion counter, unique within a session.
    pub id: u64,
    pub lane: LaneId,
    pub target_time: f64,
    /// Timeline position at which the note was spawned.
    pub spawn_time: f64,
}

impl Note {
    pub fn new(id: u64, lane: LaneId, target_time: f64, spawn_time: f64) -> Self {
        Self {
            id,
            lane,
            target_time,
            spawn_time,
        }
    }

    /// Seconds until the note reaches the hit zone (negative once past it).
    pub fn time_to_target(&self, now: f64) -> f64 {
        self.target_time - now
    }
}
