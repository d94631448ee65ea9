//! Playfield configuration and layout.
//!
//! Offsets are measured in pixels from the top of a lane. Notes are
//! interpolated from `spawn_offset` down to `hit_zone_offset`.

use serde::{Deserialize, Serialize};

/// Configuration for the playfield layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    /// Where a note appears when it spawns (slightly above the lane).
    pub spawn_offset: f64,
    /// Where the hit zone sits.
    pub hit_zone_offset: f64,
}

impl PlayfieldConfig {
    pub fn new() -> Self {
        Self {
            spawn_offset: -20.0,
            hit_zone_offset: 400.0,
        }
    }

    /// Distance travelled between spawn and the hit zone.
    pub fn travel_distance(&self) -> f64 {
        self.hit_zone_offset - self.spawn_offset
    }

    /// Linear interpolation along the lane.
    pub fn offset_at(&self, progress: f64) -> f64 {
        self.spawn_offset + progress * self.travel_distance()
    }
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self::new()
    }
}
