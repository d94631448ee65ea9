//! Hit window tolerance and its conversions.

/// Tolerance around the hit zone, in playfield units (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitWindow {
    pub distance: f64,
}

impl HitWindow {
    pub fn new(distance: f64) -> Self {
        Self {
            distance: distance.max(0.0),
        }
    }

    /// Builds a window from a time tolerance, given note speed in units/second.
    pub fn from_seconds(tolerance_s: f64, speed: f64) -> Self {
        Self::new(tolerance_s * speed)
    }

    /// Equivalent time tolerance for notes moving at `speed` units/second.
    pub fn as_seconds(&self, speed: f64) -> f64 {
        if speed <= 0.0 {
            return 0.0;
        }
        self.distance / speed
    }

    /// Returns `true` when a note `distance` units from the hit zone is hittable.
    pub fn contains(&self, distance: f64) -> bool {
        distance.abs() <= self.distance
    }
}

impl Default for HitWindow {
    fn default() -> Self {
        Self::new(40.0)
    }
}
