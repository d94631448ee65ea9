//! Spawn scheduling - chart cursor and procedural fallback.

use crate::models::engine::{Chart, ChartEvent, LaneId};
use rand::Rng;
use rand::rngs::StdRng;

/// Emits one random-lane note per interval, keyed off timeline position.
pub struct ProceduralGenerator {
    rng: StdRng,
    lane_count: usize,
    interval: f64,
    next_spawn: f64,
}

impl ProceduralGenerator {
    pub fn new(rng: StdRng, lane_count: usize, interval: f64) -> Self {
        Self {
            rng,
            lane_count,
            interval,
            next_spawn: 0.0,
        }
    }

    /// Re-anchors the generator so the first spawn happens one interval
    /// after `position`.
    pub fn reset(&mut self, position: f64) {
        self.next_spawn = position + self.interval;
    }

    /// Returns a note to spawn if an interval has elapsed since the last one.
    ///
    /// A late call emits a single note and skips the missed slots rather than
    /// bursting to catch up.
    pub fn poll(&mut self, now: f64, travel_duration: f64) -> Option<ChartEvent> {
        if self.lane_count == 0 || now < self.next_spawn {
            return None;
        }
        self.next_spawn += self.interval;
        if self.next_spawn <= now {
            self.next_spawn = now + self.interval;
        }
        let lane = LaneId(self.rng.random_range(0..self.lane_count));
        Some(ChartEvent::new(now + travel_duration, lane))
    }
}

/// Decides which notes must start their descent.
pub struct Scheduler {
    chart: Chart,
    /// Index of the first chart event not yet spawned or skipped.
    cursor: usize,
    procedural: ProceduralGenerator,
}

impl Scheduler {
    pub fn new(chart: Chart, procedural: ProceduralGenerator) -> Self {
        Self {
            chart,
            cursor: 0,
            procedural,
        }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// An empty chart means notes are generated procedurally.
    pub fn is_procedural(&self) -> bool {
        self.chart.is_empty()
    }

    /// Rewinds the chart cursor and re-anchors the generator at `position`.
    pub fn reset(&mut self, position: f64) {
        self.cursor = 0;
        self.procedural.reset(position);
    }

    /// Chart events whose spawn time (`target - travel`) has been reached,
    /// in chart order. Each event is returned once; the cursor only moves
    /// forward.
    pub fn due(&mut self, now: f64, travel_duration: f64) -> Vec<ChartEvent> {
        let events = self.chart.events();
        let start = self.cursor;
        let mut end = start;
        while end < events.len() && now >= events[end].spawn_time(travel_duration) {
            end += 1;
        }
        self.cursor = end;
        events[start..end].to_vec()
    }

    /// Procedural spawn for the coarse timer. Always `None` with a chart.
    pub fn procedural_spawn(&mut self, now: f64, travel_duration: f64) -> Option<ChartEvent> {
        if !self.is_procedural() {
            return None;
        }
        self.procedural.poll(now, travel_duration)
    }

    /// Recomputes the cursor after a timeline jump: events with
    /// `target < position - epsilon` are treated as already past.
    pub fn seek(&mut self, position: f64, epsilon: f64) {
        self.cursor = self.chart.first_at_or_after(position - epsilon);
        self.procedural.reset(position);
        log::debug!(
            "SESSION: Chart cursor moved to {} after seek to {:.3}s",
            self.cursor,
            position
        );
    }
}
