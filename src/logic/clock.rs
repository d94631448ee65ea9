//! Timeline sources.
//!
//! The session treats its timeline as the only authority for elapsed time.
//! A shell backed by a media player implements [`Timeline`] over it; the
//! crate ships a monotonic fallback clock and a manually driven clock.

use std::time::Instant;

/// Transport notifications raised by a timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportEvent {
    Started,
    Paused,
    Ended,
    Seeked { position: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Stopped,
    Playing,
    Paused,
    Ended,
}

pub trait Timeline {
    /// Current position in seconds.
    fn position(&self) -> f64;
    fn state(&self) -> TransportState;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: f64);
    /// Returns the transport events raised since the last call.
    fn poll_events(&mut self) -> Vec<TransportEvent>;
}

/// Timeline driven by `Instant`, for environments without a media clock.
///
/// With a `length`, the clock reports `Ended` once that position is reached.
pub struct MonotonicClock {
    base_position: f64,
    started_at: Option<Instant>,
    state: TransportState,
    length: Option<f64>,
    pending: Vec<TransportEvent>,
}

impl MonotonicClock {
    pub fn new(length: Option<f64>) -> Self {
        Self {
            base_position: 0.0,
            started_at: None,
            state: TransportState::Stopped,
            length,
            pending: Vec::new(),
        }
    }

    pub fn length(&self) -> Option<f64> {
        self.length
    }

    fn raw_position(&self) -> f64 {
        match self.started_at {
            Some(start) => self.base_position + start.elapsed().as_secs_f64(),
            None => self.base_position,
        }
    }

    fn clamp(&self, position: f64) -> f64 {
        let position = position.max(0.0);
        match self.length {
            Some(length) => position.min(length),
            None => position,
        }
    }
}

impl Timeline for MonotonicClock {
    fn position(&self) -> f64 {
        self.clamp(self.raw_position())
    }

    fn state(&self) -> TransportState {
        self.state
    }

    fn play(&mut self) {
        if self.state == TransportState::Playing {
            return;
        }
        if self.state == TransportState::Ended {
            self.base_position = 0.0;
        }
        self.started_at = Some(Instant::now());
        self.state = TransportState::Playing;
        self.pending.push(TransportEvent::Started);
    }

    fn pause(&mut self) {
        if self.state != TransportState::Playing {
            return;
        }
        self.base_position = self.position();
        self.started_at = None;
        self.state = TransportState::Paused;
        self.pending.push(TransportEvent::Paused);
    }

    fn seek(&mut self, position: f64) {
        let position = self.clamp(position);
        self.base_position = position;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
        if self.state == TransportState::Ended {
            self.state = TransportState::Paused;
        }
        self.pending.push(TransportEvent::Seeked { position });
    }

    fn poll_events(&mut self) -> Vec<TransportEvent> {
        if let Some(length) = self.length {
            if self.state == TransportState::Playing && self.raw_position() >= length {
                self.base_position = length;
                self.started_at = None;
                self.state = TransportState::Ended;
                self.pending.push(TransportEvent::Ended);
            }
        }
        std::mem::take(&mut self.pending)
    }
}

/// Timeline whose position is set explicitly by its owner.
///
/// Useful for shells that receive the position from elsewhere each frame,
/// and for deterministic tests.
pub struct ManualClock {
    position: f64,
    state: TransportState,
    pending: Vec<TransportEvent>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            position: 0.0,
            state: TransportState::Stopped,
            pending: Vec::new(),
        }
    }

    /// Moves the position without raising a seek (normal playback).
    pub fn set_position(&mut self, position: f64) {
        self.position = position;
    }

    /// Advances the position by `dt` seconds if playing.
    pub fn advance(&mut self, dt: f64) {
        if self.state == TransportState::Playing {
            self.position += dt;
        }
    }

    /// Marks the timeline as finished.
    pub fn finish(&mut self) {
        self.state = TransportState::Ended;
        self.pending.push(TransportEvent::Ended);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline for ManualClock {
    fn position(&self) -> f64 {
        self.position
    }

    fn state(&self) -> TransportState {
        self.state
    }

    fn play(&mut self) {
        self.state = TransportState::Playing;
        self.pending.push(TransportEvent::Started);
    }

    fn pause(&mut self) {
        self.state = TransportState::Paused;
        self.pending.push(TransportEvent::Paused);
    }

    fn seek(&mut self, position: f64) {
        self.position = position;
        self.pending.push(TransportEvent::Seeked { position });
    }

    fn poll_events(&mut self) -> Vec<TransportEvent> {
        std::mem::take(&mut self.pending)
    }
}
