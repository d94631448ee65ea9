//! Snapshots and feedback signals sent from the session to the shell.
//!
//! Snapshots are immutable captures of session state. Rendering is a
//! projection of them; nothing flows back.

use crate::models::engine::LaneId;
use crate::models::stats::HitStats;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Stopped,
}

/// Scalar session state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionState {
    pub running: bool,
    pub score: u32,
    /// Timeline position seen by the last tick, in seconds.
    pub timeline_position: f64,
    /// First chart event not yet spawned or skipped.
    pub next_chart_index: usize,
}

/// Per-tick view of the playfield.
#[derive(Debug, Clone, PartialEq)]
pub struct GameplaySnapshot {
    pub timeline_position: f64,
    pub score: u32,
    /// Note offsets per lane, in playfield pixels, oldest note first.
    pub lanes: Vec<Vec<f64>>,
}

/// Signals consumed by the render/feedback shell.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackEvent {
    /// Note positions after a tick.
    Frame(GameplaySnapshot),
    /// A note was hit; `score` is the new total.
    Hit { lane: LaneId, score: u32 },
    /// The session stopped (timeline ended or manual stop).
    SessionEnded { score: u32, stats: HitStats },
    /// The logic thread is shutting down.
    Shutdown,
}
