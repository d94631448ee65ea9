//! Game session: owns the timeline, the scheduler, the live notes and the
//! score, and drives them through the `Idle → Running → Stopped` lifecycle.
//!
//! Two periodic callbacks drive a running session:
//! - [`GameSession::tick`] at render rate: transport events, chart
//!   scheduling, expiry, one frame to the sink.
//! - [`GameSession::spawn_tick`] at the procedural interval (empty chart only).
//!
//! Both key off the timeline position, so late or irregular calls never
//! accumulate drift.

mod input;
mod judge;
mod notes;
mod scheduler;

pub use judge::Judge;
pub use notes::{NoteMotion, NoteTracker};
pub use scheduler::{ProceduralGenerator, Scheduler};

use crate::error::Result;
use crate::logic::clock::{Timeline, TransportEvent};
use crate::models::engine::{Chart, ChartEvent, KeyMap};
use crate::models::settings::EngineSettings;
use crate::models::stats::HitStats;
use crate::render::FeedbackSink;
use crate::shared::snapshot::{FeedbackEvent, GameplaySnapshot, SessionPhase, SessionState};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub struct GameSession<T: Timeline, S: FeedbackSink> {
    timeline: T,
    sink: S,
    keymap: KeyMap,
    scheduler: Scheduler,
    tracker: NoteTracker,
    judge: Judge,

    phase: SessionPhase,
    score: u32,
    stats: HitStats,
    /// Timeline position seen by the last tick.
    position: f64,
    /// Set while the timeline is paused; halts procedural spawns.
    paused: bool,

    travel_duration: f64,
    seek_epsilon: f64,
}

impl<T: Timeline, S: FeedbackSink> GameSession<T, S> {
    /// Creates an idle session. Lanes the keymap does not know are dropped
    /// from the chart.
    ///
    /// Fails with [`crate::error::NotefallError::InvalidConfig`] if `settings` do not
    /// validate.
    pub fn new(settings: &EngineSettings, chart: Chart, timeline: T, sink: S) -> Result<Self> {
        Self::with_rng(settings, chart, timeline, sink, StdRng::from_os_rng())
    }

    /// Same as [`GameSession::new`] with an explicit RNG for procedural lanes.
    pub fn with_rng(
        settings: &EngineSettings,
        chart: Chart,
        timeline: T,
        sink: S,
        rng: StdRng,
    ) -> Result<Self> {
        settings.validate()?;
        let keymap = settings.keymap();
        let chart = chart.retain_mapped(&keymap);
        if chart.is_empty() {
            log::info!("SESSION: Empty chart, notes will be generated procedurally");
        }

        let procedural =
            ProceduralGenerator::new(rng, keymap.lane_count(), settings.spawn_interval);
        let motion = NoteMotion {
            travel_duration: settings.travel_duration,
            expiry_threshold: settings.expiry_threshold,
            playfield: settings.playfield,
        };

        Ok(Self {
            timeline,
            sink,
            keymap,
            scheduler: Scheduler::new(chart, procedural),
            tracker: NoteTracker::new(motion),
            judge: Judge::new(settings.hit_window(), settings.reward_per_hit),
            phase: SessionPhase::Idle,
            score: 0,
            stats: HitStats::new(),
            position: 0.0,
            paused: false,
            travel_duration: settings.travel_duration,
            seek_epsilon: settings.seek_epsilon,
        })
    }

    /// Resets everything and starts playback from 0.
    ///
    /// Returns `false` (and does nothing) if the session is already running.
    pub fn start(&mut self) -> bool {
        if self.phase == SessionPhase::Running {
            log::debug!("SESSION: start() while running, ignored");
            return false;
        }

        self.score = 0;
        self.stats = HitStats::new();
        self.tracker.reset();
        self.scheduler.reset(0.0);
        self.position = 0.0;
        self.paused = false;

        self.timeline.seek(0.0);
        self.timeline.play();
        // Events raised by the reset itself are not external transport changes.
        let _ = self.timeline.poll_events();

        self.phase = SessionPhase::Running;
        log::info!(
            "SESSION: Started ({} mode)",
            if self.scheduler.is_procedural() {
                "procedural"
            } else {
                "chart"
            }
        );

        self.advance(0.0);
        true
    }

    /// Halts the session and drops every live note. Returns `false` if the
    /// session was not running.
    pub fn stop(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }

        self.phase = SessionPhase::Stopped;
        self.paused = false;
        self.tracker.clear();

        log::info!(
            "SESSION: Stopped at {:.2}s, score {} ({} hits, {} expired)",
            self.position,
            self.score,
            self.stats.hits,
            self.stats.expired
        );
        self.sink.emit(FeedbackEvent::SessionEnded {
            score: self.score,
            stats: self.stats.clone(),
        });
        true
    }

    /// Render-rate callback.
    pub fn tick(&mut self) {
        self.process_transport();
        if self.phase != SessionPhase::Running {
            return;
        }
        let now = self.timeline.position();
        self.advance(now);
    }

    /// Procedural-timer callback. No-op with a chart, while paused or when
    /// not running.
    pub fn spawn_tick(&mut self) {
        if !self.procedural_armed() {
            return;
        }
        let now = self.timeline.position();
        if let Some(event) = self.scheduler.procedural_spawn(now, self.travel_duration) {
            self.spawn(event, now);
        }
    }

    /// Whether the procedural timer should currently fire.
    pub fn procedural_armed(&self) -> bool {
        self.phase == SessionPhase::Running && !self.paused && self.scheduler.is_procedural()
    }

    /// Reacts to a transport notification from the timeline.
    pub fn on_transport(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Started => {
                if self.paused {
                    log::info!("SESSION: Timeline resumed");
                }
                self.paused = false;
            }
            TransportEvent::Paused => {
                if self.phase == SessionPhase::Running {
                    log::info!("SESSION: Timeline paused at {:.2}s", self.position);
                }
                self.paused = true;
            }
            TransportEvent::Ended => {
                log::info!("SESSION: Timeline ended");
                self.stop();
            }
            TransportEvent::Seeked { position } => {
                if self.phase != SessionPhase::Running {
                    return;
                }
                self.tracker.clear();
                self.scheduler.seek(position, self.seek_epsilon);
                self.position = position;
                log::info!("SESSION: Seeked to {:.2}s", position);
            }
        }
    }

    /// Pauses the timeline.
    pub fn pause(&mut self) {
        self.timeline.pause();
        self.process_transport();
    }

    /// Resumes the timeline.
    pub fn resume(&mut self) {
        self.timeline.play();
        self.process_transport();
    }

    /// Moves the timeline to `position` and reconciles the session with it.
    pub fn seek(&mut self, position: f64) {
        self.timeline.seek(position);
        self.process_transport();
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn stats(&self) -> &HitStats {
        &self.stats
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            running: self.is_running(),
            score: self.score,
            timeline_position: self.position,
            next_chart_index: self.scheduler.cursor(),
        }
    }

    pub fn tracker(&self) -> &NoteTracker {
        &self.tracker
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn timeline(&self) -> &T {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut T {
        &mut self.timeline
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn snapshot(&self) -> GameplaySnapshot {
        GameplaySnapshot {
            timeline_position: self.position,
            score: self.score,
            lanes: self
                .tracker
                .lane_positions(self.keymap.lane_count(), self.position),
        }
    }

    fn process_transport(&mut self) {
        for event in self.timeline.poll_events() {
            self.on_transport(event);
        }
    }

    /// Chart scheduling and expiry at `now`, then one frame to the sink.
    fn advance(&mut self, now: f64) {
        self.position = now;

        for event in self.scheduler.due(now, self.travel_duration) {
            self.spawn(event, now);
        }

        let expired = self.tracker.tick(now);
        self.stats.expired += expired as u32;

        let frame = self.snapshot();
        self.sink.emit(FeedbackEvent::Frame(frame));
    }

    fn spawn(&mut self, event: ChartEvent, now: f64) {
        match self.keymap.check(event.lane) {
            Ok(_) => {
                self.tracker.spawn(event, now);
            }
            Err(e) => log::warn!("SESSION: Skipping spawn: {}", e),
        }
    }
}

#[cfg(test)]
mod tests;
