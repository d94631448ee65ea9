//! Feedback sinks and the headless render loop.
//!
//! The session only signals intent; playing a hit sound or flashing a lane
//! is the shell's job. Sinks are fire-and-forget: a failing sink must never
//! block or abort scoring.

use crate::shared::snapshot::FeedbackEvent;
use crate::system::bus::SystemBus;
use crossbeam_channel::{Sender, TrySendError};

pub trait FeedbackSink {
    fn emit(&mut self, event: FeedbackEvent);
}

/// Discards everything.
pub struct NullSink;

impl FeedbackSink for NullSink {
    fn emit(&mut self, _event: FeedbackEvent) {}
}

/// Records events in order.
impl FeedbackSink for Vec<FeedbackEvent> {
    fn emit(&mut self, event: FeedbackEvent) {
        self.push(event);
    }
}

/// Forwards events to another thread without blocking.
pub struct ChannelSink {
    tx: Sender<FeedbackEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<FeedbackEvent>) -> Self {
        Self { tx }
    }
}

impl FeedbackSink for ChannelSink {
    fn emit(&mut self, event: FeedbackEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            // Frames are superseded by the next tick anyway.
            Err(TrySendError::Full(FeedbackEvent::Frame(_))) => {}
            Err(TrySendError::Full(event)) => {
                log::debug!("RENDER: Feedback queue full, dropped {:?}", event);
            }
            Err(TrySendError::Disconnected(_)) => {
                log::debug!("RENDER: Feedback receiver gone");
            }
        }
    }
}

/// Headless render loop: logs feedback until the logic thread shuts down.
///
/// Runs on the calling thread.
pub fn run(bus: SystemBus) {
    log::info!("RENDER: Loop started");
    let mut frames: u64 = 0;

    while let Ok(event) = bus.feedback_rx.recv() {
        match event {
            FeedbackEvent::Frame(snapshot) => {
                frames += 1;
                // Roughly once per second at the default tick rate.
                if frames % 200 == 0 {
                    let live: usize = snapshot.lanes.iter().map(Vec::len).sum();
                    log::debug!(
                        "RENDER: t={:.2}s score={} live_notes={}",
                        snapshot.timeline_position,
                        snapshot.score,
                        live
                    );
                }
            }
            FeedbackEvent::Hit { lane, score } => {
                log::info!("HIT! {} -> score {}", lane, score);
            }
            FeedbackEvent::SessionEnded { score, stats } => {
                log::info!(
                    "Session ended: score {} ({} hits, {} expired, {} stray presses, {:.1}% hit rate)",
                    score,
                    stats.hits,
                    stats.expired,
                    stats.ignored_presses,
                    stats.hit_rate()
                );
            }
            FeedbackEvent::Shutdown => break,
        }
    }

    log::info!("RENDER: Loop stopped");
}
