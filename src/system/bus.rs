//! Shared channel infrastructure between system threads.
//!
//! The `SystemBus` is the only link between threads: the session itself
//! lives on the logic thread and is never shared.

use crate::input::events::{GameAction, RawInputEvent};
use crate::shared::snapshot::FeedbackEvent;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// System-level events sent to the logic thread.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Application shutdown requested.
    Quit,
}

/// Aggregates the cross-thread communication channels.
#[derive(Clone)]
pub struct SystemBus {
    /// Shell → Input: raw key presses.
    pub raw_input_tx: Sender<RawInputEvent>,
    pub raw_input_rx: Receiver<RawInputEvent>,

    /// Input → Logic: gameplay and transport actions.
    pub action_tx: Sender<GameAction>,
    pub action_rx: Receiver<GameAction>,

    /// Logic → Render: frames and feedback signals.
    pub feedback_tx: Sender<FeedbackEvent>,
    pub feedback_rx: Receiver<FeedbackEvent>,

    /// Shell → Logic: system events.
    pub sys_tx: Sender<SystemEvent>,
    pub sys_rx: Receiver<SystemEvent>,
}

impl SystemBus {
    /// Creates a new system bus with all channels initialized.
    pub fn new() -> Self {
        let (raw_input_tx, raw_input_rx) = unbounded();
        let (action_tx, action_rx) = unbounded();

        // Bounded feedback channel: frames are dropped rather than queued.
        let (feedback_tx, feedback_rx) = bounded(64);

        let (sys_tx, sys_rx) = unbounded();

        Self {
            raw_input_tx,
            raw_input_rx,
            action_tx,
            action_rx,
            feedback_tx,
            feedback_rx,
            sys_tx,
            sys_rx,
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
