//! Input handling for GameSession - key presses and control actions.

use super::GameSession;
use crate::input::events::GameAction;
use crate::logic::clock::Timeline;
use crate::models::engine::LaneId;
use crate::models::stats::Judgement;
use crate::render::FeedbackSink;
use crate::shared::snapshot::{FeedbackEvent, SessionPhase};

impl<T: Timeline, S: FeedbackSink> GameSession<T, S> {
    /// Handles a gameplay or transport action.
    pub fn handle_input(&mut self, action: GameAction) {
        match action {
            GameAction::Hit { lane } => {
                self.press_lane(lane);
            }
            GameAction::Start => {
                self.start();
            }
            GameAction::Stop => {
                self.stop();
            }
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::Seek { position } => self.seek(position),
            GameAction::Quit => {}
        }
    }

    /// Judges a raw key at the current timeline position. Unbound keys are
    /// ignored.
    pub fn press_key(&mut self, raw_key: &str) -> Judgement {
        match self.keymap.lane_for(raw_key) {
            Some(lane) => self.press_lane(lane),
            None => {
                log::trace!("SESSION: Unbound key {:?} ignored", raw_key);
                Judgement::Ignored
            }
        }
    }

    /// Judges a press in `lane` at the current timeline position.
    pub fn press_lane(&mut self, lane: LaneId) -> Judgement {
        let now = self.timeline.position();
        self.press_lane_at(lane, now)
    }

    /// Judges a press in `lane` at timeline position `now`.
    pub fn press_lane_at(&mut self, lane: LaneId, now: f64) -> Judgement {
        if self.phase != SessionPhase::Running {
            return Judgement::Ignored;
        }
        if let Err(e) = self.keymap.check(lane) {
            log::debug!("SESSION: Press ignored: {}", e);
            return Judgement::Ignored;
        }

        let judgement = self.judge.judge(&mut self.tracker, lane, now);
        match judgement {
            Judgement::Hit { distance, .. } => {
                self.score += self.judge.reward();
                self.stats.hits += 1;
                log::debug!(
                    "SESSION: Hit in {} ({:+.1}px), score {}",
                    lane,
                    distance,
                    self.score
                );
                self.sink.emit(FeedbackEvent::Hit {
                    lane,
                    score: self.score,
                });
            }
            Judgement::Ignored => {
                self.stats.ignored_presses += 1;
            }
        }
        judgement
    }
}
