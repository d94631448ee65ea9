use super::events::{GameAction, RawInputEvent};
use crate::models::engine::KeyMap;

/// Maps raw key presses to gameplay actions through the lane table.
pub struct InputManager {
    keymap: KeyMap,
}

impl InputManager {
    pub fn new(keymap: KeyMap) -> Self {
        Self { keymap }
    }

    pub fn process(&self, event: &RawInputEvent) -> Option<GameAction> {
        match self.keymap.lane_for(&event.key) {
            Some(lane) => Some(GameAction::Hit { lane }),
            None => {
                log::trace!("INPUT: Unbound key {:?}", event.key);
                None
            }
        }
    }
}
