use crate::models::engine::LaneId;

/// A key press as delivered by the shell. It is judged at the timeline
/// position when the logic thread processes it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInputEvent {
    pub key: String,
}

impl RawInputEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    // Gameplay
    Hit { lane: LaneId },

    // Session / transport
    Start,
    Stop,
    Pause,
    Resume,
    Seek { position: f64 },
    Quit,
}

impl GameAction {
    /// Parses a console command (`:start`, `:seek 12.5`, ...).
    pub fn from_command(line: &str) -> Option<Self> {
        let mut parts = line.trim().trim_start_matches(':').split_whitespace();
        match parts.next()? {
            "start" => Some(GameAction::Start),
            "stop" => Some(GameAction::Stop),
            "pause" => Some(GameAction::Pause),
            "play" | "resume" => Some(GameAction::Resume),
            "seek" => {
                let position = parts.next()?.parse::<f64>().ok()?;
                (position.is_finite() && position >= 0.0).then_some(GameAction::Seek { position })
            }
            "quit" | "exit" => Some(GameAction::Quit),
            _ => None,
        }
    }
}
