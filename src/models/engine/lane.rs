//! Lane identifiers and the key → lane table.

use crate::error::{NotefallError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a lane, 0-based from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneId(pub usize);

impl LaneId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lane {}", self.0)
    }
}

/// Normalizes a raw key identifier to its canonical name.
///
/// Single characters are accepted as shorthand (`"d"` → `"KeyD"`,
/// `"3"` → `"Digit3"`, `" "` → `"Space"`); longer names pass through.
pub fn normalize_key(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (None, _) => None,
        (Some(c), None) => match c {
            'a'..='z' | 'A'..='Z' => Some(format!("Key{}", c.to_ascii_uppercase())),
            '0'..='9' => Some(format!("Digit{c}")),
            ' ' => Some("Space".to_string()),
            ';' => Some("Semicolon".to_string()),
            ',' => Some("Comma".to_string()),
            '.' => Some("Period".to_string()),
            '/' => Some("Slash".to_string()),
            _ => None,
        },
        _ => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}

/// Fixed table binding one key to each lane.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    keys: Vec<String>,
}

impl KeyMap {
    /// Builds the table from key names, one per lane. Names that cannot be
    /// normalized are kept verbatim so lane numbering does not shift.
    pub fn new(keys: &[String]) -> Self {
        let keys = keys
            .iter()
            .map(|k| normalize_key(k).unwrap_or_else(|| k.clone()))
            .collect();
        Self { keys }
    }

    pub fn lane_count(&self) -> usize {
        self.keys.len()
    }

    /// Resolves a raw key to its lane, if bound.
    pub fn lane_for(&self, raw_key: &str) -> Option<LaneId> {
        let key = normalize_key(raw_key)?;
        self.keys.iter().position(|k| *k == key).map(LaneId)
    }

    pub fn key_for(&self, lane: LaneId) -> Option<&str> {
        self.keys.get(lane.0).map(String::as_str)
    }

    /// Fails with `InvalidLane` when `lane` is outside the lane set.
    pub fn check(&self, lane: LaneId) -> Result<LaneId> {
        if lane.0 < self.keys.len() {
            Ok(lane)
        } else {
            Err(NotefallError::InvalidLane {
                lane: lane.0,
                lanes: self.keys.len(),
            })
        }
    }

    pub fn lanes(&self) -> impl Iterator<Item = LaneId> {
        (0..self.keys.len()).map(LaneId)
    }
}
