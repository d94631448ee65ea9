//! Note-timing and hit-detection engine for a lane-based rhythm minigame.
//!
//! Notes fall down fixed lanes towards a hit zone; their position is a pure
//! function of the timeline position, so pauses, seeks and late ticks never
//! accumulate drift. The [`state::game::GameSession`] owns all gameplay
//! state; the shell feeds it a [`logic::clock::Timeline`] and key presses and
//! receives [`shared::snapshot::FeedbackEvent`]s.

pub mod error;
pub mod input;
pub mod logic;
pub mod models;
pub mod render;
pub mod shared;
pub mod state;
pub mod system;

pub use error::{NotefallError, Result};
