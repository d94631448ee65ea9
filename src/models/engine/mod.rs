pub mod chart;
pub mod hit_window;
pub mod lane;
pub mod note;
pub mod playfield;

pub use chart::Chart;
pub use hit_window::HitWindow;
pub use lane::{KeyMap, LaneId, normalize_key};
pub use note::{ChartEvent, Note};
pub use playfield::PlayfieldConfig;
