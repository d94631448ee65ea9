//! Chart container and loaders (JSON charts and osu!mania beatmaps).

use super::lane::{KeyMap, LaneId};
use super::note::ChartEvent;
use crate::error::{NotefallError, Result};
use rosu_map::section::hit_objects::{HitObject, HitObjectKind};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Immutable, time-ordered list of chart events.
///
/// An empty chart is valid and switches the scheduler to procedural mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chart {
    events: Vec<ChartEvent>,
}

impl Chart {
    /// Builds a chart, sorting by target time. The sort is stable so events
    /// sharing a timestamp keep their original order. Negative or non-finite
    /// times are dropped.
    pub fn new(events: Vec<ChartEvent>) -> Self {
        let mut events: Vec<ChartEvent> = events
            .into_iter()
            .filter(|e| {
                let valid = e.target_time.is_finite() && e.target_time >= 0.0;
                if !valid {
                    log::warn!("CHART: Dropping event with invalid time {}", e.target_time);
                }
                valid
            })
            .collect();
        events.sort_by(|a, b| a.target_time.total_cmp(&b.target_time));
        Self { events }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[ChartEvent] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&ChartEvent> {
        self.events.get(index)
    }

    /// Index of the first event whose target time is `>= time`.
    pub fn first_at_or_after(&self, time: f64) -> usize {
        self.events.partition_point(|e| e.target_time < time)
    }

    /// Target time of the last event, 0 for an empty chart.
    pub fn duration(&self) -> f64 {
        self.events.last().map_or(0.0, |e| e.target_time)
    }

    /// Removes events whose lane is not in `keymap`.
    pub fn retain_mapped(mut self, keymap: &KeyMap) -> Self {
        self.events.retain(|e| match keymap.check(e.lane) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("CHART: Skipping event at {:.3}s: {}", e.target_time, err);
                false
            }
        });
        self
    }

    /// The sample chart bundled with the game (lanes A S D F).
    pub fn demo() -> Self {
        const DEMO: [(f64, usize); 15] = [
            (1.0, 0),
            (1.4, 1),
            (1.8, 2),
            (2.2, 3),
            (3.0, 0),
            (3.4, 1),
            (3.8, 2),
            (4.2, 3),
            (5.0, 0),
            (5.4, 1),
            (6.0, 3),
            (6.5, 2),
            (7.2, 0),
            (7.8, 1),
            (8.2, 3),
        ];
        Self::new(
            DEMO.iter()
                .map(|&(time, lane)| ChartEvent::new(time, LaneId(lane)))
                .collect(),
        )
    }

    /// Loads a chart, picking the format from the file extension.
    pub fn load(path: &Path, keymap: &KeyMap) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let chart = match ext.as_deref() {
            Some("json") => {
                let content = fs::read_to_string(path).map_err(|source| NotefallError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_json_str(&content, keymap)?
            }
            Some("osu") => {
                let map = rosu_map::Beatmap::from_path(path).map_err(|e| {
                    NotefallError::Beatmap {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    }
                })?;
                Self::from_beatmap(&map)
            }
            _ => return Err(NotefallError::UnsupportedChart(path.to_path_buf())),
        };

        let chart = chart.retain_mapped(keymap);
        log::info!("CHART: Loaded {} events from {:?}", chart.len(), path);
        Ok(chart)
    }

    /// Parses a JSON chart: `[{ "time": 1.0, "lane": 0 }, { "time": 1.4, "key": "s" }]`.
    ///
    /// Entries naming an unbound key are skipped.
    pub fn from_json_str(content: &str, keymap: &KeyMap) -> Result<Self> {
        let entries: Vec<JsonEntry> = serde_json::from_str(content)?;
        let events = entries
            .into_iter()
            .filter_map(|entry| {
                let lane = match entry.lane {
                    LaneRef::Index(i) => Some(LaneId(i)),
                    LaneRef::Key(ref key) => {
                        let lane = keymap.lane_for(key);
                        if lane.is_none() {
                            log::warn!("CHART: Key {:?} at {:.3}s is not bound", key, entry.time);
                        }
                        lane
                    }
                }?;
                Some(ChartEvent::new(entry.time, lane))
            })
            .collect();
        Ok(Self::new(events))
    }

    /// Converts osu!mania hit objects (circles and hold heads) into events.
    pub fn from_beatmap(map: &rosu_map::Beatmap) -> Self {
        let key_count = map.circle_size as u8;
        let events = map
            .hit_objects
            .iter()
            .filter_map(|h| parse_hit_object(h, key_count))
            .collect();
        Self::new(events)
    }
}

#[derive(Deserialize)]
struct JsonEntry {
    time: f64,
    #[serde(alias = "key")]
    lane: LaneRef,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LaneRef {
    Index(usize),
    Key(String),
}

/// Parses an osu! hit object into a chart event (milliseconds → seconds).
fn parse_hit_object(hit_object: &HitObject, key_count: u8) -> Option<ChartEvent> {
    let x = match &hit_object.kind {
        HitObjectKind::Circle(circle) => circle.pos.x,
        HitObjectKind::Hold(hold) => hold.pos_x,
        _ => return None,
    };
    let column = x_to_column(x as i32, key_count)?;
    Some(ChartEvent::new(hit_object.start_time / 1000.0, LaneId(column)))
}

/// Converts an osu!mania X position into a column index.
///
/// The osu! playfield is 512 units wide, split evenly between columns.
pub fn x_to_column(x: i32, key_count: u8) -> Option<usize> {
    if key_count == 0 || x < 0 {
        return None;
    }
    let column_width = 512.0 / key_count as f32;
    let col = (x as f32 / column_width).floor() as usize;
    if col < key_count as usize {
        Some(col)
    } else {
        log::warn!("CHART: Unknown column position: {x}");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keymap() -> KeyMap {
        KeyMap::new(&["a".into(), "s".into(), "d".into(), "f".into()])
    }

    #[test]
    fn test_sort_is_stable() {
        let chart = Chart::new(vec![
            ChartEvent::new(2.0, LaneId(0)),
            ChartEvent::new(1.0, LaneId(3)),
            ChartEvent::new(1.0, LaneId(1)),
            ChartEvent::new(-1.0, LaneId(2)),
        ]);
        let lanes: Vec<usize> = chart.events().iter().map(|e| e.lane.0).collect();
        assert_eq!(lanes, vec![3, 1, 0]);
        assert_eq!(chart.duration(), 2.0);
    }

    #[test]
    fn test_first_at_or_after() {
        let chart = Chart::demo();
        assert_eq!(chart.first_at_or_after(0.4), 0);
        assert_eq!(chart.first_at_or_after(1.0), 0);
        assert_eq!(chart.first_at_or_after(1.01), 1);
        assert_eq!(chart.first_at_or_after(100.0), chart.len());
    }

    #[test]
    fn test_json_accepts_indices_and_keys() {
        let json = r#"[
            { "time": 1.4, "key": "s" },
            { "time": 1.0, "lane": 0 },
            { "time": 2.0, "key": "q" },
            { "time": 3.0, "lane": "f" }
        ]"#;
        let chart = Chart::from_json_str(json, &keymap()).unwrap();
        assert_eq!(
            chart.events(),
            &[
                ChartEvent::new(1.0, LaneId(0)),
                ChartEvent::new(1.4, LaneId(1)),
                ChartEvent::new(3.0, LaneId(3)),
            ]
        );
    }

    #[test]
    fn test_json_rejects_garbage() {
        assert!(matches!(
            Chart::from_json_str("{ nope", &keymap()),
            Err(NotefallError::Json(_))
        ));
    }

    #[test]
    fn test_retain_mapped_drops_invalid_lanes() {
        let chart = Chart::new(vec![
            ChartEvent::new(1.0, LaneId(0)),
            ChartEvent::new(2.0, LaneId(6)),
        ])
        .retain_mapped(&keymap());
        assert_eq!(chart.len(), 1);
    }

    #[test]
    fn test_x_to_column() {
        assert_eq!(x_to_column(64, 4), Some(0));
        assert_eq!(x_to_column(192, 4), Some(1));
        assert_eq!(x_to_column(448, 4), Some(3));
        assert_eq!(x_to_column(256, 7), Some(3));
        assert_eq!(x_to_column(600, 4), None);
        assert_eq!(x_to_column(64, 0), None);
    }

    #[test]
    fn test_beatmap_circles() {
        let osu = "osu file format v14\n\n[General]\nAudioFilename: audio.mp3\nMode: 3\n\n[Difficulty]\nCircleSize:4\n\n[HitObjects]\n448,192,1500,1,0,0:0:0:0:\n64,192,1000,1,0,0:0:0:0:\n";
        let map = rosu_map::Beatmap::from_bytes(osu.as_bytes()).unwrap();
        let chart = Chart::from_beatmap(&map);
        assert_eq!(
            chart.events(),
            &[
                ChartEvent::new(1.0, LaneId(0)),
                ChartEvent::new(1.5, LaneId(3)),
            ]
        );
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let err = Chart::load(Path::new("song.mid"), &keymap()).unwrap_err();
        assert!(matches!(err, NotefallError::UnsupportedChart(_)));
    }
}
