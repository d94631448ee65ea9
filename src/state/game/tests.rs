use super::*;
use crate::error::NotefallError;
use crate::input::events::GameAction;
use crate::logic::clock::ManualClock;
use crate::models::engine::LaneId;
use crate::models::stats::Judgement;

type TestSession = GameSession<ManualClock, Vec<FeedbackEvent>>;

fn settings() -> EngineSettings {
    EngineSettings {
        // ±0.04 progress around the hit zone (420px travel).
        hit_window: 16.8,
        ..EngineSettings::default()
    }
}

fn session(chart: Chart) -> TestSession {
    GameSession::with_rng(
        &settings(),
        chart,
        ManualClock::new(),
        Vec::new(),
        StdRng::seed_from_u64(42),
    )
    .unwrap()
}

fn single_note() -> Chart {
    Chart::new(vec![ChartEvent::new(1.0, LaneId(0))])
}

fn tick_at(s: &mut TestSession, t: f64) {
    s.timeline_mut().set_position(t);
    s.tick();
}

fn hits(s: &TestSession) -> Vec<(LaneId, u32)> {
    s.sink()
        .iter()
        .filter_map(|e| match e {
            FeedbackEvent::Hit { lane, score } => Some((*lane, *score)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_note_spawns_at_start_and_is_hit_on_time() {
    let mut s = session(single_note());
    assert_eq!(s.phase(), SessionPhase::Idle);
    assert!(s.start());
    assert_eq!(s.tracker().len(), 1);

    tick_at(&mut s, 1.0);
    let note = s.tracker().notes()[0];
    let progress = s.tracker().motion().progress(note.target_time, 1.0);
    assert!((progress - 1.0).abs() < 1e-12);

    let result = s.press_key("a");
    assert!(result.is_hit());
    assert_eq!(s.score(), 10);
    assert!(s.tracker().is_empty());
    assert_eq!(hits(&s), vec![(LaneId(0), 10)]);
}

#[test]
fn test_unjudged_note_expires_silently() {
    let mut s = session(single_note());
    s.start();

    tick_at(&mut s, 1.49);
    assert_eq!(s.tracker().len(), 1);

    tick_at(&mut s, 1.5);
    assert!(s.tracker().is_empty());
    assert_eq!(s.score(), 0);
    assert_eq!(s.stats().expired, 1);
    assert!(hits(&s).is_empty());
}

#[test]
fn test_press_in_empty_lane_changes_nothing() {
    let mut s = session(single_note());
    s.start();
    tick_at(&mut s, 1.0);

    assert_eq!(s.press_key("s"), Judgement::Ignored);
    assert_eq!(s.press_key("z"), Judgement::Ignored);
    assert_eq!(s.press_lane(LaneId(12)), Judgement::Ignored);
    assert_eq!(s.score(), 0);
    assert_eq!(s.tracker().len(), 1);
}

#[test]
fn test_early_press_is_a_no_op() {
    let mut s = session(single_note());
    s.start();
    tick_at(&mut s, 0.8);

    assert_eq!(s.press_key("a"), Judgement::Ignored);
    assert_eq!(s.tracker().len(), 1);
    assert_eq!(s.stats().ignored_presses, 1);

    // The same note is still hittable on time.
    tick_at(&mut s, 0.95);
    assert!(s.press_key("a").is_hit());
}

#[test]
fn test_tick_twice_is_idempotent() {
    let mut s = session(Chart::demo());
    s.start();

    tick_at(&mut s, 1.2);
    let first = s.snapshot();
    let cursor = s.state().next_chart_index;
    tick_at(&mut s, 1.2);

    assert_eq!(s.snapshot(), first);
    assert_eq!(s.state().next_chart_index, cursor);
}

#[test]
fn test_seek_back_resets_cursor_and_clears_notes() {
    let chart = Chart::new(
        [1.0, 2.0, 3.0, 4.0, 7.0, 9.0]
            .iter()
            .map(|&t| ChartEvent::new(t, LaneId(1)))
            .collect(),
    );
    let mut s = session(chart);
    s.start();
    tick_at(&mut s, 5.0);
    assert_eq!(s.state().next_chart_index, 5);
    assert!(!s.tracker().is_empty());

    s.seek(0.5);
    assert!(s.tracker().is_empty());
    assert_eq!(s.state().next_chart_index, 0);
    assert!(s.is_running());
}

#[test]
fn test_seek_forward_never_resurrects_past_notes() {
    let mut s = session(Chart::demo());
    s.start();
    s.press_lane_at(LaneId(0), 1.0);
    let score = s.score();

    s.seek(5.0);
    let first = s.state().next_chart_index;
    assert_eq!(s.timeline().position(), 5.0);
    assert!(Chart::demo().events()[first].target_time >= 4.9);
    assert!(Chart::demo().events()[first - 1].target_time < 4.9);

    tick_at(&mut s, 5.0);
    assert!(!s.tracker().is_empty());
    assert!(s.tracker().notes().iter().all(|n| n.target_time >= 4.9));
    assert_eq!(s.score(), score);
}

#[test]
fn test_double_start_is_a_no_op() {
    let mut s = session(single_note());
    assert!(s.start());
    tick_at(&mut s, 1.0);
    s.press_key("a");

    assert!(!s.start());
    assert_eq!(s.score(), 10);
    assert_eq!(s.timeline().position(), 1.0);
}

#[test]
fn test_stop_clears_notes_and_signals_end() {
    let mut s = session(Chart::demo());
    assert!(!s.stop());
    s.start();
    tick_at(&mut s, 1.0);
    s.press_key("a");
    assert!(!s.tracker().is_empty());

    assert!(s.stop());
    assert_eq!(s.phase(), SessionPhase::Stopped);
    assert!(s.tracker().is_empty());
    assert!(matches!(
        s.sink().last(),
        Some(FeedbackEvent::SessionEnded { score: 10, .. })
    ));

    // Nothing fires after stop.
    let events = s.sink().len();
    tick_at(&mut s, 1.4);
    s.spawn_tick();
    assert_eq!(s.press_key("s"), Judgement::Ignored);
    assert_eq!(s.sink().len(), events);
    assert!(s.tracker().is_empty());
}

#[test]
fn test_restart_after_stop_resets_state() {
    let mut s = session(single_note());
    s.start();
    tick_at(&mut s, 1.0);
    s.press_key("a");
    s.stop();

    assert!(s.start());
    let state = s.state();
    assert!(state.running);
    assert_eq!(state.score, 0);
    assert_eq!(state.timeline_position, 0.0);
    // The chart note was respawned by the initial tick.
    assert_eq!(state.next_chart_index, 1);
    assert_eq!(s.tracker().len(), 1);
}

#[test]
fn test_timeline_end_stops_session() {
    let mut s = session(Chart::demo());
    s.start();
    tick_at(&mut s, 2.0);
    s.timeline_mut().finish();
    s.tick();

    assert_eq!(s.phase(), SessionPhase::Stopped);
    assert!(s.tracker().is_empty());
    assert!(matches!(s.sink().last(), Some(FeedbackEvent::SessionEnded { .. })));
}

#[test]
fn test_pause_halts_procedural_generation() {
    let mut s = session(Chart::empty());
    s.start();
    assert!(s.tracker().is_empty());
    assert!(s.procedural_armed());

    s.timeline_mut().set_position(0.6);
    s.spawn_tick();
    assert_eq!(s.tracker().len(), 1);

    s.pause();
    assert!(!s.procedural_armed());
    assert!(s.is_running());
    s.timeline_mut().set_position(1.3);
    s.spawn_tick();
    assert_eq!(s.tracker().len(), 1);

    s.resume();
    s.spawn_tick();
    assert_eq!(s.tracker().len(), 2);
}

#[test]
fn test_procedural_notes_land_one_travel_ahead() {
    let mut s = session(Chart::empty());
    s.start();
    s.timeline_mut().set_position(0.6);
    s.spawn_tick();
    let note = s.tracker().notes()[0];
    assert!((note.target_time - 3.1).abs() < 1e-9);
    assert!(note.lane.index() < 4);
}

#[test]
fn test_chart_scheduling_survives_pause_without_double_spawn() {
    let mut s = session(Chart::demo());
    s.start();
    let spawned = s.tracker().len();
    assert_eq!(spawned, 4);

    s.pause();
    s.tick();
    s.resume();
    s.tick();
    assert_eq!(s.tracker().len(), spawned);
    assert!(!s.procedural_armed());
}

#[test]
fn test_unmapped_chart_lanes_are_skipped() {
    let chart = Chart::new(vec![
        ChartEvent::new(1.0, LaneId(0)),
        ChartEvent::new(1.0, LaneId(8)),
    ]);
    let mut s = session(chart);
    s.start();
    assert_eq!(s.tracker().len(), 1);
}

#[test]
fn test_handle_input_routes_actions() {
    let mut s = session(single_note());
    s.handle_input(GameAction::Start);
    assert!(s.is_running());

    s.timeline_mut().set_position(1.0);
    s.handle_input(GameAction::Hit { lane: LaneId(0) });
    assert_eq!(s.score(), 10);

    s.handle_input(GameAction::Stop);
    assert_eq!(s.phase(), SessionPhase::Stopped);
}

#[test]
fn test_frame_reports_lane_positions() {
    let mut s = session(single_note());
    s.start();
    tick_at(&mut s, 1.0);

    let Some(FeedbackEvent::Frame(frame)) = s.sink().last() else {
        panic!("expected a frame");
    };
    assert_eq!(frame.lanes.len(), 4);
    assert_eq!(frame.lanes[0].len(), 1);
    assert!((frame.lanes[0][0] - 400.0).abs() < 1e-9);
}

#[test]
fn test_invalid_settings_are_rejected() {
    let bad = EngineSettings {
        travel_duration: 0.0,
        ..settings()
    };
    let result = TestSession::new(&bad, single_note(), ManualClock::new(), Vec::new());
    assert!(matches!(
        result,
        Err(NotefallError::InvalidConfig {
            field: "travel_duration",
            ..
        })
    ));

    let bad = EngineSettings {
        spawn_interval: 0.0,
        ..settings()
    };
    assert!(TestSession::new(&bad, Chart::empty(), ManualClock::new(), Vec::new()).is_err());
}

#[test]
fn test_late_press_on_expired_note_is_ignored() {
    let wide = EngineSettings {
        hit_window: 100.0,
        ..settings()
    };
    let mut s = TestSession::with_rng(
        &wide,
        single_note(),
        ManualClock::new(),
        Vec::new(),
        StdRng::seed_from_u64(42),
    )
    .unwrap();
    s.start();
    assert_eq!(s.tracker().len(), 1);

    // No tick in between: the note is past expiry but still tracked.
    assert_eq!(s.press_lane_at(LaneId(0), 50.0), Judgement::Ignored);
    assert_eq!(s.score(), 0);
    assert!(hits(&s).is_empty());
    assert_eq!(s.stats().ignored_presses, 1);
}
