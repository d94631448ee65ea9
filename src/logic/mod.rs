//! Logic thread: owns the game session and drives its two timers.
//!
//! The render tick fires at `tick_rate`; the procedural timer fires every
//! `spawn_interval`. Both are deadlines in the same loop, so they never
//! overlap, and input actions are drained between them.

pub mod clock;

use crate::input::events::GameAction;
use crate::logic::clock::MonotonicClock;
use crate::models::engine::Chart;
use crate::models::settings::EngineSettings;
use crate::render::ChannelSink;
use crate::shared::snapshot::FeedbackEvent;
use crate::state::game::GameSession;
use crate::system::bus::{SystemBus, SystemEvent};
use std::thread;
use std::time::{Duration, Instant};

/// Spawns the logic thread. The session starts immediately.
///
/// `length` is the song length in seconds; the session stops when the
/// timeline reaches it. `None` plays until stopped.
pub fn start_thread(
    bus: SystemBus,
    settings: EngineSettings,
    chart: Chart,
    length: Option<f64>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("Logic Thread".to_string())
        .spawn(move || {
            log::info!("LOGIC: Thread started");

            let timeline = MonotonicClock::new(length);
            let sink = ChannelSink::new(bus.feedback_tx.clone());
            let mut session = match GameSession::new(&settings, chart, timeline, sink) {
                Ok(session) => session,
                Err(e) => {
                    log::error!("LOGIC: Cannot start session: {}", e);
                    let _ = bus.feedback_tx.send(FeedbackEvent::Shutdown);
                    return;
                }
            };

            let tick_dt = Duration::from_secs_f64(1.0 / settings.tick_rate as f64);
            let spawn_dt = Duration::from_secs_f64(settings.spawn_interval);

            session.start();
            let mut next_tick = Instant::now();
            let mut next_spawn = Instant::now() + spawn_dt;

            loop {
                // 1. Process input actions
                while let Ok(action) = bus.action_rx.try_recv() {
                    if action == GameAction::Quit {
                        shutdown(&bus, &mut session);
                        return;
                    }
                    let was_armed = session.procedural_armed();
                    let seeked = matches!(action, GameAction::Seek { .. });
                    session.handle_input(action);
                    if restarts_spawn_timer(seeked, was_armed, session.procedural_armed()) {
                        next_spawn = Instant::now() + spawn_dt;
                    }
                }

                // 2. Handle system events
                while let Ok(sys_evt) = bus.sys_rx.try_recv() {
                    match sys_evt {
                        SystemEvent::Quit => {
                            log::info!("LOGIC: Quit received...");
                            shutdown(&bus, &mut session);
                            return;
                        }
                    }
                }

                // 3. Timers. A stopped session disarms both.
                let now = Instant::now();
                if session.is_running() && now >= next_tick {
                    let was_armed = session.procedural_armed();
                    session.tick();
                    if !was_armed && session.procedural_armed() {
                        next_spawn = now + spawn_dt;
                    }
                    next_tick += tick_dt;
                    if next_tick < now {
                        next_tick = now + tick_dt;
                    }
                }
                if session.procedural_armed() && now >= next_spawn {
                    session.spawn_tick();
                    next_spawn = now + spawn_dt;
                }
                if !session.is_running() {
                    next_tick = now;
                }

                thread::sleep(Duration::from_millis(1));
            }
        })
}

fn shutdown(bus: &SystemBus, session: &mut GameSession<MonotonicClock, ChannelSink>) {
    session.stop();
    // Blocking send: the render loop must learn about the shutdown.
    let _ = bus.feedback_tx.send(FeedbackEvent::Shutdown);
    log::info!("LOGIC: Thread stopped");
}

/// Whether the spawn deadline must restart. A seek re-anchors the generator
/// at the new position, so the wall-clock deadline follows it.
fn restarts_spawn_timer(seeked: bool, was_armed: bool, armed: bool) -> bool {
    armed && (seeked || !was_armed)
}
