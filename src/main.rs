//! Headless entry point and thread bootstrapper.
//!
//! Usage: `notefall [--config FILE] [--random] [CHART]`
//!
//! Type key characters followed by Enter to play; `:pause`, `:play`,
//! `:seek SECS`, `:stop`, `:start` and `:quit` control the session.

use notefall::input::{self, manager::InputManager};
use notefall::logic;
use notefall::models::engine::Chart;
use notefall::models::settings::{EngineSettings, SETTINGS_FILE};
use notefall::render;
use notefall::system::bus::SystemBus;
use std::path::PathBuf;

/// Seconds of play after the last chart note before the song ends.
const OUTRO_SECONDS: f64 = 2.0;

struct Args {
    config: PathBuf,
    chart: Option<PathBuf>,
    random: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        config: PathBuf::from(SETTINGS_FILE),
        chart: None,
        random: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => match iter.next() {
                Some(path) => args.config = PathBuf::from(path),
                None => log::warn!("MAIN: --config needs a path"),
            },
            "--random" => args.random = true,
            _ => args.chart = Some(PathBuf::from(arg)),
        }
    }
    args
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("MAIN: Booting notefall...");

    let args = parse_args();
    let settings = EngineSettings::load_or_default(&args.config);
    let keymap = settings.keymap();

    let chart = match (&args.chart, args.random) {
        (_, true) => Chart::empty(),
        (Some(path), false) => match Chart::load(path, &keymap) {
            Ok(chart) => chart,
            Err(e) => {
                log::error!("MAIN: {}; falling back to random notes", e);
                Chart::empty()
            }
        },
        (None, false) => Chart::demo(),
    };

    let length = if chart.is_empty() {
        None
    } else {
        Some(chart.duration() + OUTRO_SECONDS)
    };

    let bus = SystemBus::new();

    let started = input::start_thread(bus.clone(), InputManager::new(keymap))
        .and_then(|_| input::start_stdin_reader(bus.clone()))
        .and_then(|_| logic::start_thread(bus.clone(), settings, chart, length));
    if let Err(e) = started {
        log::error!("MAIN: Failed to spawn threads: {}", e);
        std::process::exit(1);
    }

    render::run(bus);
}
