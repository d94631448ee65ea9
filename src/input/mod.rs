//! Input thread bootstrapping and high-level event routing.

pub mod events;
pub mod manager;

use crate::input::events::{GameAction, RawInputEvent};
use crate::input::manager::InputManager;
use crate::system::bus::{SystemBus, SystemEvent};
use std::io::BufRead;
use std::thread;

pub fn start_thread(
    bus: SystemBus,
    manager: InputManager,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("Input Thread".to_string())
        .spawn(move || {
            log::info!("INPUT: Thread started");

            // Blocking loop: wait for a key, map it, forward it.
            while let Ok(raw_event) = bus.raw_input_rx.recv() {
                if let Some(action) = manager.process(&raw_event) {
                    if let Err(e) = bus.action_tx.send(action) {
                        log::error!("INPUT: Failed to send action (Logic thread died?): {}", e);
                        break;
                    }
                }
            }

            log::info!("INPUT: Thread stopped");
        })
}

/// Reads stdin line by line. Every character of a line is a key press;
/// lines starting with `:` are session commands. End of input quits.
pub fn start_stdin_reader(bus: SystemBus) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("Stdin Reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };

                if line.trim_start().starts_with(':') {
                    match GameAction::from_command(&line) {
                        Some(GameAction::Quit) => break,
                        Some(action) => {
                            if bus.action_tx.send(action).is_err() {
                                return;
                            }
                        }
                        None => log::warn!("INPUT: Unknown command {:?}", line.trim()),
                    }
                    continue;
                }

                for c in line.chars() {
                    if bus.raw_input_tx.send(RawInputEvent::new(c.to_string())).is_err() {
                        return;
                    }
                }
            }

            log::info!("INPUT: End of input, quitting");
            let _ = bus.sys_tx.send(SystemEvent::Quit);
        })
}
