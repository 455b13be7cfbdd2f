//! Bold Time watchface simulator for desktop.
//!
//! Runs the watchface core against an `embedded-graphics-simulator` window
//! the size of the firmware's panel. Settings persist to a file
//! (`$BOLDTIME_SETTINGS`, default `boldtime-settings.bin`).
//!
//! Keys:
//!
//! | Key       | Action                                   |
//! |-----------|------------------------------------------|
//! | `6` `7` `9` | Toggle the six, seven and nine tails   |
//! | `G` / `B` | Cycle gap / border thickness             |
//! | `C`       | Next color preset                        |
//! | `T`       | Toggle 12/24-hour display                |
//! | `O`       | Toggle the simulated system overlay      |
//! | `F`       | Freeze / unfreeze the clock              |
//! | `H` / `M` | Advance a frozen clock by an hour / minute |
//! | `Escape`  | Quit                                     |
//!
//! Lines on stdin such as `gap_thickness=4 six_tail=0` are applied as
//! configuration messages.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

mod clock;
mod input;
mod store;
mod timing;

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Instant;

use boldtime_common::colors::DARK_GRAY;
use boldtime_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use boldtime_common::event_log::Level;
use boldtime_common::layout::ClockMode;
use boldtime_common::settings::SettingsStore;
use boldtime_common::watchface::{Host, TimeSource, Watchface};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::clock::LocalClock;
use crate::input::{StyleKeys, parse_line};
use crate::store::FileStore;
use crate::timing::FRAME_TIME;

/// Height of the simulated system overlay at the bottom of the screen.
const OVERLAY_HEIGHT: u32 = 60;

/// Repaint request raised by the watchface and cleared by the main loop.
struct RepaintFlag(bool);

impl RepaintFlag {
    fn take(&mut self) -> bool { std::mem::replace(&mut self.0, false) }
}

impl Host for RepaintFlag {
    fn request_repaint(&mut self) { self.0 = true; }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = FileStore::from_env();
    info!(path = %store.path().display(), "settings store");
    let mut face = Watchface::start(store);
    forward_log(&mut face);

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Bold Time", &output_settings);

    let mut clock = LocalClock::new(ClockMode::default());
    let mut keys = StyleKeys::default();
    let mut overlay = false;
    let mut repaint = RepaintFlag(false);
    let mut shown = clock.now();
    let lines = spawn_stdin_reader();

    draw(&mut display, &face, &clock, overlay);
    window.update(&display);

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Escape => return,
                        Keycode::T => {
                            clock.toggle_mode();
                            info!(mode = clock.clock_mode().label(), "clock mode");
                            repaint.request_repaint();
                        }
                        Keycode::O => {
                            overlay = !overlay;
                            info!(overlay, "system overlay");
                            repaint.request_repaint();
                        }
                        Keycode::F => {
                            clock.toggle_frozen();
                            info!(frozen = clock.is_frozen(), "clock");
                        }
                        Keycode::H => clock.step_hour(),
                        Keycode::M => clock.step_minute(),
                        _ => {
                            if let Some(message) = keys.message_for(keycode, face.style()) {
                                if keycode == Keycode::C {
                                    info!(preset = keys.preset_name(), "color preset");
                                }
                                face.on_config_message(&message, &mut repaint);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        // Configuration messages from stdin
        while let Ok(line) = lines.try_recv() {
            let entries = parse_line(&line);
            if !entries.is_empty() {
                face.on_config_message(&entries, &mut repaint);
            }
        }

        let now = clock.now();
        if now != shown {
            shown = now;
            face.on_minute_tick(&mut repaint);
        }

        if repaint.take() {
            draw(&mut display, &face, &clock, overlay);
        }
        forward_log(&mut face);

        window.update(&display);

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

/// Paint the face into the unobstructed part of the screen.
fn draw<S: SettingsStore>(
    display: &mut SimulatorDisplay<Rgb565>,
    face: &Watchface<S>,
    clock: &LocalClock,
    overlay: bool,
) {
    let screen = display.bounding_box();
    let bounds = if overlay {
        let visible = SCREEN_HEIGHT.saturating_sub(OVERLAY_HEIGHT);
        let band = Rectangle::new(
            Point::new(screen.top_left.x, screen.top_left.y + visible as i32),
            Size::new(SCREEN_WIDTH, OVERLAY_HEIGHT),
        );
        display.fill_solid(&band, DARK_GRAY.into()).ok();
        Rectangle::new(screen.top_left, Size::new(SCREEN_WIDTH, visible))
    } else {
        screen
    };

    face.render(display, bounds, clock).ok();
}

/// Forward the watchface's event log to `tracing`.
fn forward_log<S: SettingsStore>(face: &mut Watchface<S>) {
    for entry in face.drain_log() {
        match entry.level() {
            Level::Info => info!("{}", entry.text()),
            Level::Warn => warn!("{}", entry.text()),
        }
    }
}

/// Read stdin on a background thread, one line per message.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
