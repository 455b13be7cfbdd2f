//! Bold Time watchface firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Shows the time on the Pimoroni PIM715 Display Pack 2.8".
//!
//! Buttons:
//! - A: +1 hour
//! - B: +1 minute
//! - X: toggle 12/24-hour display
//! - Y: next tail style (saved to flash)

#![no_std]
#![no_main]

mod button;
mod clock;
mod display;
mod flash_store;

use boldtime_common::event_log::Level as LogLevel;
use boldtime_common::layout::WallTime;
use boldtime_common::message::ConfigEntry;
use boldtime_common::segments::TailStyle;
use boldtime_common::settings::SettingsStore;
use boldtime_common::watchface::{Host, TimeSource, Watchface};
use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_time::Timer;
use embedded_graphics::prelude::*;
use {defmt_rtt as _, panic_probe as _};

use crate::button::Button;
use crate::clock::UptimeClock;
use crate::display::{display_spi_config, init_display};
use crate::flash_store::FlashStore;

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"boldtime"),
    embassy_rp::binary_info::rp_program_description!(c"Bold Time watchface on PIM715 Display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Button polling period.
const POLL_MS: u64 = 10;

/// Tail styles cycled with the Y button.
const TAIL_PRESETS: [TailStyle; 4] = [
    TailStyle {
        six: true,
        seven: false,
        nine: true,
    },
    TailStyle {
        six: true,
        seven: true,
        nine: true,
    },
    TailStyle {
        six: false,
        seven: false,
        nine: false,
    },
    TailStyle {
        six: false,
        seven: true,
        nine: false,
    },
];

/// Repaint request raised by the watchface and cleared by the main loop.
struct RepaintFlag(bool);

impl RepaintFlag {
    fn take(&mut self) -> bool { core::mem::replace(&mut self.0, false) }
}

impl Host for RepaintFlag {
    fn request_repaint(&mut self) { self.0 = true; }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Bold Time starting...");

    let p = embassy_rp::init(Default::default());

    // Settings from the last flash sector
    let flash = Flash::new_blocking(p.FLASH);
    let mut face = Watchface::start(FlashStore::new(flash));
    forward_log(&mut face);

    // Initialize display pins
    // PIM715 pinout: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let _backlight = Output::new(p.PIN_20, Level::High);

    // Initialize SPI (TX-only, display doesn't need MISO)
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());

    let mut display = match init_display(spi, cs, dc) {
        Ok(display) => display,
        Err(e) => defmt::panic!("display init failed: {}", e),
    };
    info!("Display initialized!");

    // Initialize buttons (active-low with internal pull-up)
    let mut btn_a = Button::new(Input::new(p.PIN_12, Pull::Up));
    let mut btn_b = Button::new(Input::new(p.PIN_13, Pull::Up));
    let mut btn_x = Button::new(Input::new(p.PIN_14, Pull::Up));
    let mut btn_y = Button::new(Input::new(p.PIN_15, Pull::Up));

    let mut clock = UptimeClock::new(WallTime::NOON);
    let mut repaint = RepaintFlag(true);
    let mut shown = clock.now();
    let mut tail_preset = TAIL_PRESETS
        .iter()
        .position(|tails| *tails == face.style().tails)
        .unwrap_or(0);

    info!("Starting main loop...");

    loop {
        if btn_a.just_pressed() {
            clock.advance_hour();
        }
        if btn_b.just_pressed() {
            clock.advance_minute();
        }
        if btn_x.just_pressed() {
            clock.toggle_mode();
            info!("clock mode: {=str}", clock.clock_mode().label());
            repaint.request_repaint();
        }
        if btn_y.just_pressed() {
            tail_preset = (tail_preset + 1) % TAIL_PRESETS.len();
            let tails = TAIL_PRESETS[tail_preset];
            let report = face.on_config_message(
                &[
                    ConfigEntry::int("six_tail", i32::from(tails.six)),
                    ConfigEntry::int("seven_tail", i32::from(tails.seven)),
                    ConfigEntry::int("nine_tail", i32::from(tails.nine)),
                ],
                &mut repaint,
            );
            info!("tail preset {}: {}", tail_preset, report);
        }

        let now = clock.now();
        if now != shown {
            shown = now;
            face.on_minute_tick(&mut repaint);
        }

        if repaint.take() {
            let bounds = display.bounding_box();
            if face.render(&mut display, bounds, &clock).is_err() {
                warn!("render failed");
            }
        }
        forward_log(&mut face);

        Timer::after_millis(POLL_MS).await;
    }
}

/// Forward the watchface's event log to defmt.
fn forward_log<S: SettingsStore>(face: &mut Watchface<S>) {
    for entry in face.drain_log() {
        match entry.level() {
            LogLevel::Info => info!("{=str}", entry.text()),
            LogLevel::Warn => warn!("{=str}", entry.text()),
        }
    }
}
