//! Wall clock derived from uptime.
//!
//! The board has no battery-backed RTC, so the clock starts at noon on boot
//! and is set with the A and B buttons.

use boldtime_common::layout::{ClockMode, WallTime};
use boldtime_common::watchface::TimeSource;
use embassy_time::Instant;

pub struct UptimeClock {
    /// Wall time at `epoch`.
    base: WallTime,
    epoch: Instant,
    mode: ClockMode,
}

impl UptimeClock {
    pub fn new(start: WallTime) -> Self {
        Self {
            base: start,
            epoch: Instant::now(),
            mode: ClockMode::default(),
        }
    }

    pub fn advance_hour(&mut self) { self.base = self.base.advance_hour(); }

    pub fn advance_minute(&mut self) { self.base = self.base.advance_minute(); }

    pub fn toggle_mode(&mut self) { self.mode = self.mode.toggle(); }
}

impl TimeSource for UptimeClock {
    fn now(&self) -> WallTime { self.base.plus_minutes(self.epoch.elapsed().as_secs() / 60) }

    fn clock_mode(&self) -> ClockMode { self.mode }
}
