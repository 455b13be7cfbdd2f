//! Time source backed by the host's local clock.

use boldtime_common::layout::{ClockMode, WallTime};
use boldtime_common::watchface::TimeSource;
use chrono::{Local, Timelike};

/// Local wall clock with an optional frozen time for trying out digits.
pub struct LocalClock {
    mode: ClockMode,
    frozen: Option<WallTime>,
}

impl LocalClock {
    pub const fn new(mode: ClockMode) -> Self { Self { mode, frozen: None } }

    pub fn toggle_mode(&mut self) { self.mode = self.mode.toggle(); }

    /// Freeze at the current time, or resume following the local clock.
    pub fn toggle_frozen(&mut self) {
        self.frozen = match self.frozen {
            Some(_) => None,
            None => Some(local_time()),
        };
    }

    pub const fn is_frozen(&self) -> bool { self.frozen.is_some() }

    /// Advance a frozen clock by one hour. No effect while following the
    /// local clock.
    pub fn step_hour(&mut self) {
        if let Some(time) = &mut self.frozen {
            *time = time.advance_hour();
        }
    }

    /// Advance a frozen clock by one minute.
    pub fn step_minute(&mut self) {
        if let Some(time) = &mut self.frozen {
            *time = time.advance_minute();
        }
    }
}

impl TimeSource for LocalClock {
    fn now(&self) -> WallTime { self.frozen.unwrap_or_else(local_time) }

    fn clock_mode(&self) -> ClockMode { self.mode }
}

fn local_time() -> WallTime {
    let now = Local::now();
    WallTime::new(now.hour() as u8, now.minute() as u8).unwrap_or(WallTime::MIDNIGHT)
}
