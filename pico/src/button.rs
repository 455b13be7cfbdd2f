//! Debounced Display Pack buttons.
//!
//! PIM715 buttons are active-low with the internal pull-up enabled:
//! A=GPIO12, B=GPIO13, X=GPIO14, Y=GPIO15.

use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant};

/// Contact bounce shorter than this is ignored.
pub const DEBOUNCE: Duration = Duration::from_millis(50);

/// One button with press-edge detection.
pub struct Button<'d> {
    input: Input<'d>,
    was_pressed: bool,
    last_change: Option<Instant>,
}

impl<'d> Button<'d> {
    pub const fn new(input: Input<'d>) -> Self {
        Self {
            input,
            was_pressed: false,
            last_change: None,
        }
    }

    /// True once per press, on the debounced falling edge.
    pub fn just_pressed(&mut self) -> bool {
        let pressed = self.input.is_low();
        if pressed == self.was_pressed {
            return false;
        }

        if let Some(last) = self.last_change
            && last.elapsed() < DEBOUNCE
        {
            return false;
        }

        self.was_pressed = pressed;
        self.last_change = Some(Instant::now());
        pressed
    }
}
