//! Watchface controller.
//!
//! [`Watchface`] owns the current style, the glyph table built from it and the
//! settings store. Hosts forward their lifecycle events to it and call
//! [`Watchface::render`] from their paint path:
//!
//! ```ignore
//! let mut face = Watchface::start(store);
//!
//! // every minute
//! face.on_minute_tick(&mut host);
//!
//! // when the settings page sends a message
//! face.on_config_message(&entries, &mut host);
//!
//! // when the host repaints
//! face.render(&mut display, bounds, &clock)?;
//! ```

use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::PackedColor;
use crate::event_log::{EventLog, LogEntry};
use crate::layout::{ClockMode, FaceDigits, WallTime, render_face};
use crate::message::{ApplyReport, ConfigEntry, apply_message};
use crate::segments::GlyphTable;
use crate::settings::{SettingsStore, load_settings, save_settings};
use crate::style::StyleConfig;

// =============================================================================
// Host Interfaces
// =============================================================================

/// Host services the controller calls back into.
pub trait Host {
    /// Mark the face dirty so the host repaints it soon.
    fn request_repaint(&mut self);
}

impl<F: FnMut()> Host for F {
    fn request_repaint(&mut self) { self() }
}

/// Source of the time to display.
pub trait TimeSource {
    fn now(&self) -> WallTime;

    fn clock_mode(&self) -> ClockMode;
}

/// A time source that always reports the same time.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedTime {
    pub time: WallTime,
    pub mode: ClockMode,
}

impl FixedTime {
    pub const fn new(
        time: WallTime,
        mode: ClockMode,
    ) -> Self {
        Self { time, mode }
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> WallTime { self.time }

    fn clock_mode(&self) -> ClockMode { self.mode }
}

// =============================================================================
// Controller
// =============================================================================

pub struct Watchface<S: SettingsStore> {
    store: S,
    style: StyleConfig,
    glyphs: GlyphTable,
    log: EventLog,
}

impl<S: SettingsStore> Watchface<S> {
    /// Load the persisted style (or defaults) and build the glyph table.
    pub fn start(mut store: S) -> Self {
        let mut log = EventLog::new();
        let style = load_settings(&mut store, &mut log);
        Self {
            store,
            glyphs: GlyphTable::new(style.tails),
            style,
            log,
        }
    }

    /// Called once per minute.
    pub fn on_minute_tick<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
    ) {
        host.request_repaint();
    }

    /// Apply a configuration message, persist the result and repaint.
    ///
    /// The style is saved and a repaint requested even when no entry was
    /// valid.
    pub fn on_config_message<H: Host + ?Sized>(
        &mut self,
        entries: &[ConfigEntry<'_>],
        host: &mut H,
    ) -> ApplyReport {
        let report = apply_message(&mut self.style, entries);
        if report.unknown > 0 || report.malformed > 0 {
            self.log.warn(format_args!(
                "config: {} applied, {} unknown, {} malformed",
                report.applied, report.unknown, report.malformed
            ));
        } else {
            self.log.info(format_args!("config: {} applied", report.applied));
        }

        if self.glyphs.tails() != self.style.tails {
            self.glyphs = GlyphTable::new(self.style.tails);
        }

        save_settings(&mut self.store, &self.style, &mut self.log);
        host.request_repaint();
        report
    }

    /// Paint the face for the current time into `bounds`.
    ///
    /// `bounds` is the unobstructed part of the screen; drawing is clipped to
    /// it.
    pub fn render<D, C, T>(
        &self,
        display: &mut D,
        bounds: Rectangle,
        time: &T,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
        C: PixelColor + From<PackedColor>,
        T: TimeSource + ?Sized,
    {
        let digits = FaceDigits::new(time.now(), time.clock_mode());
        render_face(display, bounds, digits, &self.style, &self.glyphs)
    }

    pub const fn style(&self) -> &StyleConfig { &self.style }

    pub const fn store(&self) -> &S { &self.store }

    /// Pending log entries, oldest first. Entries are removed as they are
    /// yielded.
    pub fn drain_log(&mut self) -> impl Iterator<Item = LogEntry> + '_ { core::iter::from_fn(move || self.log.pop()) }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::Rgb888;

    use super::*;
    use crate::event_log::Level;
    use crate::settings::MemoryStore;

    #[derive(Default)]
    struct CountingHost {
        repaints: u32,
    }

    impl Host for CountingHost {
        fn request_repaint(&mut self) { self.repaints += 1; }
    }

    fn area() -> Rectangle { Rectangle::new(Point::zero(), Size::new(64, 64)) }

    fn noon() -> FixedTime { FixedTime::new(WallTime::NOON, ClockMode::TwentyFourHour) }

    #[test]
    fn test_start_with_empty_store() {
        let mut face = Watchface::start(MemoryStore::new());
        assert_eq!(face.style(), &StyleConfig::DEFAULT);
        assert_eq!(face.glyphs.tails(), StyleConfig::DEFAULT.tails);

        let entries: std::vec::Vec<_> = face.drain_log().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level(), Level::Info);
        assert_eq!(face.drain_log().count(), 0);
    }

    #[test]
    fn test_start_with_saved_style() {
        let saved = StyleConfig {
            border_thickness: 6,
            ..StyleConfig::DEFAULT
        };
        let face = Watchface::start(MemoryStore::with_bytes(&saved.to_bytes()));
        assert_eq!(face.style(), &saved);
    }

    #[test]
    fn test_minute_tick_requests_repaint() {
        let mut face = Watchface::start(MemoryStore::new());
        let mut host = CountingHost::default();
        face.on_minute_tick(&mut host);
        face.on_minute_tick(&mut host);
        assert_eq!(host.repaints, 2);
        assert_eq!(face.store().writes(), 0);
    }

    #[test]
    fn test_config_message_persists_and_repaints() {
        let mut face = Watchface::start(MemoryStore::new());
        let mut host = CountingHost::default();

        let report = face.on_config_message(
            &[ConfigEntry::int("seven_tail", 1), ConfigEntry::int("gap_thickness", 4)],
            &mut host,
        );

        assert_eq!(report.applied, 2);
        assert_eq!(host.repaints, 1);
        assert!(face.style().tails.seven);
        assert_eq!(face.glyphs.tails(), face.style().tails);
        assert_eq!(face.store().record(), Some(&face.style().to_bytes()[..]));
    }

    #[test]
    fn test_invalid_message_still_persists_and_repaints() {
        let mut face = Watchface::start(MemoryStore::new());
        face.drain_log().for_each(drop);
        let mut host = CountingHost::default();

        let report = face.on_config_message(&[ConfigEntry::int("border_thickness", 500)], &mut host);

        assert!(!report.changed());
        assert_eq!(face.style(), &StyleConfig::DEFAULT);
        assert_eq!(host.repaints, 1);
        assert_eq!(face.store().writes(), 1);
        assert_eq!(face.drain_log().next().map(|e| e.level()), Some(Level::Warn));
    }

    #[test]
    fn test_closure_host() {
        let mut face = Watchface::start(MemoryStore::new());
        let mut repaints = 0;
        face.on_minute_tick(&mut || repaints += 1);
        assert_eq!(repaints, 1);
    }

    #[test]
    fn test_render_uses_current_style() {
        let mut face = Watchface::start(MemoryStore::new());
        let mut display = MockDisplay::<Rgb888>::new();
        display.set_allow_overdraw(true);

        face.render(&mut display, area(), &noon()).unwrap();
        assert_eq!(display.get_pixel(Point::zero()), Some(Rgb888::BLACK));

        face.on_config_message(&[ConfigEntry::int("background_color", 0xFF_FF_FF)], &mut || {});
        face.render(&mut display, area(), &noon()).unwrap();
        assert_eq!(display.get_pixel(Point::zero()), Some(Rgb888::WHITE));
    }

    #[test]
    fn test_render_stays_inside_bounds() {
        let face = Watchface::start(MemoryStore::new());
        let mut display = MockDisplay::<Rgb888>::new();
        display.set_allow_overdraw(true);

        let bounds = Rectangle::new(Point::zero(), Size::new(64, 40));
        face.render(&mut display, bounds, &noon()).unwrap();

        assert_eq!(display.get_pixel(Point::new(10, 39)), Some(Rgb888::BLACK));
        assert_eq!(display.get_pixel(Point::new(10, 40)), None);
    }

    #[test]
    fn test_render_clips_negative_border() {
        let style = StyleConfig {
            border_thickness: -5,
            ..StyleConfig::DEFAULT
        };
        let face = Watchface::start(MemoryStore::with_bytes(&style.to_bytes()));
        let mut display = MockDisplay::<Rgb888>::new();
        display.set_allow_overdraw(true);

        let bounds = Rectangle::new(Point::new(0, 8), Size::new(64, 40));
        face.render(&mut display, bounds, &noon()).unwrap();

        for y in 0..64 {
            for x in 0..64 {
                let point = Point::new(x, y);
                assert_eq!(display.get_pixel(point).is_some(), bounds.contains(point), "pixel {point:?}");
            }
        }
    }
}
