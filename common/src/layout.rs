//! Face layout: four digit boxes (HH over MM) filling the drawable area.
//!
//! ```text
//! +-----------------------------------+
//! |  border                           |
//! |  +--------+  gap  +-----------+   |
//! |  | h tens |       | h ones +c |   |
//! |  +--------+       +-----------+   |
//! |     gap                           |
//! |  +--------+       +-----------+   |
//! |  | m tens |       | m ones +c |   |
//! |  |   +c   |       |    +c     |   |
//! |  +--------+       +-----------+   |
//! +-----------------------------------+
//! ```
//!
//! `+c` is a one pixel correction applied when the gap is odd, so that the
//! boxes, border and gap add up to the full area. Right-column boxes get it in
//! width, bottom-row boxes in height.
//!
//! Arithmetic runs in `i64` and results are clamped, so any combination of
//! area size, border and gap (including negative values) produces valid
//! rectangles. Boxes that would have a negative size are zero-sized.

use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::PackedColor;
use crate::digit::draw_digit;
use crate::segments::GlyphTable;
use crate::style::StyleConfig;

// =============================================================================
// Time
// =============================================================================

/// Hour display convention.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockMode {
    /// 1..=12
    TwelveHour,
    /// 0..=23
    #[default]
    TwentyFourHour,
}

impl ClockMode {
    pub const fn toggle(self) -> Self {
        match self {
            Self::TwelveHour => Self::TwentyFourHour,
            Self::TwentyFourHour => Self::TwelveHour,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TwelveHour => "12h",
            Self::TwentyFourHour => "24h",
        }
    }
}

/// Rejected wall-clock components.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeError {
    HourOutOfRange(u8),
    MinuteOutOfRange(u8),
}

impl core::fmt::Display for TimeError {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::HourOutOfRange(h) => write!(f, "hour {h} is not in 0..=23"),
            Self::MinuteOutOfRange(m) => write!(f, "minute {m} is not in 0..=59"),
        }
    }
}

/// Hour and minute of the day, always valid.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    hour: u8,
    minute: u8,
}

impl WallTime {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };
    pub const NOON: Self = Self { hour: 12, minute: 0 };

    pub const fn new(
        hour: u8,
        minute: u8,
    ) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(TimeError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    pub const fn hour(self) -> u8 { self.hour }

    pub const fn minute(self) -> u8 { self.minute }

    /// Hour as shown on the face. In 12-hour mode midnight reads 12 and
    /// afternoon hours drop by 12; 24-hour mode shows the hour unchanged.
    pub const fn display_hour(
        self,
        mode: ClockMode,
    ) -> u8 {
        match mode {
            ClockMode::TwelveHour if self.hour == 0 => 12,
            ClockMode::TwelveHour if self.hour > 12 => self.hour - 12,
            _ => self.hour,
        }
    }

    /// Next minute, rolling over into the hour and the day.
    pub const fn advance_minute(self) -> Self {
        if self.minute >= 59 {
            Self {
                hour: (self.hour + 1) % 24,
                minute: 0,
            }
        } else {
            Self {
                hour: self.hour,
                minute: self.minute + 1,
            }
        }
    }

    /// Same minute of the next hour, rolling over at midnight.
    pub const fn advance_hour(self) -> Self {
        Self {
            hour: (self.hour + 1) % 24,
            minute: self.minute,
        }
    }

    /// Time `minutes` later, modulo one day.
    pub const fn plus_minutes(
        self,
        minutes: u64,
    ) -> Self {
        let of_day = (self.hour as u64 * 60 + self.minute as u64 + minutes % 1440) % 1440;
        Self {
            hour: (of_day / 60) as u8,
            minute: (of_day % 60) as u8,
        }
    }
}

/// The four decimal digits shown on the face.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceDigits {
    pub hour_tens: u8,
    pub hour_ones: u8,
    pub minute_tens: u8,
    pub minute_ones: u8,
}

impl FaceDigits {
    pub const fn new(
        time: WallTime,
        mode: ClockMode,
    ) -> Self {
        let hour = time.display_hour(mode);
        Self {
            hour_tens: hour / 10,
            hour_ones: hour % 10,
            minute_tens: time.minute / 10,
            minute_ones: time.minute % 10,
        }
    }

    /// Digits in drawing order: hour tens, hour ones, minute tens, minute ones.
    pub const fn as_array(&self) -> [u8; 4] { [self.hour_tens, self.hour_ones, self.minute_tens, self.minute_ones] }
}

// =============================================================================
// Geometry
// =============================================================================

/// Bounding boxes of the four digits.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FaceLayout {
    pub hour_tens: Rectangle,
    pub hour_ones: Rectangle,
    pub minute_tens: Rectangle,
    pub minute_ones: Rectangle,
}

impl FaceLayout {
    /// Lay out the digits inside `area` with the given border and gap.
    pub fn compute(
        area: Rectangle,
        border: i32,
        gap: i32,
    ) -> Self {
        let border = i64::from(border);
        let gap = i64::from(gap);

        let width = (i64::from(area.size.width) - gap) / 2 - border;
        let height = (i64::from(area.size.height) - gap) / 2 - border;
        let cor = i64::from(gap % 2 != 0);

        let left = i64::from(area.top_left.x) + border;
        let top = i64::from(area.top_left.y) + border;
        let right = left + width + gap;
        let bottom = top + height + gap;

        // A dimension with no room for a digit stays empty, correction included
        let (w, w_cor) = if width > 0 { (width, width + cor) } else { (0, 0) };
        let (h, h_cor) = if height > 0 { (height, height + cor) } else { (0, 0) };

        Self {
            hour_tens: clamped_rect(left, top, w, h),
            hour_ones: clamped_rect(right, top, w_cor, h),
            minute_tens: clamped_rect(left, bottom, w, h_cor),
            minute_ones: clamped_rect(right, bottom, w_cor, h_cor),
        }
    }

    /// Boxes in drawing order, matching [`FaceDigits::as_array`].
    pub const fn as_array(&self) -> [Rectangle; 4] { [self.hour_tens, self.hour_ones, self.minute_tens, self.minute_ones] }
}

fn clamped_rect(
    x: i64,
    y: i64,
    w: i64,
    h: i64,
) -> Rectangle {
    let clamp_coord = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    let clamp_len = |v: i64| v.clamp(0, i64::from(u32::MAX)) as u32;
    Rectangle::new(
        Point::new(clamp_coord(x), clamp_coord(y)),
        Size::new(clamp_len(w), clamp_len(h)),
    )
}

// =============================================================================
// Frame Rendering
// =============================================================================

/// Repaint `area` with the face for `time`.
///
/// The whole area is filled with the background first, then each digit is
/// drawn in its own color. Drawing is clipped to `area`, so a negative border
/// or an odd gap never reaches pixels outside it. Glyphs come from `glyphs`,
/// which must have been built for `style.tails`.
pub fn render_face<D, C>(
    display: &mut D,
    area: Rectangle,
    digits: FaceDigits,
    style: &StyleConfig,
    glyphs: &GlyphTable,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor + From<PackedColor>,
{
    let mut display = display.clipped(&area);
    display.fill_solid(&area, C::from(style.background))?;

    let layout = FaceLayout::compute(area, style.border_thickness, style.gap_thickness);
    let colors = style.digit_colors();

    for ((bounds, digit), color) in layout.as_array().into_iter().zip(digits.as_array()).zip(colors) {
        draw_digit(&mut display, bounds, C::from(color), &glyphs.glyph(digit))?;
    }

    Ok(())
}

/// Render one frame: background plus the four digits of `time`.
pub fn render_frame<D, C>(
    display: &mut D,
    area: Rectangle,
    time: WallTime,
    style: &StyleConfig,
    mode: ClockMode,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor + From<PackedColor>,
{
    let glyphs = GlyphTable::new(style.tails);
    render_face(display, area, FaceDigits::new(time, mode), style, &glyphs)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(
        w: u32,
        h: u32,
    ) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(w, h))
    }

    #[test]
    fn test_time_validation() {
        assert!(WallTime::new(23, 59).is_ok());
        assert_eq!(WallTime::new(24, 0), Err(TimeError::HourOutOfRange(24)));
        assert_eq!(WallTime::new(0, 60), Err(TimeError::MinuteOutOfRange(60)));
    }

    #[test]
    fn test_display_hour_twelve_hour() {
        let at = |h| WallTime::new(h, 0).unwrap().display_hour(ClockMode::TwelveHour);
        assert_eq!(at(0), 12);
        assert_eq!(at(1), 1);
        assert_eq!(at(12), 12);
        assert_eq!(at(13), 1);
        assert_eq!(at(14), 2);
        assert_eq!(at(23), 11);
    }

    #[test]
    fn test_display_hour_twenty_four_hour() {
        for h in 0..24 {
            let time = WallTime::new(h, 0).unwrap();
            assert_eq!(time.display_hour(ClockMode::TwentyFourHour), h);
        }
    }

    #[test]
    fn test_face_digits() {
        let time = WallTime::new(14, 7).unwrap();
        assert_eq!(FaceDigits::new(time, ClockMode::TwelveHour).as_array(), [0, 2, 0, 7]);
        assert_eq!(FaceDigits::new(time, ClockMode::TwentyFourHour).as_array(), [1, 4, 0, 7]);

        let midnight = WallTime::MIDNIGHT;
        assert_eq!(FaceDigits::new(midnight, ClockMode::TwelveHour).as_array(), [1, 2, 0, 0]);
        assert_eq!(FaceDigits::new(midnight, ClockMode::TwentyFourHour).as_array(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_advance() {
        let t = WallTime::new(23, 59).unwrap();
        assert_eq!(t.advance_minute(), WallTime::MIDNIGHT);
        assert_eq!(t.advance_hour(), WallTime::new(0, 59).unwrap());
        assert_eq!(WallTime::new(9, 30).unwrap().advance_minute(), WallTime::new(9, 31).unwrap());
        assert_eq!(WallTime::NOON.plus_minutes(90), WallTime::new(13, 30).unwrap());
        assert_eq!(WallTime::NOON.plus_minutes(1440 * 3 + 1), WallTime::new(12, 1).unwrap());
    }

    #[test]
    fn test_layout_even_gap() {
        let layout = FaceLayout::compute(screen(180, 180), 2, 2);
        assert_eq!(layout.hour_tens, Rectangle::new(Point::new(2, 2), Size::new(87, 87)));
        assert_eq!(layout.hour_ones, Rectangle::new(Point::new(91, 2), Size::new(87, 87)));
        assert_eq!(layout.minute_tens, Rectangle::new(Point::new(2, 91), Size::new(87, 87)));
        assert_eq!(layout.minute_ones, Rectangle::new(Point::new(91, 91), Size::new(87, 87)));
    }

    #[test]
    fn test_layout_odd_gap_corrects_right_and_bottom() {
        let layout = FaceLayout::compute(screen(180, 180), 2, 3);
        assert_eq!(layout.hour_tens.size, Size::new(86, 86));
        assert_eq!(layout.hour_ones.size, Size::new(87, 86));
        assert_eq!(layout.minute_tens.size, Size::new(86, 87));
        assert_eq!(layout.minute_ones.size, Size::new(87, 87));

        // Right and bottom edges land exactly one border away from the screen edge
        let corner = layout.minute_ones.bottom_right().unwrap();
        assert_eq!(corner, Point::new(177, 177));
    }

    #[test]
    fn test_layout_offsets_by_area_origin() {
        let area = Rectangle::new(Point::new(10, 20), Size::new(100, 60));
        let layout = FaceLayout::compute(area, 0, 0);
        assert_eq!(layout.hour_tens, Rectangle::new(Point::new(10, 20), Size::new(50, 30)));
        assert_eq!(layout.minute_ones, Rectangle::new(Point::new(60, 50), Size::new(50, 30)));
    }

    #[test]
    fn test_layout_degenerate_clamps_to_zero() {
        let layout = FaceLayout::compute(screen(10, 10), 6, 4);
        for rect in layout.as_array() {
            assert_eq!(rect.size, Size::zero());
        }

        // Odd gap correction must not resurrect an empty box
        let layout = FaceLayout::compute(screen(0, 0), 0, 1);
        for rect in layout.as_array() {
            assert_eq!(rect.size, Size::zero());
        }

        // Only the height is degenerate
        let layout = FaceLayout::compute(screen(100, 4), 2, 2);
        assert_eq!(layout.hour_tens.size, Size::new(47, 0));
    }

    #[test]
    fn test_layout_extreme_values_do_not_panic() {
        for (border, gap) in [(i32::MAX, i32::MAX), (i32::MIN, i32::MIN), (i32::MIN, i32::MAX), (-20, -20)] {
            let _ = FaceLayout::compute(screen(u32::MAX, u32::MAX), border, gap);
            let _ = FaceLayout::compute(screen(1, 1), border, gap);
        }
    }

    #[test]
    fn test_negative_gap_overlaps_boxes() {
        let layout = FaceLayout::compute(screen(100, 100), 0, -4);
        // (100 + 4) / 2 = 52, right column starts 4px before the left one ends
        assert_eq!(layout.hour_tens.size, Size::new(52, 52));
        assert_eq!(layout.hour_ones.top_left, Point::new(48, 0));
    }
}
