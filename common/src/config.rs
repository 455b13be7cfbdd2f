//! Display geometry and default style constants.
//!
//! The watchface layout itself adapts to any bounds it is given; the screen
//! size here is only used by hosts to size their display or window.

use core::ops::RangeInclusive;

use crate::colors::{BLACK, LIGHT_GRAY, PackedColor, WHITE};

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ST7789 on Pimoroni PIM715: 320x240)
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

// =============================================================================
// Default Style
// =============================================================================

/// Background color used until a settings record overrides it.
pub const DEFAULT_BACKGROUND: PackedColor = BLACK;

/// First hour digit.
pub const DEFAULT_HOUR_TENS: PackedColor = WHITE;

/// Second hour digit.
pub const DEFAULT_HOUR_ONES: PackedColor = LIGHT_GRAY;

/// First minute digit.
pub const DEFAULT_MINUTE_TENS: PackedColor = LIGHT_GRAY;

/// Second minute digit.
pub const DEFAULT_MINUTE_ONES: PackedColor = WHITE;

/// Distance between the screen edge and the digits, in pixels.
pub const DEFAULT_BORDER_THICKNESS: i32 = 2;

/// Distance between neighbouring digits, in pixels.
pub const DEFAULT_GAP_THICKNESS: i32 = 2;

pub const DEFAULT_SIX_TAIL: bool = true;
pub const DEFAULT_SEVEN_TAIL: bool = false;
pub const DEFAULT_NINE_TAIL: bool = true;

// =============================================================================
// Configuration Channel
// =============================================================================

/// Border and gap values accepted from the companion configuration page.
/// Matches the range of its sliders; negative values let digits overlap.
pub const THICKNESS_RANGE: RangeInclusive<i32> = -20..=20;

/// Largest color accepted from a configuration message (`0xRRGGBB`).
pub const MAX_HEX_COLOR: u32 = 0xFF_FF_FF;

/// Maximum number of entries processed from one configuration message.
pub const MAX_MESSAGE_ENTRIES: usize = 12;
