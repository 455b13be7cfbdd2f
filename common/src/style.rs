//! User style settings and their persisted record.
//!
//! # Record Layout
//!
//! The settings record is a flat 16-byte block. It was historically written as
//! a packed C struct on a little-endian device, so existing records keep
//! loading as long as this layout holds:
//!
//! ```text
//! [0]      background color      packed 0bAARRGGBB
//! [1]      hour tens color
//! [2]      hour ones color
//! [3]      minute tens color
//! [4]      minute ones color
//! [5..9]   border thickness      i32 le
//! [9..13]  gap thickness         i32 le
//! [13]     six tail              0 or 1
//! [14]     seven tail            0 or 1
//! [15]     nine tail             0 or 1
//! ```

use crate::colors::PackedColor;
use crate::config::{
    DEFAULT_BACKGROUND,
    DEFAULT_BORDER_THICKNESS,
    DEFAULT_GAP_THICKNESS,
    DEFAULT_HOUR_ONES,
    DEFAULT_HOUR_TENS,
    DEFAULT_MINUTE_ONES,
    DEFAULT_MINUTE_TENS,
    DEFAULT_NINE_TAIL,
    DEFAULT_SEVEN_TAIL,
    DEFAULT_SIX_TAIL,
};
use crate::segments::TailStyle;

/// Size of the persisted settings record in bytes.
pub const RECORD_LEN: usize = 16;

const BORDER_OFFSET: usize = 5;
const GAP_OFFSET: usize = 9;
const TAILS_OFFSET: usize = 13;

/// Errors decoding a settings record.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Record is not exactly [`RECORD_LEN`] bytes.
    WrongLength { expected: usize, actual: usize },
    /// A flag byte holds something other than 0 or 1.
    InvalidFlag { offset: usize, value: u8 },
}

impl core::fmt::Display for SettingsError {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::WrongLength { expected, actual } => {
                write!(f, "settings record is {actual} bytes, expected {expected}")
            }
            Self::InvalidFlag { offset, value } => write!(f, "settings flag at byte {offset} is {value}"),
        }
    }
}

/// Everything the user can change about the face.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StyleConfig {
    pub background: PackedColor,
    pub hour_tens: PackedColor,
    pub hour_ones: PackedColor,
    pub minute_tens: PackedColor,
    pub minute_ones: PackedColor,
    pub border_thickness: i32,
    pub gap_thickness: i32,
    pub tails: TailStyle,
}

impl StyleConfig {
    /// Built-in style used when no valid record exists.
    pub const DEFAULT: Self = Self {
        background: DEFAULT_BACKGROUND,
        hour_tens: DEFAULT_HOUR_TENS,
        hour_ones: DEFAULT_HOUR_ONES,
        minute_tens: DEFAULT_MINUTE_TENS,
        minute_ones: DEFAULT_MINUTE_ONES,
        border_thickness: DEFAULT_BORDER_THICKNESS,
        gap_thickness: DEFAULT_GAP_THICKNESS,
        tails: TailStyle {
            six: DEFAULT_SIX_TAIL,
            seven: DEFAULT_SEVEN_TAIL,
            nine: DEFAULT_NINE_TAIL,
        },
    };

    /// Digit colors in drawing order: hour tens, hour ones, minute tens, minute ones.
    pub const fn digit_colors(&self) -> [PackedColor; 4] {
        [self.hour_tens, self.hour_ones, self.minute_tens, self.minute_ones]
    }

    /// Encode as a settings record.
    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let mut out = [0u8; RECORD_LEN];
        out[0] = self.background.raw();
        out[1] = self.hour_tens.raw();
        out[2] = self.hour_ones.raw();
        out[3] = self.minute_tens.raw();
        out[4] = self.minute_ones.raw();
        out[BORDER_OFFSET..GAP_OFFSET].copy_from_slice(&self.border_thickness.to_le_bytes());
        out[GAP_OFFSET..TAILS_OFFSET].copy_from_slice(&self.gap_thickness.to_le_bytes());
        out[TAILS_OFFSET] = u8::from(self.tails.six);
        out[TAILS_OFFSET + 1] = u8::from(self.tails.seven);
        out[TAILS_OFFSET + 2] = u8::from(self.tails.nine);
        out
    }

    /// Decode a settings record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SettingsError> {
        let record: &[u8; RECORD_LEN] = bytes.try_into().map_err(|_| SettingsError::WrongLength {
            expected: RECORD_LEN,
            actual: bytes.len(),
        })?;

        let flag = |offset: usize| match record[offset] {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(SettingsError::InvalidFlag { offset, value }),
        };
        let int = |offset: usize| {
            i32::from_le_bytes([record[offset], record[offset + 1], record[offset + 2], record[offset + 3]])
        };

        Ok(Self {
            background: PackedColor::from_raw(record[0]),
            hour_tens: PackedColor::from_raw(record[1]),
            hour_ones: PackedColor::from_raw(record[2]),
            minute_tens: PackedColor::from_raw(record[3]),
            minute_ones: PackedColor::from_raw(record[4]),
            border_thickness: int(BORDER_OFFSET),
            gap_thickness: int(GAP_OFFSET),
            tails: TailStyle {
                six: flag(TAILS_OFFSET)?,
                seven: flag(TAILS_OFFSET + 1)?,
                nine: flag(TAILS_OFFSET + 2)?,
            },
        })
    }
}

impl Default for StyleConfig {
    fn default() -> Self { Self::DEFAULT }
}

// =============================================================================
// Tests
// =============================================================================
