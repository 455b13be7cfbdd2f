//! Configuration messages from the companion settings page.
//!
//! A message is a sparse list of `(key, value)` entries, one per style field.
//! Keys that are absent leave their field unchanged. Each entry is validated
//! on its own: unknown keys are ignored, malformed values are skipped, and
//! every valid entry is applied.
//!
//! | Key                | Field           | Accepted values              |
//! |--------------------|-----------------|------------------------------|
//! | `background_color` | background      | `0x000000..=0xFFFFFF`        |
//! | `hour_one_color`   | hour tens       | same                         |
//! | `hour_two_color`   | hour ones       | same                         |
//! | `minute_one_color` | minute tens     | same                         |
//! | `minute_two_color` | minute ones     | same                         |
//! | `border_thickness` | border          | [`THICKNESS_RANGE`]          |
//! | `gap_thickness`    | gap             | [`THICKNESS_RANGE`]          |
//! | `six_tail`         | six tail        | `0`, `1`                     |
//! | `seven_tail`       | seven tail      | `0`, `1`                     |
//! | `nine_tail`        | nine tail       | `0`, `1`                     |
//!
//! Values normally arrive as integers. Text values are also accepted: decimal,
//! `0x`/`#` prefixed hex, and `true`/`false` for flags.

use crate::colors::PackedColor;
use crate::config::{MAX_HEX_COLOR, MAX_MESSAGE_ENTRIES, THICKNESS_RANGE};
use crate::style::StyleConfig;

/// Style field addressed by a message entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigKey {
    BackgroundColor,
    HourOneColor,
    HourTwoColor,
    MinuteOneColor,
    MinuteTwoColor,
    BorderThickness,
    GapThickness,
    SixTail,
    SevenTail,
    NineTail,
}

impl ConfigKey {
    pub const ALL: [Self; 10] = [
        Self::BackgroundColor,
        Self::HourOneColor,
        Self::HourTwoColor,
        Self::MinuteOneColor,
        Self::MinuteTwoColor,
        Self::BorderThickness,
        Self::GapThickness,
        Self::SixTail,
        Self::SevenTail,
        Self::NineTail,
    ];

    /// Message key name as sent by the settings page.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BackgroundColor => "background_color",
            Self::HourOneColor => "hour_one_color",
            Self::HourTwoColor => "hour_two_color",
            Self::MinuteOneColor => "minute_one_color",
            Self::MinuteTwoColor => "minute_two_color",
            Self::BorderThickness => "border_thickness",
            Self::GapThickness => "gap_thickness",
            Self::SixTail => "six_tail",
            Self::SevenTail => "seven_tail",
            Self::NineTail => "nine_tail",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> { Self::ALL.into_iter().find(|key| key.name() == name) }
}

/// Raw value of a message entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConfigValue<'a> {
    Int(i32),
    Text(&'a str),
}

/// One `(key, value)` pair of a message.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ConfigEntry<'a> {
    pub key: &'a str,
    pub value: ConfigValue<'a>,
}

impl<'a> ConfigEntry<'a> {
    pub const fn int(
        key: &'a str,
        value: i32,
    ) -> Self {
        Self {
            key,
            value: ConfigValue::Int(value),
        }
    }

    pub const fn text(
        key: &'a str,
        value: &'a str,
    ) -> Self {
        Self {
            key,
            value: ConfigValue::Text(value),
        }
    }
}

/// Why a single entry was skipped.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldError {
    /// A boolean sent to a numeric field.
    WrongType,
    /// Text that is not a number (or boolean, for flags).
    Unparseable,
    /// A number outside the field's accepted range.
    OutOfRange,
}

impl core::fmt::Display for FieldError {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::WrongType => write!(f, "boolean given for a numeric field"),
            Self::Unparseable => write!(f, "value is not a number"),
            Self::OutOfRange => write!(f, "value out of range"),
        }
    }
}

/// Outcome of applying one message.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ApplyReport {
    /// Entries written to the style.
    pub applied: u8,
    /// Entries whose key is not a style field.
    pub unknown: u8,
    /// Entries with a bad value, plus entries beyond the per-message limit.
    pub malformed: u8,
}

impl ApplyReport {
    /// Whether any field may have changed.
    pub const fn changed(&self) -> bool { self.applied > 0 }
}

fn parse_int(text: &str) -> Result<i64, FieldError> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.starts_with(['-', '+']) {
        return Err(FieldError::Unparseable);
    }

    let hex = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .or_else(|| digits.strip_prefix('#'));
    let magnitude = match hex {
        Some(hex) if hex.starts_with(['-', '+']) => return Err(FieldError::Unparseable),
        Some(hex) => i64::from_str_radix(hex, 16),
        None => digits.parse::<i64>(),
    }
    .map_err(|_| FieldError::Unparseable)?;

    Ok(if negative { -magnitude } else { magnitude })
}

fn is_bool(text: &str) -> bool { matches!(text.trim(), "true" | "false") }

fn int_value(value: ConfigValue<'_>) -> Result<i64, FieldError> {
    match value {
        ConfigValue::Int(v) => Ok(i64::from(v)),
        ConfigValue::Text(text) if is_bool(text) => Err(FieldError::WrongType),
        ConfigValue::Text(text) => parse_int(text),
    }
}

/// Parse a color value (`0xRRGGBB`).
pub fn parse_color(value: ConfigValue<'_>) -> Result<PackedColor, FieldError> {
    let hex = int_value(value)?;
    let hex = u32::try_from(hex).map_err(|_| FieldError::OutOfRange)?;
    if hex > MAX_HEX_COLOR {
        return Err(FieldError::OutOfRange);
    }
    Ok(PackedColor::from_hex(hex))
}

/// Parse a border or gap thickness.
pub fn parse_thickness(value: ConfigValue<'_>) -> Result<i32, FieldError> {
    let v = int_value(value)?;
    i32::try_from(v)
        .ok()
        .filter(|v| THICKNESS_RANGE.contains(v))
        .ok_or(FieldError::OutOfRange)
}

/// Parse a tail flag.
pub fn parse_flag(value: ConfigValue<'_>) -> Result<bool, FieldError> {
    if let ConfigValue::Text(text) = value {
        match text.trim() {
            "true" => return Ok(true),
            "false" => return Ok(false),
            _ => {}
        }
    }
    match int_value(value)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(FieldError::OutOfRange),
    }
}

/// Write one entry into `style`.
pub fn apply_entry(
    style: &mut StyleConfig,
    key: ConfigKey,
    value: ConfigValue<'_>,
) -> Result<(), FieldError> {
    match key {
        ConfigKey::BackgroundColor => style.background = parse_color(value)?,
        ConfigKey::HourOneColor => style.hour_tens = parse_color(value)?,
        ConfigKey::HourTwoColor => style.hour_ones = parse_color(value)?,
        ConfigKey::MinuteOneColor => style.minute_tens = parse_color(value)?,
        ConfigKey::MinuteTwoColor => style.minute_ones = parse_color(value)?,
        ConfigKey::BorderThickness => style.border_thickness = parse_thickness(value)?,
        ConfigKey::GapThickness => style.gap_thickness = parse_thickness(value)?,
        ConfigKey::SixTail => style.tails.six = parse_flag(value)?,
        ConfigKey::SevenTail => style.tails.seven = parse_flag(value)?,
        ConfigKey::NineTail => style.tails.nine = parse_flag(value)?,
    }
    Ok(())
}

/// Apply every valid entry of a message to `style`.
///
/// Only the first [`MAX_MESSAGE_ENTRIES`] entries are considered.
pub fn apply_message(
    style: &mut StyleConfig,
    entries: &[ConfigEntry<'_>],
) -> ApplyReport {
    let mut report = ApplyReport::default();

    for (i, entry) in entries.iter().enumerate() {
        if i >= MAX_MESSAGE_ENTRIES {
            report.malformed = report.malformed.saturating_add(1);
            continue;
        }
        match ConfigKey::from_name(entry.key.trim()) {
            None => report.unknown = report.unknown.saturating_add(1),
            Some(key) => match apply_entry(style, key, entry.value) {
                Ok(()) => report.applied = report.applied.saturating_add(1),
                Err(_) => report.malformed = report.malformed.saturating_add(1),
            },
        }
    }

    report
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};
    use crate::segments::TailStyle;

    #[test]
    fn test_key_names_round_trip() {
        for key in ConfigKey::ALL {
            assert_eq!(ConfigKey::from_name(key.name()), Some(key));
        }
        assert_eq!(ConfigKey::from_name("date_color"), None);
    }

    #[test]
    fn test_apply_full_message() {
        let mut style = StyleConfig::DEFAULT;
        let report = apply_message(
            &mut style,
            &[
                ConfigEntry::int("background_color", 0xFF_FF_FF),
                ConfigEntry::int("hour_one_color", 0x00_00_00),
                ConfigEntry::int("hour_two_color", 0xFF_00_00),
                ConfigEntry::int("minute_one_color", 0x00_FF_00),
                ConfigEntry::int("minute_two_color", 0x00_00_FF),
                ConfigEntry::int("border_thickness", -4),
                ConfigEntry::int("gap_thickness", 9),
                ConfigEntry::int("six_tail", 0),
                ConfigEntry::int("seven_tail", 1),
                ConfigEntry::int("nine_tail", 0),
            ],
        );

        assert_eq!(
            report,
            ApplyReport {
                applied: 10,
                unknown: 0,
                malformed: 0,
            }
        );
        assert_eq!(style.background, WHITE);
        assert_eq!(style.hour_tens, BLACK);
        assert_eq!(style.hour_ones.raw(), 0b1111_0000);
        assert_eq!(style.minute_tens.raw(), 0b1100_1100);
        assert_eq!(style.minute_ones.raw(), 0b1100_0011);
        assert_eq!(style.border_thickness, -4);
        assert_eq!(style.gap_thickness, 9);
        assert_eq!(
            style.tails,
            TailStyle {
                six: false,
                seven: true,
                nine: false,
            }
        );
    }

    #[test]
    fn test_absent_keys_unchanged() {
        let mut style = StyleConfig::DEFAULT;
        let report = apply_message(&mut style, &[ConfigEntry::int("gap_thickness", 5)]);
        assert_eq!(report.applied, 1);
        assert_eq!(
            style,
            StyleConfig {
                gap_thickness: 5,
                ..StyleConfig::DEFAULT
            }
        );
    }

    #[test]
    fn test_unknown_and_malformed_skipped() {
        let mut style = StyleConfig::DEFAULT;
        let report = apply_message(
            &mut style,
            &[
                ConfigEntry::int("vibrate_on_disconnect", 1),
                ConfigEntry::int("background_color", 0x1_00_00_00),
                ConfigEntry::int("border_thickness", 21),
                ConfigEntry::int("six_tail", 2),
                ConfigEntry::text("gap_thickness", "wide"),
                ConfigEntry::int("nine_tail", 0),
            ],
        );

        assert_eq!(
            report,
            ApplyReport {
                applied: 1,
                unknown: 1,
                malformed: 4,
            }
        );
        assert_eq!(
            style,
            StyleConfig {
                tails: TailStyle {
                    nine: false,
                    ..StyleConfig::DEFAULT.tails
                },
                ..StyleConfig::DEFAULT
            }
        );
    }

    #[test]
    fn test_text_values() {
        let mut style = StyleConfig::DEFAULT;
        let report = apply_message(
            &mut style,
            &[
                ConfigEntry::text("background_color", "0xFFFFFF"),
                ConfigEntry::text("hour_one_color", "#000000"),
                ConfigEntry::text("border_thickness", " -7 "),
                ConfigEntry::text("seven_tail", "true"),
                ConfigEntry::text("six_tail", "0"),
            ],
        );
        assert_eq!(report.applied, 5);
        assert_eq!(style.background, WHITE);
        assert_eq!(style.hour_tens, BLACK);
        assert_eq!(style.border_thickness, -7);
        assert!(style.tails.seven);
        assert!(!style.tails.six);
    }

    #[test]
    fn test_negative_color_rejected() {
        assert_eq!(parse_color(ConfigValue::Int(-1)), Err(FieldError::OutOfRange));
        assert_eq!(parse_color(ConfigValue::Text("-0x10")), Err(FieldError::OutOfRange));
        assert_eq!(parse_color(ConfigValue::Text("0xZZ")), Err(FieldError::Unparseable));
        assert_eq!(parse_color(ConfigValue::Text("true")), Err(FieldError::WrongType));
    }

    #[test]
    fn test_signed_hex_digits_rejected() {
        assert_eq!(parse_color(ConfigValue::Text("0x+5")), Err(FieldError::Unparseable));
        assert_eq!(parse_color(ConfigValue::Text("#-5")), Err(FieldError::Unparseable));
        assert_eq!(parse_thickness(ConfigValue::Text("-0x-5")), Err(FieldError::Unparseable));
        assert_eq!(parse_thickness(ConfigValue::Text("-0x5")), Ok(-5));
        assert_eq!(parse_color(ConfigValue::Text("--5")), Err(FieldError::Unparseable));
    }

    #[test]
    fn test_thickness_range_edges() {
        assert_eq!(parse_thickness(ConfigValue::Int(-20)), Ok(-20));
        assert_eq!(parse_thickness(ConfigValue::Int(20)), Ok(20));
        assert_eq!(parse_thickness(ConfigValue::Int(-21)), Err(FieldError::OutOfRange));
        assert_eq!(
            parse_thickness(ConfigValue::Text("99999999999")),
            Err(FieldError::OutOfRange)
        );
    }

    #[test]
    fn test_entries_beyond_limit_ignored() {
        let mut style = StyleConfig::DEFAULT;
        let mut entries = [ConfigEntry::int("gap_thickness", 1); MAX_MESSAGE_ENTRIES + 2];
        entries[MAX_MESSAGE_ENTRIES] = ConfigEntry::int("gap_thickness", 7);

        let report = apply_message(&mut style, &entries);
        assert_eq!(usize::from(report.applied), MAX_MESSAGE_ENTRIES);
        assert_eq!(report.malformed, 2);
        assert_eq!(style.gap_thickness, 1);
    }
}
