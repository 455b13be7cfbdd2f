//! Keyboard and stdin input turned into configuration messages.
//!
//! Style changes from the keyboard go through the same message path as the
//! settings page, so they are validated and persisted the same way.

use boldtime_common::config::MAX_MESSAGE_ENTRIES;
use boldtime_common::message::{ConfigEntry, ConfigKey, ConfigValue};
use boldtime_common::style::StyleConfig;
use embedded_graphics_simulator::sdl2::Keycode;
use heapless::Vec;

/// Message built from a single key press.
pub type KeyMessage = Vec<ConfigEntry<'static>, MAX_MESSAGE_ENTRIES>;

/// Border and gap cycle through this range with `B` and `G`.
pub const THICKNESS_MIN: i32 = -2;
pub const THICKNESS_MAX: i32 = 6;

/// Named color scheme: background, hour tens, hour ones, minute tens, minute ones.
pub struct ColorPreset {
    pub name: &'static str,
    pub colors: [u32; 5],
}

pub const PRESETS: [ColorPreset; 4] = [
    ColorPreset {
        name: "classic",
        colors: [0x00_00_00, 0xFF_FF_FF, 0xAA_AA_AA, 0xAA_AA_AA, 0xFF_FF_FF],
    },
    ColorPreset {
        name: "paper",
        colors: [0xFF_FF_FF, 0x00_00_00, 0x55_55_55, 0x55_55_55, 0x00_00_00],
    },
    ColorPreset {
        name: "sunset",
        colors: [0x00_00_55, 0xFF_AA_00, 0xFF_55_00, 0xFF_55_00, 0xFF_AA_00],
    },
    ColorPreset {
        name: "terminal",
        colors: [0x00_00_00, 0x00_FF_00, 0x00_AA_00, 0x00_AA_00, 0x00_FF_00],
    },
];

const COLOR_KEYS: [ConfigKey; 5] = [
    ConfigKey::BackgroundColor,
    ConfigKey::HourOneColor,
    ConfigKey::HourTwoColor,
    ConfigKey::MinuteOneColor,
    ConfigKey::MinuteTwoColor,
];

/// Next value in the `B`/`G` cycle, wrapping back to [`THICKNESS_MIN`].
pub const fn next_thickness(current: i32) -> i32 {
    if current < THICKNESS_MIN || current >= THICKNESS_MAX { THICKNESS_MIN } else { current + 1 }
}

fn int_entry(
    key: ConfigKey,
    value: i32,
) -> ConfigEntry<'static> {
    ConfigEntry::int(key.name(), value)
}

fn single(entry: ConfigEntry<'static>) -> KeyMessage {
    let mut message = KeyMessage::new();
    message.push(entry).ok();
    message
}

/// Style-changing keys. Keeps the position in the color preset cycle.
#[derive(Default)]
pub struct StyleKeys {
    preset: usize,
}

impl StyleKeys {
    /// Message for `keycode`, or `None` if the key does not change the style.
    pub fn message_for(
        &mut self,
        keycode: Keycode,
        style: &StyleConfig,
    ) -> Option<KeyMessage> {
        let message = match keycode {
            Keycode::Num6 => single(int_entry(ConfigKey::SixTail, i32::from(!style.tails.six))),
            Keycode::Num7 => single(int_entry(ConfigKey::SevenTail, i32::from(!style.tails.seven))),
            Keycode::Num9 => single(int_entry(ConfigKey::NineTail, i32::from(!style.tails.nine))),
            Keycode::G => single(int_entry(ConfigKey::GapThickness, next_thickness(style.gap_thickness))),
            Keycode::B => single(int_entry(ConfigKey::BorderThickness, next_thickness(style.border_thickness))),
            Keycode::C => {
                self.preset = (self.preset + 1) % PRESETS.len();
                self.preset_message()
            }
            _ => return None,
        };
        Some(message)
    }

    /// Name of the preset most recently selected with `C`.
    pub fn preset_name(&self) -> &'static str { PRESETS[self.preset].name }

    fn preset_message(&self) -> KeyMessage {
        let mut message = KeyMessage::new();
        for (key, hex) in COLOR_KEYS.into_iter().zip(PRESETS[self.preset].colors) {
            let value = i32::try_from(hex).unwrap_or(i32::MAX);
            if message.push(int_entry(key, value)).is_err() {
                break;
            }
        }
        message
    }
}

/// Parse a stdin line of `key=value` pairs separated by whitespace.
///
/// Integer values become [`ConfigValue::Int`]; anything else is passed on as
/// text and validated by the message parser. A token without `=` is kept
/// with an empty value so it is reported rather than silently dropped.
pub fn parse_line(line: &str) -> std::vec::Vec<ConfigEntry<'_>> {
    line.split_whitespace()
        .map(|token| {
            let (key, value) = token.split_once('=').unwrap_or((token, ""));
            let value = value.parse::<i32>().map_or(ConfigValue::Text(value), ConfigValue::Int);
            ConfigEntry { key, value }
        })
        .collect()
}
