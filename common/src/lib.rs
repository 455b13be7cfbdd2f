//! Core of the Bold Time watchface.
//!
//! This crate contains the platform-agnostic code shared between the
//! simulator and the Pico 2 firmware:
//!
//! - [`segments`]: 3×5 cell glyphs for the digits 0-9 and the optional tails
//! - [`digit`]: Cell geometry and drawing of a single digit
//! - [`layout`]: Wall time, the four digit boxes and frame rendering
//! - [`colors`]: Packed 2-bit-per-channel colors
//! - [`style`]: User style settings and their persisted record
//! - [`settings`]: Loading and saving the record through a [`SettingsStore`]
//! - [`message`]: Configuration messages from the settings page
//! - [`watchface`]: Controller tying the above to a host
//! - [`event_log`]: Event buffer drained by the host's logger
//! - [`config`]: Defaults and limits
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` compatible and can be used on embedded targets.
//! Drawing goes through `embedded-graphics` so the same code paints the
//! simulator window and the ST7789 panel.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod colors;
pub mod config;
pub mod digit;
pub mod event_log;
pub mod layout;
pub mod message;
pub mod segments;
pub mod settings;
pub mod style;
pub mod watchface;

// Re-export commonly used items
pub use colors::PackedColor;
pub use event_log::{EventLog, Level, LogEntry};
pub use layout::{ClockMode, FaceDigits, FaceLayout, TimeError, WallTime, render_face, render_frame};
pub use message::{ApplyReport, ConfigEntry, ConfigKey, ConfigValue, FieldError, apply_message};
pub use segments::{Glyph, GlyphTable, TailStyle, illumination};
pub use settings::{MemoryStore, SettingsStore, load_settings, save_settings};
pub use style::{RECORD_LEN, SettingsError, StyleConfig};
pub use watchface::{FixedTime, Host, TimeSource, Watchface};
