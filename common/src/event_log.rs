//! Fixed-capacity log of watchface events.
//!
//! The core never prints. Notable events (settings loaded or defaulted, store
//! failures, configuration messages) are pushed here, and each host drains
//! the log after a callback and forwards entries to its own logger
//! (`defmt` on the firmware, `tracing` in the simulator).
//!
//! # Usage
//!
//! ```ignore
//! let mut log = EventLog::new();
//! log.info(format_args!("settings: {} bytes", 16));
//!
//! while let Some(entry) = log.pop() {
//!     println!("{}", entry.text());
//! }
//! ```

use core::fmt::{self, Write};

use heapless::{Deque, String};

// =============================================================================
// Event Log Configuration
// =============================================================================

/// Maximum number of entries kept before the oldest is dropped.
pub const LOG_BUFFER_SIZE: usize = 8;

/// Maximum characters per entry; longer messages are truncated.
pub const LOG_LINE_LENGTH: usize = 64;

// =============================================================================
// Entries
// =============================================================================

/// Severity of an event.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Info,
    Warn,
}

/// One logged event.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LogEntry {
    level: Level,
    text: String<LOG_LINE_LENGTH>,
}

impl LogEntry {
    pub const fn level(&self) -> Level { self.level }

    pub fn text(&self) -> &str { self.text.as_str() }
}

/// Writes into a heapless string, silently dropping what does not fit.
///
/// Once a character has been dropped nothing more is written, so the text is
/// always a prefix of the full message.
struct Truncating<'a, const N: usize> {
    text: &'a mut String<N>,
    full: bool,
}

impl<'a, const N: usize> Truncating<'a, N> {
    const fn new(text: &'a mut String<N>) -> Self { Self { text, full: false } }
}

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        if self.full {
            return Ok(());
        }
        for c in s.chars() {
            if self.text.push(c).is_err() {
                self.full = true;
                break;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Event Log Ring Buffer
// =============================================================================

/// Ring buffer of the most recent [`LOG_BUFFER_SIZE`] events.
pub struct EventLog {
    buffer: Deque<LogEntry, LOG_BUFFER_SIZE>,
}

impl EventLog {
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Record an event. If the buffer is full, the oldest entry is dropped.
    pub fn push(
        &mut self,
        level: Level,
        args: fmt::Arguments<'_>,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut text = String::new();
        Truncating::new(&mut text).write_fmt(args).ok();

        self.buffer.push_back(LogEntry { level, text }).ok();
    }

    pub fn info(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        self.push(Level::Info, args);
    }

    pub fn warn(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        self.push(Level::Warn, args);
    }

    /// Remove and return the oldest entry.
    pub fn pop(&mut self) -> Option<LogEntry> { self.buffer.pop_front() }

    /// Iterate over entries (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.buffer.iter() }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }
}

impl Default for EventLog {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
