//! Settings persistence.
//!
//! Hosts provide a [`SettingsStore`] that holds one fixed-size record
//! (see [`crate::style`] for the layout). Loading never fails: an absent,
//! corrupt or unreadable record falls back to [`StyleConfig::DEFAULT`] and
//! the reason is written to the event log.

use crate::event_log::EventLog;
use crate::style::{RECORD_LEN, StyleConfig};

/// Byte storage for the settings record.
pub trait SettingsStore {
    type Error: core::fmt::Debug;

    /// Read the stored record into `buf`, returning the number of bytes
    /// stored. `Ok(0)` means no record exists yet.
    fn read_record(
        &mut self,
        buf: &mut [u8; RECORD_LEN],
    ) -> Result<usize, Self::Error>;

    /// Replace the stored record.
    fn write_record(
        &mut self,
        record: &[u8; RECORD_LEN],
    ) -> Result<(), Self::Error>;
}

/// Load the persisted style, or the defaults if there is no usable record.
pub fn load_settings<S: SettingsStore>(
    store: &mut S,
    log: &mut EventLog,
) -> StyleConfig {
    let mut buf = [0u8; RECORD_LEN];
    match store.read_record(&mut buf) {
        Ok(0) => {
            log.info(format_args!("settings: no record, using defaults"));
            StyleConfig::DEFAULT
        }
        Ok(len) => match StyleConfig::from_bytes(&buf[..len.min(RECORD_LEN)]) {
            Ok(style) => {
                log.info(format_args!("settings: loaded"));
                style
            }
            Err(e) => {
                log.warn(format_args!("settings: {e}, using defaults"));
                StyleConfig::DEFAULT
            }
        },
        Err(e) => {
            log.warn(format_args!("settings: read failed ({e:?}), using defaults"));
            StyleConfig::DEFAULT
        }
    }
}

/// Persist `style`. Failures are logged and otherwise ignored; the style in
/// memory stays authoritative until the next successful write.
pub fn save_settings<S: SettingsStore>(
    store: &mut S,
    style: &StyleConfig,
    log: &mut EventLog,
) -> bool {
    match store.write_record(&style.to_bytes()) {
        Ok(()) => true,
        Err(e) => {
            log.warn(format_args!("settings: write failed ({e:?})"));
            false
        }
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Store kept in RAM. Used by tests and by hosts without persistent storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    record: Option<[u8; RECORD_LEN]>,
    len: usize,
    writes: u32,
}

impl MemoryStore {
    /// Empty store (first run).
    pub const fn new() -> Self {
        Self {
            record: None,
            len: 0,
            writes: 0,
        }
    }

    /// Store pre-loaded with raw bytes, truncated to [`RECORD_LEN`]. Shorter
    /// input simulates a truncated record.
    pub fn with_bytes(bytes: &[u8]) -> Self {
        let mut record = [0u8; RECORD_LEN];
        let len = bytes.len().min(RECORD_LEN);
        record[..len].copy_from_slice(&bytes[..len]);
        Self {
            record: Some(record),
            len,
            writes: 0,
        }
    }

    /// Currently stored record, if any.
    pub fn record(&self) -> Option<&[u8]> { self.record.as_ref().map(|r| &r[..self.len]) }

    /// Number of successful writes.
    pub const fn writes(&self) -> u32 { self.writes }
}

impl SettingsStore for MemoryStore {
    type Error = core::convert::Infallible;

    fn read_record(
        &mut self,
        buf: &mut [u8; RECORD_LEN],
    ) -> Result<usize, Self::Error> {
        match &self.record {
            Some(record) => {
                buf.copy_from_slice(record);
                Ok(self.len)
            }
            None => Ok(0),
        }
    }

    fn write_record(
        &mut self,
        record: &[u8; RECORD_LEN],
    ) -> Result<(), Self::Error> {
        self.record = Some(*record);
        self.len = RECORD_LEN;
        self.writes = self.writes.saturating_add(1);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
