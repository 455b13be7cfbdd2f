//! Settings record kept in a file on the host.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use boldtime_common::settings::SettingsStore;
use boldtime_common::style::RECORD_LEN;

/// Environment variable overriding the settings file path.
pub const SETTINGS_PATH_VAR: &str = "BOLDTIME_SETTINGS";

/// Settings file used when [`SETTINGS_PATH_VAR`] is not set.
pub const DEFAULT_SETTINGS_PATH: &str = "boldtime-settings.bin";

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    /// The file holds more than one record.
    Oversized(usize),
}

impl fmt::Display for StoreError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings file: {e}"),
            Self::Oversized(len) => write!(f, "settings file is {len} bytes, expected at most {RECORD_LEN}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Oversized(_) => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self { Self::Io(e) }
}

/// Stores the settings record as a raw 16-byte file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    /// Store at `$BOLDTIME_SETTINGS`, or [`DEFAULT_SETTINGS_PATH`].
    pub fn from_env() -> Self {
        let path = env::var_os(SETTINGS_PATH_VAR).map_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH), PathBuf::from);
        Self::new(path)
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl SettingsStore for FileStore {
    type Error = StoreError;

    fn read_record(
        &mut self,
        buf: &mut [u8; RECORD_LEN],
    ) -> Result<usize, Self::Error> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        if bytes.len() > RECORD_LEN {
            return Err(StoreError::Oversized(bytes.len()));
        }
        buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }

    fn write_record(
        &mut self,
        record: &[u8; RECORD_LEN],
    ) -> Result<(), Self::Error> {
        // Written beside the record, then renamed over it
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, record)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
