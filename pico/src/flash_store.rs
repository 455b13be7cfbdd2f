//! Settings record in the last sector of the on-board flash.
//!
//! ```text
//! [0..4]   tag "BTS1"
//! [4..20]  settings record
//! ```
//!
//! An erased sector reads back as 0xFF and has no tag, which reads as "no
//! record".

use boldtime_common::settings::SettingsStore;
use boldtime_common::style::RECORD_LEN;
use embassy_rp::flash::{Blocking, ERASE_SIZE, Error, Flash};
use embassy_rp::peripherals::FLASH;

/// Pico 2 on-board flash size.
pub const FLASH_SIZE: usize = 4 * 1024 * 1024;

/// Offset of the settings sector.
const SETTINGS_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

const TAG: [u8; 4] = *b"BTS1";
const SLOT_LEN: usize = TAG.len() + RECORD_LEN;

pub struct FlashStore<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
}

impl<'d> FlashStore<'d> {
    pub const fn new(flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>) -> Self { Self { flash } }
}

impl SettingsStore for FlashStore<'_> {
    type Error = Error;

    fn read_record(
        &mut self,
        buf: &mut [u8; RECORD_LEN],
    ) -> Result<usize, Self::Error> {
        let mut slot = [0u8; SLOT_LEN];
        self.flash.blocking_read(SETTINGS_OFFSET, &mut slot)?;

        if slot[..TAG.len()] != TAG {
            return Ok(0);
        }
        buf.copy_from_slice(&slot[TAG.len()..]);
        Ok(RECORD_LEN)
    }

    fn write_record(
        &mut self,
        record: &[u8; RECORD_LEN],
    ) -> Result<(), Self::Error> {
        let mut slot = [0u8; SLOT_LEN];
        slot[..TAG.len()].copy_from_slice(&TAG);
        slot[TAG.len()..].copy_from_slice(record);

        self.flash
            .blocking_erase(SETTINGS_OFFSET, SETTINGS_OFFSET + ERASE_SIZE as u32)?;
        self.flash.blocking_write(SETTINGS_OFFSET, &slot)
    }
}
