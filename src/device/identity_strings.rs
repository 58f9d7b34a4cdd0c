//! Serial number and part name: fixed 16-byte custom-memory blocks, each
//! gated by its own feature bit.

use crate::driver::Driver;
use crate::hal::Hal;
use crate::memmap;
use crate::memory;
use crate::status::{Status, StatusKind};

impl<H: Hal> Driver<H> {
    /// Reads 16 bytes starting at 0xA0. Fails `NotSupported` if the cached
    /// feature bits say the device does not expose a serial number.
    pub fn read_serial_number(&mut self, buf: &mut [u8; 16]) -> Result<(), Status> {
        if !self.features().supports_serial_number() {
            return Err(Status::from(StatusKind::NotSupported));
        }
        self.tracked(|hal, cfg| memory::read_block(hal, cfg, memmap::ADDR_SERIAL_NUMBER, buf))
    }

    pub fn read_part_name(&mut self, buf: &mut [u8; 16]) -> Result<(), Status> {
        if !self.features().supports_part_name() {
            return Err(Status::from(StatusKind::NotSupported));
        }
        self.tracked(|hal, cfg| memory::read_block(hal, cfg, memmap::ADDR_PART_NAME, buf))
    }

    /// Sixteen verified single-byte writes, one per character; does not
    /// batch the flash-commit wait across bytes, matching the custom-write
    /// path every other byte-sized field goes through.
    pub fn write_part_name(&mut self, value: &[u8; 16]) -> Result<(), Status> {
        if !self.features().supports_part_name() {
            return Err(Status::from(StatusKind::NotSupported));
        }
        self.tracked(|hal, cfg| {
            for (offset, &byte) in value.iter().enumerate() {
                memory::write_byte_verified(hal, cfg, memmap::ADDR_PART_NAME + offset as u8, byte)?;
            }
            Ok(())
        })
    }
}
