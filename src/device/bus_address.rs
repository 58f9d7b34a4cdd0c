//! Device bus address: a single custom-memory byte, 0..=7. A write only
//! takes effect after the device power-cycles.

use crate::driver::Driver;
use crate::hal::Hal;
use crate::memmap;
use crate::memory;
use crate::status::{Status, StatusKind};

impl<H: Hal> Driver<H> {
    pub fn read_bus_address(&mut self) -> Result<u8, Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 1];
            memory::read_block(hal, cfg, memmap::ADDR_BUS_ADDRESS, &mut buf)?;
            Ok(buf[0])
        })
    }

    /// Takes effect only after the device is power-cycled; this call only
    /// stores the new value in custom memory.
    pub fn write_bus_address(&mut self, address: u8) -> Result<(), Status> {
        if !self.features().supports_bus_address_write() {
            return Err(Status::from(StatusKind::NotSupported));
        }
        if address > 7 {
            return Err(Status::new(StatusKind::OutOfRange, address as i32, "bus address > 7"));
        }
        self.tracked(|hal, cfg| memory::write_byte_verified(hal, cfg, memmap::ADDR_BUS_ADDRESS, address))
    }
}
