//! Generic custom-memory write path (the base every per-field write sits
//! on) and its rerouting of the interval addresses, plus the block-read
//! escape hatches the per-field reads are themselves built from.

use crate::driver::Driver;
use crate::hal::Hal;
use crate::memory;
use crate::status::Status;

impl<H: Hal> Driver<H> {
    /// Verified single-byte custom-memory write. Writing either half of the
    /// measurement-interval pair is rerouted to
    /// [`Driver::write_measurement_interval`] so the pair is always
    /// committed and verified as one logical value, never as two
    /// independent bytes.
    pub fn write_custom_byte(&mut self, address: u8, value: u8) -> Result<(), Status> {
        if address == memory::INTERVAL_ADDR_LOW || address == memory::INTERVAL_ADDR_HIGH {
            let current = self.read_measurement_interval()?;
            let [mut low, mut high] = current.to_le_bytes();
            if address == memory::INTERVAL_ADDR_LOW {
                low = value;
            } else {
                high = value;
            }
            return self.write_measurement_interval(u16::from_le_bytes([low, high]));
        }
        self.tracked(|hal, cfg| memory::write_byte_verified(hal, cfg, address, value))
    }

    pub fn read_custom_byte(&mut self, address: u8) -> Result<u8, Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 1];
            memory::read_block(hal, cfg, address, &mut buf)?;
            Ok(buf[0])
        })
    }

    pub fn read_custom_block(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Status> {
        self.tracked(|hal, cfg| memory::read_block(hal, cfg, address, buf))
    }
}
