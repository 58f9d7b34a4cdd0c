//! Measurement interval: the 0xC6/0xC7 byte pair treated as one logical
//! 16-bit deciseconds value (§4.4).

use crate::driver::Driver;
use crate::hal::Hal;
use crate::memory;
use crate::status::{Status, StatusKind};

impl<H: Hal> Driver<H> {
    /// Current measurement interval, in deciseconds (0.1 s units).
    pub fn read_measurement_interval(&mut self) -> Result<u16, Status> {
        self.tracked(|hal, cfg| memory::read_interval(hal, cfg))
    }

    /// `deciseconds` must be in `[150, 36000]`; write feature-gated on the
    /// device's global-interval-write bit.
    pub fn write_measurement_interval(&mut self, deciseconds: u16) -> Result<(), Status> {
        if !self.features().supports_global_interval_write() {
            return Err(Status::from(StatusKind::NotSupported));
        }
        self.tracked(|hal, cfg| memory::write_interval(hal, cfg, deciseconds))
    }
}
