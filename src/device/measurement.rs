//! CO₂ measurement reads: MV3 (fast) and MV4 (averaged), each a low-byte-
//! first 16-bit unsigned ppm pair.

use crate::config::Config;
use crate::driver::Driver;
use crate::frame::{self, ControlByte};
use crate::hal::Hal;
use crate::memmap;
use crate::status::Status;

fn read_mv_pair(hal: &mut impl Hal, cfg: &Config, low_nibble: u8, high_nibble: u8) -> Result<u16, Status> {
    let lo_ctrl = ControlByte::read(low_nibble, cfg.address)?;
    let hi_ctrl = ControlByte::read(high_nibble, cfg.address)?;
    let lo = frame::read_transaction(hal, cfg, lo_ctrl)?;
    let hi = frame::read_transaction(hal, cfg, hi_ctrl)?;
    Ok(u16::from_le_bytes([lo, hi]))
}

impl<H: Hal> Driver<H> {
    /// Fast-response CO₂ reading, in ppm.
    pub fn read_co2_fast(&mut self) -> Result<u16, Status> {
        self.tracked(|hal, cfg| read_mv_pair(hal, cfg, memmap::NIBBLE_MV3_LOW, memmap::NIBBLE_MV3_HIGH))
    }

    /// 11-sample averaged CO₂ reading, in ppm.
    pub fn read_co2_average(&mut self) -> Result<u16, Status> {
        self.tracked(|hal, cfg| read_mv_pair(hal, cfg, memmap::NIBBLE_MV4_LOW, memmap::NIBBLE_MV4_HIGH))
    }
}
