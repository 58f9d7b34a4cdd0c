//! Calibration, operating mode, auto-adjust, and the CO₂ offset/gain/
//! cal-point block, the device's tuning surface.

use crate::driver::Driver;
use crate::hal::Hal;
use crate::memmap;
use crate::memory;
use crate::status::{Status, StatusKind};

impl<H: Hal> Driver<H> {
    pub fn read_co2_interval_factor(&mut self) -> Result<i8, Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 1];
            memory::read_block(hal, cfg, memmap::ADDR_CO2_INTERVAL_FACTOR, &mut buf)?;
            Ok(buf[0] as i8)
        })
    }

    pub fn write_co2_interval_factor(&mut self, factor: i8) -> Result<(), Status> {
        if !self.features().supports_co2_interval_factor_write() {
            return Err(Status::from(StatusKind::NotSupported));
        }
        self.tracked(|hal, cfg| memory::write_byte_verified(hal, cfg, memmap::ADDR_CO2_INTERVAL_FACTOR, factor as u8))
    }

    pub fn read_co2_filter(&mut self) -> Result<u8, Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 1];
            memory::read_block(hal, cfg, memmap::ADDR_CO2_FILTER, &mut buf)?;
            Ok(buf[0])
        })
    }

    pub fn write_co2_filter(&mut self, value: u8) -> Result<(), Status> {
        if !self.features().supports_co2_filter_write() {
            return Err(Status::from(StatusKind::NotSupported));
        }
        self.tracked(|hal, cfg| memory::write_byte_verified(hal, cfg, memmap::ADDR_CO2_FILTER, value))
    }

    pub fn read_operating_mode(&mut self) -> Result<u8, Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 1];
            memory::read_block(hal, cfg, memmap::ADDR_OPERATING_MODE, &mut buf)?;
            Ok(buf[0])
        })
    }

    /// `mode` is a two-bit mask; any bit above bit 1 is `OutOfRange`, and
    /// each requested bit is separately checked against the device's
    /// mode-support cache.
    pub fn write_operating_mode(&mut self, mode: u8) -> Result<(), Status> {
        if mode > 0b11 {
            return Err(Status::new(StatusKind::OutOfRange, mode as i32, "operating mode mask > 0b11"));
        }
        if !self.features().supports_operating_mode(mode) {
            return Err(Status::from(StatusKind::NotSupported));
        }
        self.tracked(|hal, cfg| memory::write_byte_verified(hal, cfg, memmap::ADDR_OPERATING_MODE, mode))
    }

    /// Bit 0 of 0xD9.
    pub fn read_auto_adjust_status(&mut self) -> Result<bool, Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 1];
            memory::read_block(hal, cfg, memmap::ADDR_AUTO_ADJUST, &mut buf)?;
            Ok(buf[0] & 0x01 != 0)
        })
    }

    /// Sets bit 0 of 0xD9. The device offers no way to cancel an
    /// in-progress auto-adjust once started.
    pub fn start_auto_adjust(&mut self) -> Result<(), Status> {
        if !self.features().supports_auto_adjust_start() {
            return Err(Status::from(StatusKind::NotSupported));
        }
        self.tracked(|hal, cfg| memory::write_byte_verified(hal, cfg, memmap::ADDR_AUTO_ADJUST, 0x01))
    }

    pub fn read_co2_offset(&mut self) -> Result<i16, Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 2];
            memory::read_block(hal, cfg, memmap::ADDR_CO2_OFFSET, &mut buf)?;
            Ok(i16::from_le_bytes(buf))
        })
    }

    pub fn write_co2_offset(&mut self, offset: i16) -> Result<(), Status> {
        self.tracked(|hal, cfg| {
            let [low, high] = offset.to_le_bytes();
            memory::write_byte_verified(hal, cfg, memmap::ADDR_CO2_OFFSET, low)?;
            memory::write_byte_verified(hal, cfg, memmap::ADDR_CO2_OFFSET + 1, high)
        })
    }

    /// Raw register value; the physical gain is `value / 32768`.
    pub fn read_co2_gain(&mut self) -> Result<u16, Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 2];
            memory::read_block(hal, cfg, memmap::ADDR_CO2_GAIN, &mut buf)?;
            Ok(u16::from_le_bytes(buf))
        })
    }

    pub fn write_co2_gain(&mut self, value: u16) -> Result<(), Status> {
        self.tracked(|hal, cfg| {
            let [low, high] = value.to_le_bytes();
            memory::write_byte_verified(hal, cfg, memmap::ADDR_CO2_GAIN, low)?;
            memory::write_byte_verified(hal, cfg, memmap::ADDR_CO2_GAIN + 1, high)
        })
    }

    /// Four bytes starting at 0x5C: lower cal point then upper cal point,
    /// each a little-endian u16.
    pub fn read_co2_cal_points(&mut self) -> Result<(u16, u16), Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 4];
            memory::read_block(hal, cfg, memmap::ADDR_CO2_CAL_POINTS, &mut buf)?;
            let lower = u16::from_le_bytes([buf[0], buf[1]]);
            let upper = u16::from_le_bytes([buf[2], buf[3]]);
            Ok((lower, upper))
        })
    }
}
