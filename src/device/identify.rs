//! Identification and status reads: group/subgroup, available measurements,
//! status, firmware/spec versions, and the cached feature registers.

use crate::config::Config;
use crate::driver::Driver;
use crate::frame::{self, ControlByte};
use crate::hal::Hal;
use crate::memmap;
use crate::memory;
use crate::status::{Status, StatusKind};

/// Read type-low (0x1) then type-high (0x4) and assemble the group
/// identifier; used directly by `begin` before the driver is marked
/// initialised, and by [`Driver::probe`]/[`Driver::read_group`] afterwards.
pub(crate) fn read_group_raw(hal: &mut impl Hal, cfg: &Config) -> Result<u16, Status> {
    let lo_ctrl = ControlByte::read(memmap::NIBBLE_TYPE_LOW, cfg.address)?;
    let hi_ctrl = ControlByte::read(memmap::NIBBLE_TYPE_HIGH, cfg.address)?;
    let lo = frame::read_transaction(hal, cfg, lo_ctrl)?;
    let hi = frame::read_transaction(hal, cfg, hi_ctrl)?;
    let group = ((hi as u16) << 8) | lo as u16;
    if group != memmap::EXPECTED_GROUP {
        return Err(Status::new(StatusKind::DeviceNotFound, group as i32, "unexpected group id"));
    }
    Ok(group)
}

fn read_subgroup_raw(hal: &mut impl Hal, cfg: &Config) -> Result<u8, Status> {
    let ctrl = ControlByte::read(memmap::NIBBLE_SUBGROUP, cfg.address)?;
    let subgroup = frame::read_transaction(hal, cfg, ctrl)?;
    if subgroup != memmap::EXPECTED_SUBGROUP {
        return Err(Status::new(StatusKind::DeviceNotFound, subgroup as i32, "unexpected subgroup id"));
    }
    Ok(subgroup)
}

impl<H: Hal> Driver<H> {
    /// Identity probe bypassing the health wrapper; `begin` uses the
    /// free-function form directly since it runs before initialisation.
    pub fn probe(&mut self) -> Result<u16, Status> {
        self.raw(|hal, cfg| read_group_raw(hal, cfg))
    }

    pub fn read_group(&mut self) -> Result<u16, Status> {
        self.tracked(|hal, cfg| read_group_raw(hal, cfg))
    }

    pub fn read_subgroup(&mut self) -> Result<u8, Status> {
        self.tracked(|hal, cfg| read_subgroup_raw(hal, cfg))
    }

    /// Bitfield; bit 3 set means CO₂ is among the available measurements.
    pub fn read_available_measurements(&mut self) -> Result<u8, Status> {
        self.tracked(|hal, cfg| {
            let ctrl = ControlByte::read(memmap::NIBBLE_AVAILABLE_MEASUREMENTS, cfg.address)?;
            frame::read_transaction(hal, cfg, ctrl)
        })
    }

    /// Bitfield; bit 3 set is the CO₂-error latch. Reading status may cause
    /// the device to trigger a new measurement internally, this driver
    /// does not special-case that, it only reports what comes back.
    pub fn read_status(&mut self) -> Result<u8, Status> {
        self.tracked(|hal, cfg| {
            let ctrl = ControlByte::read(memmap::NIBBLE_STATUS, cfg.address)?;
            frame::read_transaction(hal, cfg, ctrl)
        })
    }

    pub fn read_error_code(&mut self) -> Result<u8, Status> {
        if !self.features().supports_error_code() {
            return Err(Status::from(StatusKind::NotSupported));
        }
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 1];
            memory::read_block(hal, cfg, memmap::ADDR_ERROR_CODE, &mut buf)?;
            Ok(buf[0])
        })
    }

    pub fn read_firmware_version(&mut self) -> Result<(u8, u8), Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 2];
            memory::read_block(hal, cfg, memmap::ADDR_FIRMWARE_MAIN, &mut buf)?;
            Ok((buf[0], buf[1]))
        })
    }

    pub fn read_e2_spec_version(&mut self) -> Result<u8, Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 1];
            memory::read_block(hal, cfg, memmap::ADDR_E2_SPEC_VERSION, &mut buf)?;
            Ok(buf[0])
        })
    }

    pub fn read_operating_functions(&mut self) -> Result<u8, Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 1];
            memory::read_block(hal, cfg, memmap::ADDR_OPERATING_FUNCTIONS, &mut buf)?;
            Ok(buf[0])
        })
    }

    pub fn read_operating_mode_support(&mut self) -> Result<u8, Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 1];
            memory::read_block(hal, cfg, memmap::ADDR_MODE_SUPPORT, &mut buf)?;
            Ok(buf[0])
        })
    }

    pub fn read_special_features(&mut self) -> Result<u8, Status> {
        self.tracked(|hal, cfg| {
            let mut buf = [0u8; 1];
            memory::read_block(hal, cfg, memmap::ADDR_SPECIAL_FEATURES, &mut buf)?;
            Ok(buf[0])
        })
    }
}
