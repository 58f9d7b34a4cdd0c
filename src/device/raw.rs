//! Escape hatches for direct device reads/pointer control, plus the
//! recovery-facing operations (`bus_reset`, `check_bus_idle`, `recover`).

use crate::driver::Driver;
use crate::frame::{self, ControlByte};
use crate::hal::Hal;
use crate::memory;
use crate::recovery;
use crate::status::{Status, StatusKind};

impl<H: Hal> Driver<H> {
    /// Issue a raw read with the given main-command nibble. `nibble` must
    /// fit in four bits; the device address comes from the active config.
    pub fn read_control_byte(&mut self, nibble: u8) -> Result<u8, Status> {
        self.tracked(|hal, cfg| {
            let ctrl = ControlByte::read(nibble, cfg.address)?;
            frame::read_transaction(hal, cfg, ctrl)
        })
    }

    /// Raw low/high nibble pair, assembled low-byte-first like every other
    /// 16-bit sensor value.
    pub fn read_u16(&mut self, low_nibble: u8, high_nibble: u8) -> Result<u16, Status> {
        self.tracked(|hal, cfg| {
            let lo_ctrl = ControlByte::read(low_nibble, cfg.address)?;
            let hi_ctrl = ControlByte::read(high_nibble, cfg.address)?;
            let lo = frame::read_transaction(hal, cfg, lo_ctrl)?;
            let hi = frame::read_transaction(hal, cfg, hi_ctrl)?;
            Ok(u16::from_le_bytes([lo, hi]))
        })
    }

    /// Seats the device-side custom-memory pointer directly. `address` must
    /// fit in a byte; anything above 0xFF is `OutOfRange`.
    pub fn set_custom_pointer(&mut self, address: u16) -> Result<(), Status> {
        if address > 0xFF {
            return Err(Status::new(StatusKind::OutOfRange, address as i32, "pointer > 0xFF"));
        }
        self.tracked(|hal, cfg| memory::set_pointer(hal, cfg, address as u8))
    }

    /// Rescue sequence, bypassing the health wrapper.
    pub fn bus_reset(&mut self) -> Result<(), Status> {
        self.raw(|hal, cfg| recovery::bus_reset(hal, cfg))
    }

    /// `Ok(())` iff both lines sample high, bypassing the health wrapper.
    pub fn check_bus_idle(&mut self) -> Result<(), Status> {
        self.raw(|hal, cfg| recovery::check_bus_idle(hal, cfg))
    }

    /// Always attempts `bus_reset` first (ignoring its outcome), then
    /// performs a tracked group read and returns that outcome.
    pub fn recover(&mut self) -> Result<u16, Status> {
        let _ = self.bus_reset();
        self.read_group()
    }
}
