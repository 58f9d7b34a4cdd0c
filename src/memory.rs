//! Custom-Memory Protocol: pointer-set, pointer-based auto-incrementing
//! read, direct single-byte write with flash-commit delay and read-back
//! verification, and the measurement-interval byte-pair special case.

use crate::frame::{self, ControlByte};
use crate::config::Config;
use crate::hal::Hal;
use crate::status::{Status, StatusKind};

const POINTER_SET_NIBBLE: u8 = 0x5;
const POINTER_READ_NIBBLE: u8 = 0x5;
const DIRECT_WRITE_NIBBLE: u8 = 0x1;

/// Low byte of the measurement-interval pair in custom memory.
pub(crate) const INTERVAL_ADDR_LOW: u8 = 0xC6;
/// High byte of the measurement-interval pair in custom memory.
pub(crate) const INTERVAL_ADDR_HIGH: u8 = 0xC7;

pub(crate) const INTERVAL_MIN_DS: u16 = 150;
pub(crate) const INTERVAL_MAX_DS: u16 = 36_000;

/// Seat the device-side custom-memory pointer at `address`.
pub(crate) fn set_pointer(hal: &mut impl Hal, cfg: &Config, address: u8) -> Result<(), Status> {
    let control = ControlByte::write(POINTER_SET_NIBBLE, cfg.address)?;
    // Upper pointer byte is always 0x00 for this device's 8-bit address space.
    frame::write_transaction(hal, cfg, control, 0x00, address)
}

/// Read `buf.len()` sequential bytes starting at `address`, relying on the
/// device's own pointer auto-increment rather than re-seating the pointer
/// per byte. `address + buf.len()` must not exceed 256.
pub(crate) fn read_block(hal: &mut impl Hal, cfg: &Config, address: u8, buf: &mut [u8]) -> Result<(), Status> {
    if address as usize + buf.len() > 256 {
        return Err(Status::new(
            StatusKind::OutOfRange,
            (address as usize + buf.len()) as i32,
            "address + length exceeds custom memory size",
        ));
    }
    if buf.is_empty() {
        return Ok(());
    }
    set_pointer(hal, cfg, address)?;
    let control = ControlByte::read(POINTER_READ_NIBBLE, cfg.address)?;
    for slot in buf.iter_mut() {
        *slot = frame::read_transaction(hal, cfg, control)?;
    }
    Ok(())
}

/// Write a single custom-memory byte, wait out the single-byte flash-commit
/// delay, then read it back and verify. A verify mismatch is `E2Error`, not
/// `PecMismatch` (which is reserved for checksum-layer disagreement).
pub(crate) fn write_byte_verified(hal: &mut impl Hal, cfg: &Config, address: u8, value: u8) -> Result<(), Status> {
    let control = ControlByte::write(DIRECT_WRITE_NIBBLE, cfg.address)?;
    frame::write_transaction(hal, cfg, control, address, value)?;
    hal.delay_us(cfg.single_byte_commit_ms.saturating_mul(1000));

    let mut observed = [0u8; 1];
    read_block(hal, cfg, address, &mut observed)?;
    if observed[0] != value {
        return Err(Status::new(StatusKind::E2Error, observed[0] as i32, "write-back verify mismatch"));
    }
    Ok(())
}

/// Read the measurement interval, in deciseconds (0.1 s units).
pub(crate) fn read_interval(hal: &mut impl Hal, cfg: &Config) -> Result<u16, Status> {
    let mut buf = [0u8; 2];
    read_block(hal, cfg, INTERVAL_ADDR_LOW, &mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

/// Write both bytes of the measurement-interval pair back-to-back, wait out
/// the pair-commit delay once, then verify by reading both bytes back.
///
/// The two byte writes are *not* each followed by their own single-byte
/// commit wait: only one pair-commit sleep follows both. This mirrors the
/// spec's literal description, flagged there as an open question rather
/// than a known defect, see DESIGN.md.
pub(crate) fn write_interval(hal: &mut impl Hal, cfg: &Config, deciseconds: u16) -> Result<(), Status> {
    if !(INTERVAL_MIN_DS..=INTERVAL_MAX_DS).contains(&deciseconds) {
        return Err(Status::new(
            StatusKind::OutOfRange,
            deciseconds as i32,
            "interval outside [150, 36000] deciseconds",
        ));
    }
    let control = ControlByte::write(DIRECT_WRITE_NIBBLE, cfg.address)?;
    let [low, high] = deciseconds.to_le_bytes();
    frame::write_transaction(hal, cfg, control, INTERVAL_ADDR_LOW, low)?;
    frame::write_transaction(hal, cfg, control, INTERVAL_ADDR_HIGH, high)?;
    hal.delay_us(cfg.interval_commit_ms.saturating_mul(1000));

    let observed = read_interval(hal, cfg)?;
    if observed != deciseconds {
        return Err(Status::new(StatusKind::E2Error, observed as i32, "interval verify mismatch"));
    }
    Ok(())
}
