//! Bit-Line Layer: START/STOP framing, single-bit write/read, ACK drive and
//! sense, and the clock-stretch wait every other primitive is built on.
//!
//! The bus is open-drain: every primitive here leaves SCL low at both entry
//! and exit, so the next primitive in a transaction can always assume that
//! invariant without re-synchronising.

use crate::config::Config;
use crate::hal::Hal;
use crate::status::{Status, StatusKind};

/// Minimum data-setup time before releasing SCL, per the device wire
/// protocol. Not exposed in `Config` (see design notes): it has the
/// character of a timing floor rather than something a caller would tune.
pub(crate) const DATA_SETUP_US: u32 = 10;

/// Poll step while waiting out a clock stretch.
const STRETCH_POLL_US: u32 = 5;

/// Wait for SCL to read high, accumulating elapsed time into both a local
/// per-bit counter (bounded by `cfg.bit_timeout_us`) and the caller's
/// shared per-byte counter (bounded by `cfg.byte_timeout_us`). Fails with
/// `Timeout` the instant either bound would be exceeded.
pub(crate) fn wait_for_scl_high(hal: &mut impl Hal, cfg: &Config, byte_elapsed_us: &mut u32) -> Result<(), Status> {
    let mut bit_elapsed_us: u32 = 0;
    loop {
        if hal.read_scl() {
            return Ok(());
        }
        hal.delay_us(STRETCH_POLL_US);
        bit_elapsed_us = bit_elapsed_us.saturating_add(STRETCH_POLL_US);
        *byte_elapsed_us = byte_elapsed_us.saturating_add(STRETCH_POLL_US);
        if bit_elapsed_us > cfg.bit_timeout_us {
            return Err(Status::new(StatusKind::Timeout, bit_elapsed_us as i32, "scl stretch exceeded per-bit budget"));
        }
        if *byte_elapsed_us > cfg.byte_timeout_us {
            return Err(Status::new(
                StatusKind::Timeout,
                *byte_elapsed_us as i32,
                "scl stretch exceeded per-byte budget",
            ));
        }
    }
}

/// Generate a START condition.
pub(crate) fn start(hal: &mut impl Hal, cfg: &Config) -> Result<(), Status> {
    hal.set_sda(true);
    hal.set_scl(true);
    let mut elapsed_us = 0u32;
    wait_for_scl_high(hal, cfg, &mut elapsed_us)?;
    hal.delay_us(cfg.start_stop_hold_us);
    hal.set_sda(false);
    hal.delay_us(cfg.start_stop_hold_us);
    hal.set_scl(false);
    hal.delay_us(cfg.clock_low_us);
    Ok(())
}

/// Generate a STOP condition. Assumes SCL is already low at entry.
pub(crate) fn stop(hal: &mut impl Hal, cfg: &Config) -> Result<(), Status> {
    hal.set_sda(false);
    hal.delay_us(DATA_SETUP_US);
    hal.set_scl(true);
    let mut elapsed_us = 0u32;
    wait_for_scl_high(hal, cfg, &mut elapsed_us)?;
    hal.delay_us(cfg.start_stop_hold_us);
    hal.set_sda(true);
    hal.delay_us(cfg.start_stop_hold_us);
    Ok(())
}

/// Best-effort STOP used to leave the bus in a defined state after a lower
/// layer has already failed. The original error is what gets propagated;
/// this one is deliberately discarded.
pub(crate) fn stop_best_effort(hal: &mut impl Hal, cfg: &Config) {
    let _ = stop(hal, cfg);
}

/// Write a single bit, MSB-first framing handled by the byte layer.
pub(crate) fn write_bit(hal: &mut impl Hal, cfg: &Config, bit: bool, byte_elapsed_us: &mut u32) -> Result<(), Status> {
    hal.set_sda(bit);
    hal.delay_us(DATA_SETUP_US);
    hal.set_scl(true);
    wait_for_scl_high(hal, cfg, byte_elapsed_us)?;
    hal.delay_us(cfg.clock_high_us);
    hal.set_scl(false);
    hal.delay_us(cfg.clock_low_us);
    Ok(())
}

/// Read a single bit, sampling at the midpoint of the clock-high phase.
pub(crate) fn read_bit(hal: &mut impl Hal, cfg: &Config, byte_elapsed_us: &mut u32) -> Result<bool, Status> {
    hal.set_sda(true);
    hal.delay_us(DATA_SETUP_US);
    hal.set_scl(true);
    wait_for_scl_high(hal, cfg, byte_elapsed_us)?;
    let half = cfg.clock_high_us / 2;
    hal.delay_us(half);
    let bit = hal.read_sda();
    hal.delay_us(cfg.clock_high_us - half);
    hal.set_scl(false);
    hal.delay_us(cfg.clock_low_us);
    Ok(bit)
}

/// Drive the ACK/NACK bit after receiving a byte. `ack == true` pulls SDA
/// low; `ack == false` releases it (NACK).
pub(crate) fn send_ack(hal: &mut impl Hal, cfg: &Config, ack: bool, byte_elapsed_us: &mut u32) -> Result<(), Status> {
    hal.set_sda(!ack);
    hal.delay_us(DATA_SETUP_US);
    hal.set_scl(true);
    wait_for_scl_high(hal, cfg, byte_elapsed_us)?;
    hal.delay_us(cfg.clock_high_us);
    hal.set_scl(false);
    hal.delay_us(cfg.clock_low_us);
    hal.set_sda(true);
    Ok(())
}

/// Observe the ACK/NACK bit after sending a byte. Returns `true` iff the
/// device acknowledged (sampled level was low).
pub(crate) fn observe_ack(hal: &mut impl Hal, cfg: &Config, byte_elapsed_us: &mut u32) -> Result<bool, Status> {
    let level = read_bit(hal, cfg, byte_elapsed_us)?;
    Ok(!level)
}
