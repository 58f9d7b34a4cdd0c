//! Byte Layer: MSB-first byte send/receive built around the Bit-Line layer,
//! each sharing a single elapsed-µs accumulator across all nine clock
//! periods of a byte (eight data bits plus the ACK/NACK bit) so the
//! per-byte stretch envelope is enforced over the whole group, not just
//! the eight data bits.

use crate::bitline;
use crate::config::Config;
use crate::hal::Hal;
use crate::status::Status;

/// Send a byte MSB-first, then observe the device's ACK/NACK.
/// Returns `true` iff the device acknowledged.
pub(crate) fn send_byte_observe_ack(hal: &mut impl Hal, cfg: &Config, byte: u8) -> Result<bool, Status> {
    let mut elapsed_us = 0u32;
    for i in (0..8).rev() {
        let bit = (byte >> i) & 1 != 0;
        bitline::write_bit(hal, cfg, bit, &mut elapsed_us)?;
    }
    bitline::observe_ack(hal, cfg, &mut elapsed_us)
}

/// Receive a byte MSB-first, then drive the ACK/NACK bit.
pub(crate) fn recv_byte_send_ack(hal: &mut impl Hal, cfg: &Config, ack: bool) -> Result<u8, Status> {
    let mut elapsed_us = 0u32;
    let mut byte = 0u8;
    for _ in 0..8 {
        let bit = bitline::read_bit(hal, cfg, &mut elapsed_us)?;
        byte = (byte << 1) | (bit as u8);
    }
    bitline::send_ack(hal, cfg, ack, &mut elapsed_us)?;
    Ok(byte)
}
