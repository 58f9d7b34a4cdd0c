//! Frame Layer: control-byte construction, the read/write transaction
//! recipes, and PEC computation/verification.

use crate::byte;
use crate::bitline;
use crate::config::Config;
use crate::hal::Hal;
use crate::status::{NackedByte, Status, StatusKind};

/// A validated `[main:4 | addr:3 | rw:1]` control byte. Can only be
/// constructed through [`ControlByte::read`] / [`ControlByte::write`],
/// which reject an out-of-range nibble or address. The layout is never
/// assembled ad hoc elsewhere in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ControlByte(u8);

impl ControlByte {
    fn build(main_nibble: u8, address: u8, is_read: bool) -> Result<Self, Status> {
        if main_nibble > 0x0F {
            return Err(Status::new(StatusKind::InvalidParam, main_nibble as i32, "main nibble > 0x0F"));
        }
        if address > 7 {
            return Err(Status::new(StatusKind::InvalidParam, address as i32, "device address > 7"));
        }
        Ok(Self((main_nibble << 4) | (address << 1) | (is_read as u8)))
    }

    pub(crate) fn read(main_nibble: u8, address: u8) -> Result<Self, Status> {
        Self::build(main_nibble, address, true)
    }

    pub(crate) fn write(main_nibble: u8, address: u8) -> Result<Self, Status> {
        Self::build(main_nibble, address, false)
    }

    pub(crate) fn raw(self) -> u8 {
        self.0
    }
}

fn pec_for_read(control: u8, data: u8) -> u8 {
    control.wrapping_add(data)
}

fn pec_for_write(control: u8, address: u8, data: u8) -> u8 {
    control.wrapping_add(address).wrapping_add(data)
}

/// START; send control; observe ACK; read data; send ACK; read PEC; send
/// NACK; STOP. Verifies the PEC before returning the data byte.
pub(crate) fn read_transaction(hal: &mut impl Hal, cfg: &Config, control: ControlByte) -> Result<u8, Status> {
    #[cfg(feature = "defmt")]
    defmt::trace!("frame: read start, control={}", control.raw());

    bitline::start(hal, cfg)?;

    let acked = match byte::send_byte_observe_ack(hal, cfg, control.raw()) {
        Ok(acked) => acked,
        Err(e) => {
            bitline::stop_best_effort(hal, cfg);
            return Err(e);
        }
    };
    if !acked {
        bitline::stop_best_effort(hal, cfg);
        #[cfg(feature = "defmt")]
        defmt::warn!("frame: read nacked on control byte");
        return Err(Status::new(StatusKind::Nack, NackedByte::Control.detail(), "e2 bus nack"));
    }

    let data = match byte::recv_byte_send_ack(hal, cfg, true) {
        Ok(data) => data,
        Err(e) => {
            bitline::stop_best_effort(hal, cfg);
            return Err(e);
        }
    };

    let pec = match byte::recv_byte_send_ack(hal, cfg, false) {
        Ok(pec) => pec,
        Err(e) => {
            bitline::stop_best_effort(hal, cfg);
            return Err(e);
        }
    };

    bitline::stop(hal, cfg)?;

    let expected = pec_for_read(control.raw(), data);
    if pec != expected {
        #[cfg(feature = "defmt")]
        defmt::warn!("frame: pec mismatch on read, expected={} received={}", expected, pec);
        return Err(Status::new(StatusKind::PecMismatch, pec as i32, "pec mismatch on read"));
    }

    #[cfg(feature = "defmt")]
    defmt::trace!("frame: read stop, data={}", data);
    Ok(data)
}

fn send_and_check_ack(
    hal: &mut impl Hal,
    cfg: &Config,
    byte_value: u8,
    which: NackedByte,
) -> Result<(), Status> {
    match byte::send_byte_observe_ack(hal, cfg, byte_value) {
        Ok(true) => Ok(()),
        Ok(false) => {
            bitline::stop_best_effort(hal, cfg);
            #[cfg(feature = "defmt")]
            defmt::warn!("frame: write nacked, byte={}", byte_value);
            Err(Status::new(StatusKind::Nack, which.detail(), "e2 bus nack"))
        }
        Err(e) => {
            bitline::stop_best_effort(hal, cfg);
            Err(e)
        }
    }
}

/// START; send control + observe ACK; send address + observe ACK; send
/// data + observe ACK; send PEC + observe ACK; STOP.
pub(crate) fn write_transaction(
    hal: &mut impl Hal,
    cfg: &Config,
    control: ControlByte,
    address: u8,
    data: u8,
) -> Result<(), Status> {
    #[cfg(feature = "defmt")]
    defmt::trace!("frame: write start, control={} address={} data={}", control.raw(), address, data);

    bitline::start(hal, cfg)?;
    send_and_check_ack(hal, cfg, control.raw(), NackedByte::Control)?;
    send_and_check_ack(hal, cfg, address, NackedByte::Address)?;
    send_and_check_ack(hal, cfg, data, NackedByte::Data)?;
    let pec = pec_for_write(control.raw(), address, data);
    send_and_check_ack(hal, cfg, pec, NackedByte::Pec)?;
    bitline::stop(hal, cfg)?;

    #[cfg(feature = "defmt")]
    defmt::trace!("frame: write stop");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_byte_layout_matches_spec() {
        let c = ControlByte::read(0x7, 0x3).unwrap();
        // main=0x7 -> bits 7..4, addr=0x3 -> bits 3..1, read -> bit0=1
        assert_eq!(c.raw(), 0b0111_0111);
        let c = ControlByte::write(0x1, 0x0).unwrap();
        assert_eq!(c.raw(), 0b0001_0000);
    }

    #[test]
    fn control_byte_rejects_out_of_range() {
        assert_eq!(ControlByte::read(0x10, 0).unwrap_err().kind, StatusKind::InvalidParam);
        assert_eq!(ControlByte::read(0, 8).unwrap_err().kind, StatusKind::InvalidParam);
    }

    #[test]
    fn pec_formulas_match_spec() {
        assert_eq!(pec_for_read(0x77, 0x12), 0x89);
        assert_eq!(pec_for_write(0x10, 0x58, 0x01), 0x69);
    }
}
