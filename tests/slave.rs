//! Software E2 slave emulator implementing `Hal`, used by the scenario
//! tests in `scenarios.rs` to drive the real bit-banged master end to end
//! without hardware. Tracks protocol phase against the exact call sequence
//! the bit/byte/frame layers make; `delay_us` is a no-op since none of the
//! scenarios depend on real elapsed time.

use std::cell::RefCell;
use std::rc::Rc;

use ee871_e2::Hal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    RecvControl { bits: u8, value: u8 },
    AckControl,
    ReadSendData { bits: u8, value: u8 },
    ReadWaitMasterAckData,
    ReadSendPec { bits: u8, value: u8 },
    ReadWaitMasterNackPec,
    ReadDone,
    WriteRecvAddress { bits: u8, value: u8 },
    WriteAckAddress,
    WriteRecvData { bits: u8, value: u8 },
    WriteAckData,
    WriteRecvPec { bits: u8, value: u8 },
    WriteAckPec,
    WriteDone,
}

pub struct Slave {
    pub memory: [u8; 256],
    pub pointer: u8,

    pub type_low: u8,
    pub type_high: u8,
    pub subgroup: u8,
    pub available_measurements: u8,
    pub status: u8,
    pub mv3_low: u8,
    pub mv3_high: u8,
    pub mv4_low: u8,
    pub mv4_high: u8,

    pub nack_control: bool,
    pub nack_address: bool,
    pub nack_data: bool,
    pub nack_pec: bool,
    pub bad_read_pec: bool,
    pub stretch_polls: u32,
    /// When set, `read_sda` always reports the line low regardless of
    /// protocol phase: models a wedged slave that never releases SDA.
    pub force_sda_low: bool,

    scl_released: bool,
    sda_released: bool,
    phase: Phase,
    pending_control: u8,
    pending_address: u8,
    pending_data: u8,
    pending_pec: u8,
}

impl Slave {
    pub fn new() -> Self {
        Self {
            memory: [0u8; 256],
            pointer: 0,
            type_low: 0x67,
            type_high: 0x03,
            subgroup: 0x09,
            available_measurements: 0x08,
            status: 0x00,
            mv3_low: 0,
            mv3_high: 0,
            mv4_low: 0,
            mv4_high: 0,
            nack_control: false,
            nack_address: false,
            nack_data: false,
            nack_pec: false,
            bad_read_pec: false,
            stretch_polls: 0,
            force_sda_low: false,
            scl_released: true,
            sda_released: true,
            phase: Phase::Idle,
            pending_control: 0,
            pending_address: 0,
            pending_data: 0,
            pending_pec: 0,
        }
    }

    /// Simulates both lines reading low at entry (as if the device is
    /// wedged) and configures it to never release SDA afterwards, for the
    /// `bus_reset` / `begin` rescue-failure scenario.
    pub fn jam_lines(&mut self) {
        self.scl_released = false;
        self.sda_released = false;
        self.force_sda_low = true;
    }

    pub fn set_co2_fast(&mut self, ppm: u16) {
        let [lo, hi] = ppm.to_le_bytes();
        self.mv3_low = lo;
        self.mv3_high = hi;
    }

    pub fn set_co2_average(&mut self, ppm: u16) {
        let [lo, hi] = ppm.to_le_bytes();
        self.mv4_low = lo;
        self.mv4_high = hi;
    }

    /// Seats the three feature-cache bytes (0x07/0x08/0x09) in memory so
    /// `begin`'s best-effort feature read finds them.
    pub fn set_feature_bytes(&mut self, operating_functions: u8, mode_support: u8, special_features: u8) {
        self.memory[0x07] = operating_functions;
        self.memory[0x08] = mode_support;
        self.memory[0x09] = special_features;
    }

    fn read_register(&mut self, nibble: u8) -> u8 {
        match nibble {
            0x1 => self.type_low,
            0x4 => self.type_high,
            0x2 => self.subgroup,
            0x3 => self.available_measurements,
            0x7 => self.status,
            0x5 => {
                let value = self.memory[self.pointer as usize];
                self.pointer = self.pointer.wrapping_add(1);
                value
            }
            0xC => self.mv3_low,
            0xD => self.mv3_high,
            0xE => self.mv4_low,
            0xF => self.mv4_high,
            _ => 0,
        }
    }

    fn apply_write(&mut self) {
        let nibble = self.pending_control >> 4;
        match nibble {
            0x5 => self.pointer = self.pending_data,
            0x1 => self.memory[self.pending_address as usize] = self.pending_data,
            _ => {}
        }
    }

    fn on_master_bit(&mut self, level: bool) {
        let bit = level as u8;
        self.phase = match self.phase {
            Phase::RecvControl { bits, value } => {
                let value = (value << 1) | bit;
                let bits = bits + 1;
                if bits == 8 {
                    self.pending_control = value;
                    Phase::AckControl
                } else {
                    Phase::RecvControl { bits, value }
                }
            }
            Phase::WriteRecvAddress { bits, value } => {
                let value = (value << 1) | bit;
                let bits = bits + 1;
                if bits == 8 {
                    self.pending_address = value;
                    Phase::WriteAckAddress
                } else {
                    Phase::WriteRecvAddress { bits, value }
                }
            }
            Phase::WriteRecvData { bits, value } => {
                let value = (value << 1) | bit;
                let bits = bits + 1;
                if bits == 8 {
                    self.pending_data = value;
                    Phase::WriteAckData
                } else {
                    Phase::WriteRecvData { bits, value }
                }
            }
            Phase::WriteRecvPec { bits, value } => {
                let value = (value << 1) | bit;
                let bits = bits + 1;
                if bits == 8 {
                    Phase::WriteAckPec
                } else {
                    Phase::WriteRecvPec { bits, value }
                }
            }
            Phase::ReadWaitMasterAckData => Phase::ReadSendPec { bits: 0, value: self.pending_pec },
            Phase::ReadWaitMasterNackPec => Phase::ReadDone,
            other => other,
        };
    }

    fn on_slave_bit_request(&mut self) -> bool {
        match self.phase {
            Phase::AckControl => {
                let ack = !self.nack_control;
                self.phase = if self.pending_control & 0x01 != 0 {
                    let nibble = self.pending_control >> 4;
                    let data = self.read_register(nibble);
                    let pec = self.pending_control.wrapping_add(data).wrapping_add(if self.bad_read_pec { 1 } else { 0 });
                    self.pending_pec = pec;
                    Phase::ReadSendData { bits: 0, value: data }
                } else {
                    Phase::WriteRecvAddress { bits: 0, value: 0 }
                };
                !ack
            }
            Phase::WriteAckAddress => {
                let ack = !self.nack_address;
                self.phase = Phase::WriteRecvData { bits: 0, value: 0 };
                !ack
            }
            Phase::WriteAckData => {
                let ack = !self.nack_data;
                self.phase = Phase::WriteRecvPec { bits: 0, value: 0 };
                !ack
            }
            Phase::WriteAckPec => {
                let ack = !self.nack_pec;
                if ack {
                    self.apply_write();
                }
                self.phase = Phase::WriteDone;
                !ack
            }
            Phase::ReadSendData { bits, value } => {
                let bit = (value >> (7 - bits)) & 1 != 0;
                self.phase = if bits + 1 == 8 {
                    Phase::ReadWaitMasterAckData
                } else {
                    Phase::ReadSendData { bits: bits + 1, value }
                };
                bit
            }
            Phase::ReadSendPec { bits, value } => {
                let bit = (value >> (7 - bits)) & 1 != 0;
                self.phase = if bits + 1 == 8 {
                    Phase::ReadWaitMasterNackPec
                } else {
                    Phase::ReadSendPec { bits: bits + 1, value }
                };
                bit
            }
            _ => true,
        }
    }
}

impl Hal for Slave {
    fn set_scl(&mut self, level: bool) {
        self.scl_released = level;
    }

    fn set_sda(&mut self, level: bool) {
        // A START condition is SDA falling while SCL is already released.
        if !level && self.scl_released {
            self.phase = Phase::RecvControl { bits: 0, value: 0 };
            self.sda_released = level;
            return;
        }
        self.sda_released = level;
        self.on_master_bit(level);
    }

    fn read_scl(&mut self) -> bool {
        if self.stretch_polls > 0 {
            self.stretch_polls -= 1;
            return false;
        }
        self.scl_released
    }

    fn read_sda(&mut self) -> bool {
        if self.force_sda_low {
            return false;
        }
        self.on_slave_bit_request()
    }

    fn delay_us(&mut self, _us: u32) {}
}

/// A `Slave` behind an `Rc<RefCell<_>>`, so a test can keep a handle to
/// reconfigure it (flip a NACK flag, jam a line) after handing the other
/// handle to a `Driver` that has already completed `begin`.
pub struct SharedSlave(Rc<RefCell<Slave>>);

impl SharedSlave {
    /// Returns two handles onto the same emulator: one to wrap in a
    /// `Driver`, one to keep for later reconfiguration.
    pub fn new(inner: Slave) -> (Self, Self) {
        let shared = Rc::new(RefCell::new(inner));
        (Self(shared.clone()), Self(shared))
    }

    pub fn configure(&self, f: impl FnOnce(&mut Slave)) {
        f(&mut self.0.borrow_mut());
    }
}

impl Hal for SharedSlave {
    fn set_scl(&mut self, level: bool) {
        self.0.borrow_mut().set_scl(level);
    }

    fn set_sda(&mut self, level: bool) {
        self.0.borrow_mut().set_sda(level);
    }

    fn read_scl(&mut self) -> bool {
        self.0.borrow_mut().read_scl()
    }

    fn read_sda(&mut self) -> bool {
        self.0.borrow_mut().read_sda()
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().delay_us(us);
    }
}
