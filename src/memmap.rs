//! Custom-memory address map and device-wire-protocol nibble constants
//! (spec.md §6), collected in one place so device operations reference a
//! name instead of a bare literal.

// Read nibbles (control byte bits 7..4, rw bit = 1).
pub(crate) const NIBBLE_TYPE_LOW: u8 = 0x1;
pub(crate) const NIBBLE_SUBGROUP: u8 = 0x2;
pub(crate) const NIBBLE_AVAILABLE_MEASUREMENTS: u8 = 0x3;
pub(crate) const NIBBLE_TYPE_HIGH: u8 = 0x4;
pub(crate) const NIBBLE_STATUS: u8 = 0x7;
pub(crate) const NIBBLE_MV1_LOW: u8 = 0x8;
pub(crate) const NIBBLE_MV1_HIGH: u8 = 0x9;
pub(crate) const NIBBLE_MV2_LOW: u8 = 0xA;
pub(crate) const NIBBLE_MV2_HIGH: u8 = 0xB;
pub(crate) const NIBBLE_MV3_LOW: u8 = 0xC;
pub(crate) const NIBBLE_MV3_HIGH: u8 = 0xD;
pub(crate) const NIBBLE_MV4_LOW: u8 = 0xE;
pub(crate) const NIBBLE_MV4_HIGH: u8 = 0xF;

/// Group identifier asserted by `probe`: low = 0x67, high = 0x03.
pub(crate) const EXPECTED_GROUP: u16 = 0x0367;
pub(crate) const EXPECTED_SUBGROUP: u8 = 0x09;

// Custom-memory addresses.
pub(crate) const ADDR_FIRMWARE_MAIN: u8 = 0x00;
pub(crate) const ADDR_FIRMWARE_SUB: u8 = 0x01;
pub(crate) const ADDR_E2_SPEC_VERSION: u8 = 0x02;
pub(crate) const ADDR_OPERATING_FUNCTIONS: u8 = 0x07;
pub(crate) const ADDR_MODE_SUPPORT: u8 = 0x08;
pub(crate) const ADDR_SPECIAL_FEATURES: u8 = 0x09;
pub(crate) const ADDR_CO2_OFFSET: u8 = 0x58;
pub(crate) const ADDR_CO2_GAIN: u8 = 0x5A;
pub(crate) const ADDR_CO2_CAL_POINTS: u8 = 0x5C;
pub(crate) const ADDR_SERIAL_NUMBER: u8 = 0xA0;
pub(crate) const ADDR_PART_NAME: u8 = 0xB0;
pub(crate) const ADDR_BUS_ADDRESS: u8 = 0xC0;
pub(crate) const ADDR_ERROR_CODE: u8 = 0xC1;
pub(crate) const ADDR_CO2_INTERVAL_FACTOR: u8 = 0xCB;
pub(crate) const ADDR_CO2_FILTER: u8 = 0xD3;
pub(crate) const ADDR_OPERATING_MODE: u8 = 0xD8;
pub(crate) const ADDR_AUTO_ADJUST: u8 = 0xD9;
