//! Feature-flag cache: the three bitfields read once during `begin` and
//! never mutated afterwards. A device that loses support for something
//! between power-up and first use is not detected. The cache, not a
//! fresh read, is what gates every feature-conditioned operation.
//!
//! Bit assignments below are this driver's convention for the three
//! registers named in the device's custom memory map (0x07/0x08/0x09);
//! see DESIGN.md for why they are fixed where the distilled spec left
//! them unstated.

/// Cached contents of the operating-functions, operating-mode-support, and
/// special-features registers (custom addresses 0x07, 0x08, 0x09).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeatureCache {
    pub operating_functions: u8,
    pub mode_support: u8,
    pub special_features: u8,
}

impl FeatureCache {
    pub fn supports_serial_number(&self) -> bool {
        self.operating_functions & 0x01 != 0
    }

    pub fn supports_part_name(&self) -> bool {
        self.operating_functions & 0x02 != 0
    }

    pub fn supports_bus_address_write(&self) -> bool {
        self.operating_functions & 0x04 != 0
    }

    pub fn supports_error_code(&self) -> bool {
        self.operating_functions & 0x80 != 0
    }

    pub fn supports_global_interval_write(&self) -> bool {
        self.special_features & 0x01 != 0
    }

    pub fn supports_co2_interval_factor_write(&self) -> bool {
        self.special_features & 0x02 != 0
    }

    pub fn supports_co2_filter_write(&self) -> bool {
        self.special_features & 0x04 != 0
    }

    pub fn supports_auto_adjust_start(&self) -> bool {
        self.special_features & 0x08 != 0
    }

    /// `mode` must already be validated to fit in two bits (see
    /// `write_operating_mode`); checks each requested bit against its
    /// corresponding support bit.
    pub fn supports_operating_mode(&self, mode: u8) -> bool {
        (mode & !self.mode_support) == 0
    }
}

/// `bit 3` of the available-measurements bitfield (custom command 0x3).
pub const fn measurements_has_co2(bits: u8) -> bool {
    bits & 0x08 != 0
}

/// `bit 3` of the status bitfield (custom command 0x7).
pub const fn status_has_co2_error(bits: u8) -> bool {
    bits & 0x08 != 0
}
