//! Driver configuration: timing floors, address, flash-commit delays.

use crate::status::{Status, StatusKind};

/// Immutable-after-`begin` driver configuration.
///
/// Defaults match the EE871/E2 device spec's documented commit delays and
/// the most permissive (slowest, safest) timing floors; callers tune only
/// what their bus needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Device address on the bus, 0..=7.
    pub address: u8,
    /// Minimum SCL-low width, in microseconds. Must be >= 100.
    pub clock_low_us: u32,
    /// Minimum SCL-high width, in microseconds. Must be >= 100.
    pub clock_high_us: u32,
    /// START/STOP hold width, in microseconds. Must be >= 4.
    pub start_stop_hold_us: u32,
    /// Per-bit clock-stretch timeout, in microseconds. Must be non-zero and
    /// <= 25_000 (device spec ceiling for slave clock-stretching).
    pub bit_timeout_us: u32,
    /// Per-byte clock-stretch timeout, in microseconds. Must be non-zero,
    /// >= `bit_timeout_us`, and <= 35_000.
    pub byte_timeout_us: u32,
    /// Flash-commit delay after a single custom-memory byte write, in ms.
    /// Must be <= 5000.
    pub single_byte_commit_ms: u32,
    /// Flash-commit delay after the measurement-interval byte pair, in ms.
    /// Must be <= 5000.
    pub interval_commit_ms: u32,
    /// Number of consecutive tracked failures before the driver reports
    /// `Offline` instead of `Degraded`. Must be >= 1.
    pub offline_threshold: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: 0,
            clock_low_us: 100,
            clock_high_us: 100,
            start_stop_hold_us: 4,
            bit_timeout_us: 25_000,
            byte_timeout_us: 35_000,
            single_byte_commit_ms: 150,
            interval_commit_ms: 300,
            offline_threshold: 3,
        }
    }
}

impl Config {
    /// Validate every rule from the "begin rejects with INVALID_CONFIG when"
    /// list. Returns the first violation found, in the order listed.
    pub fn validate(&self) -> Result<(), Status> {
        if self.address > 7 {
            return Err(Status::new(StatusKind::InvalidConfig, self.address as i32, "address > 7"));
        }
        if self.clock_low_us < 100 {
            return Err(Status::new(
                StatusKind::InvalidConfig,
                self.clock_low_us as i32,
                "clock_low_us < 100",
            ));
        }
        if self.clock_high_us < 100 {
            return Err(Status::new(
                StatusKind::InvalidConfig,
                self.clock_high_us as i32,
                "clock_high_us < 100",
            ));
        }
        if self.start_stop_hold_us < 4 {
            return Err(Status::new(
                StatusKind::InvalidConfig,
                self.start_stop_hold_us as i32,
                "start_stop_hold_us < 4",
            ));
        }
        if self.bit_timeout_us == 0 {
            return Err(Status::new(StatusKind::InvalidConfig, 0, "bit_timeout_us is zero"));
        }
        if self.byte_timeout_us == 0 {
            return Err(Status::new(StatusKind::InvalidConfig, 0, "byte_timeout_us is zero"));
        }
        if self.byte_timeout_us < self.bit_timeout_us {
            return Err(Status::new(
                StatusKind::InvalidConfig,
                self.byte_timeout_us as i32,
                "byte_timeout_us < bit_timeout_us",
            ));
        }
        if self.offline_threshold == 0 {
            return Err(Status::new(StatusKind::InvalidConfig, 0, "offline_threshold is zero"));
        }
        if self.single_byte_commit_ms > 5000 {
            return Err(Status::new(
                StatusKind::InvalidConfig,
                self.single_byte_commit_ms as i32,
                "single_byte_commit_ms > 5000",
            ));
        }
        if self.interval_commit_ms > 5000 {
            return Err(Status::new(
                StatusKind::InvalidConfig,
                self.interval_commit_ms as i32,
                "interval_commit_ms > 5000",
            ));
        }
        Ok(())
    }
}

static_assertions::assert_impl_all!(Config: Copy, Send, Sync);
