#![no_std]
//! Bit-banged E+E E2 two-wire master and managed EE871 CO2 probe driver.
//!
//! Layers, leaves first: [`bitline`] (START/STOP, bit write/read, ACK) under
//! [`byte`] (MSB-first byte assembly) under [`frame`] (read/write
//! transactions, PEC) under [`memory`] (custom-memory pointer protocol).
//! [`device`] builds the public, typed operations on top of those, wrapped
//! by [`health`] everywhere except the diagnostic paths in [`recovery`].
//! [`driver::Driver`] ties configuration, lifecycle, and the feature cache
//! together into the single entry point callers use.

mod bitline;
mod byte;
mod config;
mod device;
mod driver;
mod features;
mod frame;
mod hal;
mod health;
mod memmap;
mod memory;
mod recovery;
mod status;

pub use config::Config;
pub use driver::Driver;
pub use features::FeatureCache;
pub use hal::Hal;
pub use health::{Health, HealthState};
pub use status::{NackedByte, Status, StatusKind};
