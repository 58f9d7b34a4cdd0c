//! Top-level `Driver`: config validation, lifecycle (`begin`/`tick`/`end`),
//! and the shared `tracked`/`raw` call paths every device operation is
//! built on.

use crate::config::Config;
use crate::device::identify::read_group_raw;
use crate::features::FeatureCache;
use crate::hal::Hal;
use crate::health::{Health, HealthState};
use crate::memmap;
use crate::memory;
use crate::recovery;
use crate::status::{Status, StatusKind};

/// A managed E2/EE871 driver instance, generic over the HAL callback set.
///
/// Owns no heap allocations: every caller-facing buffer (serial number,
/// part name, calibration blocks) is a caller-supplied fixed-size slice.
/// Two instances must never share a bus, the HAL is expected to own the
/// pin configuration and be single-writer by construction.
pub struct Driver<H: Hal> {
    hal: H,
    config: Config,
    initialized: bool,
    now_ms: u32,
    features: FeatureCache,
    /// Lifetime counters and current lifecycle state; `pub` so callers can
    /// inspect `is_online()`, counters, and the last error without a getter
    /// per field.
    pub health: Health,
}

impl<H: Hal> Driver<H> {
    /// Wrap a HAL implementation. The instance starts in `Uninit`; call
    /// [`Driver::begin`] before any bus-touching operation.
    pub fn new(hal: H) -> Self {
        let config = Config::default();
        Self {
            hal,
            health: Health::new(config.offline_threshold),
            config,
            initialized: false,
            now_ms: 0,
            features: FeatureCache::default(),
        }
    }

    /// Validate `config`, rescue the bus if needed, probe for the device's
    /// group identifier, and best-effort cache its feature bits. Rejects a
    /// second call without an intervening [`Driver::end`].
    pub fn begin(&mut self, config: Config) -> Status {
        if self.initialized {
            return Status::from(StatusKind::AlreadyInitialized);
        }
        if let Err(e) = config.validate() {
            return e;
        }

        self.config = config;
        self.health = Health::new(config.offline_threshold);
        self.features = FeatureCache::default();

        if !self.hal.read_scl() || !self.hal.read_sda() {
            if let Err(e) = recovery::bus_reset(&mut self.hal, &self.config) {
                return e;
            }
        }

        if let Err(e) = read_group_raw(&mut self.hal, &self.config) {
            return e;
        }

        self.cache_features_best_effort();

        self.initialized = true;
        self.health.enter_ready();
        Status::ok()
    }

    /// Store the latest wall-clock tick for subsequent health updates. Does
    /// not touch the bus and performs no scheduling.
    pub fn tick(&mut self, now_ms: u32) {
        self.now_ms = now_ms;
    }

    /// Unconditionally return to `Uninit`. Lifetime counters are not
    /// cleared here, the next successful `begin` resets them (see
    /// DESIGN.md for why this is the chosen behaviour, not an oversight).
    pub fn end(&mut self) {
        self.initialized = false;
        self.health.state = HealthState::Uninit;
    }

    /// `true` for `Ready` and `Degraded`.
    pub fn is_online(&self) -> bool {
        self.health.is_online()
    }

    pub(crate) fn guard_initialized(&self) -> Result<(), Status> {
        if !self.initialized {
            return Err(Status::from(StatusKind::NotInitialized));
        }
        Ok(())
    }

    /// Run `f` through the health wrapper: success resets the
    /// consecutive-failure count and enters `Ready`; failure records the
    /// error and moves to `Degraded`/`Offline` per the configured
    /// threshold. Requires the driver to already be initialised.
    pub(crate) fn tracked<T>(&mut self, f: impl FnOnce(&mut H, &Config) -> Result<T, Status>) -> Result<T, Status> {
        self.guard_initialized()?;
        let now_ms = self.now_ms;
        let hal = &mut self.hal;
        let config = &self.config;
        self.health.wrap(now_ms, || f(hal, config))
    }

    /// Run `f` directly against the bus, bypassing the health wrapper
    /// entirely. Used by diagnostic/recovery paths (`probe`, `bus_reset`,
    /// `check_bus_idle`).
    pub(crate) fn raw<T>(&mut self, f: impl FnOnce(&mut H, &Config) -> Result<T, Status>) -> Result<T, Status> {
        self.guard_initialized()?;
        f(&mut self.hal, &self.config)
    }

    pub(crate) fn features(&self) -> &FeatureCache {
        &self.features
    }

    /// Set the custom pointer to 0x07 and read the three feature bytes.
    /// Failure is non-fatal: it leaves all feature bits clear, which simply
    /// causes feature-gated operations to report `NotSupported`.
    fn cache_features_best_effort(&mut self) {
        let mut bytes = [0u8; 3];
        let ok = memory::read_block(&mut self.hal, &self.config, memmap::ADDR_OPERATING_FUNCTIONS, &mut bytes).is_ok();
        if ok {
            self.features = FeatureCache {
                operating_functions: bytes[0],
                mode_support: bytes[1],
                special_features: bytes[2],
            };
        }
    }
}
