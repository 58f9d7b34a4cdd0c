//! Health State Machine: the single site that updates driver state and
//! lifetime counters.

use crate::status::Status;

/// Driver lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HealthState {
    /// `begin` has not yet succeeded (or `end` has been called since).
    Uninit,
    /// Last tracked operation succeeded; consecutive-failure count is zero.
    Ready,
    /// At least one tracked operation has failed, but below the offline threshold.
    Degraded,
    /// Consecutive tracked failures reached the configured threshold.
    Offline,
}

/// Lifetime counters and current lifecycle state.
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub state: HealthState,
    pub last_success_ms: u32,
    pub last_error_ms: u32,
    pub last_error: Status,
    pub consecutive_failures: u32,
    pub total_success: u32,
    pub total_failure: u32,
    offline_threshold: u32,
}

impl Health {
    pub(crate) fn new(offline_threshold: u16) -> Self {
        Self {
            state: HealthState::Uninit,
            last_success_ms: 0,
            last_error_ms: 0,
            last_error: Status::ok(),
            consecutive_failures: 0,
            total_success: 0,
            total_failure: 0,
            offline_threshold: offline_threshold as u32,
        }
    }

    /// True for `Ready` and `Degraded`; false for `Uninit` and `Offline`.
    pub fn is_online(&self) -> bool {
        matches!(self.state, HealthState::Ready | HealthState::Degraded)
    }

    pub(crate) fn enter_ready(&mut self) {
        self.state = HealthState::Ready;
    }

    /// The only place driver state or lifetime counters change. Runs `f`,
    /// then applies the success or failure transition of spec.md §4.6.
    pub(crate) fn wrap<T>(&mut self, now_ms: u32, f: impl FnOnce() -> Result<T, Status>) -> Result<T, Status> {
        let previous = self.state;
        match f() {
            Ok(value) => {
                self.last_success_ms = now_ms;
                self.consecutive_failures = 0;
                self.total_success = self.total_success.saturating_add(1);
                self.state = HealthState::Ready;
                #[cfg(feature = "defmt")]
                if previous != self.state {
                    defmt::debug!("health: {} -> {}", previous, self.state);
                }
                Ok(value)
            }
            Err(status) => {
                self.last_error_ms = now_ms;
                self.last_error = status;
                self.total_failure = self.total_failure.saturating_add(1);
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                self.state = if self.consecutive_failures >= self.offline_threshold {
                    HealthState::Offline
                } else {
                    HealthState::Degraded
                };
                #[cfg(feature = "defmt")]
                {
                    if previous != self.state {
                        defmt::debug!("health: {} -> {}", previous, self.state);
                    }
                    if self.state == HealthState::Offline {
                        defmt::warn!("health: offline after {} consecutive failures", self.consecutive_failures);
                    }
                }
                Err(status)
            }
        }
    }
}
