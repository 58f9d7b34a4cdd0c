//! HAL contract for the E2 bit-bang master.
//!
//! The bus is open-drain: driving "high" means releasing the line (letting
//! the pull-up raise it), driving "low" means actively pulling it down. The
//! core only ever drives through [`Hal::set_scl`] / [`Hal::set_sda`]; reads
//! go through [`Hal::read_scl`] / [`Hal::read_sda`].
//!
//! All five methods are infallible from the core's perspective: the HAL must
//! not surface an error channel. `&mut self` plays the role of the "opaque
//! user pointer" in a callback-based HAL, whatever state an implementation
//! needs (pin handles, a mock device, ...) lives behind it.

/// Line-level and timing primitives the E2 master is built on.
///
/// Implementations are expected to be cheap and non-blocking apart from
/// [`Hal::delay_us`], which the core relies on to enforce every timing floor
/// in the protocol (START/STOP hold, clock low/high width, stretch budget).
/// The core never requires `delay_us` to be tight on the upper bound, it
/// must sleep *at least* the requested duration, never less.
pub trait Hal {
    /// Drive SCL: `false` pulls the line low, `true` releases it.
    fn set_scl(&mut self, level: bool);

    /// Drive SDA: `false` pulls the line low, `true` releases it.
    fn set_sda(&mut self, level: bool);

    /// Sample the current SCL line level.
    fn read_scl(&mut self) -> bool;

    /// Sample the current SDA line level.
    fn read_sda(&mut self) -> bool;

    /// Block for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);
}
