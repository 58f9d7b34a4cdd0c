//! Bus Recovery: the nine-clock rescue sequence and STOP reassertion used
//! during `begin` (when needed) and the explicit `recover` operation.

use crate::bitline::{self, DATA_SETUP_US};
use crate::config::Config;
use crate::hal::Hal;
use crate::status::{Status, StatusKind};

/// Release SDA, pulse SCL low/high nine times (bounded by the per-bit
/// stretch budget each time), issue a clean STOP, then confirm both lines
/// came back up. Fails `BusStuck` if either line is still low afterwards.
pub(crate) fn bus_reset(hal: &mut impl Hal, cfg: &Config) -> Result<(), Status> {
    hal.set_sda(true);

    for _ in 0..9 {
        hal.set_scl(false);
        hal.delay_us(cfg.clock_low_us);
        hal.set_scl(true);
        let mut elapsed_us = 0u32;
        bitline::wait_for_scl_high(hal, cfg, &mut elapsed_us)?;
        hal.delay_us(cfg.clock_high_us);
    }

    hal.set_scl(false);
    hal.delay_us(cfg.clock_low_us);
    hal.set_sda(false);
    hal.delay_us(DATA_SETUP_US);
    hal.set_scl(true);
    let mut elapsed_us = 0u32;
    bitline::wait_for_scl_high(hal, cfg, &mut elapsed_us)?;
    hal.delay_us(cfg.start_stop_hold_us);
    hal.set_sda(true);
    hal.delay_us(cfg.start_stop_hold_us);

    let scl_ok = hal.read_scl();
    let sda_ok = hal.read_sda();
    if !scl_ok || !sda_ok {
        let detail = if !scl_ok { 0 } else { 1 };
        return Err(Status::new(StatusKind::BusStuck, detail, "line still low after rescue"));
    }
    Ok(())
}

/// Sample both lines; `Ok(())` iff both read high.
pub(crate) fn check_bus_idle(hal: &mut impl Hal, _cfg: &Config) -> Result<(), Status> {
    let scl_ok = hal.read_scl();
    let sda_ok = hal.read_sda();
    if !scl_ok || !sda_ok {
        let detail = if !scl_ok { 0 } else { 1 };
        return Err(Status::new(StatusKind::BusStuck, detail, "line not idle"));
    }
    Ok(())
}
