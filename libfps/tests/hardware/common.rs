#![cfg(feature = "serial")]

//! Shared helpers for tests against a real sensor.
//!
//! Set `LIBFPS_PORT` (e.g. `/dev/ttyUSB0`) to the port the sensor is wired
//! to. Without it the helpers return `Ok(None)` so the tests pass on
//! machines with no sensor attached.

use libfps::device::{Device, DeviceBuilder, Opened};
use libfps::Result;
use libfps::constants::DEFAULT_BAUD_RATE;

pub fn port_from_env() -> Option<String> {
    std::env::var("LIBFPS_PORT").ok().filter(|p| !p.is_empty())
}

/// Open the sensor on `LIBFPS_PORT`, negotiating the rate.
///
/// - Ok(Some(device)) : sensor found and session opened
/// - Ok(None) : no port configured
/// - Err(e) : anything else
pub fn open_sensor() -> Result<Option<Device<Opened>>> {
    let _ = env_logger::builder().is_test(true).try_init();
    let Some(port) = port_from_env() else {
        return Ok(None);
    };
    let device = DeviceBuilder::new().with_serial_port(&port, DEFAULT_BAUD_RATE)?.build()?;
    Ok(Some(device.negotiate()?))
}
