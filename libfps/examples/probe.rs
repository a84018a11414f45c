//! Find a sensor, negotiate its line rate and print what it reports.
//!
//! Usage:
//!   cargo run -p libfps --example probe --features serial -- /dev/ttyUSB0
//!
//! With no argument the available serial ports are listed.

use anyhow::Context;
use libfps::constants::DEFAULT_BAUD_RATE;
use libfps::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Some(port) = std::env::args().nth(1) else {
        println!("Available serial ports:");
        for name in SerialTransport::available_ports()? {
            println!("  {}", name);
        }
        return Ok(());
    };

    let device = DeviceBuilder::new()
        .with_serial_port(&port, DEFAULT_BAUD_RATE)
        .with_context(|| format!("opening {}", port))?
        .build()?;

    // Find the rate first, then reopen with the info block
    let opened = device.negotiate().map_err(Error::from)?;
    println!("Sensor answered at {} baud", opened.baud());
    let closed = opened.close().map_err(Error::from)?;

    let (mut dev, info) = closed.open_with_info().map_err(Error::from)?;
    println!("Firmware:       {:#010x}", info.firmware_version);
    println!("ISO area max:   {} bytes", info.iso_area_max_size);
    println!("Serial number:  {}", info.serial_hex());
    println!("Enrolled:       {}", dev.enroll_count()?);

    // Finger detection needs the backlight on
    dev.set_led(true)?;
    let finger = if dev.is_finger_pressed()? { "yes" } else { "no" };
    dev.set_led(false)?;
    println!("Finger on window: {}", finger);

    dev.close().map_err(Error::from)?;
    Ok(())
}
