//! Wait for a finger and search the sensor database for it.
//!
//! Usage:
//!   cargo run -p libfps --example identify --features serial -- /dev/ttyUSB0

use std::time::Duration;

use libfps::constants::DEFAULT_BAUD_RATE;
use libfps::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let port = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/ttyUSB0".to_string());

    let device = DeviceBuilder::new().with_serial_port(&port, DEFAULT_BAUD_RATE)?.build()?;
    let mut dev = device.negotiate()?;

    let count = dev.enroll_count()?;
    if count == 0 {
        println!("No fingers enrolled");
        return Ok(());
    }
    println!("{} fingers enrolled; place a finger", count);

    dev.set_led(true)?;
    dev.wait_until_finger_pressed(Duration::from_secs(15))?;
    dev.capture_finger(CaptureQuality::Fast)?;
    let result = dev.identify();
    dev.set_led(false)?;

    match result {
        Ok(id) => println!("Matched finger {}", id),
        Err(Error::Nack(ErrorCode::IdentifyFailed)) => println!("No match"),
        Err(e) => return Err(e),
    }
    dev.close()?;
    Ok(())
}
