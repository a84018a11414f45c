//! Interactive three-pass enrollment.
//!
//! Usage:
//!   cargo run -p libfps --example enroll --features serial -- /dev/ttyUSB0 5

use std::time::Duration;

use libfps::constants::DEFAULT_BAUD_RATE;
use libfps::prelude::*;

const FINGER_TIMEOUT: Duration = Duration::from_secs(15);

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let port = args.next().unwrap_or_else(|| "/dev/ttyUSB0".to_string());
    let id: u16 = match args.next().map(|s| s.parse()) {
        Some(Ok(id)) => id,
        Some(Err(_)) => return Err(Error::InvalidParameter("id must be a number".into())),
        None => 0,
    };
    let id = FingerId::new(id);

    let device = DeviceBuilder::new().with_serial_port(&port, DEFAULT_BAUD_RATE)?.build()?;
    let mut dev = device.negotiate()?;
    dev.set_led(true)?;

    if dev.check_enrolled(id)? {
        println!("Slot {} is taken; deleting it first", id);
        dev.delete_id(id)?;
    }

    let mut enrollment = dev.begin_enrollment(id)?;
    while let Some(step) = enrollment.next_step() {
        println!("Pass {}/3: place your finger", step.number());
        match enrollment.run_step(FINGER_TIMEOUT) {
            Ok(EnrollProgress::Continue(_)) => println!("  ok, lift and place again"),
            Ok(EnrollProgress::Complete) => println!("  ok"),
            Err(Error::Nack(ErrorCode::BadFinger)) => println!("  bad capture, try again"),
            Err(e) => return Err(e),
        }
    }

    println!("Enrolled finger as {}", id);
    dev.set_led(false)?;
    dev.close()?;
    Ok(())
}
