#![cfg(feature = "serial")]

#[path = "common.rs"]
mod common;

use libfps::Result;
use serial_test::serial;

// These tests talk to a real sensor and are marked `#[ignore]` so CI does
// not attempt to run them. Run manually with:
//
// LIBFPS_PORT=/dev/ttyUSB0 cargo test -p libfps --test hardware --features serial -- --ignored

#[test]
#[ignore]
#[serial]
fn negotiate_and_count() -> Result<()> {
    let Some(mut device) = common::open_sensor()? else {
        return Ok(());
    };
    let count = device.enroll_count()?;
    assert!(count <= device.config().capacity as u32);
    device.close()?;
    Ok(())
}

#[test]
#[ignore]
#[serial]
fn led_toggle_and_finger_probe() -> Result<()> {
    let Some(mut device) = common::open_sensor()? else {
        return Ok(());
    };
    device.set_led(true)?;
    // Pressed or not, the query itself must succeed while lit
    let _ = device.is_finger_pressed()?;
    device.set_led(false)?;
    device.close()?;
    Ok(())
}
