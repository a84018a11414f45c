#[path = "../common/mod.rs"]
mod common;

use std::sync::{Arc, Mutex};

use common::fixtures::{ack_with_data, device_info_bytes};
use libfps::device::{Closed, Device, DeviceBuilder, Engine, Opened};
use libfps::error::ErrorCode;
use libfps::transport::mock::MockTransport;
use libfps::utils::MockClock;
use libfps::Error;

#[test]
fn open_close_round_trip() {
    let mut m = MockTransport::new();
    m.push_reply(common::ack(0));
    m.push_reply(common::ack(0));
    let (device, shared, _) = common::closed_mock_device(m);

    let opened = device.open().unwrap();
    let closed = opened.close().unwrap();
    assert_eq!(closed.baud(), 9600);
    assert_eq!(shared.lock().sent_opcodes(), vec![0x01, 0x02]);
}

#[test]
fn open_with_info_reads_device_block() {
    let mut m = MockTransport::new();
    m.push_reply(ack_with_data(&device_info_bytes()));
    let (device, shared, _) = common::closed_mock_device(m);

    let (_opened, info) = device.open_with_info().unwrap();
    assert_eq!(info.firmware_version, 0x2013_0213);
    assert_eq!(info.iso_area_max_size, 400);
    assert_eq!(info.serial_number[0], 0xA0);
    assert_eq!(info.serial_hex().len(), 32);

    let sent = &shared.lock().sent[0];
    assert_eq!(u32::from_le_bytes([sent[4], sent[5], sent[6], sent[7]]), 1);
}

#[test]
fn silent_sensor_leaves_device_closed() {
    let device = DeviceBuilder::new()
        .with_transport(Box::new(MockTransport::new()))
        .with_clock(Box::new(MockClock::new()))
        .build()
        .unwrap();

    let err = device.open().unwrap_err();
    assert!(matches!(err.error, Error::Timeout));
    assert_eq!(err.error.code(), ErrorCode::Timeout);

    // The returned handle can be retried
    let retry = err.device.open().unwrap_err();
    assert!(matches!(retry.error, Error::Timeout));
}

#[test]
fn transition_error_converts_into_crate_error() {
    fn open_and_count(m: MockTransport) -> libfps::Result<u32> {
        let (device, _, _) = common::closed_mock_device(m);
        let mut opened = device.open()?;
        opened.enroll_count()
    }

    let mut m = MockTransport::new();
    m.push_reply(common::nack(ErrorCode::DeviceError));
    assert!(matches!(
        open_and_count(m),
        Err(Error::Nack(ErrorCode::DeviceError))
    ));

    let mut m = MockTransport::new();
    m.push_reply(common::ack(0));
    m.push_reply(common::ack(12));
    assert_eq!(open_and_count(m).unwrap(), 12);
}

#[test]
fn device_handles_are_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Device<Closed>>();
    assert_send::<Device<Opened>>();
    assert_send::<Engine>();
}

#[test]
fn opened_device_can_be_driven_from_a_worker_thread() {
    let (dev, shared, _) = common::opened_mock_device(vec![common::ack(3)]);
    let dev = Arc::new(Mutex::new(dev));

    let worker = Arc::clone(&dev);
    let count = std::thread::spawn(move || worker.lock().unwrap().enroll_count())
        .join()
        .unwrap()
        .unwrap();
    assert_eq!(count, 3);
    assert_eq!(shared.lock().sent_opcodes(), vec![0x01, 0x20]);
}
