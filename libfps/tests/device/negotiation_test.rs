#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use libfps::device::{Device, DeviceBuilder};
use libfps::error::ErrorCode;
use libfps::test_support::{SharedMock, SharedTransport};
use libfps::transport::mock::MockTransport;
use libfps::utils::MockClock;
use libfps::Error;

#[test]
fn answers_at_factory_rate_first_try() {
    let mut m = MockTransport::new();
    m.push_reply(common::ack(0));
    let (device, shared, clock) = common::closed_mock_device(m);

    let opened = device.negotiate().unwrap();
    assert_eq!(opened.baud(), 9600);
    assert_eq!(shared.lock().baud_history, vec![9600]);
    // No settle before the first candidate
    assert_eq!(clock.total_elapsed(), Duration::ZERO);
}

#[test]
fn finds_sensor_left_at_57600() {
    let mut m = MockTransport::new();
    m.set_responsive_baud(57600);
    m.mismatch_noise = vec![0xFE, 0x00, 0xF8];
    m.push_reply(common::ack(0));
    m.push_reply(common::ack(2));
    let (device, shared, _) = common::closed_mock_device(m);

    let mut opened = device.negotiate().unwrap();
    assert_eq!(opened.baud(), 57600);
    assert_eq!(shared.lock().baud_history, vec![9600, 115200, 57600]);
    assert_eq!(shared.lock().pending_rx(), 0);

    // The session is usable at the negotiated rate
    assert_eq!(opened.enroll_count().unwrap(), 2);
}

#[test]
fn exhaustion_tries_each_candidate_once() {
    let (device, shared, _) = common::closed_mock_device(MockTransport::new());
    let err = device.negotiate().unwrap_err();

    assert!(matches!(err.error, Error::BaudNegotiation { attempts: 5 }));
    assert_eq!(err.error.code(), ErrorCode::InvalidBaud);
    let m = shared.lock();
    assert_eq!(m.baud_history, vec![9600, 115200, 57600, 38400, 19200]);
    assert_eq!(m.sent_opcodes(), vec![0x01; 5]);
}

#[test]
fn custom_candidate_order() {
    let mut m = MockTransport::new();
    m.set_responsive_baud(19200);
    m.push_reply(common::ack(0));
    let shared = SharedMock::new(m);

    let device = DeviceBuilder::new()
        .with_transport(Box::new(SharedTransport::new(shared.clone())))
        .with_clock(Box::new(MockClock::new()))
        .with_baud_candidates(&[19200, 9600])
        .build()
        .unwrap();
    let opened = device.negotiate().unwrap();
    assert_eq!(opened.baud(), 19200);
    assert_eq!(shared.lock().baud_history, vec![19200]);
}

#[test]
fn empty_candidate_list_fails_without_traffic() {
    let shared = SharedMock::new(MockTransport::new());
    let device: Device = DeviceBuilder::new()
        .with_transport(Box::new(SharedTransport::new(shared.clone())))
        .with_clock(Box::new(MockClock::new()))
        .with_baud_candidates(&[])
        .build()
        .unwrap();
    let err = device.negotiate().unwrap_err();
    assert!(matches!(err.error, Error::BaudNegotiation { attempts: 0 }));
    assert!(shared.lock().sent.is_empty());
}
