#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use libfps::device::DeviceConfig;
use libfps::error::ErrorCode;
use libfps::protocol::Command;
use libfps::test_support::opened_mock_device_with;
use libfps::types::CaptureQuality;
use libfps::{Error, FingerId};

#[test]
fn enroll_count_returns_ack_param() {
    let (mut dev, _, _) = common::opened_mock_device(vec![common::ack(3)]);
    assert_eq!(dev.enroll_count().unwrap(), 3);
}

#[test]
fn verify_mismatch_is_verify_failed() {
    let (mut dev, _, _) = common::opened_mock_device(vec![common::nack_raw(0x1007)]);
    let err = dev.verify(FingerId::new(5)).unwrap_err();
    assert!(matches!(err, Error::Nack(ErrorCode::VerifyFailed)));
    assert!(err.is_nack());
    assert!(!err.is_transport());
}

#[test]
fn identify_miss_is_identify_failed() {
    let (mut dev, _, _) = common::opened_mock_device(vec![common::nack(ErrorCode::IdentifyFailed)]);
    assert!(matches!(
        dev.identify(),
        Err(Error::Nack(ErrorCode::IdentifyFailed))
    ));
}

#[test]
fn unknown_nack_is_preserved() {
    let (mut dev, _, _) = common::opened_mock_device(vec![common::nack_raw(0x2222)]);
    assert!(matches!(dev.delete_all(), Err(Error::UnknownNack(0x2222))));
}

#[test]
fn simple_commands_send_expected_frames() {
    let replies = (0..6).map(|_| common::ack(0)).collect();
    let (mut dev, mock, _) = common::opened_mock_device(replies);

    dev.set_led(true).unwrap();
    dev.capture_finger(CaptureQuality::Fast).unwrap();
    dev.delete_id(FingerId::new(8)).unwrap();
    dev.delete_all().unwrap();
    dev.enroll_start(FingerId::new(9)).unwrap();
    assert_eq!(dev.execute(Command::CmosLed { on: false }).unwrap(), 0);

    assert_eq!(
        mock.lock().sent_opcodes(),
        vec![0x01, 0x12, 0x60, 0x40, 0x41, 0x22, 0x12]
    );
}

#[test]
fn finger_press_polarity() {
    let (mut dev, _, _) =
        common::opened_mock_device(vec![common::ack(0), common::ack(0x1012)]);
    assert!(dev.is_finger_pressed().unwrap());
    assert!(!dev.is_finger_pressed().unwrap());
}

#[test]
fn wait_for_press_polls_until_deadline() {
    let replies = (0..10).map(|_| common::ack(0x1012)).collect();
    let (mut dev, mock, clock) = common::opened_mock_device(replies);

    let err = dev
        .wait_until_finger_pressed(Duration::from_millis(200))
        .unwrap_err();
    assert!(matches!(err, Error::Timeout));

    // Polls at 0, 50, 100, 150 and 200 ms
    let polls = mock
        .lock()
        .sent_opcodes()
        .iter()
        .filter(|&&op| op == 0x26)
        .count();
    assert_eq!(polls, 5);
    assert_eq!(clock.total_elapsed(), Duration::from_millis(200));
}

#[test]
fn wait_for_release_returns_once_lifted() {
    let (mut dev, _, clock) = common::opened_mock_device(vec![
        common::ack(0),
        common::ack(0),
        common::ack(0x1012),
    ]);
    dev.wait_until_finger_released(Duration::from_secs(1))
        .unwrap();
    assert_eq!(clock.total_elapsed(), Duration::from_millis(100));
}

#[test]
fn capacity_is_configurable() {
    let config = DeviceConfig {
        capacity: 20,
        ..DeviceConfig::default()
    };
    let (mut dev, mock, _) = opened_mock_device_with(config, vec![]);
    assert!(matches!(
        dev.check_enrolled(FingerId::new(20)),
        Err(Error::IdOutOfRange {
            id: 20,
            capacity: 20
        })
    ));
    assert_eq!(mock.lock().sent.len(), 1);
}

#[test]
fn baud_change_then_traffic_at_new_rate() {
    let (mut dev, mock, _) = common::opened_mock_device(vec![common::ack(0), common::ack(1)]);
    dev.change_baud(57600).unwrap();
    assert_eq!(dev.baud(), 57600);
    assert_eq!(dev.enroll_count().unwrap(), 1);
    assert_eq!(mock.lock().baud, 57600);
}

#[test]
fn refused_baud_change_keeps_host_rate() {
    let (mut dev, mock, _) =
        common::opened_mock_device(vec![common::nack(ErrorCode::InvalidBaud)]);
    assert!(matches!(
        dev.change_baud(38400),
        Err(Error::Nack(ErrorCode::InvalidBaud))
    ));
    assert_eq!(dev.baud(), 9600);
    assert!(mock.lock().baud_history.is_empty());
}
