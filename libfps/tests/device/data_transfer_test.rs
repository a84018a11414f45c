#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{ack_with_data, sample_template, template_bytes};
use libfps::constants::{IMAGE_SIZE, RAW_IMAGE_SIZE};
use libfps::error::{ErrorCode, FrameError};
use libfps::{Error, FingerId};

#[test]
fn get_template_returns_payload() {
    let (mut dev, _, _) = common::opened_mock_device(vec![ack_with_data(&template_bytes())]);
    let template = dev.get_template(FingerId::new(0)).unwrap();
    assert_eq!(template, sample_template());
}

#[test]
fn corrupted_template_is_comm_error_and_stream_recovers() {
    let mut reply = ack_with_data(&template_bytes());
    let len = reply.len();
    reply[len - 1] ^= 0xFF;
    // Trailing garbage that must be drained
    reply.extend_from_slice(&[0xDE, 0xAD]);
    let (mut dev, mock, _) = common::opened_mock_device(vec![reply, common::ack(4)]);

    let err = dev.get_template(FingerId::new(1)).unwrap_err();
    assert!(matches!(
        err,
        Error::Frame(FrameError::ChecksumMismatch { .. })
    ));
    assert_eq!(err.code(), ErrorCode::CommErr);
    assert_eq!(mock.lock().pending_rx(), 0);

    assert_eq!(dev.enroll_count().unwrap(), 4);
}

#[test]
fn nacked_template_request_skips_data_phase() {
    let (mut dev, _, _) =
        common::opened_mock_device(vec![common::nack(ErrorCode::IdNotUsed), common::ack(0)]);
    assert!(matches!(
        dev.get_template(FingerId::new(2)),
        Err(Error::Nack(ErrorCode::IdNotUsed))
    ));
    assert_eq!(dev.enroll_count().unwrap(), 0);
}

#[test]
fn make_template_does_not_store() {
    let (mut dev, mock, _) = common::opened_mock_device(vec![ack_with_data(&template_bytes())]);
    let template = dev.make_template().unwrap();
    assert_eq!(template.as_bytes(), &template_bytes());
    assert_eq!(mock.lock().sent_opcodes(), vec![0x01, 0x61]);
}

#[test]
fn set_template_sends_data_after_ack() {
    let (mut dev, mock, _) = common::opened_mock_device(vec![common::ack(0), common::ack(0)]);
    dev.set_template(FingerId::new(11), &sample_template())
        .unwrap();

    let m = mock.lock();
    // Open, SetTemplate, data frame
    assert_eq!(m.sent.len(), 3);
    assert_eq!(m.sent[2], common::data_frame(&template_bytes()));
}

#[test]
fn set_template_reports_duplicate() {
    let (mut dev, _, _) = common::opened_mock_device(vec![common::ack(0), common::nack_raw(42)]);
    let err = dev
        .set_template(FingerId::new(11), &sample_template())
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateId(id) if id == FingerId::new(42)));
}

#[test]
fn rejected_set_template_sends_no_data() {
    let (mut dev, mock, _) =
        common::opened_mock_device(vec![common::nack(ErrorCode::InvalidPos)]);
    assert!(dev
        .set_template(FingerId::new(11), &sample_template())
        .is_err());
    assert_eq!(mock.lock().sent.len(), 2);
}

#[test]
fn identify_template_returns_match() {
    let (mut dev, _, _) = common::opened_mock_device(vec![common::ack(0), common::ack(19)]);
    assert_eq!(
        dev.identify_template(&sample_template()).unwrap(),
        FingerId::new(19)
    );
}

#[test]
fn verify_template_mismatch() {
    let (mut dev, _, _) = common::opened_mock_device(vec![
        common::ack(0),
        common::nack(ErrorCode::VerifyFailed),
    ]);
    assert!(matches!(
        dev.verify_template(FingerId::new(3), &sample_template()),
        Err(Error::Nack(ErrorCode::VerifyFailed))
    ));
}

#[test]
fn images_have_sensor_dimensions() {
    let full: Vec<u8> = (0..IMAGE_SIZE).map(|i| (i % 256) as u8).collect();
    let raw = vec![0x80u8; RAW_IMAGE_SIZE];
    let (mut dev, _, _) =
        common::opened_mock_device(vec![ack_with_data(&full), ack_with_data(&raw)]);

    let image = dev.get_image().unwrap();
    assert_eq!((image.width(), image.height()), (240, 216));
    assert_eq!(image.pixel(1, 0), Some(1));
    assert_eq!(image.pixel(240, 0), None);

    let preview = dev.get_raw_image().unwrap();
    assert_eq!((preview.width(), preview.height()), (160, 120));
    assert_eq!(preview.pixel(159, 119), Some(0x80));
}

#[test]
fn truncated_image_times_out_within_data_window() {
    let full = vec![0u8; IMAGE_SIZE];
    let mut reply = ack_with_data(&full);
    reply.truncate(reply.len() - 100);
    let (mut dev, _, clock) = common::opened_mock_device(vec![reply]);

    assert!(matches!(dev.get_image(), Err(Error::Timeout)));
    // interbyte stall plus flush settle, well inside the transfer window
    assert_eq!(clock.total_elapsed(), std::time::Duration::from_millis(200));
}
