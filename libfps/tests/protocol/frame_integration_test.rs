#[path = "../common/mod.rs"]
mod common;

use common::fixtures::OPEN_FRAME_HEX;
use libfps::error::FrameError;
use libfps::protocol::codec;
use libfps::protocol::{Command, DataPacket, ResponsePacket};
use libfps::utils::{bytes_to_hex_spaced, parse_hex};

#[test]
fn open_frame_matches_datasheet() {
    let frame = codec::encode_command(&Command::Open { info: false });
    assert_eq!(bytes_to_hex_spaced(&frame), OPEN_FRAME_HEX);
    assert_eq!(frame.to_vec(), parse_hex(OPEN_FRAME_HEX).unwrap());
}

#[test]
fn response_with_good_checksum_but_wrong_header() {
    let mut frame = ResponsePacket::ack(0).encode();
    frame[0] = 0x5A;
    frame[1] = 0xA5;
    // Fix up the checksum so only the header is wrong
    let sum = libfps::protocol::checksum(&frame[..10]);
    frame[10..].copy_from_slice(&sum.to_le_bytes());
    assert_eq!(
        codec::decode_response(&frame),
        Err(FrameError::HeaderMismatch)
    );
}

#[test]
fn short_response_is_a_length_error() {
    let frame = ResponsePacket::ack(0).encode();
    assert!(matches!(
        codec::decode_response(&frame[..11]),
        Err(FrameError::InvalidLength {
            expected: 12,
            actual: 11
        })
    ));
}

#[test]
fn data_frame_layout() {
    let payload = [0x10u8, 0x20, 0x30];
    let frame = codec::encode_data_frame(&payload);
    assert_eq!(frame.len(), DataPacket::frame_len(payload.len()));
    assert_eq!(&frame[..4], &[0x5A, 0xA5, 0x01, 0x00]);
    assert_eq!(&frame[4..7], &payload);
    // 0x5A + 0xA5 + 0x01 + 0x10 + 0x20 + 0x30
    assert_eq!(&frame[7..], &0x0160u16.to_le_bytes());
}

#[test]
fn data_frame_with_flipped_payload_byte_fails_checksum() {
    let payload = vec![0x42u8; 506];
    let mut frame = codec::encode_data_frame(&payload);
    frame[100] ^= 0x01;
    let len = frame.len();
    let trailer = u16::from_le_bytes([frame[len - 2], frame[len - 1]]);
    assert!(matches!(
        codec::verify_data_checksum(&frame[..4], &frame[4..len - 2], trailer),
        Err(FrameError::ChecksumMismatch { .. })
    ));
}
