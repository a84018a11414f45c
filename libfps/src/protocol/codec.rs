// libfps/src/protocol/codec.rs

//! Byte-level encode/decode entry points used by the transaction engine.

use crate::constants::{DATA_HEADER_LEN, PACKET_LEN};
use crate::error::FrameError;

use super::commands::Command;
use super::frame::{DataPacket, ResponsePacket};

/// Encode a Command into its 12-byte wire frame.
pub fn encode_command(cmd: &Command) -> [u8; PACKET_LEN] {
    cmd.packet().encode()
}

/// Encode a response frame. The host never sends these; simulated sensors
/// and tests do.
pub fn encode_response(resp: &ResponsePacket) -> [u8; PACKET_LEN] {
    resp.encode()
}

/// Decode and verify a 12-byte response frame.
pub fn decode_response(frame: &[u8]) -> Result<ResponsePacket, FrameError> {
    ResponsePacket::decode(frame)
}

/// Start bytes and device id of a data frame. The payload and trailing
/// checksum follow once known.
pub fn encode_data_header() -> [u8; DATA_HEADER_LEN] {
    DataPacket::header()
}

/// Encode a complete data frame (header + payload + checksum).
pub fn encode_data_frame(payload: &[u8]) -> Vec<u8> {
    DataPacket::new(payload).encode()
}

/// Validate the header of an incoming data frame.
pub fn decode_data_header(header: &[u8]) -> Result<(), FrameError> {
    DataPacket::check_header(header)
}

/// Verify a data frame's trailing checksum once the payload is in.
pub fn verify_data_checksum(header: &[u8], payload: &[u8], trailer: u16) -> Result<(), FrameError> {
    DataPacket::verify(header, payload, trailer)
}
