// libfps/src/protocol/frame.rs

//! Command, response and data frame layouts.

use crate::constants::{
    CHECKSUM_LEN, COMMAND_START, DATA_HEADER_LEN, DATA_START, DEVICE_ID, PACKET_LEN,
};
use crate::error::FrameError;
use crate::protocol::checksum::{checksum, update};
use crate::protocol::responses::ResponseCode;

/// Command packet, host -> sensor.
/// Format: [Start(2)=55 AA] [DeviceId(2)] [Param(4)] [Command(2)] [Checksum(2)]
/// All fields little-endian; checksum covers the first 10 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandPacket {
    /// Input parameter
    pub param: u32,
    /// Command opcode
    pub code: u16,
}

impl CommandPacket {
    /// Packet for opcode `code` with parameter `param`
    pub fn new(code: u16, param: u32) -> Self {
        Self { param, code }
    }

    /// Serialize to the 12-byte wire form
    pub fn encode(&self) -> [u8; PACKET_LEN] {
        encode_packet(self.param, self.code)
    }
}

/// Response packet, sensor -> host. Same shape as a command packet with the
/// command field replaced by ACK (0x30) or NACK (0x31). On NACK the
/// parameter carries an error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponsePacket {
    /// Output parameter or error code
    pub param: u32,
    /// ACK or NACK
    pub code: ResponseCode,
}

impl ResponsePacket {
    /// ACK carrying `param`
    pub fn ack(param: u32) -> Self {
        Self {
            param,
            code: ResponseCode::Ack,
        }
    }

    /// NACK carrying `param`
    pub fn nack(param: u32) -> Self {
        Self {
            param,
            code: ResponseCode::Nack,
        }
    }

    /// Whether the command was accepted
    pub fn is_ack(&self) -> bool {
        self.code == ResponseCode::Ack
    }

    /// Serialize to the 12-byte wire form
    pub fn encode(&self) -> [u8; PACKET_LEN] {
        encode_packet(self.param, self.code.as_u16())
    }

    /// Decode a 12-byte response frame.
    ///
    /// The checksum is verified before the header so that any corruption
    /// of a checksummed byte reports as a checksum failure; a frame that is
    /// internally consistent but addressed wrongly reports as a header
    /// mismatch.
    pub fn decode(frame: &[u8]) -> Result<Self, FrameError> {
        if frame.len() != PACKET_LEN {
            return Err(FrameError::InvalidLength {
                expected: PACKET_LEN,
                actual: frame.len(),
            });
        }

        let body = PACKET_LEN - CHECKSUM_LEN;
        let expected = checksum(&frame[..body]);
        let actual = u16::from_le_bytes([frame[body], frame[body + 1]]);
        if expected != actual {
            return Err(FrameError::ChecksumMismatch { expected, actual });
        }

        check_header(&frame[..DATA_HEADER_LEN], COMMAND_START)?;

        let param = u32::from_le_bytes([frame[4], frame[5], frame[6], frame[7]]);
        let code = ResponseCode::try_from(u16::from_le_bytes([frame[8], frame[9]]))?;
        Ok(Self { param, code })
    }
}

/// Data packet, either direction.
/// Format: [Start(2)=5A A5] [DeviceId(2)] [Payload(n)] [Checksum(2)]
/// The payload length is never on the wire; both sides know it from the
/// command that authorised the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataPacket<'a> {
    /// Bytes between header and checksum
    pub payload: &'a [u8],
}

impl<'a> DataPacket<'a> {
    /// Frame around `payload`
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    /// Start bytes and device id
    pub fn header() -> [u8; DATA_HEADER_LEN] {
        let id = DEVICE_ID.to_le_bytes();
        [DATA_START[0], DATA_START[1], id[0], id[1]]
    }

    /// Total frame length for a payload of `payload_len` bytes
    pub fn frame_len(payload_len: usize) -> usize {
        DATA_HEADER_LEN + payload_len + CHECKSUM_LEN
    }

    /// Serialize header, payload and checksum
    pub fn encode(&self) -> Vec<u8> {
        let header = Self::header();
        let mut out = Vec::with_capacity(Self::frame_len(self.payload.len()));
        out.extend_from_slice(&header);
        out.extend_from_slice(self.payload);
        let sum = update(checksum(&header), self.payload);
        out.extend_from_slice(&sum.to_le_bytes());
        out
    }

    /// Validate the 4-byte header of an incoming data frame.
    pub fn check_header(header: &[u8]) -> Result<(), FrameError> {
        if header.len() != DATA_HEADER_LEN {
            return Err(FrameError::InvalidLength {
                expected: DATA_HEADER_LEN,
                actual: header.len(),
            });
        }
        check_header(header, DATA_START)
    }

    /// Verify the trailing checksum against header + payload.
    pub fn verify(header: &[u8], payload: &[u8], trailer: u16) -> Result<(), FrameError> {
        let expected = update(checksum(header), payload);
        if expected != trailer {
            return Err(FrameError::ChecksumMismatch {
                expected,
                actual: trailer,
            });
        }
        Ok(())
    }

    /// Decode a complete data frame held in memory.
    pub fn decode(frame: &'a [u8], payload_len: usize) -> Result<Self, FrameError> {
        let total = Self::frame_len(payload_len);
        if frame.len() != total {
            return Err(FrameError::InvalidLength {
                expected: total,
                actual: frame.len(),
            });
        }
        let (header, rest) = frame.split_at(DATA_HEADER_LEN);
        Self::check_header(header)?;
        let (payload, trailer) = rest.split_at(payload_len);
        Self::verify(header, payload, u16::from_le_bytes([trailer[0], trailer[1]]))?;
        Ok(Self { payload })
    }
}

fn encode_packet(param: u32, word: u16) -> [u8; PACKET_LEN] {
    let mut out = [0u8; PACKET_LEN];
    out[0..2].copy_from_slice(&COMMAND_START);
    out[2..4].copy_from_slice(&DEVICE_ID.to_le_bytes());
    out[4..8].copy_from_slice(&param.to_le_bytes());
    out[8..10].copy_from_slice(&word.to_le_bytes());
    let sum = checksum(&out[..PACKET_LEN - CHECKSUM_LEN]);
    out[10..12].copy_from_slice(&sum.to_le_bytes());
    out
}

fn check_header(header: &[u8], start: [u8; 2]) -> Result<(), FrameError> {
    let id = u16::from_le_bytes([header[2], header[3]]);
    if header[0] != start[0] || header[1] != start[1] || id != DEVICE_ID {
        return Err(FrameError::HeaderMismatch);
    }
    Ok(())
}
