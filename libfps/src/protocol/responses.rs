// libfps/src/protocol/responses.rs

//! Response codes carried in the code field of a response frame.

use crate::constants::{RESPONSE_ACK, RESPONSE_NACK};
use crate::error::FrameError;

/// Response field of a response packet. Only ACK and NACK are defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    /// 0x30, parameter is the result
    Ack,
    /// 0x31, parameter is the error code
    Nack,
}

impl ResponseCode {
    /// Wire value
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Ack => RESPONSE_ACK,
            Self::Nack => RESPONSE_NACK,
        }
    }
}

impl TryFrom<u16> for ResponseCode {
    type Error = FrameError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            RESPONSE_ACK => Ok(Self::Ack),
            RESPONSE_NACK => Ok(Self::Nack),
            other => Err(FrameError::UnknownResponseCode(other)),
        }
    }
}
