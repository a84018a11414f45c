// libfps/src/error.rs

//! Error types: the sensor NACK table, frame errors and the crate `Error`.

use thiserror::Error;

use crate::types::FingerId;

/// NACK error codes reported by the sensor in the response parameter.
///
/// This is the single taxonomy every operation reports through: local
/// failures fold into [`ErrorCode::Timeout`] and [`ErrorCode::CommErr`] via
/// [`Error::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum ErrorCode {
    /// Timeout
    Timeout = 0x1001,
    /// Invalid baud rate
    InvalidBaud = 0x1002,
    /// Invalid template position
    InvalidPos = 0x1003,
    /// Template id is not used
    IdNotUsed = 0x1004,
    /// Template id is already used
    IdAlreadyUsed = 0x1005,
    /// Communication error
    CommErr = 0x1006,
    /// Verification failed
    VerifyFailed = 0x1007,
    /// Identification failed
    IdentifyFailed = 0x1008,
    /// Database is full
    DatabaseFull = 0x1009,
    /// Database is empty
    DatabaseEmpty = 0x100A,
    /// Enrollment step out of order
    TurnError = 0x100B,
    /// Bad finger image
    BadFinger = 0x100C,
    /// Enrollment failed
    EnrollFailed = 0x100D,
    /// Command not supported
    NotSupported = 0x100E,
    /// Device error
    DeviceError = 0x100F,
    /// Capture canceled
    CaptureCanceled = 0x1010,
    /// Invalid parameter
    InvalidParam = 0x1011,
    /// Finger is not pressed
    FingerNotPressed = 0x1012,
}

impl ErrorCode {
    /// Map a NACK parameter to its error code. Returns None for values
    /// outside the documented table.
    pub fn from_code(code: u32) -> Option<Self> {
        let code = match code {
            0x1001 => Self::Timeout,
            0x1002 => Self::InvalidBaud,
            0x1003 => Self::InvalidPos,
            0x1004 => Self::IdNotUsed,
            0x1005 => Self::IdAlreadyUsed,
            0x1006 => Self::CommErr,
            0x1007 => Self::VerifyFailed,
            0x1008 => Self::IdentifyFailed,
            0x1009 => Self::DatabaseFull,
            0x100A => Self::DatabaseEmpty,
            0x100B => Self::TurnError,
            0x100C => Self::BadFinger,
            0x100D => Self::EnrollFailed,
            0x100E => Self::NotSupported,
            0x100F => Self::DeviceError,
            0x1010 => Self::CaptureCanceled,
            0x1011 => Self::InvalidParam,
            0x1012 => Self::FingerNotPressed,
            _ => return None,
        };
        Some(code)
    }

    /// Wire value of the code
    pub fn as_u32(self) -> u32 {
        self as u16 as u32
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::InvalidBaud => "invalid baud rate",
            Self::InvalidPos => "invalid template position",
            Self::IdNotUsed => "template id is not used",
            Self::IdAlreadyUsed => "template id is already used",
            Self::CommErr => "communication error",
            Self::VerifyFailed => "verification failed",
            Self::IdentifyFailed => "identification failed",
            Self::DatabaseFull => "database is full",
            Self::DatabaseEmpty => "database is empty",
            Self::TurnError => "enrollment step out of order",
            Self::BadFinger => "bad finger image",
            Self::EnrollFailed => "enrollment failed",
            Self::NotSupported => "command not supported",
            Self::DeviceError => "device error",
            Self::CaptureCanceled => "capture canceled",
            Self::InvalidParam => "invalid parameter",
            Self::FingerNotPressed => "finger is not pressed",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:#06x})", self.describe(), self.as_u32())
    }
}

/// Frame-level decode failures. These always mean the exchange was lost or
/// corrupted on the wire, never that the sensor refused the command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Start bytes or device id are wrong
    #[error("frame header mismatch: start bytes or device id do not match")]
    HeaderMismatch,

    /// Trailer does not match the byte sum
    #[error("checksum mismatch: expected {expected:#06x}, got {actual:#06x}")]
    ChecksumMismatch {
        /// Sum computed over the received bytes
        expected: u16,
        /// Value in the trailer
        actual: u16,
    },

    /// Response code is neither ACK nor NACK
    #[error("unknown response code {0:#06x}")]
    UnknownResponseCode(u16),

    /// Buffer is not the size of the frame
    #[error("invalid frame length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Frame size
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
}

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    /// The sensor refused the command
    #[error("sensor replied NACK: {0}")]
    Nack(ErrorCode),

    /// The finger is already stored under this id
    #[error("fingerprint is already enrolled as id {0}")]
    DuplicateId(FingerId),

    /// NACK whose parameter is outside the error table
    #[error("sensor replied NACK with undocumented parameter {0:#010x}")]
    UnknownNack(u32),

    /// No complete answer within the deadline, or the line stalled mid-frame
    #[error("operation timed out")]
    Timeout,

    /// A frame arrived but failed validation
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Transport-level I/O failure
    #[error("transport i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Serial port could not be opened or configured
    #[cfg(feature = "serial")]
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// ACK parameter outside the range the command can return
    #[error("sensor returned an unexpected parameter {0:#010x}")]
    UnexpectedParameter(u32),

    /// No transport to talk to
    #[error("device not found")]
    DeviceNotFound,

    /// Auto-negotiation ran out of candidate rates
    #[error("no baud rate answered OPEN after {attempts} attempts")]
    BaudNegotiation {
        /// Candidates tried
        attempts: usize,
    },

    /// Id at or above the configured capacity
    #[error("finger id {id} is out of range (capacity {capacity})")]
    IdOutOfRange {
        /// Rejected id
        id: u16,
        /// Configured slot count
        capacity: u16,
    },

    /// Rate the sensor does not support
    #[error("unsupported baud rate {0}")]
    UnsupportedBaud(u32),

    /// Payload of the wrong size for the command
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Size the command requires
        expected: usize,
        /// Size supplied
        actual: usize,
    },

    /// Caller error caught before anything was sent
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Fold the error into the protocol's single error taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Nack(code) => *code,
            Self::DuplicateId(_) => ErrorCode::EnrollFailed,
            Self::UnknownNack(_) => ErrorCode::DeviceError,
            Self::Timeout => ErrorCode::Timeout,
            Self::Frame(_) | Self::Io(_) | Self::UnexpectedParameter(_) | Self::DeviceNotFound => {
                ErrorCode::CommErr
            }
            #[cfg(feature = "serial")]
            Self::Serial(_) => ErrorCode::CommErr,
            Self::BaudNegotiation { .. } | Self::UnsupportedBaud(_) => ErrorCode::InvalidBaud,
            Self::IdOutOfRange { .. } => ErrorCode::InvalidPos,
            Self::InvalidLength { .. } | Self::InvalidParameter(_) => ErrorCode::InvalidParam,
        }
    }

    /// True when the sensor understood the request and refused it.
    pub fn is_nack(&self) -> bool {
        matches!(
            self,
            Self::Nack(_) | Self::DuplicateId(_) | Self::UnknownNack(_)
        )
    }

    /// True when the exchange was lost or corrupted on the link.
    pub fn is_transport(&self) -> bool {
        matches!(self.code(), ErrorCode::Timeout | ErrorCode::CommErr) && !self.is_nack()
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
