// libfps/src/protocol/commands.rs

//! Command set: opcodes, parameters, timeout classes and data phases.

use crate::constants::{DEVICE_INFO_SIZE, IMAGE_SIZE, RAW_IMAGE_SIZE, TEMPLATE_SIZE};
use crate::protocol::frame::CommandPacket;
use crate::types::{CaptureQuality, FingerId};

/// One of the three enrollment passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnrollStep {
    /// Enroll1
    First,
    /// Enroll2
    Second,
    /// Enroll3, which stores the template
    Third,
}

impl EnrollStep {
    /// The pass after this one, `None` after the third
    pub fn next(self) -> Option<Self> {
        match self {
            Self::First => Some(Self::Second),
            Self::Second => Some(Self::Third),
            Self::Third => None,
        }
    }

    /// 1-based pass number
    pub fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }
}

/// How long the sensor may take before answering a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutClass {
    /// Immediate control commands
    Control,
    /// On-device image processing (enroll passes, capture, delete all)
    Processing,
    /// Full database search
    Search,
    /// Commands that authorise a bulk data transfer
    Transfer,
}

/// Data frame exchanged after the command's ACK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPhase {
    /// Response only
    None,
    /// Sensor sends a data frame with this many payload bytes
    Receive(usize),
    /// Host sends a data frame with this many payload bytes, then reads a
    /// second response
    Send(usize),
}

/// Every command the driver can send. New commands should be added here
/// together with their opcode, timeout class and data phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Command {
    /// Start a session; with `info` the sensor follows up with its info block
    Open { info: bool },
    /// End the session
    Close,
    /// Switch the line rate
    ChangeBaud { rate: u32 },
    /// Backlight on or off
    CmosLed { on: bool },
    /// Number of stored templates
    GetEnrollCount,
    /// Whether a slot is occupied
    CheckEnrolled { id: FingerId },
    /// Begin enrolling into a slot
    EnrollStart { id: FingerId },
    /// One of the three enrollment passes
    Enroll(EnrollStep),
    /// Finger presence check
    IsPressFinger,
    /// Clear one slot
    DeleteId { id: FingerId },
    /// Clear every slot
    DeleteAll,
    /// 1:1 match of the captured finger against a slot
    Verify { id: FingerId },
    /// 1:N match of the captured finger
    Identify,
    /// 1:1 match of an uploaded template against a slot
    VerifyTemplate { id: FingerId },
    /// 1:N match of an uploaded template
    IdentifyTemplate,
    /// Capture a finger image
    CaptureFinger { quality: CaptureQuality },
    /// Template of the last capture, without storing it
    MakeTemplate,
    /// Download the last capture
    GetImage,
    /// Download a live low-resolution image
    GetRawImage,
    /// Download a stored template
    GetTemplate { id: FingerId },
    /// Upload a template into a slot
    SetTemplate { id: FingerId },
}

impl Command {
    /// Wire opcode of the command
    pub fn opcode(&self) -> u16 {
        match self {
            Self::Open { .. } => 0x01,
            Self::Close => 0x02,
            Self::ChangeBaud { .. } => 0x04,
            Self::CmosLed { .. } => 0x12,
            Self::GetEnrollCount => 0x20,
            Self::CheckEnrolled { .. } => 0x21,
            Self::EnrollStart { .. } => 0x22,
            Self::Enroll(EnrollStep::First) => 0x23,
            Self::Enroll(EnrollStep::Second) => 0x24,
            Self::Enroll(EnrollStep::Third) => 0x25,
            Self::IsPressFinger => 0x26,
            Self::DeleteId { .. } => 0x40,
            Self::DeleteAll => 0x41,
            Self::Verify { .. } => 0x50,
            Self::Identify => 0x51,
            Self::VerifyTemplate { .. } => 0x52,
            Self::IdentifyTemplate => 0x53,
            Self::CaptureFinger { .. } => 0x60,
            Self::MakeTemplate => 0x61,
            Self::GetImage => 0x62,
            Self::GetRawImage => 0x63,
            Self::GetTemplate { .. } => 0x70,
            Self::SetTemplate { .. } => 0x71,
        }
    }

    /// 32-bit input parameter
    pub fn parameter(&self) -> u32 {
        match self {
            Self::Open { info } => *info as u32,
            Self::ChangeBaud { rate } => *rate,
            Self::CmosLed { on } => *on as u32,
            Self::CheckEnrolled { id }
            | Self::EnrollStart { id }
            | Self::DeleteId { id }
            | Self::Verify { id }
            | Self::VerifyTemplate { id }
            | Self::GetTemplate { id }
            | Self::SetTemplate { id } => id.as_param(),
            Self::CaptureFinger { quality } => *quality as u32,
            _ => 0,
        }
    }

    /// How long the sensor may take to answer
    pub fn timeout_class(&self) -> TimeoutClass {
        match self {
            Self::Open { .. }
            | Self::Close
            | Self::ChangeBaud { .. }
            | Self::CmosLed { .. }
            | Self::GetEnrollCount
            | Self::CheckEnrolled { .. }
            | Self::EnrollStart { .. }
            | Self::IsPressFinger
            | Self::DeleteId { .. } => TimeoutClass::Control,
            Self::Enroll(_) | Self::DeleteAll | Self::CaptureFinger { .. } | Self::MakeTemplate => {
                TimeoutClass::Processing
            }
            Self::Verify { .. }
            | Self::Identify
            | Self::VerifyTemplate { .. }
            | Self::IdentifyTemplate => TimeoutClass::Search,
            Self::GetImage | Self::GetRawImage | Self::GetTemplate { .. } | Self::SetTemplate { .. } => {
                TimeoutClass::Transfer
            }
        }
    }

    /// Data frame that follows the ACK, if any
    pub fn data_phase(&self) -> DataPhase {
        match self {
            Self::Open { info: true } => DataPhase::Receive(DEVICE_INFO_SIZE),
            Self::GetTemplate { .. } | Self::MakeTemplate => DataPhase::Receive(TEMPLATE_SIZE),
            Self::GetImage => DataPhase::Receive(IMAGE_SIZE),
            Self::GetRawImage => DataPhase::Receive(RAW_IMAGE_SIZE),
            Self::SetTemplate { .. } | Self::VerifyTemplate { .. } | Self::IdentifyTemplate => {
                DataPhase::Send(TEMPLATE_SIZE)
            }
            _ => DataPhase::None,
        }
    }

    /// Commands whose NACK parameter may be the id of an already enrolled
    /// duplicate instead of an error code.
    pub fn reports_duplicates(&self) -> bool {
        matches!(
            self,
            Self::Enroll(EnrollStep::Third) | Self::SetTemplate { .. }
        )
    }

    /// Build the wire packet for this command.
    pub fn packet(&self) -> CommandPacket {
        CommandPacket::new(self.opcode(), self.parameter())
    }
}
