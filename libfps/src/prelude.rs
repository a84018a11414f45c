// libfps/src/prelude.rs

//! Convenience re-exports for applications.

pub use crate::device::{Closed, Device, DeviceBuilder, DeviceConfig, Opened, Timeouts};
pub use crate::device::{EnrollProgress, Enrollment, TransitionError};
pub use crate::protocol::{Command, EnrollStep};
pub use crate::transport::{MockTransport, Transport};
#[cfg(feature = "serial")]
pub use crate::transport::SerialTransport;
pub use crate::{
    CaptureQuality, DeviceInfo, Error, ErrorCode, FingerId, FrameError, Image, Result, Template,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms, parse_hex};
