//! Device configuration

use std::time::Duration;

use crate::constants::{BAUD_PROBE_ORDER, DEFAULT_CAPACITY};
use crate::protocol::frame::DataPacket;
use crate::protocol::{Command, TimeoutClass};
use crate::types::FingerId;
use crate::utils::timeout::{self, ms, wire_time};
use crate::{Error, Result};

/// Per-class response timeouts plus the receive-path timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeouts {
    /// Control commands: LED, counts, finger detection
    pub control: Duration,
    /// Capture, enrollment steps, verification
    pub processing: Duration,
    /// 1:N identification
    pub search: Duration,
    /// Data frames, before wire time is added
    pub transfer: Duration,
    /// Longest silence tolerated inside one frame
    pub interbyte: Duration,
    /// Quiet period that ends a flush
    pub flush_settle: Duration,
    /// Upper bound on one flush
    pub flush_limit: Duration,
    /// Sleep between polls of an empty receive buffer
    pub poll_interval: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            control: ms(timeout::CONTROL_TIMEOUT_MS),
            processing: ms(timeout::PROCESSING_TIMEOUT_MS),
            search: ms(timeout::SEARCH_TIMEOUT_MS),
            transfer: ms(timeout::TRANSFER_TIMEOUT_MS),
            interbyte: ms(timeout::INTERBYTE_TIMEOUT_MS),
            flush_settle: ms(timeout::FLUSH_SETTLE_MS),
            flush_limit: ms(timeout::FLUSH_LIMIT_MS),
            poll_interval: ms(timeout::POLL_INTERVAL_MS),
        }
    }
}

impl Timeouts {
    /// Response ceiling for a timeout class
    pub fn for_class(&self, class: TimeoutClass) -> Duration {
        match class {
            TimeoutClass::Control => self.control,
            TimeoutClass::Processing => self.processing,
            TimeoutClass::Search => self.search,
            TimeoutClass::Transfer => self.transfer,
        }
    }

    /// Ceiling for the response to `cmd`
    pub fn for_command(&self, cmd: &Command) -> Duration {
        self.for_class(cmd.timeout_class())
    }

    /// Ceiling for a data frame of `payload_len` bytes at `baud`: the
    /// transfer class plus the time the bytes spend on the wire.
    pub fn for_data(&self, payload_len: usize, baud: u32) -> Duration {
        self.transfer
            .saturating_add(wire_time(DataPacket::frame_len(payload_len), baud))
    }
}

/// Everything a `Device` needs besides its transport and clock.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Receive timers
    pub timeouts: Timeouts,
    /// Number of template slots; ids at or above are rejected locally
    pub capacity: u16,
    /// Auto-negotiation probe order
    pub baud_candidates: Vec<u32>,
    /// Pause between negotiation candidates and after a baud change
    pub settle_delay: Duration,
    /// Pause between IsPressFinger polls
    pub finger_poll_interval: Duration,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            timeouts: Timeouts::default(),
            capacity: DEFAULT_CAPACITY,
            baud_candidates: BAUD_PROBE_ORDER.to_vec(),
            settle_delay: ms(timeout::BAUD_SETTLE_MS),
            finger_poll_interval: ms(timeout::FINGER_POLL_MS),
        }
    }
}

impl DeviceConfig {
    /// Reject ids the sensor cannot store before anything is sent.
    pub fn check_id(&self, id: FingerId) -> Result<()> {
        if id.as_u16() >= self.capacity {
            return Err(Error::IdOutOfRange {
                id: id.as_u16(),
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}
