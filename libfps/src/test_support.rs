//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::device::{Device, DeviceConfig, Opened};
use crate::error::ErrorCode;
use crate::protocol::codec;
use crate::protocol::ResponsePacket;
use crate::transport::mock::MockTransport;
use crate::transport::traits::Transport;
use crate::utils::MockClock;
use crate::Result;

/// Encoded ACK response carrying `param`.
#[doc(hidden)]
pub fn ack(param: u32) -> Vec<u8> {
    ResponsePacket::ack(param).encode().to_vec()
}

/// Encoded NACK response carrying a known error code.
#[doc(hidden)]
pub fn nack(code: ErrorCode) -> Vec<u8> {
    nack_raw(code.as_u32())
}

/// Encoded NACK response with an arbitrary parameter.
#[doc(hidden)]
pub fn nack_raw(param: u32) -> Vec<u8> {
    ResponsePacket::nack(param).encode().to_vec()
}

/// Encoded data frame around `payload`.
#[doc(hidden)]
pub fn data_frame(payload: &[u8]) -> Vec<u8> {
    codec::encode_data_frame(payload)
}

/// Handle on a MockTransport that a Device also owns, so a test can inspect
/// what was sent after the Device has taken ownership.
#[doc(hidden)]
#[derive(Debug, Clone)]
pub struct SharedMock(Arc<Mutex<MockTransport>>);

impl SharedMock {
    /// Wrap `mock` for sharing between a test and a Device.
    pub fn new(mock: MockTransport) -> Self {
        Self(Arc::new(Mutex::new(mock)))
    }

    /// Access the mock, ignoring poisoning.
    pub fn lock(&self) -> MutexGuard<'_, MockTransport> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Transport wrapper that delegates into a SharedMock.
#[doc(hidden)]
#[derive(Debug)]
pub struct SharedTransport {
    inner: SharedMock,
}

impl SharedTransport {
    /// Transport end of `inner`.
    pub fn new(inner: SharedMock) -> Self {
        Self { inner }
    }
}

impl Transport for SharedTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.inner.lock().write(data)
    }

    fn try_read_byte(&mut self) -> Result<Option<u8>> {
        self.inner.lock().try_read_byte()
    }

    fn set_baud(&mut self, rate: u32) -> Result<()> {
        self.inner.lock().set_baud(rate)
    }

    fn baud(&self) -> u32 {
        self.inner.lock().baud()
    }
}

/// Convenience: an opened Device on virtual time, backed by a shared
/// MockTransport. The Open ACK is queued here; `replies` answer the
/// commands that follow, one per write.
#[doc(hidden)]
pub fn opened_mock_device(
    replies: Vec<Vec<u8>>,
) -> (Device<Opened>, SharedMock, MockClock) {
    opened_mock_device_with(DeviceConfig::default(), replies)
}

/// Like `opened_mock_device` with a custom configuration.
#[doc(hidden)]
pub fn opened_mock_device_with(
    config: DeviceConfig,
    replies: Vec<Vec<u8>>,
) -> (Device<Opened>, SharedMock, MockClock) {
    let mut mock = MockTransport::new();
    mock.push_reply(ack(0));
    for reply in replies {
        mock.push_reply(reply);
    }
    let shared = SharedMock::new(mock);
    let clock = MockClock::new();
    let device = Device::with_parts(
        Box::new(SharedTransport::new(shared.clone())),
        Box::new(clock.clone()),
        config,
    );
    match device.open() {
        Ok(opened) => (opened, shared, clock),
        Err(e) => panic!("mock open failed: {}", e),
    }
}
