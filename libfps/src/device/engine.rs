// libfps/src/device/engine.rs

//! Transaction engine: framed request/response exchange over a transport.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crate::constants::{CHECKSUM_LEN, DATA_HEADER_LEN, ERROR_CODE_BASE, PACKET_LEN};
use crate::device::config::Timeouts;
use crate::error::ErrorCode;
use crate::protocol::codec;
use crate::protocol::{Command, DataPhase, ResponseCode, ResponsePacket};
use crate::transport::Transport;
use crate::types::FingerId;
use crate::utils::{Clock, bytes_to_hex_spaced, deadline_after};
use crate::{Error, Result};

/// Receive bookkeeping shared by the reads that make up one frame.
struct RxWindow {
    deadline: Instant,
    last_byte: Option<Instant>,
}

/// Transaction engine: one request, one bounded wait, one response. Owns the
/// transport and leaves the byte stream in a known state after any failure.
pub struct Engine {
    transport: Box<dyn Transport>,
    clock: Box<dyn Clock>,
    timeouts: Timeouts,
}

impl Engine {
    /// Engine over `transport`, measuring time with `clock`.
    pub fn new(transport: Box<dyn Transport>, clock: Box<dyn Clock>, timeouts: Timeouts) -> Self {
        Self {
            transport,
            clock,
            timeouts,
        }
    }

    /// Timeouts in effect
    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// Time source used for every deadline
    pub fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    /// Current host-side line rate
    pub fn baud(&self) -> u32 {
        self.transport.baud()
    }

    /// Change the host-side line rate only.
    pub fn set_baud(&mut self, rate: u32) -> Result<()> {
        self.transport.set_baud(rate)
    }

    /// Give the transport back.
    pub fn into_transport(self) -> Box<dyn Transport> {
        self.transport
    }

    /// Encode and write a command frame.
    pub fn send_command(&mut self, cmd: &Command) -> Result<()> {
        let frame = codec::encode_command(cmd);
        debug!(
            "-> {:?} (opcode {:#04x}, param {:#x})",
            cmd,
            cmd.opcode(),
            cmd.parameter()
        );
        trace!("tx [{}]", bytes_to_hex_spaced(&frame));
        self.transport.write(&frame)
    }

    /// Encode and write a data frame.
    pub fn send_data(&mut self, payload: &[u8]) -> Result<()> {
        debug!("-> data frame, {} payload bytes", payload.len());
        self.transport.write(&codec::encode_data_frame(payload))
    }

    /// Fill `buf` from the transport. Fails with `Timeout` when `timeout`
    /// runs out or when the line goes quiet for longer than the interbyte
    /// timeout after at least one byte arrived. Never flushes.
    pub fn receive_exact(&mut self, buf: &mut [u8], timeout: Duration) -> Result<()> {
        let mut window = RxWindow {
            deadline: deadline_after(self.clock.now(), timeout),
            last_byte: None,
        };
        self.read_into(buf, &mut window)
    }

    /// Read and decode a response frame, flushing the line on failure.
    pub fn receive_response(&mut self, timeout: Duration) -> Result<ResponsePacket> {
        let mut frame = [0u8; PACKET_LEN];
        let received = self.receive_exact(&mut frame, timeout);
        self.recover(received)?;
        trace!("rx [{}]", bytes_to_hex_spaced(&frame));
        let decoded = codec::decode_response(&frame).map_err(Error::from);
        self.recover(decoded)
    }

    /// Read a data frame whose payload length is `payload.len()`, verifying
    /// header and checksum. Flushes the line on any failure.
    pub fn receive_data(&mut self, payload: &mut [u8], timeout: Duration) -> Result<()> {
        let received = self.read_data_frame(payload, timeout);
        self.recover(received)
    }

    /// Drain the receive buffer until it stays quiet for the settle period.
    /// Returns the number of bytes thrown away.
    pub fn flush_rx(&mut self) -> Result<usize> {
        let start = self.clock.now();
        let mut quiet_since = start;
        let mut drained = 0usize;
        loop {
            if self.transport.try_read_byte()?.is_some() {
                drained += 1;
                quiet_since = self.clock.now();
                if self.clock.elapsed(start) >= self.timeouts.flush_limit {
                    warn!("line never went quiet, giving up flush");
                    break;
                }
                continue;
            }
            if self.clock.elapsed(quiet_since) >= self.timeouts.flush_settle {
                break;
            }
            self.clock.sleep(self.timeouts.poll_interval);
        }
        if drained > 0 {
            warn!("flushed {} stale bytes", drained);
        }
        Ok(drained)
    }

    /// Send `cmd`, wait for its response within the command's timeout class
    /// and return the ACK parameter. NACKs become errors.
    pub fn transact(&mut self, cmd: &Command) -> Result<u32> {
        self.send_command(cmd)?;
        let resp = self.receive_response(self.timeouts.for_command(cmd))?;
        let result = interpret(cmd, resp);
        match &result {
            Ok(param) => debug!("<- ACK {:#x}", param),
            Err(e) => debug!("<- {}", e),
        }
        result
    }

    /// Run a command whose ACK is followed by a data frame from the sensor.
    pub fn fetch(&mut self, cmd: &Command) -> Result<Vec<u8>> {
        let len = match cmd.data_phase() {
            DataPhase::Receive(len) => len,
            _ => {
                return Err(Error::InvalidParameter(format!(
                    "{:?} does not return a data frame",
                    cmd
                )));
            }
        };
        self.transact(cmd)?;
        let mut payload = vec![0u8; len];
        let timeout = self.timeouts.for_data(len, self.baud());
        self.receive_data(&mut payload, timeout)?;
        debug!("<- data frame, {} payload bytes", len);
        Ok(payload)
    }

    /// Run a command whose ACK authorises a data frame from the host, then
    /// read the sensor's verdict on that data.
    pub fn upload(&mut self, cmd: &Command, payload: &[u8]) -> Result<u32> {
        let len = match cmd.data_phase() {
            DataPhase::Send(len) => len,
            _ => {
                return Err(Error::InvalidParameter(format!(
                    "{:?} does not accept a data frame",
                    cmd
                )));
            }
        };
        if payload.len() != len {
            return Err(Error::InvalidLength {
                expected: len,
                actual: payload.len(),
            });
        }
        self.transact(cmd)?;
        self.send_data(payload)?;
        let resp = self.receive_response(self.timeouts.for_command(cmd))?;
        interpret(cmd, resp)
    }

    fn read_data_frame(&mut self, payload: &mut [u8], timeout: Duration) -> Result<()> {
        let mut window = RxWindow {
            deadline: deadline_after(self.clock.now(), timeout),
            last_byte: None,
        };
        let mut header = [0u8; DATA_HEADER_LEN];
        self.read_into(&mut header, &mut window)?;
        codec::decode_data_header(&header)?;
        self.read_into(payload, &mut window)?;
        let mut trailer = [0u8; CHECKSUM_LEN];
        self.read_into(&mut trailer, &mut window)?;
        codec::verify_data_checksum(&header, payload, u16::from_le_bytes(trailer))?;
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8], window: &mut RxWindow) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            if let Some(byte) = self.transport.try_read_byte()? {
                buf[filled] = byte;
                filled += 1;
                window.last_byte = Some(self.clock.now());
                continue;
            }

            let now = self.clock.now();
            if now >= window.deadline {
                trace!("timed out after {}/{} bytes", filled, buf.len());
                return Err(Error::Timeout);
            }
            let stalled = window
                .last_byte
                .is_some_and(|at| now.saturating_duration_since(at) >= self.timeouts.interbyte);
            if stalled {
                trace!("line stalled after {}/{} bytes", filled, buf.len());
                return Err(Error::Timeout);
            }
            self.clock.sleep(self.timeouts.poll_interval);
        }
        Ok(())
    }

    /// Flush after a lost or corrupted exchange so the next one starts clean.
    fn recover<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if matches!(err, Error::Timeout | Error::Frame(_)) {
                warn!("exchange failed ({}), flushing receive buffer", err);
                if let Err(flush_err) = self.flush_rx() {
                    warn!("flush failed: {}", flush_err);
                }
            }
        }
        result
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("baud", &self.transport.baud())
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

fn interpret(cmd: &Command, resp: ResponsePacket) -> Result<u32> {
    match resp.code {
        ResponseCode::Ack => Ok(resp.param),
        ResponseCode::Nack => Err(nack_error(cmd, resp.param)),
    }
}

fn nack_error(cmd: &Command, param: u32) -> Error {
    if let Some(code) = ErrorCode::from_code(param) {
        return Error::Nack(code);
    }
    if cmd.reports_duplicates() && param < ERROR_CODE_BASE {
        return Error::DuplicateId(FingerId::new(param as u16));
    }
    Error::UnknownNack(param)
}
