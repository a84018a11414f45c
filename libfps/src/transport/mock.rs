// libfps/src/transport/mock.rs

//! Scripted in-memory sensor for tests.

use std::collections::VecDeque;

use crate::Result;
use crate::constants::{DEFAULT_BAUD_RATE, PACKET_LEN};
use crate::transport::traits::Transport;

/// Mock transport for unit tests. It behaves like a scripted sensor: every
/// `write` releases the next queued reply into the receive buffer, and the
/// driver then reads it back byte by byte.
#[derive(Debug)]
pub struct MockTransport {
    /// Every write, in order
    pub sent: Vec<Vec<u8>>,
    /// Replies released one per write
    pub replies: VecDeque<Vec<u8>>,
    /// Bytes waiting to be read
    pub rx: VecDeque<u8>,
    /// Current line rate
    pub baud: u32,
    /// Every rate passed to `set_baud`
    pub baud_history: Vec<u32>,
    /// When set, the sensor only answers while the line runs at this rate
    pub responsive_baud: Option<u32>,
    /// Garbage the sensor appears to send when the rates disagree
    pub mismatch_noise: Vec<u8>,
    /// Testing hook: stop delivering bytes once this many have been read
    pub stall_after: Option<usize>,
    /// Bytes handed out by `try_read_byte` so far
    pub bytes_read: usize,
}

impl MockTransport {
    /// Silent sensor at the factory rate
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            replies: VecDeque::new(),
            rx: VecDeque::new(),
            baud: DEFAULT_BAUD_RATE,
            baud_history: Vec::new(),
            responsive_baud: None,
            mismatch_noise: Vec::new(),
            stall_after: None,
            bytes_read: 0,
        }
    }

    /// Queue the sensor's answer to the next write.
    pub fn push_reply(&mut self, reply: Vec<u8>) {
        self.replies.push_back(reply);
    }

    /// Put bytes straight into the receive buffer (stale data on the line).
    pub fn push_rx(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Only answer while the line runs at `rate`.
    pub fn set_responsive_baud(&mut self, rate: u32) {
        self.responsive_baud = Some(rate);
    }

    /// Go silent after `n` more bytes have been read.
    pub fn stall_after(&mut self, n: usize) {
        self.stall_after = Some(self.bytes_read + n);
    }

    /// Bytes still waiting in the receive buffer
    pub fn pending_rx(&self) -> usize {
        self.rx.len()
    }

    /// Opcodes of all command frames written so far, data frames skipped.
    pub fn sent_opcodes(&self) -> Vec<u16> {
        self.sent
            .iter()
            .filter(|f| f.len() == PACKET_LEN && f[0] == 0x55 && f[1] == 0xAA)
            .map(|f| u16::from_le_bytes([f[8], f[9]]))
            .collect()
    }

    fn answering(&self) -> bool {
        self.responsive_baud.is_none_or(|rate| rate == self.baud)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.sent.push(data.to_vec());
        if self.answering() {
            if let Some(reply) = self.replies.pop_front() {
                self.rx.extend(reply);
            }
        } else {
            let noise = self.mismatch_noise.clone();
            self.rx.extend(noise);
        }
        Ok(())
    }

    fn try_read_byte(&mut self) -> Result<Option<u8>> {
        if self.stall_after.is_some_and(|limit| self.bytes_read >= limit) {
            return Ok(None);
        }
        let byte = self.rx.pop_front();
        if byte.is_some() {
            self.bytes_read += 1;
        }
        Ok(byte)
    }

    fn set_baud(&mut self, rate: u32) -> Result<()> {
        self.baud = rate;
        self.baud_history.push(rate);
        Ok(())
    }

    fn baud(&self) -> u32 {
        self.baud
    }
}
