// libfps/src/transport/serial.rs

//! Serial port transport (feature `serial`).

#![cfg(feature = "serial")]

use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use log::debug;
use serialport::SerialPort;

use crate::Result;
use crate::transport::traits::Transport;

/// Read timeout handed to the OS driver. Reads are only issued when bytes
/// are already buffered, so this only bounds pathological cases.
const PORT_TIMEOUT: Duration = Duration::from_millis(10);

/// UART transport backed by the `serialport` crate. It is feature-gated
/// behind `--features serial`.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    baud: u32,
    buffered: VecDeque<u8>,
}

impl SerialTransport {
    /// Open `path` (e.g. `/dev/ttyUSB0` or `COM3`) at `baud`, 8N1.
    pub fn open(path: &str, baud: u32) -> Result<Self> {
        let port = serialport::new(path, baud)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .timeout(PORT_TIMEOUT)
            .open()?;
        debug!("opened {} at {} baud", path, baud);
        Ok(Self {
            port,
            baud,
            buffered: VecDeque::new(),
        })
    }

    /// Names of the serial ports present on this machine.
    pub fn available_ports() -> Result<Vec<String>> {
        Ok(serialport::available_ports()?
            .into_iter()
            .map(|p| p.port_name)
            .collect())
    }

    fn fill(&mut self) -> Result<()> {
        let available = self.port.bytes_to_read()? as usize;
        if available == 0 {
            return Ok(());
        }
        let mut buf = vec![0u8; available];
        match self.port.read(&mut buf) {
            Ok(n) => self.buffered.extend(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::TimedOut => {}
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.port.write_all(data)?;
        self.port.flush()?;
        Ok(())
    }

    fn try_read_byte(&mut self) -> Result<Option<u8>> {
        if self.buffered.is_empty() {
            self.fill()?;
        }
        Ok(self.buffered.pop_front())
    }

    fn set_baud(&mut self, rate: u32) -> Result<()> {
        self.port.set_baud_rate(rate)?;
        // Bytes received at the old rate are garbage
        self.port.clear(serialport::ClearBuffer::Input)?;
        self.buffered.clear();
        self.baud = rate;
        Ok(())
    }

    fn baud(&self) -> u32 {
        self.baud
    }
}
