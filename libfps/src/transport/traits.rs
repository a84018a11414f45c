// libfps/src/transport/traits.rs

//! The `Transport` trait.

use crate::Result;

/// Transport trait abstracts the UART away from protocol/device logic.
///
/// The driver writes whole frames and polls for received bytes one at a
/// time; implementations must never block in `try_read_byte`. Transports
/// are `Send` so a `Device` can be handed to a worker thread or kept behind
/// a mutex.
pub trait Transport: Send {
    /// Send raw bytes to the sensor
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Return the next received byte, or None if nothing is buffered
    fn try_read_byte(&mut self) -> Result<Option<u8>>;

    /// Reconfigure the line rate
    fn set_baud(&mut self, rate: u32) -> Result<()>;

    /// Current line rate
    fn baud(&self) -> u32;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        (**self).write(data)
    }

    fn try_read_byte(&mut self) -> Result<Option<u8>> {
        (**self).try_read_byte()
    }

    fn set_baud(&mut self, rate: u32) -> Result<()> {
        (**self).set_baud(rate)
    }

    fn baud(&self) -> u32 {
        (**self).baud()
    }
}
