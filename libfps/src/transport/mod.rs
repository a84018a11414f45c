// libfps/src/transport/mod.rs

//! Byte transports: the `Transport` trait, a mock and the serial port.

pub mod mock;
#[cfg(feature = "serial")]
pub mod serial;
pub mod traits;

pub use mock::MockTransport;
#[cfg(feature = "serial")]
pub use serial::SerialTransport;
pub use traits::Transport;
