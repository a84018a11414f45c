// libfps/src/device/builder.rs

//! Builder for `Device<Closed>`.

use crate::device::config::{DeviceConfig, Timeouts};
use crate::device::handle::{Closed, Device};
use crate::transport::Transport;
use crate::utils::{Clock, SystemClock};
use crate::{Error, Result};

/// Helper to construct a Device with optional configuration.
pub struct DeviceBuilder {
    transport: Option<Box<dyn Transport>>,
    clock: Option<Box<dyn Clock>>,
    config: DeviceConfig,
}

impl DeviceBuilder {
    /// Builder with the default configuration and no transport
    pub fn new() -> Self {
        Self {
            transport: None,
            clock: None,
            config: DeviceConfig::default(),
        }
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Open a serial port at `baud`. Pair with `negotiate` when the sensor
    /// may have been left at another rate.
    #[cfg(feature = "serial")]
    pub fn with_serial_port(self, path: &str, baud: u32) -> Result<Self> {
        let port = crate::transport::SerialTransport::open(path, baud)?;
        Ok(self.with_transport(Box::new(port)))
    }

    /// Replace the time source. Defaults to the system clock.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: DeviceConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the timeout set.
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.config.timeouts = timeouts;
        self
    }

    /// Number of template slots the sensor model has.
    pub fn with_capacity(mut self, capacity: u16) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Rates `negotiate` probes, in order.
    pub fn with_baud_candidates(mut self, rates: &[u32]) -> Self {
        self.config.baud_candidates = rates.to_vec();
        self
    }

    /// Consume the builder and return a closed Device.
    /// Requires a transport to be provided; otherwise returns DeviceNotFound.
    pub fn build(self) -> Result<Device<Closed>> {
        let transport = self.transport.ok_or(Error::DeviceNotFound)?;
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
        Ok(Device::with_parts(transport, clock, self.config))
    }
}

impl Default for DeviceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
