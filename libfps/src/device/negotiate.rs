// libfps/src/device/negotiate.rs

//! Baud-rate auto-negotiation.

use log::{debug, info, warn};

use crate::Error;
use crate::device::handle::{Closed, Device, Opened, TransitionError};
use crate::protocol::Command;

impl Device<Closed> {
    /// Find the rate the sensor is listening at and open a session there.
    ///
    /// Each configured candidate is tried once, in order: settle, flush
    /// whatever the previous attempt left on the line, switch the host rate
    /// and send Open. The first ACK wins. A port failure aborts the probe.
    pub fn negotiate(mut self) -> Result<Device<Opened>, TransitionError<Closed>> {
        let candidates = self.config().baud_candidates.clone();
        let settle = self.config().settle_delay;

        for (attempt, &rate) in candidates.iter().enumerate() {
            if attempt > 0 {
                self.engine_mut().clock().sleep(settle);
                if let Err(error) = self.engine_mut().flush_rx() {
                    return self.fail(error);
                }
            }
            if let Err(error) = self.engine_mut().set_baud(rate) {
                return self.fail(error);
            }
            match self.engine_mut().transact(&Command::Open { info: false }) {
                Ok(_) => {
                    info!("sensor answered at {} baud", rate);
                    return Ok(self.into_state());
                }
                Err(error) if port_failed(&error) => return self.fail(error),
                Err(error) => debug!("no session at {} baud: {}", rate, error),
            }
        }

        warn!(
            "sensor did not answer at any of {} candidate rates",
            candidates.len()
        );
        let attempts = candidates.len();
        self.fail(Error::BaudNegotiation { attempts })
    }
}

fn port_failed(error: &Error) -> bool {
    match error {
        Error::Io(_) => true,
        #[cfg(feature = "serial")]
        Error::Serial(_) => true,
        _ => false,
    }
}
