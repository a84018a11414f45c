//! Guided enrollment.
//!
//! The sensor builds a template from three captures of the same finger:
//! EnrollStart, then for each pass wait for the finger, capture at best
//! quality, wait for it to lift, and send the matching Enroll step.

use std::time::Duration;

use log::info;

use crate::device::handle::{Device, Opened};
use crate::protocol::EnrollStep;
use crate::types::{CaptureQuality, FingerId};
use crate::{Error, Result};

/// Where an enrollment stands after a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollProgress {
    /// Another pass is needed, starting with this step
    Continue(EnrollStep),
    /// The template is stored
    Complete,
}

/// An enrollment in progress. Borrows the device for its whole lifetime so
/// no other command can interleave with the sequence.
#[derive(Debug)]
pub struct Enrollment<'d> {
    device: &'d mut Device<Opened>,
    id: FingerId,
    next: Option<EnrollStep>,
}

impl Device<Opened> {
    /// Send EnrollStart for `id` and return a tracker for the three passes.
    pub fn begin_enrollment(&mut self, id: FingerId) -> Result<Enrollment<'_>> {
        self.enroll_start(id)?;
        Ok(Enrollment {
            device: self,
            id,
            next: Some(EnrollStep::First),
        })
    }

    /// Run a whole enrollment for `id`, blocking on the finger each pass.
    pub fn enroll_finger(&mut self, id: FingerId, finger_timeout: Duration) -> Result<()> {
        self.begin_enrollment(id)?.run_to_completion(finger_timeout)
    }
}

impl Enrollment<'_> {
    /// Slot being enrolled
    pub fn id(&self) -> FingerId {
        self.id
    }

    /// The step the next pass will send, or `None` once stored.
    pub fn next_step(&self) -> Option<EnrollStep> {
        self.next
    }

    /// Whether the third pass has succeeded
    pub fn is_complete(&self) -> bool {
        self.next.is_none()
    }

    /// One capture pass. On error the step is not consumed, so the pass can
    /// be repeated (e.g. after `BadFinger`).
    pub fn run_step(&mut self, finger_timeout: Duration) -> Result<EnrollProgress> {
        let step = self.next.ok_or_else(|| {
            Error::InvalidParameter(format!("enrollment of {} already complete", self.id))
        })?;

        self.device.wait_until_finger_pressed(finger_timeout)?;
        self.device.capture_finger(CaptureQuality::Best)?;
        self.device.wait_until_finger_released(finger_timeout)?;
        self.device.enroll(step)?;

        self.next = step.next();
        Ok(match self.next {
            Some(step) => EnrollProgress::Continue(step),
            None => {
                info!("enrolled finger {}", self.id);
                EnrollProgress::Complete
            }
        })
    }

    /// Run the remaining passes.
    pub fn run_to_completion(mut self, finger_timeout: Duration) -> Result<()> {
        while !self.is_complete() {
            self.run_step(finger_timeout)?;
        }
        Ok(())
    }
}
