// libfps/src/device/handle.rs

//! Type-state device handle and the command API.

use std::marker::PhantomData;
use std::time::Duration;

use log::info;

use crate::constants::SUPPORTED_BAUD_RATES;
use crate::device::config::DeviceConfig;
use crate::device::engine::Engine;
use crate::error::ErrorCode;
use crate::protocol::{Command, EnrollStep};
use crate::transport::Transport;
use crate::types::{CaptureQuality, DeviceInfo, FingerId, Image, Template};
use crate::utils::{Clock, SystemClock};
use crate::{Error, Result};

/// No session: only Open (or negotiation) is available
#[derive(Debug)]
pub struct Closed;
/// Session open: the full command set is available
#[derive(Debug)]
pub struct Opened;

/// Sensor handle. Commands other than Open are only reachable once the
/// session has been opened.
pub struct Device<State = Closed> {
    engine: Engine,
    config: DeviceConfig,
    _state: PhantomData<State>,
}

/// A failed state transition. Hands the device back so the caller can retry
/// or recover the transport.
#[derive(thiserror::Error)]
#[error("{error}")]
pub struct TransitionError<S> {
    /// The device, still in its previous state
    pub device: Device<S>,
    /// Why the transition failed
    #[source]
    pub error: Error,
}

impl<S> std::fmt::Debug for TransitionError<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<S> From<TransitionError<S>> for Error {
    fn from(e: TransitionError<S>) -> Self {
        e.error
    }
}

impl<S> Device<S> {
    pub(crate) fn into_state<T>(self) -> Device<T> {
        Device {
            engine: self.engine,
            config: self.config,
            _state: PhantomData,
        }
    }

    pub(crate) fn fail<T>(self, error: Error) -> std::result::Result<T, TransitionError<S>> {
        Err(TransitionError {
            device: self,
            error,
        })
    }

    /// Configuration the device was built with
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Line rate the host side is currently using
    pub fn baud(&self) -> u32 {
        self.engine.baud()
    }

    /// Direct access to the transaction engine
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Give the transport back, e.g. to reopen it at another rate.
    pub fn into_transport(self) -> Box<dyn Transport> {
        self.engine.into_transport()
    }
}

impl<S> std::fmt::Debug for Device<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("engine", &self.engine)
            .field("capacity", &self.config.capacity)
            .finish()
    }
}

impl Device<Closed> {
    /// Create a Device from an existing Transport with the default
    /// configuration and the system clock.
    pub fn new_with_transport(transport: Box<dyn Transport>) -> Self {
        Self::with_parts(transport, Box::new(SystemClock), DeviceConfig::default())
    }

    /// Assemble a Device from a transport, a time source and a configuration.
    pub fn with_parts(
        transport: Box<dyn Transport>,
        clock: Box<dyn Clock>,
        config: DeviceConfig,
    ) -> Self {
        let engine = Engine::new(transport, clock, config.timeouts);
        Self {
            engine,
            config,
            _state: PhantomData,
        }
    }

    /// Open a session at the transport's current rate.
    pub fn open(mut self) -> std::result::Result<Device<Opened>, TransitionError<Closed>> {
        match self.engine.transact(&Command::Open { info: false }) {
            Ok(_) => Ok(self.into_state()),
            Err(error) => self.fail(error),
        }
    }

    /// Open a session and read the device information block.
    pub fn open_with_info(
        mut self,
    ) -> std::result::Result<(Device<Opened>, DeviceInfo), TransitionError<Closed>> {
        let info = self
            .engine
            .fetch(&Command::Open { info: true })
            .and_then(|payload| DeviceInfo::try_from(payload.as_slice()));
        match info {
            Ok(info) => {
                info!(
                    "sensor firmware {:#010x}, serial {}",
                    info.firmware_version,
                    info.serial_hex()
                );
                Ok((self.into_state(), info))
            }
            Err(error) => self.fail(error),
        }
    }
}

impl Device<Opened> {
    /// Execute an arbitrary command and return its ACK parameter. Commands
    /// carrying a data phase should go through the dedicated methods.
    pub fn execute(&mut self, cmd: Command) -> Result<u32> {
        self.engine.transact(&cmd)
    }

    /// End the session.
    pub fn close(mut self) -> std::result::Result<Device<Closed>, TransitionError<Opened>> {
        match self.engine.transact(&Command::Close) {
            Ok(_) => Ok(self.into_state()),
            Err(error) => self.fail(error),
        }
    }

    /// Switch the CMOS backlight. Capture needs it on.
    pub fn set_led(&mut self, on: bool) -> Result<()> {
        self.engine.transact(&Command::CmosLed { on })?;
        Ok(())
    }

    /// Ask the sensor to switch rates, then follow on the host side once it
    /// has acknowledged at the old rate.
    pub fn change_baud(&mut self, rate: u32) -> Result<()> {
        if !SUPPORTED_BAUD_RATES.contains(&rate) {
            return Err(Error::UnsupportedBaud(rate));
        }
        self.engine.transact(&Command::ChangeBaud { rate })?;
        self.engine.set_baud(rate)?;
        self.engine.clock().sleep(self.config.settle_delay);
        info!("line switched to {} baud", rate);
        Ok(())
    }

    /// Number of stored templates.
    pub fn enroll_count(&mut self) -> Result<u32> {
        self.engine.transact(&Command::GetEnrollCount)
    }

    /// Whether `id` holds a template. An `IdNotUsed` NACK means no.
    pub fn check_enrolled(&mut self, id: FingerId) -> Result<bool> {
        self.config.check_id(id)?;
        match self.engine.transact(&Command::CheckEnrolled { id }) {
            Ok(_) => Ok(true),
            Err(Error::Nack(ErrorCode::IdNotUsed)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Begin an enrollment into `id`. Fails with `IdAlreadyUsed` when the
    /// slot is occupied.
    pub fn enroll_start(&mut self, id: FingerId) -> Result<()> {
        self.config.check_id(id)?;
        self.engine.transact(&Command::EnrollStart { id })?;
        Ok(())
    }

    /// Merge the last captured image into the template under construction.
    /// The third step stores the template, and reports `DuplicateId` when
    /// the finger is already enrolled elsewhere.
    pub fn enroll(&mut self, step: EnrollStep) -> Result<()> {
        self.engine.transact(&Command::Enroll(step))?;
        Ok(())
    }

    /// Whether a finger is on the window right now.
    pub fn is_finger_pressed(&mut self) -> Result<bool> {
        // 0 means a finger is on the window
        Ok(self.engine.transact(&Command::IsPressFinger)? == 0)
    }

    /// Poll until a finger is on the window, or `Timeout`.
    pub fn wait_until_finger_pressed(&mut self, timeout: Duration) -> Result<()> {
        self.wait_for_finger(true, timeout)
    }

    /// Poll until the window is clear, or `Timeout`.
    pub fn wait_until_finger_released(&mut self, timeout: Duration) -> Result<()> {
        self.wait_for_finger(false, timeout)
    }

    /// Clear slot `id`.
    pub fn delete_id(&mut self, id: FingerId) -> Result<()> {
        self.config.check_id(id)?;
        self.engine.transact(&Command::DeleteId { id })?;
        Ok(())
    }

    /// Clear the whole database.
    pub fn delete_all(&mut self) -> Result<()> {
        self.engine.transact(&Command::DeleteAll)?;
        Ok(())
    }

    /// 1:1 match of the captured finger against `id`.
    pub fn verify(&mut self, id: FingerId) -> Result<()> {
        self.config.check_id(id)?;
        self.engine.transact(&Command::Verify { id })?;
        Ok(())
    }

    /// 1:N search of the captured finger.
    pub fn identify(&mut self) -> Result<FingerId> {
        let param = self.engine.transact(&Command::Identify)?;
        FingerId::try_from(param)
    }

    /// 1:1 match of an uploaded template against `id`.
    pub fn verify_template(&mut self, id: FingerId, template: &Template) -> Result<()> {
        self.config.check_id(id)?;
        self.engine
            .upload(&Command::VerifyTemplate { id }, template.as_bytes())?;
        Ok(())
    }

    /// 1:N search of an uploaded template.
    pub fn identify_template(&mut self, template: &Template) -> Result<FingerId> {
        let param = self
            .engine
            .upload(&Command::IdentifyTemplate, template.as_bytes())?;
        FingerId::try_from(param)
    }

    /// Capture the finger on the window. `Best` is slower and is what
    /// enrollment wants; `Fast` suits identification.
    pub fn capture_finger(&mut self, quality: CaptureQuality) -> Result<()> {
        self.engine.transact(&Command::CaptureFinger { quality })?;
        Ok(())
    }

    /// Build a template from the captured finger without storing it.
    pub fn make_template(&mut self) -> Result<Template> {
        let payload = self.engine.fetch(&Command::MakeTemplate)?;
        Template::try_from(payload.as_slice())
    }

    /// Download the last captured image at full resolution.
    pub fn get_image(&mut self) -> Result<Image> {
        Image::full(self.engine.fetch(&Command::GetImage)?)
    }

    /// Low resolution preview straight off the CMOS sensor
    pub fn get_raw_image(&mut self) -> Result<Image> {
        Image::raw(self.engine.fetch(&Command::GetRawImage)?)
    }

    /// Download the template stored under `id`.
    pub fn get_template(&mut self, id: FingerId) -> Result<Template> {
        self.config.check_id(id)?;
        let payload = self.engine.fetch(&Command::GetTemplate { id })?;
        Template::try_from(payload.as_slice())
    }

    /// Store `template` under `id`, replacing whatever was there.
    pub fn set_template(&mut self, id: FingerId, template: &Template) -> Result<()> {
        self.config.check_id(id)?;
        self.engine
            .upload(&Command::SetTemplate { id }, template.as_bytes())?;
        Ok(())
    }

    fn wait_for_finger(&mut self, pressed: bool, timeout: Duration) -> Result<()> {
        let start = self.engine.clock().now();
        loop {
            if self.is_finger_pressed()? == pressed {
                return Ok(());
            }
            if self.engine.clock().elapsed(start) >= timeout {
                return Err(Error::Timeout);
            }
            self.engine.clock().sleep(self.config.finger_poll_interval);
        }
    }
}
