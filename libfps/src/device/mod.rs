// libfps/src/device/mod.rs

//! Device handle, configuration, transaction engine and enrollment.

pub mod builder;
pub mod config;
pub mod engine;
pub mod enroll;
pub mod handle;
mod negotiate;

pub use builder::DeviceBuilder;
pub use config::{DeviceConfig, Timeouts};
pub use engine::Engine;
pub use enroll::{EnrollProgress, Enrollment};
pub use handle::{Closed, Device, Opened, TransitionError};
