//! Utilities for libfps: the clock abstraction, timeout defaults and hex
//! helpers used for frame logging.

pub mod clock;
pub mod hex;
pub mod timeout;

pub use clock::{Clock, MockClock, SystemClock, deadline_after, far_future};
pub use hex::*;
pub use timeout::*;
