//! Timeout defaults for the protocol.
//!
//! The sensor answers control commands within a couple of hundred
//! milliseconds, image processing within a second and a full database
//! search within two.

use std::time::Duration;

/// Response ceiling for control commands (LED, counts, finger detection)
pub const CONTROL_TIMEOUT_MS: u64 = 200;
/// Response ceiling for capture, enrollment steps and 1:1 verification
pub const PROCESSING_TIMEOUT_MS: u64 = 1000;
/// Response ceiling for 1:N identification
pub const SEARCH_TIMEOUT_MS: u64 = 2000;
/// Base ceiling for a data frame, before wire time is added
pub const TRANSFER_TIMEOUT_MS: u64 = 1000;

/// Maximum silence between two bytes of the same frame
pub const INTERBYTE_TIMEOUT_MS: u64 = 100;

/// Quiet period that ends a receive-buffer flush
pub const FLUSH_SETTLE_MS: u64 = 100;

/// Upper bound on a single flush, in case the line never goes quiet
pub const FLUSH_LIMIT_MS: u64 = 2000;

/// Sleep between two polls of an empty receive buffer
pub const POLL_INTERVAL_MS: u64 = 1;

/// Delay between two auto-negotiation candidates
pub const BAUD_SETTLE_MS: u64 = 100;

/// Delay between two IsPressFinger polls while waiting for a finger
pub const FINGER_POLL_MS: u64 = 50;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Time needed to clock `bytes` bytes over an 8N1 line at `baud`.
pub fn wire_time(bytes: usize, baud: u32) -> Duration {
    if baud == 0 {
        return Duration::ZERO;
    }
    let bits = (bytes as u64).saturating_mul(10);
    Duration::from_micros(bits.saturating_mul(1_000_000) / baud as u64)
}
