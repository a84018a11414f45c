//! Time source used for timeout measurement.
//!
//! The transaction engine never reads the system clock directly so that
//! tests can drive it with virtual time.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Timer collaborator: a monotonic tick source plus a way to wait.
pub trait Clock: Send {
    /// Current instant on this clock's timeline
    fn now(&self) -> Instant;

    /// Block (or pretend to) for `duration`
    fn sleep(&self, duration: Duration);

    /// Time since `since`, zero if `since` is in the future
    fn elapsed(&self, since: Instant) -> Duration {
        self.now().saturating_duration_since(since)
    }
}

/// Wall-clock implementation backed by `Instant::now` and `thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock for tests. Time only moves when someone sleeps or calls
/// `advance`; clones share the same timeline.
#[derive(Debug, Clone)]
pub struct MockClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl MockClock {
    /// A clock at virtual time zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Move virtual time forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset = offset.saturating_add(by);
    }

    /// Virtual time elapsed since the clock was created
    pub fn total_elapsed(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        let offset = self.total_elapsed();
        self.origin
            .checked_add(offset)
            .unwrap_or_else(|| far_future(self.origin))
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// An instant about a century after `from`, or `from` itself when even that
/// does not fit. Stands in for the deadline of a "wait forever" timeout.
pub fn far_future(from: Instant) -> Instant {
    // Roughly a century
    const HORIZON: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);
    from.checked_add(HORIZON).unwrap_or(from)
}

/// `from + timeout`, clamped to `far_future(from)` when the sum does not fit.
pub fn deadline_after(from: Instant, timeout: Duration) -> Instant {
    from.checked_add(timeout).unwrap_or_else(|| far_future(from))
}
