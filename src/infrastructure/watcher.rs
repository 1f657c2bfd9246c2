//! Time-bounded polling for content that appears asynchronously

use std::time::{Duration, Instant};

/// Result of a bounded watch: either the probe produced a value in time, or
/// the deadline passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOutcome<T> {
    Observed(T),
    Expired,
}

impl<T> WatchOutcome<T> {
    pub fn observed(self) -> Option<T> {
        match self {
            WatchOutcome::Observed(value) => Some(value),
            WatchOutcome::Expired => None,
        }
    }
}

/// Poll `probe` at `interval` until it yields a value or `timeout` elapses.
///
/// The probe runs at least once, so a zero timeout still gets one chance to
/// observe. The subscription always ends: on first success or at the
/// deadline, never as an open-ended background task.
pub fn poll_until<T, F>(interval: Duration, timeout: Duration, mut probe: F) -> WatchOutcome<T>
where
    F: FnMut() -> Option<T>,
{
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(value) = probe() {
            return WatchOutcome::Observed(value);
        }

        let now = Instant::now();
        if now >= deadline {
            return WatchOutcome::Expired;
        }

        std::thread::sleep(interval.min(deadline - now));
    }
}
