//! Time sources for driving the virtual timeline.

use std::fmt;
use std::time::{Duration, Instant};

/// A source of "time since page start".
///
/// Timers and the page loop only ever see the [`Duration`] returned here, so
/// any host clock (wall clock, animation frame timestamps, a test script) can
/// drive them.
pub trait Clock: fmt::Debug {
    /// Time elapsed since the page started.
    fn now(&self) -> Duration;
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start measuring from now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that never moves on its own.
///
/// Pages built with it advance only through explicit `advance_to` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrozenClock;

impl Clock for FrozenClock {
    fn now(&self) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_frozen_clock() {
        assert_eq!(FrozenClock.now(), Duration::ZERO);
    }
}
