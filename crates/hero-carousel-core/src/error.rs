//! Error types for the carousel core.

use std::fmt;

/// Errors from [`TimerManager`](crate::TimerManager) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// No live timer has this id; it was never started or is already stopped.
    UnknownTimer,
    /// A repeating timer was requested with a zero interval.
    ZeroInterval,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTimer => f.write_str("no live timer with this id"),
            Self::ZeroInterval => f.write_str("repeating timers need a non-zero interval"),
        }
    }
}

impl std::error::Error for TimerError {}

/// Result of timer operations.
pub type Result<T> = std::result::Result<T, TimerError>;
