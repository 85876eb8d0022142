//! Core systems for the hero carousel.
//!
//! This crate provides the host-agnostic building blocks the carousel engine
//! runs on:
//!
//! - **Timers**: repeating timers on a virtual timeline
//! - **Clock**: time sources that drive the timeline
//! - **Signals**: change notification
//! - **Properties**: values with change detection
//! - **Identifiers**: per-page identifier generation
//!
//! # Timer Example
//!
//! ```
//! use std::time::Duration;
//! use hero_carousel_core::TimerManager;
//!
//! let mut timers = TimerManager::new();
//! let id = timers
//!     .start_repeating(Duration::ZERO, Duration::from_millis(6000))
//!     .unwrap();
//!
//! assert!(timers.pop_due(Duration::from_millis(5999)).is_none());
//! assert_eq!(timers.pop_due(Duration::from_millis(6000)).map(|fired| fired.id), Some(id));
//! ```

mod clock;
mod error;
mod id;
pub mod logging;
pub mod property;
pub mod signal;
mod timer;

pub use clock::{Clock, FrozenClock, SystemClock};
pub use error::{Result, TimerError};
pub use id::IdGenerator;
pub use property::Property;
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerFired, TimerId, TimerManager};
