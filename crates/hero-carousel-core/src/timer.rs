//! Timer system for the carousel core.
//!
//! Provides repeating timers on a virtual timeline. The manager
//! never reads a wall clock: callers pass the current time as a [`Duration`]
//! since page start, which keeps autoplay deterministic under test and lets a
//! host drive it from any clock (see [`crate::Clock`]).

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::error::TimerError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// A timer that came due during [`TimerManager::pop_due`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    /// The timer that fired.
    pub id: TimerId,
    /// The scheduled fire time (not the time it was processed).
    pub at: Duration,
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer should next fire.
    next_fire: Duration,
    /// Time between fires.
    interval: Duration,
}

/// An entry in the timer queue (min-heap by fire time, then by insertion).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Duration,
    sequence: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.sequence == other.sequence
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages all timers of a page.
#[derive(Debug, Default)]
pub struct TimerManager {
    /// All registered timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending timer fires.
    queue: BinaryHeap<TimerQueueEntry>,
    /// Tie-breaker so timers due at the same instant fire in start order.
    sequence: u64,
}

impl TimerManager {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a repeating timer that fires every `interval`, first at `now + interval`.
    ///
    /// Returns an error for a zero interval, which would never let time advance.
    pub fn start_repeating(
        &mut self,
        now: Duration,
        interval: Duration,
    ) -> Result<TimerId, TimerError> {
        if interval.is_zero() {
            return Err(TimerError::ZeroInterval);
        }
        let next_fire = now + interval;
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
        });
        self.push_entry(id, next_fire);
        tracing::trace!(target: targets::TIMER, ?id, ?interval, ?next_fire, "timer started");
        Ok(id)
    }

    fn push_entry(&mut self, id: TimerId, fire_time: Duration) {
        self.sequence += 1;
        self.queue.push(TimerQueueEntry {
            id,
            fire_time,
            sequence: self.sequence,
        });
    }

    /// Stop and remove a timer.
    ///
    /// Stale queue entries of a removed timer are skipped when they surface,
    /// so a stopped timer can never fire again.
    pub fn stop(&mut self, id: TimerId) -> Result<(), TimerError> {
        match self.timers.remove(id) {
            Some(_) => {
                tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
                Ok(())
            }
            None => Err(TimerError::UnknownTimer),
        }
    }

    /// Check if a timer is currently live.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// The scheduled time of the next fire, if any timer is live.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.discard_stale();
        self.queue.peek().map(|entry| entry.fire_time)
    }

    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            let live = self
                .timers
                .get(entry.id)
                .is_some_and(|t| t.next_fire == entry.fire_time);
            if live {
                break;
            }
            self.queue.pop();
        }
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// The timer is rescheduled one interval after its scheduled fire time,
    /// so a late caller still sees every missed fire in order.
    #[tracing::instrument(skip(self), target = "hero_carousel_core::timer", level = "trace")]
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerFired> {
        self.discard_stale();
        let entry = *self.queue.peek()?;
        if entry.fire_time > now {
            return None;
        }
        self.queue.pop();

        let id = entry.id;
        let timer = self.timers.get_mut(id)?;
        let next = entry.fire_time + timer.interval;
        timer.next_fire = next;
        self.push_entry(id, next);
        tracing::trace!(target: targets::TIMER, ?id, at = ?entry.fire_time, "timer fired");

        Some(TimerFired {
            id,
            at: entry.fire_time,
        })
    }

    /// Get the number of live timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn drain(timers: &mut TimerManager, now: Duration) -> Vec<TimerFired> {
        std::iter::from_fn(|| timers.pop_due(now)).collect()
    }

    #[test]
    fn test_repeating_fires_each_interval() {
        let mut timers = TimerManager::new();
        let id = timers.start_repeating(ms(0), ms(100)).unwrap();

        assert!(timers.pop_due(ms(99)).is_none());
        assert_eq!(timers.pop_due(ms(100)), Some(TimerFired { id, at: ms(100) }));

        // Two intervals elapsed at once fire twice, at their scheduled times.
        let fired = drain(&mut timers, ms(300));
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0].at, ms(200));
        assert_eq!(fired[1].at, ms(300));
        assert!(timers.is_active(id));
        assert_eq!(timers.next_deadline(), Some(ms(400)));
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timers = TimerManager::new();
        let id = timers.start_repeating(ms(0), ms(100)).unwrap();

        timers.stop(id).unwrap();
        assert!(drain(&mut timers, ms(1_000)).is_empty());
        assert_eq!(timers.stop(id), Err(TimerError::UnknownTimer));
        assert_eq!(timers.active_count(), 0);
        assert_eq!(timers.next_deadline(), None);
    }

    #[test]
    fn test_restart_discards_old_schedule() {
        let mut timers = TimerManager::new();
        let first = timers.start_repeating(ms(0), ms(100)).unwrap();
        timers.stop(first).unwrap();
        let second = timers.start_repeating(ms(50), ms(100)).unwrap();

        assert_eq!(timers.next_deadline(), Some(ms(150)));
        assert!(timers.pop_due(ms(100)).is_none());
        assert_eq!(timers.pop_due(ms(150)).map(|f| f.id), Some(second));
    }

    #[test]
    fn test_same_deadline_fires_in_start_order() {
        let mut timers = TimerManager::new();
        let a = timers.start_repeating(ms(0), ms(10)).unwrap();
        let b = timers.start_repeating(ms(0), ms(10)).unwrap();

        let fired: Vec<_> = drain(&mut timers, ms(10)).into_iter().map(|f| f.id).collect();
        assert_eq!(fired, vec![a, b]);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut timers = TimerManager::new();
        assert_eq!(
            timers.start_repeating(ms(0), Duration::ZERO),
            Err(TimerError::ZeroInterval)
        );
    }
}
