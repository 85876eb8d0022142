//! Autoplay lifecycle and timer ownership.
//!
//! Each carousel holds at most one repeating timer. [`CarouselTimers`] owns
//! the page's timer manager and remembers which carousel owns each timer so
//! fires can be routed back.

use std::collections::HashMap;
use std::time::Duration;

use hero_carousel_core::logging::targets;
use hero_carousel_core::{TimerFired, TimerId, TimerManager};

use crate::error::Result;
use crate::state::CarouselId;

/// Autoplay state of one carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autoplay {
    handle: Option<TimerId>,
    interval: Duration,
    hovered: bool,
    focused: bool,
}

impl Autoplay {
    /// A stopped autoplay with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            handle: None,
            interval,
            hovered: false,
            focused: false,
        }
    }

    /// Whether the periodic trigger is live.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// The live timer, if running.
    pub fn handle(&self) -> Option<TimerId> {
        self.handle
    }

    /// Time between advances.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the pointer is over the carousel.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether focus is inside the carousel.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether hover or focus currently holds autoplay back.
    pub fn is_suspended(&self) -> bool {
        self.hovered || self.focused
    }

    /// Install the periodic trigger. No-op when already running.
    ///
    /// Returns `true` if a timer was started.
    pub fn start(
        &mut self,
        timers: &mut CarouselTimers,
        owner: CarouselId,
        now: Duration,
    ) -> Result<bool> {
        if self.handle.is_some() {
            tracing::trace!(target: targets::AUTOPLAY, ?owner, "already running");
            return Ok(false);
        }
        let id = timers.start_repeating(owner, now, self.interval)?;
        self.handle = Some(id);
        tracing::debug!(target: targets::AUTOPLAY, ?owner, ?now, "autoplay started");
        Ok(true)
    }

    /// Cancel the periodic trigger. No-op when already stopped.
    ///
    /// Returns `true` if a timer was stopped.
    pub fn stop(&mut self, timers: &mut CarouselTimers) -> bool {
        match self.handle.take() {
            Some(id) => {
                timers.stop(id);
                tracing::debug!(target: targets::AUTOPLAY, timer = ?id, "autoplay stopped");
                true
            }
            None => false,
        }
    }

    /// Restart the countdown from zero, unless hover or focus suspends autoplay.
    pub fn reset(
        &mut self,
        timers: &mut CarouselTimers,
        owner: CarouselId,
        now: Duration,
    ) -> Result<()> {
        self.stop(timers);
        self.resume(timers, owner, now)
    }

    /// Start again if nothing suspends autoplay.
    pub fn resume(
        &mut self,
        timers: &mut CarouselTimers,
        owner: CarouselId,
        now: Duration,
    ) -> Result<()> {
        if self.is_suspended() {
            tracing::trace!(
                target: targets::AUTOPLAY,
                ?owner,
                hovered = self.hovered,
                focused = self.focused,
                "autoplay held back"
            );
            return Ok(());
        }
        self.start(timers, owner, now).map(|_| ())
    }

    /// Record pointer presence and stop or resume accordingly.
    pub fn set_hovered(
        &mut self,
        hovered: bool,
        timers: &mut CarouselTimers,
        owner: CarouselId,
        now: Duration,
    ) -> Result<()> {
        self.hovered = hovered;
        if hovered {
            self.stop(timers);
            Ok(())
        } else {
            self.resume(timers, owner, now)
        }
    }

    /// Record focus presence and stop or resume accordingly.
    pub fn set_focused(
        &mut self,
        focused: bool,
        timers: &mut CarouselTimers,
        owner: CarouselId,
        now: Duration,
    ) -> Result<()> {
        self.focused = focused;
        if focused {
            self.stop(timers);
            Ok(())
        } else {
            self.resume(timers, owner, now)
        }
    }
}

/// The page's timers plus the carousel owning each one.
#[derive(Debug, Default)]
pub struct CarouselTimers {
    manager: TimerManager,
    owners: HashMap<TimerId, CarouselId>,
}

impl CarouselTimers {
    /// An empty set of timers.
    pub fn new() -> Self {
        Self::default()
    }

    fn start_repeating(
        &mut self,
        owner: CarouselId,
        now: Duration,
        interval: Duration,
    ) -> Result<TimerId> {
        let id = self.manager.start_repeating(now, interval)?;
        self.owners.insert(id, owner);
        Ok(id)
    }

    fn stop(&mut self, id: TimerId) {
        self.owners.remove(&id);
        if let Err(err) = self.manager.stop(id) {
            tracing::warn!(target: targets::AUTOPLAY, timer = ?id, %err, "stopping unknown timer");
        }
    }

    /// The carousel owning a timer.
    pub fn owner(&self, id: TimerId) -> Option<CarouselId> {
        self.owners.get(&id).copied()
    }

    /// The next scheduled fire time.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.manager.next_deadline()
    }

    /// Pop the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerFired> {
        self.manager.pop_due(now)
    }

    /// Number of live timers across the page.
    pub fn live_count(&self) -> usize {
        self.manager.active_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn owner() -> CarouselId {
        let mut ids: SlotMap<CarouselId, ()> = SlotMap::with_key();
        ids.insert(())
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut timers = CarouselTimers::new();
        let mut autoplay = Autoplay::new(ms(6000));
        let owner = owner();

        assert!(autoplay.start(&mut timers, owner, ms(0)).unwrap());
        assert!(!autoplay.start(&mut timers, owner, ms(0)).unwrap());
        assert_eq!(timers.live_count(), 1);

        let fired = timers.pop_due(ms(6000)).unwrap();
        assert_eq!(timers.owner(fired.id), Some(owner));
        assert!(timers.pop_due(ms(6000)).is_none());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut timers = CarouselTimers::new();
        let mut autoplay = Autoplay::new(ms(6000));
        let owner = owner();

        autoplay.start(&mut timers, owner, ms(0)).unwrap();
        assert!(autoplay.stop(&mut timers));
        assert!(!autoplay.stop(&mut timers));
        assert_eq!(timers.live_count(), 0);
        assert!(timers.pop_due(ms(60_000)).is_none());
    }

    #[test]
    fn test_reset_restarts_countdown() {
        let mut timers = CarouselTimers::new();
        let mut autoplay = Autoplay::new(ms(6000));
        let owner = owner();

        autoplay.start(&mut timers, owner, ms(0)).unwrap();
        autoplay.reset(&mut timers, owner, ms(6500)).unwrap();

        assert_eq!(timers.next_deadline(), Some(ms(12_500)));
        assert_eq!(timers.live_count(), 1);
    }

    #[test]
    fn test_hover_and_focus_both_suspend() {
        let mut timers = CarouselTimers::new();
        let mut autoplay = Autoplay::new(ms(6000));
        let owner = owner();
        autoplay.start(&mut timers, owner, ms(0)).unwrap();

        autoplay.set_hovered(true, &mut timers, owner, ms(10)).unwrap();
        autoplay.set_focused(true, &mut timers, owner, ms(20)).unwrap();
        autoplay.set_hovered(false, &mut timers, owner, ms(30)).unwrap();
        assert!(!autoplay.is_running());

        // Resetting while suspended keeps autoplay stopped.
        autoplay.reset(&mut timers, owner, ms(40)).unwrap();
        assert!(!autoplay.is_running());

        autoplay.set_focused(false, &mut timers, owner, ms(50)).unwrap();
        assert!(autoplay.is_running());
        assert_eq!(timers.next_deadline(), Some(ms(6050)));
    }
}
