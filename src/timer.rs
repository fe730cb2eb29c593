use std::time::{Duration, Instant};

use crate::config::FOOD_TOP_UP_INTERVAL;

/// Repeating deadline, advanced each time it fires.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PeriodicTimer {
    interval: Duration,
    next_due: Instant,
}

impl PeriodicTimer {
    /// Arms a timer whose first deadline is one interval after `now`.
    #[must_use]
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    /// Fires at most once per call. A timer that fell more than one
    /// interval behind re-bases on `now` instead of firing a burst.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }

        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn next_due(&self) -> Instant {
        self.next_due
    }
}

/// Timer handles owned by the controller.
///
/// Periodic timers are only created through [`Timers::reschedule_all`] or
/// [`Timers::reschedule_tick`], which cancel what they replace first, so two
/// cadences of the same kind never run side by side.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    tick: Option<PeriodicTimer>,
    food_top_up: Option<PeriodicTimer>,
    notice_expires_at: Option<Instant>,
}

impl Timers {
    /// Cancels and recreates both periodic timers.
    pub fn reschedule_all(&mut self, tick_interval: Duration, now: Instant) {
        self.cancel_all();
        self.tick = Some(PeriodicTimer::start(tick_interval, now));
        self.food_top_up = Some(PeriodicTimer::start(FOOD_TOP_UP_INTERVAL, now));
        log::debug!("timers rescheduled: tick every {tick_interval:?}");
    }

    /// Cancels and recreates the movement tick only. The food top-up keeps
    /// its own cadence.
    pub fn reschedule_tick(&mut self, tick_interval: Duration, now: Instant) {
        self.tick = Some(PeriodicTimer::start(tick_interval, now));
        log::debug!("tick rescheduled: every {tick_interval:?}");
    }

    /// Cancels both periodic timers. The level-up notice keeps running.
    pub fn cancel_all(&mut self) {
        self.tick = None;
        self.food_top_up = None;
    }

    /// Returns true when the periodic timers are armed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.tick.as_ref().map(PeriodicTimer::interval)
    }

    pub fn tick_due(&mut self, now: Instant) -> bool {
        self.tick.as_mut().is_some_and(|timer| timer.fire_if_due(now))
    }

    pub fn food_top_up_due(&mut self, now: Instant) -> bool {
        self.food_top_up
            .as_mut()
            .is_some_and(|timer| timer.fire_if_due(now))
    }

    /// Arms (or re-arms) the one-shot notice timer.
    pub fn arm_notice(&mut self, duration: Duration, now: Instant) {
        self.notice_expires_at = Some(now + duration);
    }

    pub fn cancel_notice(&mut self) {
        self.notice_expires_at = None;
    }

    /// Returns true once when the notice deadline has passed, then disarms.
    pub fn notice_expired(&mut self, now: Instant) -> bool {
        match self.notice_expires_at {
            Some(deadline) if now >= deadline => {
                self.notice_expires_at = None;
                true
            }
            _ => false,
        }
    }

    /// Earliest armed deadline, used to bound how long the loop waits for input.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.tick.map(|timer| timer.next_due()),
            self.food_top_up.map(|timer| timer.next_due()),
            self.notice_expires_at,
        ]
        .into_iter()
        .flatten()
        .min()
    }
}
