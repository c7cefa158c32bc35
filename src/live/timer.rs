use std::time::{Duration, Instant};

/// Timer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    /// Ticking; the next tick is due at `next_due`.
    Running {
        /// Deadline of the next tick.
        next_due: Instant,
    },
    /// Stopped until resumed.
    Suspended,
}

/// Fixed-period tick source.
///
/// At most one tick is reported per [`LiveTimer::poll`], and missed periods are not replayed, so
/// ticks never overlap or pile up.
#[derive(Clone, Debug)]
pub struct LiveTimer {
    period: Duration,
    state: TimerState,
}

impl LiveTimer {
    /// Start running, first tick one period after `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            state: TimerState::Running {
                next_due: now + period,
            },
        }
    }

    /// Period from a millisecond interval; non-finite or sub-millisecond values clamp to 1 ms.
    pub fn period_from_ms(ms: f64) -> Duration {
        let ms = if ms.is_finite() { ms.max(1.0) } else { 1.0 };
        Duration::from_secs_f64(ms / 1000.0)
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Current state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Whether the timer is ticking.
    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Replace the period, restarting the countdown when running.
    pub fn set_period(&mut self, period: Duration, now: Instant) {
        self.period = period;
        if self.is_running() {
            self.state = TimerState::Running {
                next_due: now + period,
            };
        }
    }

    /// Stop ticking.
    pub fn suspend(&mut self) {
        if self.is_running() {
            tracing::debug!("timer suspended");
        }
        self.state = TimerState::Suspended;
    }

    /// Resume ticking one period after `now`. No-op when already running.
    pub fn resume(&mut self, now: Instant) {
        if !self.is_running() {
            tracing::debug!(period_ms = self.period.as_secs_f64() * 1000.0, "timer resumed");
            self.state = TimerState::Running {
                next_due: now + self.period,
            };
        }
    }

    /// Return `true` if a tick is due at `now`, scheduling the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            TimerState::Running { next_due } if now >= next_due => {
                self.state = TimerState::Running {
                    next_due: now + self.period,
                };
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, or `None` while suspended.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            TimerState::Running { next_due } => Some(next_due.saturating_duration_since(now)),
            TimerState::Suspended => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/live/timer.rs"]
mod tests;
