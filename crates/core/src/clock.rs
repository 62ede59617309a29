// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for time-bounded extensions, timers and loop metrics

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A clock that provides the current time
pub trait Clock: Clone + 'static {
    fn now(&self) -> Instant;

    /// Time elapsed since `earlier`, saturating at zero
    fn since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Fake clock for testing with controllable time.
///
/// Clones share one reading. Like the scheduler it drives, it is `!Send`.
#[derive(Debug, Clone)]
pub struct FakeClock {
    current: Rc<Cell<Instant>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        self.current.set(self.current.get() + duration);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.current.get()
    }
}

/// Measures the time between successive laps
#[derive(Debug, Clone)]
pub struct Stopwatch<C: Clock> {
    clock: C,
    started: Instant,
}

impl<C: Clock> Stopwatch<C> {
    pub fn start(clock: C) -> Self {
        let started = clock.now();
        Self { clock, started }
    }

    /// Time since the last lap (or start), then restart
    pub fn lap(&mut self) -> Duration {
        let now = self.clock.now();
        let elapsed = now.saturating_duration_since(self.started);
        self.started = now;
        elapsed
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.since(self.started)
    }

    pub fn reset(&mut self) {
        self.started = self.clock.now();
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
