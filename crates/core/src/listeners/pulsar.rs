// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic pulses

use super::Listener;
use crate::clock::{Clock, SystemClock};
use crate::scheduler::Scheduler;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Fires its pulse callbacks on the first tick after each `interval`
#[derive(Clone)]
pub struct Pulsar {
    listener: Listener,
}

impl Pulsar {
    pub fn new(scheduler: &Scheduler, interval: Duration) -> Self {
        Self::with_clock(scheduler, SystemClock, interval)
    }

    pub fn with_clock<C: Clock>(scheduler: &Scheduler, clock: C, interval: Duration) -> Self {
        let last_pulse = Rc::new(Cell::new(clock.now()));

        let (watched, watch_clock) = (Rc::clone(&last_pulse), clock.clone());
        let listener = Listener::new(scheduler, move || watch_clock.since(watched.get()) > interval)
            .on_rise(move || last_pulse.set(clock.now()));

        Self { listener }
    }

    pub fn on_pulse(self, callback: impl Fn() + 'static) -> Self {
        Self {
            listener: self.listener.on_rise(callback),
        }
    }

    pub fn destroy(&self) {
        self.listener.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;

    #[test]
    fn pulses_once_per_elapsed_interval() {
        let scheduler = Scheduler::new();
        let clock = FakeClock::new();
        let pulses = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulses);
        Pulsar::with_clock(&scheduler, clock.clone(), Duration::from_millis(250))
            .on_pulse(move || counter.set(counter.get() + 1));

        // 100ms per iteration: elapsed exceeds 250ms on the 3rd, 6th and 9th
        for _ in 0..9 {
            clock.advance(Duration::from_millis(100));
            scheduler.step();
        }

        assert_eq!(pulses.get(), 3);
    }

    #[test]
    fn destroyed_pulsar_stops() {
        let scheduler = Scheduler::new();
        let clock = FakeClock::new();
        let pulses = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulses);
        let pulsar = Pulsar::with_clock(&scheduler, clock.clone(), Duration::from_millis(10))
            .on_pulse(move || counter.set(counter.get() + 1));

        pulsar.destroy();
        for _ in 0..5 {
            clock.advance(Duration::from_millis(50));
            scheduler.step();
        }

        assert_eq!(pulses.get(), 0);
        assert_eq!(scheduler.active_count(), 0);
    }
}
