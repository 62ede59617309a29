// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Countdown timer built on listeners

use super::Listener;
use crate::clock::{Clock, SystemClock};
use crate::run_once::run_once;
use crate::scheduler::Scheduler;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

struct Countdown<C: Clock> {
    clock: C,
    length: Duration,
    deadline: Cell<Instant>,
    pending: Cell<bool>,
}

impl<C: Clock> Countdown<C> {
    fn elapsed(&self) -> bool {
        self.clock.now() >= self.deadline.get()
    }
}

/// A timer that runs callbacks while waiting, while running and once done.
///
/// A pending timer is never done, even after its deadline passes, until it
/// is started or un-pended.
#[derive(Clone)]
pub struct Timer<C: Clock = SystemClock> {
    countdown: Rc<Countdown<C>>,
    done: Listener,
    running: Listener,
}

impl Timer<SystemClock> {
    pub fn new(scheduler: &Scheduler, length: Duration) -> Self {
        Self::with_clock(scheduler, SystemClock, length, false)
    }

    pub fn pending(scheduler: &Scheduler, length: Duration) -> Self {
        Self::with_clock(scheduler, SystemClock, length, true)
    }
}

impl<C: Clock> Timer<C> {
    /// Create a timer counting from now on `clock`
    pub fn with_clock(scheduler: &Scheduler, clock: C, length: Duration, start_pending: bool) -> Self {
        let countdown = Rc::new(Countdown {
            deadline: Cell::new(clock.now() + length),
            clock,
            length,
            pending: Cell::new(start_pending),
        });

        let watched = Rc::clone(&countdown);
        let done = Listener::new(scheduler, move || !watched.pending.get() && watched.elapsed());

        let watched = Rc::clone(&countdown);
        let running = Listener::new(scheduler, move || watched.elapsed());

        Self {
            countdown,
            done,
            running,
        }
    }

    /// Run `callback` every tick while the timer is pending or running
    pub fn while_waiting(self, callback: impl Fn() + 'static) -> Self {
        Self {
            done: self.done.while_low(callback),
            ..self
        }
    }

    /// Run `callback` every tick until the deadline, pending or not
    pub fn while_running(self, callback: impl Fn() + 'static) -> Self {
        Self {
            running: self.running.while_low(callback),
            ..self
        }
    }

    /// Run `callback` once when the timer finishes
    pub fn on_done(self, callback: impl Fn() + 'static) -> Self {
        Self {
            done: self.done.on_rise(callback),
            ..self
        }
    }

    /// Start the timer, or restart it if already running
    pub fn start(&self) {
        self.countdown.pending.set(false);
        self.countdown
            .deadline
            .set(self.countdown.clock.now() + self.countdown.length);
    }

    /// Move the deadline to now
    pub fn finish_prematurely(&self) {
        self.countdown.deadline.set(self.countdown.clock.now());
    }

    pub fn set_pending(&self, pending: bool) {
        self.countdown.pending.set(pending);
    }

    pub fn is_done(&self) -> bool {
        self.done.condition()
    }

    /// Pend the timer and unhook it
    pub fn destroy(&self) {
        self.countdown.pending.set(true);
        self.done.destroy();
        self.running.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.done.is_destroyed()
    }

    /// [`destroy`](Self::destroy) through weak handles, for the timer's own callbacks
    fn teardown(&self) -> impl Fn() + 'static {
        let countdown = Rc::downgrade(&self.countdown);
        let done = self.done.downgrade();
        let running = self.running.downgrade();
        move || {
            if let Some(countdown) = countdown.upgrade() {
                countdown.pending.set(true);
            }
            done.destroy();
            running.destroy();
        }
    }
}

/// Run `callback` once, `delay` from now, then tear the timer down
pub fn after(scheduler: &Scheduler, delay: Duration, callback: impl FnOnce() + 'static) -> Timer {
    after_on(scheduler, SystemClock, delay, callback)
}

/// [`after`] measured on `clock`
pub fn after_on<C: Clock>(
    scheduler: &Scheduler,
    clock: C,
    delay: Duration,
    callback: impl FnOnce() + 'static,
) -> Timer<C> {
    let callback = RefCell::new(run_once(callback));
    let timer = Timer::with_clock(scheduler, clock, delay, false).on_done(move || {
        callback.borrow_mut().call();
    });

    let teardown = timer.teardown();
    let timer = timer.on_done(teardown);
    timer.start();
    timer
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
