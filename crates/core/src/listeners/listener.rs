// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener: callbacks on the edges and levels of a condition

use crate::edge::EdgeDetector;
use crate::scheduler::{Callback, Scheduler, WeakScheduler};
use crate::schedulable::{ScheduleKey, Schedulable};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Signal = Box<dyn FnMut() -> bool>;

#[derive(Default)]
struct Callbacks {
    rise: Vec<Callback>,
    fall: Vec<Callback>,
    high: Vec<Callback>,
    low: Vec<Callback>,
}

impl Callbacks {
    fn clear(&mut self) {
        self.rise.clear();
        self.fall.clear();
        self.high.clear();
        self.low.clear();
    }

    fn len(&self) -> usize {
        self.rise.len() + self.fall.len() + self.high.len() + self.low.len()
    }
}

struct ListenerCore {
    edges: RefCell<EdgeDetector<Signal>>,
    callbacks: RefCell<Callbacks>,
    destroyed: Cell<bool>,
    scheduler: WeakScheduler,
}

impl Schedulable for ListenerCore {
    fn tick(&self, _scheduler: &Scheduler) {
        if self.destroyed.get() {
            return;
        }

        let (rising, falling, high) = {
            let mut edges = self.edges.borrow_mut();
            edges.update();
            (edges.rising_edge(), edges.falling_edge(), edges.is_high())
        };

        let due: Vec<Callback> = {
            let callbacks = self.callbacks.borrow();
            let mut due = Vec::new();
            if rising {
                due.extend(callbacks.rise.iter().cloned());
            }
            if falling {
                due.extend(callbacks.fall.iter().cloned());
            }
            let level = if high { &callbacks.high } else { &callbacks.low };
            due.extend(level.iter().cloned());
            due
        };

        for callback in due {
            callback();
        }
    }

    fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        self.callbacks.borrow_mut().clear();
        if let Some(scheduler) = self.scheduler.upgrade() {
            scheduler.unhook_key(ScheduleKey::of(self));
        }
    }
}

/// Runs callbacks when a condition rises, falls, or while it is high or low.
///
/// Per tick the order is: rise, fall, then high or low.
#[derive(Clone)]
pub struct Listener {
    core: Rc<ListenerCore>,
}

impl Listener {
    /// Create a listener and hook it into `scheduler`
    pub fn new(scheduler: &Scheduler, condition: impl FnMut() -> bool + 'static) -> Self {
        let signal: Signal = Box::new(condition);
        let core = Rc::new(ListenerCore {
            edges: RefCell::new(EdgeDetector::new(signal)),
            callbacks: RefCell::new(Callbacks::default()),
            destroyed: Cell::new(false),
            scheduler: scheduler.downgrade(),
        });
        Rc::clone(&core).hook(scheduler);
        Self { core }
    }

    pub fn on_rise(self, callback: impl Fn() + 'static) -> Self {
        self.push(|c| &mut c.rise, callback)
    }

    pub fn on_fall(self, callback: impl Fn() + 'static) -> Self {
        self.push(|c| &mut c.fall, callback)
    }

    pub fn while_high(self, callback: impl Fn() + 'static) -> Self {
        self.push(|c| &mut c.high, callback)
    }

    pub fn while_low(self, callback: impl Fn() + 'static) -> Self {
        self.push(|c| &mut c.low, callback)
    }

    fn push(
        self,
        list: impl FnOnce(&mut Callbacks) -> &mut Vec<Callback>,
        callback: impl Fn() + 'static,
    ) -> Self {
        if !self.core.destroyed.get() {
            list(&mut self.core.callbacks.borrow_mut()).push(Rc::new(callback));
        }
        self
    }

    /// Evaluate the condition now, outside the tick cycle
    pub fn condition(&self) -> bool {
        self.core.edges.borrow_mut().peek()
    }

    pub fn destroy(&self) {
        self.core.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.core.destroyed.get()
    }

    pub fn callback_count(&self) -> usize {
        self.core.callbacks.borrow().len()
    }

    /// Handle that does not keep the listener or its callbacks alive
    pub(crate) fn downgrade(&self) -> WeakListener {
        WeakListener {
            core: Rc::downgrade(&self.core),
        }
    }
}

/// Non-owning [`Listener`] handle, for callbacks that refer to their own listener
pub(crate) struct WeakListener {
    core: Weak<ListenerCore>,
}

impl WeakListener {
    /// Destroy the listener if it is still alive
    pub fn destroy(&self) {
        if let Some(core) = self.core.upgrade() {
            core.destroy();
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
