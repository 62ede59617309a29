// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The run loop: participant registry, message bus and before-each hook
//!
//! A [`Scheduler`] is a cheap handle onto one loop context. Clones share the
//! same state, so participants can keep a handle and hook or unhook others
//! while the loop is ticking. The handle is `!Send`: a host that wants other
//! threads to influence the loop must marshal those calls onto the loop's
//! thread itself.

mod bus;
mod nuke;
mod registry;

pub use bus::{Callback, Topic};
pub use nuke::NukeFlags;

use crate::clock::{Clock, Stopwatch, SystemClock};
use crate::error::SchedulerError;
use crate::schedulable::{ScheduleKey, Schedulable};
use bus::MessageBus;
use registry::Registry;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Per-iteration figures passed to the [`Scheduler::debug`] hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopMetrics {
    /// Wall time since the previous iteration's after-each hook
    pub loop_time: Duration,
    pub active_schedulables: usize,
    /// Distinct topics with at least one subscriber
    pub subscribed_topics: usize,
}

struct Inner {
    registry: RefCell<Registry>,
    bus: RefCell<MessageBus>,
    before_each: RefCell<Callback>,
}

fn noop() -> Callback {
    Rc::new(|| {})
}

/// Handle onto a single-threaded run loop context
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<Inner>,
}

/// Non-owning handle, held by participants so that a registered
/// participant does not keep its own scheduler alive
#[derive(Clone, Default)]
pub struct WeakScheduler {
    inner: Weak<Inner>,
}

impl WeakScheduler {
    pub fn upgrade(&self) -> Option<Scheduler> {
        self.inner.upgrade().map(|inner| Scheduler { inner })
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("active", &self.active_count())
            .field("topics", &self.topic_count())
            .finish()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                registry: RefCell::new(Registry::default()),
                bus: RefCell::new(MessageBus::default()),
                before_each: RefCell::new(noop()),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakScheduler {
        WeakScheduler {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Stage a participant for registration at the next iteration boundary.
    /// Hooking the same participant twice is idempotent.
    pub fn hook(&self, schedulable: Rc<dyn Schedulable>) {
        self.inner.registry.borrow_mut().stage_add(schedulable);
    }

    /// Stage a participant for removal at the next iteration boundary.
    /// Unhooking something neither hooked nor staged is a no-op, and does
    /// not affect a later hook.
    pub fn unhook(&self, schedulable: &dyn Schedulable) {
        self.unhook_key(ScheduleKey::of(schedulable));
    }

    pub fn unhook_key(&self, key: ScheduleKey) {
        self.inner.registry.borrow_mut().stage_remove(key);
    }

    /// Whether the participant is in the committed active set
    pub fn is_hooked(&self, schedulable: &dyn Schedulable) -> bool {
        self.inner
            .registry
            .borrow()
            .is_active(ScheduleKey::of(schedulable))
    }

    /// Subscribe `callback` to `topic`, after any existing subscribers
    pub fn on(&self, topic: impl Into<Topic>, callback: impl Fn() + 'static) {
        self.inner
            .bus
            .borrow_mut()
            .subscribe(topic.into(), Rc::new(callback));
    }

    /// Run every subscriber of `topic` in subscription order.
    ///
    /// Subscribers added while the topic is being emitted are not run by
    /// this emission.
    pub fn emit(&self, topic: impl Into<Topic>) {
        let topic = topic.into();
        let subscribers = self.inner.bus.borrow().subscribers(&topic);
        tracing::trace!(%topic, subscribers = subscribers.len(), "emit");
        for callback in subscribers {
            callback();
        }
    }

    /// Replace the hook run at the start of every iteration
    pub fn before_each(&self, callback: impl Fn() + 'static) {
        *self.inner.before_each.borrow_mut() = Rc::new(callback);
    }

    /// Run the loop until `keep_running` returns false.
    ///
    /// Emits [`Topic::Starting`] once, then per iteration: commits staged
    /// registry changes, runs the before-each hook, ticks every active
    /// participant, and runs `after_each`.
    pub fn launch(&self, mut keep_running: impl FnMut() -> bool, mut after_each: impl FnMut()) {
        tracing::info!(active = self.active_count(), "run loop starting");
        self.emit(Topic::Starting);

        let mut iterations = 0u64;
        while keep_running() {
            self.step();
            after_each();
            iterations += 1;
        }

        tracing::info!(iterations, "run loop finished");
    }

    /// [`launch`](Self::launch) without an after-each hook
    pub fn run_manually(&self, keep_running: impl FnMut() -> bool) {
        self.launch(keep_running, || {});
    }

    /// [`launch`](Self::launch), passing loop metrics to `after_each`
    pub fn debug(&self, keep_running: impl FnMut() -> bool, after_each: impl FnMut(LoopMetrics)) {
        self.debug_with(SystemClock, keep_running, after_each);
    }

    /// [`debug`](Self::debug) measured against the given clock
    pub fn debug_with<C: Clock>(
        &self,
        clock: C,
        keep_running: impl FnMut() -> bool,
        mut after_each: impl FnMut(LoopMetrics),
    ) {
        let mut stopwatch = Stopwatch::start(clock);
        self.launch(keep_running, || {
            let metrics = LoopMetrics {
                loop_time: stopwatch.lap(),
                active_schedulables: self.active_count(),
                subscribed_topics: self.topic_count(),
            };
            after_each(metrics);
        });
    }

    /// One iteration without after-each, for hosts driving their own loop
    pub fn step(&self) {
        self.commit();

        let before_each = Rc::clone(&self.inner.before_each.borrow());
        before_each();

        let snapshot = self.inner.registry.borrow().snapshot();
        for schedulable in snapshot {
            schedulable.tick(self);
        }
    }

    /// Clear the requested categories of state.
    ///
    /// Flags are validated before anything is touched. Staged registry
    /// changes are committed first, so a participant hooked in the current
    /// iteration is destroyed too.
    pub fn nuke(&self, flags: NukeFlags) -> Result<(), SchedulerError> {
        let flags = flags.validate()?;
        self.commit();

        if flags.contains(NukeFlags::SCHEDULABLES) {
            let drained = self.inner.registry.borrow_mut().drain_active();
            let keys: Vec<ScheduleKey> = drained.iter().map(|s| ScheduleKey::of(&**s)).collect();
            for schedulable in &drained {
                schedulable.destroy();
            }
            self.inner.registry.borrow_mut().discard_removals(&keys);
            tracing::debug!(destroyed = drained.len(), "nuked schedulables");
        }

        if flags.contains(NukeFlags::MESSAGES) {
            self.inner.bus.borrow_mut().clear();
            tracing::debug!("nuked messages");
        }

        if flags.contains(NukeFlags::BEFORE_EACH) {
            *self.inner.before_each.borrow_mut() = noop();
            tracing::debug!("nuked before-each hook");
        }

        Ok(())
    }

    pub fn active_count(&self) -> usize {
        self.inner.registry.borrow().active_len()
    }

    pub fn topic_count(&self) -> usize {
        self.inner.bus.borrow().topic_count()
    }

    /// Whether staged registry changes are waiting for the next iteration
    pub fn has_pending_changes(&self) -> bool {
        self.inner.registry.borrow().has_pending()
    }

    fn commit(&self) {
        let commit = self.inner.registry.borrow_mut().commit();
        if !commit.is_empty() {
            tracing::debug!(
                added = commit.added,
                removed = commit.removed,
                active = self.active_count(),
                "registry committed"
            );
        }
    }
}
