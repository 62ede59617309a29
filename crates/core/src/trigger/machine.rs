// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger state machine
//!
//! A trigger watches a boolean condition once per tick and fires its actions
//! when the firing rule is met: the condition has qualified on `N` ticks
//! since the last firing, the resulting satisfied streak is past the offset
//! and (optionally) is exactly the selected occurrence. After a firing an
//! extension predicate may keep it firing for a while after the condition
//! lapses.

use crate::scheduler::{Scheduler, WeakScheduler};
use crate::schedulable::{ScheduleKey, Schedulable};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub(crate) type Condition = Box<dyn FnMut() -> bool>;
pub(crate) type ExtensionFn = Box<dyn FnMut(bool, u64) -> bool>;
pub(crate) type UntilFn = Box<dyn FnMut(u64) -> bool>;
pub(crate) type Action = Rc<dyn Fn()>;

/// Static part of the firing rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiringRule {
    /// Qualifying ticks needed before the base condition is satisfied
    pub required_streak: u32,
    /// Satisfied streaks ignored before the trigger goes live
    pub offset: u32,
    /// Fire only on this satisfied streak (counted after the offset)
    pub occurrence: Option<u32>,
}

impl Default for FiringRule {
    fn default() -> Self {
        Self {
            required_streak: 1,
            offset: 0,
            occurrence: None,
        }
    }
}

impl FiringRule {
    /// Whether the `count`th satisfied streak may fire
    pub fn selects(&self, count: u64) -> bool {
        if count <= u64::from(self.offset) {
            return false;
        }
        match self.occurrence {
            Some(k) => count - u64::from(self.offset) == u64::from(k),
            None => true,
        }
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Firing {
    /// Nothing happened
    Idle,
    /// The base condition was satisfied but the streak was not selected
    Skipped,
    /// Fired because the base condition was satisfied
    Base,
    /// Fired inside an extension window
    Extended,
}

impl Firing {
    pub fn fired(self) -> bool {
        matches!(self, Firing::Base | Firing::Extended)
    }
}

/// Runtime bookkeeping of a trigger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerState {
    pub total_ticks: u64,
    /// Qualifying ticks since the last base firing or skipped streak
    pub true_streak: u32,
    pub satisfied_streaks: u64,
    /// Set by a firing tick; an extension may only apply while armed
    pub extension_armed: bool,
}

impl TriggerState {
    /// Advance by one tick given this tick's condition value.
    ///
    /// `extension` is consulted every tick (so stateful windows observe
    /// every transition) with whether the base condition is satisfied and
    /// the updated tick count.
    pub fn advance(
        &mut self,
        rule: &FiringRule,
        condition: bool,
        extension: &mut dyn FnMut(bool, u64) -> bool,
    ) -> Firing {
        self.total_ticks += 1;
        if condition {
            self.true_streak = self.true_streak.saturating_add(1);
        }

        let satisfied = condition && self.true_streak >= rule.required_streak;
        let available = extension(satisfied, self.total_ticks);
        let extends = self.extension_armed && available;

        if !satisfied {
            if extends {
                return Firing::Extended;
            }
            self.extension_armed = false;
            return Firing::Idle;
        }

        self.satisfied_streaks += 1;
        self.true_streak = 0;

        if !rule.selects(self.satisfied_streaks) {
            if extends {
                return Firing::Extended;
            }
            self.extension_armed = false;
            return Firing::Skipped;
        }

        self.extension_armed = true;
        Firing::Base
    }
}

/// Shared core of a trigger; registered with the scheduler
pub(crate) struct TriggerCore {
    rule: FiringRule,
    condition: RefCell<Condition>,
    extension: RefCell<ExtensionFn>,
    until: RefCell<UntilFn>,
    state: Cell<TriggerState>,
    actions: RefCell<Vec<Action>>,
    destroyed: Cell<bool>,
    scheduler: WeakScheduler,
}

impl TriggerCore {
    fn fire(&self) {
        let actions = self.actions.borrow().clone();
        for action in actions {
            action();
        }
    }
}

impl Schedulable for TriggerCore {
    fn tick(&self, _scheduler: &Scheduler) {
        if self.destroyed.get() {
            return;
        }

        let tick_index = self.state.get().total_ticks;
        let expired = {
            let mut until = self.until.borrow_mut();
            (*until)(tick_index)
        };
        if expired {
            tracing::debug!(tick_index, "trigger reached its until condition");
            self.destroy();
            return;
        }

        let condition = {
            let mut condition = self.condition.borrow_mut();
            (*condition)()
        };
        let mut state = self.state.get();
        let firing = {
            let mut extension = self.extension.borrow_mut();
            state.advance(&self.rule, condition, &mut **extension)
        };
        self.state.set(state);

        if firing.fired() {
            tracing::trace!(tick = state.total_ticks, ?firing, "trigger fired");
            self.fire();
        }
    }

    fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        self.actions.borrow_mut().clear();
        if let Some(scheduler) = self.scheduler.upgrade() {
            scheduler.unhook_key(ScheduleKey::of(self));
        }
    }
}

/// Handle to a built trigger.
///
/// The trigger is registered with its scheduler when built and stays
/// registered until destroyed, until its until-condition holds, or until
/// the scheduler's schedulables are nuked.
#[derive(Clone)]
pub struct Trigger {
    core: Rc<TriggerCore>,
}

impl Trigger {
    pub(crate) fn spawn(
        scheduler: &Scheduler,
        rule: FiringRule,
        condition: Condition,
        extension: ExtensionFn,
        until: UntilFn,
    ) -> Self {
        let core = Rc::new(TriggerCore {
            rule,
            condition: RefCell::new(condition),
            extension: RefCell::new(extension),
            until: RefCell::new(until),
            state: Cell::new(TriggerState::default()),
            actions: RefCell::new(Vec::new()),
            destroyed: Cell::new(false),
            scheduler: scheduler.downgrade(),
        });
        Rc::clone(&core).hook(scheduler);
        tracing::debug!(?rule, "trigger hooked");
        Self { core }
    }

    /// Attach an action run on every firing tick, after those already attached
    pub fn execute(self, action: impl Fn() + 'static) -> Self {
        if !self.core.destroyed.get() {
            self.core.actions.borrow_mut().push(Rc::new(action));
        }
        self
    }

    /// Unhook and drop all actions. Calling this again has no effect.
    pub fn destroy(&self) {
        self.core.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.core.destroyed.get()
    }

    pub fn rule(&self) -> FiringRule {
        self.core.rule
    }

    pub fn state(&self) -> TriggerState {
        self.core.state.get()
    }

    pub fn action_count(&self) -> usize {
        self.core.actions.borrow().len()
    }

    /// Whether this trigger is in its scheduler's committed active set
    pub fn is_hooked(&self) -> bool {
        self.core
            .scheduler
            .upgrade()
            .is_some_and(|scheduler| scheduler.is_hooked(&*self.core))
    }
}

impl std::fmt::Debug for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trigger")
            .field("rule", &self.core.rule)
            .field("state", &self.core.state.get())
            .field("actions", &self.action_count())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
