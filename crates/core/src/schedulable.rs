// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The contract every participant of the run loop implements

use crate::scheduler::Scheduler;
use std::rc::Rc;

/// Something the scheduler drives once per loop iteration.
///
/// Methods take `&self`: implementors keep their mutable state behind
/// `Cell`/`RefCell` so that a tick may hook or unhook other participants
/// (or itself) through the scheduler handle without aliasing conflicts.
pub trait Schedulable {
    /// Advance one iteration
    fn tick(&self, scheduler: &Scheduler);

    /// Release callbacks and unhook. Must be idempotent.
    fn destroy(&self);

    /// Stage this participant for registration on `scheduler`
    fn hook(self: Rc<Self>, scheduler: &Scheduler)
    where
        Self: Sized + 'static,
    {
        scheduler.hook(self);
    }
}

/// Identity of a registered participant, derived from its allocation.
///
/// Two handles compare equal exactly when they point at the same value,
/// which makes hooking idempotent and lets a participant unhook itself
/// from inside `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleKey(usize);

impl ScheduleKey {
    pub fn of<S: Schedulable + ?Sized>(schedulable: &S) -> Self {
        Self(schedulable as *const S as *const () as usize)
    }
}
