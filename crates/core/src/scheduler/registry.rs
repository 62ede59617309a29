// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Double-buffered set of active participants

use crate::schedulable::{ScheduleKey, Schedulable};
use std::rc::Rc;

pub(crate) type Entry = Rc<dyn Schedulable>;

/// Counts of changes applied by a commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Commit {
    pub added: usize,
    pub removed: usize,
}

impl Commit {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Active participants plus staged additions and removals.
///
/// Staged changes only reach `active` through [`commit`](Registry::commit),
/// which the scheduler calls at iteration boundaries. Active order is
/// insertion order.
#[derive(Default)]
pub(crate) struct Registry {
    active: Vec<Entry>,
    pending_add: Vec<Entry>,
    pending_remove: Vec<ScheduleKey>,
}

fn key(entry: &Entry) -> ScheduleKey {
    ScheduleKey::of(&**entry)
}

impl Registry {
    pub fn stage_add(&mut self, entry: Entry) {
        let k = key(&entry);
        if !self.pending_add.iter().any(|e| key(e) == k) {
            self.pending_add.push(entry);
        }
    }

    /// Stage removal of a participant that is active or staged for adding.
    ///
    /// Unknown keys are ignored; their address may later belong to another
    /// participant.
    pub fn stage_remove(&mut self, k: ScheduleKey) {
        let known = self.is_active(k) || self.pending_add.iter().any(|e| key(e) == k);
        if known && !self.pending_remove.contains(&k) {
            self.pending_remove.push(k);
        }
    }

    /// Merge staged additions, then staged removals
    pub fn commit(&mut self) -> Commit {
        let mut commit = Commit::default();

        for entry in self.pending_add.drain(..) {
            let k = key(&entry);
            if !self.active.iter().any(|e| key(e) == k) {
                self.active.push(entry);
                commit.added += 1;
            }
        }

        if !self.pending_remove.is_empty() {
            let before = self.active.len();
            let removals = std::mem::take(&mut self.pending_remove);
            self.active.retain(|e| !removals.contains(&key(e)));
            commit.removed = before - self.active.len();
        }

        commit
    }

    /// Clone of the active set, fixed for one iteration
    pub fn snapshot(&self) -> Vec<Entry> {
        self.active.clone()
    }

    /// Remove every active entry, returning them
    pub fn drain_active(&mut self) -> Vec<Entry> {
        std::mem::take(&mut self.active)
    }

    /// Forget staged removals for the given keys
    pub fn discard_removals(&mut self, keys: &[ScheduleKey]) {
        self.pending_remove.retain(|k| !keys.contains(k));
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, k: ScheduleKey) -> bool {
        self.active.iter().any(|e| key(e) == k)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_add.is_empty() || !self.pending_remove.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
