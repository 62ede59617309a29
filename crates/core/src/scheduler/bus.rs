// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Topic-keyed message bus

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A shared callback with no arguments
pub type Callback = Rc<dyn Fn()>;

/// Key identifying a one-to-many notification channel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Emitted once when a run loop starts, before the first tick
    Starting,
    Named(Cow<'static, str>),
    Id(u64),
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Starting => write!(f, "starting"),
            Topic::Named(name) => write!(f, "{}", name),
            Topic::Id(id) => write!(f, "#{}", id),
        }
    }
}

impl From<&'static str> for Topic {
    fn from(name: &'static str) -> Self {
        Topic::Named(Cow::Borrowed(name))
    }
}

impl From<String> for Topic {
    fn from(name: String) -> Self {
        Topic::Named(Cow::Owned(name))
    }
}

impl From<u64> for Topic {
    fn from(id: u64) -> Self {
        Topic::Id(id)
    }
}

/// Routes emitted topics to their subscribers in subscription order
#[derive(Default)]
pub(crate) struct MessageBus {
    topics: HashMap<Topic, Vec<Callback>>,
}

impl MessageBus {
    pub fn subscribe(&mut self, topic: Topic, callback: Callback) {
        self.topics.entry(topic).or_default().push(callback);
    }

    /// Current subscribers of `topic`, detached from the bus so callbacks
    /// may subscribe or clear while the list is being run
    pub fn subscribers(&self, topic: &Topic) -> Vec<Callback> {
        self.topics.get(topic).cloned().unwrap_or_default()
    }

    /// Number of distinct topics with at least one subscriber
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn clear(&mut self) {
        self.topics.clear();
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
