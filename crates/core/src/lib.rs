// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! smith-core: cooperative single-threaded run loop and temporal triggers
//!
//! This crate provides:
//! - `Scheduler` - the run loop, a participant registry with deferred
//!   hook/unhook, a topic message bus and bulk resets
//! - `On` / `Trigger` - a staged builder and state machine that turns a
//!   boolean condition into streak, occurrence and extension-window firings
//! - `EdgeDetector`, `Listener`, `Timer`, `Pulsar` - edge-driven building blocks

pub mod clock;
pub mod edge;
pub mod error;
pub mod listeners;
pub mod run_once;
pub mod schedulable;
pub mod scheduler;
pub mod trigger;

// Re-exports
pub use clock::{Clock, FakeClock, Stopwatch, SystemClock};
pub use edge::EdgeDetector;
pub use error::{SchedulerError, TriggerError};
pub use listeners::{after, after_on, Listener, Pulsar, Timer};
pub use run_once::{run_once, RunOnce};
pub use schedulable::{ScheduleKey, Schedulable};
pub use scheduler::{Callback, LoopMetrics, NukeFlags, Scheduler, Topic, WeakScheduler};
pub use trigger::{
    Every, EveryNth, ExtendFor, Extended, Firing, FiringRule, On, Sense, Shaped, TheNth, Trigger,
    TriggerState,
};
