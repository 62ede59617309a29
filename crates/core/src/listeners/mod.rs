// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Edge-driven participants: listeners, timers and pulsars

mod listener;
mod pulsar;
mod timer;

pub use listener::Listener;
pub use pulsar::Pulsar;
pub use timer::{after, after_on, Timer};
