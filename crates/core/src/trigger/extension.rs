// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extension predicates
//!
//! An extension predicate receives `(satisfied, tick)` every tick and
//! answers whether a firing may be extended on that tick. The windowed
//! forms restart their window on the tick the base condition lapses.

use super::machine::ExtensionFn;
use crate::clock::Clock;
use std::time::{Duration, Instant};

pub(crate) fn never() -> ExtensionFn {
    Box::new(|_, _| false)
}

/// Extend for `iterations` ticks after the base condition lapses
pub(crate) fn for_iterations(iterations: u64) -> ExtensionFn {
    let mut window_start = 0u64;
    let mut was_satisfied = true;
    Box::new(move |satisfied, tick| {
        if !satisfied && was_satisfied {
            window_start = tick;
        }
        was_satisfied = satisfied;
        tick.saturating_sub(window_start) < iterations
    })
}

/// Extend for `window` of clock time after the base condition lapses
pub(crate) fn for_duration<C: Clock>(clock: C, window: Duration) -> ExtensionFn {
    let mut window_start: Option<Instant> = None;
    let mut was_satisfied = true;
    Box::new(move |satisfied, _| {
        if !satisfied && was_satisfied {
            window_start = Some(clock.now());
        }
        was_satisfied = satisfied;
        match window_start {
            Some(start) => clock.since(start) < window,
            None => false,
        }
    })
}

/// Extend until `stop` holds
pub(crate) fn until(mut stop: impl FnMut(bool, u64) -> bool + 'static) -> ExtensionFn {
    Box::new(move |satisfied, tick| !stop(satisfied, tick))
}

/// Extend while `keep` holds
pub(crate) fn during(keep: impl FnMut(bool, u64) -> bool + 'static) -> ExtensionFn {
    Box::new(keep)
}
