// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Staged trigger builder
//!
//! Each stage is its own type and exposes only the steps that are legal
//! next, so an extension can't be requested before the edge/level and the
//! streak are chosen:
//!
//! ```text
//! On ─┬─ every() ─ single|other|third|nth(n) ──┐
//!     ├─ the_first|the_second|the_third|the_nth(k)
//!     │                                         ├─ time_being_true|false
//!     │                                         └─ time_becoming_true|false ─┐
//!     └─ being_true|being_false|becoming_true|becoming_false ────────────────┤
//!                                                                            │
//!   Shaped ─ [with_offset(k)] ─┬─ extend_for(x) ─ iterations|milliseconds|seconds|time
//!                              ├─ do_until(p) | do_while(p)
//!                              └─ until(p) | forever()  ─>  Trigger ─ execute(action)*
//! ```
//!
//! Stages consume themselves, so a stage can't be reused after it has been
//! refined.

use super::extension;
use super::machine::{Condition, ExtensionFn, FiringRule, Trigger, UntilFn};
use crate::clock::{Clock, SystemClock};
use crate::edge::EdgeDetector;
use crate::error::TriggerError;
use crate::scheduler::Scheduler;
use std::time::Duration;

/// Which aspect of the condition counts as a qualifying tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// The condition is true
    High,
    /// The condition is false
    Low,
    /// The condition went from false to true
    Rising,
    /// The condition went from true to false
    Falling,
}

fn sensed(condition: Condition, sense: Sense) -> Condition {
    let mut condition = condition;
    match sense {
        Sense::High => condition,
        Sense::Low => Box::new(move || !condition()),
        Sense::Rising => {
            let mut edges = EdgeDetector::new(condition);
            Box::new(move || {
                edges.update();
                edges.rising_edge()
            })
        }
        Sense::Falling => {
            let mut edges = EdgeDetector::new(condition);
            Box::new(move || {
                edges.update();
                edges.falling_edge()
            })
        }
    }
}

/// Entry point: a raw condition awaiting a firing rule
pub struct On {
    scheduler: Scheduler,
    condition: Condition,
}

impl On {
    pub fn new(scheduler: &Scheduler, condition: impl FnMut() -> bool + 'static) -> Self {
        Self {
            scheduler: scheduler.clone(),
            condition: Box::new(condition),
        }
    }

    /// Fire on every satisfied streak
    pub fn every(self) -> Every {
        Every {
            scheduler: self.scheduler,
            condition: self.condition,
        }
    }

    pub fn the_first(self) -> TheNth {
        self.occurrence(1)
    }

    pub fn the_second(self) -> TheNth {
        self.occurrence(2)
    }

    pub fn the_third(self) -> TheNth {
        self.occurrence(3)
    }

    /// Fire only on the `k`th satisfied streak
    pub fn the_nth(self, k: u32) -> Result<TheNth, TriggerError> {
        if k == 0 {
            return Err(TriggerError::ZeroOccurrence);
        }
        Ok(self.occurrence(k))
    }

    fn occurrence(self, k: u32) -> TheNth {
        TheNth {
            scheduler: self.scheduler,
            condition: self.condition,
            occurrence: k,
        }
    }

    pub fn being_true(self) -> Shaped {
        self.every().single().time_being_true()
    }

    pub fn being_false(self) -> Shaped {
        self.every().single().time_being_false()
    }

    pub fn becoming_true(self) -> Shaped {
        self.every().single().time_becoming_true()
    }

    pub fn becoming_false(self) -> Shaped {
        self.every().single().time_becoming_false()
    }
}

/// Fire every Nth qualifying tick
pub struct Every {
    scheduler: Scheduler,
    condition: Condition,
}

impl Every {
    pub fn single(self) -> EveryNth {
        self.streak(1)
    }

    pub fn other(self) -> EveryNth {
        self.streak(2)
    }

    pub fn third(self) -> EveryNth {
        self.streak(3)
    }

    pub fn nth(self, n: u32) -> Result<EveryNth, TriggerError> {
        if n == 0 {
            return Err(TriggerError::ZeroStreak);
        }
        Ok(self.streak(n))
    }

    fn streak(self, n: u32) -> EveryNth {
        EveryNth {
            scheduler: self.scheduler,
            condition: self.condition,
            streak: n,
        }
    }
}

/// Every Nth, awaiting the edge/level selection
pub struct EveryNth {
    scheduler: Scheduler,
    condition: Condition,
    streak: u32,
}

impl EveryNth {
    pub fn time_being(self, sense: Sense) -> Shaped {
        Shaped {
            scheduler: self.scheduler,
            condition: sensed(self.condition, sense),
            rule: FiringRule {
                required_streak: self.streak,
                ..FiringRule::default()
            },
        }
    }

    pub fn time_being_true(self) -> Shaped {
        self.time_being(Sense::High)
    }

    pub fn time_being_false(self) -> Shaped {
        self.time_being(Sense::Low)
    }

    pub fn time_becoming_true(self) -> Shaped {
        self.time_being(Sense::Rising)
    }

    pub fn time_becoming_false(self) -> Shaped {
        self.time_being(Sense::Falling)
    }
}

/// The Kth occurrence, awaiting the edge/level selection
pub struct TheNth {
    scheduler: Scheduler,
    condition: Condition,
    occurrence: u32,
}

impl TheNth {
    pub fn time_being(self, sense: Sense) -> Shaped {
        Shaped {
            scheduler: self.scheduler,
            condition: sensed(self.condition, sense),
            rule: FiringRule {
                occurrence: Some(self.occurrence),
                ..FiringRule::default()
            },
        }
    }

    pub fn time_being_true(self) -> Shaped {
        self.time_being(Sense::High)
    }

    pub fn time_being_false(self) -> Shaped {
        self.time_being(Sense::Low)
    }

    pub fn time_becoming_true(self) -> Shaped {
        self.time_being(Sense::Rising)
    }

    pub fn time_becoming_false(self) -> Shaped {
        self.time_being(Sense::Falling)
    }
}

/// Condition and firing rule fixed; optional offset and extension remain
pub struct Shaped {
    scheduler: Scheduler,
    condition: Condition,
    rule: FiringRule,
}

impl Shaped {
    /// Ignore the first `offset` satisfied streaks
    pub fn with_offset(self, offset: u32) -> Self {
        Self {
            rule: FiringRule {
                offset,
                ..self.rule
            },
            ..self
        }
    }

    /// Keep firing for `length` units after the condition lapses
    pub fn extend_for(self, length: i64) -> Result<ExtendFor, TriggerError> {
        let length = u64::try_from(length).map_err(|_| TriggerError::NegativeExtension(length))?;
        Ok(ExtendFor {
            shaped: self,
            length,
        })
    }

    /// Keep firing after the condition lapses until `stop(satisfied, tick)` holds
    pub fn do_until(self, stop: impl FnMut(bool, u64) -> bool + 'static) -> Extended {
        self.extended(extension::until(stop))
    }

    /// Keep firing after the condition lapses while `keep(satisfied, tick)` holds
    pub fn do_while(self, keep: impl FnMut(bool, u64) -> bool + 'static) -> Extended {
        self.extended(extension::during(keep))
    }

    /// Build and hook the trigger; it destroys itself once `stop(tick)` holds
    pub fn until(self, stop: impl FnMut(u64) -> bool + 'static) -> Trigger {
        self.extended(extension::never()).until(stop)
    }

    /// Build and hook a trigger that runs until destroyed
    pub fn forever(self) -> Trigger {
        self.until(|_| false)
    }

    fn extended(self, extension: ExtensionFn) -> Extended {
        Extended {
            shaped: self,
            extension,
        }
    }
}

/// An extension length awaiting its unit
pub struct ExtendFor {
    shaped: Shaped,
    length: u64,
}

impl ExtendFor {
    pub fn iterations(self) -> Extended {
        self.shaped
            .extended(extension::for_iterations(self.length))
    }

    pub fn milliseconds(self) -> Extended {
        let window = Duration::from_millis(self.length);
        self.windowed(SystemClock, window)
    }

    pub fn seconds(self) -> Extended {
        let window = Duration::from_secs(self.length);
        self.windowed(SystemClock, window)
    }

    /// Extend for `length` multiples of `unit` of wall time.
    ///
    /// Fails with [`TriggerError::ExtensionOverflow`] when the window does
    /// not fit in a [`Duration`].
    pub fn time(self, unit: Duration) -> Result<Extended, TriggerError> {
        self.time_on(SystemClock, unit)
    }

    /// Like [`time`](Self::time), measured on `clock`
    pub fn time_on<C: Clock>(self, clock: C, unit: Duration) -> Result<Extended, TriggerError> {
        let window = scaled(unit, self.length).ok_or(TriggerError::ExtensionOverflow {
            length: self.length,
            unit,
        })?;
        Ok(self.windowed(clock, window))
    }

    fn windowed<C: Clock>(self, clock: C, window: Duration) -> Extended {
        self.shaped
            .extended(extension::for_duration(clock, window))
    }
}

/// `unit * length`, or `None` past [`Duration::MAX`]
fn scaled(unit: Duration, length: u64) -> Option<Duration> {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let nanos = unit.as_nanos().checked_mul(u128::from(length))?;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
    let subsec = u32::try_from(nanos % NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, subsec))
}

/// Fully configured except for termination
pub struct Extended {
    shaped: Shaped,
    extension: ExtensionFn,
}

impl Extended {
    pub fn until(self, stop: impl FnMut(u64) -> bool + 'static) -> Trigger {
        let Shaped {
            scheduler,
            condition,
            rule,
        } = self.shaped;
        let until: UntilFn = Box::new(stop);
        Trigger::spawn(&scheduler, rule, condition, self.extension, until)
    }

    pub fn forever(self) -> Trigger {
        self.until(|_| false)
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
