// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drives a scenario's triggers on a scheduler and records when they fire

use crate::scenario::{Scenario, ScenarioError, TriggerSpec};
use serde::Serialize;
use smith_core::{FakeClock, On, Scheduler, Sense, Trigger};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Firings of one trigger over a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerReport {
    pub name: String,
    pub fired: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destroyed_at: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub ticks: u64,
    pub triggers: Vec<TriggerReport>,
}

impl fmt::Display for TriggerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        if self.fired.is_empty() {
            write!(f, "never")?;
        } else {
            let ticks: Vec<String> = self.fired.iter().map(u64::to_string).collect();
            write!(f, "{}", ticks.join(", "))?;
        }
        if let Some(tick) = self.destroyed_at {
            write!(f, " (destroyed at tick {})", tick)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ticks", self.ticks)?;
        for trigger in &self.triggers {
            write!(f, "\n{}", trigger)?;
        }
        Ok(())
    }
}

struct Tracked {
    name: String,
    trigger: Trigger,
    fired: Rc<RefCell<Vec<u64>>>,
    destroyed_at: Option<u64>,
}

/// A scenario with its triggers built and hooked, ready to run
pub struct Simulation {
    scheduler: Scheduler,
    clock: FakeClock,
    tick: Rc<Cell<u64>>,
    ticks: u64,
    tick_length: Duration,
    tracked: Vec<Tracked>,
}

impl Simulation {
    /// Build every trigger of `scenario`; fails on parameters the trigger
    /// builder rejects.
    pub fn prepare(scenario: &Scenario) -> Result<Self, ScenarioError> {
        let scheduler = Scheduler::new();
        let clock = FakeClock::new();
        let tick = Rc::new(Cell::new(0));

        let tracked = scenario
            .triggers
            .iter()
            .map(|def| build(&scheduler, &clock, &tick, scenario, def))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            scheduler,
            clock,
            tick,
            ticks: scenario.ticks,
            tick_length: scenario.tick_length.unwrap_or_default(),
            tracked,
        })
    }

    pub fn trigger_count(&self) -> usize {
        self.tracked.len()
    }

    /// Run the loop for the scenario's tick count
    pub fn run(self) -> Report {
        let Self {
            scheduler,
            clock,
            tick,
            ticks,
            tick_length,
            mut tracked,
        } = self;

        {
            let tick = Rc::clone(&tick);
            scheduler.before_each(move || {
                tick.set(tick.get() + 1);
                clock.advance(tick_length);
            });
        }

        tracing::info!(ticks, triggers = tracked.len(), "simulating scenario");
        scheduler.launch(
            || tick.get() < ticks,
            || {
                let now = tick.get();
                for t in tracked.iter_mut() {
                    if t.destroyed_at.is_none() && t.trigger.is_destroyed() {
                        tracing::debug!(trigger = %t.name, tick = now, "trigger finished");
                        t.destroyed_at = Some(now);
                    }
                }
            },
        );

        Report {
            ticks,
            triggers: tracked
                .into_iter()
                .map(|t| TriggerReport {
                    fired: t.fired.take(),
                    name: t.name,
                    destroyed_at: t.destroyed_at,
                })
                .collect(),
        }
    }
}

fn build(
    scheduler: &Scheduler,
    clock: &FakeClock,
    tick: &Rc<Cell<u64>>,
    scenario: &Scenario,
    def: &TriggerSpec,
) -> Result<Tracked, ScenarioError> {
    let rejected = |source| ScenarioError::Trigger {
        trigger: def.name.clone(),
        source,
    };

    let signal = scenario.signal(&def.signal);
    let condition = {
        let tick = Rc::clone(tick);
        move || signal.is_high(tick.get())
    };

    let sense = Sense::from(def.edge);
    let on = On::new(scheduler, condition);
    let shaped = match def.nth {
        Some(k) => on.the_nth(k).map_err(rejected)?.time_being(sense),
        None => on
            .every()
            .nth(def.every.unwrap_or(1))
            .map_err(rejected)?
            .time_being(sense),
    }
    .with_offset(def.offset);

    let stop = {
        let tick = Rc::clone(tick);
        let until_after = def.until_after;
        move |_: u64| until_after.is_some_and(|n| tick.get() > n)
    };

    let trigger = match (def.extend_iterations, def.extend_time) {
        (Some(n), _) => shaped.extend_for(n).map_err(rejected)?.iterations().until(stop),
        (None, Some(window)) => shaped
            .extend_for(1)
            .map_err(rejected)?
            .time_on(clock.clone(), window)
            .map_err(rejected)?
            .until(stop),
        (None, None) => shaped.until(stop),
    };

    let fired = Rc::new(RefCell::new(Vec::new()));
    let trigger = {
        let fired = Rc::clone(&fired);
        let tick = Rc::clone(tick);
        trigger.execute(move || fired.borrow_mut().push(tick.get()))
    };

    Ok(Tracked {
        name: def.name.clone(),
        trigger,
        fired,
        destroyed_at: None,
    })
}

#[cfg(test)]
#[path = "simulation_tests.rs"]
mod tests;
