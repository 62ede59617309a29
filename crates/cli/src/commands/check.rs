// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `smith check <scenario>` - Validate a scenario without running it

use crate::scenario::Scenario;
use crate::simulation::Simulation;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,
}

pub fn check(args: CheckArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    // Building the triggers surfaces the rejections `validate` cannot see
    let simulation = Simulation::prepare(&scenario)?;

    println!(
        "ok: {} triggers over {} signals, {} ticks",
        simulation.trigger_count(),
        scenario.signals.len(),
        scenario.ticks
    );
    Ok(())
}
