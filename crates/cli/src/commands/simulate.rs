// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `smith simulate <scenario>` - Run a scenario and report trigger firings

use crate::output::{self, OutputFormat};
use crate::scenario::Scenario;
use crate::simulation::Simulation;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct SimulateArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn simulate(args: SimulateArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let report = Simulation::prepare(&scenario)?.run();
    output::print(&report, args.format)
}
