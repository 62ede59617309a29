//! CLI error specs

use crate::prelude::*;

#[test]
fn missing_subcommand_fails() {
    Project::empty().smith().fails().stderr_has("Usage");
}

#[test]
fn missing_scenario_file_fails() {
    Project::empty()
        .smith()
        .args(&["simulate", "nope.toml"])
        .fails()
        .stderr_has("failed to read nope.toml");
}

#[test]
fn unknown_format_fails() {
    let temp = Project::empty();
    temp.file("scenario.toml", BUTTON_SCENARIO);

    temp.smith()
        .args(&["simulate", "scenario.toml", "--format", "yaml"])
        .fails()
        .stderr_has("invalid value 'yaml'");
}
