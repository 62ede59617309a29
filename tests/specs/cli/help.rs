//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Project::empty()
        .smith()
        .args(&["--help"])
        .passes()
        .stdout_has("simulate")
        .stdout_has("check");
}

#[test]
fn version_names_the_binary() {
    Project::empty()
        .smith()
        .args(&["--version"])
        .passes()
        .stdout_has("smith");
}

#[test]
fn simulate_help_lists_formats() {
    Project::empty()
        .smith()
        .args(&["simulate", "--help"])
        .passes()
        .stdout_has("--format")
        .stdout_has("json");
}
