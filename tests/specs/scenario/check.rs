//! `smith check` specs

use crate::prelude::*;

#[test]
fn valid_scenario_passes() {
    let temp = Project::empty();
    temp.file("scenario.toml", BUTTON_SCENARIO);

    temp.smith()
        .args(&["check", "scenario.toml"])
        .passes()
        .stdout_eq("ok: 2 triggers over 1 signals, 14 ticks\n");
}

#[test]
fn scenario_in_subdirectory() {
    let temp = Project::empty();
    let path = temp.file("scenarios/button.toml", BUTTON_SCENARIO);
    assert!(path.starts_with(temp.path()));

    temp.smith()
        .args(&["check", "scenarios/button.toml"])
        .passes()
        .stdout_has("ok:");
}

#[test]
fn unknown_signal_fails() {
    let temp = Project::empty();
    temp.file(
        "scenario.toml",
        r#"
ticks = 5

[[trigger]]
name = "orphan"
signal = "missing"
"#,
    );

    temp.smith()
        .args(&["check", "scenario.toml"])
        .fails()
        .stderr_has("trigger 'orphan' watches unknown signal 'missing'");
}

#[test]
fn zero_streak_fails() {
    let temp = Project::empty();
    temp.file(
        "scenario.toml",
        r#"
ticks = 5

[signals]
button = []

[[trigger]]
name = "lazy"
signal = "button"
every = 0
"#,
    );

    temp.smith()
        .args(&["check", "scenario.toml"])
        .fails()
        .stderr_has("trigger 'lazy'");
}

#[test]
fn malformed_toml_fails() {
    let temp = Project::empty();
    temp.file("scenario.toml", "ticks = \n");

    temp.smith()
        .args(&["check", "scenario.toml"])
        .fails()
        .stderr_has("invalid scenario");
}
