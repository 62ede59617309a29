//! `smith simulate` specs

use crate::prelude::*;

#[test]
fn reports_firing_ticks_per_trigger() {
    let temp = Project::empty();
    temp.file("scenario.toml", BUTTON_SCENARIO);

    temp.smith()
        .args(&["simulate", "scenario.toml"])
        .passes()
        .stdout_eq(
            "14 ticks\n\
             held: 1, 2, 3 (destroyed at tick 13)\n\
             pressed: 1, 2, 3, 4, 10, 11, 12 (destroyed at tick 13)\n",
        );
}

#[test]
fn every_other_low_tick() {
    let temp = Project::empty();
    temp.file(
        "scenario.toml",
        r#"
ticks = 16

[signals]
button = [[1, 3], [10, 12]]

[[trigger]]
name = "released"
signal = "button"
edge = "low"
every = 2
until_after = 14
"#,
    );

    temp.smith()
        .args(&["simulate", "scenario.toml"])
        .passes()
        .stdout_eq("16 ticks\nreleased: 5, 7, 9, 14 (destroyed at tick 15)\n");
}

#[test]
fn json_output() {
    let temp = Project::empty();
    temp.file("scenario.toml", BUTTON_SCENARIO);

    let run = temp
        .smith()
        .args(&["simulate", "scenario.toml", "--format", "json"])
        .passes();

    let report: serde_json::Value = serde_json::from_str(run.stdout()).unwrap();
    similar_asserts::assert_eq!(
        report,
        serde_json::json!({
            "ticks": 14,
            "triggers": [
                { "name": "held", "fired": [1, 2, 3], "destroyed_at": 13 },
                { "name": "pressed", "fired": [1, 2, 3, 4, 10, 11, 12], "destroyed_at": 13 },
            ],
        })
    );
}

#[test]
fn trigger_that_never_fires() {
    let temp = Project::empty();
    temp.file(
        "scenario.toml",
        r#"
ticks = 5

[signals]
button = [[1, 5]]

[[trigger]]
name = "fifth_edge"
signal = "button"
edge = "falling"
every = 5
"#,
    );

    temp.smith()
        .args(&["simulate", "scenario.toml"])
        .passes()
        .stdout_eq("5 ticks\nfifth_edge: never\n");
}

#[test]
fn debug_logging_goes_to_stderr() {
    let temp = Project::empty();
    temp.file("scenario.toml", BUTTON_SCENARIO);

    temp.smith()
        .args(&["simulate", "scenario.toml"])
        .env("SMITH_LOG", "info")
        .passes()
        .stdout_has("held: 1, 2, 3")
        .stderr_has("simulating scenario");
}

#[test]
fn quiet_by_default() {
    let temp = Project::empty();
    temp.file("scenario.toml", BUTTON_SCENARIO);

    temp.smith()
        .args(&["simulate", "scenario.toml"])
        .passes()
        .stderr_lacks("simulating scenario");
}

#[test]
fn rejected_trigger_fails() {
    let temp = Project::empty();
    temp.file(
        "scenario.toml",
        r#"
ticks = 5

[signals]
button = [[1, 2]]

[[trigger]]
name = "backwards"
signal = "button"
extend_iterations = -1
"#,
    );

    temp.smith()
        .args(&["simulate", "scenario.toml"])
        .fails()
        .stderr_has("trigger 'backwards'");
}
