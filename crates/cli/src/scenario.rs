// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario files: scripted signals and the triggers watching them
//!
//! ```toml
//! ticks = 14
//! tick_length = "10ms"
//!
//! [signals]
//! button = [[1, 3], [10, 12]]
//!
//! [[trigger]]
//! name = "held"
//! signal = "button"
//! edge = "rising"
//! extend_iterations = 3
//! until_after = 12
//! ```

use serde::Deserialize;
use smith_core::{Sense, TriggerError};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or validating a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("scenario must run for at least one tick")]
    ZeroTicks,
    #[error("signal '{signal}' has an empty range {start}..={end}")]
    InvalidRange { signal: String, start: u64, end: u64 },
    #[error("trigger '{0}' is defined more than once")]
    DuplicateTrigger(String),
    #[error("trigger '{trigger}' watches unknown signal '{signal}'")]
    UnknownSignal { trigger: String, signal: String },
    #[error("trigger '{0}' sets both `every` and `nth`")]
    ConflictingSelectors(String),
    #[error("trigger '{0}' sets both `extend_iterations` and `extend_time`")]
    ConflictingExtensions(String),
    #[error("trigger '{trigger}': {source}")]
    Trigger {
        trigger: String,
        #[source]
        source: TriggerError,
    },
}

/// Which aspect of a signal a trigger counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    #[default]
    High,
    Low,
    Rising,
    Falling,
}

impl From<Edge> for Sense {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::High => Sense::High,
            Edge::Low => Sense::Low,
            Edge::Rising => Sense::Rising,
            Edge::Falling => Sense::Falling,
        }
    }
}

/// One `[[trigger]]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerSpec {
    pub name: String,
    pub signal: String,
    #[serde(default)]
    pub edge: Edge,
    /// Fire on every Nth satisfied streak
    pub every: Option<u32>,
    /// Fire only on the Nth satisfied streak
    pub nth: Option<u32>,
    #[serde(default)]
    pub offset: u32,
    pub extend_iterations: Option<i64>,
    #[serde(with = "humantime_serde", default)]
    pub extend_time: Option<Duration>,
    /// Destroy the trigger once the tick counter passes this value
    pub until_after: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub ticks: u64,
    /// Simulated time that passes per tick
    #[serde(with = "humantime_serde", default)]
    pub tick_length: Option<Duration>,
    /// Signal name to inclusive `[start, end]` ranges of high ticks
    #[serde(default)]
    pub signals: BTreeMap<String, Vec<[u64; 2]>>,
    #[serde(default, rename = "trigger")]
    pub triggers: Vec<TriggerSpec>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate scenario text
    pub fn parse(content: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Structural checks. Trigger parameters the builder rejects surface
    /// when the simulation is prepared.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.ticks == 0 {
            return Err(ScenarioError::ZeroTicks);
        }

        for (signal, ranges) in &self.signals {
            if let Some([start, end]) = ranges.iter().find(|[start, end]| start > end) {
                return Err(ScenarioError::InvalidRange {
                    signal: signal.clone(),
                    start: *start,
                    end: *end,
                });
            }
        }

        let mut names = HashSet::new();
        for trigger in &self.triggers {
            if !names.insert(trigger.name.as_str()) {
                return Err(ScenarioError::DuplicateTrigger(trigger.name.clone()));
            }
            if !self.signals.contains_key(&trigger.signal) {
                return Err(ScenarioError::UnknownSignal {
                    trigger: trigger.name.clone(),
                    signal: trigger.signal.clone(),
                });
            }
            if trigger.every.is_some() && trigger.nth.is_some() {
                return Err(ScenarioError::ConflictingSelectors(trigger.name.clone()));
            }
            if trigger.extend_iterations.is_some() && trigger.extend_time.is_some() {
                return Err(ScenarioError::ConflictingExtensions(trigger.name.clone()));
            }
        }

        Ok(())
    }

    /// Ranges of high ticks for `signal`, empty if undefined
    pub fn signal(&self, signal: &str) -> Signal {
        Signal {
            ranges: self.signals.get(signal).cloned().unwrap_or_default(),
        }
    }
}

/// A scripted boolean input
#[derive(Debug, Clone, Default)]
pub struct Signal {
    ranges: Vec<[u64; 2]>,
}

impl Signal {
    pub fn is_high(&self, tick: u64) -> bool {
        self.ranges
            .iter()
            .any(|[start, end]| (*start..=*end).contains(&tick))
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
