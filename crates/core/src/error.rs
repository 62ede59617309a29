// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the scheduler and trigger builder

use std::time::Duration;
use thiserror::Error;

/// Errors raised by scheduler operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error(
        "nuke flags {bits:#x} contain bits outside Schedulables, Messages, BeforeEach or All (0x1, 0x2, 0x4, 0x7)"
    )]
    InvalidNukeFlags { bits: u8 },
}

/// Errors raised while configuring a trigger
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("can't extend for a negative length ({0})")]
    NegativeExtension(i64),
    #[error("required streak must be at least 1")]
    ZeroStreak,
    #[error("occurrence must be at least 1")]
    ZeroOccurrence,
    #[error("can't extend for {length} x {unit:?}: window does not fit in a duration")]
    ExtensionOverflow { length: u64, unit: Duration },
}
