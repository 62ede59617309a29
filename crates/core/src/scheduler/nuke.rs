// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Categories of scheduler state cleared by a nuke

use crate::error::SchedulerError;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit set of reset categories
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NukeFlags(u8);

impl NukeFlags {
    pub const SCHEDULABLES: Self = Self(0x1);
    pub const MESSAGES: Self = Self(0x2);
    pub const BEFORE_EACH: Self = Self(0x4);
    pub const ALL: Self = Self(0x7);

    /// Wrap raw bits without validation; [`Scheduler::nuke`] rejects unknown bits
    ///
    /// [`Scheduler::nuke`]: crate::Scheduler::nuke
    pub const fn from_bits_retain(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Reject any bit outside [`NukeFlags::ALL`]
    pub fn validate(self) -> Result<Self, SchedulerError> {
        if self.0 & !Self::ALL.0 != 0 {
            return Err(SchedulerError::InvalidNukeFlags { bits: self.0 });
        }
        Ok(self)
    }
}

impl Default for NukeFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for NukeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for NukeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for NukeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::SCHEDULABLES, "Schedulables"),
            (Self::MESSAGES, "Messages"),
            (Self::BEFORE_EACH, "BeforeEach"),
        ];
        let mut set = f.debug_set();
        for (flag, name) in names {
            if self.contains(flag) {
                set.entry(&format_args!("{}", name));
            }
        }
        let unknown = self.0 & !Self::ALL.0;
        if unknown != 0 {
            set.entry(&format_args!("{:#x}", unknown));
        }
        set.finish()
    }
}

#[cfg(test)]
#[path = "nuke_tests.rs"]
mod tests;
