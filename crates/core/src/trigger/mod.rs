// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Temporal triggers: condition → streak/occurrence/extension state machine
//!
//! ```ignore
//! let presses = On::new(&scheduler, move || button.get())
//!     .every()
//!     .single()
//!     .time_becoming_true()
//!     .extend_for(300)?
//!     .milliseconds()
//!     .forever()
//!     .execute(|| claw.open());
//! ```

mod builder;
mod extension;
mod machine;

pub use builder::{Every, EveryNth, ExtendFor, Extended, On, Sense, Shaped, TheNth};
pub use machine::{Firing, FiringRule, Trigger, TriggerState};
