// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Closures that run at most once

/// Wraps a `FnOnce` so it can be called repeatedly; only the first call runs it
pub struct RunOnce<F> {
    block: Option<F>,
}

impl<F: FnOnce()> RunOnce<F> {
    pub fn new(block: F) -> Self {
        Self { block: Some(block) }
    }

    /// Run the block if it hasn't run yet. Returns whether it ran.
    pub fn call(&mut self) -> bool {
        match self.block.take() {
            Some(block) => {
                block();
                true
            }
            None => false,
        }
    }

    pub fn has_run(&self) -> bool {
        self.block.is_none()
    }
}

pub fn run_once<F: FnOnce()>(block: F) -> RunOnce<F> {
    RunOnce::new(block)
}
