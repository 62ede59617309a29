// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rising/falling edge detection over a boolean signal

/// Converts a boolean-producing function into edge events.
///
/// Call [`update`](EdgeDetector::update) at most once per tick; reads in
/// between return the same classification.
pub struct EdgeDetector<F> {
    signal: F,
    previous: bool,
    current: bool,
}

impl<F: FnMut() -> bool> EdgeDetector<F> {
    pub fn new(signal: F) -> Self {
        Self {
            signal,
            previous: false,
            current: false,
        }
    }

    /// Sample the signal, shifting the last sample into `previous`
    pub fn update(&mut self) {
        self.previous = self.current;
        self.current = (self.signal)();
    }

    pub fn rising_edge(&self) -> bool {
        !self.previous && self.current
    }

    pub fn falling_edge(&self) -> bool {
        self.previous && !self.current
    }

    pub fn is_high(&self) -> bool {
        self.current
    }

    /// Evaluate the signal without recording the sample
    pub fn peek(&mut self) -> bool {
        (self.signal)()
    }
}

impl<F> std::fmt::Debug for EdgeDetector<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeDetector")
            .field("previous", &self.previous)
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
#[path = "edge_tests.rs"]
mod tests;
