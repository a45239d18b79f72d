//! Nullable clock — deterministic block heights for testing.

use skillmint_types::{BlockHeight, Clock};
use std::cell::Cell;

/// A deterministic clock for testing.
///
/// The height only advances when you tell it to.
#[derive(Debug)]
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_height: u64) -> Self {
        Self {
            current: Cell::new(initial_height),
        }
    }

    /// Advance the height by a number of blocks.
    pub fn advance(&self, blocks: u64) {
        self.current.set(self.current.get() + blocks);
    }

    /// Set the height to a specific value.
    pub fn set(&self, height: u64) {
        self.current.set(height);
    }
}

impl Clock for NullClock {
    fn height(&self) -> BlockHeight {
        BlockHeight::new(self.current.get())
    }
}
