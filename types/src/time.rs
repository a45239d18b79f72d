//! Logical clock types.
//!
//! All time in the engine is measured in block heights: a monotonically
//! increasing counter supplied by the host. Wall-clock time is never
//! consulted, so expiry and rate-window behavior is deterministic and
//! replayable from a transaction log.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical block height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// Height zero.
    pub const GENESIS: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The height `blocks` after this one.
    pub fn plus(&self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }

    /// Whether this height plus a validity period has passed relative to `now`.
    pub fn has_expired(&self, period_blocks: u64, now: BlockHeight) -> bool {
        now.0 >= self.0.saturating_add(period_blocks)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The monotonic clock collaborator.
///
/// Implementations must never go backwards. The engine reads the height once
/// per operation, so one call observes exactly one height.
pub trait Clock {
    fn height(&self) -> BlockHeight;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_expired() {
        let issued = BlockHeight::new(100);
        assert!(!issued.has_expired(50, BlockHeight::new(149)));
        assert!(issued.has_expired(50, BlockHeight::new(150)));
        assert!(issued.has_expired(50, BlockHeight::new(151)));
    }

    #[test]
    fn test_plus_saturates() {
        assert_eq!(
            BlockHeight::new(u64::MAX).plus(1),
            BlockHeight::new(u64::MAX)
        );
    }
}
