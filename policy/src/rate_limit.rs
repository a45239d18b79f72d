//! Per-principal operation rate limiting.
//!
//! Quota is tracked per rate window on the logical clock. The check runs
//! after the blacklist and pause gates, so callers rejected there never
//! spend quota; it runs before domain validation, so a call that passes the
//! gate spends one unit of quota even if its inputs turn out to be invalid.

use serde::{Deserialize, Serialize};
use skillmint_types::{BlockHeight, EngineError, Principal};
use std::collections::BTreeMap;

/// A principal's operation count bound to one rate window.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RateWindow {
    /// First block of the window the count belongs to.
    pub window_start: BlockHeight,
    /// Operations recorded in that window.
    pub operations: u32,
}

/// Counts mutating operations per principal per window.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RateLimiter {
    cap: u32,
    window_blocks: u64,
    windows: BTreeMap<Principal, RateWindow>,
}

impl RateLimiter {
    pub fn new(cap: u32, window_blocks: u64) -> Self {
        Self {
            cap,
            window_blocks: window_blocks.max(1),
            windows: BTreeMap::new(),
        }
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// First block of the window containing `height`.
    fn window_start(&self, height: BlockHeight) -> BlockHeight {
        let width = self.window_blocks;
        BlockHeight::new((height.value() / width) * width)
    }

    /// Record one operation for `principal` at `now`, or fail without
    /// touching the count if the cap is already reached. A stale window is
    /// reset before the cap is checked.
    pub fn check_and_record(
        &mut self,
        principal: &Principal,
        now: BlockHeight,
    ) -> Result<(), EngineError> {
        let start = self.window_start(now);
        let entry = self
            .windows
            .entry(principal.clone())
            .or_insert(RateWindow {
                window_start: start,
                operations: 0,
            });
        if entry.window_start != start {
            entry.window_start = start;
            entry.operations = 0;
        }
        if entry.operations >= self.cap {
            return Err(EngineError::RateLimitExceeded { cap: self.cap });
        }
        entry.operations += 1;
        Ok(())
    }

    /// Start of the most recent window this principal operated in.
    pub fn last_operation_block(&self, principal: &Principal) -> Option<BlockHeight> {
        self.windows.get(principal).map(|w| w.window_start)
    }

    /// Operations recorded for `principal` in the window containing
    /// `height`. Zero for other windows and unknown principals.
    pub fn operations_count(&self, principal: &Principal, height: BlockHeight) -> u32 {
        match self.windows.get(principal) {
            Some(w) if w.window_start == self.window_start(height) => w.operations,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Principal {
        Principal::new("alice")
    }

    #[test]
    fn test_cap_enforced_within_window() {
        let mut limiter = RateLimiter::new(5, 1);
        let now = BlockHeight::new(10);

        for _ in 0..5 {
            limiter
                .check_and_record(&alice(), now)
                .expect("calls under the cap should pass");
        }
        let result = limiter.check_and_record(&alice(), now);
        assert!(matches!(
            result.unwrap_err(),
            EngineError::RateLimitExceeded { cap: 5 }
        ));
        // The rejected call did not consume quota.
        assert_eq!(limiter.operations_count(&alice(), now), 5);
    }

    #[test]
    fn test_new_window_resets_count() {
        let mut limiter = RateLimiter::new(5, 1);
        for _ in 0..5 {
            limiter.check_and_record(&alice(), BlockHeight::new(10)).unwrap();
        }
        limiter
            .check_and_record(&alice(), BlockHeight::new(11))
            .expect("fresh window should allow the call");
        assert_eq!(limiter.operations_count(&alice(), BlockHeight::new(11)), 1);
        assert_eq!(limiter.operations_count(&alice(), BlockHeight::new(10)), 0);
    }

    #[test]
    fn test_principals_are_isolated() {
        let mut limiter = RateLimiter::new(1, 1);
        let now = BlockHeight::new(3);
        limiter.check_and_record(&alice(), now).unwrap();
        limiter
            .check_and_record(&Principal::new("bob"), now)
            .expect("bob has his own quota");
    }

    #[test]
    fn test_wide_windows_bucket_heights() {
        let mut limiter = RateLimiter::new(2, 10);
        limiter.check_and_record(&alice(), BlockHeight::new(10)).unwrap();
        limiter.check_and_record(&alice(), BlockHeight::new(19)).unwrap();
        // Height 19 is still inside the [10, 20) window.
        let result = limiter.check_and_record(&alice(), BlockHeight::new(19));
        assert!(matches!(
            result.unwrap_err(),
            EngineError::RateLimitExceeded { .. }
        ));
        // Height 20 starts the next window.
        limiter.check_and_record(&alice(), BlockHeight::new(20)).unwrap();
    }

    #[test]
    fn test_last_operation_block() {
        let mut limiter = RateLimiter::new(5, 1);
        assert!(limiter.last_operation_block(&alice()).is_none());
        limiter.check_and_record(&alice(), BlockHeight::new(7)).unwrap();
        assert_eq!(
            limiter.last_operation_block(&alice()),
            Some(BlockHeight::new(7))
        );
    }
}
