//! Runtime-mutable engine configuration.
//!
//! Every write goes through a validated setter; invalid values never reach
//! the stored state. Role checks happen at the engine facade — this module
//! only enforces value ranges.

use serde::{Deserialize, Serialize};
use skillmint_types::{Amount, EngineError};

/// Admin-tunable runtime settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    paused: bool,
    emergency_mode: bool,
    min_reviews_required: u32,
    max_stake_amount: Amount,
    platform_fee_percent: u32,
}

impl EngineConfig {
    pub const DEFAULT_MIN_REVIEWS: u32 = 3;
    pub const DEFAULT_PLATFORM_FEE_PERCENT: u32 = 5;
    pub const DEFAULT_MAX_STAKE: u128 = 1_000_000_000;

    pub fn new() -> Self {
        Self {
            paused: false,
            emergency_mode: false,
            min_reviews_required: Self::DEFAULT_MIN_REVIEWS,
            max_stake_amount: Amount::new(Self::DEFAULT_MAX_STAKE),
            platform_fee_percent: Self::DEFAULT_PLATFORM_FEE_PERCENT,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn emergency_mode(&self) -> bool {
        self.emergency_mode
    }

    pub fn min_reviews_required(&self) -> u32 {
        self.min_reviews_required
    }

    pub fn max_stake_amount(&self) -> Amount {
        self.max_stake_amount
    }

    pub fn platform_fee_percent(&self) -> u32 {
        self.platform_fee_percent
    }

    pub fn set_paused(&mut self, paused: bool) {
        tracing::info!(paused, "pause flag changed");
        self.paused = paused;
    }

    pub fn set_emergency_mode(&mut self, enabled: bool) {
        tracing::warn!(enabled, "emergency mode changed");
        self.emergency_mode = enabled;
    }

    /// Must be positive: a zero threshold would make every unreviewed
    /// certificate immediately valid.
    pub fn set_min_reviews(&mut self, min_reviews: u32) -> Result<(), EngineError> {
        if min_reviews == 0 {
            return Err(EngineError::InvalidInput(
                "min reviews must be positive".into(),
            ));
        }
        self.min_reviews_required = min_reviews;
        Ok(())
    }

    pub fn set_max_stake(&mut self, max_stake: Amount) -> Result<(), EngineError> {
        if max_stake.is_zero() {
            return Err(EngineError::InvalidInput(
                "max stake must be positive".into(),
            ));
        }
        self.max_stake_amount = max_stake;
        Ok(())
    }

    pub fn set_platform_fee(&mut self, percent: u32) -> Result<(), EngineError> {
        if percent > 100 {
            return Err(EngineError::InvalidInput(
                "platform fee must be between 0 and 100".into(),
            ));
        }
        self.platform_fee_percent = percent;
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
