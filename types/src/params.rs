//! Protocol parameters — fixed tunables shared by every component.
//!
//! These are set once at engine construction. Runtime-mutable settings
//! (pause flag, fee percent, review threshold) live in the engine config
//! instead and go through admin-gated setters.

use serde::{Deserialize, Serialize};

/// Fixed engine parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Blocks a certificate stays valid after issuance or refresh.
    pub cert_validity_blocks: u64,

    /// Mutating operations allowed per principal per rate window.
    pub rate_limit_cap: u32,

    /// Width of the rate window in blocks.
    pub rate_window_blocks: u64,

    /// Maximum accepted length for titles.
    pub max_title_len: usize,

    /// Maximum accepted length for descriptions.
    pub max_description_len: usize,

    /// Maximum accepted length for skill category names.
    pub max_category_len: usize,

    /// Maximum accepted length for review feedback.
    pub max_feedback_len: usize,
}

impl ProtocolParams {
    /// SkillMint defaults — mirrors the deployed marketplace configuration.
    pub fn skillmint_defaults() -> Self {
        Self {
            cert_validity_blocks: 52_560, // ~1 year of blocks
            rate_limit_cap: 5,
            rate_window_blocks: 1,
            max_title_len: 100,
            max_description_len: 500,
            max_category_len: 50,
            max_feedback_len: 500,
        }
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self::skillmint_defaults()
    }
}
