//! Engine-wide error type.

use thiserror::Error;

/// Every failure a public engine operation can return.
///
/// Mutating operations either commit fully or return exactly one of these
/// with no side effects. Gate ordering is fixed: blacklist, pause, rate
/// limit, then domain validation — a blacklisted caller sees `Blacklisted`
/// even when its input is also invalid.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("level {value} outside valid range {min}..={max}")]
    InvalidSkillLevel { value: u32, min: u32, max: u32 },

    #[error("invalid bounty: {0}")]
    InvalidBounty(String),

    #[error("reviewer has already reviewed this certificate")]
    AlreadyReviewed,

    #[error("certificate owners cannot review their own certificate")]
    SelfReview,

    #[error("contract is paused")]
    ContractPaused,

    #[error("rate limit exceeded: {cap} operations per window")]
    RateLimitExceeded { cap: u32 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("emergency withdrawal requires emergency mode")]
    EmergencyWithdrawalNotPermitted,

    #[error("caller is blacklisted")]
    Blacklisted,
}
