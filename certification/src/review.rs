//! Peer review record.

use serde::{Deserialize, Serialize};
use skillmint_types::{BlockHeight, CertificateId, Principal, ReviewId};

/// One reviewer's judgment of one certificate.
///
/// Immutable once created; at most one review exists per
/// (reviewer, certificate) pair for the engine's entire lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PeerReview {
    pub id: ReviewId,
    pub reviewer: Principal,
    pub certificate_id: CertificateId,
    /// Review score, 1 through 100.
    pub score: u32,
    pub feedback: String,
    pub reviewed_at: BlockHeight,
}

impl PeerReview {
    pub const MIN_SCORE: u32 = 1;
    pub const MAX_SCORE: u32 = 100;
}
