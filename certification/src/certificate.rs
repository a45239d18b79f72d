//! Skill certificate record.

use serde::{Deserialize, Serialize};
use skillmint_types::{BlockHeight, CertificateId, LessonId, Principal, ReviewId};

/// A skill certificate held by one principal.
///
/// Never deleted; becomes invalid purely by time once `expires_at` is
/// reached. `certified_at` always records the original issuance height,
/// surviving refreshes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SkillCertificate {
    pub id: CertificateId,
    pub owner: Principal,
    pub skill_category: String,
    /// Derived competency level, 0 through 100. Seeded from completion
    /// scores at issuance, then tracks the peer-review average.
    pub skill_level: u32,
    /// The completed lessons this certificate cites, sorted and deduplicated.
    pub lessons_completed: Vec<LessonId>,
    pub peer_reviews: Vec<ReviewId>,
    /// Mean of all peer-review scores; 0 until the first review lands.
    pub average_score: u32,
    pub certified_at: BlockHeight,
    pub expires_at: BlockHeight,
    pub is_composite: bool,
}

impl SkillCertificate {
    /// Whether the certificate is unexpired at `now`.
    pub fn is_unexpired(&self, now: BlockHeight) -> bool {
        now < self.expires_at
    }
}
