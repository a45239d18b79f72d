//! The certification engine — issuance, review consensus, composites.

use crate::certificate::SkillCertificate;
use crate::review::PeerReview;
use serde::{Deserialize, Serialize};
use skillmint_lessons::LessonRegistry;
use skillmint_types::{
    BlockHeight, CertificateId, EngineError, LessonId, Principal, ProtocolParams, ReviewId,
};
use std::collections::{BTreeMap, BTreeSet};

/// Owns every certificate and peer review.
///
/// `skill_index` resolves a principal's latest certificate per skill
/// category in O(log n); a newer certification of the same category
/// overwrites the index entry. `reviewed_pairs` enforces the at-most-one
/// review per (reviewer, certificate) invariant for the engine's lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CertificationEngine {
    certificates: BTreeMap<CertificateId, SkillCertificate>,
    reviews: BTreeMap<ReviewId, PeerReview>,
    reviewed_pairs: BTreeSet<(Principal, CertificateId)>,
    skill_index: BTreeMap<(Principal, String), CertificateId>,
    next_certificate_id: u64,
    next_review_id: u64,
}

impl CertificationEngine {
    pub fn new() -> Self {
        Self {
            certificates: BTreeMap::new(),
            reviews: BTreeMap::new(),
            reviewed_pairs: BTreeSet::new(),
            skill_index: BTreeMap::new(),
            next_certificate_id: 1,
            next_review_id: 1,
        }
    }

    /// Issue a certificate for `caller` backed by completed lessons.
    ///
    /// Every cited lesson must have a completed progress record owned by the
    /// caller. The initial skill level is the mean of the cited completion
    /// scores; the review average starts at zero until peers weigh in.
    pub fn submit_certification(
        &mut self,
        caller: &Principal,
        skill_category: &str,
        lesson_ids: &[LessonId],
        lessons: &LessonRegistry,
        now: BlockHeight,
        params: &ProtocolParams,
    ) -> Result<CertificateId, EngineError> {
        if skill_category.is_empty() || skill_category.len() > params.max_category_len {
            return Err(EngineError::InvalidInput(
                "skill category must be non-empty and within bounds".into(),
            ));
        }
        if lesson_ids.is_empty() {
            return Err(EngineError::NotFound(
                "certification cites no completed lessons".into(),
            ));
        }

        let cited: BTreeSet<LessonId> = lesson_ids.iter().copied().collect();
        let mut score_sum: u64 = 0;
        for &lesson_id in &cited {
            match lessons.progress(caller, lesson_id) {
                Some(progress) if progress.completed => score_sum += progress.score as u64,
                _ => return Err(EngineError::NotFound(lesson_id.to_string())),
            }
        }
        let skill_level = (score_sum / cited.len() as u64) as u32;

        let id = CertificateId::new(self.next_certificate_id);
        self.next_certificate_id += 1;
        self.certificates.insert(
            id,
            SkillCertificate {
                id,
                owner: caller.clone(),
                skill_category: skill_category.to_owned(),
                skill_level,
                lessons_completed: cited.into_iter().collect(),
                peer_reviews: Vec::new(),
                average_score: 0,
                certified_at: now,
                expires_at: now.plus(params.cert_validity_blocks.max(1)),
                is_composite: false,
            },
        );
        self.skill_index
            .insert((caller.clone(), skill_category.to_owned()), id);
        tracing::debug!(certificate = %id, owner = %caller, category = skill_category, "certificate issued");
        Ok(id)
    }

    /// Record a peer review and recompute the certificate's consensus.
    ///
    /// The average is an explicit fold over the full review set so the
    /// invariant `average_score == mean(reviews)` holds by construction.
    pub fn submit_review(
        &mut self,
        caller: &Principal,
        certificate_id: CertificateId,
        score: u32,
        feedback: &str,
        now: BlockHeight,
        params: &ProtocolParams,
    ) -> Result<ReviewId, EngineError> {
        let certificate = self
            .certificates
            .get(&certificate_id)
            .ok_or_else(|| EngineError::NotFound(certificate_id.to_string()))?;
        if certificate.owner == *caller {
            return Err(EngineError::SelfReview);
        }
        if !(PeerReview::MIN_SCORE..=PeerReview::MAX_SCORE).contains(&score) {
            return Err(EngineError::InvalidSkillLevel {
                value: score,
                min: PeerReview::MIN_SCORE,
                max: PeerReview::MAX_SCORE,
            });
        }
        if feedback.len() > params.max_feedback_len {
            return Err(EngineError::InvalidInput("feedback too long".into()));
        }
        if self
            .reviewed_pairs
            .contains(&(caller.clone(), certificate_id))
        {
            return Err(EngineError::AlreadyReviewed);
        }

        let id = ReviewId::new(self.next_review_id);
        self.next_review_id += 1;
        self.reviews.insert(
            id,
            PeerReview {
                id,
                reviewer: caller.clone(),
                certificate_id,
                score,
                feedback: feedback.to_owned(),
                reviewed_at: now,
            },
        );
        self.reviewed_pairs.insert((caller.clone(), certificate_id));

        let (sum, count) = self
            .reviews
            .values()
            .filter(|r| r.certificate_id == certificate_id)
            .fold((0u64, 0u64), |(s, c), r| (s + r.score as u64, c + 1));
        if let Some(certificate) = self.certificates.get_mut(&certificate_id) {
            certificate.peer_reviews.push(id);
            certificate.average_score = (sum / count) as u32;
            certificate.skill_level = certificate.average_score;
        }
        Ok(id)
    }

    /// A certificate is valid iff it exists, is unexpired, and has reached
    /// the review consensus threshold.
    pub fn is_valid(&self, certificate_id: CertificateId, now: BlockHeight, min_reviews: u32) -> bool {
        self.certificates.get(&certificate_id).map_or(false, |c| {
            c.is_unexpired(now) && c.peer_reviews.len() as u32 >= min_reviews
        })
    }

    /// Whether `owner` holds a currently-valid certificate for `category`.
    pub fn has_valid_skill(
        &self,
        owner: &Principal,
        category: &str,
        now: BlockHeight,
        min_reviews: u32,
    ) -> bool {
        self.skill_index
            .get(&(owner.clone(), category.to_owned()))
            .map_or(false, |&id| self.is_valid(id, now, min_reviews))
    }

    /// Extend an expired certificate's validity.
    ///
    /// Only the owner may refresh, and only once the certificate has
    /// actually expired. Review history is retained; `certified_at` keeps
    /// the original issuance height.
    pub fn refresh(
        &mut self,
        caller: &Principal,
        certificate_id: CertificateId,
        now: BlockHeight,
        params: &ProtocolParams,
    ) -> Result<(), EngineError> {
        let certificate = self
            .certificates
            .get_mut(&certificate_id)
            .ok_or_else(|| EngineError::NotFound(certificate_id.to_string()))?;
        if certificate.owner != *caller || certificate.is_unexpired(now) {
            return Err(EngineError::Unauthorized);
        }
        certificate.expires_at = now.plus(params.cert_validity_blocks.max(1));
        tracing::debug!(certificate = %certificate_id, "certificate refreshed");
        Ok(())
    }

    /// Derive a composite certificate from two valid certificates the
    /// caller holds in distinct categories.
    pub fn create_composite(
        &mut self,
        caller: &Principal,
        skill_a: &str,
        skill_b: &str,
        composite_name: &str,
        now: BlockHeight,
        params: &ProtocolParams,
        min_reviews: u32,
    ) -> Result<CertificateId, EngineError> {
        if skill_a.is_empty() || skill_b.is_empty() || composite_name.is_empty() {
            return Err(EngineError::InvalidInput(
                "composite skill names must be non-empty".into(),
            ));
        }
        if skill_a == skill_b {
            return Err(EngineError::InvalidInput(
                "composite sources must be distinct skills".into(),
            ));
        }
        if composite_name.len() > params.max_category_len {
            return Err(EngineError::InvalidInput(
                "composite name too long".into(),
            ));
        }

        let source_a = self.held_certificate(caller, skill_a)?;
        let source_b = self.held_certificate(caller, skill_b)?;
        for source in [source_a, source_b] {
            if !self.is_valid(source, now, min_reviews) {
                return Err(EngineError::Unauthorized);
            }
        }

        let a = &self.certificates[&source_a];
        let b = &self.certificates[&source_b];
        let skill_level = (a.skill_level + b.skill_level) / 2;
        let lessons_completed: BTreeSet<LessonId> = a
            .lessons_completed
            .iter()
            .chain(b.lessons_completed.iter())
            .copied()
            .collect();

        let id = CertificateId::new(self.next_certificate_id);
        self.next_certificate_id += 1;
        self.certificates.insert(
            id,
            SkillCertificate {
                id,
                owner: caller.clone(),
                skill_category: composite_name.to_owned(),
                skill_level,
                lessons_completed: lessons_completed.into_iter().collect(),
                peer_reviews: Vec::new(),
                average_score: 0,
                certified_at: now,
                expires_at: now.plus(params.cert_validity_blocks.max(1)),
                is_composite: true,
            },
        );
        self.skill_index
            .insert((caller.clone(), composite_name.to_owned()), id);
        tracing::debug!(certificate = %id, owner = %caller, name = composite_name, "composite skill created");
        Ok(id)
    }

    fn held_certificate(
        &self,
        owner: &Principal,
        category: &str,
    ) -> Result<CertificateId, EngineError> {
        self.skill_index
            .get(&(owner.clone(), category.to_owned()))
            .copied()
            .ok_or_else(|| EngineError::NotFound(format!("no certificate for skill {category}")))
    }

    pub fn get(&self, certificate_id: CertificateId) -> Option<&SkillCertificate> {
        self.certificates.get(&certificate_id)
    }

    pub fn get_review(&self, review_id: ReviewId) -> Option<&PeerReview> {
        self.reviews.get(&review_id)
    }

    pub fn certificate_count(&self) -> u64 {
        self.certificates.len() as u64
    }

    pub fn review_count(&self) -> u64 {
        self.reviews.len() as u64
    }
}

impl Default for CertificationEngine {
    fn default() -> Self {
        Self::new()
    }
}
